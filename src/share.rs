use alloc::{format, string::String};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::field::{MAX_BITS, MIN_BITS};

/// The parts of a share string.
///
/// Usage example:
/// ```
/// use gfshares::ShareComponents;
///
/// let share = ShareComponents::decode("8011c2a", 16).unwrap();
/// assert_eq!(share.bits, 8);
/// assert_eq!(share.id, 1);
/// assert_eq!(share.data, "1c2a");
/// assert_eq!(share.encode(16).unwrap(), "8011c2a");
/// ```
///
/// # Wire format
/// `<bits: 1 base-36 digit><id: zero-padded radix digits><data: hex digits>`, where the id
/// field is as wide as `2^bits - 1` written in the radix.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct ShareComponents {
    /// Field width the share was generated with.
    pub bits: u8,
    /// The share's x coordinate.
    pub id: u32,
    /// Hex payload: the share's y values for every chunk of the secret.
    pub data: String,
}

impl ShareComponents {
    /// Renders the share string. The id is written in `radix`.
    pub fn encode(&self, radix: u32) -> Result<String> {
        encode(self.bits, self.id, &self.data, radix)
    }

    /// Parses a share string whose id is written in `radix`.
    pub fn decode(share: &str, radix: u32) -> Result<Self> {
        decode(share, radix)
    }
}

/// Width of the id field: the number of `radix` digits needed for `2^bits - 1`.
pub fn id_width(bits: u8, radix: u32) -> usize {
    let mut rest = (1u64 << bits) - 1;
    let mut width = 0;
    while rest > 0 {
        rest /= radix as u64;
        width += 1;
    }
    width
}

pub fn encode(bits: u8, id: u32, data: &str, radix: u32) -> Result<String> {
    check_radix(radix)?;
    if !(MIN_BITS..=MAX_BITS).contains(&bits) {
        return Err(Error::UnsupportedFieldSize(bits));
    }
    let max = (1u32 << bits) - 1;
    if id < 1 || id > max {
        return Err(Error::InvalidShareId {
            got: id as u64,
            max,
        });
    }
    if data.is_empty() {
        return Err(Error::MalformedShare("share data is empty".into()));
    }
    if let Some(c) = data.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(c));
    }

    let width = id_width(bits, radix);
    let mut out = String::with_capacity(1 + width + data.len());
    // bits <= 20, always a single base-36 digit
    out.push(
        char::from_digit(bits as u32, 36)
            .unwrap_or('0')
            .to_ascii_uppercase(),
    );
    out.push_str(&to_radix(id, radix, width));
    out.push_str(data);
    Ok(out)
}

pub fn decode(share: &str, radix: u32) -> Result<ShareComponents> {
    check_radix(radix)?;
    if !share.is_ascii() {
        return Err(malformed(share));
    }

    let mut chars = share.chars();
    let bits = chars
        .next()
        .and_then(|c| c.to_digit(36))
        .ok_or_else(|| malformed(share))?;
    if bits < MIN_BITS as u32 || bits > MAX_BITS as u32 {
        return Err(Error::MalformedShare(format!(
            "number of bits must be between {MIN_BITS} and {MAX_BITS}, got {bits}"
        )));
    }
    let bits = bits as u8;
    let max = (1u32 << bits) - 1;
    let width = id_width(bits, radix);

    let rest = &share[1..];
    if rest.len() <= width {
        return Err(malformed(share));
    }
    let (id_digits, data) = rest.split_at(width);
    if !id_digits.chars().all(|c| c.is_digit(radix)) || !data.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(malformed(share));
    }

    let id = id_digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u64, |acc, d| acc * radix as u64 + d as u64);
    if id < 1 || id > max as u64 {
        return Err(Error::InvalidShareId { got: id, max });
    }

    Ok(ShareComponents {
        bits,
        id: id as u32,
        data: data.into(),
    })
}

pub(crate) fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(Error::InvalidRadix(radix))
    }
}

/// Writes `value` in `radix` with lower-case digits, zero-padded to `width`.
pub(crate) fn to_radix(mut value: u32, radix: u32, width: usize) -> String {
    let mut digits = alloc::vec::Vec::with_capacity(width);
    while value > 0 {
        digits.push(char::from_digit(value % radix, radix).unwrap_or('0'));
        value /= radix;
    }
    while digits.len() < width {
        digits.push('0');
    }
    digits.iter().rev().collect()
}

fn malformed(share: &str) -> Error {
    let mut shown: String = share.chars().take(16).collect();
    if share.chars().count() > 16 {
        shown.push_str("...");
    }
    Error::MalformedShare(format!("share does not match the expected format: {shown:?}"))
}
