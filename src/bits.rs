// Width-aware bit buffer used to move between hex payloads and field-element chunks.

use alloc::{string::String, vec::Vec};

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// A big-endian sequence of bits. Index 0 is the most significant bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands every hex digit into four bits. Any length is accepted, including odd
    /// lengths and the empty string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let mut out = BitString {
            bits: Vec::with_capacity(hex.len() * 4),
        };
        for c in hex.chars() {
            let nibble = c.to_digit(16).ok_or(Error::InvalidHex(c))?;
            out.push_word(nibble, 4);
        }
        Ok(out)
    }

    /// Renders the bits as lower-case hex, left-padding with zeros to a whole number of
    /// nibbles.
    pub fn to_hex(&self) -> String {
        let pad = (4 - self.bits.len() % 4) % 4;
        let mut out = String::with_capacity((self.bits.len() + pad) / 4);
        let mut nibble = 0u32;
        let mut filled = pad;
        for &bit in &self.bits {
            nibble = (nibble << 1) | bit as u32;
            filled += 1;
            if filled == 4 {
                // nibble < 16
                out.push(char::from_digit(nibble, 16).unwrap_or('0'));
                nibble = 0;
                filled = 0;
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push_word(&mut self, value: u32, width: usize) {
        for shift in (0..width).rev() {
            self.bits.push(shift < 32 && (value >> shift) & 1 == 1);
        }
    }

    pub fn extend(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Left-pads with zeros so the length becomes a multiple of `multiple`.
    /// A multiple of 0 or 1 leaves the buffer untouched.
    pub fn pad_left(&mut self, multiple: usize) {
        if multiple <= 1 {
            return;
        }
        let missing = self.bits.len() % multiple;
        if missing != 0 {
            let fill = multiple - missing;
            self.bits.splice(0..0, core::iter::repeat(false).take(fill));
        }
    }

    /// Cuts the buffer into `width`-bit words starting from its least significant end.
    ///
    /// The first word returned is the least significant one. When the length is not a
    /// multiple of `width`, the last word holds the narrower most significant remainder.
    pub fn split_words(&self, width: usize) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.bits.len() / width.max(1) + 1);
        let mut end = self.bits.len();
        while end > width {
            words.push(Self::word(&self.bits[end - width..end]));
            end -= width;
        }
        if end > 0 {
            words.push(Self::word(&self.bits[..end]));
        }
        words
    }

    /// Drops leading zeros and the first set bit. A buffer without any set bit is
    /// returned whole.
    pub fn strip_sentinel(&self) -> BitString {
        match self.bits.iter().position(|b| *b) {
            Some(at) => BitString {
                bits: self.bits[at + 1..].to_vec(),
            },
            None => self.clone(),
        }
    }

    fn word(bits: &[bool]) -> u32 {
        bits.iter().fold(0, |acc, &b| (acc << 1) | b as u32)
    }
}

/// Hex-encodes the UTF-8 bytes of `s`.
pub fn str_to_hex(s: &str) -> String {
    hex::encode(s.as_bytes())
}

/// Decodes hex produced by [`str_to_hex`] back into a string.
pub fn hex_to_str(h: &str) -> Result<String> {
    let bytes = hex::decode(h).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => Error::InvalidHex(c),
        _ => Error::InvalidEncoding("odd number of hex digits"),
    })?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidEncoding("decoded bytes are not UTF-8"))
}
