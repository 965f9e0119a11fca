//! Threshold [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing)
//! over GF(2^n), 3 <= n <= 20, with compact hex share strings.
//!
//! A hex secret is split into `n` share strings such that any `t` of them reconstruct it,
//! while fewer reveal nothing about it.
//!
//! # Usage
//! ## (std)
//!
//! ```
//! use gfshares::{Config, SecretSharing};
//!
//! // 8-bit field, share ids written in hex
//! let sss = SecretSharing::new(Config::default()).unwrap();
//! # #[cfg(feature = "std")]
//! # {
//! // Split the secret into 10 shares, any 5 of which recover it
//! let shares = sss.share("a1b2c3d4e5f6", 10, 5).unwrap();
//! assert!(shares.iter().all(|s| s.starts_with('8')));
//! // Recover the original secret!
//! let secret = sss.combine(&shares[3..8]).unwrap();
//! assert_eq!(secret, "a1b2c3d4e5f6");
//! # }
//! ```
//!
//! ## (no std)
//!
//! ```
//! use gfshares::{Config, SecretSharing, DEFAULT_PAD_LENGTH};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let sss = SecretSharing::new(Config { bits: 12, radix: 16 }).unwrap();
//! let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
//! let shares = sss
//!     .share_rng("00ff00ff", 6, 3, DEFAULT_PAD_LENGTH, &mut rng)
//!     .unwrap();
//! // Derive a seventh share from any three existing ones
//! let extra = sss.new_share(7, &shares[..3]).unwrap();
//! let secret = sss.combine([&shares[4], &shares[5], &extra]).unwrap();
//! assert_eq!(secret, "00ff00ff");
//! ```
//!
//! # Share strings
//!
//! `<bits: 1 base-36 digit><id: zero-padded radix digits><data: hex digits>`. With the
//! default configuration a share looks like `801` followed by the payload: an 8-bit field,
//! share id `0x01`. See [`ShareComponents`].
//!
//! # Feature flags
//!
//! - `std` — enables `share`, `share_padded` and `random`, which use `rand::thread_rng`.
//!   Without `std`, supply a cryptographically secure RNG to the `*_rng` variants.
//! - `zeroize_memory` — wipes decoded share components and intermediate secret buffers.
//! - `fuzzing` — derives `arbitrary::Arbitrary` for [`Config`] and [`ShareComponents`].
//!
//! # Thresholds
//!
//! Share strings do not record the threshold they were dealt with. [`SecretSharing::combine`]
//! rejects sets with fewer than two distinct shares, the smallest legal threshold; below
//! that, a set smaller than the real threshold silently yields a wrong value. Callers that
//! know the threshold should use [`SecretSharing::combine_threshold`].
#![cfg_attr(not(feature = "std"), no_std)]

mod bits;
mod error;
mod field;
mod math;
mod share;

extern crate alloc;

use alloc::{string::String, vec, vec::Vec};
use hashbrown::HashSet;
use log::{debug, trace, warn};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

pub use bits::{hex_to_str, str_to_hex};
pub use error::{Error, Result};
pub use field::{Field, MAX_BITS, MIN_BITS, PRIMITIVE_POLYS};
pub use share::ShareComponents;

use bits::BitString;

/// Field width used when none is configured.
pub const DEFAULT_BITS: u8 = 8;
/// Base the share id is written in.
pub const DEFAULT_RADIX: u32 = 16;
/// Secrets are left-padded to a multiple of this many bits before splitting.
pub const DEFAULT_PAD_LENGTH: usize = 128;
pub const MAX_PAD_LENGTH: usize = 1024;
pub const MIN_RANDOM_BITS: usize = 2;
pub const MAX_RANDOM_BITS: usize = 65536;

// Smallest threshold `share` accepts, and therefore the fewest shares that can ever
// reconstruct a secret.
const MIN_THRESHOLD: usize = 2;

/// Engine configuration, fixed for the lifetime of a [`SecretSharing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
pub struct Config {
    /// Field width; share ids range over `1..2^bits`.
    pub bits: u8,
    /// Base of the share id field. Payloads are always hex.
    pub radix: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bits: DEFAULT_BITS,
            radix: DEFAULT_RADIX,
        }
    }
}

/// Splits hex secrets into share strings and recombines them over a GF(2^bits) field.
///
/// The field tables are built once in [`SecretSharing::new`] and never change, so one
/// engine can be shared across threads.
///
/// Usage example:
/// ```
/// # use gfshares::{Config, SecretSharing, Error};
/// let sss = SecretSharing::new(Config { bits: 3, radix: 16 }).unwrap();
/// assert_eq!(sss.field().max_shares(), 7);
/// // A 3-bit field cannot hold eight share ids
/// # #[cfg(feature = "std")]
/// # {
/// let err = sss.share("beef", 8, 2).unwrap_err();
/// assert_eq!(err, Error::InvalidShareCount { got: 8, max: 7 });
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SecretSharing {
    field: Field,
    radix: u32,
}

impl SecretSharing {
    /// Builds the field tables for `config.bits`.
    pub fn new(config: Config) -> Result<Self> {
        share::check_radix(config.radix)?;
        let field = Field::new(config.bits)?;
        debug!(
            "built GF(2^{}) tables: {} elements, radix {}",
            field.bits(),
            field.size(),
            config.radix
        );
        Ok(SecretSharing {
            field,
            radix: config.radix,
        })
    }

    pub fn config(&self) -> Config {
        Config {
            bits: self.field.bits(),
            radix: self.radix,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// This method is useful when `std` is not available. For typical usage
    /// see the `share` method.
    ///
    /// Splits the hex `secret` into `num_shares` share strings, any `threshold` of which
    /// recover it. The secret, prefixed with a marker bit, is left-padded to a multiple of
    /// `pad_length` bits (0 or 1 disables padding) to hide its exact length.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
    /// let shares = sss.share_rng("0badc0de", 3, 2, 0, &mut rng).unwrap();
    /// // No padding: marker bit + 32 secret bits fit in five 8-bit chunks
    /// assert!(shares.iter().all(|s| s.len() == 3 + 10));
    /// ```
    pub fn share_rng<R: rand::Rng + rand::CryptoRng>(
        &self,
        secret: &str,
        num_shares: usize,
        threshold: usize,
        pad_length: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let max = self.field.max_shares() as usize;
        if num_shares < 2 || num_shares > max {
            return Err(Error::InvalidShareCount {
                got: num_shares,
                max,
            });
        }
        if threshold < MIN_THRESHOLD || threshold > num_shares {
            return Err(Error::InvalidThreshold {
                got: threshold,
                max: num_shares,
            });
        }
        if pad_length > MAX_PAD_LENGTH {
            return Err(Error::InvalidPadLength(pad_length));
        }

        let width = self.field.bits() as usize;

        // The marker bit keeps leading zero nibbles alive through reconstruction.
        let mut marked = BitString::new();
        marked.push_bit(true);
        marked.extend(&BitString::from_hex(secret)?);
        marked.pad_left(pad_length);
        #[cfg_attr(not(feature = "zeroize_memory"), allow(unused_mut))]
        let mut chunks = marked.split_words(width);

        debug!(
            "splitting {} bits ({} chunks) into {} shares, threshold {}",
            marked.len(),
            chunks.len(),
            num_shares,
            threshold
        );

        // ys[share][chunk]
        let mut ys = vec![Vec::with_capacity(chunks.len()); num_shares];
        for (i, &chunk) in chunks.iter().enumerate() {
            let points = math::get_shares(&self.field, chunk, num_shares, threshold, rng);
            for (row, point) in ys.iter_mut().zip(points) {
                row.push(point.y);
            }
            trace!("chunk {i} shared");
        }

        #[cfg(feature = "zeroize_memory")]
        chunks.zeroize();

        ys.iter()
            .enumerate()
            .map(|(i, row)| {
                // The first chunk is the least significant, so it goes last.
                let mut payload = BitString::new();
                for &y in row.iter().rev() {
                    payload.push_word(y, width);
                }
                share::encode(self.field.bits(), i as u32 + 1, &payload.to_hex(), self.radix)
            })
            .collect()
    }

    /// Splits the hex `secret` into `num_shares` share strings, any `threshold` of which
    /// recover it, padding to [`DEFAULT_PAD_LENGTH`] bits. Uses `rand::thread_rng`.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// let shares = sss.share("deadbeef", 3, 2).unwrap();
    /// assert_eq!(shares.len(), 3);
    /// assert!(shares[0].starts_with("801"));
    /// ```
    #[cfg(feature = "std")]
    pub fn share(&self, secret: &str, num_shares: usize, threshold: usize) -> Result<Vec<String>> {
        self.share_padded(secret, num_shares, threshold, DEFAULT_PAD_LENGTH)
    }

    /// Like [`SecretSharing::share`] with an explicit zero-pad length.
    #[cfg(feature = "std")]
    pub fn share_padded(
        &self,
        secret: &str,
        num_shares: usize,
        threshold: usize,
        pad_length: usize,
    ) -> Result<Vec<String>> {
        let mut rng = rand::thread_rng();
        self.share_rng(secret, num_shares, threshold, pad_length, &mut rng)
    }

    /// Given an iterable collection of share strings, recovers the original hex secret.
    ///
    /// Shares are deduplicated by id. At least two distinct shares are required; handing
    /// in fewer than the threshold the shares were dealt with yields a wrong secret
    /// without an error.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing, Error};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// # let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
    /// let mut shares = sss.share_rng("c0ffee", 4, 3, 128, &mut rng).unwrap();
    /// assert_eq!(sss.combine(&shares[1..]).unwrap(), "c0ffee");
    /// // Remove shares for demonstration purposes
    /// shares.truncate(1);
    /// assert_eq!(
    ///     sss.combine(&shares),
    ///     Err(Error::InsufficientShares { got: 1, need: 2 })
    /// );
    /// ```
    pub fn combine<I, S>(&self, shares: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.combine_at(shares, 0)
    }

    /// Evaluates the shares' polynomials at `at` and returns the hex payload.
    ///
    /// At `0` this is the secret, as returned by [`SecretSharing::combine`]. Any other
    /// point yields the payload of the share with that id.
    pub fn combine_at<I, S>(&self, shares: I, at: u32) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = self.field.max_shares();
        if at > max {
            return Err(Error::InvalidPoint { got: at, max });
        }

        let (xs, rows) = self.collect(shares)?;
        if xs.len() < MIN_THRESHOLD {
            return Err(Error::InsufficientShares {
                got: xs.len(),
                need: MIN_THRESHOLD,
            });
        }
        Ok(self.interpolate(at, &xs, &rows))
    }

    /// Recovers the secret, requiring at least `threshold` distinct shares.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing, Error};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// # let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
    /// let shares = sss.share_rng("c0ffee", 5, 3, 128, &mut rng).unwrap();
    /// assert_eq!(sss.combine_threshold(&shares[..3], 3).unwrap(), "c0ffee");
    /// assert_eq!(
    ///     sss.combine_threshold(&shares[..2], 3),
    ///     Err(Error::InsufficientShares { got: 2, need: 3 })
    /// );
    /// ```
    pub fn combine_threshold<I, S>(&self, shares: I, threshold: usize) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = self.field.max_shares() as usize;
        if threshold < MIN_THRESHOLD || threshold > max {
            return Err(Error::InvalidThreshold {
                got: threshold,
                max,
            });
        }

        let (xs, rows) = self.collect(shares)?;
        if xs.len() < threshold {
            return Err(Error::InsufficientShares {
                got: xs.len(),
                need: threshold,
            });
        }
        Ok(self.interpolate(0, &xs, &rows))
    }

    /// Derives the share with the given `id` from existing shares.
    ///
    /// At least as many distinct shares as the original threshold must be supplied for the
    /// new share to be valid; see [`SecretSharing::combine`].
    pub fn new_share<I, S>(&self, id: u32, shares: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = self.field.max_shares();
        if id < 1 || id > max {
            return Err(Error::InvalidShareId {
                got: id as u64,
                max,
            });
        }

        let payload = self.combine_at(shares, id)?;
        debug!("derived share {id}");
        share::encode(self.field.bits(), id, &payload, self.radix)
    }

    /// Like [`SecretSharing::new_share`], with the id written in the configured radix.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// # let mut rng = rand_chacha::ChaCha8Rng::from_seed([0x90; 32]);
    /// let shares = sss.share_rng("c0ffee", 3, 2, 128, &mut rng).unwrap();
    /// let share = sss.new_share_str("1f", &shares).unwrap();
    /// assert!(share.starts_with("81f"));
    /// ```
    pub fn new_share_str<I, S>(&self, id: &str, shares: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = u32::from_str_radix(id, self.radix)
            .map_err(|_| Error::InvalidEncoding("share id is not a number in the configured radix"))?;
        self.new_share(parsed, shares)
    }

    /// This method is useful when `std` is not available. For typical usage
    /// see the `random` method.
    ///
    /// Returns `bits` random bits as hex, left-padded to whole nibbles.
    pub fn random_rng<R: rand::Rng + rand::CryptoRng>(
        &self,
        bits: usize,
        rng: &mut R,
    ) -> Result<String> {
        if !(MIN_RANDOM_BITS..=MAX_RANDOM_BITS).contains(&bits) {
            return Err(Error::InvalidRandomBits(bits));
        }

        let mut bytes = vec![0u8; bits.div_ceil(8)];
        rng.fill_bytes(&mut bytes);
        let excess = bytes.len() * 8 - bits;
        bytes[0] &= 0xff >> excess;

        let mut encoded = hex::encode(&bytes);
        // An excess of four or more bits leaves a leading zero nibble.
        let out = encoded.split_off(encoded.len() - bits.div_ceil(4));

        #[cfg(feature = "zeroize_memory")]
        bytes.zeroize();

        Ok(out)
    }

    /// Returns `bits` random bits as hex, drawn from `rand::thread_rng`.
    ///
    /// Example:
    /// ```
    /// # use gfshares::{Config, SecretSharing};
    /// # let sss = SecretSharing::new(Config::default()).unwrap();
    /// let key = sss.random(512).unwrap();
    /// assert_eq!(key.len(), 128);
    /// ```
    #[cfg(feature = "std")]
    pub fn random(&self, bits: usize) -> Result<String> {
        let mut rng = rand::thread_rng();
        self.random_rng(bits, &mut rng)
    }

    /// Decodes a share string using the configured radix.
    pub fn extract_share_components(&self, share: &str) -> Result<ShareComponents> {
        share::decode(share, self.radix)
    }

    // Decodes the shares into distinct x values and per-chunk rows of y values,
    // `rows[chunk][share]`, least significant chunk first.
    fn collect<I, S>(&self, shares: I) -> Result<(Vec<u32>, Vec<Vec<u32>>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let width = self.field.bits() as usize;
        let mut seen: HashSet<u32> = HashSet::new();
        let mut xs = Vec::new();
        let mut columns: Vec<Vec<u32>> = Vec::new();
        let mut total = 0usize;

        for raw in shares {
            total += 1;
            let share = share::decode(raw.as_ref(), self.radix)?;
            if share.bits != self.field.bits() {
                return Err(Error::MismatchedConfig {
                    expected: self.field.bits(),
                    found: share.bits,
                });
            }
            if !seen.insert(share.id) {
                continue;
            }

            let mut payload = BitString::from_hex(&share.data)?;
            payload.pad_left(width);
            xs.push(share.id);
            columns.push(payload.split_words(width));
        }

        if total == 0 {
            return Err(Error::NoShares);
        }
        if total > xs.len() {
            warn!("ignored {} duplicate share(s)", total - xs.len());
        }

        // Shares whose payload came out shorter carry zeros in the missing leading chunks.
        let chunks = columns.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = vec![Vec::with_capacity(xs.len()); chunks];
        for column in &mut columns {
            for (k, row) in rows.iter_mut().enumerate() {
                row.push(column.get(k).copied().unwrap_or(0));
            }
            #[cfg(feature = "zeroize_memory")]
            column.zeroize();
        }

        debug!(
            "combining {} distinct shares over {} chunks",
            xs.len(),
            chunks
        );
        Ok((xs, rows))
    }

    fn interpolate(&self, at: u32, xs: &[u32], rows: &[Vec<u32>]) -> String {
        let width = self.field.bits() as usize;
        let mut result = BitString::new();
        for row in rows.iter().rev() {
            result.push_word(math::lagrange(&self.field, at, xs, row), width);
        }

        if at == 0 {
            result.strip_sentinel().to_hex()
        } else {
            result.to_hex()
        }
    }
}
