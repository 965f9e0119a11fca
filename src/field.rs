// Log/antilog tables for GF(2^bits), built once per engine and read-only afterwards.

use alloc::{vec, vec::Vec};

use crate::error::{Error, Result};

/// Smallest supported field width.
pub const MIN_BITS: u8 = 3;
/// Largest supported field width; permits 1,048,575 shares.
pub const MAX_BITS: u8 = 20;

/// Primitive polynomials (low-order terms, decimal) for GF(2^n), indexed by `n`.
/// `PRIMITIVE_POLYS[8] == 29` encodes x^8 + x^4 + x^3 + x^2 + 1.
pub const PRIMITIVE_POLYS: [Option<u32>; 31] = [
    None,
    None,
    Some(1),
    Some(3),
    Some(3),
    Some(5),
    Some(3),
    Some(3),
    Some(29),
    Some(17),
    Some(9),
    Some(5),
    Some(83),
    Some(27),
    Some(43),
    Some(3),
    Some(45),
    Some(9),
    Some(39),
    Some(39),
    Some(9),
    Some(5),
    Some(3),
    Some(33),
    Some(27),
    Some(9),
    Some(71),
    Some(39),
    Some(9),
    Some(5),
    Some(83),
];

/// An immutable GF(2^bits) arithmetic context.
///
/// `exps[logs[v]] == v` for every non-zero `v`. `logs[0]` holds a placeholder and is
/// never read: every primitive below special-cases zero operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    bits: u8,
    size: u32,
    max_shares: u32,
    logs: Vec<u32>,
    exps: Vec<u32>,
}

impl Field {
    /// Builds the tables for `bits`-wide elements.
    pub fn new(bits: u8) -> Result<Self> {
        if !(MIN_BITS..=MAX_BITS).contains(&bits) {
            return Err(Error::UnsupportedFieldSize(bits));
        }
        let poly = PRIMITIVE_POLYS
            .get(bits as usize)
            .copied()
            .flatten()
            .ok_or(Error::UnsupportedFieldSize(bits))?;

        let size = 1u32 << bits;
        let max_shares = size - 1;
        let mut logs = vec![0u32; size as usize];
        let mut exps = vec![0u32; size as usize];

        let mut x = 1u32;
        for i in 0..size {
            exps[i as usize] = x;
            logs[x as usize] = i;
            x <<= 1;
            if x >= size {
                x = (x ^ poly) & max_shares;
            }
        }

        Ok(Field {
            bits,
            size,
            max_shares,
            logs,
            exps,
        })
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of field elements, `2^bits`.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Largest element, which is also the largest share id, `2^bits - 1`.
    pub fn max_shares(&self) -> u32 {
        self.max_shares
    }

    /// Discrete log of a non-zero element.
    #[inline]
    pub(crate) fn log(&self, v: u32) -> u32 {
        debug_assert!(v != 0, "log of zero is undefined");
        self.logs[v as usize]
    }

    /// Antilog; `e` may be any index below `size`.
    #[inline]
    pub(crate) fn exp(&self, e: u32) -> u32 {
        self.exps[e as usize]
    }

    /// Addition and subtraction in characteristic 2.
    #[inline]
    pub fn add(a: u32, b: u32) -> u32 {
        a ^ b
    }

    pub fn mul(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp((self.log(a) + self.log(b)) % self.max_shares)
    }

    /// Division; dividing by zero yields zero, matching the table construction.
    pub fn div(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp((self.log(a) + self.max_shares - self.log(b)) % self.max_shares)
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Error, MAX_BITS, MIN_BITS};
    use rstest::rstest;

    #[rstest]
    #[case(2)]
    #[case(21)]
    #[case(0)]
    fn rejects_unsupported_widths(#[case] bits: u8) {
        assert_eq!(Field::new(bits), Err(Error::UnsupportedFieldSize(bits)));
    }

    #[test]
    fn exps_invert_logs() {
        for bits in MIN_BITS..=12 {
            let field = Field::new(bits).unwrap();
            for v in 1..=field.max_shares() {
                assert_eq!(field.exp(field.log(v)), v, "bits={bits} v={v}");
            }
        }
    }

    #[test]
    fn exps_cover_the_multiplicative_group() {
        let field = Field::new(8).unwrap();
        let mut seen = [false; 256];
        for e in 0..field.max_shares() {
            seen[field.exp(e) as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|s| *s));
    }

    #[test]
    fn widest_field_builds() {
        let field = Field::new(MAX_BITS).unwrap();
        assert_eq!(field.size(), 1 << 20);
        assert_eq!(field.max_shares(), (1 << 20) - 1);
    }

    #[test]
    fn mul_matches_carryless_reduction() {
        // x^8 + x^4 + x^3 + x^2 + 1
        fn slow_mul(mut a: u32, mut b: u32) -> u32 {
            let mut p = 0;
            while b != 0 {
                if b & 1 != 0 {
                    p ^= a;
                }
                a <<= 1;
                if a & 0x100 != 0 {
                    a ^= 0x11d;
                }
                b >>= 1;
            }
            p
        }

        let field = Field::new(8).unwrap();
        for a in 0..256 {
            for b in (0..256).step_by(7) {
                assert_eq!(field.mul(a, b), slow_mul(a, b));
            }
        }
    }

    #[test]
    fn div_undoes_mul() {
        let field = Field::new(5).unwrap();
        for a in 0..field.size() {
            for b in 1..field.size() {
                assert_eq!(field.div(field.mul(a, b), b), a);
            }
        }
    }

    #[test]
    fn zero_operands() {
        let field = Field::new(8).unwrap();
        assert_eq!(field.mul(0, 17), 0);
        assert_eq!(field.mul(17, 0), 0);
        assert_eq!(field.div(0, 17), 0);
        assert_eq!(field.div(17, 0), 0);
        assert_eq!(Field::add(17, 17), 0);
    }
}
