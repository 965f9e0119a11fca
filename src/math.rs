// Polynomial evaluation, Lagrange interpolation and per-chunk share generation over `Field`.

use alloc::vec::Vec;

use rand::distributions::{Distribution, Uniform};

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use super::field::Field;

/// One evaluation `(x, f(x))` of a chunk's sharing polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharePoint {
    pub x: u32,
    pub y: u32,
}

/// What a single Lagrange term adds to the running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    /// Log of the term's value.
    Contribution(u32),
    /// The basis polynomial vanishes at the evaluation point.
    Void,
}

// Evaluates the polynomial with coefficients `coeffs` (constant term first) at `x` using
// Horner's method, highest degree first.
pub fn horner(field: &Field, x: u32, coeffs: &[u32]) -> u32 {
    let mut fx = 0;
    for &c in coeffs.iter().rev() {
        fx = if fx != 0 {
            field.exp((field.log(x) + field.log(fx)) % field.max_shares()) ^ c
        } else {
            c
        };
    }
    fx
}

/// Evaluates at `at` the unique polynomial through the points `(xs[i], ys[i])`.
/// The `xs` must be distinct and non-zero.
pub fn lagrange(field: &Field, at: u32, xs: &[u32], ys: &[u32]) -> u32 {
    assert!(xs.len() == ys.len(), "sample length mismatch");

    let max = field.max_shares();
    let mut sum = 0;

    for (i, (&x_i, &y_i)) in xs.iter().zip(ys).enumerate() {
        // Zero terms add nothing, and log(0) is undefined.
        if y_i == 0 {
            continue;
        }

        let mut term = Term::Contribution(field.log(y_i));
        for (j, &x_j) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            if at == x_j {
                term = Term::Void;
                break;
            }
            if let Term::Contribution(product) = term {
                term = Term::Contribution(
                    (product + field.log(at ^ x_j) + max - field.log(x_i ^ x_j)) % max,
                );
            }
        }

        if let Term::Contribution(product) = term {
            sum ^= field.exp(product);
        }
    }

    sum
}

// Generates `threshold` coefficients: the constant term is `chunk`, the others are drawn
// uniformly from the whole field.
pub fn random_polynomial<R: rand::Rng + rand::CryptoRng>(
    field: &Field,
    chunk: u32,
    threshold: usize,
    rng: &mut R,
) -> Vec<u32> {
    let mut coeffs = Vec::with_capacity(threshold);
    let between = Uniform::new(0, field.size());

    coeffs.push(chunk);
    for _ in 1..threshold {
        coeffs.push(between.sample(rng));
    }

    coeffs
}

/// Produces `num_shares` points `(x, f(x))` for `x = 1..=num_shares` on a fresh random
/// polynomial of degree `threshold - 1` whose constant term is `chunk`.
pub fn get_shares<R: rand::Rng + rand::CryptoRng>(
    field: &Field,
    chunk: u32,
    num_shares: usize,
    threshold: usize,
    rng: &mut R,
) -> Vec<SharePoint> {
    #[cfg_attr(not(feature = "zeroize_memory"), allow(unused_mut))]
    let mut coeffs = random_polynomial(field, chunk, threshold, rng);

    let points: Vec<SharePoint> = (1..=num_shares as u32)
        .map(|x| SharePoint {
            x,
            y: horner(field, x, &coeffs),
        })
        .collect();

    #[cfg(feature = "zeroize_memory")]
    coeffs.zeroize();

    points
}
