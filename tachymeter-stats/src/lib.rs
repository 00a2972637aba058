#![warn(missing_docs)]
//! Tachymeter Statistical Reduction
//!
//! Reduces a set of integer timing samples to:
//! - Lower and upper quartile by floor index, no interpolation
//! - Median by middle index
//! - Mean of the interquartile slice, which drops scheduling outliers
//!   from both tails
//!
//! Integer indices keep the output deterministic for identical input.

mod quartiles;

pub use quartiles::{Quartiles, QuartileIndices, compute_quartiles, compute_quartiles_sorted};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let q = compute_quartiles(&[3, 1, 2]);
        assert_eq!(q.median, 2);
        assert_eq!(QuartileIndices::for_len(3).median, 1);
    }
}
