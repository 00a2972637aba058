//! Size Generators
//!
//! A `Sizes` value describes the ordered list of input sizes a job measures.
//! Generators are finite and restartable: every call to [`Sizes::iter`]
//! starts a fresh traversal that yields the same terms.
//!
//! Generators nest multiplicatively. The outer generator drives the
//! slow-changing factor and the inner one the fast-changing factor:
//!
//! ```text
//! powers_of(seq([1, 2, 5]), 1, 100, 10)  =>  1 2 5 10 20 50 100 200 500
//! seq_of(powers(1, 8, 2), [1, 20, 30])   =>  1 2 4 8 20 40 80 160 30 60 120 240
//! ```

use std::fmt;

/// A restartable, finite producer of input sizes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sizes {
    /// A single unit value. The default inner generator.
    #[default]
    Identity,
    /// Explicit values, each multiplied by every term of `inner`.
    Seq {
        /// Outer values in declaration order
        values: Vec<u64>,
        /// Generator traversed once per outer value
        inner: Box<Sizes>,
    },
    /// `floor, floor*mul, floor*mul^2, ...` up to and including `ceil`,
    /// each multiplied by every term of `inner`.
    Powers {
        /// First term
        floor: u64,
        /// Inclusive upper bound on the progression term
        ceil: u64,
        /// Ratio between consecutive terms
        mul: u64,
        /// Generator traversed once per progression term
        inner: Box<Sizes>,
    },
}

/// Explicit sizes, emitted verbatim in order.
pub fn seq(values: impl IntoIterator<Item = u64>) -> Sizes {
    seq_of(Sizes::Identity, values)
}

/// For each of `values`, every term of `inner` multiplied by that value.
pub fn seq_of(inner: Sizes, values: impl IntoIterator<Item = u64>) -> Sizes {
    Sizes::Seq {
        values: values.into_iter().collect(),
        inner: Box::new(inner),
    }
}

/// Geometric progression from `floor` while the term is `<= ceil`.
pub fn powers(floor: u64, ceil: u64, mul: u64) -> Sizes {
    powers_of(Sizes::Identity, floor, ceil, mul)
}

/// For each progression term, every term of `inner` multiplied by it.
pub fn powers_of(inner: Sizes, floor: u64, ceil: u64, mul: u64) -> Sizes {
    Sizes::Powers {
        floor,
        ceil,
        mul,
        inner: Box::new(inner),
    }
}

impl Sizes {
    /// Start a fresh traversal.
    pub fn iter(&self) -> SizesIter<'_> {
        let state = match self {
            Sizes::Identity => IterState::Identity { done: false },
            Sizes::Seq { values, inner } => IterState::Seq {
                values: values.iter(),
                current: None,
                inner_gen: inner,
                inner: Box::new(inner.iter()),
            },
            Sizes::Powers {
                floor,
                ceil,
                mul,
                inner,
            } => IterState::Powers {
                current: Some(*floor),
                ceil: *ceil,
                mul: *mul,
                inner_gen: inner,
                inner: Box::new(inner.iter()),
            },
        };
        SizesIter { state }
    }

    /// Number of terms in one traversal.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether a traversal yields nothing.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn is_identity(&self) -> bool {
        matches!(self, Sizes::Identity)
    }
}

impl<'a> IntoIterator for &'a Sizes {
    type Item = u64;
    type IntoIter = SizesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<u64>> for Sizes {
    fn from(values: Vec<u64>) -> Self {
        seq(values)
    }
}

impl<const N: usize> From<[u64; N]> for Sizes {
    fn from(values: [u64; N]) -> Self {
        seq(values)
    }
}

impl From<&[u64]> for Sizes {
    fn from(values: &[u64]) -> Self {
        seq(values.iter().copied())
    }
}

impl fmt::Display for Sizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sizes::Identity => write!(f, "1"),
            Sizes::Seq { values, inner } => {
                write!(f, "seq{values:?}")?;
                if !inner.is_identity() {
                    write!(f, " * {inner}")?;
                }
                Ok(())
            }
            Sizes::Powers {
                floor,
                ceil,
                mul,
                inner,
            } => {
                write!(f, "powers[{floor}..={ceil}, *{mul}]")?;
                if !inner.is_identity() {
                    write!(f, " * {inner}")?;
                }
                Ok(())
            }
        }
    }
}

/// Traversal over a [`Sizes`] generator.
#[derive(Debug, Clone)]
pub struct SizesIter<'a> {
    state: IterState<'a>,
}

#[derive(Debug, Clone)]
enum IterState<'a> {
    Identity {
        done: bool,
    },
    Seq {
        values: std::slice::Iter<'a, u64>,
        current: Option<u64>,
        inner_gen: &'a Sizes,
        inner: Box<SizesIter<'a>>,
    },
    Powers {
        // None once the progression has passed `ceil` or stopped growing
        current: Option<u64>,
        ceil: u64,
        mul: u64,
        inner_gen: &'a Sizes,
        inner: Box<SizesIter<'a>>,
    },
}

/// Next progression term, or `None` when the progression cannot grow.
fn advance(term: u64, mul: u64) -> Option<u64> {
    if term == 0 || mul <= 1 {
        return None;
    }
    term.checked_mul(mul)
}

impl Iterator for SizesIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match &mut self.state {
            IterState::Identity { done } => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(1)
                }
            }
            IterState::Seq {
                values,
                current,
                inner_gen,
                inner,
            } => loop {
                let outer = match *current {
                    Some(v) => v,
                    None => {
                        let v = *values.next()?;
                        *current = Some(v);
                        **inner = Sizes::iter(*inner_gen);
                        v
                    }
                };
                match inner.next() {
                    Some(term) => return Some(outer.saturating_mul(term)),
                    None => *current = None,
                }
            },
            IterState::Powers {
                current,
                ceil,
                mul,
                inner_gen,
                inner,
            } => loop {
                let term = (*current)?;
                if term > *ceil {
                    *current = None;
                    return None;
                }
                match inner.next() {
                    Some(t) => return Some(term.saturating_mul(t)),
                    None => {
                        *current = advance(term, *mul);
                        **inner = Sizes::iter(*inner_gen);
                    }
                }
            },
        }
    }
}
