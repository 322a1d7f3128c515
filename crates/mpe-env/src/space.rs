//! Observation and action spaces.
//!
//! Mirrors the gym space vocabulary (`Discrete`, `Box`, `MultiDiscrete`,
//! `Tuple`). Every space has a *flat dimension*: the number of `f32`
//! entries it occupies in a flattened vector, where a discrete choice
//! of `n` options occupies `n` entries (one-hot or logits).

use rand::Rng;
use smallvec::{smallvec, SmallVec};

use mpe_world::noise::standard_normal;

/// A space of observations or actions.
#[derive(Clone, Debug, PartialEq)]
pub enum Space {
    /// One of `n` choices.
    Discrete {
        /// Number of choices.
        n: usize,
    },
    /// A box of reals with uniform bounds.
    Box {
        /// Lower bound of every component (may be `-inf`).
        low: f32,
        /// Upper bound of every component (may be `+inf`).
        high: f32,
        /// Shape of the box.
        shape: SmallVec<[usize; 2]>,
    },
    /// Several independent discrete choices.
    MultiDiscrete {
        /// Number of choices per component.
        nvec: SmallVec<[usize; 4]>,
    },
    /// A heterogeneous sequence of spaces.
    Tuple(Vec<Space>),
}

impl Space {
    /// A one-dimensional box of length `dim`.
    pub fn boxed(low: f32, high: f32, dim: usize) -> Self {
        Self::Box {
            low,
            high,
            shape: smallvec![dim],
        }
    }

    /// An unbounded one-dimensional box, as used for observations.
    pub fn unbounded(dim: usize) -> Self {
        Self::boxed(f32::NEG_INFINITY, f32::INFINITY, dim)
    }

    /// Number of `f32` entries in a flattened element of this space.
    pub fn flat_dim(&self) -> usize {
        match self {
            Self::Discrete { n } => *n,
            Self::Box { shape, .. } => shape.iter().product(),
            Self::MultiDiscrete { nvec } => nvec.iter().sum(),
            Self::Tuple(spaces) => spaces.iter().map(Space::flat_dim).sum(),
        }
    }

    /// Whether every component is a discrete choice.
    pub fn is_discrete(&self) -> bool {
        match self {
            Self::Discrete { .. } | Self::MultiDiscrete { .. } => true,
            Self::Box { .. } => false,
            Self::Tuple(spaces) => spaces.iter().all(Space::is_discrete),
        }
    }

    /// Shape of a flattened element: `[flat_dim]` except for boxes.
    pub fn shape(&self) -> SmallVec<[usize; 2]> {
        match self {
            Self::Box { shape, .. } => shape.clone(),
            other => smallvec![other.flat_dim()],
        }
    }

    /// Draw a random flattened element.
    ///
    /// Discrete components are one-hot. Box components are uniform within
    /// finite bounds and standard normal along unbounded sides.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.flat_dim());
        self.sample_into(rng, &mut out);
        out
    }

    fn sample_into<R: Rng>(&self, rng: &mut R, out: &mut Vec<f32>) {
        match self {
            Self::Discrete { n } => one_hot_into(rng, *n, out),
            Self::MultiDiscrete { nvec } => {
                for &n in nvec {
                    one_hot_into(rng, n, out);
                }
            }
            Self::Box { low, high, .. } => {
                for _ in 0..self.flat_dim() {
                    let v = match (low.is_finite(), high.is_finite()) {
                        (true, true) if low < high && (high - low).is_finite() => {
                            rng.random_range(*low..*high)
                        }
                        // Width overflows f32: interpolate instead.
                        (true, true) if low < high => {
                            let t: f32 = rng.random();
                            (low * (1.0 - t) + high * t).clamp(*low, *high)
                        }
                        (true, true) => *low,
                        (true, false) => low + standard_normal(rng).abs(),
                        (false, true) => high - standard_normal(rng).abs(),
                        (false, false) => standard_normal(rng),
                    };
                    out.push(v);
                }
            }
            Self::Tuple(spaces) => {
                for s in spaces {
                    s.sample_into(rng, out);
                }
            }
        }
    }
}

fn one_hot_into<R: Rng>(rng: &mut R, n: usize, out: &mut Vec<f32>) {
    if n == 0 {
        return;
    }
    let hot = rng.random_range(0..n);
    out.extend((0..n).map(|i| if i == hot { 1.0 } else { 0.0 }));
}
