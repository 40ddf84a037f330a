//! Fixed-or-per-step attribute values.

use crate::error::{EfError, EfResult};

/// A value attached to a flow attribute: either one number applied at every
/// time step, or one number per step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Series {
    /// The same value at every time step.
    Fixed(f64),
    /// One value per time step; length must match the system's time index.
    Values(Vec<f64>),
}

impl Series {
    /// Value at step `t`. `Fixed` answers for any step; `Values` only
    /// within its length.
    pub fn value_at(&self, t: usize) -> Option<f64> {
        match self {
            Series::Fixed(v) => Some(*v),
            Series::Values(vs) => vs.get(t).copied(),
        }
    }

    /// Whether this series is usable with a horizon of `n` steps.
    pub fn matches_horizon(&self, n: usize) -> bool {
        match self {
            Series::Fixed(_) => true,
            Series::Values(vs) => vs.len() == n,
        }
    }

    /// Reject NaN/inf entries up front so they cannot reach the solver.
    pub fn check_finite(&self, what: &'static str) -> EfResult<()> {
        let bad = match self {
            Series::Fixed(v) => (!v.is_finite()).then_some(*v),
            Series::Values(vs) => vs.iter().copied().find(|v| !v.is_finite()),
        };
        match bad {
            Some(value) => Err(EfError::NonFinite { what, value }),
            None => Ok(()),
        }
    }
}

impl From<f64> for Series {
    fn from(v: f64) -> Self {
        Series::Fixed(v)
    }
}

impl From<Vec<f64>> for Series {
    fn from(vs: Vec<f64>) -> Self {
        Series::Values(vs)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn values_series_answers_exactly_its_horizon(vs in prop::collection::vec(-1e6_f64..1e6_f64, 0..32)) {
            let n = vs.len();
            let s = Series::from(vs.clone());
            prop_assert!(s.matches_horizon(n));
            for (t, v) in vs.iter().enumerate() {
                prop_assert_eq!(s.value_at(t), Some(*v));
            }
            prop_assert_eq!(s.value_at(n), None);
        }
    }
}
