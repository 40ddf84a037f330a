//! The shared time axis.
//!
//! Every time-varying value in an energy system is indexed against one
//! `TimeIndex` owned by the system container. Series lengths are validated
//! against it at construction, never at solve time.

use chrono::{DateTime, Duration, Utc};

use crate::error::{EfError, EfResult};

/// Ordered sequence of time steps shared by every time-varying attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeIndex {
    steps: Vec<DateTime<Utc>>,
}

impl TimeIndex {
    /// Equidistant hourly steps starting at `start`.
    pub fn hourly(start: DateTime<Utc>, periods: usize) -> Self {
        let steps = (0..periods)
            .map(|i| start + Duration::hours(i as i64))
            .collect();
        Self { steps }
    }

    /// Build from explicit steps. Steps must be strictly increasing.
    pub fn from_steps(steps: Vec<DateTime<Utc>>) -> EfResult<Self> {
        if steps.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EfError::InvalidArg {
                what: "time steps must be strictly increasing",
            });
        }
        Ok(Self { steps })
    }

    /// Number of time steps (the model horizon).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Timestamp of step `t` (None if out of range).
    pub fn get(&self, t: usize) -> Option<DateTime<Utc>> {
        self.steps.get(t).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.steps.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn hourly_index_is_equidistant() {
        let idx = TimeIndex::hourly(t0(), 24);
        assert_eq!(idx.len(), 24);
        assert_eq!(idx.get(0), Some(t0()));
        assert_eq!(idx.get(1), Some(t0() + Duration::hours(1)));
        assert_eq!(idx.get(24), None);
    }

    #[test]
    fn from_steps_rejects_unsorted() {
        let steps = vec![t0() + Duration::hours(1), t0()];
        assert!(TimeIndex::from_steps(steps).is_err());
    }

    #[test]
    fn from_steps_rejects_duplicates() {
        let steps = vec![t0(), t0()];
        assert!(TimeIndex::from_steps(steps).is_err());
    }

    #[test]
    fn empty_index_is_allowed() {
        let idx = TimeIndex::from_steps(vec![]).unwrap();
        assert!(idx.is_empty());
    }
}
