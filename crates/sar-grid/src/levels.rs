//! Containment levels: mass cutoffs for the 50 / 90 / 99 % regions.
//!
//! Cell values are sorted descending and summed cumulatively.  The cutoff for
//! fraction `p` is the value at the first index `i ≥ 1` whose cumulative sum
//! exceeds `p · total`; if no such index exists the cutoff is 0.  Every cell
//! (or weighted point) with mass at or above the cutoff belongs to the level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WeightedPoint;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContainmentLevel {
    Fifty,
    Ninety,
    NinetyNine,
}

impl ContainmentLevel {
    pub const ALL: [ContainmentLevel; 3] =
        [ContainmentLevel::Fifty, ContainmentLevel::Ninety, ContainmentLevel::NinetyNine];

    #[inline]
    pub fn fraction(self) -> f64 {
        match self {
            ContainmentLevel::Fifty => 0.50,
            ContainmentLevel::Ninety => 0.90,
            ContainmentLevel::NinetyNine => 0.99,
        }
    }

    #[inline]
    pub fn percent(self) -> u32 {
        match self {
            ContainmentLevel::Fifty => 50,
            ContainmentLevel::Ninety => 90,
            ContainmentLevel::NinetyNine => 99,
        }
    }
}

impl fmt::Display for ContainmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Cutoff mass for each containment level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainmentLevels {
    pub fifty:       f64,
    pub ninety:      f64,
    pub ninety_nine: f64,
}

impl ContainmentLevels {
    /// Compute cutoffs over any collection of cell masses.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().collect();
        values.sort_by(|a, b| b.total_cmp(a));
        let total: f64 = values.iter().sum();

        let mut cum_sum = Vec::with_capacity(values.len());
        let mut running = 0.0;
        for v in &values {
            running += v;
            cum_sum.push(running);
        }

        let cutoff = |p: f64| -> f64 {
            (1..values.len())
                .find(|&i| cum_sum[i] > p * total)
                .map_or(0.0, |i| values[i])
        };

        Self {
            fifty:       cutoff(ContainmentLevel::Fifty.fraction()),
            ninety:      cutoff(ContainmentLevel::Ninety.fraction()),
            ninety_nine: cutoff(ContainmentLevel::NinetyNine.fraction()),
        }
    }

    #[inline]
    pub fn cutoff(&self, level: ContainmentLevel) -> f64 {
        match level {
            ContainmentLevel::Fifty => self.fifty,
            ContainmentLevel::Ninety => self.ninety,
            ContainmentLevel::NinetyNine => self.ninety_nine,
        }
    }

    /// Group `points` by level: each level holds every point whose weight is
    /// at or above that level's cutoff.  Levels nest, so a point can appear
    /// in several groups.
    pub fn filter(&self, points: &[WeightedPoint]) -> Vec<(ContainmentLevel, Vec<WeightedPoint>)> {
        ContainmentLevel::ALL
            .into_iter()
            .map(|level| {
                let cutoff = self.cutoff(level);
                let members = points.iter().copied().filter(|p| p.weight >= cutoff).collect();
                (level, members)
            })
            .collect()
    }
}
