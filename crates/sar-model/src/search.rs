//! Search evaluation over a fixed set of sample paths.
//!
//! Every applied search contributes one probability of detection per path.
//! A path's weight after searches is its uniform prior times the chance that
//! none of the searches found it, renormalised over all paths:
//!
//! ```text
//! not_detected[p] = Π_s (1 − pd[s][p])
//! weight[p]       = not_detected[p] / Σ_q not_detected[q]
//! cumulative_pd   = Σ_p (1 − not_detected[p]) / n
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId, SearchId};
use sar_grid::{DistOrMap, DistributionBySamplePoints, GridSpec, WeightedPoint};
use sar_path::Sample;
use sar_series::DistributionSeries;

use crate::{ModelError, ModelOutput, ModelResult};

// ── Search ────────────────────────────────────────────────────────────────────

/// A completed or planned search effort.
pub trait Search: Send + Sync + fmt::Debug {
    fn id(&self) -> SearchId;

    fn start(&self) -> EpochMs;

    fn duration_ms(&self) -> i64;

    /// Probability that a person standing at `p` during the search is found.
    fn point_pd(&self, p: GeoPoint) -> f64;
}

/// A search that covers a disk with a single probability of detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiskSearch {
    pub id:          SearchId,
    pub start:       EpochMs,
    pub duration_ms: i64,
    pub center:      GeoPoint,
    pub radius_m:    f64,
    pub pd:          f64,
}

impl DiskSearch {
    pub fn new(start: EpochMs, duration_ms: i64, center: GeoPoint, radius_m: f64, pd: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&pd), "pd must lie in [0, 1]");
        Self { id: SearchId::new_v4(), start, duration_ms, center, radius_m, pd }
    }
}

impl Search for DiskSearch {
    fn id(&self) -> SearchId { self.id }
    fn start(&self) -> EpochMs { self.start }
    fn duration_ms(&self) -> i64 { self.duration_ms }

    fn point_pd(&self, p: GeoPoint) -> f64 {
        if self.center.distance_m(p) <= self.radius_m { self.pd } else { 0.0 }
    }
}

/// Probability that `search` detects the person following `sample`: the
/// best single-instant chance over the search window, sampled at the
/// sample's own time resolution.
pub fn path_pd(sample: &Sample, search: &dyn Search) -> f64 {
    let end = search.start() + search.duration_ms().max(0);
    let mut t = search.start();
    let mut best: f64 = 0.0;
    loop {
        best = best.max(search.point_pd(sample.location(t)));
        if t >= end {
            break;
        }
        t = (t + sample.time_delta_ms()).min(end);
    }
    best
}

// ── PdValues ──────────────────────────────────────────────────────────────────

/// Per-search, per-path probabilities of detection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PdValues {
    num_paths: usize,
    by_search: BTreeMap<SearchId, Vec<f64>>,
}

impl PdValues {
    pub fn new(num_paths: usize) -> Self {
        Self { num_paths, by_search: BTreeMap::new() }
    }

    #[inline] pub fn num_paths(&self) -> usize { self.num_paths }
    #[inline] pub fn num_searches(&self) -> usize { self.by_search.len() }

    pub fn search_ids(&self) -> impl Iterator<Item = SearchId> + '_ {
        self.by_search.keys().copied()
    }

    pub fn get(&self, id: SearchId) -> Option<&[f64]> {
        self.by_search.get(&id).map(Vec::as_slice)
    }

    /// Record one probability per path for `id`, replacing any previous entry.
    pub fn insert(&mut self, id: SearchId, pds: Vec<f64>) -> ModelResult<()> {
        if pds.len() != self.num_paths {
            return Err(ModelError::LengthMismatch {
                expected: self.num_paths,
                got:      pds.len(),
                what:     "per-path detection probabilities",
            });
        }
        self.by_search.insert(id, pds);
        Ok(())
    }

    pub fn remove(&mut self, id: SearchId) -> Option<Vec<f64>> {
        self.by_search.remove(&id)
    }

    /// `Π (1 − pd)` per path over every recorded search.
    pub fn not_detected(&self) -> Vec<f64> {
        self.not_detected_by(self.by_search.values())
    }

    /// `Π (1 − pd)` per path over the listed searches.  Unknown ids are
    /// skipped.
    pub fn not_detected_for(&self, ids: &[SearchId]) -> Vec<f64> {
        let rows = ids.iter().filter_map(|id| {
            let row = self.by_search.get(id);
            if row.is_none() {
                log::warn!("no detection probabilities recorded for search {id}; skipping");
            }
            row
        });
        self.not_detected_by(rows)
    }

    fn not_detected_by<'a>(&self, rows: impl Iterator<Item = &'a Vec<f64>>) -> Vec<f64> {
        let mut out = vec![1.0; self.num_paths];
        for pds in rows {
            for (acc, pd) in out.iter_mut().zip(pds) {
                *acc *= 1.0 - pd;
            }
        }
        out
    }
}

// ── SampleSet ─────────────────────────────────────────────────────────────────

/// The finished sample paths of one model run plus the searches applied to
/// them.  This is the state later search operations consult.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    lpi_id:  LpiId,
    rect:    GeoRectangle,
    spec:    GridSpec,
    samples: Vec<Sample>,
    pd:      PdValues,
}

impl SampleSet {
    pub fn new(lpi_id: LpiId, rect: GeoRectangle, spec: GridSpec, samples: Vec<Sample>) -> Self {
        let pd = PdValues::new(samples.len());
        Self { lpi_id, rect, spec, samples, pd }
    }

    #[inline] pub fn lpi_id(&self) -> LpiId { self.lpi_id }
    #[inline] pub fn rect(&self) -> &GeoRectangle { &self.rect }
    #[inline] pub fn samples(&self) -> &[Sample] { &self.samples }
    #[inline] pub fn pd_values(&self) -> &PdValues { &self.pd }
    #[inline] pub fn len(&self) -> usize { self.samples.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Latest end time over all samples.
    pub fn end_time(&self) -> Option<EpochMs> {
        self.samples.iter().map(Sample::end_time).max()
    }

    pub fn locations_at(&self, t: EpochMs) -> Vec<GeoPoint> {
        self.samples.iter().map(|s| s.location(t)).collect()
    }

    /// Normalised path weights after every applied search.  All zeros if the
    /// searches are certain to have found the person on every path.
    pub fn overall_weights(&self) -> Vec<f64> {
        let n = self.samples.len();
        if n == 0 {
            return Vec::new();
        }
        let prior = 1.0 / n as f64;
        let mut w: Vec<f64> = self.pd.not_detected().into_iter().map(|nd| nd * prior).collect();
        let total: f64 = w.iter().sum();
        if total > 0.0 {
            w.iter_mut().for_each(|x| *x /= total);
        }
        w
    }

    /// Probability that at least one of `ids` would have found the person.
    pub fn cumulative_pd(&self, ids: &[SearchId]) -> f64 {
        let n = self.samples.len();
        if ids.is_empty() || n == 0 {
            return 0.0;
        }
        log::debug!("cumulative pd over {} searches", ids.len());
        let prior = 1.0 / n as f64;
        self.pd.not_detected_for(ids).into_iter().map(|nd| (1.0 - nd) * prior).sum()
    }

    /// Sample-point distribution at `t` with every applied search factored in.
    pub fn distribution_with_searches(&self, t: EpochMs) -> DistributionBySamplePoints {
        DistributionBySamplePoints::from_weighted(
            self.locations_at(t)
                .into_iter()
                .zip(self.overall_weights())
                .map(|(p, w)| WeightedPoint::new(p, w)),
        )
    }

    /// The finer-grained sample-point view at `t`.
    pub fn calc_distribution_with_searches(&self, t: EpochMs) -> DistOrMap {
        DistOrMap::SamplePoints(self.distribution_with_searches(t))
    }

    /// Apply `search` and return `latest` with its with-searches series
    /// recomputed at the initial series' times.
    pub fn add_search(&mut self, search: &dyn Search, latest: &ModelOutput) -> ModelResult<ModelOutput> {
        let id = search.id();
        if self.pd.get(id).is_some() {
            return Err(ModelError::DuplicateSearch(id));
        }
        let pds = self.samples.iter().map(|s| path_pd(s, search)).collect();
        self.pd.insert(id, pds)?;
        log::info!("{}: applied search {id}", self.lpi_id);
        Ok(self.updated_output(latest))
    }

    /// Withdraw a previously applied search.
    pub fn remove_search(&mut self, id: SearchId, latest: &ModelOutput) -> ModelResult<ModelOutput> {
        if self.pd.remove(id).is_none() {
            return Err(ModelError::UnknownSearch(id));
        }
        log::info!("{}: cancelled search {id}", self.lpi_id);
        Ok(self.updated_output(latest))
    }

    fn updated_output(&self, latest: &ModelOutput) -> ModelOutput {
        let series: DistributionSeries = latest
            .initial()
            .times()
            .map(|t| self.distribution_with_searches(t).to_distribution(self.lpi_id, t, self.rect, self.spec))
            .collect();
        latest.with_new_searches(series)
    }
}
