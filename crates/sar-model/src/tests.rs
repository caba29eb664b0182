//! Unit tests for sar-model.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use chrono::Utc;
    use sar_core::{Direction, EpochMs, GeoPoint, GeoRectangle, LpiId};
    use sar_schedule::{MovementSchedule, StandardSchedule};

    use crate::{ModelBuilder, ModelParams};

    pub fn rect() -> GeoRectangle {
        GeoRectangle::new(0.1, -0.1, 0.1, -0.1).unwrap()
    }

    pub fn continuous() -> Arc<dyn MovementSchedule> {
        Arc::new(StandardSchedule::Continuous.create(Arc::new(Utc)).unwrap())
    }

    /// Four starts spread west to east along the equator.
    pub fn starts() -> Vec<GeoPoint> {
        [-0.05, -0.02, 0.02, 0.05].iter().map(|&lon| GeoPoint::new(0.0, lon)).collect()
    }

    /// 9 km north at 6 km/h: every path ends between 1 h and 2 h.
    pub fn params() -> ModelParams {
        ModelParams::new(Direction::North, 6.0, 9.0)
    }

    pub fn builder(lpi: LpiId) -> ModelBuilder {
        ModelBuilder::new(lpi, EpochMs(0), rect(), continuous(), params()).start_points(starts())
    }
}

#[cfg(test)]
mod params {
    use sar_core::{Direction, MS_PER_MINUTE};

    use crate::{DEFAULT_TIME_DELTA_MS, ModelParams};

    #[test]
    fn defaults_are_valid() {
        let p = ModelParams::new(Direction::East, 3.0, 5.0);
        assert_eq!(p.time_delta_ms, DEFAULT_TIME_DELTA_MS);
        assert!(p.validate().is_valid());
    }

    #[test]
    fn collects_every_violation() {
        let p = ModelParams::new(Direction::East, 0.0, -1.0).time_delta_ms(7 * MS_PER_MINUTE);
        let info = p.validate();
        assert_eq!(info.errors().len(), 3);
        assert!(info.warnings().is_empty());
    }

    #[test]
    fn time_delta_must_divide_an_hour() {
        let ok = ModelParams::new(Direction::East, 3.0, 5.0).time_delta_ms(15 * MS_PER_MINUTE);
        assert!(ok.validate().is_valid());
        let bad = ok.clone().time_delta_ms(0);
        assert!(!bad.validate().is_valid());
    }

    #[test]
    fn json_fills_defaults() {
        let p: ModelParams =
            serde_json::from_str(r#"{"direction":"North","speed_kph":3.0,"distance_km":5.0}"#).unwrap();
        assert_eq!(p, ModelParams::new(Direction::North, 3.0, 5.0));
    }
}

#[cfg(test)]
mod run {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use sar_core::{EpochMs, GeoPoint, LpiId, MS_PER_HOUR};
    use sar_path::UniformLand;

    use super::fixtures::*;
    use crate::{LogProgress, ModelBuilder, ModelError, NoopProgress, ProgressSink};

    const H: i64 = MS_PER_HOUR;

    #[derive(Default)]
    struct Recorder {
        started:  Option<usize>,
        steps:    usize,
        messages: Vec<String>,
        finished: Option<usize>,
    }

    impl ProgressSink for Recorder {
        fn on_start(&mut self, _lpi: LpiId, paths: usize) {
            self.started = Some(paths);
        }

        fn on_step(&mut self, _t: EpochMs, _active: usize) {
            self.steps += 1;
        }

        fn status(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }

        fn on_finish(&mut self, _lpi: LpiId, distributions: usize) {
            self.finished = Some(distributions);
        }
    }

    #[test]
    fn produces_valid_hourly_series() {
        let lpi = LpiId::new_v4();
        let model = builder(lpi).name("test-model").build().unwrap();
        let mut rec = Recorder::default();
        let run = model.run(&mut rec).unwrap();

        let out = &run.output;
        assert_eq!(out.model_name(), "test-model");
        assert_eq!(out.lpi_id(), lpi);
        assert_eq!(out.initial().times().collect::<Vec<_>>(), vec![EpochMs(0), EpochMs(H)]);
        assert_eq!(out.initial(), out.with_searches());
        assert_eq!(out.paths().len(), 4);
        for (path, sample) in out.paths().iter().zip(run.samples.samples()) {
            assert_eq!(path.end_time(), sample.end_time());
            assert_eq!(path.location(EpochMs(H / 3)), sample.location(EpochMs(H / 3)));
        }
        let info = out.validate();
        assert!(info.is_valid(), "{info}");
        assert!(info.warnings().is_empty());

        assert_eq!(rec.started, Some(4));
        assert_eq!(rec.finished, Some(2));
        assert!(rec.steps >= 18);
        assert_eq!(rec.messages, vec!["test-model: finished computing.".to_string()]);
    }

    #[test]
    fn each_path_travels_the_full_distance_north() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        for (start, sample) in starts().into_iter().zip(run.samples.samples()) {
            let end = *sample.points().last().unwrap();
            assert_relative_eq!(start.distance_m(end), 9000.0, epsilon = 1e-3);
            assert_relative_eq!(end.lon, start.lon, epsilon = 1e-12);
            assert!(sample.end_time() > EpochMs(H) && sample.end_time() < EpochMs(2 * H));
        }
    }

    #[test]
    fn horizon_stops_paths_that_never_end() {
        let model = builder(LpiId::new_v4())
            .land(Arc::new(UniformLand { speed_factor: 0.0 }))
            .build()
            .unwrap();
        let model = {
            let mut m = model;
            m.params.max_duration_ms = H;
            m
        };
        let run = model.run(&mut LogProgress::new()).unwrap();
        for s in run.samples.samples() {
            assert_eq!(s.end_time(), EpochMs(H));
            let (first, last) = (s.points()[0], s.points()[s.points().len() - 1]);
            assert!(first.distance_m(last) < 1e-6);
        }
    }

    #[test]
    fn steps_advance_on_a_fixed_clock() {
        struct Times(Vec<EpochMs>);
        impl ProgressSink for Times {
            fn on_step(&mut self, t: EpochMs, _active: usize) {
                self.0.push(t);
            }
        }

        let model = builder(LpiId::new_v4()).build().unwrap();
        let delta = model.params().time_delta_ms;
        let mut times = Times(Vec::new());
        model.run(&mut times).unwrap();
        for (i, t) in times.0.iter().enumerate() {
            assert_eq!(*t, EpochMs((i as i64 + 1) * delta));
        }
    }

    #[test]
    fn start_outside_rectangle_gives_a_single_point_path() {
        let run = builder(LpiId::new_v4())
            .start_points(vec![GeoPoint::new(0.5, 0.5)])
            .build()
            .unwrap()
            .run(&mut NoopProgress)
            .unwrap();
        let s = &run.samples.samples()[0];
        assert_eq!(s.points().len(), 1);
        assert_eq!(run.output.initial().len(), 1);
    }

    #[test]
    fn build_rejects_bad_inputs() {
        let mut bad = params();
        bad.speed_kph = -1.0;
        let err = ModelBuilder::new(LpiId::new_v4(), EpochMs(0), rect(), continuous(), bad).build();
        assert!(matches!(err, Err(ModelError::InvalidParams(_))));

        let err = builder(LpiId::new_v4()).start_points(vec![]).build();
        assert!(matches!(err, Err(ModelError::Config(_))));
    }

    #[test]
    fn interpolates_between_hours() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        let half = run.output.distribution_at(EpochMs(H / 2)).unwrap();
        assert_eq!(half.time(), EpochMs(H / 2));
        assert_relative_eq!(half.map().total(), 1.0, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod search {
    use approx::assert_relative_eq;
    use sar_core::{EpochMs, GeoPoint, LpiId, MS_PER_HOUR, MS_PER_MINUTE, SearchId};
    use sar_grid::DistOrMap;
    use sar_path::Sample;

    use super::fixtures::*;
    use crate::{DiskSearch, ModelError, NoopProgress, PdValues, Search, path_pd};

    const H: i64 = MS_PER_HOUR;

    /// Covers only the easternmost start point at t = 0.
    fn east_search() -> DiskSearch {
        DiskSearch::new(EpochMs(0), 0, GeoPoint::new(0.0, 0.05), 1000.0, 0.8)
    }

    #[test]
    fn failed_search_shifts_weight_away() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        let mut set = run.samples;
        let search = east_search();

        let updated = set.add_search(&search, &run.output).unwrap();
        let w = set.overall_weights();
        assert_relative_eq!(w[0], 0.3125, epsilon = 1e-12);
        assert_relative_eq!(w[3], 0.0625, epsilon = 1e-12);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(set.cumulative_pd(&[search.id()]), 0.2, epsilon = 1e-12);

        assert_ne!(updated.with_searches(), updated.initial());
        assert_eq!(updated.initial(), run.output.initial());
        assert!(updated.validate().is_valid());

        let restored = set.remove_search(search.id(), &updated).unwrap();
        for t in restored.initial().times() {
            assert_eq!(restored.with_searches().get(t).unwrap().cells(), restored.initial().get(t).unwrap().cells());
        }
        assert_eq!(set.cumulative_pd(&[search.id()]), 0.0);
    }

    #[test]
    fn duplicate_and_unknown_searches_are_errors() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        let mut set = run.samples;
        let search = east_search();
        set.add_search(&search, &run.output).unwrap();
        assert!(matches!(set.add_search(&search, &run.output), Err(ModelError::DuplicateSearch(_))));
        assert!(matches!(
            set.remove_search(SearchId::new_v4(), &run.output),
            Err(ModelError::UnknownSearch(_))
        ));
    }

    #[test]
    fn sample_point_view_carries_weights() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        let mut set = run.samples;
        set.add_search(&east_search(), &run.output).unwrap();
        match set.calc_distribution_with_searches(EpochMs(H)) {
            DistOrMap::SamplePoints(d) => {
                assert_eq!(d.len(), 4);
                assert_relative_eq!(d.total_weight(), 1.0, epsilon = 1e-12);
            }
            DistOrMap::Grid(_) => panic!("expected sample points"),
        }
    }

    #[test]
    fn cumulative_pd_without_searches_is_zero() {
        let run = builder(LpiId::new_v4()).build().unwrap().run(&mut NoopProgress).unwrap();
        assert_eq!(run.samples.cumulative_pd(&[]), 0.0);
    }

    #[test]
    fn path_pd_samples_the_search_window() {
        let sample = Sample::new(
            EpochMs(0),
            30 * MS_PER_MINUTE,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.01, 0.0), GeoPoint::new(0.02, 0.0)],
        )
        .unwrap();
        let long = DiskSearch::new(EpochMs(0), H, GeoPoint::new(0.02, 0.0), 100.0, 0.9);
        assert_relative_eq!(path_pd(&sample, &long), 0.9);
        let instant = DiskSearch { duration_ms: 0, ..long.clone() };
        assert_eq!(path_pd(&sample, &instant), 0.0);
        assert_eq!(long.point_pd(GeoPoint::new(0.5, 0.5)), 0.0);
    }

    #[test]
    fn pd_values_product_and_length_check() {
        let mut pd = PdValues::new(2);
        let (a, b) = (SearchId::new_v4(), SearchId::new_v4());
        pd.insert(a, vec![0.5, 0.0]).unwrap();
        pd.insert(b, vec![0.5, 1.0]).unwrap();
        assert_eq!(pd.not_detected(), vec![0.25, 0.0]);
        assert_eq!(pd.not_detected_for(&[a, SearchId::new_v4()]), vec![0.5, 1.0]);
        assert!(matches!(pd.insert(a, vec![0.1]), Err(ModelError::LengthMismatch { expected: 2, got: 1, .. })));
        assert_eq!(pd.num_searches(), 2);
    }
}

#[cfg(test)]
mod output {
    use sar_core::{EpochMs, LpiId};
    use sar_grid::{ContainmentMap, GridSpec, ProbabilityDistribution};
    use sar_path::TimeAwarePathBuilder;
    use sar_series::DistributionSeries;

    use super::fixtures::rect;
    use crate::ModelOutput;

    fn one_hour(lpi: LpiId) -> DistributionSeries {
        let map = ContainmentMap::from_points(&[rect().center()], &[1.0], GridSpec::default()).unwrap();
        [ProbabilityDistribution::new(lpi, EpochMs(0), map)].into_iter().collect()
    }

    #[test]
    fn validate_reports_structural_problems() {
        let out = ModelOutput::new(LpiId::NIL, "", DistributionSeries::new(), vec![]);
        let info = out.validate();
        assert_eq!(
            info.errors(),
            &[
                "Missing model name".to_string(),
                "Missing lpiId".to_string(),
                "No initial distribution".to_string(),
                "No distribution with searches".to_string(),
            ]
        );
    }

    #[test]
    fn copy_and_replace_with_searches() {
        let lpi = LpiId::new_v4();
        let mut out = ModelOutput::new(lpi, "m", one_hour(lpi), vec![]);
        assert!(out.with_searches().is_empty());
        out.copy_initial_to_with_searches();
        assert!(out.validate().is_valid());

        let replaced = out.with_new_searches(DistributionSeries::new());
        assert!(replaced.with_searches().is_empty());
        assert_eq!(replaced.initial(), out.initial());
        assert!(!replaced.validate().is_valid());
    }

    #[test]
    fn serde_round_trip() {
        let lpi = LpiId::new_v4();
        let path = TimeAwarePathBuilder::starting_at(rect().center(), EpochMs(0)).build().unwrap();
        let mut out = ModelOutput::new(lpi, "m", one_hour(lpi), vec![path]);
        out.copy_initial_to_with_searches();
        let json = serde_json::to_string(&out).unwrap();
        let back: ModelOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }
}
