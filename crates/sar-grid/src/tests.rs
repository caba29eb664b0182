//! Unit tests for sar-grid.

#[cfg(test)]
mod fixtures {
    use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId, SampleRng};

    use crate::{ContainmentMap, GridSpec, ProbabilityDistribution};

    /// 0.1° × 0.1° at the equator.
    pub fn equator_rect() -> GeoRectangle {
        GeoRectangle::new(0.05, -0.05, 0.1, 0.0).unwrap()
    }

    /// Sizes `equator_rect` to 3 × 3.
    pub fn coarse_spec() -> GridSpec {
        GridSpec::new(100, 3.5)
    }

    pub fn random_distribution(rng: &mut SampleRng) -> ProbabilityDistribution {
        let rect = equator_rect();
        let spec = coarse_spec();
        let dims = spec.dims_for(&rect);
        let cells = (0..dims.num_lat)
            .map(|_| (0..dims.num_lon).map(|_| rng.gen_range(0.0..1.0)).collect())
            .collect();
        ProbabilityDistribution::new(LpiId::new_v4(), EpochMs(1_000), ContainmentMap::from_cells(rect, spec, cells))
    }

    pub fn random_point_in(rng: &mut SampleRng, rect: &GeoRectangle) -> GeoPoint {
        GeoPoint::new(
            rng.gen_range(rect.south()..=rect.north()),
            rng.gen_range(rect.west()..=rect.east()),
        )
    }
}

#[cfg(test)]
mod sizing {
    use sar_core::{GeoRectangle, KM_PER_DEG, SampleRng};

    use super::fixtures::{coarse_spec, equator_rect};
    use crate::{GridSpec, extents_km, grid_dims};

    #[test]
    fn default_spec() {
        let spec = GridSpec::default();
        assert_eq!(spec.max_cells, 2500);
        assert_eq!(spec.min_cell_side_km, 0.2);
    }

    #[test]
    fn small_rect_uses_min_cell_side() {
        let dims = grid_dims(&equator_rect(), &coarse_spec());
        assert_eq!((dims.num_lat, dims.num_lon), (3, 3));
    }

    #[test]
    fn large_rect_is_capped_at_max_cells() {
        let rect = GeoRectangle::new(0.5, -0.5, 1.0, 0.0).unwrap();
        let dims = grid_dims(&rect, &GridSpec::default());
        assert!(dims.cell_count() <= 2500, "{dims:?}");
        assert!(dims.cell_count() >= 2400, "{dims:?}");
        assert!(dims.num_lat.abs_diff(dims.num_lon) <= 1);
    }

    #[test]
    fn longitude_extent_shrinks_with_latitude() {
        let rect = GeoRectangle::new(60.05, 59.95, 0.1, 0.0).unwrap();
        let (lat_km, lon_km) = extents_km(&rect);
        assert!((lat_km - 0.1 * KM_PER_DEG).abs() < 1e-9);
        assert!((lon_km - lat_km / 2.0).abs() < 1e-3);
        let dims = grid_dims(&rect, &coarse_spec());
        assert_eq!((dims.num_lat, dims.num_lon), (3, 1));
    }

    #[test]
    fn degenerate_rect_is_one_by_one() {
        let rect = GeoRectangle::new(10.0, 10.0, 5.0, 5.0).unwrap();
        let dims = grid_dims(&rect, &GridSpec::default());
        assert_eq!((dims.num_lat, dims.num_lon), (1, 1));
    }

    #[test]
    fn cell_count_bounded_or_min_side() {
        let mut rng = SampleRng::new(7, 0);
        for _ in 0..500 {
            let mid_lat = rng.gen_range(-60.0..60.0);
            let lat_span = rng.gen_range(0.05..2.0);
            let lon_span = rng.gen_range(0.05..2.0);
            let rect = GeoRectangle::new(
                mid_lat + lat_span / 2.0,
                mid_lat - lat_span / 2.0,
                10.0 + lon_span,
                10.0,
            )
            .unwrap();
            let spec = GridSpec::new(rng.gen_range(400..5000), rng.gen_range(0.1..2.0));
            let dims = grid_dims(&rect, &spec);
            assert!(dims.num_lat >= 1 && dims.num_lon >= 1);

            let (lat_km, lon_km) = extents_km(&rect);
            let at_min_side = dims.num_lat == ((lat_km / spec.min_cell_side_km) as usize).max(1)
                && dims.num_lon == ((lon_km / spec.min_cell_side_km) as usize).max(1);
            assert!(
                dims.cell_count() <= spec.max_cells || at_min_side,
                "{rect} {spec:?} -> {dims:?}"
            );
        }
    }
}

#[cfg(test)]
mod containment {
    use approx::assert_abs_diff_eq;
    use sar_core::{GeoPoint, GeoRectangle, KM_PER_DEG, SampleRng};

    use super::fixtures::{coarse_spec, equator_rect, random_point_in};
    use crate::{ContainmentMap, GridError, GridSpec};

    #[test]
    fn corners_land_in_corner_cells() {
        let rect = equator_rect();
        let points = [rect.nw_corner(), rect.ne_corner(), rect.sw_corner()];
        let map = ContainmentMap::aggregate(rect, coarse_spec(), &points, &[1.0 / 3.0; 3]).unwrap();

        let nonzero: Vec<(usize, usize)> = (0..3)
            .flat_map(|i| (0..3).map(move |j| (i, j)))
            .filter(|&(i, j)| map.cell(i, j).unwrap() != 0.0)
            .collect();
        assert_eq!(nonzero, vec![(0, 0), (0, 2), (2, 0)]);
        for (i, j) in nonzero {
            assert_abs_diff_eq!(map.cell(i, j).unwrap(), 1.0 / 3.0);
        }
        let info = map.validate();
        assert!(info.is_valid(), "{info}");
        assert!(info.warnings().is_empty());
    }

    #[test]
    fn cell_bounds_recover_aggregated_points() {
        let rect = GeoRectangle::new(35.3, 35.0, -111.5, -112.0).unwrap();
        let spec = GridSpec::new(400, 0.5);
        let mut rng = SampleRng::new(11, 0);
        let points: Vec<GeoPoint> = (0..300).map(|_| random_point_in(&mut rng, &rect)).collect();
        let map = ContainmentMap::aggregate(rect, spec, &points, &vec![1.0; points.len()]).unwrap();

        for p in &points {
            let (i, j) = map.cell_index(*p).unwrap();
            assert!(map.cell(i, j).unwrap() > 0.0);
            let b = map.cell_bounds(i, j).unwrap();
            let eps = 1e-9;
            assert!(p.lat <= b.north() + eps && p.lat >= b.south() - eps, "{p} not in {b}");
            assert!(p.lon >= b.west() - eps && p.lon <= b.east() + eps, "{p} not in {b}");
        }
    }

    #[test]
    fn cell_bounds_tile_the_rectangle() {
        let map = ContainmentMap::zeros(equator_rect(), coarse_spec());
        let first = map.cell_bounds(0, 0).unwrap();
        let last = map.cell_bounds(2, 2).unwrap();
        assert_eq!(first.north(), 0.05);
        assert_eq!(first.west(), 0.0);
        assert_eq!(last.south(), -0.05);
        assert_eq!(last.east(), 0.1);
        assert_abs_diff_eq!(first.south(), map.cell_bounds(1, 0).unwrap().north());
        assert!(map.cell_bounds(3, 0).is_none());
        assert!(map.cell_bounds(0, 3).is_none());
    }

    #[test]
    fn outside_points_are_skipped() {
        let rect = equator_rect();
        let points = [rect.center(), GeoPoint::new(1.0, 1.0), GeoPoint::new(f64::NAN, 0.0)];
        let map = ContainmentMap::aggregate(rect, coarse_spec(), &points, &[0.5, 0.25, 0.25]).unwrap();
        assert_abs_diff_eq!(map.total(), 0.5);
        assert_abs_diff_eq!(map.cell(1, 1).unwrap(), 0.5);
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let rect = equator_rect();
        let err = ContainmentMap::aggregate(rect, coarse_spec(), &[rect.center()], &[]).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { points: 1, weights: 0 }));
    }

    #[test]
    fn from_points_pads_bounding_box() {
        let points = [GeoPoint::new(10.0, 20.0), GeoPoint::new(10.1, 20.2)];
        let map = ContainmentMap::from_points(&points, &[0.25, 0.75], GridSpec::default()).unwrap();
        assert_abs_diff_eq!(map.rect().north(), 10.12, epsilon = 1e-12);
        assert_abs_diff_eq!(map.rect().west(), 19.98, epsilon = 1e-12);
        assert_abs_diff_eq!(map.total(), 1.0);
        assert!(ContainmentMap::from_points(&[], &[], GridSpec::default()).is_err());
    }

    #[test]
    fn cell_extents() {
        let map = ContainmentMap::zeros(equator_rect(), coarse_spec());
        assert_abs_diff_eq!(map.ns_cell_extent_km(), 0.1 * KM_PER_DEG / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(map.ew_cell_extent_km(), 0.1 * KM_PER_DEG / 3.0, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod validation {
    use sar_core::{EpochMs, GeoRectangle, LpiId};

    use super::fixtures::{coarse_spec, equator_rect};
    use crate::{ContainmentMap, ProbabilityDistribution, ValidationInfo};

    fn dist(cells: Vec<Vec<f64>>) -> ProbabilityDistribution {
        ProbabilityDistribution::new(
            LpiId::new_v4(),
            EpochMs(0),
            ContainmentMap::from_cells(equator_rect(), coarse_spec(), cells),
        )
    }

    #[test]
    fn unit_mass_grid_is_clean() {
        let info = dist(vec![vec![0.125, 0.125, 0.0], vec![0.25, 0.0, 0.125], vec![0.0, 0.125, 0.25]]).validate();
        assert!(info.errors().is_empty(), "{info}");
        assert!(info.warnings().is_empty(), "{info}");
    }

    #[test]
    fn negative_cell_is_an_error() {
        let info = dist(vec![vec![0.5, -0.1, 0.0], vec![0.3, 0.0, 0.0], vec![0.0, 0.0, 0.3]]).validate();
        assert!(!info.is_valid());
        assert_eq!(info.errors().len(), 1);
    }

    #[test]
    fn zero_mass_is_a_warning_only() {
        let info = dist(vec![vec![0.0; 3]; 3]).validate();
        assert!(info.is_valid());
        assert_eq!(info.warnings().len(), 1);
    }

    #[test]
    fn degenerate_rect_short_circuits() {
        let rect = GeoRectangle::new(1.0, 1.0, 2.0, 1.0).unwrap();
        let map = ContainmentMap::from_cells(rect, coarse_spec(), vec![vec![-1.0, -2.0]]);
        let info = map.validate();
        assert_eq!(info.errors().len(), 1);
        assert!(info.errors()[0].contains("zero-area"));
    }

    #[test]
    fn wrong_row_count_short_circuits() {
        let info = dist(vec![vec![-1.0, 0.0, 0.0]; 2]).validate();
        assert_eq!(info.errors().len(), 1);
        assert!(info.errors()[0].contains("rows"));
    }

    #[test]
    fn wrong_column_count_short_circuits() {
        let info = dist(vec![vec![0.1, 0.1, 0.1], vec![0.1, 0.1], vec![-0.1, 0.1, 0.1]]).validate();
        assert_eq!(info.errors().len(), 1);
        assert!(info.errors()[0].contains("row 1"));
    }

    #[test]
    fn nan_cell_is_an_error() {
        let info = dist(vec![vec![f64::NAN, 0.0, 0.0], vec![0.0; 3], vec![0.0; 3]]).validate();
        assert!(!info.is_valid());
    }

    #[test]
    fn merge_keeps_both_lists() {
        let mut a = ValidationInfo::new();
        a.add_error("e1");
        let mut b = ValidationInfo::new();
        b.add_warning("w1");
        b.add_error("e2");
        a.merge(b);
        assert_eq!(a.errors(), ["e1".to_string(), "e2".to_string()]);
        assert_eq!(a.warnings(), ["w1".to_string()]);
        assert_eq!(a.to_string(), "ValidationInfo [errors=[\"e1\", \"e2\"], warnings=[\"w1\"]]");
    }
}

#[cfg(test)]
mod arithmetic {
    use approx::assert_abs_diff_eq;
    use sar_core::{EpochMs, GeoRectangle, LpiId, SampleRng};

    use super::fixtures::{coarse_spec, random_distribution};
    use crate::{GridError, ProbabilityDistribution};

    #[test]
    fn affine_combination_recovers_original() {
        let mut rng = SampleRng::new(42, 0);
        for _ in 0..50 {
            let d = random_distribution(&mut rng);
            let a: f64 = rng.gen_range(0.0..=1.0);
            let sum = d.scaled(a).added(&d.scaled(1.0 - a)).unwrap();
            for (row_s, row_d) in sum.cells().iter().zip(d.cells()) {
                for (s, v) in row_s.iter().zip(row_d) {
                    assert_abs_diff_eq!(*s, *v, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn scale_keeps_owner_time_and_rect() {
        let mut rng = SampleRng::new(1, 0);
        let d = random_distribution(&mut rng);
        let half = d.scaled(0.5);
        assert_eq!(half.lpi_id(), d.lpi_id());
        assert_eq!(half.time(), d.time());
        assert_eq!(half.rect(), d.rect());
        assert_abs_diff_eq!(half.map().total(), d.map().total() / 2.0, epsilon = 1e-12);
        // Original untouched.
        assert_ne!(half.cells(), d.cells());
    }

    #[test]
    fn add_rejects_different_rectangles() {
        let mut rng = SampleRng::new(2, 0);
        let d = random_distribution(&mut rng);
        let other_rect = GeoRectangle::new(0.05, -0.05, 0.1000001, 0.0).unwrap();
        let other = ProbabilityDistribution::zeros(LpiId::new_v4(), EpochMs(0), other_rect, coarse_spec());
        assert!(matches!(d.added(&other), Err(GridError::IncompatibleGeometry { .. })));
    }

    #[test]
    fn with_time_restamps() {
        let mut rng = SampleRng::new(3, 0);
        let d = random_distribution(&mut rng).with_time(EpochMs(99));
        assert_eq!(d.time(), EpochMs(99));
    }
}

#[cfg(test)]
mod levels {
    use sar_core::{GeoPoint, GeoRectangle};

    use super::fixtures::coarse_spec;
    use crate::{ContainmentLevel, ContainmentLevels, ContainmentMap, WeightedPoint};

    #[test]
    fn cutoffs_follow_cumulative_sum() {
        let levels = ContainmentLevels::from_values([1.0, 4.0, 2.0, 3.0]);
        assert_eq!(levels.fifty, 3.0);
        assert_eq!(levels.ninety, 1.0);
        assert_eq!(levels.ninety_nine, 1.0);
    }

    #[test]
    fn single_value_has_zero_cutoff() {
        let levels = ContainmentLevels::from_values([5.0]);
        assert_eq!(levels.cutoff(ContainmentLevel::Fifty), 0.0);
    }

    #[test]
    fn cells_at_level_lists_dense_cells() {
        let rect = GeoRectangle::new(1.0, 0.0, 1.0, 0.0).unwrap();
        let map = ContainmentMap::from_cells(rect, coarse_spec(), vec![vec![4.0, 3.0], vec![2.0, 1.0]]);
        assert_eq!(map.cells_at_level(ContainmentLevel::Fifty), vec![(0, 0), (0, 1)]);
        assert_eq!(map.cells_at_level(ContainmentLevel::Ninety).len(), 4);
    }

    #[test]
    fn filter_groups_points_by_level() {
        let points: Vec<WeightedPoint> = [4.0, 3.0, 2.0, 1.0]
            .iter()
            .enumerate()
            .map(|(i, w)| WeightedPoint::new(GeoPoint::new(i as f64, 0.0), *w))
            .collect();
        let levels = ContainmentLevels::from_values(points.iter().map(|p| p.weight));
        let groups = levels.filter(&points);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, ContainmentLevel::Fifty);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 4);
        assert_eq!(ContainmentLevel::NinetyNine.to_string(), "99%");
    }
}

#[cfg(test)]
mod sample_points {
    use approx::assert_abs_diff_eq;
    use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId};

    use super::fixtures::{coarse_spec, equator_rect};
    use crate::{DistOrMap, DistributionBySamplePoints, GridError, WeightedPoint};

    fn cloud() -> DistributionBySamplePoints {
        DistributionBySamplePoints::new(
            vec![GeoPoint::new(0.04, 0.01), GeoPoint::new(-0.04, 0.09), GeoPoint::new(3.0, 3.0)],
            vec![2.0, 1.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = DistributionBySamplePoints::new(vec![GeoPoint::new(0.0, 0.0)], vec![]).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { .. }));
    }

    #[test]
    fn region_keeps_contained_points() {
        let region = cloud().region(&equator_rect());
        assert_eq!(region.len(), 2);
        assert_eq!(region[1], WeightedPoint::new(GeoPoint::new(-0.04, 0.09), 1.0));
    }

    #[test]
    fn binning_sums_weights_in_rect() {
        let map = cloud().to_containment_map(equator_rect(), coarse_spec());
        assert_abs_diff_eq!(map.total(), 3.0);
        assert_abs_diff_eq!(map.cell(0, 0).unwrap(), 2.0);
        assert_abs_diff_eq!(map.cell(2, 2).unwrap(), 1.0);
    }

    #[test]
    fn from_weighted_round_trips_iter() {
        let c = cloud();
        let again = DistributionBySamplePoints::from_weighted(c.iter());
        assert_eq!(again, c);
        assert_abs_diff_eq!(again.total_weight(), 8.0);
    }

    #[test]
    fn dist_or_map_variants() {
        let lpi = LpiId::new_v4();
        let points: DistOrMap = cloud().into();
        assert!(points.as_grid().is_none());
        assert_abs_diff_eq!(points.total_mass(), 8.0);

        let grid = points.into_distribution(lpi, EpochMs(5), equator_rect(), coarse_spec());
        assert_eq!(grid.lpi_id(), lpi);
        assert_abs_diff_eq!(grid.map().total(), 3.0);

        let wrapped = DistOrMap::from(grid.clone());
        assert_eq!(wrapped.as_grid(), Some(&grid));
        assert!(wrapped.as_sample_points().is_none());
        let rect = GeoRectangle::new(9.0, 8.0, 9.0, 8.0).unwrap();
        assert_eq!(wrapped.into_distribution(lpi, EpochMs(0), rect, coarse_spec()), grid);
    }
}

#[cfg(test)]
mod serde_round_trip {
    use sar_core::SampleRng;

    use super::fixtures::random_distribution;
    use crate::{ProbabilityDistribution, ValidationInfo};

    #[test]
    fn distribution_survives_json() {
        let mut rng = SampleRng::new(5, 0);
        let d = random_distribution(&mut rng);
        let json = serde_json::to_string(&d).unwrap();
        let back: ProbabilityDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.rect(), d.rect());
        assert_eq!(back.time(), d.time());
        assert_eq!(back.lpi_id(), d.lpi_id());
    }

    #[test]
    fn validation_info_survives_json() {
        let mut info = ValidationInfo::new();
        info.add_error("bad");
        info.add_warning("iffy");
        let back: ValidationInfo = serde_json::from_str(&serde_json::to_string(&info).unwrap()).unwrap();
        assert_eq!(back, info);
    }
}
