//! Unit tests for sar-schedule.

#[cfg(test)]
mod schedule {
    use std::sync::Arc;

    use chrono::{FixedOffset, Utc};
    use sar_core::{EpochMs, MS_PER_DAY, MS_PER_HOUR};

    use crate::{MovementSchedule, MovementStatus, Schedule24h, ScheduleError, StandardSchedule};

    const H: i64 = MS_PER_HOUR;

    fn night_utc() -> Schedule24h {
        StandardSchedule::Night.create(Arc::new(Utc)).unwrap()
    }

    #[test]
    fn night_moves_twelve_hours_a_day() {
        let s = night_utc();
        assert_eq!(s.moving_per_day(), 12 * H);
        assert_eq!(s.time_spent_moving(EpochMs(0), EpochMs(24 * H)).unwrap(), 12 * H);
        assert_eq!(s.time_spent_moving(EpochMs(0), EpochMs(48 * H)).unwrap(), 24 * H);
    }

    #[test]
    fn night_is_moving_by_hour() {
        let s = night_utc();
        assert!(!s.is_moving(EpochMs(0)));
        assert!(s.is_moving(EpochMs(4 * H)));
        assert!(!s.is_moving(EpochMs(12 * H)));
        assert!(s.is_moving(EpochMs(20 * H)));
        assert!(!s.is_moving(EpochMs(23 * H + 30 * 60_000)));
    }

    #[test]
    fn partial_days_sum_overlaps() {
        let s = night_utc();
        // 06:00 to 18:00 covers 06-07 and 17-18.
        assert_eq!(s.time_spent_moving(EpochMs(6 * H), EpochMs(18 * H)).unwrap(), 2 * H);
        // Query crossing midnight: 22:00 to 02:00 next day.
        assert_eq!(s.time_spent_moving(EpochMs(22 * H), EpochMs(26 * H)).unwrap(), 2 * H);
        // Three days and a bit.
        let start = EpochMs(10 * MS_PER_DAY + 6 * H);
        assert_eq!(
            s.time_spent_moving(start, start + 3 * MS_PER_DAY + 12 * H).unwrap(),
            36 * H + 2 * H
        );
    }

    #[test]
    fn empty_interval_is_zero() {
        let s = night_utc();
        assert_eq!(s.time_spent_moving(EpochMs(5 * H), EpochMs(5 * H)).unwrap(), 0);
    }

    #[test]
    fn reversed_interval_is_an_error() {
        let s = night_utc();
        let err = s.time_spent_moving(EpochMs(10), EpochMs(5)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval { start: EpochMs(10), end: EpochMs(5) }));
        assert!(s.moving_intervals(EpochMs(10), EpochMs(5)).is_err());
    }

    #[test]
    fn continuous_always_moves() {
        let s = StandardSchedule::Continuous.create(Arc::new(Utc)).unwrap();
        assert_eq!(s.moving_per_day(), MS_PER_DAY);
        let start = EpochMs(1_700_000_000_000);
        assert_eq!(s.time_spent_moving(start, start + 7 * H).unwrap(), 7 * H);
        assert!(s.is_moving(start));
    }

    #[test]
    fn day_schedule_hours() {
        let s = StandardSchedule::Day.create(Arc::new(Utc)).unwrap();
        assert_eq!(s.moving_per_day(), 12 * H);
        assert!(s.is_moving(EpochMs(6 * H)));
        assert!(!s.is_moving(EpochMs(12 * H)));
        assert!(s.is_moving(EpochMs(18 * H)));
        assert!(!s.is_moving(EpochMs(2 * H)));
    }

    #[test]
    fn moving_intervals_are_sorted_and_clipped() {
        let s = night_utc();
        let got = s.moving_intervals(EpochMs(3 * H), EpochMs(30 * H)).unwrap();
        assert_eq!(
            got,
            vec![
                (EpochMs(3 * H), EpochMs(7 * H)),
                (EpochMs(17 * H), EpochMs(23 * H)),
                (EpochMs(25 * H), EpochMs(30 * H)),
            ]
        );
        let total: i64 = got.iter().map(|(a, b)| *b - *a).sum();
        assert_eq!(total, s.time_spent_moving(EpochMs(3 * H), EpochMs(30 * H)).unwrap());
    }

    #[test]
    fn moving_intervals_span_many_days() {
        let s = night_utc();
        let got = s.moving_intervals(EpochMs(0), EpochMs(3 * MS_PER_DAY)).unwrap();
        assert_eq!(got.len(), 6);
        assert!(got.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn fixed_offset_shifts_local_day() {
        let plus5 = FixedOffset::east_opt(5 * 3600).unwrap();
        let s = StandardSchedule::Night.create(Arc::new(plus5)).unwrap();
        assert_eq!(s.name(), "Night-UTC+05:00");
        // 21:00 UTC is 02:00 local.
        assert!(s.is_moving(EpochMs(21 * H)));
        // 03:00 UTC is 08:00 local.
        assert!(!s.is_moving(EpochMs(3 * H)));
    }

    #[test]
    fn rest_intervals_build_expected_day() {
        let s = Schedule24h::from_rest_intervals(
            "siesta",
            &[(0.0, 6.0), (13.0, 15.0), (22.0, 24.0)],
            Arc::new(Utc),
        )
        .unwrap();
        assert_eq!(s.moving_per_day(), 14 * H);
        assert!(!s.is_moving(EpochMs(2 * H)));
        assert!(s.is_moving(EpochMs(8 * H)));
        assert!(!s.is_moving(EpochMs(14 * H)));
        assert!(s.is_moving(EpochMs(16 * H)));
        assert!(!s.is_moving(EpochMs(23 * H)));
    }

    #[test]
    fn rest_intervals_not_at_midnight_start_moving() {
        let s = Schedule24h::from_rest_intervals("nap", &[(12.0, 14.0)], Arc::new(Utc)).unwrap();
        assert_eq!(s.moving_per_day(), 22 * H);
        assert!(s.is_moving(EpochMs(0)));
    }

    #[test]
    fn change_times_are_validated() {
        let utc = Arc::new(Utc);
        assert!(Schedule24h::new("bad", &[5, 2], MovementStatus::Moving, utc.clone()).is_err());
        assert!(Schedule24h::new("bad", &[-1], MovementStatus::Moving, utc.clone()).is_err());
        assert!(Schedule24h::new("bad", &[MS_PER_DAY + 1], MovementStatus::Moving, utc).is_err());
    }

    #[test]
    fn no_changes_holds_initial_status() {
        let utc = Arc::new(Utc);
        let still = Schedule24h::new("still", &[], MovementStatus::Resting, utc.clone()).unwrap();
        assert_eq!(still.moving_per_day(), 0);
        let always = Schedule24h::new("always", &[], MovementStatus::Moving, utc).unwrap();
        assert_eq!(always.moving_per_day(), MS_PER_DAY);
    }

    #[test]
    fn description_mentions_name_and_hours() {
        let d = night_utc().description();
        assert!(d.starts_with("Night-UTC"));
        assert!(d.contains("[1.00h, 7.00h]"));
        assert!(d.contains("daylight saving"));
    }
}

#[cfg(test)]
mod dst {
    use std::sync::Arc;

    use chrono::Utc;
    use sar_core::{EpochMs, MS_PER_HOUR};

    use crate::{MovementSchedule, StandardSchedule, ZoneRules};

    const H: i64 = MS_PER_HOUR;

    /// Offset jumps from 0 to +1 h at noon on day zero.
    #[derive(Debug)]
    struct SpringForward;

    impl ZoneRules for SpringForward {
        fn id(&self) -> String {
            "SpringForward".into()
        }

        fn offset_ms_at(&self, t: EpochMs) -> i64 {
            if t.0 < 12 * H { 0 } else { H }
        }
    }

    #[test]
    fn offset_is_taken_at_query_start() {
        let dst = StandardSchedule::Night.create(Arc::new(SpringForward)).unwrap();
        let utc = StandardSchedule::Night.create(Arc::new(Utc)).unwrap();

        // Starts before the transition: the pre-transition offset holds for
        // the whole query, so the result matches UTC.
        let before = dst.time_spent_moving(EpochMs(11 * H), EpochMs(18 * H)).unwrap();
        assert_eq!(before, utc.time_spent_moving(EpochMs(11 * H), EpochMs(18 * H)).unwrap());
        assert_eq!(before, H);

        // Starts after: local 14:00 to 19:00 overlaps 17:00-19:00.
        let after = dst.time_spent_moving(EpochMs(13 * H), EpochMs(18 * H)).unwrap();
        assert_eq!(after, 2 * H);
    }

    #[test]
    fn standard_name_uses_zone_id() {
        let dst = StandardSchedule::Day.create(Arc::new(SpringForward)).unwrap();
        assert_eq!(dst.name(), "Day-SpringForward");
        assert_eq!(dst.zone_id(), "SpringForward");
    }
}

#[cfg(test)]
mod zone {
    use sar_core::{EpochMs, MS_PER_HOUR};

    use crate::parse_zone;

    #[test]
    fn parses_utc_aliases() {
        for id in ["UTC", "GMT", "Z", " UTC "] {
            let z = parse_zone(id).unwrap();
            assert_eq!(z.id(), "UTC");
            assert_eq!(z.offset_ms_at(EpochMs(0)), 0);
        }
    }

    #[test]
    fn parses_fixed_offsets() {
        let cases = [
            ("UTC+05:00", 5 * MS_PER_HOUR),
            ("+05:00", 5 * MS_PER_HOUR),
            ("UTC-0330", -(3 * MS_PER_HOUR + 30 * 60_000)),
            ("GMT+5", 5 * MS_PER_HOUR),
            ("UTC-10", -10 * MS_PER_HOUR),
        ];
        for (id, offset) in cases {
            let z = parse_zone(id).unwrap_or_else(|| panic!("failed to parse {id}"));
            assert_eq!(z.offset_ms_at(EpochMs(0)), offset, "{id}");
        }
    }

    #[test]
    fn id_round_trips() {
        let z = parse_zone("UTC-05:00").unwrap();
        let again = parse_zone(&z.id()).unwrap();
        assert_eq!(z.id(), again.id());
    }

    #[test]
    fn rejects_garbage() {
        for id in ["", "Mars", "UTC+", "+25:00", "+05:75", "America/Denver", "UTC+1é2", "-é12"] {
            assert!(parse_zone(id).is_none(), "{id}");
        }
    }

    #[test]
    fn local_is_recognized() {
        assert_eq!(parse_zone("Local").unwrap().id(), "Local");
    }
}

#[cfg(test)]
mod registry {
    use std::sync::Arc;

    use chrono::{FixedOffset, Utc};
    use sar_core::{EpochMs, MS_PER_HOUR};

    use crate::{MovementSchedule, Schedule24h, ScheduleError, ScheduleRegistry, StandardSchedule};

    #[test]
    fn get_or_create_populates_all_standard_kinds() {
        let reg = ScheduleRegistry::new();
        assert!(reg.is_empty());
        let night = reg.get_or_create(StandardSchedule::Night, Arc::new(Utc)).unwrap();
        assert_eq!(night.name(), "Night-UTC");
        assert_eq!(reg.len(), 3);
        assert!(reg.get("Day-UTC").is_some());
        assert!(reg.get("Continuous-UTC").is_some());
    }

    #[test]
    fn get_or_create_returns_same_instance() {
        let reg = ScheduleRegistry::new();
        let a = reg.get_or_create(StandardSchedule::Day, Arc::new(Utc)).unwrap();
        let b = reg.get_or_create(StandardSchedule::Day, Arc::new(Utc)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn concurrent_get_or_create_shares_one_schedule() {
        let reg = ScheduleRegistry::new();
        let found: Vec<Arc<dyn MovementSchedule>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| reg.get_or_create(StandardSchedule::Night, Arc::new(Utc)).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(found.iter().all(|s| Arc::ptr_eq(s, &found[0])));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn zones_get_separate_schedules() {
        let reg = ScheduleRegistry::with_standard(Arc::new(Utc)).unwrap();
        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        reg.get_or_create(StandardSchedule::Night, Arc::new(plus2)).unwrap();
        assert_eq!(reg.len(), 6);
        assert!(reg.names().contains(&"Night-UTC+02:00".to_string()));
    }

    #[test]
    fn recreate_parses_kind_and_zone() {
        let reg = ScheduleRegistry::new();
        let s = reg.get_or_recreate("Night-UTC-05:00").unwrap();
        assert_eq!(s.name(), "Night-UTC-05:00");
        // 06:00 UTC is 01:00 local.
        assert!(s.is_moving(EpochMs(6 * MS_PER_HOUR + 1)));
    }

    #[test]
    fn recreate_falls_back_to_continuous_and_utc() {
        let reg = ScheduleRegistry::new();
        assert_eq!(reg.get_or_recreate("Wander-UTC").unwrap().name(), "Continuous-UTC");
        assert_eq!(reg.get_or_recreate("Night-Mars").unwrap().name(), "Night-UTC");
        assert_eq!(reg.get_or_recreate("Day").unwrap().name(), "Day-UTC");
    }

    #[test]
    fn recreate_with_non_ascii_offset_falls_back_to_utc() {
        let reg = ScheduleRegistry::new();
        assert_eq!(reg.get_or_recreate("Night-UTC+1é2").unwrap().name(), "Night-UTC");
    }

    #[test]
    fn register_rejects_duplicates() {
        let reg = ScheduleRegistry::with_standard(Arc::new(Utc)).unwrap();
        let custom = Schedule24h::from_rest_intervals("custom", &[(0.0, 8.0)], Arc::new(Utc)).unwrap();
        reg.register(Arc::new(custom.clone())).unwrap();
        assert!(matches!(
            reg.register(Arc::new(custom)),
            Err(ScheduleError::DuplicateName(name)) if name == "custom"
        ));
        let clash = StandardSchedule::Night.create(Arc::new(Utc)).unwrap();
        assert!(reg.register(Arc::new(clash)).is_err());
    }

    #[test]
    fn recreate_finds_registered_custom_schedule() {
        let reg = ScheduleRegistry::new();
        let custom = Schedule24h::from_rest_intervals("sleepy-bear", &[(0.0, 20.0)], Arc::new(Utc)).unwrap();
        reg.register(Arc::new(custom)).unwrap();
        let s = reg.get_or_recreate("sleepy-bear").unwrap();
        assert_eq!(s.name(), "sleepy-bear");
        assert_eq!(reg.len(), 1);
    }
}

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};
    use std::sync::Arc;

    use chrono::Utc;
    use sar_core::{EpochMs, MS_PER_HOUR};

    use crate::{MovementSchedule, ScheduleError, load_schedules_csv, load_schedules_reader};

    const CSV: &str = "\
name,rest_start_hour,rest_end_hour
siesta,0,6
late-riser,0,10
siesta,13,15
siesta,22,24
";

    #[test]
    fn groups_rows_by_name_in_first_seen_order() {
        let got = load_schedules_reader(Cursor::new(CSV), Arc::new(Utc)).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name(), "siesta");
        assert_eq!(got[0].moving_per_day(), 14 * MS_PER_HOUR);
        assert_eq!(got[1].name(), "late-riser");
        assert_eq!(got[1].moving_per_day(), 14 * MS_PER_HOUR);
        assert!(!got[1].is_moving(EpochMs(9 * MS_PER_HOUR)));
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let csv = "name,rest_start_hour,rest_end_hour\nbad,20,25\n";
        assert!(matches!(
            load_schedules_reader(Cursor::new(csv), Arc::new(Utc)),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn rejects_reversed_interval() {
        let csv = "name,rest_start_hour,rest_end_hour\nbad,8,4\n";
        assert!(load_schedules_reader(Cursor::new(csv), Arc::new(Utc)).is_err());
    }

    #[test]
    fn rejects_non_numeric_hours() {
        let csv = "name,rest_start_hour,rest_end_hour\nbad,noon,4\n";
        assert!(matches!(
            load_schedules_reader(Cursor::new(csv), Arc::new(Utc)),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let got = load_schedules_csv(file.path(), Arc::new(Utc)).unwrap();
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_schedules_csv(std::path::Path::new("/no/such/schedules.csv"), Arc::new(Utc)).unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }
}
