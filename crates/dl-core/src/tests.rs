//! Unit tests for dl-core primitives.

use std::time::Duration;

use crate::{DeliveryJob, JobId, JobState, ZoneRef};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn job(limit: u64) -> DeliveryJob {
    DeliveryJob::new(
        JobId::new_v4(),
        ZoneRef::pickup(0, "Warehouse"),
        ZoneRef::dropoff(10, "Old Town"),
        secs(limit),
    )
}

#[cfg(test)]
mod ids {
    use crate::{JobId, ZoneId};

    #[test]
    fn zone_id_display_and_order() {
        assert_eq!(ZoneId(7).to_string(), "ZoneId(7)");
        assert!(ZoneId(1) < ZoneId(2));
    }

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(JobId::new_v4(), JobId::new_v4());
    }

    #[test]
    fn job_id_from_bytes_is_reproducible_v4() {
        let a = JobId::from_random_bytes([7; 16]);
        let b = JobId::from_random_bytes([7; 16]);
        assert_eq!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }
}

#[cfg(test)]
mod job_state_machine {
    use super::*;

    #[test]
    fn starts_pending_pickup_with_full_countdown() {
        let j = job(30);
        assert_eq!(j.state(), JobState::PendingPickup);
        assert_eq!(j.time_remaining(), secs(30));
        assert_eq!(j.time_limit(), secs(30));
        assert_ne!(j.pickup_zone().id, j.dropoff_zone().id);
    }

    #[test]
    fn happy_path() {
        let mut j = job(30);
        assert!(j.pickup());
        assert_eq!(j.state(), JobState::PendingDropoff);
        assert!(j.deliver());
        assert_eq!(j.state(), JobState::Completed);
    }

    #[test]
    fn pickup_twice_is_a_noop() {
        let mut j = job(30);
        assert!(j.pickup());
        assert!(!j.pickup());
        assert_eq!(j.state(), JobState::PendingDropoff);
    }

    #[test]
    fn deliver_before_pickup_is_a_noop() {
        let mut j = job(30);
        assert!(!j.deliver());
        assert_eq!(j.state(), JobState::PendingPickup);
    }

    #[test]
    fn no_transition_out_of_completed() {
        let mut j = job(30);
        j.pickup();
        j.deliver();
        assert!(!j.pickup());
        assert!(!j.deliver());
        assert!(!j.advance_timer(secs(100)));
        assert_eq!(j.state(), JobState::Completed);
    }

    #[test]
    fn countdown_expires_at_zero() {
        let mut j = job(10);
        for _ in 0..9 {
            assert!(!j.advance_timer(secs(1)));
        }
        assert_eq!(j.time_remaining(), secs(1));
        assert!(j.advance_timer(secs(1)));
        assert_eq!(j.state(), JobState::Expired);
        assert_eq!(j.time_remaining(), Duration::ZERO);
    }

    #[test]
    fn countdown_expires_in_pending_dropoff() {
        let mut j = job(5);
        j.pickup();
        assert!(j.advance_timer(secs(6)));
        assert_eq!(j.state(), JobState::Expired);
    }

    #[test]
    fn remaining_is_frozen_once_terminal() {
        let mut j = job(30);
        j.advance_timer(secs(4));
        j.pickup();
        j.deliver();
        let frozen = j.time_remaining();
        j.advance_timer(secs(10));
        assert_eq!(j.time_remaining(), frozen);
        assert_eq!(frozen, secs(26));
    }

    #[test]
    fn remaining_never_increases() {
        let mut j = job(20);
        let mut last = j.time_remaining();
        for step in [0, 1, 3, 0, 2, 7, 11] {
            j.advance_timer(Duration::from_millis(step * 500));
            assert!(j.time_remaining() <= last);
            last = j.time_remaining();
        }
    }

    #[test]
    fn zero_dt_is_a_noop() {
        let mut j = job(1);
        assert!(!j.advance_timer(Duration::ZERO));
        assert_eq!(j.state(), JobState::PendingPickup);
    }

    #[test]
    fn relevant_zone_follows_state() {
        let mut j = job(30);
        assert_eq!(j.relevant_zone().map(|z| z.id.0), Some(0));
        j.pickup();
        assert_eq!(j.relevant_zone().map(|z| z.id.0), Some(10));
        j.deliver();
        assert!(j.relevant_zone().is_none());
    }

    #[test]
    fn labels() {
        let mut j = job(30);
        assert_eq!(j.route_label(), "Warehouse → Old Town");
        j.advance_timer(Duration::from_millis(2_500));
        assert_eq!(j.seconds_left(), 28);
        j.advance_timer(Duration::from_millis(500));
        assert_eq!(j.seconds_left(), 27);
    }
}

#[cfg(test)]
mod zones {
    use crate::{CoreError, ZoneCatalog, ZoneId, ZoneKind, ZonePair, ZoneRef};

    #[test]
    fn catalog_keeps_order_and_looks_up() {
        let cat = ZoneCatalog::new(
            vec![ZoneRef::pickup(1, "A"), ZoneRef::pickup(2, "B")],
            vec![ZoneRef::dropoff(3, "C")],
        )
        .unwrap();
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.pickups()[1].display_name, "B");
        assert_eq!(cat.get(ZoneId(3)).map(|z| z.kind), Some(ZoneKind::Dropoff));
        assert!(cat.get(ZoneId(9)).is_none());
    }

    #[test]
    fn duplicate_id_across_lists_rejected() {
        let err = ZoneCatalog::new(
            vec![ZoneRef::pickup(1, "A")],
            vec![ZoneRef::dropoff(1, "A again")],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateZone(ZoneId(1))));
    }

    #[test]
    fn wrong_kind_rejected() {
        let err = ZoneCatalog::new(vec![ZoneRef::dropoff(1, "A")], vec![]).unwrap_err();
        assert!(matches!(err, CoreError::ZoneKindMismatch { expected: ZoneKind::Pickup, .. }));
    }

    #[test]
    fn degenerate_pair() {
        assert!(ZonePair::new(ZoneId(4), ZoneId(4)).is_degenerate());
        assert!(!ZonePair::new(ZoneId(4), ZoneId(5)).is_degenerate());
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_zones_reader, ZoneId};

    #[test]
    fn loads_both_kinds() {
        let csv = "zone_id,kind,display_name\n0,pickup,Warehouse\n10,Dropoff,Old Town\n11,deliver, Station\n";
        let cat = load_zones_reader(Cursor::new(csv)).unwrap();
        assert_eq!(cat.pickups().len(), 1);
        assert_eq!(cat.dropoffs().len(), 2);
        assert_eq!(cat.get(ZoneId(11)).unwrap().display_name, "Station");
    }

    #[test]
    fn bad_kind_is_parse_error() {
        let csv = "zone_id,kind,display_name\n0,depot,Warehouse\n";
        assert!(load_zones_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn missing_column_is_parse_error() {
        let csv = "zone_id,kind\n0,pickup\n";
        assert!(load_zones_reader(Cursor::new(csv)).is_err());
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{CountdownStart, DurationRange, JobConfig, SimRng};

    #[test]
    fn defaults_are_valid() {
        let timing = JobConfig::default().timing().unwrap();
        assert_eq!(timing.accept_duration, Duration::from_secs(20));
        assert_eq!(timing.spawn_interval.min(), Duration::from_secs(10));
        assert_eq!(timing.delivery_time.max(), Duration::from_secs(200));
        assert_eq!(timing.countdown_start, CountdownStart::OnAcceptance);
    }

    #[test]
    fn min_above_max_rejected() {
        let cfg = JobConfig { min_delivery_time_secs: 90.0, max_delivery_time_secs: 60.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = JobConfig { min_spawn_interval_secs: 31.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = JobConfig { accept_duration_secs: bad, ..Default::default() };
            assert!(cfg.validate().is_err(), "accepted {bad}");
        }
        let cfg = JobConfig { min_spawn_interval_secs: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn equal_bounds_allowed() {
        let cfg = JobConfig { min_delivery_time_secs: 45.0, max_delivery_time_secs: 45.0, ..Default::default() };
        let timing = cfg.timing().unwrap();
        let mut rng = SimRng::new(1);
        assert_eq!(timing.delivery_time.sample(&mut rng), Duration::from_secs(45));
    }

    #[test]
    fn samples_stay_in_range() {
        let range = DurationRange::new(Duration::from_secs(10), Duration::from_secs(30)).unwrap();
        let mut rng = SimRng::new(42);
        for _ in 0..500 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let range = DurationRange::new(Duration::from_secs(1), Duration::from_secs(100)).unwrap();
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..20 {
            assert_eq!(range.sample(&mut a), range.sample(&mut b));
        }
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{SimClock, SimTime};

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        clock.advance(Duration::from_millis(500));
        clock.advance(Duration::from_millis(1_500));
        assert_eq!(clock.now(), SimTime::from_secs(2));
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn time_arithmetic() {
        let t = SimTime::from_secs(10);
        assert_eq!(t + Duration::from_secs(5), SimTime::from_secs(15));
        assert_eq!(SimTime::from_secs(15) - t, Duration::from_secs(5));
        assert_eq!(t - SimTime::from_secs(15), Duration::ZERO);
        assert_eq!(t.to_string(), "t=10.000s");
    }
}
