//! Unit tests for the courier demo.

#[cfg(test)]
mod courier {
    use std::io::Cursor;
    use std::time::Duration;

    use dl_core::{JobConfig, SimRng, load_zones_reader};
    use dl_sim::SessionBuilder;

    use crate::courier::Courier;

    const ZONES: &str = "\
zone_id,kind,display_name\n\
1,pickup,Bakery\n\
2,pickup,Pharmacy\n\
10,dropoff,Harbour\n\
11,dropoff,School\n\
";

    #[test]
    fn decided_offers_are_forgotten_once_gone() {
        let config = JobConfig {
            min_spawn_interval_secs: 2.0,
            max_spawn_interval_secs: 4.0,
            accept_duration_secs:    6.0,
            seed:                    7,
            ..JobConfig::default()
        };
        let catalog = load_zones_reader(Cursor::new(ZONES)).unwrap();
        let mut session = SessionBuilder::new(config, catalog).build().unwrap();
        let mut courier = Courier::new(SimRng::new(7).child(1));
        let step = Duration::from_millis(500);

        session.start();
        for _ in 0..2_000 {
            session.advance(step);
            courier.step(&mut session, step);
            assert!(courier.tracked_offers() <= session.available_offers().len());
        }
        let tally = courier.tally();
        assert!(tally.accepted + tally.denied + tally.ignored > session.available_offers().len());
    }
}
