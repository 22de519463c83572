use bright_aware::engine::{format_hms, CountdownTimer, Recommendation, TimerStatus};
use proptest::prelude::*;

fn expected_interval(uv: f64) -> u64 {
    match uv {
        x if x == 0.0 => 0,
        x if x < 3.0 => 7200,
        x if x < 6.0 => 5400,
        x if x < 8.0 => 3600,
        x if x < 11.0 => 2700,
        _ => 1800,
    }
}

proptest! {
    #[test]
    fn interval_is_a_non_increasing_step_function(a in 0.0f64..20.0, b in 0.0f64..20.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_rec = Recommendation::compute(low, false).unwrap();
        let high_rec = Recommendation::compute(high, false).unwrap();

        prop_assert_eq!(low_rec.interval_seconds, expected_interval(low));
        prop_assert_eq!(high_rec.interval_seconds, expected_interval(high));
        if low > 0.0 {
            prop_assert!(high_rec.interval_seconds <= low_rec.interval_seconds);
        }
        prop_assert!(low_rec.severity <= high_rec.severity);
    }

    #[test]
    fn sunset_never_requires_protection(uv in 0.0f64..50.0) {
        let rec = Recommendation::compute(uv, true).unwrap();
        prop_assert_eq!(rec.interval_seconds, 0);
        prop_assert!(!rec.requires_protection);
    }

    #[test]
    fn compute_is_idempotent(uv in 0.0f64..50.0, sunset in any::<bool>()) {
        prop_assert_eq!(
            Recommendation::compute(uv, sunset).unwrap(),
            Recommendation::compute(uv, sunset).unwrap()
        );
    }

    #[test]
    fn format_round_trips_through_fields(seconds in 0u64..1_000_000) {
        let text = format_hms(seconds);
        let parts: Vec<u64> = text.split(':').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], seconds);
        prop_assert!(text.split(':').all(|p| p.len() >= 2));
    }

    #[test]
    fn pause_resume_loses_no_time(total in 2u64..500, before_pause in 1u64..500) {
        let before_pause = before_pause.min(total - 1);
        let mut timer = CountdownTimer::new();
        timer.set_duration(total).unwrap();
        timer.start().unwrap();
        for _ in 0..before_pause {
            timer.tick().unwrap();
        }

        let paused = timer.pause().unwrap();
        prop_assert!(timer.tick().is_err());
        let resumed = timer.start().unwrap();
        prop_assert_eq!(paused.remaining_seconds, resumed.remaining_seconds);
        prop_assert_eq!(resumed.remaining_seconds, total - before_pause);
        prop_assert_eq!(resumed.status, TimerStatus::Running);
    }
}
