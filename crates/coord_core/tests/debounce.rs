use std::time::Duration;

use coord_core::Debounced;

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn only_latest_generation_applies() {
    let mut debounced = Debounced::new(String::new());
    let first = debounced.push("a".to_string(), DELAY).unwrap();
    let second = debounced.push("ab".to_string(), DELAY).unwrap();

    assert_eq!(debounced.elapse(first.generation), None);
    assert_eq!(debounced.value(), "");
    assert_eq!(debounced.elapse(second.generation), Some("ab".to_string()));
    assert_eq!(debounced.value(), "ab");
    assert!(!debounced.is_pending());
}

#[test]
fn returning_to_the_same_value_reports_no_change() {
    let mut debounced = Debounced::new("x".to_string());
    debounced.push("xy".to_string(), DELAY);
    let timer = debounced.push("x".to_string(), DELAY).unwrap();

    assert_eq!(debounced.elapse(timer.generation), None);
    assert!(!debounced.is_pending());
    assert_eq!(debounced.value(), "x");
}

#[test]
fn changing_delay_still_yields_one_live_timer() {
    let mut debounced = Debounced::new(0u32);
    let short = debounced.push(1, Duration::from_millis(10)).unwrap();
    let long = debounced.push(2, Duration::from_millis(500)).unwrap();

    assert_eq!(long.delay, Duration::from_millis(500));
    assert_eq!(debounced.elapse(short.generation), None);
    assert_eq!(debounced.elapse(long.generation), Some(2));
}

#[test]
fn timer_cannot_fire_twice() {
    let mut debounced = Debounced::new(0u32);
    let timer = debounced.push(5, DELAY).unwrap();
    assert_eq!(debounced.elapse(timer.generation), Some(5));
    assert_eq!(debounced.elapse(timer.generation), None);
}

#[test]
fn teardown_blocks_late_timers() {
    let mut debounced = Debounced::new(String::new());
    let timer = debounced.push("late".to_string(), DELAY).unwrap();

    assert!(debounced.teardown());
    assert!(debounced.is_torn_down());
    assert_eq!(debounced.elapse(timer.generation), None);
    assert_eq!(debounced.push("again".to_string(), DELAY), None);
    assert_eq!(debounced.value(), "");
}

#[test]
fn reset_drops_pending_timer() {
    let mut debounced = Debounced::new("a".to_string());
    let timer = debounced.push("b".to_string(), DELAY).unwrap();
    debounced.reset("c".to_string());

    assert_eq!(debounced.elapse(timer.generation), None);
    assert_eq!(debounced.value(), "c");
}
