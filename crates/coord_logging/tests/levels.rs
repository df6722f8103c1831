use coord_logging::test_level;
use log::LevelFilter;

#[test]
fn env_value_selects_level() {
    assert_eq!(test_level(Some("trace")), LevelFilter::Trace);
    assert_eq!(test_level(Some(" WARN ")), LevelFilter::Warn);
    assert_eq!(test_level(Some("off")), LevelFilter::Off);
}

#[test]
fn unknown_or_missing_value_falls_back_to_build_default() {
    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    assert_eq!(test_level(None), fallback);
    assert_eq!(test_level(Some("loud")), fallback);
}

#[test]
fn macros_expand_outside_the_crate() {
    coord_logging::initialize_for_tests();
    coord_logging::coord_trace!("trace {}", 1);
    coord_logging::coord_debug!("debug {}", 2);
    coord_logging::coord_info!("info");
    coord_logging::coord_warn!("warn {:?}", "x");
    coord_logging::coord_error!("error");
}
