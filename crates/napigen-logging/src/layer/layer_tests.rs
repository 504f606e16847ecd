#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(LogLevel::Trace, LevelFilter::TRACE)]
#[test_case(LogLevel::Debug, LevelFilter::DEBUG)]
#[test_case(LogLevel::Info, LevelFilter::INFO)]
#[test_case(LogLevel::Warn, LevelFilter::WARN)]
#[test_case(LogLevel::Error, LevelFilter::ERROR)]
#[test_case(LogLevel::Off, LevelFilter::OFF)]
fn level_filter___maps_each_level(level: LogLevel, expected: LevelFilter) {
    assert_eq!(level_filter(level), expected);
}

#[test]
fn init_logging___second_call___returns_same_handle() {
    let first = init_logging(LogLevel::Warn) as *const ReloadHandle;
    let second = init_logging(LogLevel::Debug) as *const ReloadHandle;

    assert_eq!(first, second);
    assert!(ReloadHandle::global().is_initialized());
}
