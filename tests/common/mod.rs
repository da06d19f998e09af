//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

/// Small gapminder-style extract used as the default dataset in tests
pub const GAPMINDER_CSV: &str = "\
country,continent,year,pop,lifeExp,gdpPercap
Algeria,Africa,2007,33333216,72.301,6223.367465
Angola,Africa,2007,12420476,42.731,4797.231267
Argentina,Americas,2007,40301927,75.32,12779.37964
Bolivia,Americas,2007,9119152,65.554,3822.137084
Japan,Asia,2007,127467972,82.603,31656.06806
";

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_millis(500)
}

/// The instant every test archive clock starts at
pub fn test_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid test instant")
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
