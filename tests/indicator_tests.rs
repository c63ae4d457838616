//! Integration tests for IndicatorReflector

mod common;
use common::*;

use bootsel_toggle::{IndicatorPattern, IndicatorReflector, LedId};

#[test]
fn new_reflector_writes_nothing() {
    let reflector = IndicatorReflector::new(MockIndicator::new());
    assert!(reflector.output().history().is_empty());
}

#[test]
fn true_lights_led_a_only() {
    let mut reflector = IndicatorReflector::new(MockIndicator::new());

    let pattern = reflector.apply(true);
    assert_eq!(
        pattern,
        IndicatorPattern {
            led_a: true,
            led_b: false
        }
    );
    assert!(shows_state(reflector.output(), true));
}

#[test]
fn false_lights_led_b_only() {
    let mut reflector = IndicatorReflector::new(MockIndicator::new());

    reflector.apply(false);
    assert_eq!(reflector.output().level(LedId::A), Some(false));
    assert_eq!(reflector.output().level(LedId::B), Some(true));
}

#[test]
fn apply_writes_both_leds() {
    let mut reflector = IndicatorReflector::new(MockIndicator::new());

    reflector.apply(true);
    assert_eq!(
        reflector.output().history(),
        &[(LedId::A, true), (LedId::B, false)]
    );
}

#[test]
fn applying_same_state_twice_is_idempotent() {
    let mut once = IndicatorReflector::new(MockIndicator::new());
    let mut twice = IndicatorReflector::new(MockIndicator::new());

    let first = once.apply(true);
    twice.apply(true);
    let second = twice.apply(true);

    assert_eq!(first, second);
    for led in [LedId::A, LedId::B] {
        assert_eq!(once.output().level(led), twice.output().level(led));
    }
}

#[test]
fn pattern_level_matches_fields() {
    let pattern = IndicatorPattern::for_state(false);
    assert!(!pattern.level(LedId::A));
    assert!(pattern.level(LedId::B));
}

#[test]
fn into_inner_returns_output() {
    let mut reflector = IndicatorReflector::new(MockIndicator::new());
    reflector.apply(false);

    let output = reflector.into_inner();
    assert_eq!(output.history().len(), 2);
}
