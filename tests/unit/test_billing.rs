//! Unit tests for charge computation.

use chrono::{Duration, TimeZone, Utc};
use parking_management_api::services::BillingPolicy;
use parking_management_api::services::billing::duration_hours;

#[test]
fn test_two_hours_at_two_dollars() {
    let entry = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    let exit = entry + Duration::hours(2);
    let charge = BillingPolicy::default().charge(entry, exit, 2.0);
    assert!((charge - 4.0).abs() < 1e-9);
}

#[test]
fn test_fractional_hours_are_billed_exactly_by_default() {
    let entry = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    let exit = entry + Duration::minutes(10);
    let charge = BillingPolicy::default().charge(entry, exit, 3.0);
    assert!((charge - 0.5).abs() < 1e-9);
}

#[test]
fn test_increment_rounds_up() {
    let policy = BillingPolicy::new(15);
    let entry = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();

    // 16 minutes bills as 30
    let charge = policy.charge(entry, entry + Duration::minutes(16), 4.0);
    assert!((charge - 2.0).abs() < 1e-9);

    // exact multiples are not bumped
    let charge = policy.charge(entry, entry + Duration::minutes(45), 4.0);
    assert!((charge - 3.0).abs() < 1e-9);
}

#[test]
fn test_zero_duration_is_free_under_any_policy() {
    let entry = Utc::now();
    assert_eq!(BillingPolicy::default().charge(entry, entry, 5.0), 0.0);
    assert_eq!(BillingPolicy::new(60).charge(entry, entry, 5.0), 0.0);
}

#[test]
fn test_duration_never_negative() {
    let entry = Utc::now();
    assert_eq!(duration_hours(entry, entry - Duration::hours(1)), 0.0);
}

#[test]
fn test_exact_increment_multiples_bill_only_the_stay() {
    let entry = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    for increment in 1..=120u32 {
        let policy = BillingPolicy::new(increment);
        for k in 1..=48i64 {
            let minutes = k * i64::from(increment);
            // one dollar per minute
            let charge = policy.charge(entry, entry + Duration::minutes(minutes), 60.0);
            assert!(
                (charge - minutes as f64).abs() < 1e-6,
                "{increment} minute increment, {minutes} minute stay charged {charge}"
            );
        }
    }
}

#[test]
fn test_partial_increment_bills_one_more_unit() {
    let entry = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    let policy = BillingPolicy::new(1);
    let exit = entry + Duration::minutes(23) + Duration::seconds(1);
    let charge = policy.charge(entry, exit, 60.0);
    assert!((charge - 24.0).abs() < 1e-6);
}
