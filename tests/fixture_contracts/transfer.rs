//! stale_read_transfer contracts

use crate::common::*;
use faultline::transfer::{simulate_race_condition, Account, TransferService, RACE_AMOUNT};

#[test]
fn interleaved_transfers_overdraw_source() {
    let outcome = simulate_race_condition();
    assert_eq!(outcome.alice.balance(), -50);
    assert_eq!(outcome.bob.balance(), 125);
    assert_eq!(outcome.charlie.balance(), 75);
    assert_eq!(outcome.total(), 150);
    assert!(outcome.conserved());
    assert!(!outcome.non_negative());
}

#[test]
fn sequential_transfers_stay_guarded() {
    let mut alice = Account::new("Alice", 100);
    let mut bob = Account::new("Bob", 50);
    let mut charlie = Account::new("Charlie", 0);
    let mut service = TransferService::new();

    assert!(service.transfer(&mut alice, &mut bob, RACE_AMOUNT));
    assert!(!service.transfer(&mut alice, &mut charlie, RACE_AMOUNT));
    assert_eq!(alice.balance(), 25);
    assert_eq!(charlie.balance(), 0);
}

#[test]
fn fixture_flags_negative_balance() {
    let report = run_fixture("stale_read_transfer");
    assert_eq!(
        report.output.last().map(String::as_str),
        Some("BUG DETECTED: Account went negative!")
    );
    assert_eq!(observed(&report, "alice balance non-negative"), "false");
}
