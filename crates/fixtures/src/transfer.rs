//! Stale-read transfer simulation
//!
//! A transfer is a read-check (`from.balance >= amount`) followed by an act
//! (debit + credit) that trusts the earlier check. The driver interleaves two
//! transfers from the same account as check1, check2, act1, act2. Both
//! checks read the pre-transfer balance, both acts run, and the source
//! account goes negative. No threads are involved.

use crate::fixture::{DefectKind, Fixture, FixtureReport, Observation};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credit
    Deposit,
    /// Debit
    Withdraw,
}

/// One entry of an account's append-only log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionEntry {
    /// Credit or debit
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Requested amount
    pub amount: i64,
    /// Balance before the operation
    pub old_balance: i64,
    /// Balance after the operation
    pub new_balance: i64,
    /// Whether the balance changed
    pub success: bool,
}

/// A named account with a mutable balance
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    balance: i64,
    transaction_log: Vec<TransactionEntry>,
}

impl Account {
    /// Open an account with an initial balance
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        Self {
            name: name.into(),
            balance,
            transaction_log: Vec::new(),
        }
    }

    /// Account holder name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Log entries, oldest first
    pub fn transaction_log(&self) -> &[TransactionEntry] {
        &self.transaction_log
    }

    fn log(&mut self, kind: TransactionKind, amount: i64, old_balance: i64, success: bool) {
        self.transaction_log.push(TransactionEntry {
            kind,
            amount,
            old_balance,
            new_balance: self.balance,
            success,
        });
    }

    /// Credit unconditionally
    pub fn deposit(&mut self, amount: i64) {
        let old_balance = self.balance;
        self.balance += amount;
        self.log(TransactionKind::Deposit, amount, old_balance, true);
    }

    /// Debit when the balance covers `amount`; otherwise log a failed entry.
    pub fn withdraw(&mut self, amount: i64) -> bool {
        let old_balance = self.balance;
        let covered = self.balance >= amount;
        if covered {
            self.balance -= amount;
        }
        self.log(TransactionKind::Withdraw, amount, old_balance, covered);
        covered
    }

    /// Debit without checking the balance.
    fn debit(&mut self, amount: i64) {
        let old_balance = self.balance;
        self.balance -= amount;
        self.log(TransactionKind::Withdraw, amount, old_balance, true);
    }
}

/// One line of the transfer service log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    /// Source account name
    pub from: String,
    /// Destination account name
    pub to: String,
    /// Amount moved
    pub amount: i64,
    /// Whether money moved
    pub success: bool,
    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ${} {}",
            self.from,
            self.to,
            self.amount,
            if self.success { "ok" } else { "failed" }
        )?;
        if let Some(reason) = &self.reason {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

/// Moves money between accounts
#[derive(Debug, Default)]
pub struct TransferService {
    transfer_log: Vec<TransferRecord>,
}

impl TransferService {
    /// Create a service with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfers attempted so far
    pub fn transfer_log(&self) -> &[TransferRecord] {
        &self.transfer_log
    }

    /// The read-check half of a transfer.
    pub fn check(&self, from: &Account, amount: i64) -> bool {
        let ok = from.balance() >= amount;
        debug!(account = from.name(), balance = from.balance(), amount, ok, "balance checked");
        ok
    }

    /// The act half of a transfer; relies on a prior [`TransferService::check`].
    ///
    /// Debits without [`Account::withdraw`]'s balance guard, so a stale check
    /// lets the source go negative.
    pub fn settle(&mut self, from: &mut Account, to: &mut Account, amount: i64) {
        from.debit(amount);
        to.deposit(amount);
        self.transfer_log.push(TransferRecord {
            from: from.name().to_string(),
            to: to.name().to_string(),
            amount,
            success: true,
            reason: None,
        });
    }

    /// Check then act, back to back.
    pub fn transfer(&mut self, from: &mut Account, to: &mut Account, amount: i64) -> bool {
        if !self.check(from, amount) {
            self.transfer_log.push(TransferRecord {
                from: from.name().to_string(),
                to: to.name().to_string(),
                amount,
                success: false,
                reason: Some("insufficient_funds".to_string()),
            });
            return false;
        }
        self.settle(from, to, amount);
        true
    }
}

/// Final state of [`simulate_race_condition`]
#[derive(Debug)]
pub struct RaceOutcome {
    /// Source account
    pub alice: Account,
    /// First destination
    pub bob: Account,
    /// Second destination
    pub charlie: Account,
    /// Service with both transfers logged
    pub service: TransferService,
    /// Sum of opening balances
    pub initial_total: i64,
}

impl RaceOutcome {
    /// Sum of closing balances
    pub fn total(&self) -> i64 {
        self.alice.balance() + self.bob.balance() + self.charlie.balance()
    }

    /// Whether no account ended below zero
    pub fn non_negative(&self) -> bool {
        [&self.alice, &self.bob, &self.charlie]
            .iter()
            .all(|a| a.balance() >= 0)
    }

    /// Whether the total amount of money is unchanged
    pub fn conserved(&self) -> bool {
        self.total() == self.initial_total
    }
}

/// Transfer amount used by both simulated transfers
pub const RACE_AMOUNT: i64 = 75;

/// Two 75 transfers out of Alice's 100, interleaved check1, check2, act1, act2.
pub fn simulate_race_condition() -> RaceOutcome {
    let mut alice = Account::new("Alice", 100);
    let mut bob = Account::new("Bob", 50);
    let mut charlie = Account::new("Charlie", 0);
    let initial_total = alice.balance() + bob.balance() + charlie.balance();
    let mut service = TransferService::new();

    let can_transfer_1 = service.check(&alice, RACE_AMOUNT);
    // Alice has not been debited yet
    let can_transfer_2 = service.check(&alice, RACE_AMOUNT);

    if can_transfer_1 {
        service.settle(&mut alice, &mut bob, RACE_AMOUNT);
    }
    if can_transfer_2 {
        service.settle(&mut alice, &mut charlie, RACE_AMOUNT);
    }

    let outcome = RaceOutcome {
        alice,
        bob,
        charlie,
        service,
        initial_total,
    };
    if !outcome.non_negative() {
        warn!(balance = outcome.alice.balance(), "account went negative");
    }
    info!(total = outcome.total(), "race simulated");
    outcome
}

/// Registry entry for the transfer fixture
pub struct TransferFixture;

impl Fixture for TransferFixture {
    fn name(&self) -> &'static str {
        "stale_read_transfer"
    }

    fn defect(&self) -> DefectKind {
        DefectKind::StaleRead
    }

    fn summary(&self) -> &'static str {
        "two transfers pass a balance check against the same stale balance"
    }

    fn run(&self) -> FixtureReport {
        let mut report = FixtureReport::new(self.name(), self.defect());
        let outcome = simulate_race_condition();

        report.line(format!("Alice balance: ${}", outcome.alice.balance()));
        report.line(format!("Bob balance: ${}", outcome.bob.balance()));
        report.line(format!("Charlie balance: ${}", outcome.charlie.balance()));
        for record in outcome.service.transfer_log() {
            report.line(format!("Transfer: {}", record));
        }
        report.line(format!(
            "Total money: ${} (should be ${})",
            outcome.total(),
            outcome.initial_total
        ));
        if outcome.non_negative() {
            report.line("All accounts valid.");
        } else {
            report.line("BUG DETECTED: Account went negative!");
        }

        report.observe(Observation::new(
            "alice balance non-negative",
            true,
            outcome.non_negative(),
        ));
        report.observe(Observation::new(
            "total money",
            outcome.initial_total,
            outcome.total(),
        ));
        report
    }
}
