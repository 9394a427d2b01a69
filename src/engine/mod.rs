//! Pure derivations over the expense collection: net balances, the header
//! summary, and the per-expense settlement breakdown.
//!
//! The engine is stateless: every call recomputes from the snapshot it is
//! handed. Collections are human-entered expense logs, so no caching is
//! needed.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::expense::Expense;
use crate::money::Money;

/// Which settlement semantics to apply.
///
/// `PerExpense` settles each expense against its own participants and is the
/// canonical mode. `Pooled` reproduces the legacy behaviour of treating the
/// whole history as one pot split across everyone who ever participated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceMode {
    #[default]
    PerExpense,
    Pooled,
}

/// One person's net position. Positive means they are owed money.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceEntry {
    pub name: String,
    pub amount: Money,
}

/// Header statistics across the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: Money,
    pub highest_spender: Option<(String, Money)>,
    pub average_per_person: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetStatus {
    Receives,
    Owes,
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantShare {
    pub name: String,
    pub contribution: Money,
    pub net: Money,
    pub status: NetStatus,
}

/// Settlement detail for a single expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBreakdown {
    pub expense_id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub total: Money,
    pub equal_share: Money,
    pub participants: Vec<ParticipantShare>,
}

/// Accumulates amounts per name while preserving first-encountered order.
#[derive(Default)]
struct Tally {
    order: Vec<String>,
    amounts: HashMap<String, Money>,
}

impl Tally {
    fn add(&mut self, name: &str, amount: Money) {
        if !self.amounts.contains_key(name) {
            self.order.push(name.to_string());
        }
        *self.amounts.entry(name.to_string()).or_insert(Money::zero()) += amount;
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_entries(self) -> Vec<BalanceEntry> {
        let Tally { order, amounts } = self;
        order
            .into_iter()
            .map(|name| {
                let amount = amounts[&name];
                BalanceEntry { name, amount }
            })
            .collect()
    }
}

pub struct BalanceEngine;

impl BalanceEngine {
    /// Net balance per participant, in first-encountered order. People who
    /// appear in no expense are absent, not zero.
    pub fn balances(expenses: &[Expense], mode: BalanceMode) -> Vec<BalanceEntry> {
        match mode {
            BalanceMode::PerExpense => Self::per_expense_balances(expenses),
            BalanceMode::Pooled => Self::pooled_balances(expenses),
        }
    }

    fn per_expense_balances(expenses: &[Expense]) -> Vec<BalanceEntry> {
        let mut tally = Tally::default();
        for expense in expenses {
            let share = Money::equal_share(expense.total, expense.participants.len());
            for participant in &expense.participants {
                tally.add(&participant.name, participant.contribution - share);
            }
        }
        tally.into_entries()
    }

    fn pooled_balances(expenses: &[Expense]) -> Vec<BalanceEntry> {
        let mut contributions = Tally::default();
        for expense in expenses {
            for participant in &expense.participants {
                contributions.add(&participant.name, participant.contribution);
            }
        }
        let total: Money = expenses.iter().map(|expense| expense.total).sum();
        let share = Money::equal_share(total, contributions.len());
        contributions
            .into_entries()
            .into_iter()
            .map(|entry| BalanceEntry {
                name: entry.name,
                amount: entry.amount - share,
            })
            .collect()
    }

    /// Collection totals for the summary header. Highest-spender ties go to
    /// the participant encountered first.
    pub fn summary(expenses: &[Expense]) -> Summary {
        let total: Money = expenses.iter().map(|expense| expense.total).sum();
        let mut contributions = Tally::default();
        for expense in expenses {
            for participant in &expense.participants {
                contributions.add(&participant.name, participant.contribution);
            }
        }
        let people = contributions.len();
        let mut highest_spender: Option<(String, Money)> = None;
        for entry in contributions.into_entries() {
            let beats_current = match &highest_spender {
                Some((_, best)) => entry.amount > *best,
                None => true,
            };
            if beats_current {
                highest_spender = Some((entry.name, entry.amount));
            }
        }
        Summary {
            total,
            highest_spender,
            average_per_person: Money::equal_share(total, people),
        }
    }

    /// Ordered per-expense settlement report.
    pub fn breakdown(expenses: &[Expense]) -> Vec<ExpenseBreakdown> {
        expenses
            .iter()
            .map(|expense| {
                let share = Money::equal_share(expense.total, expense.participants.len());
                let participants = expense
                    .participants
                    .iter()
                    .map(|participant| {
                        let net = participant.contribution - share;
                        ParticipantShare {
                            name: participant.name.clone(),
                            contribution: participant.contribution,
                            net,
                            status: net_status(net),
                        }
                    })
                    .collect();
                ExpenseBreakdown {
                    expense_id: expense.id,
                    title: expense.title.clone(),
                    date: expense.date,
                    total: expense.total,
                    equal_share: share,
                    participants,
                }
            })
            .collect()
    }
}

fn net_status(net: Money) -> NetStatus {
    if net.is_positive() {
        NetStatus::Receives
    } else if net.is_negative() {
        NetStatus::Owes
    } else {
        NetStatus::Settled
    }
}
