use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A person attached to an expense together with what they actually paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub contribution: Money,
}

/// A single recorded cost event, split among its participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub total: Money,
    pub date: NaiveDate,
    pub participants: Vec<Participant>,
}

impl Expense {
    /// Builds a stored record from a validated draft. Callers are expected to
    /// run the draft through validation first; this only assigns identity.
    pub(crate) fn from_draft(id: Uuid, draft: ExpenseDraft) -> Self {
        Self {
            id,
            title: draft.title,
            total: draft.total,
            date: draft.date,
            participants: draft.participants,
        }
    }
}

/// User-supplied expense fields, prior to validation and identity assignment.
///
/// The same draft shape serves both creation and edit; `ExpenseStore` decides
/// whether a fresh id is minted or an existing record is replaced in place.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub title: String,
    pub total: Money,
    pub date: NaiveDate,
    pub participants: Vec<Participant>,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        total: Money,
        date: NaiveDate,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            title: title.into(),
            total,
            date,
            participants,
        }
    }

    /// A draft carrying a single payer for the whole amount.
    pub fn single_payer(
        title: impl Into<String>,
        payer: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            total: amount,
            date,
            participants: vec![Participant {
                name: payer.into(),
                contribution: amount,
            }],
        }
    }
}
