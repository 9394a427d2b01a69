use chrono::NaiveDate;

use crate::errors::{Result, SplitError};
use crate::money::Money;

use super::record::ExpenseDraft;

/// Upper bound on a single expense total, in cents (1,000,000.00).
const MAX_TOTAL_CENTS: i64 = 100_000_000;
/// Largest supported split.
const MAX_PARTICIPANTS: usize = 20;
/// How far contributions may drift from the total, in cents.
const SUM_TOLERANCE_CENTS: i64 = 1;

/// Checks every draft rule and returns the cleaned draft (title and names
/// trimmed). Nothing is mutated on failure; the error message is meant to be
/// shown to the user as-is.
pub fn validate_draft(mut draft: ExpenseDraft, today: NaiveDate) -> Result<ExpenseDraft> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(SplitError::Validation("title must not be empty".into()));
    }

    if draft.date > today {
        return Err(SplitError::Validation(format!(
            "date {} is in the future",
            draft.date
        )));
    }

    if !draft.total.is_positive() {
        return Err(SplitError::Validation(
            "total amount must be greater than zero".into(),
        ));
    }
    if draft.total.cents() > MAX_TOTAL_CENTS {
        return Err(SplitError::Validation(format!(
            "total amount {} exceeds the supported maximum of {}",
            draft.total,
            Money::from_cents(MAX_TOTAL_CENTS)
        )));
    }

    if draft.participants.is_empty() {
        return Err(SplitError::Validation(
            "an expense needs at least one participant".into(),
        ));
    }
    if draft.participants.len() > MAX_PARTICIPANTS {
        return Err(SplitError::Validation(format!(
            "at most {} participants are supported",
            MAX_PARTICIPANTS
        )));
    }

    let mut seen: Vec<String> = Vec::with_capacity(draft.participants.len());
    for participant in &mut draft.participants {
        participant.name = participant.name.trim().to_string();
        if participant.name.is_empty() {
            return Err(SplitError::Validation(
                "participant names must not be empty".into(),
            ));
        }
        let folded = participant.name.to_lowercase();
        if seen.contains(&folded) {
            return Err(SplitError::Validation(format!(
                "duplicate participant name `{}`",
                participant.name
            )));
        }
        seen.push(folded);

        if participant.contribution.is_negative() {
            return Err(SplitError::Validation(format!(
                "contribution for `{}` must not be negative",
                participant.name
            )));
        }
        if participant.contribution > draft.total {
            return Err(SplitError::Validation(format!(
                "contribution for `{}` exceeds the expense total",
                participant.name
            )));
        }
    }

    let contributed: Money = draft
        .participants
        .iter()
        .map(|participant| participant.contribution)
        .sum();
    if (contributed - draft.total).abs().cents() > SUM_TOLERANCE_CENTS {
        return Err(SplitError::Validation(format!(
            "contributions ({}) must equal the expense total ({})",
            contributed, draft.total
        )));
    }

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::record::Participant;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn participant(name: &str, cents: i64) -> Participant {
        Participant {
            name: name.into(),
            contribution: Money::from_cents(cents),
        }
    }

    fn draft(total_cents: i64, participants: Vec<Participant>) -> ExpenseDraft {
        ExpenseDraft::new(
            "Dinner",
            Money::from_cents(total_cents),
            today(),
            participants,
        )
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        let cleaned = validate_draft(
            draft(10000, vec![participant(" X ", 6000), participant("Y", 4000)]),
            today(),
        )
        .unwrap();
        assert_eq!(cleaned.participants[0].name, "X");
    }

    #[test]
    fn rejects_blank_title() {
        let mut bad = draft(10000, vec![participant("X", 10000)]);
        bad.title = "   ".into();
        let err = validate_draft(bad, today()).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn rejects_future_date() {
        let mut bad = draft(10000, vec![participant("X", 10000)]);
        bad.date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert!(validate_draft(bad, today()).is_err());
    }

    #[test]
    fn rejects_non_positive_and_oversized_totals() {
        assert!(validate_draft(draft(0, vec![participant("X", 0)]), today()).is_err());
        let big = draft(MAX_TOTAL_CENTS + 1, vec![participant("X", MAX_TOTAL_CENTS + 1)]);
        assert!(validate_draft(big, today()).is_err());
    }

    #[test]
    fn rejects_contribution_drift_beyond_tolerance() {
        // 99.97 against a total of 100.00 is out of tolerance.
        let bad = draft(10000, vec![participant("X", 5000), participant("Y", 4997)]);
        let err = validate_draft(bad, today()).unwrap_err();
        assert!(err.to_string().contains("must equal"));

        // One cent off is accepted.
        let ok = draft(10000, vec![participant("X", 5000), participant("Y", 4999)]);
        assert!(validate_draft(ok, today()).is_ok());
    }

    #[test]
    fn rejects_case_insensitive_duplicate_names() {
        let bad = draft(10000, vec![participant("Ana", 5000), participant("ANA", 5000)]);
        let err = validate_draft(bad, today()).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_contribution_above_total() {
        let bad = draft(10000, vec![participant("X", 10001)]);
        assert!(validate_draft(bad, today()).is_err());
    }

    #[test]
    fn enforces_participant_count_bounds() {
        assert!(validate_draft(draft(10000, vec![]), today()).is_err());
        let crowd: Vec<Participant> = (0..21).map(|i| participant(&format!("p{i}"), 0)).collect();
        let mut bad = draft(10000, crowd);
        bad.participants[0].contribution = Money::from_cents(10000);
        assert!(validate_draft(bad, today()).is_err());
    }
}
