//! Admission status lifecycle.
//!
//! A student's status moves through
//! `APPLICATION_ENTERED → DOCUMENTS_INCOMPLETE ⇄ DOCUMENTS_DECLARED →
//! FEE_PENDING → FEE_PARTIAL → FEE_RECEIVED → ADMITTED`.
//!
//! The transition functions here are pure; the stores evaluate them inside
//! the same transaction as the write that triggered the recount, so a bulk
//! document submission produces exactly one recount.

use serde::{Deserialize, Serialize};

/// Admission status attached to each student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionStatus {
    ApplicationEntered,
    DocumentsIncomplete,
    DocumentsDeclared,
    FeePending,
    FeePartial,
    FeeReceived,
    Admitted,
}

impl AdmissionStatus {
    /// Stable string encoding used in the database and over the API
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::ApplicationEntered => "APPLICATION_ENTERED",
            AdmissionStatus::DocumentsIncomplete => "DOCUMENTS_INCOMPLETE",
            AdmissionStatus::DocumentsDeclared => "DOCUMENTS_DECLARED",
            AdmissionStatus::FeePending => "FEE_PENDING",
            AdmissionStatus::FeePartial => "FEE_PARTIAL",
            AdmissionStatus::FeeReceived => "FEE_RECEIVED",
            AdmissionStatus::Admitted => "ADMITTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "APPLICATION_ENTERED" => Some(AdmissionStatus::ApplicationEntered),
            "DOCUMENTS_INCOMPLETE" => Some(AdmissionStatus::DocumentsIncomplete),
            "DOCUMENTS_DECLARED" => Some(AdmissionStatus::DocumentsDeclared),
            "FEE_PENDING" => Some(AdmissionStatus::FeePending),
            "FEE_PARTIAL" => Some(AdmissionStatus::FeePartial),
            "FEE_RECEIVED" => Some(AdmissionStatus::FeeReceived),
            "ADMITTED" => Some(AdmissionStatus::Admitted),
            _ => None,
        }
    }

    /// True while the status is still driven by document declarations.
    /// Once a student reaches a fee stage the document recount must never
    /// regress them.
    pub fn in_document_stage(&self) -> bool {
        matches!(
            self,
            AdmissionStatus::ApplicationEntered
                | AdmissionStatus::DocumentsIncomplete
                | AdmissionStatus::DocumentsDeclared
        )
    }
}

/// Recompute the document-driven status after a declaration write.
///
/// Returns `Some(new_status)` only when the rule applies (current status is
/// in the document stage) and the recount produces a different status, so
/// callers can skip redundant writes.
pub fn recompute_document_status(
    current: AdmissionStatus,
    declared_count: u64,
    total_required: u64,
) -> Option<AdmissionStatus> {
    if !current.in_document_stage() {
        return None;
    }

    let next = if declared_count >= total_required {
        AdmissionStatus::FeePending
    } else if declared_count > 0 {
        AdmissionStatus::DocumentsIncomplete
    } else {
        AdmissionStatus::ApplicationEntered
    };

    (next != current).then_some(next)
}

/// Advance the fee-driven status after a payment is recorded.
///
/// Only applies from FEE_PENDING or FEE_PARTIAL; ADMITTED is reached through
/// an explicit admit operation, never by a payment.
pub fn advance_on_payment(
    current: AdmissionStatus,
    total_paid: i64,
    effective_fee: i64,
) -> Option<AdmissionStatus> {
    if !matches!(
        current,
        AdmissionStatus::FeePending | AdmissionStatus::FeePartial
    ) {
        return None;
    }

    let next = if total_paid >= effective_fee {
        AdmissionStatus::FeeReceived
    } else {
        AdmissionStatus::FeePartial
    };

    (next != current).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let all = [
            AdmissionStatus::ApplicationEntered,
            AdmissionStatus::DocumentsIncomplete,
            AdmissionStatus::DocumentsDeclared,
            AdmissionStatus::FeePending,
            AdmissionStatus::FeePartial,
            AdmissionStatus::FeeReceived,
            AdmissionStatus::Admitted,
        ];
        for status in all {
            assert_eq!(AdmissionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AdmissionStatus::parse("REJECTED"), None);
    }

    #[test]
    fn test_partial_declaration_moves_to_incomplete() {
        let next = recompute_document_status(AdmissionStatus::ApplicationEntered, 1, 3);
        assert_eq!(next, Some(AdmissionStatus::DocumentsIncomplete));
    }

    #[test]
    fn test_full_declaration_moves_to_fee_pending() {
        let next = recompute_document_status(AdmissionStatus::DocumentsIncomplete, 3, 3);
        assert_eq!(next, Some(AdmissionStatus::FeePending));
    }

    #[test]
    fn test_full_declaration_skips_intermediate_states() {
        // Declaring all required documents at once jumps straight to FEE_PENDING
        let next = recompute_document_status(AdmissionStatus::ApplicationEntered, 3, 3);
        assert_eq!(next, Some(AdmissionStatus::FeePending));
    }

    #[test]
    fn test_undeclaring_everything_returns_to_application_entered() {
        let next = recompute_document_status(AdmissionStatus::DocumentsIncomplete, 0, 3);
        assert_eq!(next, Some(AdmissionStatus::ApplicationEntered));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        // Same counts, same status: no write needed
        assert_eq!(
            recompute_document_status(AdmissionStatus::DocumentsIncomplete, 2, 3),
            None
        );
        assert_eq!(
            recompute_document_status(AdmissionStatus::ApplicationEntered, 0, 3),
            None
        );
    }

    #[test]
    fn test_recompute_never_regresses_fee_stage_students() {
        for status in [
            AdmissionStatus::FeePending,
            AdmissionStatus::FeePartial,
            AdmissionStatus::FeeReceived,
            AdmissionStatus::Admitted,
        ] {
            assert_eq!(recompute_document_status(status, 0, 3), None);
            assert_eq!(recompute_document_status(status, 3, 3), None);
        }
    }

    #[test]
    fn test_documents_declared_is_superseded_by_recount() {
        // A student parked in DOCUMENTS_DECLARED still recounts forward
        let next = recompute_document_status(AdmissionStatus::DocumentsDeclared, 3, 3);
        assert_eq!(next, Some(AdmissionStatus::FeePending));
    }

    #[test]
    fn test_partial_payment_moves_to_fee_partial() {
        let next = advance_on_payment(AdmissionStatus::FeePending, 4000, 10000);
        assert_eq!(next, Some(AdmissionStatus::FeePartial));
    }

    #[test]
    fn test_full_payment_moves_to_fee_received() {
        assert_eq!(
            advance_on_payment(AdmissionStatus::FeePending, 10000, 10000),
            Some(AdmissionStatus::FeeReceived)
        );
        assert_eq!(
            advance_on_payment(AdmissionStatus::FeePartial, 12000, 10000),
            Some(AdmissionStatus::FeeReceived)
        );
    }

    #[test]
    fn test_payment_never_touches_other_stages() {
        for status in [
            AdmissionStatus::ApplicationEntered,
            AdmissionStatus::DocumentsIncomplete,
            AdmissionStatus::FeeReceived,
            AdmissionStatus::Admitted,
        ] {
            assert_eq!(advance_on_payment(status, 10000, 10000), None);
        }
    }

    #[test]
    fn test_repeated_partial_payment_does_not_rewrite_status() {
        assert_eq!(advance_on_payment(AdmissionStatus::FeePartial, 5000, 10000), None);
    }
}
