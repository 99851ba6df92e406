//! Message classification: which kinds and status subtypes the pipeline
//! accepts, and whether a line is long enough for its kind.
//!
//! An unrecognised or unwanted value is a skip (logged, `None`); a short line
//! is structural corruption and an error.

use std::collections::HashSet;

use tracing::error;

use crate::types::{MessageKind, Result, SbsError, StatusSubtype};

/// Allow-list collaborator consulted before a line is assembled.
pub trait MessageFilter {
    fn is_expected_kind(&self, kind: MessageKind) -> bool;
    fn is_expected_status(&self, status: StatusSubtype) -> bool;
}

/// Set-backed [`MessageFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    kinds: HashSet<MessageKind>,
    statuses: HashSet<StatusSubtype>,
}

impl AllowList {
    pub fn new(
        kinds: impl IntoIterator<Item = MessageKind>,
        statuses: impl IntoIterator<Item = StatusSubtype>,
    ) -> Self {
        AllowList {
            kinds: kinds.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
        }
    }

    /// Admit every kind and every status subtype.
    pub fn all() -> Self {
        AllowList::new(MessageKind::ALL, StatusSubtype::ALL)
    }
}

/// The kinds the assembler builds entities for, and every status subtype.
impl Default for AllowList {
    fn default() -> Self {
        AllowList::new(
            [
                MessageKind::NewAircraft,
                MessageKind::Identification,
                MessageKind::Transmission,
                MessageKind::StatusChange,
            ],
            StatusSubtype::ALL,
        )
    }
}

impl MessageFilter for AllowList {
    fn is_expected_kind(&self, kind: MessageKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn is_expected_status(&self, status: StatusSubtype) -> bool {
        self.statuses.contains(&status)
    }
}

/// Resolve token 0 to an accepted message kind. `None` means skip the line.
pub fn classify_kind(token: &str, filter: &dyn MessageFilter) -> Option<MessageKind> {
    match token.parse::<MessageKind>() {
        Ok(kind) if filter.is_expected_kind(kind) => Some(kind),
        Ok(kind) => {
            error!(kind = %kind, "unexpected message type");
            None
        }
        Err(_) => {
            error!(token, "unknown message type");
            None
        }
    }
}

/// Resolve the status subtype token of a `STA` line. `None` means skip.
pub fn classify_status(token: &str, filter: &dyn MessageFilter) -> Option<StatusSubtype> {
    match token.parse::<StatusSubtype>() {
        Ok(status) if filter.is_expected_status(status) => Some(status),
        Ok(status) => {
            error!(status = %status, "unexpected status message type");
            None
        }
        Err(_) => {
            error!(token, "unknown status message type");
            None
        }
    }
}

/// Fail if `tokens` is shorter than `kind` requires.
pub fn check_token_count(kind: MessageKind, tokens: &[&str]) -> Result<()> {
    let expected = kind.min_tokens();
    if tokens.len() < expected {
        return Err(SbsError::TooFewTokens {
            kind,
            expected,
            actual: tokens.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
