//! Request/response types of the procedure-call surface.
//!
//! Everything user-facing is a discriminated value: eligibility failures are
//! [`InitiateOutcome::Deny`], action rejections are notification strings.
//! Only infrastructure failures surface as [`RuntimeError`].

pub mod errors;

pub use errors::{Result, RuntimeError};

use battle_core::{Battle, BattleId, BattleResult};
use serde::{Deserialize, Serialize};

use crate::repository::BattleEntry;

/// Outcome of a battle initiation attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitiateOutcome {
    /// The battle row exists and both parties are locked in.
    Started { battle_id: BattleId },
    /// A precondition failed; nothing was written.
    Deny { reason: String },
}

impl InitiateOutcome {
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    pub fn battle_id(&self) -> Option<BattleId> {
        match self {
            Self::Started { battle_id } => Some(*battle_id),
            Self::Deny { .. } => None,
        }
    }
}

/// Aligned, masked battle state for one viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetBattleResponse {
    /// `None` when the viewer has no active battle.
    pub battle: Option<Battle>,
    pub result: Option<BattleResult>,
}

/// Outcome of a `perform_action` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformActionResponse {
    /// Whether the client should re-render from the returned state.
    pub update_client: bool,
    /// Masked battle state after the attempt, when one still exists.
    pub battle: Option<Battle>,
    pub result: Option<BattleResult>,
    /// Validation feedback for the requester, safe to display verbatim.
    pub notification: Option<String>,
    /// Log entries produced by this resolution, oldest first.
    pub log_entries: Vec<BattleEntry>,
}

impl PerformActionResponse {
    /// A response that changes nothing client-side except a notification.
    pub fn notice(notification: impl Into<String>) -> Self {
        Self {
            update_client: false,
            battle: None,
            result: None,
            notification: Some(notification.into()),
            log_entries: Vec::new(),
        }
    }
}
