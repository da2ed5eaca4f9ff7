//! Action validation errors.
//!
//! Every variant is a fatal-to-the-attempt condition: the submitted action is
//! rejected and battle state is left untouched. The runtime renders the
//! message back to the requester as a notification rather than failing the
//! request.

use crate::state::PoolKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("combatant is not part of this battle")]
    UnknownCombatant,

    #[error("combatant is no longer in the fight")]
    CombatantGone,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("you are stunned and cannot act")]
    Stunned,

    #[error("that action is not available")]
    ActionNotAvailable,

    #[error("action is still on cooldown")]
    OnCooldown,

    #[error("not enough action points")]
    OutOfActionPoints,

    #[error("insufficient {0}")]
    InsufficientResources(PoolKind),

    #[error("a target tile is required")]
    MissingTarget,

    #[error("target tile is outside the battlefield")]
    OutOfBounds,

    #[error("target out of range")]
    OutOfRange,

    #[error("no combatant on the targeted tile")]
    NoTargetAtTile,

    #[error("tile is already occupied")]
    TileOccupied,

    #[error("you cannot target yourself with that")]
    InvalidTarget,
}
