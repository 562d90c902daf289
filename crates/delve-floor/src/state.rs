//! Floor lifecycle and the data of the active floor.

use delve_layout::FloorLayout;
use delve_rooms::InstantiationReport;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FloorPhase
// ---------------------------------------------------------------------------

/// Where the controller is in a run.
///
/// ```text
/// NoFloor ──▶ Transitioning ──▶ FloorActive ──▶ Transitioning ──▶ FloorActive (next)
///                                                      └────────▶ Completed
/// ```
///
/// - **NoFloor**: nothing generated and no room spawned. A run can start
///   with `start_run`, or any floor can be built with `generate_floor`.
/// - **Transitioning**: the previous floor's rooms are being despawned and
///   the next floor grown, typed, given doors and spawned. The pipeline is
///   synchronous, so callers never observe this phase between calls.
/// - **FloorActive**: a floor is live. Queries answer, the player can be
///   placed at the start room, and the exit trigger calls `advance_floor`.
/// - **Completed**: the last floor was cleared and its rooms despawned.
///   Only `clear_floor` leaves this phase.
///
/// ## Resetting
///
/// Any phase may go back to `NoFloor` via `clear_floor`, which also
/// despawns whatever is live. A floor whose layout fails is abandoned the
/// same way.
///
/// ## Checking transitions
///
/// [`can_transition_to`](Self::can_transition_to) is the single source of
/// truth for which moves are legal. The controller consults it before
/// touching any content, so a rejected call leaves the run unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorPhase {
    NoFloor,
    Transitioning,
    FloorActive,
    Completed,
}

impl FloorPhase {
    /// Returns `true` if a floor is live.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::FloorActive)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NoFloor | Self::FloorActive, Self::Transitioning)
                | (Self::Transitioning, Self::FloorActive | Self::Completed)
                | (_, Self::NoFloor)
        )
    }
}

impl std::fmt::Display for FloorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFloor => write!(f, "NoFloor"),
            Self::Transitioning => write!(f, "Transitioning"),
            Self::FloorActive => write!(f, "FloorActive"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// FloorState
// ---------------------------------------------------------------------------

/// The live floor. Replaced wholesale on every advance.
#[derive(Debug, Clone)]
pub struct FloorState {
    /// 1-based floor number.
    pub index: u32,
    pub layout: FloorLayout,
    /// How instantiation of this floor's rooms went.
    pub content: InstantiationReport,
}
