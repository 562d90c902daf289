//! Error types for the floor controller.

use delve_layout::GraphError;

use crate::{ConfigError, FloorPhase};

/// Errors returned by floor operations.
///
/// Every error is raised before the controller changes phase, except
/// [`FloorError::Graph`], which leaves the controller in `NoFloor` with
/// all content torn down.
#[derive(Debug, thiserror::Error)]
pub enum FloorError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The operation is not allowed in the current phase.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: FloorPhase,
    },

    #[error("floor {index} is outside 1..={floor_count}")]
    FloorOutOfRange { index: u32, floor_count: u32 },

    /// Another floor operation holds the controller.
    #[error("a floor operation is already in progress")]
    Busy,

    #[error("room graph error: {0}")]
    Graph(#[from] GraphError),
}
