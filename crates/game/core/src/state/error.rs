//! Errors raised while assembling or mutating the world aggregate.

use crate::error::{ErrorSeverity, GameError};

use super::common::{EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("unit {0} is registered twice")]
    DuplicateEntity(EntityId),

    #[error("unit {0} not found")]
    UnknownEntity(EntityId),

    #[error("unit {id} placed outside the board at {position}")]
    OutOfBounds { id: EntityId, position: Position },

    #[error("units {first} and {second} share tile {position}")]
    TileConflict {
        first: EntityId,
        second: EntityId,
        position: Position,
    },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity(_) => "WORLD_DUPLICATE_ENTITY",
            Self::UnknownEntity(_) => "WORLD_UNKNOWN_ENTITY",
            Self::OutOfBounds { .. } => "WORLD_OUT_OF_BOUNDS",
            Self::TileConflict { .. } => "WORLD_TILE_CONFLICT",
        }
    }
}
