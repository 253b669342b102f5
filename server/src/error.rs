//! Rule violations surfaced to callers, and their HTTP mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("role mismatch: {0}")]
    RoleMismatch(String),
    #[error("card already has the maximum of {max} skills")]
    CapacityExceeded { max: usize },
    #[error("already present: {0}")]
    AlreadyPresent(String),
    #[error("boost targets skill {boost_target}, not skill {requested}")]
    TargetMismatch { boost_target: i32, requested: i32 },
    #[error("card {0} has no contract renewals left")]
    NoRenewalsLeft(uuid::Uuid),
    #[error("duplicate assignment: {0}")]
    DuplicateAssignment(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("inventory stack {0} is empty")]
    OutOfStock(uuid::Uuid),
    #[error("starter pack already claimed")]
    StarterPackClaimed,
    #[error("catalogue incomplete: {0}")]
    CatalogueIncomplete(String),
}

impl GameError {
    /// Stable machine-readable kind for response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::RoleMismatch(_) => "role_mismatch",
            GameError::CapacityExceeded { .. } => "capacity_exceeded",
            GameError::AlreadyPresent(_) => "already_present",
            GameError::TargetMismatch { .. } => "target_mismatch",
            GameError::NoRenewalsLeft(_) => "no_renewals_left",
            GameError::DuplicateAssignment(_) => "duplicate_assignment",
            GameError::NotFound(_) => "not_found",
            GameError::OutOfStock(_) => "out_of_stock",
            GameError::StarterPackClaimed => "starter_pack_claimed",
            GameError::CatalogueIncomplete(_) => "catalogue_incomplete",
        }
    }
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::DuplicateAssignment(_) | GameError::StarterPackClaimed => {
                StatusCode::CONFLICT
            }
            GameError::CatalogueIncomplete(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}
