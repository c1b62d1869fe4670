use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::UserId;
use crate::envelope::ResponseEnvelope;
use crate::validation::FieldViolation;

/// Which lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Id,
    Email,
}

/// Errors that can occur during user operations.
///
/// `Validation` and `NotFound` are classified outcomes; everything else is
/// an unclassified fault.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User validation error: {}", join_messages(.violations))]
    Validation {
        violations: Vec<FieldViolation>,
        request: Value,
    },
    #[error("{}", not_found_message(.kind, .key))]
    NotFound { kind: LookupKind, key: String },
    #[error("User store error: {0}")]
    Store(#[from] FrameworkError),
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn not_found_message(kind: &LookupKind, key: &str) -> String {
    match kind {
        LookupKind::Id => format!("User with ID {key} not found"),
        LookupKind::Email => format!("No user found with email address: {key}"),
    }
}

impl UserError {
    /// Builds a validation failure, keeping the offending input for
    /// diagnostics.
    pub fn validation(violations: Vec<FieldViolation>, request: &impl Serialize) -> Self {
        Self::Validation {
            violations,
            request: serde_json::to_value(request).unwrap_or(Value::Null),
        }
    }

    pub fn id_not_found(id: UserId) -> Self {
        Self::NotFound {
            kind: LookupKind::Id,
            key: id.to_string(),
        }
    }

    pub fn email_not_found(email: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: LookupKind::Email,
            key: email.to_string(),
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, UserError::Store(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UserError::Validation { .. } => StatusCode::BAD_REQUEST,
            UserError::NotFound { .. } => StatusCode::NOT_FOUND,
            UserError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The response body for classified failures, `None` otherwise.
    pub fn into_envelope(self) -> Option<ResponseEnvelope> {
        match self {
            UserError::Validation {
                violations,
                request,
            } => {
                let errors = violations.iter().map(ToString::to_string).collect();
                Some(ResponseEnvelope::failure(errors, Some(request)))
            }
            err @ UserError::NotFound { .. } => {
                Some(ResponseEnvelope::failure(vec![err.to_string()], None))
            }
            UserError::Store(_) => None,
        }
    }
}
