//! Field-level rules applied to inbound records before they reach the store.
//!
//! Every rule runs; callers get the full list of violations rather than the
//! first one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{NewUser, UserId, UserPatch, UserRecord};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email regex is valid")
});

/// Record fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    FirstName,
    Surname,
    Email,
    AllowsEmail,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::FirstName => "firstName",
            Field::Surname => "surname",
            Field::Email => "email",
            Field::AllowsEmail => "allowsEmail",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single broken rule. `Display` yields the message shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    Required(Field),
    Invalid { field: Field, reason: &'static str },
}

impl FieldViolation {
    #[allow(dead_code)]
    pub fn field(&self) -> Field {
        match self {
            FieldViolation::Required(field) => *field,
            FieldViolation::Invalid { field, .. } => *field,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldViolation::Required(Field::FirstName) => f.write_str("First Name must be provided"),
            FieldViolation::Required(Field::Surname) => f.write_str("Surname must be provided"),
            FieldViolation::Required(Field::AllowsEmail) => {
                f.write_str("Allows email must be provided")
            }
            FieldViolation::Required(field) => write!(f, "{field} must be provided"),
            FieldViolation::Invalid { reason, .. } => f.write_str(reason),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_names(first_name: &str, surname: &str, violations: &mut Vec<FieldViolation>) {
    if is_blank(first_name) {
        violations.push(FieldViolation::Required(Field::FirstName));
    }
    if is_blank(surname) {
        violations.push(FieldViolation::Required(Field::Surname));
    }
}

/// Checks an email address. Blank and malformed addresses are both reported
/// as `Invalid(email)`, with different reasons.
pub fn check_email(email: &str) -> Option<FieldViolation> {
    if is_blank(email) {
        Some(FieldViolation::Invalid {
            field: Field::Email,
            reason: "Email must be provided",
        })
    } else if !EMAIL_REGEX.is_match(email) {
        Some(FieldViolation::Invalid {
            field: Field::Email,
            reason: "Not a valid email",
        })
    } else {
        None
    }
}

pub fn check_id(id: UserId) -> Option<FieldViolation> {
    (id <= 0).then_some(FieldViolation::Invalid {
        field: Field::Id,
        reason: "ID must be a positive value",
    })
}

/// Validates a create payload.
pub fn validate_new_user(new_user: &NewUser) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if let Some(id) = new_user.id {
        violations.extend(check_id(id));
    }
    check_names(&new_user.first_name, &new_user.surname, &mut violations);
    violations.extend(check_email(&new_user.email));
    if new_user.allows_email.is_none() {
        violations.push(FieldViolation::Required(Field::AllowsEmail));
    }

    into_result(violations)
}

/// Validates a full record, such as the result of a merge.
pub fn validate_record(record: &UserRecord) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if let Some(id) = record.id {
        violations.extend(check_id(id));
    }
    check_names(&record.first_name, &record.surname, &mut violations);
    violations.extend(check_email(&record.email));

    into_result(violations)
}

/// Validates an update: the id carried in the patch, if any, and the merged
/// record that would be stored.
pub fn validate_update(patch: &UserPatch, merged: &UserRecord) -> Result<(), Vec<FieldViolation>> {
    let mut violations: Vec<FieldViolation> = patch.id.and_then(check_id).into_iter().collect();
    if let Err(record_violations) = validate_record(merged) {
        violations.extend(record_violations);
    }

    into_result(violations)
}

fn into_result(violations: Vec<FieldViolation>) -> Result<(), Vec<FieldViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
