use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::domain::UserRecord;

/// Structured wrapper returned by mutating and lookup-by-key operations.
///
/// Absent parts are omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info_set: Option<HashSet<UserRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_details: Option<Value>,
}

impl ResponseEnvelope {
    pub fn success() -> Self {
        Self {
            is_success: true,
            user_info: None,
            user_info_set: None,
            errors: None,
            request_details: None,
        }
    }

    pub fn with_user(user: UserRecord) -> Self {
        Self {
            user_info: Some(user),
            ..Self::success()
        }
    }

    pub fn with_users(users: HashSet<UserRecord>) -> Self {
        Self {
            user_info_set: Some(users),
            ..Self::success()
        }
    }

    pub fn failure(errors: Vec<String>, request_details: Option<Value>) -> Self {
        Self {
            is_success: false,
            user_info: None,
            user_info_set: None,
            errors: Some(errors),
            request_details,
        }
    }
}
