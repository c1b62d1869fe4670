use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier of a user record.
pub type UserId = i64;

/// Represents a user stored in the directory.
///
/// `id` is `None` only for a record that has not been saved yet; the store
/// assigns it on the first save and it never changes afterwards.
///
/// The password is never serialized and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub allows_email: bool,
}

impl UserRecord {
    /// Creates an unsaved record.
    ///
    /// # Notes
    /// The `id` is left unset and will be assigned by the store.
    pub fn new(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        allows_email: bool,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            surname: surname.into(),
            email: email.into(),
            password: password.into(),
            allows_email,
        }
    }

    #[allow(dead_code)]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("allows_email", &self.allows_email)
            .finish()
    }
}

/// Payload for creating a new user.
///
/// Missing or `null` text fields deserialize as empty strings so that
/// validation can report them. `id` and `password` are accepted on the wire but never used:
/// the store assigns the id and the password is always generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub surname: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_email: Option<bool>,
}

impl NewUser {
    #[allow(dead_code)]
    pub fn new(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        allows_email: bool,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            surname: surname.into(),
            email: email.into(),
            password: None,
            allows_email: Some(allows_email),
        }
    }
}

/// Partial update for an existing user.
///
/// A field left as `None` keeps the stored value. A text field set to a
/// blank string also keeps the stored value; an update cannot clear a field.
/// `id` is only checked for positivity and never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_email: Option<bool>,
}

#[allow(dead_code)]
impl UserPatch {
    pub fn id(mut self, value: UserId) -> Self {
        self.id = Some(value);
        self
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn surname(mut self, value: impl Into<String>) -> Self {
        self.surname = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn allows_email(mut self, value: bool) -> Self {
        self.allows_email = Some(value);
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
