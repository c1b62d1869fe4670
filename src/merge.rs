use crate::domain::{UserPatch, UserRecord};

/// Applies `patch` onto `existing`, field by field.
///
/// A text field replaces the stored value only when it is present and not
/// blank. `allows_email` replaces the stored value whenever it is present.
/// The id is never touched.
pub fn merge(existing: UserRecord, patch: UserPatch) -> UserRecord {
    let UserPatch {
        first_name,
        surname,
        email,
        password,
        allows_email,
        ..
    } = patch;

    UserRecord {
        id: existing.id,
        first_name: overwrite_if_present(existing.first_name, first_name),
        surname: overwrite_if_present(existing.surname, surname),
        email: overwrite_if_present(existing.email, email),
        password: overwrite_if_present(existing.password, password),
        allows_email: allows_email.unwrap_or(existing.allows_email),
    }
}

fn overwrite_if_present(current: String, incoming: Option<String>) -> String {
    match incoming {
        Some(value) if !value.trim().is_empty() => value,
        _ => current,
    }
}
