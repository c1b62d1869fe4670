use crate::actor_framework::Entity;
use crate::domain::{UserId, UserRecord};

impl Entity for UserRecord {
    type Id = UserId;

    fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    /// Email addresses are unique across the directory, compared exactly as
    /// stored.
    fn unique_key(&self) -> Option<&str> {
        Some(self.email.as_str())
    }
}
