use async_trait::async_trait;

use crate::actor_framework::FrameworkError;
use crate::domain::{UserId, UserRecord};

/// Persistence contract the request handlers depend on.
///
/// Implementations are a single strongly-consistent store. `save` is the
/// commit point: it assigns an id to unsaved records and enforces email
/// uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UserRecord>, FrameworkError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, FrameworkError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, FrameworkError>;

    async fn save(&self, record: UserRecord) -> Result<UserRecord, FrameworkError>;

    /// Returns `false` when no record with `id` existed.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, FrameworkError>;
}
