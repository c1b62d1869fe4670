use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{UserId, UserRecord};
use crate::repository::UserRepository;

/// Client for interacting with the user store actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<UserRecord>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<UserRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl UserRepository for UserClient {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<UserRecord>, FrameworkError> {
        debug!("Sending request");
        self.inner.list().await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, FrameworkError> {
        debug!("Sending request");
        self.inner.get(id).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, FrameworkError> {
        debug!("Sending request");
        self.inner.find_by_key(email.to_string()).await
    }

    #[instrument(skip(self, record), fields(user_id = ?record.id))]
    async fn save(&self, record: UserRecord) -> Result<UserRecord, FrameworkError> {
        debug!("Sending request");
        self.inner.save(record).await
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: UserId) -> Result<bool, FrameworkError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
