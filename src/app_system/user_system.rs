use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::UserRecord;
use crate::service::UserService;

use super::SystemError;

/// The application system: owns the user store actor and hands out the
/// service that fronts it.
pub struct UserSystem {
    pub service: UserService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    /// Starts the store actor. Must be called from within a tokio runtime.
    #[instrument(name = "user_system")]
    pub fn new(channel_capacity: usize) -> Self {
        info!("Starting user system");

        let id_counter = Arc::new(AtomicI64::new(1));
        let next_user_id = move || id_counter.fetch_add(1, Ordering::SeqCst);

        let (user_actor, user_resource_client) =
            ResourceActor::<UserRecord>::new(channel_capacity, next_user_id);
        let user_handle = tokio::spawn(user_actor.run());

        let service = UserService::new(Arc::new(UserClient::new(user_resource_client)));

        info!("User system started");
        Self {
            service,
            handles: vec![user_handle],
        }
    }

    /// Stops the store actor and waits for it to finish.
    ///
    /// The actor exits once every client is gone, so any clone of
    /// [`UserService`] still alive elsewhere (for example inside a router)
    /// must be dropped first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down user system");

        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("User system shutdown complete");
        Ok(())
    }
}
