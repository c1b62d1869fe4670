use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be kept by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The id, or `None` if the store has not assigned one yet.
    fn id(&self) -> Option<&Self::Id>;

    /// Stamps a freshly assigned id onto an unsaved record.
    fn assign_id(&mut self, id: Self::Id);

    /// Secondary key that must be unique across the store, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// Failures raised by the store itself, as opposed to domain outcomes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Unique key already in use: {key}")]
    Conflict { key: String },
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindByKey {
        key: String,
        respond_to: Response<Option<T>>,
    },
    Save {
        item: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single-owner store. All reads and writes are serialized through its
/// mailbox, so each request sees a consistent view of the records and the
/// unique-key index.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    keys: HashMap<String, T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            keys: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::FindByKey { key, respond_to } => {
                    let item = self
                        .keys
                        .get(&key)
                        .and_then(|id| self.store.get(id))
                        .cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Save { item, respond_to } => {
                    let _ = respond_to.send(self.save(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.delete(&id)));
                }
            }
        }

        info!("ResourceActor stopped");
    }

    fn save(&mut self, mut item: T) -> Result<T, FrameworkError> {
        if let (Some(key), Some(owner)) = (item.unique_key(), self.key_owner(&item)) {
            if item.id() != Some(owner) {
                warn!(%owner, "Unique key already held by another record");
                return Err(FrameworkError::Conflict {
                    key: key.to_string(),
                });
            }
        }

        let id = match item.id() {
            Some(id) => id.clone(),
            None => {
                let id = (self.next_id_fn)();
                item.assign_id(id.clone());
                id
            }
        };

        if let Some(previous) = self.store.get(&id) {
            if let Some(old_key) = previous.unique_key() {
                self.keys.remove(old_key);
            }
        }
        if let Some(key) = item.unique_key() {
            self.keys.insert(key.to_string(), id.clone());
        }
        self.store.insert(id.clone(), item.clone());

        debug!(%id, "Record saved");
        Ok(item)
    }

    fn delete(&mut self, id: &T::Id) -> bool {
        match self.store.remove(id) {
            Some(item) => {
                if let Some(key) = item.unique_key() {
                    self.keys.remove(key);
                }
                debug!(%id, "Record deleted");
                true
            }
            None => false,
        }
    }

    fn key_owner(&self, item: &T) -> Option<&T::Id> {
        item.unique_key().and_then(|key| self.keys.get(key))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::List { respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::Get { id, respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn find_by_key(&self, key: String) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::FindByKey { key, respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn save(&self, item: T) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::Save { item, respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ResourceRequest::Delete { id, respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    async fn send(&self, request: ResourceRequest<T>) -> Result<(), FrameworkError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
