//! # Mock Framework
//!
//! Utilities for testing code that talks to a [`ResourceClient`] without
//! running a [`ResourceActor`](crate::actor_framework::ResourceActor).
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! mailbox, then assert each request with the `expect_*` helpers and answer
//! it through the returned responder. Because every request has to be
//! answered explicitly, the helpers also pin down exactly how many store
//! calls an operation makes.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};

type Responder<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a lookup by unique key
pub async fn expect_find_by_key<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindByKey { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Save { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<UserRecord>(10);

        let save_task = tokio::spawn(async move {
            let user = UserRecord::new("Test", "User", "test@example.com", "pw", true);
            client.save(user).await
        });

        let (record, responder) = expect_save(&mut receiver).await.expect("Expected Save request");
        assert_eq!(record.first_name, "Test");
        responder.send(Ok(record.clone().with_id(1))).unwrap();

        let result = save_task.await.unwrap();
        assert_eq!(result.map(|user| user.id), Ok(Some(1)));
    }

    #[tokio::test]
    async fn unexpected_request_yields_none() {
        let (client, mut receiver) = create_mock_client::<UserRecord>(10);

        tokio::spawn(async move { client.delete(3).await });

        assert!(expect_get(&mut receiver).await.is_none());
    }
}
