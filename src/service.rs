//! Request handlers. Each operation is a single linear pipeline: validate the
//! input, look up the target record once, merge or mutate, save once.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::domain::{NewUser, UserId, UserPatch, UserRecord};
use crate::error::UserError;
use crate::merge::merge;
use crate::password::generate_password;
use crate::repository::UserRepository;
use crate::validation::{check_email, check_id, validate_new_user, validate_update};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Every stored record, deduplicated by full-record equality.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<HashSet<UserRecord>, UserError> {
        let users: HashSet<UserRecord> = self.repo.find_all().await?.into_iter().collect();
        debug!(user_count = users.len(), "Listed users");
        Ok(users)
    }

    /// Stores a new user with a generated password. Any client-supplied id or
    /// password is ignored.
    #[instrument(fields(user_email = %new_user.email), skip(self, new_user))]
    pub async fn create(&self, new_user: NewUser) -> Result<UserRecord, UserError> {
        validate_new_user(&new_user).map_err(|v| UserError::validation(v, &new_user))?;

        let NewUser {
            first_name,
            surname,
            email,
            allows_email,
            ..
        } = new_user;
        // presence checked by validation
        let record = UserRecord::new(
            first_name,
            surname,
            email,
            generate_password(),
            allows_email.unwrap_or_default(),
        );

        let saved = self.repo.save(record).await?;
        info!(user_id = ?saved.id, "User created");
        Ok(saved)
    }

    #[instrument(fields(user_email = %email), skip(self, email))]
    pub async fn get_by_email(&self, email: &str) -> Result<UserRecord, UserError> {
        if let Some(violation) = check_email(email) {
            return Err(UserError::validation(vec![violation], &json!({ "email": email })));
        }

        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::email_not_found(email))?;
        debug!(user_id = ?user.id, "User found");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<UserRecord, UserError> {
        self.find_user(id).await
    }

    /// Applies a partial update. Blank or absent fields keep their stored
    /// values; an empty patch re-saves the record unchanged.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<UserRecord, UserError> {
        let existing = self.find_user(id).await?;

        let merged = merge(existing, patch.clone());
        validate_update(&patch, &merged).map_err(|v| UserError::validation(v, &patch))?;

        let saved = self.repo.save(merged).await?;
        info!("User updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), UserError> {
        ensure_valid_id(id)?;

        if !self.repo.delete_by_id(id).await? {
            return Err(UserError::id_not_found(id));
        }
        info!("User deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_email(&self, id: UserId) -> Result<String, UserError> {
        Ok(self.find_user(id).await?.email)
    }

    #[instrument(skip(self))]
    pub async fn get_email_preference(&self, id: UserId) -> Result<bool, UserError> {
        Ok(self.find_user(id).await?.allows_email)
    }

    /// Overwrites the email preference unconditionally, `false` included.
    #[instrument(skip(self))]
    pub async fn set_email_preference(
        &self,
        id: UserId,
        allows_email: bool,
    ) -> Result<UserRecord, UserError> {
        let mut user = self.find_user(id).await?;
        user.allows_email = allows_email;

        let saved = self.repo.save(user).await?;
        info!("Email preference updated");
        Ok(saved)
    }

    async fn find_user(&self, id: UserId) -> Result<UserRecord, UserError> {
        ensure_valid_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::id_not_found(id))
    }
}

fn ensure_valid_id(id: UserId) -> Result<(), UserError> {
    match check_id(id) {
        Some(violation) => Err(UserError::validation(vec![violation], &json!({ "userId": id }))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::clients::UserClient;
    use crate::mock_framework::{
        create_mock_client, expect_delete, expect_find_by_key, expect_get, expect_list,
        expect_save,
    };
    use crate::validation::Field;
    use tokio::sync::mpsc;

    fn mock_service() -> (UserService, mpsc::Receiver<ResourceRequest<UserRecord>>) {
        let (client, receiver) = create_mock_client::<UserRecord>(10);
        let service = UserService::new(Arc::new(UserClient::new(client)));
        (service, receiver)
    }

    fn stored() -> UserRecord {
        UserRecord::new("A", "Old", "a@b.com", "original-password", true).with_id(1)
    }

    fn violated_fields(err: &UserError) -> Vec<Field> {
        match err {
            UserError::Validation { violations, .. } => {
                violations.iter().map(|v| v.field()).collect()
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_all_deduplicates_records() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.list_all().await });

        let responder = expect_list(&mut rx).await.expect("Expected List");
        responder.send(Ok(vec![stored(), stored()])).unwrap();

        let users = task.await.unwrap().unwrap();
        assert_eq!(users.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn create_generates_password_and_ignores_client_id() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move {
            let new_user = NewUser {
                id: Some(99),
                password: Some("x".to_string()),
                ..NewUser::new("user", "one", "u1@email.com", true)
            };
            service.create(new_user).await
        });

        let (record, responder) = expect_save(&mut rx).await.expect("Expected Save");
        assert_eq!(record.id, None);
        assert_eq!(record.password.len(), 20);
        assert_ne!(record.password, "x");
        responder.send(Ok(record.clone().with_id(1))).unwrap();

        let created = task.await.unwrap().unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.first_name, "user");
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_store() {
        let (service, mut rx) = mock_service();

        let new_user = NewUser::new("", "one", "not-an-email", true);
        let err = service.create(new_user).await.unwrap_err();

        assert_eq!(violated_fields(&err), vec![Field::FirstName, Field::Email]);
        match err {
            UserError::Validation { request, .. } => {
                assert_eq!(request["email"], "not-an-email");
                assert!(request.get("password").is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn get_by_email_validates_format_first() {
        let (service, mut rx) = mock_service();

        let err = service.get_by_email("").await.unwrap_err();
        assert_eq!(violated_fields(&err), vec![Field::Email]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn get_by_email_reports_missing_user() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.get_by_email("nobody@email.com").await });

        let (key, responder) = expect_find_by_key(&mut rx).await.expect("Expected FindByKey");
        assert_eq!(key, "nobody@email.com");
        responder.send(Ok(None)).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "No user found with email address: nobody@email.com");
    }

    #[tokio::test]
    async fn get_by_id_rejects_non_positive_ids() {
        let (service, mut rx) = mock_service();

        let err = service.get_by_id(0).await.unwrap_err();
        assert_eq!(violated_fields(&err), vec![Field::Id]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_reads_once_then_saves_merged_record() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move {
            service
                .update(1, UserPatch::default().surname("New"))
                .await
        });

        let (id, responder) = expect_get(&mut rx).await.expect("Expected Get");
        assert_eq!(id, 1);
        responder.send(Ok(Some(stored()))).unwrap();

        let (record, responder) = expect_save(&mut rx).await.expect("Expected Save");
        assert_eq!(record.first_name, "A");
        assert_eq!(record.surname, "New");
        assert_eq!(record.email, "a@b.com");
        assert!(record.allows_email);
        responder.send(Ok(record)).unwrap();

        task.await.unwrap().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_update_resaves_unchanged_record() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.update(1, UserPatch::default()).await });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Ok(Some(stored()))).unwrap();

        let (record, responder) = expect_save(&mut rx).await.expect("Expected Save");
        assert_eq!(record, stored());
        responder.send(Ok(record)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), stored());
    }

    #[tokio::test]
    async fn update_with_bad_email_is_not_saved() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move {
            service
                .update(1, UserPatch::default().email("broken"))
                .await
        });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Ok(Some(stored()))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(violated_fields(&err), vec![Field::Email]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_with_non_positive_body_id_is_not_saved() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move {
            service
                .update(1, UserPatch::default().id(-5).surname("X"))
                .await
        });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Ok(Some(stored()))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(violated_fields(&err), vec![Field::Id]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.update(5, UserPatch::default()).await });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Ok(None)).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, UserError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_issues_exactly_one_write() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.delete(2).await });

        let (id, responder) = expect_delete(&mut rx).await.expect("Expected Delete");
        assert_eq!(id, 2);
        responder.send(Ok(true)).unwrap();

        task.await.unwrap().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn delete_of_missing_user_is_not_found() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.delete(5).await });

        let (_, responder) = expect_delete(&mut rx).await.expect("Expected Delete");
        responder.send(Ok(false)).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "User with ID 5 not found");
    }

    #[tokio::test]
    async fn set_preference_overwrites_with_false() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.set_email_preference(1, false).await });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Ok(Some(stored()))).unwrap();

        let (record, responder) = expect_save(&mut rx).await.expect("Expected Save");
        assert!(!record.allows_email);
        responder.send(Ok(record)).unwrap();

        assert!(!task.await.unwrap().unwrap().allows_email);
    }

    #[tokio::test]
    async fn store_faults_propagate_unclassified() {
        let (service, mut rx) = mock_service();
        let task = tokio::spawn(async move { service.get_email(1).await });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected Get");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(!err.is_classified());
    }
}
