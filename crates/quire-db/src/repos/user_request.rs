//! User registration requests: submit, list, approve, reject.
//!
//! Approval materializes the user and records who let them in, atomically.

use chrono::Utc;
use quire_core::entities::{LogEntryDraft, UserRequest};
use quire_core::enums::{EntityKind, EventKind, RequestStatus};
use quire_core::errors::CoreError;
use quire_core::ids::{PREFIX_USER, PREFIX_USER_REQUEST};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::service::QuireService;

const SELECT_COLS: &str = "id, username, email, status, created_at, processed_at, processed_by";

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;

fn row_to_request(row: &libsql::Row) -> Result<UserRequest, DatabaseError> {
    Ok(UserRequest {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        processed_at: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
        processed_by: get_opt_string(row, 6)?,
    })
}

fn validate_submission(username: &str, email: &str, credential: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(CoreError::Validation(format!(
            "username must be {USERNAME_MIN} to {USERNAME_MAX} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '.' | '-'))
    {
        return Err(CoreError::Validation(
            "username may only contain letters, digits, '_', '@', '.', '-'".into(),
        ));
    }
    let email_len = email.chars().count();
    if email_len == 0 || email_len > EMAIL_MAX || !email.contains('@') {
        return Err(CoreError::Validation(format!(
            "email must be 1 to {EMAIL_MAX} characters and contain '@'"
        )));
    }
    if credential.is_empty() {
        return Err(CoreError::Validation("credential must not be empty".into()));
    }
    Ok(())
}

impl QuireService {
    /// Submit a registration request.
    ///
    /// The credential is stored as given and never returned.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for malformed input; `CoreError::Conflict` when
    /// a pending request or an active user already holds the username.
    pub async fn create_user_request(
        &self,
        username: &str,
        email: &str,
        credential: &str,
    ) -> Result<UserRequest, DatabaseError> {
        validate_submission(username, email, credential)?;

        if self.has_pending_request(username).await? {
            return Err(CoreError::Conflict(format!("AlreadyExistingRequest: {username}")).into());
        }
        if self.is_username_taken(username).await? {
            return Err(CoreError::Conflict(format!("AlreadyExistingUsername: {username}")).into());
        }

        let now = self.clock().now();
        let id = self.db().generate_id(PREFIX_USER_REQUEST).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO user_requests (id, username, email, credential, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    username,
                    email,
                    credential,
                    RequestStatus::Pending.as_str(),
                    format_datetime(&now)
                ],
            )
            .await?;

        tracing::info!(id = %id, username, "user request submitted");
        Ok(UserRequest {
            id,
            username: username.to_string(),
            email: email.to_string(),
            status: RequestStatus::Pending,
            created_at: now,
            processed_at: None,
            processed_by: None,
        })
    }

    /// Pending requests, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list_pending_user_requests(&self) -> Result<Vec<UserRequest>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM user_requests
                     WHERE status = ?1 ORDER BY created_at ASC, id ASC"
                ),
                [RequestStatus::Pending.as_str()],
            )
            .await?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            requests.push(row_to_request(&row)?);
        }
        Ok(requests)
    }

    /// # Errors
    ///
    /// `CoreError::NotFound` when no request has this id.
    pub async fn get_user_request(&self, id: &str) -> Result<UserRequest, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM user_requests WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| CoreError::NotFound {
            entity_type: "user request".into(),
            id: id.to_string(),
        })?;
        row_to_request(&row)
    }

    /// Approve a pending request: create the user, record a `User`/`CREATE`
    /// entry by `operator_id`, and close the request, all in one transaction.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidTransition` unless the request is pending;
    /// `CoreError::Conflict` if the username was taken meanwhile.
    pub async fn approve_user_request(
        &self,
        id: &str,
        operator_id: &str,
    ) -> Result<UserRequest, DatabaseError> {
        let current = self.get_user_request(id).await?;
        check_transition(&current, RequestStatus::Approved)?;
        if self.is_username_taken(&current.username).await? {
            return Err(
                CoreError::Conflict(format!("AlreadyExistingUsername: {}", current.username)).into(),
            );
        }

        let tx = self.db().conn().transaction().await?;

        let user_id = generate_id_on(&tx, PREFIX_USER).await?;
        let now = self.clock().now();
        tx.execute(
            "INSERT INTO users (id, username, email, role, credential, created_at)
             SELECT ?1, username, email, 'user', credential, ?2
             FROM user_requests WHERE id = ?3",
            libsql::params![user_id.as_str(), format_datetime(&now), id],
        )
        .await?;

        self.record_in(
            &tx,
            &LogEntryDraft::new(operator_id, user_id.as_str(), EntityKind::User, EventKind::Create)
                .with_message(current.username.clone()),
        )
        .await?;

        let processed_at = self.clock().now();
        close_request(&tx, id, RequestStatus::Approved, operator_id, &processed_at).await?;
        tx.commit().await?;

        tracing::info!(id, user_id = %user_id, operator_id, "user request approved");
        Ok(UserRequest {
            status: RequestStatus::Approved,
            processed_at: Some(processed_at),
            processed_by: Some(operator_id.to_string()),
            ..current
        })
    }

    /// Reject a pending request.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidTransition` unless the request is pending.
    pub async fn reject_user_request(
        &self,
        id: &str,
        operator_id: &str,
    ) -> Result<UserRequest, DatabaseError> {
        let current = self.get_user_request(id).await?;
        check_transition(&current, RequestStatus::Rejected)?;

        let processed_at = self.clock().now();
        close_request(
            self.db().conn(),
            id,
            RequestStatus::Rejected,
            operator_id,
            &processed_at,
        )
        .await?;

        tracing::info!(id, operator_id, "user request rejected");
        Ok(UserRequest {
            status: RequestStatus::Rejected,
            processed_at: Some(processed_at),
            processed_by: Some(operator_id.to_string()),
            ..current
        })
    }

    async fn has_pending_request(&self, username: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM user_requests WHERE username = ?1 AND status = ?2",
                [username, RequestStatus::Pending.as_str()],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn is_username_taken(&self, username: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM users WHERE username = ?1 AND deleted_at IS NULL",
                [username],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

fn check_transition(current: &UserRequest, next: RequestStatus) -> Result<(), CoreError> {
    if current.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity_type: "user request".into(),
            id: current.id.clone(),
            from: current.status.to_string(),
            to: next.to_string(),
        })
    }
}

/// Move a pending request to a terminal state. Fails if it is no longer pending.
async fn close_request(
    conn: &libsql::Connection,
    id: &str,
    status: RequestStatus,
    operator_id: &str,
    processed_at: &chrono::DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE user_requests
             SET status = ?1, processed_at = ?2, processed_by = ?3
             WHERE id = ?4 AND status = ?5",
            libsql::params![
                status.as_str(),
                format_datetime(processed_at),
                operator_id,
                id,
                RequestStatus::Pending.as_str()
            ],
        )
        .await?;
    if changed == 0 {
        return Err(CoreError::InvalidTransition {
            entity_type: "user request".into(),
            id: id.to_string(),
            from: "non-pending".into(),
            to: status.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_core::query::{PageRequest, Sort};
    use quire_core::scope::SearchScope;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{Fixture, test_service};

    #[rstest]
    #[case::too_short("ab", "a@b.c", "pw")]
    #[case::too_long("xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", "a@b.c", "pw")]
    #[case::bad_char("bob smith", "a@b.c", "pw")]
    #[case::no_at("bobby", "bob.example.com", "pw")]
    #[case::empty_email("bobby", "", "pw")]
    #[case::long_email("bobby", "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee@x.io", "pw")]
    #[case::empty_credential("bobby", "b@x.io", "")]
    #[tokio::test]
    async fn invalid_submissions_are_rejected(
        #[case] username: &str,
        #[case] email: &str,
        #[case] credential: &str,
    ) {
        let svc = test_service().await;
        let result = svc.create_user_request(username, email, credential).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn create_and_list_pending() {
        let svc = test_service().await;
        let first = svc
            .create_user_request("carol", "carol@example.com", "secret")
            .await
            .unwrap();
        let second = svc
            .create_user_request("dave.o-k_1@x", "dave@example.com", "secret")
            .await
            .unwrap();

        assert!(first.id.starts_with("urq-"));
        assert_eq!(first.status, RequestStatus::Pending);

        let pending = svc.list_pending_user_requests().await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert_eq!(svc.get_user_request(&first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn duplicate_pending_request_conflicts() {
        let svc = test_service().await;
        svc.create_user_request("carol", "c@x.io", "pw").await.unwrap();
        let err = svc
            .create_user_request("carol", "other@x.io", "pw")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AlreadyExistingRequest"));
    }

    #[tokio::test]
    async fn existing_username_conflicts() {
        let svc = test_service().await;
        Fixture::new(&svc).user("usr-c", "carol", false).await;
        let err = svc
            .create_user_request("carol", "c@x.io", "pw")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AlreadyExistingUsername"));
    }

    #[tokio::test]
    async fn approve_creates_user_and_logs_it() {
        let svc = test_service().await;
        let fx = Fixture::new(&svc);
        fx.user("usr-op", "root", true).await;
        let request = svc
            .create_user_request("carol", "carol@example.com", "secret")
            .await
            .unwrap();

        let approved = svc.approve_user_request(&request.id, "usr-op").await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.processed_by.as_deref(), Some("usr-op"));
        assert_eq!(svc.get_user_request(&request.id).await.unwrap(), approved);
        assert!(svc.list_pending_user_requests().await.unwrap().is_empty());

        let page = svc
            .search(
                &SearchScope::actor("usr-op", false),
                Sort::default(),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        let entry = &page.entries[0];
        assert_eq!(entry.entity_kind, EntityKind::User);
        assert_eq!(entry.event_kind, EventKind::Create);
        assert_eq!(entry.actor_name, "root");
        assert_eq!(
            svc.display_name_of(&entry.entity_id).await.unwrap().as_deref(),
            Some("carol")
        );
        assert!(!svc.is_operator(&entry.entity_id).await.unwrap());
    }

    #[tokio::test]
    async fn reject_closes_request_without_user() {
        let svc = test_service().await;
        let request = svc
            .create_user_request("carol", "carol@example.com", "secret")
            .await
            .unwrap();

        let rejected = svc.reject_user_request(&request.id, "usr-op").await.unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert!(rejected.processed_at.is_some());

        // The username is free again.
        assert!(
            svc.create_user_request("carol", "carol@example.com", "secret")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn terminal_requests_cannot_transition() {
        let svc = test_service().await;
        let request = svc
            .create_user_request("carol", "carol@example.com", "secret")
            .await
            .unwrap();
        svc.reject_user_request(&request.id, "usr-op").await.unwrap();

        for result in [
            svc.approve_user_request(&request.id, "usr-op").await,
            svc.reject_user_request(&request.id, "usr-op").await,
        ] {
            assert!(matches!(
                result,
                Err(DatabaseError::Core(CoreError::InvalidTransition { .. }))
            ));
        }
    }

    #[tokio::test]
    async fn approve_fails_when_username_taken_meanwhile() {
        let svc = test_service().await;
        let fx = Fixture::new(&svc);
        let request = svc
            .create_user_request("carol", "carol@example.com", "secret")
            .await
            .unwrap();
        fx.user("usr-c", "carol", false).await;

        let result = svc.approve_user_request(&request.id, "usr-op").await;
        assert!(matches!(
            result,
            Err(DatabaseError::Core(CoreError::Conflict(_)))
        ));
        assert_eq!(
            svc.get_user_request(&request.id).await.unwrap().status,
            RequestStatus::Pending
        );
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.approve_user_request("urq-404", "usr-op").await,
            Err(DatabaseError::Core(CoreError::NotFound { .. }))
        ));
    }
}
