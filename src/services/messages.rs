//! Message service - rate-limited posting and derived ordering
//!
//! `post_message` is the write path: validate the author, consult the
//! injected limiter, persist. Exactly one insert and at most one limiter
//! mutation per call; nothing is written when either validation fails.

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::idgen;
use crate::models::Message;
use crate::rate_limit::SlidingWindowLimiter;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
    limiter: Arc<SlidingWindowLimiter>,
}

impl MessageService {
    pub fn new(pool: PgPool, limiter: Arc<SlidingWindowLimiter>) -> Self {
        Self { pool, limiter }
    }

    /// Post a message for an existing user, subject to the posting limit.
    pub async fn post_message(&self, user_id: &str, body: &str) -> ApiResult<Message> {
        if db::users::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(ApiError::PostAuthorNotFound);
        }

        let now = Utc::now();
        if !self.limiter.check_and_record(user_id, now) {
            tracing::warn!(%user_id, "post rejected by rate limit");
            return Err(ApiError::RateLimitExceeded(self.limiter.max_posts()));
        }

        let id = idgen::new_id();
        let creation_date = idgen::format_timestamp(now);
        let message =
            db::messages::insert_message(&self.pool, &id, user_id, body, &creation_date).await?;

        tracing::info!(message_id = %message.id, %user_id, "message posted");
        Ok(message)
    }

    pub async fn list_all(&self) -> ApiResult<Vec<Message>> {
        db::messages::list_all(&self.pool).await
    }

    /// Messages for one user, oldest first. Fails when the user is unknown.
    pub async fn list_for_user(&self, user_id: &str) -> ApiResult<Vec<Message>> {
        if db::users::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        db::messages::list_for_user(&self.pool, user_id).await
    }

    pub async fn count_for_user(&self, user_id: &str) -> ApiResult<i64> {
        db::messages::count_for_user(&self.pool, user_id).await
    }

    /// Chronological neighbors of a message within its owner's list.
    pub async fn neighbors_of(
        &self,
        user_id: &str,
        message_id: &str,
    ) -> ApiResult<(Option<Message>, Option<Message>)> {
        let messages = db::messages::list_for_user(&self.pool, user_id).await?;
        Ok(neighbors(&messages, message_id))
    }
}

/// Locate `message_id` in the ascending list and return the adjacent
/// elements. Both sides are absent for a sole (or unknown) message.
pub fn neighbors(
    messages: &[Message],
    message_id: &str,
) -> (Option<Message>, Option<Message>) {
    let pos = match messages.iter().position(|m| m.id == message_id) {
        Some(pos) => pos,
        None => return (None, None),
    };

    let previous = if pos > 0 {
        Some(messages[pos - 1].clone())
    } else {
        None
    };
    let next = messages.get(pos + 1).cloned();

    (previous, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, creation_date: &str) -> Message {
        Message {
            id: id.to_string(),
            user_id: "u1".to_string(),
            body: format!("body {id}"),
            creation_date: creation_date.to_string(),
        }
    }

    #[test]
    fn middle_message_has_both_neighbors() {
        let list = vec![
            message("m1", "2024-01-01T00:00:00.000000Z"),
            message("m2", "2024-01-01T00:01:00.000000Z"),
            message("m3", "2024-01-01T00:02:00.000000Z"),
        ];

        let (previous, next) = neighbors(&list, "m2");
        assert_eq!(previous.map(|m| m.id), Some("m1".to_string()));
        assert_eq!(next.map(|m| m.id), Some("m3".to_string()));
    }

    #[test]
    fn boundaries_have_one_absent_side() {
        let list = vec![
            message("m1", "2024-01-01T00:00:00.000000Z"),
            message("m2", "2024-01-01T00:01:00.000000Z"),
        ];

        let (previous, next) = neighbors(&list, "m1");
        assert!(previous.is_none());
        assert_eq!(next.map(|m| m.id), Some("m2".to_string()));

        let (previous, next) = neighbors(&list, "m2");
        assert_eq!(previous.map(|m| m.id), Some("m1".to_string()));
        assert!(next.is_none());
    }

    #[test]
    fn sole_message_has_no_neighbors() {
        let list = vec![message("m1", "2024-01-01T00:00:00.000000Z")];

        let (previous, next) = neighbors(&list, "m1");
        assert!(previous.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn unknown_id_has_no_neighbors() {
        let list = vec![message("m1", "2024-01-01T00:00:00.000000Z")];

        let (previous, next) = neighbors(&list, "missing");
        assert!(previous.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn equal_timestamps_keep_list_order() {
        // Listing queries break timestamp ties by id; the scan inherits
        // that order rather than re-sorting.
        let list = vec![
            message("a", "2024-01-01T00:00:00.000000Z"),
            message("b", "2024-01-01T00:00:00.000000Z"),
            message("c", "2024-01-01T00:00:00.000000Z"),
        ];

        let (previous, next) = neighbors(&list, "b");
        assert_eq!(previous.map(|m| m.id), Some("a".to_string()));
        assert_eq!(next.map(|m| m.id), Some("c".to_string()));
    }
}
