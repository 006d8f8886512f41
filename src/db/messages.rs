/// Message database operations
///
/// Listings order by creation timestamp ascending with the message id as an
/// explicit tiebreaker, so equal timestamps still yield a stable order.
use crate::error::ApiResult;
use crate::models::Message;
use sqlx::{PgPool, Row};

/// Insert a new message row and return it
pub async fn insert_message(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    body: &str,
    creation_date: &str,
) -> ApiResult<Message> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, "userId", body, "creationDate")
        VALUES ($1, $2, $3, $4)
        RETURNING id, "userId" AS user_id, body, "creationDate" AS creation_date
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(body)
    .bind(creation_date)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// All messages, oldest first
pub async fn list_all(pool: &PgPool) -> ApiResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, "userId" AS user_id, body, "creationDate" AS creation_date
        FROM messages
        ORDER BY "creationDate" ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// All messages for one user, oldest first
pub async fn list_for_user(pool: &PgPool, user_id: &str) -> ApiResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, "userId" AS user_id, body, "creationDate" AS creation_date
        FROM messages
        WHERE "userId" = $1
        ORDER BY "creationDate" ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Count messages for one user
pub async fn count_for_user(pool: &PgPool, user_id: &str) -> ApiResult<i64> {
    let row = sqlx::query(r#"SELECT COUNT(*) AS count FROM messages WHERE "userId" = $1"#)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
