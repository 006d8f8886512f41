/// User database operations
use crate::error::ApiResult;
use crate::models::User;
use sqlx::PgPool;

/// Insert a new user row and return it
pub async fn insert_user(
    pool: &PgPool,
    id: &str,
    name: &str,
    email: &str,
    creation_date: &str,
) -> ApiResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, "creationDate")
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, "creationDate" AS creation_date
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(creation_date)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Find user by ID
pub async fn find_by_id(pool: &PgPool, user_id: &str) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, "creationDate" AS creation_date
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> ApiResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, "creationDate" AS creation_date
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// All users in creation order
pub async fn list_users(pool: &PgPool) -> ApiResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, "creationDate" AS creation_date
        FROM users
        ORDER BY "creationDate" ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}
