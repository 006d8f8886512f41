/// User service - creation and lookups
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::idgen;
use crate::models::User;
use sqlx::PgPool;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user. The email must not already be in use; the unique
    /// constraint on users.email catches the race the lookup cannot.
    pub async fn create_user(&self, name: &str, email: &str) -> ApiResult<User> {
        if db::users::find_by_email(&self.pool, email).await?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        let id = idgen::new_id();
        let creation_date = idgen::now_timestamp();
        let user = db::users::insert_user(&self.pool, &id, name, email, &creation_date).await?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResult<Option<User>> {
        db::users::find_by_id(&self.pool, user_id).await
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        db::users::list_users(&self.pool).await
    }
}
