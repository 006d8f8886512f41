use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User row. `creation_date` is an RFC 3339 UTC string, stored as TEXT.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub creation_date: String,
}

/// Message row, owned by a user. Per-user creation timestamps are
/// non-decreasing in insertion order; listings sort by (creation_date, id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub body: String,
    pub creation_date: String,
}
