//! User schema and resolvers

use async_graphql::{
    ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject,
};
use serde::{Deserialize, Serialize};

use crate::services::{MessageService, UserService};

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[graphql(complex)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub creation_date: String,
}

impl From<crate::models::User> for User {
    fn from(user: crate::models::User) -> Self {
        User {
            id: user.id,
            name: user.name,
            email: user.email,
            creation_date: user.creation_date,
        }
    }
}

#[ComplexObject]
impl User {
    /// Count of messages this user has posted
    async fn number_of_posts(&self, ctx: &Context<'_>) -> GraphQLResult<i32> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let count = messages
            .count_for_user(&self.id)
            .await
            .map_err(|e| e.extend())?;

        Ok(count as i32)
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// All users, in creation order
    async fn list_users(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<User>> {
        let users = ctx
            .data::<UserService>()
            .map_err(|_| "User service not available")?;

        let users = users.list_users().await.map_err(|e| e.extend())?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a user with a not-yet-registered email
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
    ) -> GraphQLResult<User> {
        let users = ctx
            .data::<UserService>()
            .map_err(|_| "User service not available")?;

        let user = users
            .create_user(&name, &email)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.into())
    }
}
