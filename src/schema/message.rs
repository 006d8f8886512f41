//! Message schema and resolvers
//!
//! `previousPostedMessage` / `nextPostedMessage` recompute the owner's
//! ordered message list on every resolution; acceptable at this scale, and
//! the backing query is index-friendly if that changes.

use async_graphql::{
    ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::{MessageService, UserService};

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[graphql(complex)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub body: String,
    pub creation_date: String,
}

impl From<crate::models::Message> for Message {
    fn from(message: crate::models::Message) -> Self {
        Message {
            id: message.id,
            user_id: message.user_id,
            body: message.body,
            creation_date: message.creation_date,
        }
    }
}

#[ComplexObject]
impl Message {
    /// The user who posted this message
    async fn user(&self, ctx: &Context<'_>) -> GraphQLResult<super::user::User> {
        let users = ctx
            .data::<UserService>()
            .map_err(|_| "User service not available")?;

        let user = users
            .get_user(&self.user_id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| ApiError::UserNotFound.extend())?;

        Ok(user.into())
    }

    /// The same user's message immediately before this one, if any
    async fn previous_posted_message(
        &self,
        ctx: &Context<'_>,
    ) -> GraphQLResult<Option<Message>> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let (previous, _) = messages
            .neighbors_of(&self.user_id, &self.id)
            .await
            .map_err(|e| e.extend())?;

        Ok(previous.map(Into::into))
    }

    /// The same user's message immediately after this one, if any
    async fn next_posted_message(&self, ctx: &Context<'_>) -> GraphQLResult<Option<Message>> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let (_, next) = messages
            .neighbors_of(&self.user_id, &self.id)
            .await
            .map_err(|e| e.extend())?;

        Ok(next.map(Into::into))
    }
}

#[derive(Default)]
pub struct MessageQuery;

#[Object]
impl MessageQuery {
    /// All messages, ordered by creation timestamp ascending
    async fn list_all_messages(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Message>> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let messages = messages.list_all().await.map_err(|e| e.extend())?;
        Ok(messages.into_iter().map(Into::into).collect())
    }

    /// Messages for one user, ordered by creation timestamp ascending
    async fn list_messages_for_user(
        &self,
        ctx: &Context<'_>,
        user_id: String,
    ) -> GraphQLResult<Vec<Message>> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let messages = messages
            .list_for_user(&user_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(messages.into_iter().map(Into::into).collect())
    }
}

#[derive(Default)]
pub struct MessageMutation;

#[Object]
impl MessageMutation {
    /// Post a message for an existing user, subject to the posting limit
    async fn post_message(
        &self,
        ctx: &Context<'_>,
        user_id: String,
        message_body: String,
    ) -> GraphQLResult<Message> {
        let messages = ctx
            .data::<MessageService>()
            .map_err(|_| "Message service not available")?;

        let message = messages
            .post_message(&user_id, &message_body)
            .await
            .map_err(|e| e.extend())?;

        Ok(message.into())
    }
}
