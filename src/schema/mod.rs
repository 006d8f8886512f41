//! GraphQL schema assembly

pub mod message;
pub mod user;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::services::{MessageService, UserService};

/// Root query object
#[derive(MergedObject, Default)]
pub struct QueryRoot(user::UserQuery, message::MessageQuery);

/// Root mutation object
#[derive(MergedObject, Default)]
pub struct MutationRoot(user::UserMutation, message::MessageMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services injected as context data
pub fn build_schema(users: UserService, messages: MessageService) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(users)
    .data(messages)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::{RateLimitConfig, SlidingWindowLimiter};
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    #[tokio::test]
    async fn schema_exposes_contract_surface() {
        // connect_lazy never touches the network, so the schema can be
        // inspected without a database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/board")
            .expect("lazy pool");
        let limiter = Arc::new(SlidingWindowLimiter::new(RateLimitConfig::default()));
        let schema = build_schema(
            UserService::new(pool.clone()),
            MessageService::new(pool, limiter),
        );

        let sdl = schema.sdl();
        assert!(sdl.contains("listUsers"));
        assert!(sdl.contains("listAllMessages"));
        assert!(sdl.contains("listMessagesForUser"));
        assert!(sdl.contains("createUser"));
        assert!(sdl.contains("postMessage"));
        assert!(sdl.contains("numberOfPosts"));
        assert!(sdl.contains("previousPostedMessage"));
        assert!(sdl.contains("nextPostedMessage"));
    }
}
