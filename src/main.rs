use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use board_service::config::Config;
use board_service::rate_limit::{RateLimitConfig, SlidingWindowLimiter};
use board_service::schema::{build_schema, AppSchema};
use board_service::services::{MessageService, UserService};
use board_service::{db, logging};

async fn graphql_handler(schema: web::Data<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new("/")))
}

async fn health_handler(pool: web::Data<sqlx::PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "board-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "board-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    info!("Starting board-service...");

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let pool = db::init_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database pool ready, migrations applied");

    let limiter = Arc::new(SlidingWindowLimiter::new(RateLimitConfig {
        max_posts: config.rate_limit.max_posts,
        window: chrono::Duration::seconds(config.rate_limit.window_secs as i64),
    }));
    info!(
        "Posting limit: {} messages per {} seconds per user",
        config.rate_limit.max_posts, config.rate_limit.window_secs
    );

    // Idle users would otherwise hold window state forever
    let sweep_limiter = limiter.clone();
    let sweep_interval = Duration::from_secs(config.rate_limit.sweep_interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = sweep_limiter.prune_expired(chrono::Utc::now());
            if removed > 0 {
                tracing::debug!(removed, "pruned idle rate-limit entries");
            }
        }
    });

    let users = UserService::new(pool.clone());
    let messages = MessageService::new(pool.clone(), limiter);
    let schema = build_schema(users, messages);

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    info!("GraphQL server listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(pool.clone()))
            .route("/", web::post().to(graphql_handler))
            .route("/", web::get().to(playground_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
