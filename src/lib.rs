pub mod config;
pub mod db;
pub mod error;
pub mod idgen;
pub mod logging;
pub mod models;
pub mod rate_limit;
pub mod schema;
pub mod services;
