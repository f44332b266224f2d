/// Board Service Library
///
/// Posts and their comments stored in a document index, with keyword search and
/// paginated listing over both collections.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route wiring
/// - `models`: Post, Comment and pagination types
/// - `services`: Business logic layer
/// - `db`: Document store adapters and repositories
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
