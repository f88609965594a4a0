//! # Redis Shortener
//!
//! A URL shortening service built with Axum and Redis, with a per-client
//! request quota.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link and quota entities
//! - **Application Layer** ([`application`]) - Quota tracking and code allocation
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value store port and its Redis and in-memory adapters
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or generated short codes, reserved atomically with `SET NX`
//! - Per-client quota that resets on a fixed window
//! - Expiring links (hours, default 24)
//! - Destination blocklist
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! export API_QUOTA=10
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

