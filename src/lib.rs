//! Address Book API - contacts, groups, and memberships over PostgreSQL.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities (Contact, Group, Membership)
//! - **services**: Orchestration of repository calls into use cases
//! - **infra**: Infrastructure concerns (database, repositories, migrations)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Contact, ContactWithGroups, Group, NewContact};
pub use errors::{AppError, AppResult, ValidationKind};
