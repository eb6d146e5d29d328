//! Database layer
//!
//! SQLite storage for reconciled accounts:
//! - Schema creation
//! - Connection and transaction handling
//! - Account queries

pub mod models;
pub mod schema;
pub mod connection;
pub mod queries;

pub use connection::Database;
pub use models::*;
