//! API service layer for record and search operations
//!
//! This module contains the business logic behind the REST endpoints,
//! keeping the handlers in `rest_server` thin.

pub mod models;
mod records;
mod search;

pub use models::*;
pub use records::get_records;
pub use search::search_records;
