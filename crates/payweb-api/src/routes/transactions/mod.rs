//! Transaction routes - sortable table with pagination
//!
//! Structure:
//! - api.rs: JSON API endpoint
//! - page.rs: Full page and HTMX partial rendering

pub mod api;
pub mod page;

pub use api::api_transactions;
pub use page::page_transactions;
