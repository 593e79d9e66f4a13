//! # Faqbot Gateway
//!
//! HTTP API around the matcher: `/health`, `/faqs`, `/api/message`, the
//! index page and static assets.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
