//! axiom-web: HTTP API for the email frustration dashboard
//!
//! Exposes one [`DashboardController`](axiom_core::DashboardController) to
//! the presentation layer.
//!
//! # Routes
//!
//! - `GET /health`
//! - `GET /api/dashboard?filter=frustrated&q=refund`
//! - `POST /api/dashboard/refresh`
//! - `POST /api/logout`

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::router;
