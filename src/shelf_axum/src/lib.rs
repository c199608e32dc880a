//! Axum integration for the shelf API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  shelf_core: AuthRequest / AuthValidator │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  shelf_axum                              │
//! │  - AxumRequest newtype over request head │
//! │  - require_auth gate middleware          │
//! │  - ApiResponse envelope and ApiError     │
//! │  - route handlers                        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Handlers are generic over [`ShelfState`], so the same routes run against
//! Postgres or in-memory stores.

pub mod adapters;
pub mod error;
pub mod gate;
pub mod response;
pub mod routes;
pub mod state;

pub use adapters::AxumRequest;
pub use error::ApiError;
pub use gate::require_auth;
pub use response::{ApiResponse, ErrorBody, FieldDetail};
pub use state::{AppState, ShelfState};
