//! # Shelf - Book management API with bearer-token authentication
//!
//! Facade crate re-exporting the public API of every layer.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Book`, `PageRequest`, etc.
//! - **Ports**: `UserStore`, `BookStore`, `PasswordHasher`, `TokenService`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ResolveIdentityUseCase`, etc.
//! - **Adapters**: `Argon2Hasher`, `JwtTokenService`, `PostgresUserStore`, etc.
//! - **HTTP**: Axum routes, the `require_auth` gate and the response envelope
//! - **Service**: `ShelfService` - the assembled router

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use shelf_core::*;
}

pub use shelf_core::{
    AuthContext, Book, BookId, BookSummary, DisplayName, Email, Page, PageInfo, PageRequest,
    Password, PasswordHash, Role, User, UserId, UserSummary,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use shelf_core::{BookStore, BookStoreError, UserStore, UserStoreError};
}

pub use shelf_core::{
    BookStore, BookStoreError, PasswordHasher, TokenService, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use shelf_application::*;
}

pub use shelf_application::{
    AuthError, BookError, GetProfileUseCase, LoginUseCase, RegisterUseCase, ResolveIdentityUseCase,
    UserManagementError,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use shelf_adapters::persistence::*;
    }

    /// Password hashing and the JWT scheme
    pub mod authentication {
        pub use shelf_adapters::authentication::*;
    }

    /// JWT issuing and bearer validation
    pub mod auth {
        pub use shelf_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use shelf_adapters::config::*;
    }
}

pub use shelf_adapters::{
    Argon2Hasher, BearerTokenValidator, HashMapBookStore, HashMapUserStore, JwtAuthConfig,
    JwtScheme, JwtTokenService, PostgresBookStore, PostgresUserStore,
};

// ============================================================================
// HTTP (Axum)
// ============================================================================

/// Axum routes, gate and response envelope
pub mod http {
    pub use shelf_axum::*;
}

pub use shelf_axum::{ApiError, ApiResponse, AppState, ShelfState};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use shelf_service::{ShelfService, configure_postgresql, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
