//! Authentication utilities library
//!
//! Provides the token infrastructure shared by services:
//! - Fixed-field JWT claims and an HS256 handler
//! - A dual-secret codec for short-lived access and long-lived refresh tokens
//! - Stateless bearer authentication
//!
//! Refresh token persistence and rotation belong to the service that owns
//! the store; this crate only signs and verifies.
//!
//! # Examples
//!
//! ## Issuing and verifying tokens
//! ```
//! use auth::{TokenCodec, TokenSettings};
//!
//! let settings = TokenSettings::new(
//!     "access_secret_key_at_least_32_bytes!",
//!     "refresh_secret_key_at_least_32_bytes",
//! );
//! let codec = TokenCodec::new(&settings).unwrap();
//!
//! let pair = codec.issue("user123", "alice@example.com").unwrap();
//! let claims = codec.verify_access(&pair.access_token).unwrap();
//! assert_eq!(claims.user_id(), "user123");
//! assert!(codec.verify_access(&pair.refresh_token).is_err());
//! ```
//!
//! ## Authenticating a request
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, AuthenticationError, TokenCodec, TokenSettings};
//!
//! let settings = TokenSettings::new(
//!     "access_secret_key_at_least_32_bytes!",
//!     "refresh_secret_key_at_least_32_bytes",
//! );
//! let codec = Arc::new(TokenCodec::new(&settings).unwrap());
//! let authenticator = Authenticator::new(Arc::clone(&codec));
//!
//! let pair = codec.issue("user123", "alice@example.com").unwrap();
//! let header = format!("Bearer {}", pair.access_token);
//! let claims = authenticator.authenticate(Some(&header)).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//!
//! assert_eq!(
//!     authenticator.authenticate(None),
//!     Err(AuthenticationError::MissingCredential)
//! );
//! ```

pub mod authenticator;
pub mod jwt;
pub mod tokens;

// Re-export commonly used items
pub use authenticator::bearer_token;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use tokens::TokenCodec;
pub use tokens::TokenPair;
pub use tokens::TokenSettings;
