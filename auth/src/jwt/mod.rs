//! HS256 signing and verification of fixed-field claims.

pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
