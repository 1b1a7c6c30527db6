//! # Catalog Security
//! 
//! Security utilities: JWT issuing/validation and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService, Realm, TokenPair};
pub use password::{PasswordError, PasswordService};
