//! Shared utilities:
//!
//! - [`codegen`]: generated subject codes, roll numbers, and usernames
//! - [`errors`]: application error type and handling
//! - [`grading`]: percentage-to-grade lookup
//! - [`jwt`]: token creation and verification
//! - [`password`]: bcrypt hashing and generated credentials

pub mod codegen;
pub mod errors;
pub mod grading;
pub mod jwt;
pub mod password;
