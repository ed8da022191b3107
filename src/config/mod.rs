//! Configuration modules, loaded once from environment variables at
//! process start and never reloaded at runtime.
//!
//! - [`cors`]: allowed origins for browser clients
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: signing secret and token lifetime
//! - [`storage`]: external blob-store limits for uploaded references

pub mod cors;
pub mod database;
pub mod jwt;
pub mod storage;
