//! Account registration and login.
//! - `auth::domain` holds the account aggregate and request/response shapes.
//! - Hashing, token signing and storage sit behind traits so use cases can be
//!   exercised with in-memory stand-ins.
//! - The sea-orm account store is behind the `seaorm` feature.

pub mod auth;
