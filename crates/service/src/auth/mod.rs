//! Auth module: domain types, security primitives, storage port, use cases.
//!
//! `RegisterAccount` and `LoginAccount` are the two operations; `AuthService`
//! wires them to a repository, hasher and token issuer.

pub mod domain;
pub mod errors;
pub mod hasher;
pub mod login;
pub mod register;
pub mod repository;
pub mod service;
pub mod token;
pub mod validator;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use errors::AuthError;
pub use service::AuthService;
