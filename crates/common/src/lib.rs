//! Pieces shared by the server crate and the binary: logging setup and small
//! transport types.

pub mod types;
pub mod utils;
