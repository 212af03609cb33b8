//! orguser_core - functional core for managing users in a remote org.
//!
//! Everything here is either a pure function or a trait describing an I/O
//! seam. The `orguser_cli` crate supplies the concrete HTTP client and file
//! stores.

pub mod batch;
pub mod identity;
pub mod password;
pub mod permissions;
pub mod platform;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
