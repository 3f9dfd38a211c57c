//! Security primitives.
//!
//! Currently only password hashing for registered nicknames.

pub mod password;

pub use password::{PasswordError, PasswordPolicy};
