pub use std::fmt::Debug;
pub use std::hash::Hash;
pub use std::sync::Arc;
pub use derive_more::Deref;
pub use indexmap::Equivalent;

pub use crate::error::Error;

// ==============
// === Errors ===
// ==============

pub type Result<T=(), E=Error> = std::result::Result<T, E>;

// ===============
// === Default ===
// ===============

pub fn default<T: Default>() -> T {
    T::default()
}
