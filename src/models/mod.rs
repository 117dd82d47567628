//! Data models for the team members backend.
//!
//! Wire names are camelCase to match the consuming frontend contract.

mod blocks;
mod datastore;
mod member;

pub use blocks::*;
pub use datastore::*;
pub use member::*;
