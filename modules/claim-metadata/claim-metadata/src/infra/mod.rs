//! Infrastructure layer for the claim metadata module.
//!
//! Contains the in-memory and cache-backed repository implementations.

pub mod storage;

pub use storage::ClaimRepositories;
