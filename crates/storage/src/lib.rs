//! Storage layer for Optimist
//!
//! This crate provides bounded in-memory caching and the profile cache
//! service built on top of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod profiles;

pub use cache::{CacheConfig, CacheError, MemoryCache};
pub use profiles::{normalize_email, ProfileCache, ProfileCacheConfig, ProfileSource, UserProfile};
