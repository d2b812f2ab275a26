//! # Core Module
//!
//! Concurrency primitives shared by the voxel storage types.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking.
//!   The chunk index uses one for its own state (the outer lock) and one per
//!   chunk (the inner lock).

pub mod mt_resource;

pub use mt_resource::MtResource;
