// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kindle.
//!
//! This module contains the validation engine with no I/O. Documents
//! arrive already deserialized; the engine only reads them.
//!
//! ## Layers, leaves first
//!
//! - **Rules** ([`rules`]): pure checks on one scalar
//! - **Field validators**: `validate_*` methods on each entity
//! - **Entity validators**: [`Validate`] impls composing field validators
//! - **Walker** ([`validation`]): depth-first traversal with path tracking
//! - **Report** ([`report`]): ordered findings with severity and path
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod report;
pub mod rules;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    Config, Directory, Disk, Dropin, File, Filesystem, Group, Ignition, Link, Node, NodeGroup,
    NodeUser, Partition, Passwd, Resource, Storage, Systemd, Unit, User, Verification,
};

pub use error::ValidationKind;
pub use report::{ContextPath, Entry, PathSegment, Report, Severity};
pub use validation::{Validate, Walk, Walker, validate_config};
pub use value_objects::{DocumentId, FsFormat};
