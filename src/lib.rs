//! gitclad
//!
//! Safe, deterministic bindings over the libgit2 engine.
//!
//! # Architecture
//!
//! Every native entity reachable from this crate is held behind a handle
//! that wraps the raw address, tracks ownership, and guarantees at-most-once
//! release. Public operations translate their arguments at the boundary,
//! call the engine synchronously on the caller's thread, check the integer
//! status before trusting any output, and decode failures into a structured
//! taxonomy.
//!
//! The layers, bottom up:
//!
//! - raw (private) - the extern surface: opaque handle types, constant
//!   tables, and function signatures
//! - [`runtime`] - one-time global initialization of the engine
//! - handle - ownership and release discipline for native addresses
//! - [`error`] - the status/side-channel translation and error taxonomy
//! - [`codec`] - symmetric enum and bit-flag conversion
//! - [`oid`] / buf - small value carriers crossing the boundary
//! - callback - the bridge that lets native foreach primitives drive
//!   managed closures without unwinding across the native frame
//! - [`object`] - resolution of generic objects into typed views
//! - [`repo`] - the repository context object and its children
//!
//! # Concurrency
//!
//! Context objects are `Send` in the sense that the native engine permits
//! moving them across threads, but operations are not internally
//! synchronized; concurrent release and use of one handle is resolved
//! safely (the loser observes a use-after-release failure) by the atomic
//! handle cell.
//!
//! # Example
//!
//! ```ignore
//! use gitclad::{ObjectKind, Repository};
//! use std::path::Path;
//!
//! let repo = Repository::open(Path::new("."))?;
//! let head = repo.head()?;
//! if let Some(id) = head.target()? {
//!     let object = repo.lookup_object(&id, ObjectKind::Any)?;
//!     println!("HEAD is {} ({:?})", id, object.kind());
//! }
//! ```

mod buf;
mod callback;
pub mod codec;
pub mod error;
mod handle;
pub mod object;
pub mod oid;
pub(crate) mod raw;
pub mod repo;
pub mod runtime;

pub use codec::{Features, InitFlags, InitMode, NativeEnum, OpenFlags};
pub use error::{Error, ErrorClass, ErrorCode};
pub use object::{Blob, Commit, GenericObject, Object, ObjectKind, Tag, Tree};
pub use oid::Oid;
pub use repo::{
    Config, Identity, Index, InitOptions, ItemPath, Odb, Refdb, Reference, ReferenceKind,
    RepoState, Repository,
};
pub use runtime::{features, version};
