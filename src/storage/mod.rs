//! Storage module for health profiles.
//!
//! The metrics engine never touches storage directly. Callers resolve the
//! current user's profile through a `ProfileRepository` and hand the result
//! (or its absence) to the engine.
//!
//! ## Backends
//!
//! - **InMemoryStore**: Fast, ephemeral storage for testing
//! - **FileStore**: JSON file-based persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novacare::storage::{InMemoryStore, KeyValueProfileStore, ProfileRepository};
//!
//! let profiles = KeyValueProfileStore::new(InMemoryStore::new());
//! let profile = profiles.get_profile(&"u-1".into())?;
//! ```

pub mod backend;
pub mod profiles;

pub use backend::*;
pub use profiles::*;
