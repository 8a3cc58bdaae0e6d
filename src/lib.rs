//! # DocumentDB runtime tunables
//!
//! Declares the catalog of test-oriented tunables used by the DocumentDB
//! extension and hosts them in a configuration registry with PostgreSQL GUC
//! semantics:
//!
//! - every tunable is bound to a process-wide storage cell ([`GucSetting`])
//! - clients change values for their own session only ([`GucSession`])
//! - hidden tunables stay out of `SHOW ALL` and the sample configuration but
//!   remain addressable by exact name
//!
//! ```ignore
//! use documentdb_gucs::*;
//!
//! let registry = GucRegistry::new();
//! initialize_test_configurations(&registry, "documentdb", "documentdb_core")?;
//!
//! let session = registry.new_session();
//! session.set_config("documentdb.maxWorkerCursorSize", "65536")?;
//! assert_eq!(session.get(&MAX_WORKER_CURSOR_SIZE), 65536);
//! ```

#![deny(clippy::all)]
#![deny(unused_must_use)]

#[macro_use]
mod guc_error;

mod consumers;
mod guc_definition;
mod guc_registry;
mod guc_session;
mod guc_setting;
mod guc_value;
mod startup_lock;
mod testing_configs;

pub use consumers::*;
pub use guc_definition::*;
pub use guc_error::*;
pub use guc_registry::*;
pub use guc_session::*;
pub use guc_setting::*;
pub use guc_value::*;
pub use startup_lock::*;
pub use testing_configs::*;


pub use std::borrow::ToOwned;
pub use std::collections::btree_map::BTreeMap;
pub use std::collections::btree_set::BTreeSet;
pub use std::collections::hash_map::HashMap;
pub use std::fmt;
pub use std::str::FromStr;
pub use std::string::{String, ToString};
pub use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
pub use std::sync::Arc;
pub use std::vec::Vec;

#[allow(unused_imports)]
use cfg_if::*;
use enumset::*;
use parking_lot::*;
use serde::*;
use static_assertions::*;
use thiserror::Error as ThisError;
use tracing::*;

pub fn documentdb_gucs_version_string() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}
