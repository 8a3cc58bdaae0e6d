pub mod test_consumers;
pub mod test_guc_value;

use crate::*;
use once_cell::sync::Lazy;

pub const LEGACY_PREFIX: &str = "documentdb";
pub const NEW_PREFIX: &str = "documentdb_core";

/// Registry holding the testing tunables, registered once for the whole test binary.
pub static TEST_REGISTRY: Lazy<GucRegistry> = Lazy::new(|| {
    let registry = GucRegistry::new();
    initialize_test_configurations(&registry, LEGACY_PREFIX, NEW_PREFIX)
        .expect("test configurations should register");
    registry
});

pub fn legacy_name(suffix: &str) -> String {
    format!("{}.{}", LEGACY_PREFIX, suffix)
}

pub fn new_name(suffix: &str) -> String {
    format!("{}.{}", NEW_PREFIX, suffix)
}
