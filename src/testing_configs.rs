//! Tunables that change behavior only tests rely on.

use super::*;

/// Largest document the store accepts, in bytes.
pub const BSON_MAX_ALLOWED_SIZE: i32 = 16 * 1024 * 1024;

/// Collection id override meaning "draw from the collection id sequence".
pub const NEXT_COLLECTION_ID_UNSET: i32 = 0;
/// Collection index id override meaning "draw from the index id sequence".
pub const NEXT_COLLECTION_INDEX_ID_UNSET: i32 = 0;

pub const DEFAULT_NEXT_COLLECTION_ID: i32 = NEXT_COLLECTION_ID_UNSET;
pub const DEFAULT_NEXT_COLLECTION_INDEX_ID: i32 = NEXT_COLLECTION_INDEX_ID_UNSET;
pub const DEFAULT_SIMULATE_RECOVERY_STATE: bool = false;
pub const DEFAULT_MAX_WORKER_CURSOR_SIZE: i32 = BSON_MAX_ALLOWED_SIZE;
pub const DEFAULT_ENABLE_CURSORS_ON_AGGREGATION_QUERY_REWRITE: bool = false;
pub const DEFAULT_ENABLE_GENERATE_NON_EXISTS_TERM: bool = true;
pub const DEFAULT_FORCE_INDEX_TERM_TRUNCATION: bool = false;
pub const DEFAULT_FORCE_ENABLE_NEW_UNIQUE_OPCLASS: bool = false;
pub const DEFAULT_INDEX_TERM_LIMIT_OVERRIDE: i32 = i32::MAX;
pub const DEFAULT_USE_LOCAL_EXECUTION_SHARD_QUERIES: bool = true;
pub const DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE: i32 = 0;

const_assert!(DEFAULT_MAX_WORKER_CURSOR_SIZE >= 1);
const_assert!(DEFAULT_MAX_WORKER_CURSOR_SIZE <= BSON_MAX_ALLOWED_SIZE);
const_assert!(DEFAULT_INDEX_TERM_LIMIT_OVERRIDE >= 1);
const_assert!(DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE >= 0);

pub static NEXT_COLLECTION_ID: GucSetting<i32> = GucSetting::new(DEFAULT_NEXT_COLLECTION_ID);
pub static NEXT_COLLECTION_INDEX_ID: GucSetting<i32> =
    GucSetting::new(DEFAULT_NEXT_COLLECTION_INDEX_ID);
pub static SIMULATE_RECOVERY_STATE: GucSetting<bool> =
    GucSetting::new(DEFAULT_SIMULATE_RECOVERY_STATE);
pub static MAX_WORKER_CURSOR_SIZE: GucSetting<i32> =
    GucSetting::new(DEFAULT_MAX_WORKER_CURSOR_SIZE);
pub static ENABLE_CURSORS_ON_AGGREGATION_QUERY_REWRITE: GucSetting<bool> =
    GucSetting::new(DEFAULT_ENABLE_CURSORS_ON_AGGREGATION_QUERY_REWRITE);
pub static ENABLE_GENERATE_NON_EXISTS_TERM: GucSetting<bool> =
    GucSetting::new(DEFAULT_ENABLE_GENERATE_NON_EXISTS_TERM);
pub static FORCE_INDEX_TERM_TRUNCATION: GucSetting<bool> =
    GucSetting::new(DEFAULT_FORCE_INDEX_TERM_TRUNCATION);
pub static FORCE_ENABLE_NEW_UNIQUE_OPCLASS: GucSetting<bool> =
    GucSetting::new(DEFAULT_FORCE_ENABLE_NEW_UNIQUE_OPCLASS);
pub static INDEX_TERM_LIMIT_OVERRIDE: GucSetting<i32> =
    GucSetting::new(DEFAULT_INDEX_TERM_LIMIT_OVERRIDE);
pub static USE_LOCAL_EXECUTION_SHARD_QUERIES: GucSetting<bool> =
    GucSetting::new(DEFAULT_USE_LOCAL_EXECUTION_SHARD_QUERIES);
pub static DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE_SETTING: GucSetting<i32> =
    GucSetting::new(DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE);

static TEST_CONFIGURATIONS_STARTUP: StartupLock = StartupLock::new();

/// Whether [`initialize_test_configurations`] has completed in this process.
pub fn test_configurations_registered() -> bool {
    TEST_CONFIGURATIONS_STARTUP.is_started()
}

/// Register the testing tunables.
///
/// `prefix` carries the legacy names and `new_guc_prefix` the newer ones.
/// Runs once per process: a second call is refused, and a failed call
/// installs nothing. A call made while another is in progress waits for it
/// and then either is refused or, if the first failed, registers in its place.
pub fn initialize_test_configurations(
    registry: &GucRegistry,
    prefix: &str,
    new_guc_prefix: &str,
) -> GucResult<()> {
    validate_guc_prefix(prefix)?;
    validate_guc_prefix(new_guc_prefix)?;

    let guard = TEST_CONFIGURATIONS_STARTUP
        .startup_wait()
        .map_err(|_| GucError::already_registered("test configurations"))?;

    let count = registry
        .with_definitions(|d| define_test_configurations(d, prefix, new_guc_prefix))
        .map_err(|e| {
            error!("failed to register test configurations: {}", e);
            e
        })?;

    guard.success();
    info!(
        "registered {} test configurations under '{}' and '{}'",
        count, prefix, new_guc_prefix
    );
    Ok(())
}

fn define_test_configurations(
    d: &mut GucDefiner,
    prefix: &str,
    new_guc_prefix: &str,
) -> GucResult<usize> {
    let hidden = GucFlag::NoShowAll | GucFlag::NotInSample;

    d.define_int_guc(
        &format!("{}.next_collection_id", new_guc_prefix),
        "Set the next collection id to use when creating a collection.",
        Some(
            "Collection ids are normally generated using a sequence. If \
             next_collection_id is set to a value different than the unset value, \
             collection ids are instead generated by incrementing from the value \
             of this setting, and the increment is reflected in the setting. This \
             keeps collection ids consistent when tests run in parallel.",
        ),
        &NEXT_COLLECTION_ID,
        DEFAULT_NEXT_COLLECTION_ID,
        DEFAULT_NEXT_COLLECTION_ID,
        i32::MAX,
        GucContext::Userset,
        hidden,
        GucHooks::none(),
    )?;

    d.define_int_guc(
        &format!("{}.next_collection_index_id", new_guc_prefix),
        "Set the next collection index id to use when creating a collection index.",
        Some(
            "Collection index ids are normally generated using a sequence. If \
             next_collection_index_id is set to a value different than the unset \
             value, collection index ids are instead generated by incrementing from \
             the value of this setting, and the increment is reflected in the \
             setting. This keeps collection index ids consistent when tests run in \
             parallel.",
        ),
        &NEXT_COLLECTION_INDEX_ID,
        DEFAULT_NEXT_COLLECTION_INDEX_ID,
        DEFAULT_NEXT_COLLECTION_INDEX_ID,
        i32::MAX,
        GucContext::Userset,
        hidden,
        GucHooks::none(),
    )?;

    d.define_bool_guc(
        &format!("{}.simulateRecoveryState", prefix),
        "Simulates a database recovery state and throws an error for read-write operations.",
        None,
        &SIMULATE_RECOVERY_STATE,
        DEFAULT_SIMULATE_RECOVERY_STATE,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    // used to test cursor continuations
    d.define_int_guc(
        &format!("{}.maxWorkerCursorSize", prefix),
        "The maximum size a single cursor response page should be in a worker.",
        None,
        &MAX_WORKER_CURSOR_SIZE,
        DEFAULT_MAX_WORKER_CURSOR_SIZE,
        1,
        BSON_MAX_ALLOWED_SIZE,
        GucContext::Userset,
        hidden,
        GucHooks::none(),
    )?;

    d.define_bool_guc(
        &format!("{}.enableCursorsOnAggregationQueryRewrite", new_guc_prefix),
        "Whether or not to add the cursors on aggregation style queries.",
        None,
        &ENABLE_CURSORS_ON_AGGREGATION_QUERY_REWRITE,
        DEFAULT_ENABLE_CURSORS_ON_AGGREGATION_QUERY_REWRITE,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    d.define_bool_guc(
        &format!("{}.enableGenerateNonExistsTerm", new_guc_prefix),
        "Enables generating the non exists term for new documents in a collection.",
        None,
        &ENABLE_GENERATE_NON_EXISTS_TERM,
        DEFAULT_ENABLE_GENERATE_NON_EXISTS_TERM,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    d.define_bool_guc(
        &format!("{}.forceIndexTermTruncation", prefix),
        "Whether to force the feature for index term truncation.",
        None,
        &FORCE_INDEX_TERM_TRUNCATION,
        DEFAULT_FORCE_INDEX_TERM_TRUNCATION,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    // Deprecated, test only. Do not use in production.
    d.define_bool_guc(
        &format!("{}.force_enable_new_unique_opclass", new_guc_prefix),
        "Testing setting on whether or not to enable the new opclass for large index keys on unique indexes.",
        None,
        &FORCE_ENABLE_NEW_UNIQUE_OPCLASS,
        DEFAULT_FORCE_ENABLE_NEW_UNIQUE_OPCLASS,
        GucContext::Userset,
        GucFlag::Deprecated.into(),
        GucHooks::none(),
    )?;

    d.define_int_guc(
        &format!("{}.indexTermLimitOverride", prefix),
        "Override for the index term truncation limit (primarily for tests).",
        None,
        &INDEX_TERM_LIMIT_OVERRIDE,
        DEFAULT_INDEX_TERM_LIMIT_OVERRIDE,
        1,
        i32::MAX,
        GucContext::Userset,
        hidden,
        GucHooks::none(),
    )?;

    d.define_bool_guc(
        &format!("{}.useLocalExecutionShardQueries", new_guc_prefix),
        "Determines whether or not to push local shard queries to the shard directly.",
        None,
        &USE_LOCAL_EXECUTION_SHARD_QUERIES,
        DEFAULT_USE_LOCAL_EXECUTION_SHARD_QUERIES,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    d.define_int_guc(
        &format!("{}.defaultUniqueIndexKeyhashOverride", new_guc_prefix),
        "Do not set this in production. Forces a single keyhash result value for testing hash conflicts on unique indexes that require a runtime recheck.",
        None,
        &DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE_SETTING,
        DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE,
        0,
        i32::MAX,
        GucContext::Userset,
        GucFlags::empty(),
        GucHooks::none(),
    )?;

    Ok(d.pending_count())
}
