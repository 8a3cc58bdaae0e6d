use super::*;
use crate::*;

pub fn test_simulated_recovery() {
    info!("test_simulated_recovery");

    let session = TEST_REGISTRY.new_session();
    ensure_writes_allowed(&session, "insert").expect("writes allowed by default");

    session
        .set_config(&legacy_name("simulateRecoveryState"), "true")
        .unwrap();
    let err = ensure_writes_allowed(&session, "insert").unwrap_err();
    assert_eq!(err, ConsumerError::read_only_recovery("insert"));
    assert_eq!(
        err.to_string(),
        "cannot execute insert in a read-only transaction: the server is in recovery"
    );

    // other sessions keep writing
    let other = TEST_REGISTRY.new_session();
    ensure_writes_allowed(&other, "update").expect("other session unaffected");

    session
        .reset(&legacy_name("simulateRecoveryState"))
        .unwrap();
    ensure_writes_allowed(&session, "insert").expect("writes allowed after reset");
}

pub fn test_collection_id_allocation() {
    info!("test_collection_id_allocation");

    let sequence = IdSequence::new(500);
    let session = TEST_REGISTRY.new_session();

    // unset: ids come from the sequence
    assert_eq!(allocate_collection_id(&session, &sequence).unwrap(), 500);
    assert_eq!(allocate_collection_id(&session, &sequence).unwrap(), 501);
    assert_eq!(session.get(&NEXT_COLLECTION_ID), NEXT_COLLECTION_ID_UNSET);

    // set: ids count up from the override, which tracks the next id
    session
        .set_config(&new_name("next_collection_id"), "1000")
        .unwrap();
    assert_eq!(allocate_collection_id(&session, &sequence).unwrap(), 1000);
    assert_eq!(allocate_collection_id(&session, &sequence).unwrap(), 1001);
    assert_eq!(session.get(&NEXT_COLLECTION_ID), 1002);
    assert_eq!(
        session.show(&new_name("next_collection_id")).unwrap(),
        "1002"
    );
    assert_eq!(sequence.peek(), 502);

    // the override never leaks into another session
    let other = TEST_REGISTRY.new_session();
    assert_eq!(allocate_collection_id(&other, &sequence).unwrap(), 502);

    // once the override cannot advance, allocation fails and keeps failing
    session.set(&NEXT_COLLECTION_ID, i32::MAX - 1).unwrap();
    assert_eq!(
        allocate_collection_id(&session, &sequence).unwrap(),
        (i32::MAX - 1) as i64
    );
    assert_eq!(session.get(&NEXT_COLLECTION_ID), i32::MAX);
    let name = new_name("next_collection_id");
    for _ in 0..2 {
        assert_eq!(
            allocate_collection_id(&session, &sequence),
            Err(GucError::out_of_range(
                &name,
                i32::MAX as i64 + 1,
                0,
                i32::MAX
            ))
        );
        assert_eq!(session.get(&NEXT_COLLECTION_ID), i32::MAX);
    }
    assert_eq!(sequence.peek(), 503);
}

pub fn test_collection_index_id_allocation() {
    info!("test_collection_index_id_allocation");

    let sequence = IdSequence::default();
    let session = TEST_REGISTRY.new_session();

    assert_eq!(allocate_collection_index_id(&session, &sequence).unwrap(), 1);

    session
        .set_config(&new_name("next_collection_index_id"), "7")
        .unwrap();
    assert_eq!(allocate_collection_index_id(&session, &sequence).unwrap(), 7);
    assert_eq!(allocate_collection_index_id(&session, &sequence).unwrap(), 8);
    assert_eq!(session.get(&NEXT_COLLECTION_INDEX_ID), 9);

    session
        .set_config(&new_name("next_collection_index_id"), "2147483647")
        .unwrap();
    assert!(matches!(
        allocate_collection_index_id(&session, &sequence),
        Err(GucError::OutOfRange { .. })
    ));

    // the collection id override is independent
    assert_eq!(session.get(&NEXT_COLLECTION_ID), NEXT_COLLECTION_ID_UNSET);
    assert_eq!(sequence.peek(), 2);
}

pub fn test_unique_index_keyhash() {
    info!("test_unique_index_keyhash");

    let session = TEST_REGISTRY.new_session();
    let inputs: [&[u8]; 4] = [b"", b"a", b"{\"_id\": 1}", &[0xffu8; 64]];

    let natural: Vec<i64> = inputs
        .iter()
        .map(|k| unique_index_keyhash(&session, k))
        .collect();
    assert_ne!(natural[1], natural[2]);
    // stable for the same key
    assert_eq!(unique_index_keyhash(&session, b"a"), natural[1]);

    session
        .set_config(&new_name("defaultUniqueIndexKeyhashOverride"), "42")
        .unwrap();
    for key in inputs {
        assert_eq!(unique_index_keyhash(&session, key), 42);
    }

    let other = TEST_REGISTRY.new_session();
    assert_eq!(unique_index_keyhash(&other, b"a"), natural[1]);
}

pub fn test_index_term_limits() {
    info!("test_index_term_limits");

    let session = TEST_REGISTRY.new_session();
    assert_eq!(
        index_term_limits(&session, false, 2000),
        IndexTermLimits {
            truncation_enabled: false,
            limit: 2000
        }
    );
    assert_eq!(
        index_term_limits(&session, true, 2000),
        IndexTermLimits {
            truncation_enabled: true,
            limit: 2000
        }
    );

    session
        .set_config(&legacy_name("forceIndexTermTruncation"), "on")
        .unwrap();
    session
        .set_config(&legacy_name("indexTermLimitOverride"), "100")
        .unwrap();
    assert_eq!(
        index_term_limits(&session, false, 2000),
        IndexTermLimits {
            truncation_enabled: true,
            limit: 100
        }
    );
}

pub fn test_worker_page_has_room() {
    info!("test_worker_page_has_room");

    let session = TEST_REGISTRY.new_session();
    assert!(worker_page_has_room(&session, 1024, 1024));
    assert!(worker_page_has_room(
        &session,
        BSON_MAX_ALLOWED_SIZE as usize - 10,
        10
    ));
    assert!(!worker_page_has_room(
        &session,
        BSON_MAX_ALLOWED_SIZE as usize - 10,
        11
    ));

    session
        .set_config(&legacy_name("maxWorkerCursorSize"), "100")
        .unwrap();
    assert!(worker_page_has_room(&session, 60, 40));
    assert!(!worker_page_has_room(&session, 60, 41));
    // the first document always fits
    assert!(worker_page_has_room(&session, 0, 1000));
}

pub fn test_all() {
    test_simulated_recovery();
    test_collection_id_allocation();
    test_collection_index_id_allocation();
    test_unique_index_keyhash();
    test_index_term_limits();
    test_worker_page_has_room();
}
