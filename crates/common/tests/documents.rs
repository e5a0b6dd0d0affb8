//! Integration tests for document write, read, delete, and listing

mod common;

use std::time::Duration;

use ::common::prelude::*;
use serde_json::json;

#[test]
fn write_then_read_returns_the_same_payload() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    let payload = json!({"n": 1, "nested": {"list": [1, 2, 3]}});
    stash.docs().write(bucket.id, "/u/1", payload.clone()).unwrap();

    let doc = stash.docs().read(bucket.id, "/u/1").unwrap();
    assert_eq!(doc.payload, payload);
}

#[test]
fn size_bytes_matches_serialized_payload() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    let meta = stash
        .docs()
        .write(bucket.id, "/doc", json!({"n": 1}))
        .unwrap();
    assert_eq!(meta.size_bytes, serde_json::to_vec(&json!({"n": 1})).unwrap().len() as u64);
}

#[test]
fn overwrite_preserves_created_at() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    let first = stash.docs().write(bucket.id, "/doc", json!("v1")).unwrap();
    std::thread::sleep(Duration::from_millis(5));
    let second = stash
        .docs()
        .write(bucket.id, "/doc", json!("version two"))
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_ne!(second.size_bytes, first.size_bytes);

    let doc = stash.docs().read(bucket.id, "/doc").unwrap();
    assert_eq!(doc.payload, json!("version two"));
}

#[test]
fn read_is_exact_match_only() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    stash.docs().write(bucket.id, "/u/1", json!(1)).unwrap();

    assert!(matches!(
        stash.docs().read(bucket.id, "/u"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        stash.docs().read(bucket.id, "/u/1/x"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn second_delete_of_the_same_path_is_not_found() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    stash.docs().write(bucket.id, "/u/1", json!(1)).unwrap();
    stash.docs().delete(bucket.id, "/u/1").unwrap();

    assert!(matches!(
        stash.docs().delete(bucket.id, "/u/1"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn empty_path_is_rejected() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    assert!(matches!(
        stash.docs().write(bucket.id, "", json!(1)),
        Err(StoreError::EmptyPath)
    ));
}

#[test]
fn unknown_bucket_is_bucket_not_found() {
    let stash = common::setup_stash();
    common::setup_bucket(&stash, "a@x.com", "b1");

    let ghost = common::stranger();
    assert!(matches!(
        stash.docs().write(ghost, "/x", json!(1)),
        Err(StoreError::BucketNotFound(_))
    ));
    assert!(matches!(
        stash.docs().list(ghost),
        Err(StoreError::BucketNotFound(_))
    ));
}

#[test]
fn item_count_tracks_live_documents_through_mutations() {
    let stash = common::setup_stash();
    let (owner, bucket) = common::setup_bucket(&stash, "a@x.com", "b1");

    let check = |expected: u64| {
        let meta = stash.registry().get_for_access(bucket.id, owner.id).unwrap();
        let listed = stash.docs().list(bucket.id).unwrap();
        assert_eq!(meta.item_count, expected);
        assert_eq!(listed.len() as u64, expected);
    };

    check(0);
    stash.docs().write(bucket.id, "/a", json!(1)).unwrap();
    check(1);
    stash.docs().write(bucket.id, "/b", json!(2)).unwrap();
    check(2);
    // overwrite does not grow the count
    stash.docs().write(bucket.id, "/a", json!(3)).unwrap();
    check(2);
    stash.docs().delete(bucket.id, "/a").unwrap();
    check(1);
    stash.docs().delete(bucket.id, "/b").unwrap();
    check(0);
}

#[test]
fn full_lifecycle_scenario() {
    let stash = common::setup_stash();

    let (principal, token) = stash.auth().register("a@x.com", "pw", "A").unwrap();
    let caller = stash.auth().authenticate(&token).unwrap();
    assert_eq!(caller, principal.id);

    let bucket = stash.create_bucket(caller, "b1", None, None).unwrap();
    stash.docs().write(bucket.id, "/u/1", json!({"n": 1})).unwrap();

    let doc = stash.docs().read(bucket.id, "/u/1").unwrap();
    assert_eq!(doc.payload, json!({"n": 1}));

    let listed = stash.docs().list(bucket.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, "/u/1");

    stash.docs().delete(bucket.id, "/u/1").unwrap();
    assert!(stash.docs().list(bucket.id).unwrap().is_empty());
    assert_eq!(
        stash
            .registry()
            .get_for_access(bucket.id, caller)
            .unwrap()
            .item_count,
        0
    );
}
