//! Integration tests for bucket creation, listing, and the access gate

mod common;

use ::common::prelude::*;

#[test]
fn create_assigns_fresh_ids_and_zero_items() {
    let stash = common::setup_stash();
    let (principal, _) = common::register(&stash, "a@x.com");

    let b1 = stash.create_bucket(principal.id, "b1", None, None).unwrap();
    let b2 = stash.create_bucket(principal.id, "b1", None, None).unwrap();

    // names need not be unique; ids must be
    assert_ne!(b1.id, b2.id);
    assert_eq!(b1.item_count, 0);
    assert_eq!(b1.durability, DurabilityClass::Standard);
    assert_eq!(b1.region, "local");
}

#[test]
fn caller_supplied_class_and_region_are_kept() {
    let stash = common::setup_stash();
    let (principal, _) = common::register(&stash, "a@x.com");

    let bucket = stash
        .create_bucket(
            principal.id,
            "tiered",
            Some(DurabilityClass::Custom("glacial".to_string())),
            Some("eu-west".to_string()),
        )
        .unwrap();

    assert_eq!(
        bucket.durability,
        DurabilityClass::Custom("glacial".to_string())
    );
    assert_eq!(bucket.region, "eu-west");
}

#[test]
fn list_returns_owned_buckets_in_creation_order() {
    let stash = common::setup_stash();
    let (alice, _) = common::register(&stash, "alice@x.com");
    let (bob, _) = common::register(&stash, "bob@x.com");

    let b1 = stash.create_bucket(alice.id, "first", None, None).unwrap();
    stash.create_bucket(bob.id, "noise", None, None).unwrap();
    let b2 = stash.create_bucket(alice.id, "second", None, None).unwrap();

    let listed = stash.registry().list(alice.id).unwrap();
    let ids: Vec<_> = listed.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![b1.id, b2.id]);
}

#[test]
fn list_for_bucketless_principal_is_empty_not_an_error() {
    let stash = common::setup_stash();
    let (principal, _) = common::register(&stash, "empty@x.com");

    let listed = stash.registry().list(principal.id).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn access_gate_distinguishes_missing_from_foreign() {
    let stash = common::setup_stash();
    let (owner, bucket) = common::setup_bucket(&stash, "owner@x.com", "b");
    let (other, _) = common::register(&stash, "other@x.com");

    assert!(stash.registry().get_for_access(bucket.id, owner.id).is_ok());
    assert!(matches!(
        stash.registry().get_for_access(common::stranger(), owner.id),
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        stash.registry().get_for_access(bucket.id, other.id),
        Err(RegistryError::Forbidden(_))
    ));
}

#[test]
fn stats_sum_over_owned_buckets() {
    let stash = common::setup_stash();
    let (principal, _) = common::register(&stash, "a@x.com");

    let b1 = stash.create_bucket(principal.id, "b1", None, None).unwrap();
    let b2 = stash.create_bucket(principal.id, "b2", None, None).unwrap();

    stash
        .docs()
        .write(b1.id, "/x", serde_json::json!(1))
        .unwrap();
    stash
        .docs()
        .write(b2.id, "/y", serde_json::json!(2))
        .unwrap();
    stash
        .docs()
        .write(b2.id, "/z", serde_json::json!(3))
        .unwrap();

    let stats = stash.stats(principal.id).unwrap();
    assert_eq!(stats.bucket_count, 2);
    assert_eq!(stats.item_count, 3);
}
