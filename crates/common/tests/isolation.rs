//! Cross-tenant isolation and concurrent mutation tests

mod common;

use std::sync::Arc;
use std::thread;

use ::common::auth::AuthConfig;
use ::common::prelude::*;
use serde_json::json;

#[test]
fn foreign_principal_is_forbidden_regardless_of_path_existence() {
    let stash = common::setup_stash();
    let (_, bucket) = common::setup_bucket(&stash, "owner@x.com", "b");
    let (intruder, _) = common::register(&stash, "intruder@x.com");

    stash.docs().write(bucket.id, "/exists", json!(1)).unwrap();

    // the gate fires before storage is touched, so a present and an absent
    // path look identical to the wrong principal
    for _path in ["/exists", "/missing"] {
        assert!(matches!(
            stash.registry().get_for_access(bucket.id, intruder.id),
            Err(RegistryError::Forbidden(_))
        ));
    }
}

#[test]
fn same_path_in_different_buckets_is_independent() {
    let stash = common::setup_stash();
    let (_, b1) = common::setup_bucket(&stash, "a@x.com", "b1");
    let (_, b2) = common::setup_bucket(&stash, "b@x.com", "b2");

    stash.docs().write(b1.id, "/shared", json!("one")).unwrap();
    stash.docs().write(b2.id, "/shared", json!("two")).unwrap();

    assert_eq!(stash.docs().read(b1.id, "/shared").unwrap().payload, json!("one"));
    assert_eq!(stash.docs().read(b2.id, "/shared").unwrap().payload, json!("two"));

    stash.docs().delete(b1.id, "/shared").unwrap();
    assert!(stash.docs().read(b2.id, "/shared").is_ok());
}

#[test]
fn concurrent_registrations_of_one_login_yield_one_winner() {
    let stash = Arc::new(Stash::new(AuthConfig::generate()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let stash = stash.clone();
            thread::spawn(move || {
                stash
                    .auth()
                    .register("race@x.com", "pw", &format!("Racer {i}"))
                    .is_ok()
            })
        })
        .collect();

    let wins: usize = handles
        .into_iter()
        .map(|h| h.join().unwrap() as usize)
        .sum();
    assert_eq!(wins, 1);
}

#[test]
fn concurrent_writers_leave_a_consistent_item_count() {
    let stash = Arc::new(Stash::new(AuthConfig::generate()));
    let (owner, _) = stash.auth().register("writer@x.com", "pw", "W").unwrap();
    let bucket = stash.create_bucket(owner.id, "hot", None, None).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let stash = stash.clone();
            let bucket_id = bucket.id;
            thread::spawn(move || {
                for i in 0..25 {
                    stash
                        .docs()
                        .write(bucket_id, &format!("/w{worker}/doc{i}"), json!(i))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let listed = stash.docs().list(bucket.id).unwrap();
    let meta = stash.registry().get_for_access(bucket.id, owner.id).unwrap();
    assert_eq!(listed.len(), 8 * 25);
    assert_eq!(meta.item_count, 8 * 25);
}

#[test]
fn concurrent_overwrites_of_one_path_never_corrupt_the_count() {
    let stash = Arc::new(Stash::new(AuthConfig::generate()));
    let (owner, _) = stash.auth().register("clash@x.com", "pw", "C").unwrap();
    let bucket = stash.create_bucket(owner.id, "clash", None, None).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let stash = stash.clone();
            let bucket_id = bucket.id;
            thread::spawn(move || {
                for i in 0..50 {
                    stash
                        .docs()
                        .write(bucket_id, "/contended", json!({"worker": worker, "i": i}))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let meta = stash.registry().get_for_access(bucket.id, owner.id).unwrap();
    assert_eq!(meta.item_count, 1);
    assert_eq!(stash.docs().list(bucket.id).unwrap().len(), 1);
}
