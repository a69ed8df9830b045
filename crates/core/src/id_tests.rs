// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("test");
}

#[test]
fn new_ids_are_unique() {
    let a = TestId::new();
    let b = TestId::new();
    assert_ne!(a, b);
}

#[test]
fn display_includes_kind_prefix() {
    let id = TestId::new();
    assert!(id.to_string().starts_with("test:"));
}

#[test]
fn round_trips_through_uuid() {
    let id = TestId::new();
    let parsed = TestId::from_uuid(id.as_uuid());
    assert_eq!(id, parsed);
}

#[test]
fn parse_rejects_garbage() {
    assert!(TestId::parse("not-a-uuid").is_err());
}

#[test]
fn short_truncates() {
    assert_eq!(short("abcdefghijklmnop", 8), "abcdefgh");
    assert_eq!(short("abc", 8), "abc");
}

#[test]
fn random_id_source_produces_distinct_uuids() {
    let src = RandomIdSource;
    assert_ne!(src.next_uuid(), src.next_uuid());
}
