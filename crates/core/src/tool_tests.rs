// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeMap;

#[test]
fn schema_rejects_missing_field() {
    let schema = InputSchema { required_fields: vec!["query"] };
    let err = schema.validate(&Value::Map(BTreeMap::new())).unwrap_err();
    assert!(err.contains("query"));
}

#[test]
fn schema_accepts_present_field() {
    let schema = InputSchema { required_fields: vec!["query"] };
    let mut map = BTreeMap::new();
    map.insert("query".to_string(), Value::String("hi".into()));
    assert!(schema.validate(&Value::Map(map)).is_ok());
}

#[test]
fn schema_rejects_non_map_input() {
    let schema = InputSchema { required_fields: vec![] };
    assert!(schema.validate(&Value::Null).is_err());
}
