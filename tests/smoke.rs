// Oracle-roundtrip - Round-trip checks against Oracle database
//
// URL: https://github.com/kubo/rust-oracle
//
//-----------------------------------------------------------------------------
// Copyright (c) 2024 Kubo Takehiro <kubo@jiubao.org>. All rights reserved.
// This program is free software: you can modify it and/or redistribute it
// under the terms of:
//
// (i)  the Universal Permissive License v 1.0 or at your option, any
//      later version (http://oss.oracle.com/licenses/upl); and/or
//
// (ii) the Apache License v 2.0. (http://www.apache.org/licenses/LICENSE-2.0)
//-----------------------------------------------------------------------------

#[macro_use]
mod common;

use oracle_roundtrip::checks::smoke::{self, SMOKE_TABLE};
use serial_test::serial;

#[test]
#[serial]
fn instance_and_ddl() {
    let conn = connect_or_skip!();
    let report = smoke::run(&conn).unwrap();
    assert!(!report.instances.is_empty());
    for info in &report.instances {
        assert!(!info.instance_name.is_empty());
        assert!(!info.version.is_empty());
    }
    assert_eq!(common::table_count(&conn, SMOKE_TABLE), 0);
}

#[test]
#[serial]
fn create_failure_is_reported_first() {
    let conn = connect_or_skip!();
    conn.execute(&format!("create table {} (bar number)", SMOKE_TABLE), &[])
        .unwrap();
    let err = smoke::run(&conn).unwrap_err();
    assert_eq!(err.kind(), oracle_roundtrip::ErrorKind::Statement);
    assert!(err.to_string().contains("create table"), "{}", err);
    // the table not created by the check is kept
    assert_eq!(common::table_count(&conn, SMOKE_TABLE), 1);
    conn.execute(&format!("drop table {}", SMOKE_TABLE), &[])
        .unwrap();
}
