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

use oracle_roundtrip::dsn::ConnectDescriptor;
use oracle_roundtrip::nls_lang::{ClientEnv, NlsLangPolicy};
use oracle_roundtrip::session;
use std::env;

pub const TEST_CONNECT_STRING_ENV: &str = "ORACLE_ROUNDTRIP_TEST_CONNECT_STRING";

fn env_var(env_name: &str) -> Option<String> {
    match env::var_os(env_name) {
        Some(env_var) => Some(env_var.into_string().unwrap()).filter(|s| !s.is_empty()),
        None => None,
    }
}

/// Returns `None` when no test database is configured.
pub fn connect_descriptor() -> Option<ConnectDescriptor> {
    env_var(TEST_CONNECT_STRING_ENV).map(|s| s.parse().unwrap())
}

#[allow(dead_code)]
pub fn connect() -> Option<oracle::Connection> {
    let descriptor = connect_descriptor()?;
    let client_env = ClientEnv::from_process(NlsLangPolicy::Apply);
    Some(session::connect(&descriptor, &client_env).unwrap())
}

/// Number of tables named `table` in the current schema
#[allow(dead_code)]
pub fn table_count(conn: &oracle::Connection, table: &str) -> u32 {
    conn.query_row_as::<u32>(
        "select count(*) from user_tables where table_name = upper(:1)",
        &[&table],
    )
    .unwrap()
}

macro_rules! connect_or_skip {
    () => {
        match common::connect() {
            Some(conn) => conn,
            None => {
                eprintln!(
                    "skipped: set {} to user/password@connect_string to run this test",
                    common::TEST_CONNECT_STRING_ENV
                );
                return;
            }
        }
    };
}
