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

use crate::error::StatementContext;
use crate::Result;
use chrono::NaiveDateTime;
use oracle::{Connection, RowValue, Version};

pub const INSTANCE_SQL: &str =
    "select instance_name, host_name, version, startup_time from v$instance";

pub const SMOKE_TABLE: &str = "tst_roundtrip_smoke";

/// A row of `v$instance`
#[derive(Debug, Clone, RowValue)]
pub struct InstanceInfo {
    pub instance_name: String,
    pub host_name: String,
    pub version: String,
    pub startup_time: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub instances: Vec<InstanceInfo>,
}

fn log_versions(conn: &Connection) {
    match Version::client() {
        Ok(ver) => tracing::info!("Oracle Client Version: {}", ver),
        Err(err) => tracing::warn!(error = %err, "cannot get client version"),
    }
    match conn.server_version() {
        Ok((ver, banner)) => {
            tracing::info!("Oracle Server Version: {}", ver);
            tracing::debug!("server banner: {}", banner);
        }
        Err(err) => tracing::warn!(error = %err, "cannot get server version"),
    }
}

/// Reads `v$instance` and runs a create/drop pair on a scratch table.
///
/// When `create table` fails its error is returned without trying
/// `drop table`; the name may belong to a table this program didn't create.
pub fn run(conn: &Connection) -> Result<SmokeReport> {
    log_versions(conn);

    let mut instances = Vec::new();
    let rows = conn.query_as::<InstanceInfo>(INSTANCE_SQL, &[]).sql_context(INSTANCE_SQL)?;
    for row_result in rows {
        let info = row_result.sql_context(INSTANCE_SQL)?;
        println!(
            "{} {} {} {}",
            info.instance_name, info.host_name, info.version, info.startup_time
        );
        instances.push(info);
    }

    let create_sql = format!("create table {} (bar varchar2(256))", SMOKE_TABLE);
    conn.execute(&create_sql, &[]).sql_context(&create_sql)?;
    let drop_sql = format!("drop table {}", SMOKE_TABLE);
    conn.execute(&drop_sql, &[]).sql_context(&drop_sql)?;

    Ok(SmokeReport { instances })
}
