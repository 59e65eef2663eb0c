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

use crate::dsn::ConnectDescriptor;
use crate::nls_lang::ClientEnv;
use crate::Error;
use crate::Result;
use clap::ValueEnum;
use oracle::Connection;

/// What to do with a test table after a check finishes
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Cleanup {
    /// Drops the table on every exit path.
    Always,

    /// Keeps the table so that its contents can be inspected after the run.
    #[value(name = "leave")]
    LeaveForInspection,
}

/// Opens a session after establishing the client environment.
///
/// `client_env` is applied first because the Oracle client reads `NLS_LANG`
/// only when it is initialized by the first connection in the process.
pub fn connect(descriptor: &ConnectDescriptor, client_env: &ClientEnv) -> Result<Connection> {
    client_env.apply();
    tracing::debug!(descriptor = %descriptor, "connecting");
    descriptor
        .connector()
        .connect()
        .map_err(|source| Error::Connect {
            target: descriptor.to_string(),
            source,
        })
}

/// Drops `table`, ignoring any error such as ORA-00942 (table or view does not exist).
pub fn drop_table_quietly(conn: &Connection, table: &str) {
    let sql = format!("drop table {}", table);
    if let Err(err) = conn.execute(&sql, &[]) {
        tracing::debug!(table = table, error = %err, "ignored drop failure");
    }
}

/// Drops a table when going out of scope.
///
/// The drop is best-effort. Nothing is done for [`Cleanup::LeaveForInspection`].
pub struct TableGuard<'conn> {
    conn: &'conn Connection,
    table: &'conn str,
    cleanup: Cleanup,
}

impl<'conn> TableGuard<'conn> {
    pub fn new(conn: &'conn Connection, table: &'conn str, cleanup: Cleanup) -> TableGuard<'conn> {
        TableGuard {
            conn,
            table,
            cleanup,
        }
    }
}

impl Drop for TableGuard<'_> {
    fn drop(&mut self) {
        match self.cleanup {
            Cleanup::Always => drop_table_quietly(self.conn, self.table),
            Cleanup::LeaveForInspection => {
                tracing::info!(table = self.table, "table left for inspection")
            }
        }
    }
}
