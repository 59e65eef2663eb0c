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

//! The checks, run in order by [`run_all`].

pub mod data_types;
pub mod i18n;
pub mod smoke;

use crate::config::CheckOptions;
use crate::Result;
use oracle::Connection;

use self::data_types::DataTypesReport;
use self::smoke::SmokeReport;

/// Results of a complete run
#[derive(Debug, Clone)]
pub struct Summary {
    pub smoke: SmokeReport,
    pub i18n_rows: usize,
    pub data_types: DataTypesReport,
}

/// Runs the smoke, i18n and data type checks in this order.
///
/// The first error stops the run.
pub fn run_all(conn: &Connection, opts: &CheckOptions) -> Result<Summary> {
    let span = tracing::info_span!("check", name = "smoke");
    let smoke = span.in_scope(|| smoke::run(conn))?;

    let span = tracing::info_span!("check", name = "i18n");
    let i18n_rows = span.in_scope(|| i18n::run(conn, opts.i18n_cleanup))?;

    let span = tracing::info_span!("check", name = "data_types");
    let data_types = span.in_scope(|| {
        data_types::run(conn, opts.data_types_cleanup, opts.payload_repeat)
    })?;

    if !data_types.date_mismatches.is_empty() {
        tracing::warn!(
            count = data_types.date_mismatches.len(),
            "DATE values differed; fractional seconds are not stored"
        );
    }
    Ok(Summary {
        smoke,
        i18n_rows,
        data_types,
    })
}
