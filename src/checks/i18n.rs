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

//! Multi-byte character set round trip.
//!
//! Strings in three scripts are embedded as literals in an `insert` statement
//! so that they go through the client character set conversion of SQL text,
//! not through bind buffers. They are then fetched and compared.

use crate::error::StatementContext;
use crate::session::{drop_table_quietly, Cleanup, TableGuard};
use crate::Error;
use crate::Result;
use once_cell::sync::Lazy;
use oracle::{Connection, RowValue};

pub const I18N_TABLE: &str = "tst_i18n_tmp";

/// Spanish, Chinese and Russian, in column order
pub const I18N_VALUES: [&str; 3] = ["Habitación doble", "雙人房", "двухместный номер"];

static EXPECTED: Lazy<String> = Lazy::new(|| quoted_list(&I18N_VALUES));

#[derive(Debug, Clone, RowValue)]
pub struct I18nRow {
    pub name_spanish: String,
    pub name_chinese: String,
    pub name_russian: String,
}

impl I18nRow {
    pub fn values(&self) -> [&str; 3] {
        [
            self.name_spanish.as_str(),
            self.name_chinese.as_str(),
            self.name_russian.as_str(),
        ]
    }
}

/// Formats values as SQL string literals separated by `, `.
///
/// ```
/// use oracle_roundtrip::checks::i18n::quoted_list;
///
/// assert_eq!(quoted_list(&["a", "it's"]), "'a', 'it''s'");
/// ```
pub fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|val| format!("'{}'", val.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compares a fetched row with [`I18N_VALUES`].
pub fn verify_row(row: &I18nRow) -> Result<()> {
    let got = quoted_list(&row.values());
    let expected: &str = &EXPECTED;
    if got != expected {
        tracing::error!(got = %got, expected = %expected, "string mismatch");
        return Err(Error::StringMismatch {
            got,
            expected: expected.to_string(),
        });
    }
    Ok(())
}

/// Runs the round trip and returns the number of rows verified.
pub fn run(conn: &Connection, cleanup: Cleanup) -> Result<usize> {
    drop_table_quietly(conn, I18N_TABLE);
    let _guard = TableGuard::new(conn, I18N_TABLE, cleanup);

    let create_sql = format!(
        "create table {} (name_spanish varchar2(100), name_chinese varchar2(100), name_russian varchar2(100))",
        I18N_TABLE
    );
    conn.execute(&create_sql, &[]).sql_context(&create_sql)?;

    let insert_sql = format!(
        "insert into {} (name_spanish, name_chinese, name_russian) values ({})",
        I18N_TABLE, *EXPECTED
    );
    conn.execute(&insert_sql, &[]).sql_context(&insert_sql)?;
    conn.commit().sql_context("commit")?;

    let select_sql = format!(
        "select name_spanish, name_chinese, name_russian from {}",
        I18N_TABLE
    );
    let mut count = 0;
    let rows = conn.query_as::<I18nRow>(&select_sql, &[]).sql_context(&select_sql)?;
    for row_result in rows {
        let row = row_result.sql_context(&select_sql)?;
        println!("{}", quoted_list(&row.values()));
        verify_row(&row)?;
        count += 1;
    }
    if count == 0 {
        return Err(Error::MissingRows {
            table: I18N_TABLE.to_string(),
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [&str; 3]) -> I18nRow {
        I18nRow {
            name_spanish: values[0].to_string(),
            name_chinese: values[1].to_string(),
            name_russian: values[2].to_string(),
        }
    }

    #[test]
    fn expected_literal() {
        assert_eq!(
            *EXPECTED,
            "'Habitación doble', '雙人房', 'двухместный номер'"
        );
    }

    #[test]
    fn verify_matching_row() {
        assert!(verify_row(&row(I18N_VALUES)).is_ok());
    }

    #[test]
    fn verify_reports_both_values() {
        // what a single-byte client charset makes of the Chinese value
        let err = verify_row(&row(["Habitación doble", "???", "двухместный номер"])).unwrap_err();
        match &err {
            Error::StringMismatch { got, expected } => {
                assert_eq!(got, "'Habitación doble', '???', 'двухместный номер'");
                assert_eq!(expected, &*EXPECTED);
            }
            _ => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn verify_detects_truncation() {
        let err = verify_row(&row(["Habitación", "雙人房", "двухместный номер"])).unwrap_err();
        assert!(err.is_fatal());
    }
}
