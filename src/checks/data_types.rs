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

//! BLOB, RAW and DATE round trip.
//!
//! One row is inserted with positional bind parameters and fetched back.
//! A difference in the BLOB or RAW column is an [`Error::BinaryMismatch`].
//! A difference in the DATE column is only reported because DATE has no
//! fractional seconds.

use crate::error::StatementContext;
use crate::session::{drop_table_quietly, Cleanup, TableGuard};
use crate::Error;
use crate::Result;
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use md5::{Digest, Md5};
use oracle::sql_type::OracleType;
use oracle::{Connection, RowValue};

pub const DATA_TYPES_TABLE: &str = "blob_example$tmp";

pub const ROW_ID: &str = "aString";

/// Input of the MD5 digest stored in the RAW column
pub const DIGEST_INPUT: &str = "These pretzels are making me thirsty.";

/// Size of the MD5 digest in bytes
pub const DIGEST_SIZE: usize = 16;

/// Multi-byte text repeated to build the BLOB payload
pub const PAYLOAD_UNIT: &str = "請在12：15PM左右將每份裝好在盤子裡，可以先裝50份左右以及20份小孩的（分量少一点，避免吃不完浪费）集中摆放在三张桌子上，以免主日学後造成排隊等候。 每份餐装每一樣菜\t一勺（现在是5个菜，分菜的勺不要拿太大的）和一大勺米飯（分饭直到剩下最后一大锅米饭";

pub const DEFAULT_PAYLOAD_REPEAT: usize = 100;

/// The payload must be longer than this to leave the short RAW/VARCHAR2
/// bind path and go through LOB handling.
pub const LARGE_PAYLOAD_THRESHOLD: usize = 4000;

/// Returns the MD5 digest of `input`.
pub fn digest(input: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&Md5::digest(input));
    out
}

/// Rounds to the nearest whole second. Half a second rounds up.
///
/// ```
/// use chrono::NaiveDate;
/// use oracle_roundtrip::checks::data_types::round_to_second;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
///     .and_hms_milli_opt(23, 59, 59, 500).unwrap();
/// let rounded = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
///     .and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(round_to_second(dt), rounded);
/// ```
pub fn round_to_second(dt: NaiveDateTime) -> NaiveDateTime {
    let nanos = dt.nanosecond();
    let truncated = dt - Duration::nanoseconds(i64::from(nanos));
    if nanos >= 500_000_000 {
        truncated + Duration::seconds(1)
    } else {
        truncated
    }
}

/// Repeats [`PAYLOAD_UNIT`] `repeat` times.
pub fn large_payload(repeat: usize) -> Vec<u8> {
    PAYLOAD_UNIT.repeat(repeat).into_bytes()
}

/// Returns an error unless `repeat` builds a payload longer than
/// [`LARGE_PAYLOAD_THRESHOLD`].
pub fn check_payload_repeat(repeat: usize) -> Result<()> {
    let len = PAYLOAD_UNIT.len().saturating_mul(repeat);
    if len <= LARGE_PAYLOAD_THRESHOLD {
        return Err(Error::invalid_argument(format!(
            "payload repeated {} times is {} bytes, which doesn't exceed {} bytes",
            repeat, len, LARGE_PAYLOAD_THRESHOLD
        )));
    }
    Ok(())
}

/// Values inserted by the check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypesInput {
    pub id: String,
    pub data: Vec<u8>,
    pub raw_val: [u8; DIGEST_SIZE],
    pub date_val: NaiveDateTime,
}

impl DataTypesInput {
    pub fn new(payload_repeat: usize, now: NaiveDateTime) -> DataTypesInput {
        DataTypesInput {
            id: ROW_ID.to_string(),
            data: large_payload(payload_repeat),
            raw_val: digest(DIGEST_INPUT.as_bytes()),
            date_val: round_to_second(now),
        }
    }
}

/// A fetched row
#[derive(Debug, Clone, RowValue)]
pub struct DataTypesRow {
    pub id: String,
    pub data: Vec<u8>,
    pub raw_val: Vec<u8>,
    pub date_val: NaiveDateTime,
}

/// DATE value that came back different
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMismatch {
    pub got: NaiveDateTime,
    pub wanted: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypesReport {
    pub rows: usize,
    pub date_mismatches: Vec<DateMismatch>,
}

impl DataTypesReport {
    /// Compares a fetched row with the input.
    ///
    /// Returns [`Error::BinaryMismatch`] when the BLOB or RAW value differs.
    /// A DATE difference is recorded in `date_mismatches`.
    pub fn verify_row(&mut self, row: &DataTypesRow, input: &DataTypesInput) -> Result<()> {
        if row.data != input.data {
            let got = String::from_utf8_lossy(&row.data).into_owned();
            let wanted = String::from_utf8_lossy(&input.data).into_owned();
            tracing::error!(got = %got, wanted = %wanted, "BLOB mismatch");
            return Err(Error::BinaryMismatch {
                type_name: "BLOB",
                got,
                wanted,
            });
        }
        println!("BLOB data type works");

        if row.raw_val[..] != input.raw_val[..] {
            let got = format!("{:?}", row.raw_val);
            let wanted = format!("{:?}", input.raw_val);
            tracing::error!(got = %got, wanted = %wanted, "RAW mismatch");
            return Err(Error::BinaryMismatch {
                type_name: "RAW",
                got,
                wanted,
            });
        }
        println!("Raw data type works");

        if row.date_val != input.date_val {
            tracing::warn!(
                got = %row.date_val,
                wanted = %input.date_val,
                "Date data type doesn't work correctly"
            );
            self.date_mismatches.push(DateMismatch {
                got: row.date_val,
                wanted: input.date_val,
            });
        } else {
            println!("Date data type works");
        }
        self.rows += 1;
        Ok(())
    }
}

/// Runs the round trip with the current local time.
pub fn run(conn: &Connection, cleanup: Cleanup, payload_repeat: usize) -> Result<DataTypesReport> {
    check_payload_repeat(payload_repeat)?;
    let input = DataTypesInput::new(payload_repeat, Local::now().naive_local());
    run_with(conn, cleanup, &input)
}

/// Runs the round trip with the given values.
pub fn run_with(
    conn: &Connection,
    cleanup: Cleanup,
    input: &DataTypesInput,
) -> Result<DataTypesReport> {
    drop_table_quietly(conn, DATA_TYPES_TABLE);
    let _guard = TableGuard::new(conn, DATA_TYPES_TABLE, cleanup);

    let create_sql = format!(
        "create table {} (\
         id varchar2(256) not null primary key, \
         data blob, \
         raw_val raw(128), \
         date_val date)",
        DATA_TYPES_TABLE
    );
    conn.execute(&create_sql, &[]).sql_context(&create_sql)?;

    let insert_sql = format!(
        "insert into {} (id, data, raw_val, date_val) values (:1, :2, :3, :4)",
        DATA_TYPES_TABLE
    );
    tracing::debug!(payload_len = input.data.len(), "inserting");
    conn.execute(
        &insert_sql,
        &[
            &input.id,
            &(&input.data, &OracleType::BLOB),
            &input.raw_val.as_slice(),
            &input.date_val,
        ],
    )
    .sql_context(&insert_sql)?;
    conn.commit().sql_context("commit")?;

    let select_sql = format!(
        "select id, data, raw_val, date_val from {}",
        DATA_TYPES_TABLE
    );
    let mut report = DataTypesReport::default();
    let rows = conn
        .query_as::<DataTypesRow>(&select_sql, &[])
        .sql_context(&select_sql)?;
    for row_result in rows {
        let row = row_result.sql_context(&select_sql)?;
        report.verify_row(&row, input)?;
    }
    if report.rows == 0 {
        return Err(Error::MissingRows {
            table: DATA_TYPES_TABLE.to_string(),
        });
    }
    Ok(report)
}
