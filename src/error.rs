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

use std::borrow::Cow;
use thiserror::Error;

/// A specialized [`Result`](std::result::Result) type for round-trip checks.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
/// A list of error categories.
///
/// It is used with the [`Error`] type.
pub enum ErrorKind {
    /// Error when command-line arguments or the connect descriptor are unacceptable.
    Config,

    /// Error when a session cannot be opened.
    Connect,

    /// Error when a SQL statement fails or its rows cannot be fetched.
    Statement,

    /// Error when a value read back differs from the value written.
    ///
    /// Errors of this kind are fatal. See [`Error::is_fatal`].
    Integrity,
}

/// The error type for round-trip checks
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The connect descriptor could not be parsed.
    #[error("invalid connect descriptor {descriptor:?}: {reason}")]
    InvalidDescriptor {
        descriptor: String,
        reason: Cow<'static, str>,
    },

    /// A command-line value is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// Opening a session failed.
    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: oracle::Error,
    },

    /// Executing a statement or fetching its rows failed.
    #[error("failed to execute `{sql}`: {source}")]
    Statement {
        sql: String,
        #[source]
        source: oracle::Error,
    },

    /// Strings read back don't match the strings written.
    #[error("string mismatch: got {got:?}, awaited {expected:?}")]
    StringMismatch { got: String, expected: String },

    /// Binary data read back doesn't match the data written.
    #[error("{type_name} data type doesn't work correctly: got {got}, wanted {wanted}")]
    BinaryMismatch {
        type_name: &'static str,
        got: String,
        wanted: String,
    },

    /// A row written to `table` was not returned.
    #[error("no rows found in {table}")]
    MissingRows { table: String },
}

impl Error {
    pub(crate) fn statement<S>(sql: S, source: oracle::Error) -> Error
    where
        S: Into<String>,
    {
        Error::Statement {
            sql: sql.into(),
            source,
        }
    }

    pub(crate) fn invalid_descriptor<D, R>(descriptor: D, reason: R) -> Error
    where
        D: Into<String>,
        R: Into<Cow<'static, str>>,
    {
        Error::InvalidDescriptor {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument<M>(message: M) -> Error
    where
        M: Into<Cow<'static, str>>,
    {
        Error::InvalidArgument(message.into())
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDescriptor { .. } | Error::InvalidArgument(_) => ErrorKind::Config,
            Error::Connect { .. } => ErrorKind::Connect,
            Error::Statement { .. } => ErrorKind::Statement,
            Error::StringMismatch { .. }
            | Error::BinaryMismatch { .. }
            | Error::MissingRows { .. } => ErrorKind::Integrity,
        }
    }

    /// Returns `true` when data written to the database came back altered or
    /// not at all.
    ///
    /// The checks stop at the first error of any kind. The caller decides how
    /// to terminate on fatal ones; the binary exits with status 2.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Integrity
    }

    /// Returns the underlying driver error if any.
    pub fn oracle_error(&self) -> Option<&oracle::Error> {
        match self {
            Error::Connect { source, .. } | Error::Statement { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Attaches the SQL text to driver errors.
pub(crate) trait StatementContext<T> {
    fn sql_context(self, sql: &str) -> Result<T>;
}

impl<T> StatementContext<T> for std::result::Result<T, oracle::Error> {
    fn sql_context(self, sql: &str) -> Result<T> {
        self.map_err(|err| Error::statement(sql, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_errors_are_fatal() {
        let err = Error::StringMismatch {
            got: "'a'".into(),
            expected: "'b'".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert!(err.is_fatal());

        let err = Error::BinaryMismatch {
            type_name: "RAW",
            got: "[1]".into(),
            wanted: "[2]".into(),
        };
        assert!(err.is_fatal());

        let err = Error::MissingRows {
            table: "tst_i18n_tmp".into(),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn config_errors_are_not_fatal() {
        let err = Error::invalid_descriptor("scott@", "missing connect string");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!err.is_fatal());
        assert!(err.oracle_error().is_none());

        let err = Error::invalid_argument("payload too short");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn display() {
        let err = Error::StringMismatch {
            got: "'x'".into(),
            expected: "'y'".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"string mismatch: got "'x'", awaited "'y'""#
        );
        let err = Error::BinaryMismatch {
            type_name: "BLOB",
            got: "abc".into(),
            wanted: "abd".into(),
        };
        assert_eq!(
            err.to_string(),
            "BLOB data type doesn't work correctly: got abc, wanted abd"
        );
    }
}
