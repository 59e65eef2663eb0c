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

//! Command-line arguments and environment, resolved into a [`Config`].

use crate::checks::data_types::{self, DEFAULT_PAYLOAD_REPEAT};
use crate::dsn::{self, ConnectDescriptor, Resolved, CONNECT_STRING_ENV};
use crate::nls_lang::{ClientEnv, NlsLangPolicy, NlsLangStatus, NLS_LANG};
use crate::session::Cleanup;
use crate::Result;
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::env;

/// Exit status for configuration, connection and statement errors
pub const EXIT_ERROR: u8 = 1;

/// Exit status for round-trip integrity failures
pub const EXIT_FATAL: u8 = 2;

/// Round-trip checks of character set and data type handling against an Oracle database
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "oracle-roundtrip", version)]
pub struct Cli {
    /// Connect descriptor: user/password@host:port/service [as sysdba].
    /// Falls back to the ORACLE_CONNECT_STRING environment variable.
    #[arg(value_name = "CONNECT_DESCRIPTOR")]
    pub connect_descriptor: Option<String>,

    /// Whether a non-UTF-8 NLS_LANG charset is corrected or only reported
    #[arg(long, value_enum, default_value_t = NlsLangPolicy::WarnOnly)]
    pub nls_lang_policy: NlsLangPolicy,

    /// What to do with the i18n test table afterwards
    #[arg(long, value_enum, default_value_t = Cleanup::Always)]
    pub i18n_cleanup: Cleanup,

    /// What to do with the data type test table afterwards
    #[arg(long, value_enum, default_value_t = Cleanup::LeaveForInspection)]
    pub data_types_cleanup: Cleanup,

    /// How many times the multi-byte text is repeated in the BLOB payload
    #[arg(long, default_value_t = DEFAULT_PAYLOAD_REPEAT)]
    pub payload_repeat: usize,
}

impl Cli {
    /// Exit status for an argument parsing failure.
    ///
    /// `--help` and `--version` exit with 0. Usage errors are configuration
    /// errors and exit with [`EXIT_ERROR`] instead of clap's default 2, which
    /// is reserved for [`EXIT_FATAL`].
    pub fn exit_status(err: &clap::Error) -> u8 {
        match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
            _ => EXIT_ERROR,
        }
    }
}

/// Snapshot of the environment variables the program reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub nls_lang: Option<String>,
    pub connect_string: Option<String>,
}

impl Environment {
    pub fn from_process() -> Environment {
        Environment {
            nls_lang: env::var(NLS_LANG).ok(),
            connect_string: env::var(CONNECT_STRING_ENV).ok(),
        }
    }
}

/// Per-check options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub i18n_cleanup: Cleanup,
    pub data_types_cleanup: Cleanup,
    pub payload_repeat: usize,
}

impl Default for CheckOptions {
    fn default() -> CheckOptions {
        CheckOptions {
            i18n_cleanup: Cleanup::Always,
            data_types_cleanup: Cleanup::LeaveForInspection,
            payload_repeat: DEFAULT_PAYLOAD_REPEAT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub resolved: Resolved,
    pub descriptor: ConnectDescriptor,
    pub client_env: ClientEnv,
    pub checks: CheckOptions,
}

impl Config {
    pub fn new(cli: &Cli, environment: &Environment) -> Result<Config> {
        data_types::check_payload_repeat(cli.payload_repeat)?;
        let resolved = dsn::resolve(
            cli.connect_descriptor.as_deref(),
            environment.connect_string.as_deref(),
        );
        let descriptor = resolved.descriptor.parse()?;
        let client_env = ClientEnv::new(
            NlsLangStatus::check(environment.nls_lang.as_deref()),
            cli.nls_lang_policy,
        );
        Ok(Config {
            resolved,
            descriptor,
            client_env,
            checks: CheckOptions {
                i18n_cleanup: cli.i18n_cleanup,
                data_types_cleanup: cli.data_types_cleanup,
                payload_repeat: cli.payload_repeat,
            },
        })
    }
}
