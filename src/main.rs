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

use clap::Parser;
use oracle_roundtrip::checks;
use oracle_roundtrip::config::{Cli, Config, Environment, EXIT_ERROR, EXIT_FATAL};
use oracle_roundtrip::session;
use oracle_roundtrip::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn exit_code(err: &Error) -> ExitCode {
    if err.is_fatal() {
        tracing::error!("fatal: {}", err);
        ExitCode::from(EXIT_FATAL)
    } else {
        tracing::error!("{}", err);
        ExitCode::from(EXIT_ERROR)
    }
}

fn run(cli: &Cli) -> oracle_roundtrip::Result<()> {
    let config = Config::new(cli, &Environment::from_process())?;
    tracing::info!(
        source = ?config.resolved.source,
        "connecting to {}",
        config.descriptor
    );
    let conn = session::connect(&config.descriptor, &config.client_env)?;
    let summary = checks::run_all(&conn, &config.checks)?;
    tracing::info!(
        instances = summary.smoke.instances.len(),
        i18n_rows = summary.i18n_rows,
        data_type_rows = summary.data_types.rows,
        date_mismatches = summary.data_types.date_mismatches.len(),
        "all checks passed"
    );
    if let Err(err) = conn.close() {
        tracing::warn!(error = %err, "failed to close the connection");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(Cli::exit_status(&err));
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_code(&err),
    }
}
