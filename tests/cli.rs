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

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oracle-roundtrip"))
        .args(args)
        .env_remove("ORACLE_CONNECT_STRING")
        .output()
        .unwrap()
}

// Argument errors are reported before connecting, so no database is needed.
#[test]
fn invalid_values_exit_with_status_1() {
    let output = run(&["--payload-repeat", "abc"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--payload-repeat"), "{}", stderr);

    let output = run(&["--i18n-cleanup", "sometimes"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn payload_repeat_below_threshold_exits_with_status_1() {
    let output = run(&["--payload-repeat", "1"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_with_status_0() {
    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--payload-repeat"), "{}", stdout);
}
