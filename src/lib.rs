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

/*!
Round-trip checks of an [Oracle database][] through [rust-oracle][].

Three checks run in order against one connection:

1. [`checks::smoke`] reads `v$instance` and creates and drops a table.
2. [`checks::i18n`] inserts Spanish, Chinese and Russian text as SQL
   literals and compares what comes back.
3. [`checks::data_types`] inserts a large BLOB, an MD5 digest as RAW and a
   DATE with bind parameters and compares what comes back.

A mismatch in 2 or a BLOB/RAW mismatch in 3 is a fatal [`Error`]
(see [`Error::is_fatal`]). A DATE mismatch is only reported.

## Connect descriptor

The descriptor is taken from the first command-line argument, then from the
`ORACLE_CONNECT_STRING` environment variable and finally defaults to
`scott/tiger@XE`. Its form is

```text
user/password@connect_string [as sysdba|sysoper|sysasm|sysbackup]
```

where `connect_string` is anything the Oracle client accepts, for example
`dbhost:1521/orclpdb` or a net service name.

## NLS_LANG

`NLS_LANG` is checked before connecting. When it is unset it is set to
`AMERICAN_AMERICA.AL32UTF8`. When its charset isn't UTF-8 capable a warning
is logged and, with [`nls_lang::NlsLangPolicy::Apply`], the charset part is
replaced with `AL32UTF8`.

## Example

```no_run
# use oracle_roundtrip::*;
# fn try_main() -> Result<()> {
use oracle_roundtrip::config::CheckOptions;
use oracle_roundtrip::nls_lang::{ClientEnv, NlsLangPolicy};

let descriptor: dsn::ConnectDescriptor = "scott/tiger@//localhost/XE".parse()?;
let client_env = ClientEnv::from_process(NlsLangPolicy::WarnOnly);
let conn = session::connect(&descriptor, &client_env)?;
let summary = checks::run_all(&conn, &CheckOptions::default())?;
println!("{} rows verified", summary.data_types.rows);
# Ok(())} fn main() { try_main().unwrap(); }
```

[Oracle database]: https://www.oracle.com/database/index.html
[rust-oracle]: https://github.com/kubo/rust-oracle
*/

pub mod checks;
pub mod config;
pub mod dsn;
mod error;
pub mod nls_lang;
pub mod session;

pub use crate::error::Error;
pub use crate::error::ErrorKind;
pub use crate::error::Result;
