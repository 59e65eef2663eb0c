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

//! `NLS_LANG` normalization.
//!
//! The Oracle client reads `NLS_LANG`, whose form is
//! `<language>_<territory>.<charset>`, once when it is initialized.
//! The i18n check is meaningful only when the charset token is UTF-8 capable.

use clap::ValueEnum;
use std::env;
use std::fmt;

/// Name of the environment variable read by the Oracle client
pub const NLS_LANG: &str = "NLS_LANG";

/// Value used when `NLS_LANG` is unset or has no charset part
pub const DEFAULT_NLS_LANG: &str = "AMERICAN_AMERICA.AL32UTF8";

const UNICODE_CHARSET: &str = "AL32UTF8";

/// Result of inspecting `NLS_LANG`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NlsLangStatus {
    /// The charset is already UTF-8 capable.
    Unicode(String),

    /// The variable is unset, empty or has no `.` separator.
    Unset { current: Option<String> },

    /// The charset is not UTF-8 capable. `corrected` replaces only the part
    /// after the last `.`.
    WrongCharset { current: String, corrected: String },
}

impl NlsLangStatus {
    /// Classifies the current value of `NLS_LANG`.
    ///
    /// # Examples
    ///
    /// ```
    /// use oracle_roundtrip::nls_lang::NlsLangStatus;
    ///
    /// assert_eq!(
    ///     NlsLangStatus::check(Some("JAPANESE_JAPAN.JA16SJIS")),
    ///     NlsLangStatus::WrongCharset {
    ///         current: "JAPANESE_JAPAN.JA16SJIS".into(),
    ///         corrected: "JAPANESE_JAPAN.AL32UTF8".into(),
    ///     }
    /// );
    /// ```
    pub fn check(current: Option<&str>) -> NlsLangStatus {
        let current = match current {
            Some(val) if val.ends_with("UTF8") => return NlsLangStatus::Unicode(val.to_string()),
            Some(val) => val,
            None => return NlsLangStatus::Unset { current: None },
        };
        match current.rfind('.') {
            Some(pos) => NlsLangStatus::WrongCharset {
                current: current.to_string(),
                corrected: format!("{}{}", &current[..=pos], UNICODE_CHARSET),
            },
            None => NlsLangStatus::Unset {
                current: Some(current.to_string()),
            },
        }
    }

    /// Returns the value the client should see after normalization.
    pub fn effective_value(&self) -> &str {
        match self {
            NlsLangStatus::Unicode(val) => val,
            NlsLangStatus::Unset { .. } => DEFAULT_NLS_LANG,
            NlsLangStatus::WrongCharset { corrected, .. } => corrected,
        }
    }
}

impl fmt::Display for NlsLangStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NlsLangStatus::Unicode(val) => write!(f, "{}={}", NLS_LANG, val),
            NlsLangStatus::Unset { current: None } => write!(f, "{} is not set", NLS_LANG),
            NlsLangStatus::Unset { current: Some(val) } => {
                write!(f, "{}={} has no charset", NLS_LANG, val)
            }
            NlsLangStatus::WrongCharset { current, corrected } => {
                write!(f, "{} error: should be {}, not {}!", NLS_LANG, corrected, current)
            }
        }
    }
}

/// Whether a corrected `NLS_LANG` is written back to the process environment
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum NlsLangPolicy {
    /// Sets `NLS_LANG` only when it is unset. A wrong charset is reported
    /// and left as is.
    #[default]
    WarnOnly,

    /// Sets `NLS_LANG` whenever its charset is not UTF-8 capable.
    Apply,
}

/// `NLS_LANG` setting to establish before connecting
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientEnv {
    status: NlsLangStatus,
    policy: NlsLangPolicy,
}

impl ClientEnv {
    pub fn new(status: NlsLangStatus, policy: NlsLangPolicy) -> ClientEnv {
        ClientEnv { status, policy }
    }

    /// Inspects `NLS_LANG` of the current process.
    pub fn from_process(policy: NlsLangPolicy) -> ClientEnv {
        let current = env::var(NLS_LANG).ok();
        ClientEnv::new(NlsLangStatus::check(current.as_deref()), policy)
    }

    pub fn status(&self) -> &NlsLangStatus {
        &self.status
    }

    pub fn policy(&self) -> NlsLangPolicy {
        self.policy
    }

    /// Returns the value to write to `NLS_LANG`, or `None` when the
    /// environment is kept.
    pub fn value_to_apply(&self) -> Option<&str> {
        match (&self.status, self.policy) {
            (NlsLangStatus::Unicode(_), _) => None,
            (NlsLangStatus::Unset { .. }, _) => Some(DEFAULT_NLS_LANG),
            (NlsLangStatus::WrongCharset { .. }, NlsLangPolicy::WarnOnly) => None,
            (NlsLangStatus::WrongCharset { corrected, .. }, NlsLangPolicy::Apply) => {
                Some(corrected)
            }
        }
    }

    /// Reports the status and updates the process environment.
    ///
    /// This must be called before the Oracle client library is initialized,
    /// that is, before the first connection in the process.
    pub fn apply(&self) {
        if let NlsLangStatus::WrongCharset { .. } = self.status {
            tracing::warn!("{}", self.status);
        } else {
            tracing::debug!("{}", self.status);
        }
        if let Some(val) = self.value_to_apply() {
            tracing::info!(value = val, "setting {}", NLS_LANG);
            env::set_var(NLS_LANG, val);
        }
    }
}
