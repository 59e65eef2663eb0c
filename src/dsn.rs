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

//! Connect descriptors and where they come from.

use crate::Error;
use crate::Result;
use oracle::Connector;
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted when no descriptor is given on the command line
pub const CONNECT_STRING_ENV: &str = "ORACLE_CONNECT_STRING";

/// Descriptor used when neither the argument nor the environment variable is set
pub const DEFAULT_CONNECT_DESCRIPTOR: &str = "scott/tiger@XE";

/// Where a connect descriptor was taken from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DsnSource {
    Argument,
    Environment,
    Default,
}

/// A connect descriptor and its origin
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    pub descriptor: String,
    pub source: DsnSource,
}

/// Picks the connect descriptor.
///
/// The first non-empty value of `arg` and `env` wins. When both are missing,
/// a usage hint is logged and [`DEFAULT_CONNECT_DESCRIPTOR`] is returned.
///
/// # Examples
///
/// ```
/// use oracle_roundtrip::dsn::{self, DsnSource};
///
/// let resolved = dsn::resolve(None, Some("hr/hr@//dbhost/orclpdb"));
/// assert_eq!(resolved.descriptor, "hr/hr@//dbhost/orclpdb");
/// assert_eq!(resolved.source, DsnSource::Environment);
/// ```
pub fn resolve(arg: Option<&str>, env: Option<&str>) -> Resolved {
    if let Some(arg) = arg.filter(|s| !s.is_empty()) {
        return Resolved {
            descriptor: arg.to_string(),
            source: DsnSource::Argument,
        };
    }
    if let Some(env) = env.filter(|s| !s.is_empty()) {
        return Resolved {
            descriptor: env.to_string(),
            source: DsnSource::Environment,
        };
    }
    tracing::warn!(
        "Please specify connection parameter in {} environment variable, \
         or as the first argument! (The format is user/password@host:port/service)",
        CONNECT_STRING_ENV
    );
    Resolved {
        descriptor: DEFAULT_CONNECT_DESCRIPTOR.to_string(),
        source: DsnSource::Default,
    }
}

/// Administrative privilege requested by a trailing `as ...` clause
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdminPrivilege {
    Sysdba,
    Sysoper,
    Sysasm,
    Sysbackup,
}

impl AdminPrivilege {
    fn from_keyword(s: &str) -> Option<AdminPrivilege> {
        match s.to_ascii_lowercase().as_str() {
            "sysdba" => Some(AdminPrivilege::Sysdba),
            "sysoper" => Some(AdminPrivilege::Sysoper),
            "sysasm" => Some(AdminPrivilege::Sysasm),
            "sysbackup" => Some(AdminPrivilege::Sysbackup),
            _ => None,
        }
    }

    fn to_oracle(self) -> oracle::Privilege {
        match self {
            AdminPrivilege::Sysdba => oracle::Privilege::Sysdba,
            AdminPrivilege::Sysoper => oracle::Privilege::Sysoper,
            AdminPrivilege::Sysasm => oracle::Privilege::Sysasm,
            AdminPrivilege::Sysbackup => oracle::Privilege::Sysbackup,
        }
    }
}

impl fmt::Display for AdminPrivilege {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AdminPrivilege::Sysdba => "SYSDBA",
            AdminPrivilege::Sysoper => "SYSOPER",
            AdminPrivilege::Sysasm => "SYSASM",
            AdminPrivilege::Sysbackup => "SYSBACKUP",
        };
        f.write_str(s)
    }
}

/// Parsed `user/password@connect_string[ as privilege]`
///
/// The connect string is passed to the Oracle client unchanged. It may be an
/// Easy Connect string such as `dbhost:1521/orclpdb`, a net service name
/// such as `XE`, or empty for the local default database.
///
/// Empty user and password (`/@XE` or `/`) selects external authentication.
///
/// ```
/// use oracle_roundtrip::dsn::{AdminPrivilege, ConnectDescriptor};
///
/// let desc: ConnectDescriptor = "sys/secret@dbhost:1521/orcl as sysdba".parse()?;
/// assert_eq!(desc.username(), "sys");
/// assert_eq!(desc.connect_string(), "dbhost:1521/orcl");
/// assert_eq!(desc.privilege(), Some(AdminPrivilege::Sysdba));
/// // password is hidden
/// assert_eq!(desc.to_string(), "sys/***@dbhost:1521/orcl as SYSDBA");
/// # Ok::<(), oracle_roundtrip::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectDescriptor {
    username: String,
    password: String,
    connect_string: String,
    privilege: Option<AdminPrivilege>,
}

impl ConnectDescriptor {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn connect_string(&self) -> &str {
        &self.connect_string
    }

    pub fn privilege(&self) -> Option<AdminPrivilege> {
        self.privilege
    }

    pub fn external_auth(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }

    /// Creates a connector for this descriptor.
    pub fn connector(&self) -> Connector {
        let mut connector = Connector::new(
            self.username.as_str(),
            self.password.as_str(),
            self.connect_string.as_str(),
        );
        if let Some(privilege) = self.privilege {
            connector.privilege(privilege.to_oracle());
        }
        if self.external_auth() {
            connector.external_auth(true);
        }
        connector
    }

    fn split_privilege(s: &str) -> (&str, Option<AdminPrivilege>) {
        let mut words = s.rsplitn(3, char::is_whitespace);
        if let (Some(keyword), Some(as_), Some(rest)) = (words.next(), words.next(), words.next())
        {
            if as_.eq_ignore_ascii_case("as") {
                if let Some(privilege) = AdminPrivilege::from_keyword(keyword) {
                    return (rest.trim_end(), Some(privilege));
                }
            }
        }
        (s, None)
    }
}

impl FromStr for ConnectDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<ConnectDescriptor> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_descriptor(s, "empty descriptor"));
        }
        let (rest, privilege) = ConnectDescriptor::split_privilege(trimmed);
        let (credentials, connect_string) = match rest.rsplit_once('@') {
            Some((credentials, connect_string)) => (credentials, connect_string),
            None => (rest, ""),
        };
        let (username, password) = match credentials.split_once('/') {
            Some((username, password)) => (username, password),
            None => (credentials, ""),
        };
        let desc = ConnectDescriptor {
            username: username.to_string(),
            password: password.to_string(),
            connect_string: connect_string.to_string(),
            privilege,
        };
        // Error messages carry the descriptor rebuilt by Display, never the input.
        if username.is_empty() && !password.is_empty() {
            return Err(Error::invalid_descriptor(
                desc.to_string(),
                "password without user name",
            ));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(Error::invalid_descriptor(
                desc.to_string(),
                "user name contains white space",
            ));
        }
        Ok(desc)
    }
}

impl fmt::Display for ConnectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.external_auth() {
            write!(f, "{}", self.username)?;
            if !self.password.is_empty() {
                write!(f, "/***")?;
            }
        } else {
            write!(f, "/")?;
        }
        if !self.connect_string.is_empty() {
            write!(f, "@{}", self.connect_string)?;
        }
        if let Some(privilege) = self.privilege {
            write!(f, " as {}", privilege)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ConnectDescriptor")
            .field("username", &self.username)
            .field("password", &"***")
            .field("connect_string", &self.connect_string)
            .field("privilege", &self.privilege)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_default() {
        let resolved = resolve(None, None);
        assert_eq!(resolved.descriptor, DEFAULT_CONNECT_DESCRIPTOR);
        assert_eq!(resolved.source, DsnSource::Default);

        // empty values fall through
        let resolved = resolve(Some(""), Some(""));
        assert_eq!(resolved.descriptor, DEFAULT_CONNECT_DESCRIPTOR);
        assert_eq!(resolved.source, DsnSource::Default);
    }

    #[test]
    fn resolve_environment() {
        let resolved = resolve(None, Some("hr/hr@XEPDB1"));
        assert_eq!(resolved.descriptor, "hr/hr@XEPDB1");
        assert_eq!(resolved.source, DsnSource::Environment);

        let resolved = resolve(Some(""), Some("hr/hr@XEPDB1"));
        assert_eq!(resolved.source, DsnSource::Environment);
    }

    #[test]
    fn resolve_argument_wins() {
        let resolved = resolve(Some("scott/tiger@dbhost/orcl"), Some("hr/hr@XEPDB1"));
        assert_eq!(resolved.descriptor, "scott/tiger@dbhost/orcl");
        assert_eq!(resolved.source, DsnSource::Argument);
    }

    #[test]
    fn parse_full() {
        let desc: ConnectDescriptor = "scott/tiger@dbhost:1521/orcl".parse().unwrap();
        assert_eq!(desc.username(), "scott");
        assert_eq!(desc.password(), "tiger");
        assert_eq!(desc.connect_string(), "dbhost:1521/orcl");
        assert_eq!(desc.privilege(), None);
        assert!(!desc.external_auth());
        assert_eq!(desc.to_string(), "scott/***@dbhost:1521/orcl");
    }

    #[test]
    fn parse_password_with_at_sign() {
        let desc: ConnectDescriptor = "scott/p@ss@XE".parse().unwrap();
        assert_eq!(desc.password(), "p@ss");
        assert_eq!(desc.connect_string(), "XE");
    }

    #[test]
    fn parse_without_connect_string() {
        let desc: ConnectDescriptor = "scott/tiger".parse().unwrap();
        assert_eq!(desc.username(), "scott");
        assert_eq!(desc.password(), "tiger");
        assert_eq!(desc.connect_string(), "");
        assert_eq!(desc.to_string(), "scott/***");
    }

    #[test]
    fn parse_external_auth() {
        let desc: ConnectDescriptor = "/@XE".parse().unwrap();
        assert!(desc.external_auth());
        assert_eq!(desc.connect_string(), "XE");
        assert_eq!(desc.to_string(), "/@XE");

        let desc: ConnectDescriptor = "/ as sysdba".parse().unwrap();
        assert!(desc.external_auth());
        assert_eq!(desc.privilege(), Some(AdminPrivilege::Sysdba));
        assert_eq!(desc.to_string(), "/ as SYSDBA");
    }

    #[test]
    fn parse_privilege() {
        let desc: ConnectDescriptor = "sys/secret@orcl AS SysOper".parse().unwrap();
        assert_eq!(desc.privilege(), Some(AdminPrivilege::Sysoper));
        assert_eq!(desc.connect_string(), "orcl");

        // not a privilege keyword, kept in the connect string
        let desc: ConnectDescriptor = "sys/secret@orcl as sysfoo".parse().unwrap();
        assert_eq!(desc.privilege(), None);
        assert_eq!(desc.connect_string(), "orcl as sysfoo");
    }

    #[test]
    fn parse_errors() {
        let err = "".parse::<ConnectDescriptor>().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);

        let err = "/secret@XE".parse::<ConnectDescriptor>().unwrap_err();
        assert!(!err.to_string().contains("secret"), "{}", err);
        assert!(err.to_string().contains("/***@XE"), "{}", err);
    }

    #[test]
    fn parse_error_hides_password_found_in_user_name() {
        // the password also occurs inside the user name
        let err = "a b/b@XE".parse::<ConnectDescriptor>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a b/***@XE"), "{}", msg);
        assert!(!msg.contains("/b@"), "{}", msg);

        let err = "a b/a@XE as sysdba".parse::<ConnectDescriptor>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a b/***@XE as SYSDBA"), "{}", msg);
        assert!(!msg.contains("/a@"), "{}", msg);
    }

    #[test]
    fn debug_hides_password() {
        let desc: ConnectDescriptor = "scott/tiger@XE".parse().unwrap();
        let s = format!("{:?}", desc);
        assert!(!s.contains("tiger"), "{}", s);
    }
}
