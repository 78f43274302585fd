//! Connection configuration.
//!
//! Turns a structured configuration into the `KEY=value;` connection
//! string the native client consumes, and carries the options used
//! when provisioning a database.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default administrative user for freshly created databases.
pub const DEFAULT_DBA_USER: &str = "DBA";
/// Default administrative password for freshly created databases.
pub const DEFAULT_DBA_PASSWORD: &str = "sql123";

/// Keys that only make sense at database-creation time. They are
/// stripped from the extra-parameter map so they never leak into a
/// connection string.
const CREATE_ONLY_KEYS: &[&str] = &[
    "collation",
    "ncollation",
    "page_size",
    "jconnect",
    "checksum",
    "system_proc_as_definer",
    "blank_padding",
    "dba_user",
    "dba_password",
];

/// Connection settings for one database.
///
/// Any keys beyond the named fields are collected into `extra` and
/// appended verbatim to the connection string, so engine parameters
/// the adapter does not model stay reachable.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Server (engine) name, the `ENG=` parameter.
    pub server: String,
    /// Database name, the `DBN=` parameter.
    pub database: String,
    /// Login user, the `UID=` parameter.
    pub username: String,
    /// Login password, the `PWD=` parameter.
    pub password: String,
    /// Network link specification, the `LINKS=` parameter.
    #[serde(default)]
    pub commlinks: Option<String>,
    /// Client-visible connection name, the `CON=` parameter.
    #[serde(default)]
    pub connection_name: Option<String>,
    /// Character-set label, the `CS=` parameter.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Additional engine parameters, appended as `key=value;`.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ConnectionConfig {
    /// Creates a configuration with the four required parameters.
    #[must_use]
    pub fn new(
        server: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
            commlinks: None,
            connection_name: None,
            encoding: None,
            extra: BTreeMap::new(),
        }
    }

    /// Renders the native connection string.
    ///
    /// Required parameters come first in a fixed order, then the
    /// optional ones, then extra parameters in key order. Creation-only
    /// keys in `extra` are skipped.
    #[must_use]
    pub fn connection_string(&self) -> String {
        let mut s = format!(
            "ENG={};DBN={};UID={};PWD={};",
            self.server, self.database, self.username, self.password
        );
        if let Some(links) = &self.commlinks {
            s.push_str(&format!("LINKS={links};"));
        }
        if let Some(con) = &self.connection_name {
            s.push_str(&format!("CON={con};"));
        }
        if let Some(cs) = &self.encoding {
            s.push_str(&format!("CS={cs};"));
        }
        for (key, value) in &self.extra {
            if CREATE_ONLY_KEYS.contains(&key.as_str()) {
                continue;
            }
            s.push_str(&format!("{key}={value};"));
        }
        s
    }
}

/// Options for `CREATE DATABASE`.
///
/// Unset options are omitted from the statement so the engine applies
/// its own defaults; only the DBA credentials always render, falling
/// back to [`DEFAULT_DBA_USER`] and [`DEFAULT_DBA_PASSWORD`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDatabaseOptions {
    /// Keep trailing blanks in comparisons.
    #[serde(default)]
    pub blank_padding: Option<bool>,
    /// Page checksums.
    #[serde(default)]
    pub checksum: Option<bool>,
    /// Database collation.
    #[serde(default)]
    pub collation: Option<String>,
    /// jConnect system objects.
    #[serde(default)]
    pub jconnect: Option<bool>,
    /// Page size in bytes.
    #[serde(default)]
    pub page_size: Option<u32>,
    /// NCHAR collation.
    #[serde(default)]
    pub ncollation: Option<String>,
    /// Administrative user name.
    #[serde(default)]
    pub dba_user: Option<String>,
    /// Administrative password.
    #[serde(default)]
    pub dba_password: Option<String>,
    /// Run system procedures with definer rights.
    #[serde(default)]
    pub system_proc_as_definer: Option<bool>,
}

impl CreateDatabaseOptions {
    /// Renders the `CREATE DATABASE` statement for the given file or
    /// database name.
    #[must_use]
    pub fn to_sql(&self, name: &str) -> String {
        let mut sql = format!("CREATE DATABASE '{name}'");
        if let Some(on) = self.blank_padding {
            sql.push_str(&format!(" BLANK PADDING {}", on_off(on)));
        }
        if let Some(on) = self.checksum {
            sql.push_str(&format!(" CHECKSUM {}", on_off(on)));
        }
        if let Some(collation) = &self.collation {
            sql.push_str(&format!(" COLLATION '{collation}'"));
        }
        if let Some(on) = self.jconnect {
            sql.push_str(&format!(" JCONNECT {}", on_off(on)));
        }
        if let Some(size) = self.page_size {
            sql.push_str(&format!(" PAGE SIZE {size}"));
        }
        if let Some(ncollation) = &self.ncollation {
            sql.push_str(&format!(" NCHAR COLLATION '{ncollation}'"));
        }
        sql.push_str(&format!(
            " DBA USER '{}'",
            self.dba_user.as_deref().unwrap_or(DEFAULT_DBA_USER)
        ));
        sql.push_str(&format!(
            " DBA PASSWORD '{}'",
            self.dba_password.as_deref().unwrap_or(DEFAULT_DBA_PASSWORD)
        ));
        if let Some(on) = self.system_proc_as_definer {
            sql.push_str(&format!(" SYSTEM PROCEDURE AS DEFINER {}", on_off(on)));
        }
        sql
    }
}

const fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}
