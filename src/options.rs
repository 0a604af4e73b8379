/*!
 * Connection options
 *
 * Declarations the host turns into command-line flags, and the values it
 * hands back when asking for a connection.
 */

use crate::error::{AdapterError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE: &str = "default";

/// A free-text option the host exposes for this adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOption {
    /// Long flag and lookup key
    pub name: &'static str,
    pub description: &'static str,
    pub short: Option<char>,
    pub default: Option<&'static str>,
}

pub const HOST: TextOption = TextOption {
    name: "host",
    description: "Specifies the host name of the machine on which the server is running.",
    short: Some('h'),
    default: Some(DEFAULT_HOST),
};

pub const PORT: TextOption = TextOption {
    name: "port",
    description: "Port number to connect to at the server host. 8000 (HTTP) is reached through the MySQL handler on 3307.",
    short: Some('P'),
    default: Some("8000"),
};

pub const USER: TextOption = TextOption {
    name: "user",
    description: "Databend user name to connect as.",
    short: Some('U'),
    default: None,
};

pub const PASSWORD: TextOption = TextOption {
    name: "password",
    description: "Password to be used if the server demands password authentication.",
    short: Some('p'),
    default: None,
};

pub const DBNAME: TextOption = TextOption {
    name: "dbname",
    description: "The database name to use when connecting with the Databend query engine.",
    short: Some('D'),
    default: Some(DEFAULT_DATABASE),
};

pub const DATABEND_OPTIONS: [TextOption; 5] = [HOST, PORT, USER, PASSWORD, DBNAME];

/// Option values as received from the host; anything may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub host: Option<String>,
    pub port: Option<String>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Options with defaults applied and the port parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl ConnectionOptions {
    /// Look an option up by its declared name
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "host" => self.host.as_deref(),
            "port" => self.port.as_deref(),
            "dbname" => self.dbname.as_deref(),
            "user" => self.user.as_deref(),
            "password" => self.password.as_deref(),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let slot = match name {
            "host" => &mut self.host,
            "port" => &mut self.port,
            "dbname" => &mut self.dbname,
            "user" => &mut self.user,
            "password" => &mut self.password,
            other => {
                return Err(AdapterError::connection(format!(
                    "unknown connection option: {}",
                    other
                )))
            }
        };
        *slot = Some(value.into());
        Ok(())
    }

    /// Apply defaults; empty values count as missing
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        let port = match non_empty(&self.port) {
            Some(port) => port.trim().parse::<u16>().map_err(|_| {
                AdapterError::connection(format!("invalid port number: {}", port))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(ResolvedOptions {
            host: non_empty(&self.host).unwrap_or(DEFAULT_HOST).to_string(),
            port,
            dbname: non_empty(&self.dbname).unwrap_or(DEFAULT_DATABASE).to_string(),
            user: non_empty(&self.user).unwrap_or_default().to_string(),
            password: non_empty(&self.password).unwrap_or_default().to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
