//! Backend configuration and connection string parsing
//!
//! Supports the following connection string forms:
//! - `mem:` or `:memory:` for a private in-memory database
//! - `file:<path>` for a database file
//!
//! Either form may be followed by `?key=value&key=value` with the keys
//! `case` (`upper`, `lower`, `preserve`), `busy_timeout_ms` and `read_only`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default busy timeout for file-backed databases
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the backing database lives
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Storage {
    /// Private in-memory database, discarded when the connection closes
    #[default]
    Memory,
    /// Database file on disk
    File(PathBuf),
}

impl Storage {
    /// Get the file path if this is a File variant
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Storage::Memory => None,
            Storage::File(path) => Some(path),
        }
    }
}

/// Canonical case applied to column names reported in result metadata.
///
/// The cursor preserves whatever the backend reports; this setting decides
/// what the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierCase {
    /// Fold names to upper case (unquoted SQL identifier folding)
    #[default]
    Upper,
    /// Fold names to lower case
    Lower,
    /// Report names exactly as the engine does
    Preserve,
}

impl IdentifierCase {
    /// Render a column name in this case
    pub fn apply(&self, name: &str) -> String {
        match self {
            IdentifierCase::Upper => name.to_uppercase(),
            IdentifierCase::Lower => name.to_lowercase(),
            IdentifierCase::Preserve => name.to_string(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            IdentifierCase::Upper => "upper",
            IdentifierCase::Lower => "lower",
            IdentifierCase::Preserve => "preserve",
        }
    }
}

impl FromStr for IdentifierCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(IdentifierCase::Upper),
            "lower" => Ok(IdentifierCase::Lower),
            "preserve" => Ok(IdentifierCase::Preserve),
            other => Err(Error::InvalidConnectionString(format!(
                "unknown identifier case '{}'",
                other
            ))),
        }
    }
}

/// Configuration for the SQLite backend.
///
/// # Examples
///
/// ```rust
/// use shadow_cursor::{Config, IdentifierCase};
/// use std::time::Duration;
///
/// let config = Config::in_memory()
///     .identifier_case(IdentifierCase::Preserve)
///     .busy_timeout(Duration::from_millis(250));
/// ```
///
/// ## From a connection string
///
/// ```rust
/// use shadow_cursor::{Config, IdentifierCase};
///
/// let config: Config = "mem:?case=lower".parse().unwrap();
/// assert_eq!(config.identifier_case, IdentifierCase::Lower);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Database location
    pub storage: Storage,
    /// Case applied to reported column names
    pub identifier_case: IdentifierCase,
    /// How long to wait on a locked database file
    pub busy_timeout: Duration,
    /// Open the database read-only
    pub read_only: bool,
}

impl Config {
    /// Create a configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a configuration for a database file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: Storage::File(path.into()),
            ..Self::default()
        }
    }

    /// Set the identifier case
    pub fn identifier_case(mut self, case: IdentifierCase) -> Self {
        self.identifier_case = case;
        self
    }

    /// Set the busy timeout
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Open read-only
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Check if this is an in-memory configuration
    pub fn is_memory(&self) -> bool {
        self.storage == Storage::Memory
    }

    fn apply_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "case" => self.identifier_case = value.parse()?,
            "busy_timeout_ms" => {
                let ms: u64 = value.parse().map_err(|_| {
                    Error::InvalidConnectionString(format!("invalid busy_timeout_ms '{}'", value))
                })?;
                self.busy_timeout = Duration::from_millis(ms);
            }
            "read_only" => {
                self.read_only = match value {
                    "true" | "1" => true,
                    "false" | "0" => false,
                    _ => {
                        return Err(Error::InvalidConnectionString(format!(
                            "invalid read_only '{}'",
                            value
                        )))
                    }
                }
            }
            _ => {
                return Err(Error::InvalidConnectionString(format!(
                    "unknown option '{}'",
                    key
                )))
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: Storage::Memory,
            identifier_case: IdentifierCase::default(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            read_only: false,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() {
            return Err(Error::InvalidConnectionString(
                "empty connection string".to_string(),
            ));
        }

        let (location, options) = match s.split_once('?') {
            Some((location, options)) => (location, Some(options)),
            None => (s, None),
        };

        let mut config = if location == "mem:" || location == ":memory:" {
            Config::in_memory()
        } else if let Some(path) = location.strip_prefix("file:") {
            if path.is_empty() {
                return Err(Error::InvalidConnectionString(
                    "missing path after file:".to_string(),
                ));
            }
            Config::file(path)
        } else {
            return Err(Error::InvalidConnectionString(format!(
                "unsupported location '{}', use mem: or file:<path>",
                location
            )));
        };

        if let Some(options) = options {
            for pair in options.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    Error::InvalidConnectionString(format!("option '{}' has no value", pair))
                })?;
                config.apply_option(key.trim(), value.trim())?;
            }
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Memory => write!(f, "mem:")?,
            Storage::File(path) => write!(f, "file:{}", path.display())?,
        }
        write!(
            f,
            "?case={}&busy_timeout_ms={}&read_only={}",
            self.identifier_case.as_str(),
            self.busy_timeout.as_millis(),
            self.read_only
        )
    }
}
