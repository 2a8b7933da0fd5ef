//! Error types for tripctl-core
//!
//! Every store operation fails with exactly one [`StoreError`] kind:
//! connection problems, engine-enforced constraint violations, or
//! everything else that went wrong while running a statement.

use std::fmt;

use sqlx::error::ErrorKind;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Which engine constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
    Other,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Check => "check",
            Self::Other => "integrity",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of a rejected write, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ConstraintKind,
    pub constraint: Option<String>,
    pub table: Option<String>,
    /// Engine detail line, e.g. `Key (email)=(a@b.c) already exists.`
    pub detail: Option<String>,
    /// Index of the offending record within the submitted batch.
    pub row: Option<usize>,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} constraint", self.kind)?;
        if let Some(name) = &self.constraint {
            write!(f, " '{}'", name)?;
        }
        if let Some(table) = &self.table {
            write!(f, " on {}", table)?;
        }
        if let Some(row) = self.row {
            write!(f, " (batch row {})", row)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " [{}]", detail)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(Violation),

    #[error("query error: {0}")]
    Query(String),
}

impl StoreError {
    /// Attach the batch position of the record that caused a violation.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::ConstraintViolation(mut v) => {
                v.row = Some(row);
                Self::ConstraintViolation(v)
            }
            other => other,
        }
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::ConstraintViolation(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned()).unwrap_or_default();

                // 08xxx connection exception, 57P01..57P03 shutdown / cannot connect now
                if code.starts_with("08") || code.starts_with("57P") {
                    return Self::Connection(db.message().to_owned());
                }

                if !code.starts_with("23") {
                    return Self::Query(db.message().to_owned());
                }

                let kind = match db.kind() {
                    ErrorKind::UniqueViolation => ConstraintKind::Unique,
                    ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                    ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                    ErrorKind::CheckViolation => ConstraintKind::Check,
                    _ => ConstraintKind::Other,
                };
                let pg = db.try_downcast_ref::<PgDatabaseError>();

                Self::ConstraintViolation(Violation {
                    kind,
                    constraint: db.constraint().map(str::to_owned),
                    table: db.table().map(str::to_owned),
                    detail: pg.and_then(|e| e.detail()).map(str::to_owned),
                    row: None,
                    message: db.message().to_owned(),
                })
            }
            sqlx::Error::Io(e) => Self::Connection(e.to_string()),
            sqlx::Error::Tls(e) => Self::Connection(e.to_string()),
            sqlx::Error::PoolTimedOut => {
                Self::Connection("timed out waiting for a store connection".to_owned())
            }
            sqlx::Error::PoolClosed => Self::Connection("store handle is closed".to_owned()),
            sqlx::Error::WorkerCrashed => {
                Self::Connection("connection worker crashed".to_owned())
            }
            sqlx::Error::Configuration(e) => Self::Connection(e.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

/// Configuration could not be resolved into a usable [`crate::StoreConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
