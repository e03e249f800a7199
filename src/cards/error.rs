//! Catalog errors.

use thiserror::Error;

/// What was wrong with a catalog record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("record appears before any N record")]
    NoCurrentDesign,
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("{field} is not a number: {value:?}")]
    BadNumber { field: &'static str, value: String },
    #[error("unknown card type {0}")]
    UnknownCardType(String),
    #[error("unknown flag {0}")]
    UnknownFlag(String),
    #[error("unknown good type {0}")]
    UnknownGood(String),
    #[error("unknown power P{phase}_{name}")]
    UnknownPower { phase: u8, name: String },
    #[error("phase {0} is outside 1..=5")]
    PhaseOutOfRange(String),
    #[error("unknown VP category {0}")]
    UnknownVpCategory(String),
    #[error("malformed power clause {0:?}")]
    MalformedPower(String),
    #[error("malformed expansion record {0:?}")]
    MalformedExpansion(String),
}

/// Errors raised while loading or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("line {line}: bad {code} record {text:?}: {kind}")]
    Parse {
        line: usize,
        code: char,
        text: String,
        kind: ParseErrorKind,
    },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("no design named {0:?}")]
    UnknownName(String),
    #[error("no design at index {0}")]
    UnknownDesign(usize),
}

impl CatalogError {
    /// Parse failure kind, if this is a parse error.
    #[must_use]
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            CatalogError::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Line number of a parse error.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            CatalogError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
