//! Error types shared by every layer of the transport engine
//!
//! All fallible operations return [`TransportResult`]. The variants map onto
//! the failure classes of the engine:
//!
//! | Variant | Raised by | Recoverable |
//! |---------|-----------|-------------|
//! | `Range` | setters and constructors | yes |
//! | `InsufficientInventory` | `extract` | yes |
//! | `Precondition` | `transport_step` called backwards in time | no |
//! | `Lookup` | material property table | no (fatal for that step) |
//! | `NumericDomain` | solver and quadrature guards | no |

use thiserror::Error;

use crate::physics::Iso;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("{quantity} out of range: {message} (got {value})")]
    Range {
        quantity: &'static str,
        value: f64,
        message: String,
    },

    #[error("Insufficient inventory of isotope {iso}: requested {requested} kg, available {available} kg")]
    InsufficientInventory {
        iso: Iso,
        requested: f64,
        available: f64,
    },

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("No {property} entry for element {element} in material '{material}'")]
    Lookup {
        material: String,
        element: u32,
        property: String,
    },

    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl TransportError {
    /// Shorthand for a range error on a named quantity
    pub fn range(quantity: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::Range {
            quantity,
            value,
            message: message.into(),
        }
    }

    /// Whether the caller can reasonably correct the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Range { .. } | Self::InsufficientInventory { .. })
    }
}

impl From<std::io::Error> for TransportError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for TransportError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}

pub type TransportResult<T> = Result<T, TransportError>;
