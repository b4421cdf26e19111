//! Typed errors for the recipe transformations.

use thiserror::Error;

/// Coarse error taxonomy shared by the core, the store and the transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed serving size or non-positive target size.
    InvalidInput,
    /// Malformed freeform recipe text.
    ParseError,
    /// The original serving size was zero.
    DivisionError,
    /// Store lookup miss.
    NotFound,
}

/// Failures of the freeform text parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 3 lines (title, serving size, ingredients), found {found}")]
    TooFewLines { found: usize },

    #[error("serving size '{value}' is not an integer")]
    InvalidServingSize { value: String },

    #[error("serving size must be at least 1, got {value}")]
    NonPositiveServingSize { value: i64 },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ParseError
    }
}

/// Failures of the recipe transformations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    #[error("original serving size is zero")]
    ZeroServingSize,

    #[error("target serving size must be a positive integer, got {0}")]
    InvalidServingSize(i64),

    #[error("scaled quantity of '{ingredient}' is not finite")]
    NonFiniteQuantity { ingredient: String },
}

impl RecipeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecipeError::ZeroServingSize => ErrorKind::DivisionError,
            RecipeError::InvalidServingSize(_) | RecipeError::NonFiniteQuantity { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }
}
