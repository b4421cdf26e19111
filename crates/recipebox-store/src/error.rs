//! Typed errors for the store crate.

use recipebox_core::{ErrorKind, RecipeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("recipe {0} not found")]
    NotFound(RecipeId),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
