use super::models::{ItemId, Money};
use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the application: files, terminal, scripts.
///
/// The cart reducer itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog {}: {source}", .path.display())]
    InvalidCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate item id {0} in catalog")]
    DuplicateItemId(ItemId),

    #[error("Item {id} has a negative price {price}")]
    NegativePrice { id: ItemId, price: Money },

    #[error("Total of item {0} cannot be represented")]
    TotalOverflow(ItemId),

    #[error("Invalid action on line {line}: {source}")]
    InvalidAction {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type AppResult<T> = Result<T, AppError>;
