use crate::domain::{Action, AppError, AppResult, CartState, LineItem, Money};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct FileRepository;

impl FileRepository {
    /// Loads a JSON array of line items to seed the cart with.
    pub fn load_catalog(path: &Path) -> AppResult<Vec<LineItem>> {
        let content = fs::read_to_string(path)?;
        let items: Vec<LineItem> =
            serde_json::from_str(&content).map_err(|source| AppError::InvalidCatalog {
                path: path.to_path_buf(),
                source,
            })?;

        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.id)) {
            return Err(AppError::DuplicateItemId(dup.id));
        }
        Self::check_totals(&items)?;

        info!(path = %path.display(), items = items.len(), "loaded catalog");
        Ok(items)
    }

    /// Rejects negative prices and carts whose totals would leave the
    /// representable range.
    fn check_totals(items: &[LineItem]) -> AppResult<()> {
        let mut total = Money::ZERO;
        for item in items {
            if item.price.is_negative() {
                return Err(AppError::NegativePrice {
                    id: item.id,
                    price: item.price,
                });
            }
            total = item
                .price
                .checked_mul(item.amount)
                .and_then(|line| total.checked_add(line))
                .ok_or(AppError::TotalOverflow(item.id))?;
        }
        Ok(())
    }

    /// Reads a JSON-lines file of actions. Blank lines are skipped.
    pub fn load_script(path: &Path) -> AppResult<Vec<Action>> {
        let content = fs::read_to_string(path)?;
        Self::parse_script(&content)
    }

    pub fn parse_script(content: &str) -> AppResult<Vec<Action>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str::<Action>(line)
                    .map_err(|source| AppError::InvalidAction { line: idx + 1, source })
            })
            .collect()
    }

    /// Writes the cart as CSV: `id,title,price,amount,line_total`.
    pub fn export_csv(state: &CartState, path: &Path) -> AppResult<String> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["id", "title", "price", "amount", "line_total"])?;

        for item in state.items() {
            writer.write_record([
                item.id.to_string(),
                item.title.clone(),
                item.price.to_string(),
                item.amount.to_string(),
                item.line_total().to_string(),
            ])?;
        }
        writer.flush()?;

        info!(path = %path.display(), items = state.items().len(), "exported cart");
        Ok(path.display().to_string())
    }
}
