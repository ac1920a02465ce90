use super::views::{format_money, CartSummaryView};
use crate::domain::CartState;
use std::fmt::Write;

/// Plain-text rendering of the cart, one line per item, for headless runs.
///
/// ```text
/// 1  Samsung Galaxy S7  $599.99 x 2
/// Items: 2
/// Total: $1199.98
/// ```
pub fn render_text(state: &CartState, currency: &str) -> String {
    let mut out = String::new();

    for item in state.items() {
        let _ = writeln!(
            out,
            "{}  {}  {} x {}",
            item.id,
            item.title,
            format_money(currency, item.price),
            item.amount
        );
    }

    let _ = writeln!(out, "Items: {}", state.amount());
    if state.is_empty() {
        let _ = writeln!(out, "{}", CartSummaryView::EMPTY_MESSAGE);
    } else {
        let _ = writeln!(out, "Total: {}", format_money(currency, state.total()));
    }
    out
}
