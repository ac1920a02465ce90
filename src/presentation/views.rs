//! Cart views: navbar badge, item rows and the cart summary.
//!
//! Views read the cart through a shared reference and never mutate it.
//! Every interactive or inspectable element is recorded in a [`HitMap`]
//! under a stable [`ElementId`], which is how mouse clicks become intents.

use crate::domain::{CartState, Intent, ItemId, LineItem, Money};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::fmt;

/// Stable identifiers of rendered elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    NavCartItemCount,
    CartItemsList,
    CartItem(ItemId),
    CartItemPrice(ItemId),
    CartAmount(ItemId),
    IncrementBtn(ItemId),
    DecrementBtn(ItemId),
    CartItemRemove(ItemId),
    CartTotalAmount,
    ClearAllCart,
}

impl ElementId {
    /// The intent a click on this element emits, if it is a control.
    pub fn intent(self) -> Option<Intent> {
        match self {
            ElementId::IncrementBtn(id) => Some(Intent::Increment(id)),
            ElementId::DecrementBtn(id) => Some(Intent::Decrement(id)),
            ElementId::CartItemRemove(id) => Some(Intent::RemoveItem(id)),
            ElementId::ClearAllCart => Some(Intent::ClearCart),
            _ => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::NavCartItemCount => write!(f, "nav-cart-item-count"),
            ElementId::CartItemsList => write!(f, "cart-items-list"),
            ElementId::CartItem(id) => write!(f, "cart-item-{}", id),
            ElementId::CartItemPrice(id) => write!(f, "cart-item-price-{}", id),
            ElementId::CartAmount(id) => write!(f, "cart-amount-{}", id),
            ElementId::IncrementBtn(id) => write!(f, "increment-btn-{}", id),
            ElementId::DecrementBtn(id) => write!(f, "decrement-btn-{}", id),
            ElementId::CartItemRemove(id) => write!(f, "cart-item-remove-{}", id),
            ElementId::CartTotalAmount => write!(f, "cart-total-amount"),
            ElementId::ClearAllCart => write!(f, "clear-all-cart"),
        }
    }
}

/// Screen rectangles of the elements drawn in the last frame.
///
/// Containers are recorded before their children, so lookups search from
/// the back to find the innermost element.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    entries: Vec<(ElementId, Rect)>,
}

impl HitMap {
    pub fn insert(&mut self, id: ElementId, area: Rect) {
        self.entries.push((id, area));
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.entries.iter().find(|(e, _)| *e == id).map(|(_, r)| *r)
    }

    pub fn element_at(&self, column: u16, row: u16) -> Option<ElementId> {
        let pos = Position::new(column, row);
        self.entries
            .iter()
            .rev()
            .find(|(_, r)| r.contains(pos))
            .map(|(e, _)| *e)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn format_money(currency: &str, value: Money) -> String {
    format!("{}{}", currency, value)
}

/// Top bar with the total unit count badge. Reads `amount` only.
pub struct NavbarView {
    amount: u64,
}

impl NavbarView {
    pub fn new(state: &CartState) -> Self {
        Self { amount: state.amount() }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, hits: &mut HitMap) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        const LABEL: &str = "Cart Items: ";
        let badge = self.amount.to_string();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(LABEL.len() as u16),
                Constraint::Length(badge.len() as u16),
                Constraint::Min(0),
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new("tcart").style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            chunks[0],
        );
        f.render_widget(Paragraph::new(LABEL), chunks[1]);
        f.render_widget(
            Paragraph::new(badge).style(Style::default().fg(Color::Black).bg(Color::Yellow)),
            chunks[2],
        );
        hits.insert(ElementId::NavCartItemCount, chunks[2]);
    }
}

/// One cart line with its controls. Only ever reads its own item.
pub struct CartItemView<'a> {
    item: &'a LineItem,
    currency: &'a str,
    selected: bool,
}

impl<'a> CartItemView<'a> {
    pub fn new(item: &'a LineItem, currency: &'a str, selected: bool) -> Self {
        Self {
            item,
            currency,
            selected,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, hits: &mut HitMap) {
        let id = self.item.id;
        let price = format_money(self.currency, self.item.price);
        let amount = self.item.amount.to_string();

        let row_style = if self.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        f.render_widget(Paragraph::new("").style(row_style), area);
        hits.insert(ElementId::CartItem(id), area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(price.chars().count() as u16),
                Constraint::Length(3),
                Constraint::Length(amount.len().max(3) as u16),
                Constraint::Length(3),
                Constraint::Length(8),
            ])
            .spacing(1u16)
            .split(area);

        let button = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

        f.render_widget(Paragraph::new(self.item.title.as_str()).style(row_style), chunks[0]);
        f.render_widget(Paragraph::new(price).style(row_style), chunks[1]);
        f.render_widget(Paragraph::new("[+]").style(row_style.patch(button)), chunks[2]);
        f.render_widget(Paragraph::new(amount).style(row_style), chunks[3]);
        f.render_widget(Paragraph::new("[-]").style(row_style.patch(button)), chunks[4]);
        f.render_widget(
            Paragraph::new("[Remove]").style(row_style.patch(Style::default().fg(Color::Red))),
            chunks[5],
        );

        hits.insert(ElementId::CartItemPrice(id), chunks[1]);
        hits.insert(ElementId::IncrementBtn(id), chunks[2]);
        hits.insert(ElementId::CartAmount(id), chunks[3]);
        hits.insert(ElementId::DecrementBtn(id), chunks[4]);
        hits.insert(ElementId::CartItemRemove(id), chunks[5]);
    }
}

/// Item list, total and clear-all control, or the empty-state message.
pub struct CartSummaryView<'a> {
    state: &'a CartState,
    currency: &'a str,
    selected: usize,
}

impl<'a> CartSummaryView<'a> {
    pub const EMPTY_MESSAGE: &'static str = "Cart is currently empty";

    pub fn new(state: &'a CartState, currency: &'a str, selected: usize) -> Self {
        Self {
            state,
            currency,
            selected,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, hits: &mut HitMap) {
        let block = Block::default().borders(Borders::ALL).title("Cart");
        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.state.is_empty() {
            f.render_widget(
                Paragraph::new(Self::EMPTY_MESSAGE).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_items(f, chunks[0], hits);

        let total = format_money(self.currency, self.state.total());
        let total_line = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(total.chars().count() as u16),
                Constraint::Min(0),
            ])
            .split(chunks[2]);
        f.render_widget(Paragraph::new("Total: "), total_line[0]);
        f.render_widget(
            Paragraph::new(total).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            total_line[1],
        );
        hits.insert(ElementId::CartTotalAmount, total_line[1]);

        const CLEAR: &str = "[Clear Cart]";
        let clear = Rect {
            width: (CLEAR.len() as u16).min(chunks[3].width),
            ..chunks[3]
        };
        f.render_widget(Paragraph::new(CLEAR).style(Style::default().fg(Color::Red)), clear);
        hits.insert(ElementId::ClearAllCart, clear);
    }

    fn render_items(&self, f: &mut Frame, area: Rect, hits: &mut HitMap) {
        hits.insert(ElementId::CartItemsList, area);

        let items = self.state.items();
        let visible = area.height as usize;
        let first = (self.selected + 1).saturating_sub(visible);

        for (offset, (idx, item)) in items.iter().enumerate().skip(first).take(visible).enumerate() {
            let row = Rect {
                y: area.y + offset as u16,
                height: 1,
                ..area
            };
            CartItemView::new(item, self.currency, idx == self.selected).render(f, row, hits);
        }
    }
}
