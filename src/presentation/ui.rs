use super::views::{CartSummaryView, HitMap, NavbarView};
use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draws one frame and returns where each element ended up.
pub fn render_ui(f: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();
    let state = app.store.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    NavbarView::new(state).render(f, chunks[0], &mut hits);
    CartSummaryView::new(state, &app.currency, app.selected).render(f, chunks[1], &mut hits);
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
        // the popup covers the controls
        hits = HitMap::default();
    }

    hits
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "j/k: select | +/-: quantity | x: remove | C: clear cart | Ctrl+E: export CSV | ?: help | q: quit".to_string()
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("tcart Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub const HELP_TEXT: &str = r#"TCART KEYS

=== CART ===
↑↓ or j/k       Select an item
+ or =          Add one of the selected item
-               Take one away (stops at 0, the item stays listed)
x / Delete      Remove the selected item
C               Clear the whole cart

=== MOUSE ===
[+] [-]         Change the quantity of that row
[Remove]        Remove that row
[Clear Cart]    Clear the whole cart
Click a row     Select it

=== FILES ===
Ctrl+E          Export the cart to a CSV file
                Columns: id,title,price,amount,line_total

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CartStore;
    use crate::domain::Intent;
    use crate::presentation::views::ElementId;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(app: &App) -> (Buffer, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(90, 16)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|f| hits = render_ui(f, app)).unwrap();
        (terminal.backend().buffer().clone(), hits)
    }

    fn text_in(buffer: &Buffer, area: Rect) -> String {
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
        }
        text.trim_end().to_string()
    }

    fn element_text(buffer: &Buffer, hits: &HitMap, id: ElementId) -> String {
        let area = hits.rect(id).unwrap_or_else(|| panic!("{} not rendered", id));
        text_in(buffer, area)
    }

    fn screen(buffer: &Buffer) -> String {
        text_in(buffer, buffer.area)
    }

    #[test]
    fn test_seed_cart_renders_all_elements() {
        let app = App::default();
        let (buffer, hits) = draw(&app);

        assert_eq!(element_text(&buffer, &hits, ElementId::NavCartItemCount), "3");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartTotalAmount), "$1799.97");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartItemPrice(1)), "$599.99");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartAmount(2)), "1");
        assert_eq!(element_text(&buffer, &hits, ElementId::IncrementBtn(3)), "[+]");
        assert_eq!(element_text(&buffer, &hits, ElementId::DecrementBtn(3)), "[-]");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartItemRemove(3)), "[Remove]");
        assert_eq!(element_text(&buffer, &hits, ElementId::ClearAllCart), "[Clear Cart]");
        assert!(hits.rect(ElementId::CartItemsList).is_some());
        assert!(screen(&buffer).contains("Samsung Galaxy S7"));
    }

    #[test]
    fn test_rendering_follows_dispatch() {
        let mut app = App::default();
        app.dispatch(Intent::Increment(1));
        app.dispatch(Intent::Decrement(2));
        let (buffer, hits) = draw(&app);

        assert_eq!(element_text(&buffer, &hits, ElementId::NavCartItemCount), "3");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartAmount(1)), "2");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartAmount(2)), "0");
        assert_eq!(element_text(&buffer, &hits, ElementId::CartTotalAmount), "$1899.97");
    }

    #[test]
    fn test_empty_cart_renders_message() {
        let mut app = App::default();
        app.dispatch(Intent::ClearCart);
        let (buffer, hits) = draw(&app);

        assert!(screen(&buffer).contains("Cart is currently empty"));
        assert_eq!(element_text(&buffer, &hits, ElementId::NavCartItemCount), "0");
        assert!(hits.rect(ElementId::CartTotalAmount).is_none());
        assert!(hits.rect(ElementId::ClearAllCart).is_none());
        assert!(hits.rect(ElementId::CartItemsList).is_none());
    }

    #[test]
    fn test_currency_symbol_is_configurable() {
        let app = App::new(CartStore::default(), "₹");
        let (buffer, hits) = draw(&app);
        assert_eq!(element_text(&buffer, &hits, ElementId::CartItemPrice(2)), "₹499.99");
    }

    #[test]
    fn test_hit_lookup_finds_controls() {
        let app = App::default();
        let (_, hits) = draw(&app);

        let inc = hits.rect(ElementId::IncrementBtn(2)).unwrap();
        assert_eq!(hits.element_at(inc.x, inc.y), Some(ElementId::IncrementBtn(2)));

        let title_x = hits.rect(ElementId::CartItem(2)).unwrap().x;
        assert_eq!(hits.element_at(title_x, inc.y), Some(ElementId::CartItem(2)));
    }

    #[test]
    fn test_help_popup_hides_controls() {
        let mut app = App::default();
        app.show_help();
        let (buffer, hits) = draw(&app);
        assert!(hits.is_empty());
        assert!(screen(&buffer).contains("tcart Help"));
    }

    #[test]
    fn test_export_prompt_in_status_bar() {
        let mut app = App::default();
        app.start_csv_export();
        let (buffer, _) = draw(&app);
        assert!(screen(&buffer).contains("Export CSV as: cart.csv"));
    }
}
