//! User grid screen rendering
//!
//! Renders the main grid view: the search bar, the card grid of fetched
//! profiles, the empty-state message, and the footer with the selected
//! profile's links.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::UserProfile;

/// Height of one card row, borders included
const CARD_HEIGHT: u16 = 4;

/// Minimum width of one card column
const CARD_MIN_WIDTH: u16 = 30;

/// Renders the user grid view
pub fn render_user_grid(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(3), // search bar
            Constraint::Min(1),    // grid
            Constraint::Length(2), // footer
        ])
        .split(area);

    render_title(frame, chunks[0], app);
    render_search_bar(frame, chunks[1], app);

    let filtered = app.filtered_users();
    if filtered.is_empty() {
        render_no_results(frame, chunks[2]);
    } else {
        render_cards(frame, chunks[2], &filtered, app.selected_index);
    }

    render_footer(frame, chunks[3], app);
}

/// Renders the title bar with the visible/total counts
fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "GitHub Users",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {}/{} shown",
            app.filtered_users().len(),
            app.users.len()
        )),
    ];
    if app.refreshing {
        spans.push(Span::styled(
            "  refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the search input with a block cursor
fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let content = Line::from(vec![
        Span::raw(app.search_term.clone()),
        Span::styled("\u{2588}", Style::default().fg(Color::DarkGray)),
    ]);

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search by username"),
    );
    frame.render_widget(input, area);
}

/// Renders the empty-state message when no profile matches the search term
fn render_no_results(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Percentage(40),
        ])
        .split(area);

    let message = Paragraph::new("No user found.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(message, chunks[1]);
}

/// Renders the card grid, keeping the selected card visible
fn render_cards(frame: &mut Frame, area: Rect, users: &[&UserProfile], selected_index: usize) {
    let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

    // Scroll so the selected row is always on screen
    let selected_row = selected_index / columns;
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));

    let row_constraints: Vec<Constraint> = (0..visible_rows)
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_offset, row_area) in rows.iter().enumerate() {
        let row = first_row + row_offset;
        let col_constraints: Vec<Constraint> = (0..columns)
            .map(|_| Constraint::Ratio(1, columns as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col, cell_area) in cells.iter().enumerate() {
            let index = row * columns + col;
            let Some(user) = users.get(index) else {
                continue;
            };
            render_card(frame, *cell_area, user, index == selected_index);
        }
    }
}

/// Renders a single profile card
fn render_card(frame: &mut Frame, area: Rect, user: &UserProfile, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let login_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let card = Paragraph::new(vec![
        Line::from(Span::styled(format!("@{}", user.login), login_style)),
        Line::from(Span::styled(
            user.html_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(card, area);
}

/// Renders the footer: selected profile links, key hints, and the time of
/// the listing currently shown
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if let Some(user) = app.selected_user() {
        lines.push(Line::from(vec![
            Span::styled("avatar ", Style::default().fg(Color::DarkGray)),
            Span::raw(user.avatar_url.clone()),
            Span::styled("   profile ", Style::default().fg(Color::DarkGray)),
            Span::raw(user.html_url.clone()),
        ]));
    } else {
        lines.push(Line::from(""));
    }

    let mut hints = vec![Span::styled(
        "type to search \u{b7} \u{2191}/\u{2193} select \u{b7} Enter open \u{b7} Ctrl+R refresh \u{b7} Esc clear/quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(updated) = app.last_refresh {
        hints.push(Span::raw(format!("   updated {}", updated.format("%H:%M:%S"))));
    }
    lines.push(Line::from(hints));

    frame.render_widget(Paragraph::new(lines), area);
}
