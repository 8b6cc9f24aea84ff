//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and the post template ([`crate::render`]).  This module only paints what
//! the container already holds; it never applies fallbacks of its own.
//!
//! ## For contributors
//!
//! * The layout is a three-row split: the post list, a one-line detail bar
//!   for the selected post, and a one-line status bar.
//! * Each post card is a multi-line [`ListItem`]: title, summary, then a
//!   meta line with provider, release date and image state.
//! * Colours and styles are defined inline.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::render::{ImageSlot, Node, PostCard};

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, detail_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_posts(app, frame, main_area);
    draw_detail_bar(app, frame, detail_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the container: either the empty state or the card list.
fn draw_posts(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Posts ").borders(Borders::ALL);

    if let Some(Node::EmptyState(message)) = app.container.nodes().first() {
        let empty = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = app.container.cards().map(card_item).collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn card_item(card: &PostCard) -> ListItem<'_> {
    let image = match &card.image {
        ImageSlot::Image { .. } => Span::styled("[image]", Style::default().fg(Color::Green)),
        ImageSlot::Placeholder { text } => Span::styled(
            format!("[{text}]"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let lines = vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.summary.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(card.provider.as_str(), Style::default().fg(Color::Cyan)),
            Span::raw("  ·  "),
            Span::styled(
                card.release_date.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            image,
        ]),
        Line::default(),
    ];

    ListItem::new(lines)
}

/// Render the link and image source of the selected card.
fn draw_detail_bar(app: &App, frame: &mut Frame, area: Rect) {
    let Some(card) = app
        .list_state
        .selected()
        .and_then(|i| app.container.card(i))
    else {
        return;
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(card.link.aria_label.as_str(), Style::default().fg(Color::Yellow)),
        Span::raw(": "),
        Span::styled(
            card.link.href.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ];
    if let ImageSlot::Image { src, alt, .. } = &card.image {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{alt}: {src}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} posts", app.container.card_count()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  r: refresh  q: quit  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}
