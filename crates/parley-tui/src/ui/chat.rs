//! Transcript pane
//!
//! Displays the transcript of the current connection, newest at the bottom.

use parley_app::{App, ConnectionState, EntryKind, TranscriptEntry};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Render the transcript pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.connection_state() {
        ConnectionState::Joined { room, .. } => format!(" #{room} "),
        _ => " Transcript ".to_string(),
    };

    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if app.transcript().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.transcript().iter().map(entry_item).collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

fn entry_item(entry: &TranscriptEntry) -> ListItem<'static> {
    let timestamp = Span::styled(
        format!("{} ", entry.timestamp().format(TIMESTAMP_FORMAT)),
        Style::default().fg(Color::DarkGray),
    );

    let style = match entry.kind() {
        EntryKind::Sent => Style::default().fg(Color::Cyan),
        EntryKind::Received => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        EntryKind::Info => Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    };

    ListItem::new(Line::from(vec![timestamp, Span::styled(entry.line(), style)]))
}
