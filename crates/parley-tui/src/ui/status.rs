//! Status bar
//!
//! Displays connection state, session details and the transient status
//! message.

use parley_app::{App, ConnectionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Idle => Span::styled("Idle", Style::default().fg(Color::Gray)),
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Joined { identity, room } => Span::styled(
            format!("Joined #{room} as {identity}"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::Closed => Span::styled("Closed", Style::default().fg(Color::Red)),
        ConnectionState::Errored { reason } => {
            Span::styled(format!("Errored: {reason}"), Style::default().fg(Color::Red))
        },
    };

    let entry_count = app.transcript().len();
    let mut details = format!(" | {} | Entries: {entry_count}", app.endpoint());
    if let Some(message) = app.status_message() {
        details.push_str(" | ");
        details.push_str(message);
    }

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(details, Style::default().fg(Color::White)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
