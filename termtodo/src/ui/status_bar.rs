//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: add | Tab: switch panel | Esc: quit | ←→: move cursor",
        PanelFocus::Tasks => {
            "Tab: switch panel | ↑↓/jk: navigate | Space: toggle | d: delete | Esc: quit"
        }
    };

    let tasks = app.tasks();
    let mut spans = vec![
        Span::styled(concat!("termtodo v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::raw(format!("{}/{} done", tasks.completed_count(), tasks.len())),
        Span::raw(" | "),
    ];
    match app.sync_warning() {
        Some(err) => spans.push(Span::styled(format!("Could not save tasks: {err}"), theme::warning())),
        None => spans.push(Span::styled(help_text, theme::dimmed())),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
