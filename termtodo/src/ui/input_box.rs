//! Input box rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Cursor glyph drawn inside the focused input box.
pub const CURSOR: char = '\u{2588}';

/// Render the input box. Returns its inner area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let is_focused = app.focus == PanelFocus::Input;

    let input_line = if app.input.is_empty() {
        let placeholder = Span::styled(app.placeholder.as_str(), theme::dimmed());
        if is_focused {
            Line::from(vec![Span::styled(CURSOR.to_string(), theme::normal()), placeholder])
        } else {
            Line::from(placeholder)
        }
    } else {
        let mut display_text = app.input.clone();
        if is_focused {
            display_text.insert(app.cursor_byte_index(), CURSOR);
        }
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let block = Block::default()
        .title(Span::styled("New task", theme::panel_title(theme::INPUT_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    let inner = block.inner(area);

    frame.render_widget(Paragraph::new(input_line).block(block), area);
    inner
}
