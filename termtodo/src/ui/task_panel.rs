//! Task panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::task_row::TaskRowView;
use super::theme;
use crate::app::{App, PanelFocus};

/// Hint shown when the list is empty.
pub const EMPTY_HINT: &str = "No tasks yet. Type one above and press Enter.";

/// First row to draw so that `selected` stays inside a window of `height` rows.
#[must_use]
pub const fn window_start(selected: usize, height: usize) -> usize {
    if height == 0 || selected < height {
        0
    } else {
        selected + 1 - height
    }
}

/// Render the task list. Returns the inner area and the first drawn row.
pub fn render(frame: &mut Frame, area: Rect, app: &App) -> (Rect, usize) {
    let is_focused = app.focus == PanelFocus::Tasks;
    let tasks = app.tasks();

    let title = format!("Tasks ({}/{})", tasks.completed_count(), tasks.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    let inner = block.inner(area);

    if tasks.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(EMPTY_HINT, theme::dimmed()))).block(block);
        frame.render_widget(hint, area);
        return (inner, 0);
    }

    let first = window_start(app.selected_task, usize::from(inner.height));
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .skip(first)
        .take(usize::from(inner.height))
        .map(|(i, task)| {
            TaskRowView::new(task)
                .selected(i == app.selected_task)
                .focused(is_focused)
                .list_item()
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
    (inner, first)
}
