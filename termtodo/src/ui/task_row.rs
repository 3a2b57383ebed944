//! Rendering of a single task row.
//!
//! [`TaskRowView`] is a pure function of its props: the same task and
//! selection state always produce the same [`Line`]. It owns no state and
//! never calls the controller itself; clicks are translated into a
//! [`RowAction`] that the caller forwards.
//!
//! Row layout (columns relative to the row's left edge):
//!
//! ```text
//! ✗ [✓] Buy milk
//! 0 2-4 6..
//! ```

use std::ops::Range;

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};
use termtodo_proto::{Task, TaskId};

use super::theme;

/// Glyph of the delete affordance.
pub const DELETE_GLYPH: &str = "\u{2717}";

/// Indicator shown for a completed task.
pub const DONE_INDICATOR: &str = "[\u{2713}]";

/// Indicator shown for an open task.
pub const OPEN_INDICATOR: &str = "[ ]";

/// Columns occupied by the delete affordance.
const DELETE_COLUMNS: Range<u16> = 0..1;

/// Columns occupied by the completion indicator.
const INDICATOR_COLUMNS: Range<u16> = 2..5;

/// Column where the task text starts.
pub const TEXT_COLUMN: u16 = 6;

/// What a click on a row asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Flip the completion flag of the task.
    Toggle(TaskId),
    /// Delete the task.
    Remove(TaskId),
}

/// Presentational view of one task.
#[derive(Debug, Clone, Copy)]
pub struct TaskRowView<'a> {
    task: &'a Task,
    selected: bool,
    focused: bool,
}

impl<'a> TaskRowView<'a> {
    /// Creates an unselected row for `task`.
    #[must_use]
    pub const fn new(task: &'a Task) -> Self {
        Self {
            task,
            selected: false,
            focused: false,
        }
    }

    /// Marks the row as the current selection.
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Whether the task panel has keyboard focus.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Builds the row's spans.
    #[must_use]
    pub fn line(&self) -> Line<'a> {
        let (indicator, indicator_style, text_style) = if self.task.is_complete {
            (DONE_INDICATOR, theme::indicator_done(), theme::completed())
        } else {
            (OPEN_INDICATOR, theme::normal(), theme::normal())
        };

        Line::from(vec![
            Span::styled(DELETE_GLYPH, theme::delete_affordance()),
            Span::raw(" "),
            Span::styled(indicator, indicator_style),
            Span::raw(" "),
            Span::styled(self.task.text.as_str(), text_style),
        ])
    }

    /// Builds the list item, applying the selection style.
    #[must_use]
    pub fn list_item(&self) -> ListItem<'a> {
        let item = ListItem::new(self.line());
        match (self.selected, self.focused) {
            (true, true) => item.style(theme::selected()),
            (true, false) => item.style(theme::highlighted()),
            (false, _) => item,
        }
    }

    /// Maps a click at `column` (relative to the row start) to an action.
    ///
    /// Clicks outside the delete affordance and the indicator return `None`.
    #[must_use]
    pub fn action_at(&self, column: u16) -> Option<RowAction> {
        if DELETE_COLUMNS.contains(&column) {
            Some(RowAction::Remove(self.task.id))
        } else if INDICATOR_COLUMNS.contains(&column) {
            Some(RowAction::Toggle(self.task.id))
        } else {
            None
        }
    }
}
