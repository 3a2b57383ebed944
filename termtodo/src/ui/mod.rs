//! Terminal UI rendering.

pub mod input_box;
pub mod status_bar;
pub mod task_panel;
pub mod task_row;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, HitAreas};

/// Main draw function for the entire UI.
///
/// Records where the input box and task rows landed so mouse clicks can be
/// routed back to them.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Tasks
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    let input = input_box::render(frame, chunks[0], app);
    let (tasks, first_row) = task_panel::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);

    app.set_hit_areas(HitAreas {
        input,
        tasks,
        first_row,
    });
}
