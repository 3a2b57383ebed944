//! Application state and event handling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use termtodo_proto::{TaskId, TaskList};

use crate::tasks::{SyncStatus, TaskListController};
use crate::ui::task_row::{RowAction, TaskRowView};

/// Default placeholder shown in the empty input box.
pub const DEFAULT_PLACEHOLDER: &str = "What needs to be done?";

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Input box is focused (default).
    Input,
    /// Task list is focused.
    Tasks,
}

/// Screen areas recorded during the last draw, used to route mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    /// Inner area of the input box.
    pub input: Rect,
    /// Inner area of the task list.
    pub tasks: Rect,
    /// Index of the first task row drawn in `tasks`.
    pub first_row: usize,
}

/// Main application state.
pub struct App {
    /// Current text input.
    pub input: String,
    /// Cursor position in input (character index).
    pub cursor_position: usize,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Index of the selected task in the list.
    pub selected_task: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Placeholder text for the empty input box.
    pub placeholder: String,
    controller: TaskListController,
    /// Latest list snapshot, refreshed by a controller subscription.
    view: Rc<RefCell<Arc<TaskList>>>,
    sync_status: SyncStatus,
    hit_areas: Cell<HitAreas>,
}

impl App {
    /// Create the application around a controller.
    ///
    /// Registers the view refresh as a subscriber, next to whatever
    /// subscribers (such as persistence) the controller already has.
    #[must_use]
    pub fn new(mut controller: TaskListController, sync_status: SyncStatus) -> Self {
        let view = Rc::new(RefCell::new(controller.tasks()));
        let sink = Rc::clone(&view);
        controller.subscribe(move |list| *sink.borrow_mut() = Arc::clone(list));

        Self {
            input: String::new(),
            cursor_position: 0,
            focus: PanelFocus::Input,
            selected_task: 0,
            should_quit: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            controller,
            view,
            sync_status,
            hit_areas: Cell::new(HitAreas::default()),
        }
    }

    /// Set the input placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Tasks as last published to the view.
    #[must_use]
    pub fn tasks(&self) -> Arc<TaskList> {
        Arc::clone(&self.view.borrow())
    }

    /// Id of the selected task, if the list is not empty.
    #[must_use]
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.tasks().get(self.selected_task).map(|t| t.id)
    }

    /// Last persistence failure, if the most recent write failed.
    #[must_use]
    pub fn sync_warning(&self) -> Option<String> {
        self.sync_status.last_error()
    }

    /// Areas recorded by the last draw.
    #[must_use]
    pub fn hit_areas(&self) -> HitAreas {
        self.hit_areas.get()
    }

    /// Record where the panels were drawn. Called by the renderer.
    pub fn set_hit_areas(&self, areas: HitAreas) {
        self.hit_areas.set(areas);
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.switch_focus();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::Tasks => self.handle_tasks_key(key),
        }
    }

    /// Handle key event when input is focused.
    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.enter_char(c);
            }
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.chars().count(),
            _ => {}
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_tasks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => self.selected_task = 0,
            KeyCode::End => self.selected_task = self.tasks().len().saturating_sub(1),
            KeyCode::Char(' ' | 'x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            _ => {}
        }
    }

    /// Handle a mouse event against the areas of the last draw.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let areas = self.hit_areas.get();
        let pos = Position::new(mouse.column, mouse.row);

        if areas.input.contains(pos) {
            self.focus = PanelFocus::Input;
            return;
        }
        if !areas.tasks.contains(pos) {
            return;
        }

        let index = areas.first_row + usize::from(pos.y - areas.tasks.y);
        let tasks = self.tasks();
        let Some(task) = tasks.get(index) else {
            return;
        };
        self.focus = PanelFocus::Tasks;
        self.selected_task = index;

        match TaskRowView::new(task).action_at(pos.x - areas.tasks.x) {
            Some(RowAction::Toggle(id)) => {
                self.controller.toggle(id);
            }
            Some(RowAction::Remove(id)) => {
                self.controller.remove(id);
                self.clamp_selection();
            }
            None => {}
        }
    }

    /// Switch focus between the input box and the task list.
    const fn switch_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Tasks,
            PanelFocus::Tasks => PanelFocus::Input,
        };
    }

    /// Add the current input as a task; clear the input only on success.
    pub fn submit_input(&mut self) {
        if self.controller.add(&self.input).is_none() {
            return;
        }
        self.input.clear();
        self.cursor_position = 0;
        self.selected_task = self.tasks().len().saturating_sub(1);
    }

    /// Toggle the selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.controller.toggle(id);
        }
    }

    /// Remove the selected task, keeping a valid selection.
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.controller.remove(id);
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.tasks().len();
        if self.selected_task >= len {
            self.selected_task = len.saturating_sub(1);
        }
    }

    /// Byte offset of the cursor in `input`.
    #[must_use]
    pub fn cursor_byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let idx = self.cursor_byte_index();
        self.input.insert(idx, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.cursor_byte_index();
            self.input.remove(idx);
        }
    }

    /// Delete the character under the cursor.
    fn delete_char_at(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let idx = self.cursor_byte_index();
            self.input.remove(idx);
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Select the previous task.
    const fn select_prev(&mut self) {
        if self.selected_task > 0 {
            self.selected_task -= 1;
        }
    }

    /// Select the next task.
    fn select_next(&mut self) {
        if self.selected_task < self.tasks().len().saturating_sub(1) {
            self.selected_task += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(TaskListController::default(), SyncStatus::new())
    }
}
