//! `termtodo`: a terminal to-do list.
//!
//! The [`tasks::TaskListController`] owns the list, [`store`] persists it,
//! and [`app`] plus [`ui`] present it with ratatui.

pub mod app;
pub mod config;
pub mod store;
pub mod tasks;
pub mod ui;
