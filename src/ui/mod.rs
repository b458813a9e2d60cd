pub mod details_pane;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod task_form;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_delete, render_suggestion_picker};
use ratatui::Frame;
use task_form::render_task_form;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);

    // Render panes
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_timer_pane(f, app, layout.timer_area);
    render_status_line(f, app, layout.status_area);

    // Render form if active (the picker sits on top of it)
    if app.form.is_some() {
        render_task_form(f, app, size);
    }

    match app.ui_mode {
        UiMode::PickingSuggestions => render_suggestion_picker(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete(f, app, size),
        _ => {}
    }
}
