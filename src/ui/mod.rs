pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod stats_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_modal;
use ratatui::{text::Line, widgets::Paragraph, Frame};
use stats_pane::render_stats_pane;
use styles::{error_style, hint_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_stats_pane(f, app, layout.stats_area);

    // Status line: last storage problem, if any
    let status = match &app.status_line {
        Some(text) => Line::styled(format!(" {}", text), error_style()),
        None => Line::styled(" All changes saved locally", hint_style()),
    };
    f.render_widget(Paragraph::new(status), layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::Message => render_modal(f, app, size),
        UiMode::Normal => {}
    }
}
