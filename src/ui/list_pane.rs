use crate::app::AppState;
use crate::domain::Task;
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, selected_style, tag_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render today's task list
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.tasks.all();

    let date = Local::now().format("%a %b %d");
    let title = format!(
        " Today ({}) — {}/{} done ",
        date,
        app.tasks.completed_count(),
        tasks.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let empty = Paragraph::new(Line::styled(
            " No tasks yet. Press 'a' to add one.",
            hint_style(),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, idx);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Format: ` 1. [x] Run  [health]`
fn create_task_line(task: &Task, index: usize) -> Line<'static> {
    let name_style = if task.completed {
        done_style()
    } else {
        default_style()
    };

    Line::from(vec![
        Span::raw(format!("{:>2}. {} ", index + 1, task.checkbox())),
        Span::styled(task.name.clone(), name_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", task.tag), tag_style(task.tag)),
    ])
}
