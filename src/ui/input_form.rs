use crate::app::AppState;
use crate::domain::Category;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style, tag_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();

        // Name field
        lines.push(Line::raw(""));
        lines.push(Line::raw("Name:"));
        let name_style = if form.error.is_some() {
            error_style()
        } else {
            modal_title_style()
        };
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.name.as_str(), name_style),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        if let Some(error) = &form.error {
            lines.push(Line::styled(error.as_str(), error_style()));
        }
        lines.push(Line::raw(""));

        // Tag selector
        let mut tag_spans = vec![Span::raw("Tag:  ")];
        for category in Category::all() {
            if *category == form.tag {
                tag_spans.push(Span::styled(
                    format!("[{}]", category.name()),
                    tag_style(*category).patch(modal_title_style()),
                ));
            } else {
                tag_spans.push(Span::raw(format!(" {} ", category.name())));
            }
            tag_spans.push(Span::raw(" "));
        }
        lines.push(Line::from(tag_spans));
        lines.push(Line::raw(""));

        // Instructions
        lines.push(Line::raw("Tab/←/→ change tag  ·  Enter to add  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
