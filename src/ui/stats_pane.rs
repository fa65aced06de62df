use crate::app::AppState;
use crate::domain::{calendar_week_of, progress_percent};
use crate::ui::styles::{border_style, default_style, gauge_style, tag_style, title_style};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the streak gauge and per-category counts
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Streak & Stats ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Streak label
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Category rows
        ])
        .split(inner);

    let streak = app.streak();
    let week = calendar_week_of(Local::now().date_naive());
    let label = Paragraph::new(Line::from(vec![
        Span::styled(format!(" Streak: {} days", streak), default_style()),
        Span::raw(format!("   (week {})", week)),
    ]));
    f.render_widget(label, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(progress_percent(streak));
    f.render_widget(gauge, chunks[1]);

    let rows: Vec<Line> = app
        .category_summary()
        .into_iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!(" {:<8}", row.category.name()), tag_style(row.category)),
                Span::raw(format!(
                    " {} done · {} days",
                    row.completed_tasks, row.completed_days
                )),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(rows), chunks[3]);
}
