use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, priority_style, status_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn details_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()))
}

/// Render the details pane for the selected task or subtask
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if let Some(subtask) = app.selected_subtask() {
        lines.push(Line::from(vec![
            Span::styled("Subtask: ", title_style()),
            Span::raw(subtask.title.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Status:  ", title_style()),
            Span::styled(subtask.status.label(), status_style(subtask.status)),
        ]));
        lines.push(Line::raw(""));
        match subtask.description.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(description) => {
                for text in description.lines() {
                    lines.push(Line::raw(format!("  {}", text)));
                }
            }
            None => lines.push(Line::from(Span::styled("(no description)", default_style()))),
        }
    } else if let Some(task) = app.selected_task() {
        lines.push(Line::from(vec![
            Span::styled("Title:    ", title_style()),
            Span::raw(task.title.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Priority: ", title_style()),
            Span::styled(task.priority.label(), priority_style(task.priority)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Status:   ", title_style()),
            Span::styled(task.status.label(), status_style(task.status)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Subtasks: ", title_style()),
            Span::raw(format!(
                "{} of {} done",
                task.completed_subtasks(),
                task.subtasks.len()
            )),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Updated:  ", title_style()),
            Span::raw(
                task.updated_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
        ]));
        lines.push(Line::raw(""));
        for text in task.description.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
    } else {
        let empty = Paragraph::new("No task selected").block(details_block());
        f.render_widget(empty, area);
        return;
    }

    let paragraph = Paragraph::new(lines)
        .block(details_block())
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
