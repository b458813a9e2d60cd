use crate::app::AppState;
use crate::domain::{priority_marker, status_badge, tree_connector, Status, Subtask, Task};
use crate::ui::styles::{
    border_style, default_style, priority_style, selected_style, status_style, title_style,
    tree_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.task_list.tasks();
    let rows = app.rows();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let task = &tasks[row.task_index];
            let line = match row.subtask_index {
                Some(st_idx) => create_subtask_line(&task.subtasks[st_idx], row.is_last),
                None => create_task_line(task),
            };
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        " FocusUp ({} todo · {} doing · {} done) ",
        app.task_list.count_by_status(Status::Pending),
        app.task_list.count_by_status(Status::InProgress),
        app.task_list.count_by_status(Status::Completed),
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Format: !!  Write report  ◐ DOING  [1/3]
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", priority_marker(task.priority)),
            priority_style(task.priority),
        ),
        Span::raw(task.title.clone()),
        Span::raw("  ".to_string()),
        Span::styled(status_badge(task.status).to_string(), status_style(task.status)),
    ];

    if !task.subtasks.is_empty() {
        spans.push(Span::styled(
            format!("  [{}/{}]", task.completed_subtasks(), task.subtasks.len()),
            tree_style(),
        ));
    }

    Line::from(spans)
}

fn create_subtask_line(subtask: &Subtask, is_last: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled("     ".to_string(), tree_style()),
        Span::styled(tree_connector(is_last).to_string(), tree_style()),
        Span::raw(" ".to_string()),
        Span::raw(subtask.title.clone()),
        Span::raw("  ".to_string()),
        Span::styled(
            status_badge(subtask.status).to_string(),
            status_style(subtask.status),
        ),
    ])
}
