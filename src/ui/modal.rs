use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation modal
pub fn render_confirm_delete(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmDelete {
        return;
    }
    let Some(task) = app
        .confirm_delete
        .as_deref()
        .and_then(|id| app.task_list.get(id))
    else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("  Delete \"{}\"?", task.title)));
    lines.push(Line::raw(""));
    if !task.subtasks.is_empty() {
        lines.push(Line::raw(format!(
            "  Its {} linked subtasks stay available for other tasks.",
            task.subtasks.len()
        )));
        lines.push(Line::raw(""));
    }

    // Options
    lines.push(Line::from(vec![
        Span::styled("  [y]", modal_title_style()),
        Span::raw(" Delete  "),
        Span::styled("[n]", modal_title_style()),
        Span::raw(" Keep"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Delete Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the AI suggestion picker
pub fn render_suggestion_picker(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(picker) = &app.picker else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (idx, suggestion) in picker.suggestions.iter().enumerate() {
        let check = if picker.selected[idx] { "[x] " } else { "[ ] " };
        let line = Line::from(vec![
            Span::raw(format!("  {}", check)),
            Span::styled(suggestion.title.clone(), modal_title_style()),
            Span::styled(format!("  {}", suggestion.description), hint_style()),
        ]);
        if idx == picker.cursor {
            lines.push(line.style(selected_style()));
        } else {
            lines.push(line);
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Space]", modal_title_style()),
        Span::raw(" Pick  "),
        Span::styled("[Enter]", modal_title_style()),
        Span::raw(" Add picked  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Discard"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" AI Suggestions ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
