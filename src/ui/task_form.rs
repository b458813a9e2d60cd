use crate::app::{AppState, FormField, TaskForm};
use crate::ui::{
    layout::create_form_area,
    styles::{
        done_style, error_style, hint_style, modal_bg_style, modal_title_style, pending_style,
        priority_style, selected_style, status_style,
    },
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn label(form: &TaskForm, field: FormField, text: &str) -> Line<'static> {
    if form.field == field {
        Line::from(Span::styled(format!("{} (editing)", text), modal_title_style()))
    } else {
        Line::raw(text.to_string())
    }
}

fn text_line(form: &TaskForm, field: FormField, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if form.field == field {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

/// Render the create/edit task form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let draft = &form.session.draft;
    let modal_area = create_form_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if form.session.editing_task_id().is_some() {
        " Edit Task "
    } else {
        " New Task "
    };

    let mut lines = vec![Line::raw("")];

    lines.push(label(form, FormField::Title, "Title:"));
    lines.push(text_line(form, FormField::Title, &draft.title));
    lines.push(label(form, FormField::Description, "Description:"));
    lines.push(text_line(form, FormField::Description, &draft.description));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::raw(if form.field == FormField::Priority { "Priority: ◀ " } else { "Priority:   " }),
        Span::styled(draft.priority.label(), priority_style(draft.priority)),
        Span::raw(if form.field == FormField::Priority { " ▶" } else { "" }),
    ]));
    lines.push(Line::from(vec![
        Span::raw(if form.field == FormField::Status { "Status:   ◀ " } else { "Status:     " }),
        Span::styled(draft.status.label(), status_style(draft.status)),
        Span::raw(if form.field == FormField::Status { " ▶" } else { "" }),
    ]));
    lines.push(Line::raw(""));

    lines.push(label(form, FormField::SubtaskTitle, "New subtask title:"));
    lines.push(text_line(form, FormField::SubtaskTitle, &form.subtask_title));
    lines.push(label(form, FormField::SubtaskDescription, "New subtask description:"));
    lines.push(text_line(
        form,
        FormField::SubtaskDescription,
        &form.subtask_description,
    ));
    lines.push(Line::raw(""));

    lines.push(label(form, FormField::Pool, "Available subtasks:"));
    if let Some(e) = form.session.load_error() {
        lines.push(Line::from(Span::styled(
            format!("  (could not load: {})", e),
            error_style(),
        )));
    }
    if form.session.pool().is_empty() {
        lines.push(Line::from(Span::styled("  (none)", hint_style())));
    }
    for (idx, entry) in form.session.pool().iter().enumerate() {
        let linked = form.session.is_linked(&entry.reference);
        let check = if linked { "[x] " } else { "[ ] " };
        let title_style = if entry.is_pending() {
            pending_style()
        } else if linked {
            done_style()
        } else {
            modal_bg_style()
        };

        let mut spans = vec![
            Span::raw(format!("  {}", check)),
            Span::styled(entry.title.clone(), title_style),
        ];
        if entry.is_pending() {
            spans.push(Span::styled("  (AI, unsaved)", hint_style()));
        }

        let line = Line::from(spans);
        if form.field == FormField::Pool && idx == form.pool_cursor {
            lines.push(line.style(selected_style()));
        } else {
            lines.push(line);
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw(
        "Tab fields  ·  Enter add subtask / submit  ·  Ctrl+G AI ideas  ·  Ctrl+S save  ·  Esc cancel",
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
