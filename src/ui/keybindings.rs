use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{done_style, error_style, hint_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

fn hints_for(mode: UiMode) -> &'static [&'static str] {
    match mode {
        UiMode::Normal => &[
            " ↑/↓ select   ",
            "a add   ",
            "e edit   ",
            "x delete   ",
            "s status   ",
            "r reload   ",
            "t timer   ",
            "R reset   ",
            "q quit",
        ],
        UiMode::EditingTask => &[
            " Tab/Shift+Tab field   ",
            "←/→ change   ",
            "Enter add/submit   ",
            "Space link   ",
            "d remove   ",
            "Ctrl+G AI   ",
            "Ctrl+S save   ",
            "Esc cancel",
        ],
        UiMode::PickingSuggestions => &[
            " ↑/↓ move   ",
            "Space pick   ",
            "Enter add picked   ",
            "Esc discard",
        ],
        UiMode::ConfirmDelete => &[" y delete   ", "n keep"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = Line::from(
        hints_for(app.ui_mode)
            .iter()
            .map(|h| Span::raw(*h))
            .collect::<Vec<_>>(),
    );

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the last status message
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(message) = &app.status_message else {
        return;
    };
    let style = if message.is_error {
        error_style()
    } else {
        done_style()
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", message.text), style)),
        area,
    );
}
