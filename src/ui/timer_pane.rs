use crate::app::AppState;
use crate::timer::Phase;
use crate::ui::styles::{
    border_style, break_gauge_style, gauge_style, hint_style, modal_title_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the focus timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.timer;

    let state = if timer.is_advancing() {
        "switching…"
    } else if timer.is_running() {
        "running"
    } else {
        "paused"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" {} Timer ", timer.phase().label()),
            title_style(),
        ));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Cycles
        ])
        .split(block.inner(area));

    let clock = Line::from(vec![
        Span::styled(timer.formatted(), modal_title_style()),
        Span::styled(format!("  {}", state), hint_style()),
    ]);

    let style = match timer.phase() {
        Phase::Work => gauge_style(),
        Phase::Break => break_gauge_style(),
    };
    let gauge = Gauge::default()
        .gauge_style(style)
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label("");

    let cycles = Line::from(Span::styled(
        format!(
            "Cycles: {}   ({}m / {}m)",
            timer.completed_cycles(),
            timer.config().work_minutes,
            timer.config().break_minutes
        ),
        hint_style(),
    ));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(clock), chunks[0]);
    f.render_widget(gauge, chunks[1]);
    f.render_widget(Paragraph::new(cycles), chunks[3]);
}
