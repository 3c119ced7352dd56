use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Widest the trigger gets on large terminals
const TRIGGER_WIDTH: u16 = 36;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_footer(f, app, chunks[2]);

    // Dropdown last so an open list sits on top of everything else
    let trigger = draw_body(f, app, chunks[1]);
    app.dropdown.render(trigger, f.buffer_mut(), &app.theme);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match &app.status_message {
        Some(msg) => Line::from(vec![
            Span::styled(" ● ", Style::default().fg(theme.header)),
            Span::styled(msg.as_str(), Style::default().fg(theme.text)),
        ]),
        None => Line::from(Span::styled(
            " Click the dropdown to choose an option",
            Style::default().fg(theme.text_dim),
        )),
    };

    f.render_widget(Paragraph::new(line), area);
}

/// Draw the surrounding box and return where the trigger goes
fn draw_body(f: &mut Frame, app: &App, area: Rect) -> Rect {
    let theme = &app.theme;
    let block = Block::default()
        .title(Span::styled(
            " dropdown-tui ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Trigger
            Constraint::Length(1),
            Constraint::Min(0), // Current value
        ])
        .horizontal_margin(1)
        .split(inner);

    let value_line = match app.selection() {
        Some(selection) => Line::from(vec![
            Span::styled("Value: ", Style::default().fg(theme.text_dim)),
            Span::styled(selection.value, Style::default().fg(theme.accent)),
        ]),
        None => Line::from(Span::styled("Nothing selected", Style::default().fg(theme.text_dim))),
    };
    f.render_widget(Paragraph::new(value_line), rows[2]);

    let trigger = rows[0];
    Rect {
        width: trigger.width.min(TRIGGER_WIDTH),
        ..trigger
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hints: [(&str, &str); 3] = [("Click", "Open/Choose"), ("q", "Quit"), ("Esc", "Quit")];

    // Narrow terminals only get the first hint
    let max_hints = if area.width < 40 { 1 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);

    f.render_widget(footer, area);
}
