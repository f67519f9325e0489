//! Modal popup rendering - command picker and help.

use super::layout::{fit_lines_to_area, popup_rect, truncate_with_ellipsis};
use crate::tui::App;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the command picker popup.
pub fn draw_picker(f: &mut Frame, app: &App) {
    let Some(picker) = app.picker() else {
        return;
    };

    let area = popup_rect(50, 50, 36, 8, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", picker.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let item_width = (inner.width as usize).saturating_sub(4);
    let selected_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, label) in picker.labels.iter().enumerate() {
        let text = truncate_with_ellipsis(label, item_width);
        let line = if idx == picker.selected {
            Line::from(vec![
                Span::styled(" ▸ ", Style::default().fg(Color::Yellow)),
                Span::styled(text, selected_style),
            ])
        } else {
            Line::from(vec![
                Span::raw("   "),
                Span::styled(text, Style::default().fg(Color::White)),
            ])
        };
        lines.push(line);
    }

    let lines = fit_lines_to_area(lines, inner, 1);
    f.render_widget(Paragraph::new(lines), inner);
}

/// Draw the help popup.
pub fn draw_help_popup(f: &mut Frame, _app: &App) {
    let area = popup_rect(55, 70, 44, 14, f.area());

    f.render_widget(Clear, area);

    let section = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let shortcuts: Vec<(&str, &str)> = vec![
        ("j / ↓", "Select next group"),
        ("k / ↑", "Select previous group"),
        ("gg / G", "Jump to first / last group"),
        ("Enter", "Run the selected group"),
        ("1-9", "Run a group by its number"),
        ("click", "Run a button on the bottom strip"),
        ("e", "Open the button editor"),
        ("r", "Reload buttons from disk"),
        ("?", "Toggle this help"),
        ("q / Ctrl+c", "Quit"),
    ];

    let editor_shortcuts: Vec<(&str, &str)> = vec![
        ("Enter", "Edit the highlighted field"),
        ("a", "Add a command to the group"),
        ("n", "Add a new group"),
        ("d", "Delete the group or command"),
        ("J / K", "Move the group down / up"),
        ("Ctrl+s", "Save and apply"),
        ("Esc", "Discard changes"),
    ];

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled("  BROWSING", section)));
    for (keys, action) in shortcuts {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<12}"), Style::default().fg(Color::Yellow)),
            Span::styled(action, Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  EDITOR", section)));
    for (keys, action) in editor_shortcuts {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<12}"), Style::default().fg(Color::Yellow)),
            Span::styled(action, Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Esc: Close", dim)));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}
