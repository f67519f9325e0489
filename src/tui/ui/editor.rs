//! Button editor modal rendering.

use super::layout::{popup_rect, truncate_with_ellipsis};
use crate::buttons::Alignment as ButtonAlignment;
use crate::surface::{EditorRow, EditorSurface, GroupField};
use crate::tui::App;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the button editor popup.
pub fn draw_editor(f: &mut Frame, app: &App) {
    let Some(editor) = app.editor() else {
        return;
    };

    let area = popup_rect(75, 85, 56, 16, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Button Editor ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = editor.rows();
    let height = inner.height as usize;
    let width = inner.width as usize;
    if height == 0 || width == 0 {
        return;
    }

    // Keep the cursor visible by centering the window on it.
    let mut start = editor.cursor().saturating_sub(height / 2);
    if start + height > rows.len() {
        start = rows.len().saturating_sub(height);
    }
    let end = (start + height).min(rows.len());

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    for (offset, row) in rows[start..end].iter().enumerate() {
        let is_cursor = start + offset == editor.cursor();
        lines.push(render_row(editor, *row, is_cursor, width));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_row(
    editor: &EditorSurface,
    row: EditorRow,
    is_cursor: bool,
    width: usize,
) -> Line<'static> {
    let cursor_bg = Style::default().bg(Color::Rgb(30, 40, 60));
    let input_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    // A row being edited shows the live input buffer instead of the
    // stored value.
    let editing = editor.input().filter(|input| input.target == row);

    let mut spans: Vec<Span> = match row {
        EditorRow::Group(group_idx) => {
            let title = editor
                .buffer()
                .get(group_idx)
                .map(|group| group.text.clone())
                .unwrap_or_default();
            let (title, style) = if title.is_empty() {
                (
                    "(untitled)".to_string(),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                (
                    title,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            };
            vec![
                Span::styled(
                    format!(" ▾ Group {} ", group_idx + 1),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(truncate_with_ellipsis(&title, width.saturating_sub(12)), style),
            ]
        }
        EditorRow::Field(group_idx, field) => {
            let label = field.label();
            let value_span = if let Some(input) = editing {
                Span::styled(format!("{}█", input.value), input_style)
            } else if field == GroupField::Alignment {
                let side = match editor.buffer().get(group_idx).map(|g| g.alignment) {
                    Some(ButtonAlignment::Right) => "right",
                    _ => "left",
                };
                Span::styled(
                    format!("{side} (Enter toggles)"),
                    Style::default().fg(Color::White),
                )
            } else {
                let value = editor.field_value(row);
                if value.is_empty() {
                    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(
                        truncate_with_ellipsis(&value, width.saturating_sub(16)),
                        Style::default().fg(Color::White),
                    )
                }
            };
            vec![
                Span::styled(
                    format!("     {label:<10} "),
                    Style::default().fg(Color::DarkGray),
                ),
                value_span,
            ]
        }
        EditorRow::Entry(_, entry_idx, field) => {
            let label = field.label();
            let value_span = if let Some(input) = editing {
                Span::styled(format!("{}█", input.value), input_style)
            } else {
                let value = editor.field_value(row);
                if value.is_empty() {
                    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(
                        truncate_with_ellipsis(&value, width.saturating_sub(22)),
                        Style::default().fg(Color::Cyan),
                    )
                }
            };
            vec![
                Span::styled(
                    format!("       [{}] {label:<9} ", entry_idx + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                value_span,
            ]
        }
        EditorRow::AddEntry(_) => vec![Span::styled(
            "     + Add command",
            Style::default().fg(Color::Green),
        )],
        EditorRow::AddGroup => vec![Span::styled(
            " + Add group",
            Style::default().fg(Color::Green),
        )],
    };

    if is_cursor {
        spans = spans
            .into_iter()
            .map(|span| {
                let style = span.style.patch(cursor_bg);
                Span::styled(span.content, style)
            })
            .collect();
    }

    Line::from(spans)
}
