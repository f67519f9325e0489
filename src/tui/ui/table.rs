//! Group table rendering - header, group rows, and the status line.

use super::layout::{pad_to_width, truncate_with_ellipsis};
use crate::buttons::Alignment as ButtonAlignment;
use crate::host::NoticeLevel;
use crate::tui::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub const PREFIX: &str = "  ";
pub const SEP: &str = " │ ";
const SEP_WIDTH: usize = 3;

const NUM_WIDTH: usize = 2;
const SIDE_WIDTH: usize = 5;
const PRI_WIDTH: usize = 4;

/// Draw the application header.
pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let group_count = app.manager.groups().len();

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let count_span = if group_count == 0 {
        Span::styled("[no buttons]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("[{group_count} button groups]"),
            Style::default().fg(Color::Green),
        )
    };

    let text = Line::from(vec![
        Span::styled("󰌌 ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "launchdeck ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        count_span,
    ]);

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

/// Draw the button group table.
pub fn draw_groups(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let groups = app.manager.groups();

    if groups.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No button groups configured.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "  Press e to open the editor and add one.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let header_dim = Style::default().fg(Color::DarkGray);
    let sep_style = Style::default().fg(Color::DarkGray);

    // Fixed columns plus a flexible split between the button text and
    // the command summary.
    let body = (inner.width as usize)
        .saturating_sub(PREFIX.len())
        .saturating_sub(4 * SEP_WIDTH)
        .saturating_sub(NUM_WIDTH + SIDE_WIDTH + PRI_WIDTH);
    let text_width = (body * 2 / 5).max(6);
    let commands_width = body.saturating_sub(text_width);

    let mut items: Vec<ListItem> = Vec::new();

    let header_spans = vec![
        Span::raw(PREFIX),
        Span::styled(pad_to_width("#", NUM_WIDTH, Alignment::Right), header_dim),
        Span::styled(SEP, sep_style),
        Span::styled(
            pad_to_width("Button", text_width, Alignment::Left),
            header_dim,
        ),
        Span::styled(SEP, sep_style),
        Span::styled(
            pad_to_width("Side", SIDE_WIDTH, Alignment::Left),
            header_dim,
        ),
        Span::styled(SEP, sep_style),
        Span::styled(pad_to_width("Pri", PRI_WIDTH, Alignment::Right), header_dim),
        Span::styled(SEP, sep_style),
        Span::styled(
            pad_to_width("Commands", commands_width, Alignment::Left),
            header_dim,
        ),
    ];
    items.push(ListItem::new(Line::from(header_spans)));

    let body_width = NUM_WIDTH + SIDE_WIDTH + PRI_WIDTH + text_width + commands_width + 4 * SEP_WIDTH;
    let separator_line = Line::from(vec![
        Span::raw(PREFIX),
        Span::styled("─".repeat(body_width), sep_style),
    ]);
    items.push(ListItem::new(separator_line));

    for (position, group) in groups.iter().enumerate() {
        let is_selected = position == app.selected;

        let number = if position < 9 {
            format!("{}", position + 1)
        } else {
            String::new()
        };

        let (text, text_style) = if group.text.is_empty() {
            ("(untitled)".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (group.text.clone(), Style::default().fg(Color::White))
        };

        let side = match group.alignment {
            ButtonAlignment::Left => "left",
            ButtonAlignment::Right => "right",
        };

        let commands = match group.commands.len() {
            0 => Span::styled(
                pad_to_width("(none)", commands_width, Alignment::Left),
                Style::default().fg(Color::DarkGray),
            ),
            1 => {
                let entry = &group.commands[0];
                let label = if entry.label.is_empty() {
                    &entry.command
                } else {
                    &entry.label
                };
                Span::styled(
                    pad_to_width(
                        &truncate_with_ellipsis(label, commands_width),
                        commands_width,
                        Alignment::Left,
                    ),
                    Style::default().fg(Color::Cyan),
                )
            }
            n => Span::styled(
                pad_to_width(&format!("{n} commands"), commands_width, Alignment::Left),
                Style::default().fg(Color::Cyan),
            ),
        };

        let mut spans = vec![
            Span::raw(PREFIX),
            Span::styled(
                pad_to_width(&number, NUM_WIDTH, Alignment::Right),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(SEP, sep_style),
            Span::styled(
                pad_to_width(
                    &truncate_with_ellipsis(&text, text_width),
                    text_width,
                    Alignment::Left,
                ),
                text_style,
            ),
            Span::styled(SEP, sep_style),
            Span::styled(
                pad_to_width(side, SIDE_WIDTH, Alignment::Left),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(SEP, sep_style),
            Span::styled(
                pad_to_width(&group.priority.to_string(), PRI_WIDTH, Alignment::Right),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(SEP, sep_style),
            commands,
        ];

        if is_selected {
            let bg = Style::default().bg(Color::Rgb(30, 40, 60));
            spans = spans
                .into_iter()
                .map(|span| {
                    let style = span.style.patch(bg);
                    Span::styled(span.content, style)
                })
                .collect();
        }

        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items);
    f.render_widget(list, inner);
}

/// Draw the status line above the button strip.
pub fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let status = if let Some(active) = &app.notice {
        let style = match active.notice.level {
            NoticeLevel::Error => Style::default().fg(Color::Red),
            NoticeLevel::Info => Style::default().fg(Color::Green),
        };
        Span::styled(format!(" {} ", active.notice.text), style)
    } else if app.show_editor() {
        let text = if width >= 100 {
            " Enter: edit field | a: add command | n: new group | d: delete | J/K: move | Ctrl+s: save | Esc: discard "
        } else if width >= 60 {
            " Enter: edit | a: add | n: group | d: del | Ctrl+s: save | Esc "
        } else {
            " Ctrl+s: save | Esc "
        };
        Span::styled(text, Style::default().fg(Color::Yellow))
    } else if app.show_picker() {
        let text = if width >= 50 {
            " j/k: choose | Enter: select | Esc: cancel "
        } else {
            " j/k Enter Esc "
        };
        Span::styled(text, Style::default().fg(Color::Yellow))
    } else {
        let text = if width >= 95 {
            " j/k: nav | Enter: run | 1-9: run group | e: edit | r: reload | ?: help | q: quit "
        } else if width >= 65 {
            " j/k: nav | Enter: run | e: edit | r: reload | ?: help "
        } else if width >= 35 {
            " j/k Enter e r ? q "
        } else {
            " ? help "
        };
        Span::styled(text, Style::default().fg(Color::DarkGray))
    };

    let paragraph = Paragraph::new(Line::from(status));
    f.render_widget(paragraph, area);
}
