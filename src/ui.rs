//! The UI renders the application state into something visible and clickable.
//!
//! Rendering is a projection only: it reads which section is visible, which links are active and
//! what the search panel holds, and records where things landed so mouse presses can be
//! resolved on the next event.

use crate::app_state::{AppState, Focus, HitRegions};
use crate::config::Config;
use crate::nav::LinkRef;
use crate::notify::NotificationKind;
use crate::query::{NO_RESULTS_HINT, NO_RESULTS_TITLE};
use crate::search::SnippetPart;
use crate::section::{BlockKind, Section};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 32;
const TOAST_WIDTH: u16 = 40;
/// Highlight colours for matched query text.
const MARK: Style = Style::new().fg(Color::White).bg(Color::Rgb(255, 0, 172));
const ACCENT: Color = Color::Rgb(255, 0, 172);

/// Renders the whole reader based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let mut hits = HitRegions::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + search
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(3), // Help / command line
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Percentage(40)])
        .split(chunks[0]);

    draw_location(f, app, top[0]);
    draw_search_input(f, app, top[1]);
    hits.search_input = top[1];

    let width = f.area().width;
    if app.menu.is_drawer(width) {
        draw_content(f, app, chunks[1]);
        if app.menu.is_open {
            let drawer = Rect {
                width: SIDEBAR_WIDTH.min(chunks[1].width),
                ..chunks[1]
            };
            f.render_widget(Clear, drawer);
            hits.nav_rows = draw_nav(f, app, drawer);
        }
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);
        hits.nav_rows = draw_nav(f, app, body[0]);
        draw_content(f, app, body[1]);
    }

    draw_help(f, app, chunks[2]);

    if app.search.is_open {
        let (area, rows) = draw_results(f, app, cfg, top[1], chunks[1]);
        hits.results = Some(area);
        hits.result_rows = rows;
    }

    draw_toasts(f, app, chunks[1]);

    app.hits = hits;
}

fn draw_location(f: &mut Frame, app: &AppState, area: Rect) {
    let title = app
        .router
        .active_section()
        .map_or_else(String::new, |s| s.title.clone());
    let line = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(app.router.location().href(), Style::default().fg(Color::DarkGray)),
    ]);
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Rulebook"));
    f.render_widget(widget, area);
}

fn draw_search_input(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(app.search.query.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Search (Ctrl+K)"),
    );
    f.render_widget(widget, area);

    if focused {
        let typed = u16::try_from(app.search.query.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(typed);
        f.set_cursor_position(Position::new(
            x.min(area.right().saturating_sub(2)),
            area.y + 1,
        ));
    }
}

/// Draws the sidebar and returns the screen row of every visible link.
fn draw_nav(f: &mut Frame, app: &AppState, area: Rect) -> Vec<(Rect, LinkRef)> {
    let nav = app.router.nav();
    let rows = nav.rows();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let label = nav.label(link).unwrap_or_default();
            let text = match link {
                LinkRef::Entry(entry) => {
                    let marker = match nav.entries.get(*entry) {
                        Some(e) if e.is_group() && e.expanded => "▾ ",
                        Some(e) if e.is_group() => "▸ ",
                        _ => "  ",
                    };
                    format!("{marker}{label}")
                }
                LinkRef::Child { .. } => format!("    {label}"),
                LinkRef::Anchor(_) => label.to_string(),
            };

            let mut style = if nav.is_active(link) {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if app.focus == Focus::Nav && i == app.nav_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(text)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Sections"));
    f.render_widget(list, area);

    let inner = area.inner(ratatui::layout::Margin::new(1, 1));
    rows.into_iter()
        .enumerate()
        .take(usize::from(inner.height))
        .map(|(i, link)| {
            let y = inner.y + u16::try_from(i).unwrap_or(u16::MAX);
            (Rect::new(inner.x, y, inner.width, 1), link)
        })
        .collect()
}

fn section_lines<'a>(section: &'a Section, selected_anchor: Option<usize>) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            section.title.as_str(),
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::default(),
    ];

    for block in &section.blocks {
        match block.kind {
            BlockKind::Heading(level) => {
                let color = if level == 2 { Color::Cyan } else { Color::Blue };
                lines.push(Line::from(Span::styled(
                    block.text.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
            BlockKind::Paragraph => {
                lines.push(Line::from(block.text.as_str()));
                lines.push(Line::default());
            }
            BlockKind::ListItem => {
                lines.push(Line::from(vec![Span::raw("  • "), Span::raw(block.text.as_str())]));
            }
            BlockKind::Code => {
                lines.extend(block.text.lines().map(|l| {
                    Line::from(Span::styled(
                        format!("    {l}"),
                        Style::default().fg(Color::DarkGray),
                    ))
                }));
                lines.push(Line::default());
            }
        }
    }

    if !section.anchors.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Links",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, anchor) in section.anchors.iter().enumerate() {
            let marker = if anchor.is_external() { " ↗" } else { "" };
            let mut style = Style::default().fg(Color::Cyan);
            if selected_anchor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{marker}", anchor.label), style),
                Span::styled(format!("  {}", anchor.href), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    lines
}

fn draw_content(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Content;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        });

    let Some(section) = app.router.active_section() else {
        f.render_widget(block, area);
        return;
    };

    let widget = Paragraph::new(section_lines(section, app.anchor_cursor))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.router.content_scroll, 0));
    f.render_widget(widget, area);
}

fn snippet_spans(parts: &[SnippetPart]) -> Vec<Span<'_>> {
    parts
        .iter()
        .map(|part| {
            if part.highlighted {
                Span::styled(part.text.as_str(), MARK)
            } else {
                Span::raw(part.text.as_str())
            }
        })
        .collect()
}

/// Draws the results panel under the search box and returns its area and result rows.
fn draw_results(
    f: &mut Frame,
    app: &AppState,
    cfg: &Config,
    anchor: Rect,
    body: Rect,
) -> (Rect, Vec<Rect>) {
    let rendered = app.search.rendered(cfg.snippet_chars);
    let rows_needed = if rendered.is_empty() {
        2
    } else {
        rendered.len() * 2
    };
    let height = u16::try_from(rows_needed + 2)
        .unwrap_or(u16::MAX)
        .min(body.height);
    let area = Rect::new(anchor.x, body.y, anchor.width, height);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title("Results");

    if app.search.shows_placeholder() {
        let text = vec![
            Line::from(Span::styled(
                NO_RESULTS_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(NO_RESULTS_HINT, Style::default().fg(Color::DarkGray))),
        ];
        f.render_widget(Paragraph::new(text).block(block), area);
        return (area, Vec::new());
    }

    let items: Vec<ListItem> = rendered
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let title = Line::from(Span::styled(
                result.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            let snippet = Line::from(snippet_spans(&result.snippet));
            let style = if i == app.search.cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(vec![title, snippet]).style(style)
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);

    let inner = area.inner(ratatui::layout::Margin::new(1, 1));
    let rows = (0..rendered.len())
        .map(|i| {
            let y = inner.y + u16::try_from(i * 2).unwrap_or(u16::MAX);
            Rect::new(inner.x, y, inner.width, 2).intersection(inner)
        })
        .collect();
    (area, rows)
}

fn draw_toasts(f: &mut Frame, app: &AppState, body: Rect) {
    let width = TOAST_WIDTH.min(body.width);
    let x = body.right().saturating_sub(width + 1);
    for (i, toast) in app.notifier.toasts().iter().enumerate() {
        let y = body.y + 1 + u16::try_from(i * 3).unwrap_or(u16::MAX);
        if y + 3 > body.bottom() {
            break;
        }
        let area = Rect::new(x, y, width, 3);
        let color = match toast.kind {
            NotificationKind::Success => Color::Blue,
            NotificationKind::Error => Color::Red,
        };
        f.render_widget(Clear, area);
        let widget = Paragraph::new(toast.message.as_str())
            .style(Style::default().fg(Color::White).bg(color))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let text = if app.focus == Focus::Command {
        format!(":{}", app.command_buffer)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        match app.focus {
            Focus::Search => "Type to search | ↑/↓: Pick | Enter: Open | Esc: Close".to_string(),
            Focus::Content => {
                "↑/↓/PgUp/PgDn: Scroll | Tab: Next link | Enter: Follow | Shift+Tab: Sidebar"
                    .to_string()
            }
            _ => "↑/↓: Move | Enter: Open | Space: Expand | Ctrl+K: Search | m: Menu | y: Copy link | [/]: Back/Fwd | q: Quit"
                .to_string(),
        }
    };
    let title = if app.focus == Focus::Command { "Command" } else { "" };
    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}
