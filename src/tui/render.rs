//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::cards::{EpisodeCard, EpisodeGrid};
use crate::forms::{ContactTab, Form};
use crate::notify::NotificationKind;
use crate::router::Page;

use super::state::App;
use super::types::InputMode;

const ACCENT: Color = Color::Rgb(78, 205, 196);
const ALERT: Color = Color::Rgb(255, 107, 107);

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Nav bar
            Constraint::Min(0),    // Page body
            Constraint::Length(3), // Player
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_nav(frame, app, chunks[0]);

    match app.router.current() {
        Page::Home => draw_home(frame, app, chunks[1]),
        Page::Episodes => draw_episodes(frame, app, chunks[1]),
        Page::About => draw_about(frame, app, chunks[1]),
        Page::Contact => draw_contact(frame, app, chunks[1]),
    }

    draw_player(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    if app.router.menu_open() {
        draw_menu_popup(frame, app);
    }

    if let Some(notification) = app.notifier.current() {
        draw_notification(frame, &notification.message, notification.kind);
    }

    if app.show_help {
        draw_help_modal(frame, app);
    }
}

fn draw_nav(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("{} {}", i + 1, p.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.router.current().index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Beyond Consent",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn draw_home(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let welcome = Paragraph::new(
        "A podcast about digital consent, online harassment and the law.\n\n\
        Press Enter to play the latest episode, or 2 to browse all episodes.",
    )
    .block(Block::default().borders(Borders::ALL).title("Welcome"))
    .wrap(Wrap { trim: true });
    frame.render_widget(welcome, chunks[0]);

    match app.engine.catalog().latest() {
        Some(episode) => {
            draw_card(frame, &EpisodeCard::from_episode(episode), chunks[1], "Latest Episode")
        }
        None => {
            let empty = Paragraph::new("No episodes yet")
                .block(Block::default().borders(Borders::ALL).title("Latest Episode"));
            frame.render_widget(empty, chunks[1]);
        }
    }

    draw_newsletter(frame, app, chunks[2]);
}

fn draw_card(frame: &mut Frame, card: &EpisodeCard, area: Rect, title: &str) {
    let text = vec![
        Line::from(Span::styled(card.header_line(), Style::default().fg(ACCENT))),
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.description.as_str()),
        Line::from(Span::styled(card.meta_line(), Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_newsletter(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Newsletter;
    let email = app.forms.newsletter.value("Email").unwrap_or("");
    let text = if email.is_empty() && !editing {
        "Press 'i' to subscribe to the newsletter..."
    } else {
        email
    };

    let input = Paragraph::new(text)
        .style(if editing {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Newsletter")
                .border_style(focus_style(editing)),
        );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((area.x + email.chars().count() as u16 + 1, area.y + 1));
    }
}

fn draw_episodes(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search + category
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Load more
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(chunks[0]);

    draw_search_bar(frame, app, top[0]);

    let grid = app.grid().clone();
    let category = Paragraph::new(Line::from(vec![
        Span::styled(
            app.engine.state().category().label(),
            Style::default().fg(ACCENT),
        ),
        Span::raw("  "),
        Span::styled(grid.count_label(), Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Category (c)"));
    frame.render_widget(category, top[1]);

    draw_episode_list(frame, app, &grid, chunks[1]);

    if grid.load_more_visible {
        let more = Paragraph::new("[ Load more episodes (l) ]").style(Style::default().fg(ACCENT));
        frame.render_widget(more, chunks[2]);
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.input_mode == InputMode::Search;

    let search_text = if app.search_input.is_empty() && !focused {
        "Press '/' to search episodes..."
    } else {
        &app.search_input
    };

    let search = Paragraph::new(search_text)
        .style(if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(focus_style(focused)),
        );

    frame.render_widget(search, area);

    // Show cursor if search is focused
    if focused {
        frame.set_cursor_position((
            area.x + app.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn draw_episode_list(frame: &mut Frame, app: &mut App, grid: &EpisodeGrid, area: Rect) {
    if grid.is_empty() {
        let empty = Paragraph::new("No episodes match your search.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Episodes"));
        frame.render_widget(empty, area);
        return;
    }

    let playing = app.player.state().episode_id();
    let items: Vec<ListItem> = grid
        .cards
        .iter()
        .map(|card| {
            let header_style = if card.featured {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(ACCENT)
            };
            let marker = if playing == Some(card.id) { "> " } else { "" };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(card.header_line(), header_style),
                ]),
                Line::from(Span::styled(
                    card.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(card.meta_line(), Style::default().fg(Color::DarkGray))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Episodes"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("| ");

    frame.render_stateful_widget(list, area, &mut app.episode_list_state);
}

fn draw_about(frame: &mut Frame, app: &App, area: Rect) {
    let about = Paragraph::new(
        "Beyond Consent\n\n\
        Conversations with lawyers, advocates and survivors about consent in \
        digital spaces: what the law says, what platforms do, and how to keep \
        yourself and others safe online.\n\n\
        New episodes every Friday.\n\n\
        If you are in immediate danger, contact your local emergency services.",
    )
    .block(Block::default().borders(Borders::ALL).title("About"))
    .wrap(Wrap { trim: true })
    .scroll((app.router.scroll(), 0));

    frame.render_widget(about, area);
}

fn draw_contact(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from(ContactTab::General.title()),
        Line::from(ContactTab::Confidential.title()),
    ])
    .select(match app.forms.active_tab() {
        ContactTab::General => 0,
        ContactTab::Confidential => 1,
    })
    .block(Block::default().borders(Borders::ALL).title("Contact (c: switch tab)"))
    .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    draw_form(
        frame,
        app.forms.active_form(),
        app.input_mode == InputMode::Contact,
        chunks[1],
    );
}

fn draw_form(frame: &mut Frame, form: &Form, editing: bool, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in form.fields().iter().enumerate() {
        let active = editing && i == form.focused();
        let label_style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}: ", field.label), label_style),
            Span::raw(field.value.as_str()),
            if active { Span::raw("_") } else { Span::raw("") },
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        if editing {
            "Tab: next field  Enter: send  Esc: stop editing"
        } else {
            "Press 'i' to fill in the form"
        },
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(editing)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_player(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.player.state();
    let icon = if state.is_playing() { "||" } else { "|>" };
    let title = match state.episode_id() {
        Some(id) => format!("{} Episode {}", icon, id),
        None => format!("{} Player", icon),
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(ACCENT))
        .ratio((state.progress_percent() / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", state.clock(), state.total_clock()));

    frame.render_widget(gauge, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Search => "Type to filter | Enter/Esc: done | Backspace: delete",
        InputMode::Contact | InputMode::Newsletter => "Type your text | Enter: send | Esc: cancel",
        InputMode::Normal => match app.router.current() {
            Page::Home => "Enter: play latest | i: newsletter | Tab: next page | m: menu | ?: help | q: quit",
            Page::Episodes => {
                "/: search | c: category | l: load more | Enter: play | p: pause | s: share | ?: help"
            }
            Page::About => "j/k: scroll | Tab: next page | m: menu | ?: help | q: quit",
            Page::Contact => "c: switch tab | i: edit | Tab: next page | ?: help | q: quit",
        },
    };

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_menu_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(30, 40, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if i == app.menu_selection {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(page.title()).style(style)
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Menu")
            .border_style(Style::default().fg(ACCENT)),
    );
    frame.render_widget(menu, area);
}

fn draw_notification(frame: &mut Frame, message: &str, kind: NotificationKind) {
    let full = frame.area();
    let width = (message.chars().count() as u16 + 4).min(full.width.min(60));
    let area = Rect {
        x: full.x + full.width.saturating_sub(width + 2),
        y: full.y + 3,
        width,
        height: 4,
    }
    .intersection(full);
    if area.is_empty() {
        return;
    }

    let color = match kind {
        NotificationKind::Success => ACCENT,
        NotificationKind::Info => Color::Blue,
        NotificationKind::Error => ALERT,
    };

    frame.render_widget(Clear, area);
    let toast = Paragraph::new(message)
        .style(Style::default().fg(Color::White).bg(color))
        .block(Block::default().borders(Borders::ALL).title("Esc to close"))
        .wrap(Wrap { trim: true });
    frame.render_widget(toast, area);
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let help = Paragraph::new(get_help_content(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

fn get_help_content(app: &App) -> String {
    let kb = &app.keybindings;
    let global_keys = format!(
        "\
Global
──────
  {:<10}  Show/hide this help
  Ctrl+C      Force quit
  {:<10}  Next page
  {:<10}  Previous page
  1-4         Jump to page
  {:<10}  Open navigation menu
  Esc         Dismiss notification
  {:<10}  Quit

",
        kb.label(&kb.help),
        kb.label(&kb.next_page),
        kb.label(&kb.prev_page),
        kb.label(&kb.menu),
        kb.label(&kb.quit),
    );

    let page_keys = match app.router.current() {
        Page::Home => format!(
            "\
Home
────
  {:<10}  Play latest episode
  {:<10}  Subscribe to newsletter

",
            kb.label(&kb.select),
            kb.label(&kb.edit),
        ),
        Page::Episodes => format!(
            "\
Episodes
────────
  {:<10}  Search (live)
  {:<10}  Next category
  {:<10}  Load more
  {:<10}  Move down
  {:<10}  Move up
  {:<10}  Play selected episode
  {:<10}  Play / pause
  {:<10}  Copy episode link

",
            kb.label(&kb.search),
            kb.label(&kb.category),
            kb.label(&kb.load_more),
            kb.label(&kb.down),
            kb.label(&kb.up),
            kb.label(&kb.select),
            kb.label(&kb.play),
            kb.label(&kb.share),
        ),
        Page::About => format!(
            "\
About
─────
  {:<10}  Scroll down
  {:<10}  Scroll up

",
            kb.label(&kb.down),
            kb.label(&kb.up),
        ),
        Page::Contact => format!(
            "\
Contact
───────
  {:<10}  Switch form
  {:<10}  Edit form
  Tab         Next field (while editing)
  Enter       Send (while editing)

",
            kb.label(&kb.category),
            kb.label(&kb.edit),
        ),
    };

    format!("{}{}Press ? to close", global_keys, page_keys)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
