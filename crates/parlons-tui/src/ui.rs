use parlons_core::{Author, ChatMode, ChatTurn};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Screen};

const MAX_INPUT_LINES: u16 = 5;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen() {
        Screen::Chooser => render_chooser(app, frame, body_area),
        Screen::Chat => render_chat(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = match app.conversation() {
        Some(conv) => {
            let profile = conv.profile();
            format!(" {} {} ", profile.icon, conv.label(profile.title_key, profile.title_fallback))
        }
        None => " parlons ".to_string(),
    };

    let mut spans = vec![Span::styled(title, Style::default().fg(Color::Cyan).bold())];
    if app.conversation().is_some() {
        spans.push(Span::styled(
            format!(" {} ", app.label("chat.status", "En ligne • Tunisie")),
            Style::default().fg(Color::Green),
        ));
    }
    spans.push(Span::styled(
        format!(" {} ", app.language.display_name()),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::styled(
        format!("v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::Gray),
    ));

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |keys: &str, key: &str, fallback: &str| {
        vec![
            Span::styled(format!(" {keys} "), key_style),
            Span::styled(format!(" {} ", app.label(key, fallback)), label_style),
        ]
    };

    let hints: Vec<Span> = match app.screen() {
        Screen::Chooser => [
            hint("j/k", "hint.select", "choisir"),
            hint("Enter", "hint.open", "ouvrir"),
            hint("F2", "hint.language", "langue"),
            hint("Esc", "chat.choice.back", "Quitter"),
        ]
        .concat(),
        Screen::Chat => [
            hint("Enter", "hint.send", "envoyer"),
            hint("Shift+Enter", "hint.newline", "nouvelle ligne"),
            hint("PgUp/PgDn", "hint.scroll", "défiler"),
            hint("F2", "hint.language", "langue"),
            hint("Esc", "chat.back", "Retour"),
        ]
        .concat(),
    };

    let footer = Paragraph::new(Line::from(hints)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_chooser(app: &mut App, frame: &mut Frame, area: Rect) {
    let [title_area, cards_area, back_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    let heading = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            app.label("chat.choice.title", "Comment pouvons-nous vous aider ?"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.label(
                "chat.choice.subtitle",
                "Choisissez une option pour commencer la conversation",
            ),
            Style::default().fg(Color::Gray),
        )),
    ]);
    frame.render_widget(Paragraph::new(heading).alignment(Alignment::Center), title_area);

    let cards_width = 64.min(cards_area.width);
    let cards_area = Rect {
        x: cards_area.x + (cards_area.width - cards_width) / 2,
        width: cards_width,
        ..cards_area
    };

    let items: Vec<ListItem> = ChatMode::all()
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let profile = mode.profile();
            let title = app.label(profile.card_title_key, profile.card_title_fallback);
            let description =
                app.label(profile.card_description_key, profile.card_description_fallback);
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!(" {}  ", profile.icon)),
                    Span::styled(
                        format!("{}. {}", i + 1, title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("     {description}"),
                    Style::default().fg(Color::Gray),
                )),
                Line::default(),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, cards_area, &mut app.chooser_state);

    let back = Paragraph::new(Line::from(Span::styled(
        format!("Esc · {}", app.label("chat.choice.back", "Quitter")),
        Style::default().fg(Color::Blue),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(back, back_area);
}

/// Word-wrap `text` into rows of at most `width` characters.
///
/// Newlines start a new row and words longer than `width` are split, so
/// every returned string renders as exactly one terminal row.
fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut rest = word;
            loop {
                let len = rest.chars().count();
                if current_len > 0 && current_len + 1 + len <= width {
                    // Word fits on current row
                    current.push(' ');
                    current.push_str(rest);
                    current_len += 1 + len;
                    break;
                }
                if current_len > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if len <= width {
                    current.push_str(rest);
                    current_len = len;
                    break;
                }
                // Longer than a whole row: hard split
                let split = rest
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                rows.push(rest[..split].to_string());
                rest = &rest[split..];
            }
        }

        rows.push(current);
    }

    rows
}

/// Pre-wrapped rows for one turn: name line, content, trailing blank
fn turn_lines(app: &App, turn: &ChatTurn, width: usize) -> Vec<Line<'static>> {
    let (alignment, name, color) = match turn.author {
        Author::User => (Alignment::Right, app.label("chat.you", "Vous"), Color::Cyan),
        Author::Assistant => (Alignment::Left, app.label("chat.bot", "Assistant"), Color::Yellow),
    };
    let name_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let time = format!(" · {}", turn.display_time());

    let mut lines = Vec::new();
    if name.chars().count() + time.chars().count() <= width {
        lines.push(
            Line::from(vec![
                Span::styled(name, name_style),
                Span::styled(time, Style::default().fg(Color::Gray)),
            ])
            .alignment(alignment),
        );
    } else {
        for row in wrap_to_width(&format!("{name}{time}"), width) {
            lines.push(Line::from(Span::styled(row, name_style)).alignment(alignment));
        }
    }

    for row in wrap_to_width(&turn.content, width) {
        lines.push(Line::from(row).alignment(alignment));
    }
    lines.push(Line::default());
    lines
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let input_lines = (app.composer.draft().split('\n').count() as u16).clamp(1, MAX_INPUT_LINES);
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(input_lines + 2),
    ])
    .areas(area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_area = Some(chat_area);
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let Some(conv) = app.conversation() else {
        return;
    };
    let sending = conv.is_sending();
    let width = app.chat_width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for turn in conv.turns() {
        lines.extend(turn_lines(app, turn, width));
    }

    if sending {
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        let typing = format!("{}{}", conv.label("chat.typing", "En train d'écrire"), dots);
        for row in wrap_to_width(&typing, width) {
            lines.push(Line::from(Span::styled(
                row,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    // Every line is exactly one row, so the scroll bound is exact
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let back_title = format!(" ← {} (Esc) ", conv.label("chat.back", "Retour"));
    let mut chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(back_title);
    if !app.scroll.is_following() {
        chat_block = chat_block.title_bottom(Line::from(" ↓ Ctrl+End ").right_aligned());
    }

    app.scroll.set_bounds(total, app.chat_height);

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .scroll((app.scroll.offset, 0));
    frame.render_widget(chat, chat_area);

    render_input(app, frame, input_area, sending);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect, sending: bool) {
    let border_color = if sending { Color::DarkGray } else { Color::Yellow };
    let title = if sending {
        format!(" {}… ", app.label("chat.typing", "En train d'écrire"))
    } else {
        format!(" {} (Enter) ", app.label("chat.send", "Envoyer"))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let draft = app.composer.draft();

    if draft.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            app.label("chat.placeholder", "Tapez votre message..."),
            Style::default().fg(Color::Gray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        if !sending {
            frame.set_cursor_position((area.x + 1, area.y + 1));
        }
        return;
    }

    // Locate the cursor as (row, column) within the draft
    let before_cursor: String = draft.chars().take(app.composer.cursor()).collect();
    let cursor_row = before_cursor.matches('\n').count();
    let cursor_col = before_cursor
        .rsplit('\n')
        .next()
        .map(|s| s.chars().count())
        .unwrap_or(0);

    // Keep the cursor visible both ways
    let row_offset = (cursor_row + 1).saturating_sub(inner_height.max(1));
    let col_offset = if inner_width == 0 || cursor_col < inner_width {
        0
    } else {
        cursor_col - inner_width + 1
    };

    let visible: Vec<Line> = draft
        .split('\n')
        .skip(row_offset)
        .take(inner_height)
        .map(|line| Line::from(line.chars().skip(col_offset).take(inner_width).collect::<String>()))
        .collect();

    let style = if sending {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(Paragraph::new(visible).style(style).block(block), area);

    if !sending {
        frame.set_cursor_position((
            area.x + 1 + (cursor_col - col_offset) as u16,
            area.y + 1 + (cursor_row - row_offset) as u16,
        ));
    }
}
