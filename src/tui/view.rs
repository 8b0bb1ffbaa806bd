// File: src/tui/view.rs
use crate::color_utils;
use crate::model::{Field, Mode, ScannerState, link};
use crate::platform::desktop::render_qr_text;
use crate::tui::action::Tab;
use crate::tui::state::{AppState, GeneratorInput, InputMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

fn accent(mode: Mode) -> Color {
    match color_utils::parse_hex_to_u8(mode.info().accent_color) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Cyan,
    }
}

fn heading(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

pub fn draw(f: &mut Frame, state: &AppState) {
    let full_help_text = vec![
        Line::from(vec![
            heading("GLOBAL", Color::Cyan),
            Span::raw(" 1/2/3 or t:Switch Tab  ?:Toggle Help  q:Quit"),
        ]),
        Line::from(vec![
            heading("FORMS", Color::Yellow),
            Span::raw(" Tab/j/k:Field  i:Edit  Esc:Stop Editing  x:Clear  Enter:Generate"),
        ]),
        Line::from(vec![
            heading("SOCIAL", Color::Green),
            Span::raw(" Left/Right:Mode  c:Next Country Code  s:Share  g:Save to Gallery"),
        ]),
        Line::from(vec![
            heading("GENERATOR", Color::Magenta),
            Span::raw(" p:Paste  s:Share"),
        ]),
        Line::from(vec![
            heading("SCANNER", Color::Blue),
            Span::raw(" Enter:Start/Submit  i:Type  g:Scan Image Path  Esc:Cancel"),
        ]),
        Line::from(vec![
            Span::raw("           "),
            Span::raw("c:Copy  o:Open Link  a:Scan Another"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), footer_height])
        .split(f.area());

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" SocialQR "))
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, v_chunks[0]);

    match state.tab {
        Tab::Social => draw_social(f, state, v_chunks[1]),
        Tab::Generator => draw_generator(f, state, v_chunks[1]),
        Tab::Scanner => draw_scanner(f, state, v_chunks[1]),
    }

    // --- FOOTER ---
    if state.show_full_help {
        let help = Paragraph::new(full_help_text)
            .block(Block::default().borders(Borders::ALL).title(" Help "));
        f.render_widget(help, v_chunks[2]);
    } else {
        let mode_label = match state.mode {
            InputMode::Normal => "NORMAL",
            InputMode::Editing => "EDIT",
        };
        let status = Paragraph::new(Line::from(vec![
            heading(mode_label, Color::Yellow),
            Span::raw(state.message.as_str()),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(status, v_chunks[2]);
    }

    // --- NOTICE POPUP ---
    if let Some(notice) = &state.notice {
        let area = centered_rect(60, 30, f.area());
        let block = Block::default()
            .title(format!(" {} ", notice.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightYellow))
            .style(Style::default().bg(Color::DarkGray));

        let buttons: Vec<Span> = notice
            .actions
            .iter()
            .map(|a| {
                let key = match a {
                    crate::error::NoticeAction::Dismiss => "[any key]",
                    crate::error::NoticeAction::ShareInstead => "[s]",
                };
                Span::styled(
                    format!(" {} {}  ", key, a.label()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();

        let lines = vec![
            Line::from(""),
            Line::from(notice.message.as_str()),
            Line::from(""),
            Line::from(buttons),
        ];
        let p = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

fn split_form_and_code(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    (chunks[0], chunks[1])
}

fn input_line<'a>(caption: &'a str, value: &'a str, focused: bool, editing: bool) -> ListItem<'a> {
    let marker = if focused { "> " } else { "  " };
    let mut value_style = Style::default();
    if focused {
        value_style = value_style.add_modifier(Modifier::UNDERLINED);
        if editing {
            value_style = value_style.fg(Color::Yellow);
        }
    }
    ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<18}", caption), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ]))
}

fn draw_social(f: &mut Frame, state: &AppState, area: Rect) {
    let mode = state.social.mode();
    let info = mode.info();
    let color = accent(mode);
    let (form_area, code_area) = split_form_and_code(area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(form_area);

    let modes: Vec<Span> = Mode::all()
        .into_iter()
        .map(|m| {
            let style = if m == mode {
                Style::default().fg(accent(m)).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", m.info().label), style)
        })
        .collect();
    let mode_bar = Paragraph::new(Line::from(modes))
        .block(Block::default().borders(Borders::ALL).title(" Mode (Left/Right) "));
    f.render_widget(mode_bar, form_chunks[0]);

    let focused = state.focused_field();
    let editing = state.mode == InputMode::Editing;
    let items: Vec<ListItem> = mode
        .fields()
        .iter()
        .map(|field| {
            let value = state.social.field(*field);
            let shown = if value.is_empty() && *field == mode.required_field() {
                info.placeholder
            } else {
                value
            };
            input_line(field.caption(), shown, *field == focused, editing)
        })
        .collect();
    let form = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", info.subtitle)),
    );
    f.render_widget(form, form_chunks[1]);

    let label = state
        .social
        .qr_value()
        .map(|_| link::display_label(mode, state.social.fields()));
    let message = state.social.field(Field::CustomMessage);
    draw_code(
        f,
        code_area,
        state.social.qr_value(),
        label.as_deref(),
        (!message.trim().is_empty()).then_some(message),
        color,
        state.result_highlighted,
    );
}

fn draw_generator(f: &mut Frame, state: &AppState, area: Rect) {
    let (form_area, code_area) = split_form_and_code(area);
    let editing = state.mode == InputMode::Editing;
    let items = vec![
        input_line(
            "Text or URL",
            state.generator.content(),
            state.generator_focus == GeneratorInput::Content,
            editing,
        ),
        input_line(
            Field::CustomMessage.caption(),
            state.generator.custom_message(),
            state.generator_focus == GeneratorInput::CustomMessage,
            editing,
        ),
    ];
    let form = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Generate QR Code "),
    );
    f.render_widget(form, form_area);

    let message = state.generator.custom_message();
    draw_code(
        f,
        code_area,
        state.generator.qr_value(),
        None,
        (!message.trim().is_empty()).then_some(message),
        Color::Cyan,
        state.result_highlighted,
    );
}

fn draw_code(
    f: &mut Frame,
    area: Rect,
    value: Option<&str>,
    label: Option<&str>,
    custom_message: Option<&str>,
    color: Color,
    highlighted: bool,
) {
    let border = if highlighted {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" QR Code ");

    let Some(value) = value else {
        let p = Paragraph::new("Nothing generated yet. Press Enter.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(msg) = custom_message {
        lines.push(Line::from(Span::styled(
            msg.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    match render_qr_text(value) {
        Ok(text) => lines.extend(text.lines().map(|l| Line::from(l.to_string()))),
        Err(e) => lines.push(Line::from(Span::styled(
            format!("Cannot render: {}", e),
            Style::default().fg(Color::Red),
        ))),
    }
    if let Some(label) = label {
        lines.push(Line::from(Span::styled(label.to_string(), Style::default().fg(color))));
    }
    lines.push(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(Color::Gray),
    )));

    let p = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    f.render_widget(p, area);
}

fn draw_scanner(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing = state.mode == InputMode::Editing;
    let (title, body): (&str, Vec<Line>) = match state.scanner.state() {
        ScannerState::Idle => (
            " Scanner ",
            vec![
                Line::from(""),
                Line::from("Press Enter to start the camera."),
            ],
        ),
        ScannerState::Scanning => (
            " Scanning... ",
            vec![
                Line::from(""),
                Line::from("Point the camera at a QR code."),
                Line::from("Type a payload (i) and press Enter to feed a frame,"),
                Line::from("or type an image path and press g. Esc cancels."),
            ],
        ),
        ScannerState::Result(result) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    result.as_str().to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            let mut actions = vec![Span::raw(" [c] Copy ")];
            if result.is_openable() {
                actions.push(Span::raw(" [o] Open Link "));
            }
            actions.push(Span::raw(" [a] Scan Another "));
            lines.push(Line::from(actions));
            (" Scanned Result ", lines)
        }
    };

    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(state.scan_input.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Frame / Image Path "));
    f.render_widget(input, chunks[0]);

    let p = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, chunks[1]);
}

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
