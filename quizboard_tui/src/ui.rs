use quizboard::{
    board_view, BoxView, Player, Rgb, TurnEngine, BOARD_SIZE, GRID_COLS, GRID_ROWS, START_BOX,
};
use ratatui::{prelude::*, widgets::*};

const BOX_WIDTH: u16 = 10;
const BOX_HEIGHT: u16 = 4;

const BOARD_WIDTH: u16 = BOX_WIDTH * GRID_COLS as u16;
const BOARD_HEIGHT: u16 = BOX_HEIGHT * GRID_ROWS as u16;

const DICE_FACES: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
const DARK_AMBER: Color = Color::Rgb(0x92, 0x40, 0x0E);
const GREEN: Color = Color::Rgb(0x22, 0xC5, 0x5E);

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Draws the whole screen. Everything shown is derived from the engine.
pub fn draw(frame: &mut Frame, engine: &TurnEngine) {
    let [header, board, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(BOARD_HEIGHT),
        Constraint::Length(3),
    ])
    .areas(frame.size());

    frame.render_widget(HeaderWidget { engine }, header);

    let board_area = centered(board, BOARD_WIDTH, BOARD_HEIGHT);
    let players = engine.players();
    for (row, cells) in board_view(engine).iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(view) = cell else {
                continue;
            };
            let area = Rect {
                x: board_area.x + col as u16 * BOX_WIDTH,
                y: board_area.y + row as u16 * BOX_HEIGHT,
                width: BOX_WIDTH,
                height: BOX_HEIGHT,
            }
            .intersection(board_area);
            frame.render_widget(BoxWidget { view, players }, area);
        }
    }

    frame.render_widget(FooterWidget { engine }, footer);

    let state = engine.state();
    if state.show_grade_picker {
        let grades = engine.grades();
        let lines: Vec<Line> = grades
            .iter()
            .enumerate()
            .map(|(i, grade)| Line::from(format!(" {}  {}", i + 1, grade)))
            .collect();
        popup(frame, "Select Grade", lines, Style::new().fg(DARK_AMBER));
    }
    if let Some(question) = &state.current_question {
        let mut lines = vec![
            Line::styled(question.text.clone(), Style::new().bold()),
            Line::default(),
        ];
        lines.extend(
            question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| Line::from(format!(" {}  {}", i + 1, option))),
        );
        popup(frame, "Question", lines, Style::new().fg(DARK_AMBER));
    }
    if state.show_correct_banner {
        popup(
            frame,
            "",
            vec![Line::styled("✔ Correct Answer!", Style::new().bold())],
            Style::new().fg(Color::White).bg(GREEN),
        );
    }
}

struct HeaderWidget<'a> {
    engine: &'a TurnEngine,
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let current = self.engine.current_player();
        let mut legend: Vec<Span> = Vec::new();
        for player in self.engine.players() {
            legend.push(Span::styled("● ", Style::new().fg(color(player.color))));
            legend.push(Span::raw(format!("{} (box {})   ", player.name, player.position)));
        }
        let text = vec![
            Line::styled("Quiz Board Game", Style::new().fg(DARK_AMBER).bold()),
            Line::from(vec![
                Span::raw("Current Turn: "),
                Span::styled(current.name.clone(), Style::new().fg(color(current.color)).bold()),
                Span::raw("   [t] swap turn"),
            ]),
            Line::from(legend),
        ];
        Paragraph::new(text).centered().render(area, buf);
    }
}

struct FooterWidget<'a> {
    engine: &'a TurnEngine,
}

impl Widget for FooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.engine.state();
        let face = DICE_FACES[(state.dice_face.clamp(1, 6) - 1) as usize];
        let dice_style = if state.is_rolling {
            Style::new().fg(AMBER).bold()
        } else if self.engine.can_roll() {
            Style::new().fg(DARK_AMBER)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let text = vec![
            Line::from(vec![
                Span::styled(format!("{}", face), dice_style),
                Span::raw(match state.dice_roll {
                    Some(roll) if !state.is_rolling => format!("  rolled {}", roll),
                    _ => String::new(),
                }),
            ]),
            Line::styled(
                "[r] roll   [1-9] choose   [q] quit",
                Style::new().fg(Color::DarkGray),
            ),
        ];
        Paragraph::new(text).right_aligned().render(area, buf);
    }
}

struct BoxWidget<'a> {
    view: &'a BoxView,
    players: &'a [Player],
}

impl Widget for BoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.view.highlighted {
            Style::new().fg(AMBER).bold()
        } else {
            Style::new().fg(Color::Gray)
        };
        let title = match self.view.id {
            START_BOX => format!("{} ▶", START_BOX),
            BOARD_SIZE => format!("{} ★", BOARD_SIZE),
            id => id.to_string(),
        };
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, Style::new().fg(DARK_AMBER)));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let marker_style = if self.view.bouncing {
            Modifier::BOLD
        } else {
            Modifier::empty()
        };
        let markers: Vec<Span> = self
            .view
            .occupants
            .iter()
            .map(|&i| {
                Span::styled(
                    "● ",
                    Style::new()
                        .fg(color(self.players[i].color))
                        .add_modifier(marker_style),
                )
            })
            .collect();
        // Bouncing tokens are drawn one line higher
        let y = if self.view.bouncing {
            inner.y
        } else {
            inner.y + inner.height - 1
        };
        buf.set_line(inner.x + 1, y, &Line::from(markers), inner.width.saturating_sub(1));
    }
}

/// A rectangle of at most `width` x `height`, centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn popup(frame: &mut Frame, title: &str, lines: Vec<Line>, style: Style) {
    let width = lines
        .iter()
        .map(|line| line.width() as u16)
        .max()
        .unwrap_or(0)
        .max(title.chars().count() as u16)
        + 6;
    let height = lines.len() as u16 + 2;
    let area = centered(frame.size(), width, height);
    frame.render_widget(Clear, area);
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(style);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
