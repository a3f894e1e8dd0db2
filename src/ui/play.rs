use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use mindgym::{
    arcade::ActiveGame,
    games::{CardState, Feedback, Hue},
    Phase,
};

use super::{bold, dim, legend, pad_cell, CARD_COLUMNS, HORIZONTAL_MARGIN, SHAPE_COLUMNS, VERTICAL_MARGIN};
use crate::App;

const CELL_WIDTH: usize = 4;

/// The board of whichever game is mounted.
pub struct PlayView<'a>(pub &'a App);

impl Widget for PlayView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let Some(game) = app.game.as_ref() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        header(game).render(chunks[0], buf);

        if game.phase() == Phase::Idle {
            Paragraph::new(vec![
                Line::from(Span::styled(game.kind().blurb(), bold())),
                Line::from(""),
                Line::from(Span::styled("press enter to start", dim())),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
            legend("(enter) start / (esc) back").render(chunks[2], buf);
            return;
        }

        Paragraph::new(board(game, app.cursor))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);

        legend(controls(game)).render(chunks[2], buf);
    }
}

fn header(game: &ActiveGame) -> Paragraph<'static> {
    let mut spans = vec![
        Span::styled(game.kind().title(), bold().fg(Color::Magenta)),
        Span::raw(format!("   level {}   score {}", game.level(), game.score())),
    ];
    if let Some(secs) = game.time_remaining() {
        let style = if secs <= 5 {
            bold().fg(Color::Red)
        } else {
            bold()
        };
        spans.push(Span::styled(format!("   {}s", secs), style));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn controls(game: &ActiveGame) -> &'static str {
    match game {
        ActiveGame::Attention(_) | ActiveGame::Memory(_) | ActiveGame::Reading(_) => {
            "(arrows) move / (enter) pick / (esc) quit"
        }
        ActiveGame::Hemispheres(_) => "(y/←) match / (n/→) no match / (esc) quit",
        ActiveGame::Logic(_) => "(1-3) answer / (f)inish / (esc) quit",
        ActiveGame::Thinking(_) => "(1-4) answer / (enter) next / (esc) quit",
    }
}

fn cursor_style(selected: bool, style: Style) -> Style {
    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn grid_lines(cells: Vec<Span<'static>>, columns: usize) -> Vec<Line<'static>> {
    cells
        .chunks(columns.max(1))
        .map(|row| Line::from(row.to_vec()))
        .collect()
}

fn ink(hue: Hue) -> Color {
    match hue {
        Hue::Red => Color::Red,
        Hue::Blue => Color::Blue,
        Hue::Green => Color::Green,
        Hue::Yellow => Color::Yellow,
        Hue::Purple => Color::Magenta,
    }
}

fn board(game: &ActiveGame, cursor: usize) -> Vec<Line<'static>> {
    match game {
        ActiveGame::Attention(s) => {
            let Some(grid) = s.round() else {
                return Vec::new();
            };
            let hunt = s.game();
            let mut lines = vec![
                Line::from(vec![
                    Span::raw("Find every "),
                    Span::raw(grid.target.glyph()),
                    Span::styled(format!("   {} left", hunt.remaining(grid)), dim()),
                ]),
                Line::from(""),
            ];
            let cells = grid
                .cells
                .iter()
                .enumerate()
                .map(|(i, shape)| {
                    let (text, style) = if hunt.is_found(i) {
                        ("✓", bold().fg(Color::Green))
                    } else {
                        (shape.glyph(), Style::default())
                    };
                    Span::styled(pad_cell(text, CELL_WIDTH), cursor_style(i == cursor, style))
                })
                .collect_vec();
            lines.extend(grid_lines(cells, SHAPE_COLUMNS));
            lines
        }
        ActiveGame::Memory(s) => {
            let Some(deck) = s.round() else {
                return Vec::new();
            };
            let pairs = s.game();
            let mut lines = vec![
                Line::from(Span::styled(format!("moves {}", pairs.moves()), dim())),
                Line::from(""),
            ];
            let cells = deck
                .cards
                .iter()
                .enumerate()
                .map(|(i, fruit)| {
                    let (text, style) = match pairs.card_state(i) {
                        Some(CardState::FaceUp) => (fruit.glyph(), bold()),
                        Some(CardState::Matched) => (fruit.glyph(), dim()),
                        _ => ("??", Style::default().fg(Color::Cyan)),
                    };
                    Span::styled(pad_cell(text, CELL_WIDTH), cursor_style(i == cursor, style))
                })
                .collect_vec();
            lines.extend(grid_lines(cells, CARD_COLUMNS));
            lines
        }
        ActiveGame::Hemispheres(s) => {
            let Some(pair) = s.round() else {
                return Vec::new();
            };
            vec![
                Line::from(Span::styled("Does the word match its ink?", dim())),
                Line::from(""),
                Line::from(Span::styled(pair.text(), bold().fg(ink(pair.ink)))),
                Line::from(""),
                Line::from(Span::styled(format!("streak {}", s.game().streak()), dim())),
            ]
        }
        ActiveGame::Reading(s) => {
            let Some(table) = s.round() else {
                return Vec::new();
            };
            let schulte = s.game();
            let mut lines = vec![
                Line::from(vec![
                    Span::raw("Next: "),
                    Span::styled(schulte.target().to_string(), bold().fg(Color::Yellow)),
                ]),
                Line::from(""),
            ];
            let cells = table
                .numbers
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    let style = if schulte.is_cleared(n) {
                        dim()
                    } else {
                        bold()
                    };
                    Span::styled(
                        pad_cell(&n.to_string(), CELL_WIDTH),
                        cursor_style(i == cursor, style),
                    )
                })
                .collect_vec();
            lines.extend(grid_lines(cells, table.side));
            lines
        }
        ActiveGame::Logic(s) => {
            let Some(pattern) = s.round() else {
                return Vec::new();
            };
            let mut shown = pattern
                .shown
                .iter()
                .map(|t| Span::raw(format!("{} ", t.glyph())))
                .collect_vec();
            shown.push(Span::styled("?", bold().fg(Color::Yellow)));

            let options = pattern
                .options
                .iter()
                .enumerate()
                .map(|(i, t)| Span::raw(format!("  {}) {}  ", i + 1, t.glyph())))
                .collect_vec();

            let mut lines = vec![Line::from(shown), Line::from(""), Line::from(options)];
            if s.input_locked() {
                let verdict = match s.game().feedback() {
                    Some(Feedback::Correct) => Span::styled("Correct!", bold().fg(Color::Green)),
                    Some(Feedback::Wrong) => Span::styled(
                        format!("Not quite, it was {}", pattern.answer.glyph()),
                        bold().fg(Color::Red),
                    ),
                    None => Span::raw(""),
                };
                lines.push(Line::from(""));
                lines.push(Line::from(verdict));
            }
            lines
        }
        ActiveGame::Thinking(s) => {
            let Some(round) = s.round() else {
                return Vec::new();
            };
            let bank = s.game();
            let question = round.question;
            let answered = bank.answered();

            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Question {} of {}", round.index + 1, bank.question_count()),
                    dim(),
                )),
                Line::from(""),
                Line::from(Span::styled(question.prompt, bold())),
                Line::from(""),
            ];
            for (i, option) in question.options.iter().enumerate() {
                let style = match answered {
                    Some(_) if i == question.correct => bold().fg(Color::Green),
                    Some(choice) if choice == i => bold().fg(Color::Red),
                    _ => Style::default(),
                };
                lines.push(Line::from(Span::styled(format!("{}) {}", i + 1, option), style)));
            }
            if answered.is_some() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    question.explanation,
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use mindgym::{config::Config, games::QuizAction, GameKind};

    fn seeded_app() -> App {
        App::new(Config {
            seed: Some(11),
            ..Config::default()
        })
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        PlayView(app).render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn idle_game_invites_start() {
        let mut app = seeded_app();
        app.open(GameKind::Reading);
        assert_eq!(app.state, AppState::Playing);

        let text = render(&app);
        assert!(text.contains("Schulte Table"));
        assert!(text.contains("press enter to start"));
    }

    #[test]
    fn every_board_renders_once_started() {
        for kind in GameKind::ALL {
            let mut app = seeded_app();
            app.open(kind);
            if let Some(game) = app.game.as_mut() {
                game.start();
            }
            let text = render(&app);
            assert!(text.contains("score 0"), "{kind} header missing");
        }
    }

    #[test]
    fn schulte_board_shows_next_number() {
        let mut app = seeded_app();
        app.open(GameKind::Reading);
        if let Some(game) = app.game.as_mut() {
            game.start();
        }
        assert!(render(&app).contains("Next: 1"));
    }

    #[test]
    fn quiz_shows_explanation_after_answer() {
        let mut app = seeded_app();
        app.open(GameKind::Thinking);
        if let Some(ActiveGame::Thinking(s)) = app.game.as_mut() {
            s.start();
            s.submit_action(QuizAction::Answer(2));
        }
        let text = render(&app);
        assert!(text.contains("score 25"));
        assert!(text.contains("A carrot is a vegetable"));
    }
}
