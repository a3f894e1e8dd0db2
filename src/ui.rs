pub mod play;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use mindgym::{games::CardState, GameKind};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Cells per row on the shape board.
pub const SHAPE_COLUMNS: usize = 6;
/// Cards per row on the memory board.
pub const CARD_COLUMNS: usize = 4;

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

/// Center `text` in a cell `width` terminal columns wide.
pub fn pad_cell(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let left = (width - used) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - used - left))
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

/// Game picker with this run's best score next to each entry.
pub struct MenuView<'a>(pub &'a App);

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "mindgym",
            bold().fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let selected = app.selected_kind();
        let lines = GameKind::ALL
            .iter()
            .map(|&kind| {
                let marker = if kind == selected { "> " } else { "  " };
                let style = if kind == selected {
                    bold().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                let best = match (app.scoreboard.best(kind), app.scoreboard.last_played(kind)) {
                    (Some(best), Some(at)) => format!(
                        "  best {} ({} plays, last at {})",
                        best,
                        app.scoreboard.plays(kind),
                        at.format("%H:%M")
                    ),
                    _ => String::new(),
                };
                Line::from(vec![
                    Span::styled(format!("{}{}", marker, kind.title()), style),
                    Span::styled(best, dim()),
                ])
            })
            .collect_vec();

        Paragraph::new(lines).render(chunks[1], buf);

        let about = Paragraph::new(Span::styled(selected.blurb(), dim()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        about.render(chunks[2], buf);

        legend("(↑/↓) choose / (enter) play / (esc)ape").render(chunks[3], buf);
    }
}

/// Final score of the session that just ended.
pub struct ResultsView<'a>(pub &'a App);

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let Some((kind, score)) = app.last_result else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let mut lines = vec![
            Line::from(Span::styled(kind.title(), bold().fg(Color::Magenta))),
            Line::from(""),
            Line::from(Span::styled(format!("Score: {}", score), bold())),
        ];
        if app.scoreboard.is_new_best(kind) {
            lines.push(Line::from(Span::styled(
                "new best!",
                bold().fg(Color::Green),
            )));
        }
        lines.extend(game_details(app).into_iter().map(|d| Line::from(Span::styled(d, dim()))));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let summary = match app.scoreboard.average(kind) {
            Some(avg) => format!(
                "{} plays   best {}   avg {:.1}   total this run {}",
                app.scoreboard.plays(kind),
                app.scoreboard.best(kind).unwrap_or(0),
                avg,
                app.scoreboard.total()
            ),
            None => String::new(),
        };
        Paragraph::new(Span::styled(
            summary,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        legend("(r)etry / (m)enu / (ctrl-c) quit").render(chunks[2], buf);
    }
}

fn game_details(app: &App) -> Vec<String> {
    use mindgym::arcade::ActiveGame;

    let Some(game) = app.game.as_ref() else {
        return Vec::new();
    };
    let mut details = vec![format!("Reached level {}", game.level())];
    match game {
        ActiveGame::Memory(s) => {
            let pairs = s.round().map_or(0, |deck| {
                (0..deck.cards.len())
                    .filter(|&i| s.game().card_state(i) == Some(CardState::Matched))
                    .count()
                    / 2
            });
            details.push(format!("{} pairs in {} moves", pairs, s.game().moves()));
        }
        ActiveGame::Thinking(s) => {
            details.push(format!(
                "{} of {} answered correctly",
                s.game().correct_answers(),
                s.game().question_count()
            ));
        }
        _ => {}
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use mindgym::config::Config;

    fn rendered(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn pad_cell_centers_wide_glyphs() {
        assert_eq!(pad_cell("7", 3), " 7 ");
        assert_eq!(pad_cell("🔴", 4).width(), 4);
        assert_eq!(pad_cell("wider", 2), "wider");
    }

    #[test]
    fn menu_lists_every_game() {
        let app = App::new(Config::default());
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        MenuView(&app).render(area, &mut buffer);

        let text = rendered(&buffer);
        for kind in GameKind::ALL {
            assert!(text.contains(kind.title()), "{} missing", kind.title());
        }
    }

    #[test]
    fn menu_shows_best_after_a_result() {
        let mut app = App::new(Config::default());
        app.scoreboard.record(GameKind::Reading, 35);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        MenuView(&app).render(area, &mut buffer);

        let at = app.scoreboard.last_played(GameKind::Reading).unwrap();
        let expected = format!("best 35 (1 plays, last at {})", at.format("%H:%M"));
        assert!(rendered(&buffer).contains(&expected));
    }

    #[test]
    fn results_show_score_and_new_best() {
        let mut app = App::new(Config::default());
        app.scoreboard.record(GameKind::Logic, 45);
        app.last_result = Some((GameKind::Logic, 45));
        app.state = AppState::Results;

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        ResultsView(&app).render(area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("Score: 45"));
        assert!(text.contains("new best!"));
        assert!(text.contains("(r)etry"));
    }

    #[test]
    fn results_without_a_result_render_nothing() {
        let app = App::new(Config::default());
        let area = Rect::new(0, 0, 40, 10);
        let mut buffer = Buffer::empty(area);
        ResultsView(&app).render(area, &mut buffer);
        assert!(rendered(&buffer).trim().is_empty());
    }

    #[test]
    fn small_areas_do_not_panic() {
        let app = App::new(Config::default());
        for area in [Rect::new(0, 0, 10, 5), Rect::new(0, 0, 200, 3)] {
            let mut buffer = Buffer::empty(area);
            MenuView(&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }
}
