use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, game::Game, render::CharStatus, session::Phase};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const MIN_FIELD_WIDTH: u16 = 12;

struct Styles {
    bold: Style,
    matched: Style,
    mismatch: Style,
    cursor: Style,
    pending: Style,
    dim: Style,
    italic: Style,
    title: Style,
}

impl Styles {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold = Style::default().patch(bold).add_modifier(Modifier::DIM);

        Self {
            bold,
            matched: Style::default().patch(bold).fg(Color::Green),
            mismatch: Style::default().patch(bold).fg(Color::Red),
            cursor: Style::default()
                .patch(dim_bold)
                .add_modifier(Modifier::UNDERLINED),
            pending: dim_bold,
            dim: Style::default().add_modifier(Modifier::DIM),
            italic: Style::default().add_modifier(Modifier::ITALIC),
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn for_status(&self, status: CharStatus) -> Style {
        match status {
            CharStatus::Matched => self.matched,
            CharStatus::Mismatch => self.mismatch,
            CharStatus::Cursor => self.cursor,
            CharStatus::Pending => self.pending,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let styles = Styles::new();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(3),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("pykeys", styles.title))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        match self.game.phase() {
            Phase::Idle => render_idle(self, &styles, chunks[1], buf),
            Phase::Active => render_active(&self.game, &styles, chunks[1], buf),
            Phase::Over => render_over(&self.game, &styles, chunks[1], buf),
        }

        let legend = match self.game.phase() {
            Phase::Idle => "(enter) start / (p)olicy / (o)rder / (esc)ape",
            Phase::Active => "(backspace) delete / (enter) submit / (esc)ape",
            Phase::Over => "(r)estart / (m)enu / (esc)ape",
        };
        Paragraph::new(Span::styled(legend, styles.italic))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

fn render_idle(app: &App, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let vocab = app.game.vocabulary();
    let config = app.game.config();

    let lines = vec![
        Line::from(Span::styled(
            format!("{} words from '{}'", vocab.len(), vocab.name()),
            styles.bold,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "policy: {}   order: {}   round: {}s",
                config.policy, config.selection, config.round_secs
            ),
            styles.dim,
        )),
        Line::from(""),
        Line::from(Span::styled("press enter to start", styles.pending)),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn score_line(game: &Game, styles: &Styles) -> Line<'static> {
    let session = game.session();
    let text = match game.accuracy() {
        Some(acc) => format!(
            "score {}   mistakes {}   {}% acc",
            session.score, session.mistakes, acc
        ),
        None => format!("score {}", session.score),
    };
    Line::from(Span::styled(text, styles.bold))
}

fn render_active(game: &Game, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let word = game.current_word();
    let field_width = u16::try_from(word.width())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(MIN_FIELD_WIDTH)
        .min(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // timer
            Constraint::Length(2), // word
            Constraint::Length(3), // input field
            Constraint::Length(1), // score
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("{}", game.session().remaining_secs),
        styles.pending,
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let spans = word
        .chars()
        .zip(game.statuses())
        .map(|(c, status)| Span::styled(c.to_string(), styles.for_status(status)))
        .collect::<Vec<Span>>();
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let field_area = centered(chunks[2], field_width);
    Paragraph::new(game.session().input.clone())
        .block(Block::default().borders(Borders::ALL))
        .render(field_area, buf);

    Paragraph::new(score_line(game, styles))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

fn render_over(game: &Game, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("time's up", styles.mismatch)),
        Line::from(""),
        score_line(game, styles),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// Horizontally centred slice of `area`
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::picker::SequentialPicker;
    use crate::policy::{Keystroke, Policy};
    use crate::session::SessionConfig;
    use crate::vocabulary::Vocabulary;
    use std::time::Instant;

    fn create_test_app(policy: Policy) -> App {
        let vocab = Vocabulary::new("test", vec!["def".into(), "class".into()]).unwrap();
        let config = SessionConfig {
            policy,
            ..SessionConfig::default()
        };
        App::new(
            Game::new(vocab, config, Box::new(SequentialPicker)),
            Config::default(),
        )
    }

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_idle_screen() {
        let app = create_test_app(Policy::Counted);
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("press enter to start"));
        assert!(text.contains("policy: counted"));
        assert!(text.contains("(enter) start"));
    }

    #[test]
    fn test_active_screen_shows_word_and_timer() {
        let mut app = create_test_app(Policy::Counted);
        let now = Instant::now();
        app.game.start(now);
        app.game.keystroke(Keystroke::Char('d'), now);

        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("def"));
        assert!(text.contains("30"));
        assert!(text.contains("mistakes 0"));
    }

    #[test]
    fn test_status_colours() {
        let mut app = create_test_app(Policy::Lenient);
        let now = Instant::now();
        app.game.start(now);
        app.game.keystroke(Keystroke::Char('d'), now);
        app.game.keystroke(Keystroke::Char('x'), now);

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let cells: Vec<_> = buffer
            .content()
            .iter()
            .filter(|c| c.symbol() == "d" && c.fg == Color::Green)
            .collect();
        assert!(!cells.is_empty());
        assert!(buffer
            .content()
            .iter()
            .any(|c| c.symbol() == "e" && c.fg == Color::Red));
    }

    #[test]
    fn test_lenient_hides_accuracy() {
        let mut app = create_test_app(Policy::Lenient);
        app.game.start(Instant::now());
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("score 0"));
        assert!(!text.contains("acc"));
    }

    #[test]
    fn test_over_screen() {
        let mut app = create_test_app(Policy::Counted);
        app.game.start(Instant::now());
        for _ in 0..30 {
            app.game.tick();
        }
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("time's up"));
        assert!(text.contains("(r)estart"));
    }

    #[test]
    fn test_tiny_areas_do_not_panic() {
        let mut app = create_test_app(Policy::Counted);
        for area in [Rect::new(0, 0, 1, 1), Rect::new(0, 0, 10, 5), Rect::new(0, 0, 200, 3)] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
        app.game.start(Instant::now());
        for area in [Rect::new(0, 0, 1, 1), Rect::new(0, 0, 10, 5)] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_word_wider_than_u16_does_not_panic() {
        let long = "a".repeat(65533);
        let vocab = Vocabulary::new("long", vec![long]).unwrap();
        let mut app = App::new(
            Game::new(vocab, SessionConfig::default(), Box::new(SequentialPicker)),
            Config::default(),
        );
        app.game.start(Instant::now());

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }

    #[test]
    fn test_centered() {
        let r = centered(Rect::new(0, 0, 20, 3), 10);
        assert_eq!(r, Rect::new(5, 0, 10, 3));
        let r = centered(Rect::new(2, 1, 4, 3), 10);
        assert_eq!(r, Rect::new(2, 1, 4, 3));
    }
}
