use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use wordtype::SessionState;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const CURSOR_GLYPH: &str = "|";
const HELP_TEXT: &str = "(←) restart   (→) new words   (esc) quit";

struct Styles {
    correct: Style,
    incorrect: Style,
    remaining: Style,
    cursor: Style,
    help: Style,
    done: Style,
}

impl Styles {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            correct: bold.fg(Color::Green),
            incorrect: bold.fg(Color::Red),
            remaining: bold.add_modifier(Modifier::DIM),
            cursor: bold.fg(Color::Blue),
            help: Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            done: bold.fg(Color::Magenta),
        }
    }
}

/// One span run per word: typed chars by correctness, then the cursor glyph
/// when the word is current, then whatever of the target is left.
fn word_spans<'a>(session: &'a SessionState, styles: &Styles) -> Vec<Span<'a>> {
    let mut spans = Vec::new();

    for (idx, word) in session.words().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }

        let wrong = session.is_word_wrong(idx);
        for (c, ok) in word.typed().chars().zip(word.per_character_correctness()) {
            let mut style = if ok { styles.correct } else { styles.incorrect };
            if wrong {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(c.to_string(), style));
        }

        if idx == session.cursor() {
            spans.push(Span::styled(CURSOR_GLYPH, styles.cursor));
        }

        let remaining = word.remaining_slice();
        if !remaining.is_empty() {
            let style = if wrong {
                styles.remaining.add_modifier(Modifier::UNDERLINED)
            } else {
                styles.remaining
            };
            spans.push(Span::styled(remaining, style));
        }
    }

    spans
}

fn prompt_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let styles = Styles::new();
        let session = &self.session;

        let spans = word_spans(session, &styles);
        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let width = prompt_width(&spans);
        let prompt_lines = if width <= max_chars_per_line as usize {
            1
        } else {
            ((width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        }
        .min(area.height);
        let padding = area.height.saturating_sub(prompt_lines.saturating_add(4)) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(padding),
                    Constraint::Length(prompt_lines),
                    Constraint::Length(1),
                    Constraint::Length(1), // status
                    Constraint::Length(1), // help
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        if session.is_complete() {
            Paragraph::new(Span::styled("session complete", styles.done))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(HELP_TEXT, styles.help))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
