use std::io::{self, Stdout};

use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use kvui_ui::{Browser, Pane, Rect, TextPane, Tone};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

#[derive(Debug, Clone, Copy)]
struct Palette {
    affirmative: Color,
    negative: Color,
    focus: Color,
    selection: Style,
}

impl Palette {
    fn new(no256: bool) -> Self {
        if no256 {
            Self {
                affirmative: Color::Green,
                negative: Color::Red,
                focus: Color::Yellow,
                selection: Style::default().bg(Color::White).fg(Color::Black),
            }
        } else {
            Self {
                affirmative: Color::Indexed(34),
                negative: Color::Indexed(160),
                focus: Color::Indexed(220),
                selection: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(16)),
            }
        }
    }

    fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Neutral => Style::default(),
            Tone::Affirmative => Style::default().fg(self.affirmative),
            Tone::Negative => Style::default().fg(self.negative),
        }
    }
}

/// Raw-mode alternate screen drawing the browser's panes. Dropping it
/// restores the terminal.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    palette: Palette,
}

impl Tui {
    pub fn init(no256: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        or_restore(stdout.execute(EnterAlternateScreen).map(|_| ()), || {
            let _ = disable_raw_mode();
        })?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = or_restore(Terminal::new(backend), restore_terminal)?;
        Ok(Self {
            terminal,
            palette: Palette::new(no256),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    pub fn draw(&mut self, browser: &Browser) -> io::Result<()> {
        let palette = self.palette;
        self.terminal
            .draw(|frame| draw_browser(frame, browser, &palette))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore_terminal();
        let _ = self.terminal.show_cursor();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

/// Runs `restore` when a setup step fails, so a half-initialised terminal is
/// not left in raw mode.
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn draw_browser(frame: &mut Frame, browser: &Browser, palette: &Palette) {
    let bounds = frame.area();
    let focused = browser.focused();

    for (id, pane) in browser.screen().iter() {
        let area = pane_area(pane.rect(), bounds);
        if area.width == 0 || area.height == 0 {
            continue;
        }
        draw_pane(frame, area, pane, id == focused, palette);
    }
}

fn draw_pane(frame: &mut Frame, area: Area, pane: &TextPane, focused: bool, palette: &Palette) {
    let mut block = Block::default().borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(palette.focus));
    }

    let cursor = pane.cursor();
    let lines: Vec<Line> = pane
        .lines()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let line = Line::raw(text.as_str());
            if pane.highlight() && index == cursor {
                line.style(palette.selection)
            } else {
                line
            }
        })
        .collect();

    let inner_height = area.height.saturating_sub(2);
    let mut paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.tone(pane.tone()))
        .scroll((scroll_offset(cursor, inner_height), 0));
    if pane.wrap() {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    frame.render_widget(paragraph, area);
}

/// Converts inclusive pane corners into a ratatui area clipped to `bounds`.
fn pane_area(rect: Rect, bounds: Area) -> Area {
    Area::new(rect.x0, rect.y0, rect.width(), rect.height()).intersection(bounds)
}

/// First visible line so that `cursor` stays inside `height` rows.
fn scroll_offset(cursor: usize, height: u16) -> u16 {
    let visible = usize::from(height.max(1));
    let offset = (cursor + 1).saturating_sub(visible);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_corners_become_width_and_height() {
        let bounds = Area::new(0, 0, 100, 40);
        assert_eq!(
            pane_area(Rect::new(21, 0, 99, 36), bounds),
            Area::new(21, 0, 79, 37)
        );
    }

    #[test]
    fn areas_are_clipped_to_the_terminal() {
        let bounds = Area::new(0, 0, 10, 5);
        assert_eq!(
            pane_area(Rect::new(5, 0, 30, 30), bounds),
            Area::new(5, 0, 5, 5)
        );
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(3, 0), 3);
    }

    #[test]
    fn failed_setup_step_restores_terminal() {
        let mut restored = false;
        let result: io::Result<()> =
            or_restore(Err(io::Error::other("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn successful_setup_step_keeps_terminal() {
        let mut restored = false;
        assert_eq!(or_restore(Ok(7), || restored = true).unwrap(), 7);
        assert!(!restored);
    }

    #[test]
    fn tones_follow_the_palette() {
        let basic = Palette::new(true);
        assert_eq!(basic.tone(Tone::Affirmative).fg, Some(Color::Green));
        assert_eq!(basic.tone(Tone::Negative).fg, Some(Color::Red));
        assert_eq!(basic.tone(Tone::Neutral).fg, None);

        let extended = Palette::new(false);
        assert_eq!(extended.tone(Tone::Affirmative).fg, Some(Color::Indexed(34)));
    }
}
