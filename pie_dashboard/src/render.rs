//! Terminal rendering of animation frames as a colored bar chart.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rank_animator::{Frame, color};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block},
};
use thiserror::Error;

/// Errors while drawing to the terminal.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backing terminal failed.
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

/// Sink for animation frames.
///
/// The polling loop only depends on this trait, so tests can record frames
/// instead of owning a terminal.
pub trait FrameRenderer {
    /// Draws one frame, replacing whatever was shown before.
    fn draw(&mut self, frame: &Frame) -> Result<(), RenderError>;
}

/// Draws frames as a [`BarChart`]: one bar per entry in position order,
/// colored on the white-to-red gradient, hottest bar most saturated.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    title: String,
    /// True only when this renderer put the real terminal into raw mode
    /// and the alternate screen, and still owes the shell a teardown.
    owns_screen: bool,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Wraps an existing terminal, e.g. a test backend. No global terminal
    /// state is touched, on construction or on drop.
    pub fn new(terminal: Terminal<B>, title: impl Into<String>) -> Self {
        Self {
            terminal,
            title: title.into(),
            owns_screen: false,
        }
    }
}

impl TerminalRenderer<CrosstermBackend<Stdout>> {
    /// Takes over stdout: raw mode plus the alternate screen, so the chart
    /// replaces the shell until [`restore`](Self::restore) is called. A
    /// failure partway through setup undoes the steps already taken.
    pub fn stdout(title: impl Into<String>) -> Result<Self, RenderError> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err.into());
            }
        };
        let mut renderer = Self::new(terminal, title);
        renderer.owns_screen = true;
        Ok(renderer)
    }

    /// Hands the terminal back to the shell. Must run on shutdown and on
    /// error paths alike; the drop guard below covers panics.
    pub fn restore(&mut self) -> Result<(), RenderError> {
        self.owns_screen = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<B: Backend> Drop for TerminalRenderer<B> {
    fn drop(&mut self) {
        // Last-resort teardown when an unwind skips restore(). Errors are
        // ignored: there is no one left to report them to.
        if self.owns_screen {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

impl<B: Backend> FrameRenderer for TerminalRenderer<B> {
    fn draw(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let (min, max) = frame.value_bounds().unwrap_or((0.0, 0.0));

        // Bar heights are the value scaled by 100 so fractional
        // mid-animation values still move the bars; the caption under each
        // bar shows the real value.
        let bars: Vec<Bar> = frame
            .entries
            .iter()
            .map(|entry| {
                let (r, g, b) = color::gradient_rgb(color::intensity(entry.value, min, max));
                Bar::default()
                    .value((entry.value.max(0.0) * 100.0).round() as u64)
                    .text_value(entry.display_value())
                    .label(entry.label.clone().into())
                    .style(Style::default().fg(Color::Rgb(r, g, b)))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::bordered().title(self.title.clone()))
            .bar_width(9)
            .bar_gap(2)
            .data(BarGroup::default().bars(&bars));

        self.terminal.draw(|f| f.render_widget(chart, f.area()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rank_animator::FrameEntry;
    use ratatui::backend::TestBackend;

    use super::*;

    fn frame() -> Frame {
        Frame {
            entries: vec![
                FrameEntry {
                    label: "Mr Patel".to_string(),
                    value: 12.0,
                    position: 0.0,
                },
                FrameEntry {
                    label: "Ms Chen".to_string(),
                    value: 5.0,
                    position: 1.0,
                },
            ],
        }
    }

    fn buffer_text(renderer: &TerminalRenderer<TestBackend>) -> String {
        renderer
            .terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draw_shows_title_labels_and_captions() {
        let terminal = Terminal::new(TestBackend::new(40, 16)).expect("test terminal");
        let mut renderer = TerminalRenderer::new(terminal, "Who will get pied?!");
        renderer.draw(&frame()).expect("draw succeeds");

        let text = buffer_text(&renderer);
        assert!(text.contains("Who will get pied?!"));
        assert!(text.contains("Mr Patel"));
        assert!(text.contains("Ms Chen"));
        assert!(text.contains("12"));
    }

    #[test]
    fn wrapped_backends_never_own_the_screen() {
        let terminal = Terminal::new(TestBackend::new(10, 4)).expect("test terminal");
        let renderer = TerminalRenderer::new(terminal, "t");
        // Dropping a wrapped renderer must not reach for the real terminal.
        assert!(!renderer.owns_screen);
    }

    #[test]
    fn draw_tolerates_an_empty_frame() {
        let terminal = Terminal::new(TestBackend::new(40, 16)).expect("test terminal");
        let mut renderer = TerminalRenderer::new(terminal, "Who will get pied?!");
        renderer.draw(&Frame::default()).expect("draw succeeds");
        assert!(buffer_text(&renderer).contains("Who will get pied?!"));
    }
}
