use std::io::{self, Write};
use std::time::{Duration, Instant};

use sortviz_engine::{BarView, RunMessage, SortObserver};

const CLEAR: &str = "\x1b[H\x1b[2J";
const HIGHLIGHT: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const BAR: char = '█';

/// Draws the sequence as vertical ANSI bars, one column per element.
///
/// Step messages update the mirror on every call but only redraw once per
/// frame interval; start and finish always redraw.
pub struct TerminalRenderer<W: Write> {
    out: W,
    view: BarView,
    rows: usize,
    frame_interval: Duration,
    last_frame: Option<Instant>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, rows: usize) -> Self {
        Self {
            out,
            view: BarView::default(),
            rows: rows.max(1),
            frame_interval: Duration::from_millis(16),
            last_frame: None,
        }
    }

    #[cfg(test)]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    #[cfg(test)]
    pub fn view(&self) -> &BarView {
        &self.view
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn handle(&mut self, message: &RunMessage) -> io::Result<()> {
        match message {
            RunMessage::Started { values, .. } => {
                self.view.replace(values.clone());
                self.draw()
            }
            RunMessage::Step(event) => {
                self.view.notify(*event);
                let due = self
                    .last_frame
                    .map_or(true, |last| last.elapsed() >= self.frame_interval);
                if due {
                    self.draw()?;
                }
                Ok(())
            }
            RunMessage::Finished { values, .. } => {
                self.view.replace(values.clone());
                self.draw()
            }
        }
    }

    /// Renders the current mirror, tallest row first.
    pub fn frame(&self) -> String {
        let max = u64::from(self.view.max_height().max(1));
        let rows = self.rows as u64;
        let levels: Vec<u64> = self
            .view
            .heights()
            .iter()
            .map(|height| (u64::from(*height) * rows + max - 1) / max)
            .collect();

        let mut frame = String::new();
        for row in (1..=rows).rev() {
            for (index, level) in levels.iter().enumerate() {
                if *level < row {
                    frame.push(' ');
                } else if self.view.is_highlighted(index) {
                    frame.push_str(HIGHLIGHT);
                    frame.push(BAR);
                    frame.push_str(RESET);
                } else {
                    frame.push(BAR);
                }
            }
            frame.push('\n');
        }
        frame
    }

    fn draw(&mut self) -> io::Result<()> {
        let frame = self.frame();
        write!(self.out, "{CLEAR}{frame}")?;
        self.out.flush()?;
        self.last_frame = Some(Instant::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_engine::{Algorithm, SortEvent};

    #[test]
    fn frame_scales_bars_to_rows() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 2);
        renderer
            .handle(&RunMessage::Started {
                algorithm: Algorithm::Bubble,
                values: vec![1, 2, 4],
            })
            .unwrap();
        assert_eq!(renderer.frame(), "  █\n███\n");
    }

    #[test]
    fn compared_bars_are_highlighted_until_settled() {
        let mut renderer =
            TerminalRenderer::new(Vec::new(), 1).with_frame_interval(Duration::ZERO);
        renderer
            .handle(&RunMessage::Started {
                algorithm: Algorithm::Quick,
                values: vec![3, 1],
            })
            .unwrap();
        renderer
            .handle(&RunMessage::Step(SortEvent::Compare { a: 0, b: 1 }))
            .unwrap();
        assert_eq!(
            renderer.frame(),
            format!("{HIGHLIGHT}{BAR}{RESET}{HIGHLIGHT}{BAR}{RESET}\n")
        );

        renderer
            .handle(&RunMessage::Step(SortEvent::ValueChanged { index: 0, value: 1 }))
            .unwrap();
        renderer
            .handle(&RunMessage::Step(SortEvent::Settle { a: 0, b: 1 }))
            .unwrap();
        assert_eq!(renderer.view().heights(), &[1, 1]);
        assert_eq!(renderer.frame(), "██\n");
    }

    #[test]
    fn finished_message_redraws_final_values() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 1);
        renderer
            .handle(&RunMessage::Finished {
                algorithm: Algorithm::Heap,
                cancelled: false,
                values: vec![2, 5],
            })
            .unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.starts_with(CLEAR));
        assert!(output.ends_with("██\n"));
    }
}
