//! Ratatui-based terminal UI.
//!
//! The TUI shows the headline for the active range, a row of range buttons
//! (the active one highlighted) and the chart of the points in range.
//! Reloads replace the whole series; a failed reload keeps the previous one
//! on screen.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{self, LoadOutput, RangeView};
use crate::data::SourceClient;
use crate::domain::{Observation, RangeSelection, RangeSelector, Source};
use crate::error::AppError;
use crate::report::format::{format_axis_date, format_headline};
use crate::report::Tone;

mod plotters_chart;

use plotters_chart::SeriesChart;

/// Start the TUI.
pub fn run(source: Source, range: RangeSelection) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::unavailable(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source, range);
    app.reload_with_notice(&mut terminal)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::unavailable(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::unavailable(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Redraw,
    Reload,
    Quit,
}

struct App {
    source: Source,
    client: SourceClient,
    loaded: Option<LoadOutput>,
    selection: RangeSelection,
    status: String,
}

impl App {
    fn new(source: Source, selection: RangeSelection) -> Self {
        Self {
            source,
            client: SourceClient::new(),
            loaded: None,
            selection,
            status: String::new(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.redraw(terminal)?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::unavailable(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::unavailable(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match self.handle_key(key.code) {
                        Action::Quit => break,
                        Action::Reload => {
                            self.reload_with_notice(terminal)?;
                            needs_redraw = true;
                        }
                        Action::Redraw => needs_redraw = true,
                        Action::None => {}
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn redraw<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        terminal
            .draw(|f| self.draw(f))
            .map_err(|e| AppError::unavailable(format!("Terminal draw error: {e}")))?;
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Left => {
                self.select(self.active_selector().map_or(RangeSelector::All, RangeSelector::prev));
                Action::Redraw
            }
            KeyCode::Right | KeyCode::Tab => {
                self.select(self.active_selector().map_or(RangeSelector::All, RangeSelector::next));
                Action::Redraw
            }
            KeyCode::Char(c) => match selector_for_key(c) {
                Some(selector) => {
                    self.select(selector);
                    Action::Redraw
                }
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn active_selector(&self) -> Option<RangeSelector> {
        self.selection.selector()
    }

    fn select(&mut self, selector: RangeSelector) {
        self.selection = RangeSelection::Named(selector);
        self.status = format!("range: {}", selector.label());
    }

    /// Show a fetching notice, then block on the reload.
    fn reload_with_notice<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        self.status = format!("Fetching {}...", self.source.describe());
        self.redraw(terminal)?;
        self.reload();
        Ok(())
    }

    fn reload(&mut self) {
        match pipeline::load_series_with(&self.client, &self.source) {
            Ok(out) => {
                self.status = if out.series.is_empty() {
                    "No data: the export held no valid rows.".to_string()
                } else {
                    format!(
                        "Loaded {} points ({} rows skipped).",
                        out.stats.rows_used, out.stats.rows_rejected
                    )
                };
                self.loaded = Some(out);
            }
            Err(err) => {
                // Keep whatever was loaded before.
                self.status = err.to_string();
            }
        }
    }

    /// The active range of a non-empty series.
    fn current_view(&self) -> Option<RangeView<'_>> {
        let loaded = self.loaded.as_ref().filter(|l| !l.series.is_empty())?;
        Some(pipeline::view(&loaded.series, &self.selection))
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let view = self.current_view();

        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0], view.as_ref());
        self.draw_ranges(frame, chunks[1]);
        self.draw_chart(frame, chunks[2], view.as_ref());
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: Option<&RangeView<'_>>) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("points", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled(self.source.describe(), Style::default().fg(Color::Gray)),
        ]));

        // An empty range leaves the headline blank rather than showing zeros.
        match view.and_then(|v| v.headline.as_ref()) {
            Some(headline) => {
                let text = format_headline(headline);
                let tone = tone_color(text.tone);
                lines.push(Line::from(vec![
                    Span::styled(text.value, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(text.change_abs, Style::default().fg(tone)),
                    Span::raw(" "),
                    Span::styled(text.change_pct, Style::default().fg(tone)),
                    Span::raw("  "),
                    Span::styled(text.stamp, Style::default().fg(Color::Gray)),
                ]));
            }
            None => lines.push(Line::from(Span::styled("-", Style::default().fg(Color::Gray)))),
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_ranges(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(range_spans(&self.selection));
        let p = Paragraph::new(line).block(Block::default().title("Range").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: Option<&RangeView<'_>>) {
        let block = Block::default().title("Chart").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = view else {
            let msg = if self.loaded.is_some() { "No data." } else { "Waiting for data..." };
            let p = Paragraph::new(msg).style(Style::default().fg(Color::Yellow));
            frame.render_widget(p, inner);
            return;
        };

        if view.points.is_empty() {
            let p = Paragraph::new("No points in this range.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(p, inner);
            return;
        }

        let (line, x_bounds, y_bounds) = chart_series(view.points);
        let color = match view.headline.as_ref().map(|h| h.is_non_negative) {
            Some(false) => RGBColor(255, 80, 80),
            _ => RGBColor(80, 220, 120),
        };

        let widget = SeriesChart {
            line: &line,
            last: line.last().copied(),
            x_bounds,
            y_bounds,
            color,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1-7 range  ←/→ cycle  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Number keys `1`..`7` pick the range buttons left to right.
fn selector_for_key(c: char) -> Option<RangeSelector> {
    let idx = c.to_digit(10)?.checked_sub(1)? as usize;
    RangeSelector::ALL.get(idx).copied()
}

fn range_spans(selection: &RangeSelection) -> Vec<Span<'static>> {
    let active = selection.selector();
    let mut spans = Vec::new();
    for selector in RangeSelector::ALL {
        let style = if Some(selector) == active {
            Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", selector.label()), style));
        spans.push(Span::raw(" "));
    }
    if let RangeSelection::Unrecognized(label) = selection {
        spans.push(Span::styled(
            format!("({label}: from epoch)"),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
    }
}

/// Build the chart line and padded bounds for Plotters.
fn chart_series(points: &[Observation]) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let line: Vec<(f64, f64)> = points.iter().map(|p| (p.time() as f64, p.value())).collect();

    let (mut x0, mut x1) = match (line.first(), line.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (0.0, 1.0),
    };
    if x1 <= x0 {
        x0 -= 3600.0;
        x1 += 3600.0;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &line {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    (line, [x0, x1], [y_min - pad, y_max + pad])
}

fn fmt_axis_x(v: f64) -> String {
    format_axis_date(v.round() as i64)
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(time: i64, value: f64) -> Observation {
        Observation::new(time, value).unwrap()
    }

    #[test]
    fn number_keys_map_to_buttons() {
        assert_eq!(selector_for_key('1'), Some(RangeSelector::All));
        assert_eq!(selector_for_key('3'), Some(RangeSelector::OneWeek));
        assert_eq!(selector_for_key('7'), Some(RangeSelector::YearToDate));
        assert_eq!(selector_for_key('8'), None);
        assert_eq!(selector_for_key('0'), None);
        assert_eq!(selector_for_key('x'), None);
    }

    #[test]
    fn active_button_is_highlighted() {
        let spans = range_spans(&RangeSelection::Named(RangeSelector::OneMonth));
        let highlighted: Vec<&str> = spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::White))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec![" 1M "]);
    }

    #[test]
    fn unrecognized_selection_highlights_nothing() {
        let spans = range_spans(&RangeSelection::parse("5Y"));
        assert!(spans.iter().all(|s| s.style.bg != Some(Color::White)));
        assert!(spans.last().unwrap().content.contains("5Y"));
    }

    #[test]
    fn chart_bounds_pad_values_and_widen_single_instants() {
        let (line, x, y) = chart_series(&[obs(100, 10.0), obs(200, 20.0)]);
        assert_eq!(line.len(), 2);
        assert_eq!(x, [100.0, 200.0]);
        assert!((y[0] - 9.5).abs() < 1e-9 && (y[1] - 20.5).abs() < 1e-9);

        let (_, x, y) = chart_series(&[obs(100, 5.0)]);
        assert_eq!(x, [-3500.0, 3700.0]);
        assert!(y[0] < 5.0 && y[1] > 5.0);
    }

    #[test]
    fn left_from_unrecognized_starts_at_all() {
        let mut app = App::new(Source::File("x.csv".into()), RangeSelection::parse("5Y"));
        assert_eq!(app.handle_key(KeyCode::Left), Action::Redraw);
        assert_eq!(app.selection, RangeSelection::Named(RangeSelector::All));
        assert_eq!(app.handle_key(KeyCode::Left), Action::Redraw);
        assert_eq!(app.selection, RangeSelection::Named(RangeSelector::YearToDate));
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn failed_reload_keeps_previous_series() {
        let mut app = App::new(Source::File("/definitely/not/here.csv".into()), RangeSelection::default());
        app.loaded = Some(pipeline::ingest_text("2024-03-05,09:30,1\n"));
        app.reload();
        assert_eq!(app.loaded.as_ref().map(|l| l.series.len()), Some(1));
        assert!(app.status.starts_with("Data unavailable:"));
    }
}
