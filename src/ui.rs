pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, LineGauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    config::{Config, Theme},
    frame::{CharClass, Frame, Segment},
    session::Viewport,
};

const HORIZONTAL_MARGIN: u16 = 2;
const STATS_LINES: u16 = 3;

/// The typing screen: progress, text, live WPM chart and statistics.
pub struct TypingView<'a> {
    pub frame: &'a Frame<'a>,
    pub config: &'a Config,
    pub viewport: Viewport,
}

impl<'a> TypingView<'a> {
    pub fn new(frame: &'a Frame<'a>, config: &'a Config, viewport: Viewport) -> Self {
        Self {
            frame,
            config,
            viewport,
        }
    }
}

/// Splits segments into styled lines at embedded newlines.
pub fn styled_lines<'a>(segments: &'a [Segment], theme: &Theme) -> Vec<Line<'a>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let typed_style = Style::default().fg(theme.typed_color());
    let error_style = Style::default().patch(bold_style).fg(theme.error_color());
    let untyped_style = Style::default()
        .fg(theme.untyped_color())
        .add_modifier(Modifier::DIM);

    let mut lines = vec![Line::default()];
    for segment in segments {
        let style = match segment.class {
            CharClass::Correct => typed_style,
            CharClass::Incorrect => error_style,
            CharClass::Untyped => untyped_style,
        };
        for (idx, part) in segment.text.split('\n').enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.spans.push(Span::styled(part, style));
                }
            }
        }
    }
    lines
}

/// Rows the wrapped text needs at `width`.
fn text_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let cols: usize = line.spans.iter().map(|s| s.content.width()).sum();
            cols.div_ceil(width).max(1) as u16
        })
        .sum()
}

impl Widget for TypingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.frame;
        let theme = &self.config.theme;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let graph_style = Style::default().fg(theme.graph_color());

        let width = self
            .viewport
            .width
            .saturating_add(HORIZONTAL_MARGIN * 2)
            .min(area.width);
        let area = Rect { width, ..area };

        let lines = styled_lines(&frame.segments, theme);
        let inner_width = width.saturating_sub(HORIZONTAL_MARGIN * 2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(1), // progress
                Constraint::Length(1), // padding
                Constraint::Length(text_height(&lines, inner_width)),
                Constraint::Length(1), // padding
                Constraint::Length(self.config.graph_height.saturating_add(2)),
                Constraint::Length(STATS_LINES),
                Constraint::Min(0),
            ])
            .split(area);

        LineGauge::default()
            .filled_style(graph_style)
            .line_set(symbols::line::THICK)
            .ratio(frame.percent.clamp(0.0, 1.0))
            .render(chunks[0], buf);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        let (x_max, y_max) = charting::compute_chart_params(frame.wpm_history);
        let points = charting::chart_points(frame.wpm_history);
        let datasets = vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .style(graph_style)
            .graph_type(GraphType::Line)
            .data(&points)];

        Chart::new(datasets)
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(
                Axis::default()
                    .title("wpm")
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(charting::format_label(y_max), bold_style),
                    ]),
            )
            .render(chunks[4], buf);

        let stats = frame.stats;
        Paragraph::new(vec![
            Line::from(format!("time: {:.0}s", stats.elapsed.as_secs_f64())),
            Line::from(format!(
                "WPM: {:.2}, BPM: {:.2}, word count: {}, chars: {}",
                stats.wpm, stats.cpm, stats.word_count, stats.correct_chars
            )),
            Line::from(format!(
                "backspace: {}, backspace rate: {:.2}%",
                stats.backspaces, stats.backspace_rate
            )),
        ])
        .style(bold_style)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);
    }
}
