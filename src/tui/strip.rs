//! The status strip: a one-line status bar hosting the live button
//! indicators.
//!
//! Implements [`IndicatorHost`]. Left-aligned segments lay out from the
//! left edge, right-aligned from the right edge; within one side a higher
//! priority sits closer to its edge and ties keep registration order.
//! Layout is a pure function of the registered indicators and the strip
//! width, so mouse hit-testing recomputes it instead of caching draw
//! state.

use crate::buttons::group::Alignment;
use crate::host::{HandlerFn, HandlerId, IndicatorHost, IndicatorId, IndicatorSpec};
use futures::future::BoxFuture;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

struct Indicator {
    id: IndicatorId,
    spec: IndicatorSpec,
    visible: bool,
}

/// One placed segment of the rendered strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub indicator: IndicatorId,
    pub handler: HandlerId,
    /// First column of the segment, inclusive.
    pub start: usize,
    /// Display width including the one-space padding on each side.
    pub width: usize,
    pub text: String,
    pub color: Option<Color>,
}

impl Segment {
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column < self.start + self.width
    }
}

/// Status bar host for button indicators.
#[derive(Default)]
pub struct StatusStrip {
    indicators: Vec<Indicator>,
    handlers: HashMap<HandlerId, HandlerFn>,
    next_id: u64,
}

impl StatusStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Start the dispatch future for a registered handler.
    pub fn invoke(&self, id: HandlerId) -> Option<BoxFuture<'static, ()>> {
        self.handlers.get(&id).map(|handler| handler())
    }

    /// Compute segment placement for a strip of `width` columns.
    ///
    /// Segments that no longer fit are dropped whole; the two sides never
    /// overlap.
    pub fn layout(&self, width: usize) -> Vec<Segment> {
        let mut segments = Vec::new();

        let mut left_edge = 0usize;
        for indicator in self.side(Alignment::Left) {
            let segment = self.segment_for(indicator, left_edge);
            let end = left_edge + segment.width;
            if end > width {
                break;
            }
            left_edge = end;
            segments.push(segment);
        }

        let mut right_edge = width;
        for indicator in self.side(Alignment::Right) {
            let text_width = padded_width(&indicator.spec.text);
            if right_edge < left_edge + text_width {
                break;
            }
            right_edge -= text_width;
            segments.push(self.segment_for(indicator, right_edge));
        }

        segments
    }

    /// Find the handler under a column, if any.
    pub fn hit_test(&self, column: usize, width: usize) -> Option<HandlerId> {
        self.layout(width)
            .iter()
            .find(|segment| segment.contains(column))
            .map(|segment| segment.handler)
    }

    /// Render the strip as one line of styled spans.
    pub fn line(&self, width: usize) -> Line<'static> {
        let mut segments = self.layout(width);
        segments.sort_by_key(|segment| segment.start);

        let mut spans: Vec<Span> = Vec::new();
        let mut cursor = 0usize;
        for segment in segments {
            if segment.start > cursor {
                spans.push(Span::raw(" ".repeat(segment.start - cursor)));
            }
            let style = match segment.color {
                Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
                None => Style::default().add_modifier(Modifier::BOLD),
            };
            cursor = segment.start + segment.width;
            spans.push(Span::styled(segment.text, style));
        }
        if cursor < width {
            spans.push(Span::raw(" ".repeat(width - cursor)));
        }
        Line::from(spans)
    }

    /// Visible indicators of one side, highest priority first; ties keep
    /// registration order.
    fn side(&self, alignment: Alignment) -> Vec<&Indicator> {
        let mut side: Vec<&Indicator> = self
            .indicators
            .iter()
            .filter(|indicator| indicator.visible && indicator.spec.alignment == alignment)
            .collect();
        side.sort_by_key(|indicator| std::cmp::Reverse(indicator.spec.priority));
        side
    }

    fn segment_for(&self, indicator: &Indicator, start: usize) -> Segment {
        let text = format!(" {} ", indicator.spec.text);
        Segment {
            indicator: indicator.id,
            handler: indicator.spec.handler,
            start,
            width: text.width(),
            text,
            color: indicator.spec.color.as_deref().and_then(parse_color),
        }
    }
}

impl IndicatorHost for StatusStrip {
    fn register_handler(&mut self, id: HandlerId, handler: HandlerFn) {
        self.handlers.insert(id, handler);
    }

    fn register_indicator(&mut self, spec: IndicatorSpec) -> IndicatorId {
        let id = IndicatorId(self.next_id);
        self.next_id += 1;
        self.indicators.push(Indicator {
            id,
            spec,
            visible: false,
        });
        id
    }

    fn show_indicator(&mut self, id: IndicatorId) {
        if let Some(indicator) = self
            .indicators
            .iter_mut()
            .find(|indicator| indicator.id == id)
        {
            indicator.visible = true;
        }
    }

    fn dispose_indicator(&mut self, id: IndicatorId) {
        self.indicators.retain(|indicator| indicator.id != id);
    }

    fn dispose_handler(&mut self, id: HandlerId) {
        self.handlers.remove(&id);
    }
}

fn padded_width(text: &str) -> usize {
    text.width() + 2
}

/// Parse a stored color string: `#rrggbb` hex or a basic color name.
/// Unknown values fall back to the host default.
pub fn parse_color(value: &str) -> Option<Color> {
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }
    match value.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        _ => None,
    }
}
