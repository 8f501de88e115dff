//! Cut guide geometry for a single card
//!
//! Each card gets eight guide lines, two per side, starting a small indent in
//! from each corner. A line on the side facing the page center stops at the
//! page midline; a line on the side facing the page edge runs out to the edge.
//! On a 2x2 sheet this turns the corner ticks into guides that span the sheet,
//! so every cut on the guillotine can be lined up against printed ink.

use crate::constants::LINES_PER_CARD;
use crate::metrics::PageMetrics;
use crate::options::{Anchor, CardDimensions, CutLineOptions};
use crate::types::*;

/// A card placed on the sheet, with its guide lines resolved against the page
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub anchor: Anchor,

    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,

    // Start points, named side first then corner
    pub top_left_start: Point,
    pub top_right_start: Point,
    pub left_top_start: Point,
    pub left_bottom_start: Point,
    pub right_top_start: Point,
    pub right_bottom_start: Point,
    pub bottom_left_start: Point,
    pub bottom_right_start: Point,

    /// Y where the top-side lines end
    pub top_end: f32,
    /// X where the left-side lines end
    pub left_end: f32,
    /// X where the right-side lines end
    pub right_end: f32,
    /// Y where the bottom-side lines end
    pub bottom_end: f32,

    /// Guide lines in [`CutLine::ALL`] order
    pub lines: [LineSegment; LINES_PER_CARD],
}

impl Card {
    pub fn new(
        anchor: Anchor,
        dims: &CardDimensions,
        page: &PageMetrics,
        right_bottom: RightBottomIndent,
    ) -> Self {
        let (mid_horizontal, mid_vertical) = page.midpoints();

        let left = anchor.x;
        let bottom = anchor.y;
        let right = anchor.x + dims.card_width;
        let top = anchor.y + dims.card_height;

        let inner_left = left + dims.left_indent;
        let inner_right = right - dims.right_indent;
        let inner_top = top - dims.top_indent;
        let inner_bottom = bottom + dims.bottom_indent;

        let top_left_start = Point::new(inner_left, top);
        let top_right_start = Point::new(inner_right, top);
        let left_top_start = Point::new(left, inner_top);
        let left_bottom_start = Point::new(left, inner_bottom);
        let right_top_start = Point::new(right, inner_top);
        let right_bottom_start = Point::new(right, inner_bottom);
        let bottom_left_start = Point::new(inner_left, bottom);
        let bottom_right_start = Point::new(inner_right, bottom);

        // A side below/left of a midline faces the center when it is the top or
        // right side, and faces the page edge when it is the bottom or left side.
        let top_end = if top_left_start.y < mid_horizontal {
            mid_horizontal
        } else {
            page.top()
        };
        let left_end = if left_top_start.x < mid_vertical {
            page.left
        } else {
            mid_vertical
        };
        let right_end = if right_top_start.x < mid_vertical {
            mid_vertical
        } else {
            page.right()
        };
        let bottom_end = if bottom_left_start.y < mid_horizontal {
            page.bottom
        } else {
            mid_horizontal
        };

        let right_bottom_end_y = match right_bottom {
            RightBottomIndent::Legacy => bottom + dims.left_indent,
            RightBottomIndent::Symmetric => inner_bottom,
        };

        let lines = [
            LineSegment::new(top_left_start, Point::new(inner_left, top_end)),
            LineSegment::new(top_right_start, Point::new(inner_right, top_end)),
            LineSegment::new(left_top_start, Point::new(left_end, inner_top)),
            LineSegment::new(left_bottom_start, Point::new(left_end, inner_bottom)),
            LineSegment::new(right_top_start, Point::new(right_end, inner_top)),
            LineSegment::new(right_bottom_start, Point::new(right_end, right_bottom_end_y)),
            LineSegment::new(bottom_left_start, Point::new(inner_left, bottom_end)),
            LineSegment::new(bottom_right_start, Point::new(inner_right, bottom_end)),
        ];

        log::debug!(
            "Card at ({}, {}): edges l={} r={} b={} t={}, ends top={} left={} right={} bottom={}",
            anchor.x,
            anchor.y,
            left,
            right,
            bottom,
            top,
            top_end,
            left_end,
            right_end,
            bottom_end
        );

        Self {
            anchor,
            top,
            bottom,
            left,
            right,
            top_left_start,
            top_right_start,
            left_top_start,
            left_bottom_start,
            right_top_start,
            right_bottom_start,
            bottom_left_start,
            bottom_right_start,
            top_end,
            left_end,
            right_end,
            bottom_end,
            lines,
        }
    }

    pub fn line(&self, which: CutLine) -> LineSegment {
        self.lines[which.index()]
    }

    pub fn labeled_lines(&self) -> impl Iterator<Item = (CutLine, LineSegment)> + '_ {
        CutLine::ALL.into_iter().zip(self.lines.iter().copied())
    }

    /// Reject geometry that cannot be written as a PDF line
    pub fn check_finite(&self) -> Result<()> {
        match self
            .labeled_lines()
            .find(|(_, seg)| !seg.start.is_finite() || !seg.end.is_finite())
        {
            Some((which, seg)) => Err(CutLineError::Geometry(format!(
                "{} line of card at ({}, {}) is not finite: {:?}",
                which.name(),
                self.anchor.x,
                self.anchor.y,
                seg
            ))),
            None => Ok(()),
        }
    }
}

/// Build one card per configured anchor, in anchor order
pub fn layout_cards(options: &CutLineOptions, page: &PageMetrics) -> Result<Vec<Card>> {
    if options.right_bottom_indent == RightBottomIndent::Legacy
        && options.card.left_indent != options.card.bottom_indent
    {
        log::warn!(
            "Right Bottom line ends use the left indent ({}) instead of the bottom indent ({}); \
             use the symmetric right-bottom indent to square them",
            options.card.left_indent,
            options.card.bottom_indent
        );
    }

    let cards: Vec<Card> = options
        .anchors
        .iter()
        .map(|&anchor| Card::new(anchor, &options.card, page, options.right_bottom_indent))
        .collect();

    for card in &cards {
        card.check_finite()?;
    }

    Ok(cards)
}
