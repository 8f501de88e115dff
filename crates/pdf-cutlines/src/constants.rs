//! Shared constants for cut line generation
//!
//! Reference measurements for the 4-up card sheets. All values are in PDF
//! points (1/72 inch).

// =============================================================================
// Card Dimensions
// =============================================================================

/// Card width in points
pub const CARD_WIDTH_PT: f32 = 198.7;

/// Card height in points
pub const CARD_HEIGHT_PT: f32 = 269.3;

/// Distance from the left edge at which the top and bottom ticks start
pub const LEFT_INDENT_PT: f32 = 8.6;

/// Distance from the right edge at which the top and bottom ticks start
pub const RIGHT_INDENT_PT: f32 = 9.5;

/// Distance from the top edge at which the left and right ticks start
pub const TOP_INDENT_PT: f32 = 8.4;

/// Distance from the bottom edge at which the left and right ticks start
pub const BOTTOM_INDENT_PT: f32 = 8.9;

// =============================================================================
// 4-up Layout
// =============================================================================

/// Bottom-left anchors of the four card slots: top-left, top-right,
/// bottom-left, bottom-right
pub const FOUR_UP_ANCHORS: [(f32, f32); 4] = [
    (59.8, 452.9),
    (352.8, 452.9),
    (59.8, 69.1),
    (352.8, 69.1),
];

/// Number of guide lines generated per card
pub const LINES_PER_CARD: usize = 8;

// =============================================================================
// Annotation Style
// =============================================================================

/// Stroke width of a guide line annotation (points)
pub const CUT_LINE_WIDTH: f32 = 0.5;

/// Stroke color of a guide line annotation (DeviceRGB)
pub const CUT_LINE_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Annotation flag bit 3: print the annotation with the page
pub const ANNOTATION_FLAG_PRINT: i64 = 4;

// =============================================================================
// Output
// =============================================================================

/// Suffix appended to the derived output file name
pub const OUTPUT_SUFFIX: &str = "_extended_cut_lines.pdf";
