use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutLineError {
    #[error("Failed to read document {}: {reason}", .path.display())]
    DocumentRead { path: PathBuf, reason: String },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid page box: {0}")]
    InvalidPageBox(String),
    #[error("Invalid geometry: {0}")]
    Geometry(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Document has no pages")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, CutLineError>;

/// A point in PDF user space (points, origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A straight guide line from a card corner tick to its far end
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Bounding box as (x_min, y_min, x_max, y_max)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }
}

/// The eight guide lines of a card, named side first then corner.
///
/// The discriminant order is the order lines are stored in [`crate::Card::lines`]
/// and the order annotations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutLine {
    TopLeft,
    TopRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    BottomLeft,
    BottomRight,
}

impl CutLine {
    pub const ALL: [CutLine; 8] = [
        CutLine::TopLeft,
        CutLine::TopRight,
        CutLine::LeftTop,
        CutLine::LeftBottom,
        CutLine::RightTop,
        CutLine::RightBottom,
        CutLine::BottomLeft,
        CutLine::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CutLine::TopLeft => "Top Left",
            CutLine::TopRight => "Top Right",
            CutLine::LeftTop => "Left Top",
            CutLine::LeftBottom => "Left Bottom",
            CutLine::RightTop => "Right Top",
            CutLine::RightBottom => "Right Bottom",
            CutLine::BottomLeft => "Bottom Left",
            CutLine::BottomRight => "Bottom Right",
        }
    }
}

/// How the far end of the right-bottom line picks its y offset.
///
/// The reference 4-up sheets were produced with the right-bottom end point
/// offset by the *left* indent while its start uses the bottom indent, which
/// leaves that one line very slightly slanted. `Legacy` reproduces those sheets;
/// `Symmetric` offsets both ends by the bottom indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RightBottomIndent {
    #[default]
    Legacy,
    Symmetric,
}

/// Counts describing an annotation run
#[derive(Debug, Clone, PartialEq)]
pub struct CutLineStatistics {
    /// Pages in the document (unchanged by annotation)
    pub pages: usize,
    /// Number of card positions on each sheet
    pub cards: usize,
    /// Line annotations added to every page
    pub annotations_per_page: usize,
    /// Line annotations added across the document
    pub total_annotations: usize,
}
