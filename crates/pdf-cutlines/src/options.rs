use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical card size and the inset of each guide tick from the card corners
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardDimensions {
    pub card_width: f32,
    pub card_height: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub top_indent: f32,
    pub bottom_indent: f32,
}

impl Default for CardDimensions {
    fn default() -> Self {
        Self {
            card_width: CARD_WIDTH_PT,
            card_height: CARD_HEIGHT_PT,
            left_indent: LEFT_INDENT_PT,
            right_indent: RIGHT_INDENT_PT,
            top_indent: TOP_INDENT_PT,
            bottom_indent: BOTTOM_INDENT_PT,
        }
    }
}

/// Bottom-left corner of a card on the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The reference 4-up slots, in top-left, top-right, bottom-left,
    /// bottom-right order
    pub fn four_up() -> Vec<Anchor> {
        FOUR_UP_ANCHORS
            .iter()
            .map(|&(x, y)| Anchor::new(x, y))
            .collect()
    }
}

impl std::str::FromStr for Anchor {
    type Err = CutLineError;

    /// Parse `"x,y"`
    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| CutLineError::Config(format!("Anchor '{}' must be X,Y", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| CutLineError::Config(format!("Bad anchor coordinate '{}': {}", v, e)))
        };
        Ok(Anchor::new(parse(x)?, parse(y)?))
    }
}

/// Appearance of the emitted line annotations
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineStyle {
    /// Stroke width in points
    pub width: f32,
    /// DeviceRGB stroke color, components in 0..=1
    pub color: [f32; 3],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: CUT_LINE_WIDTH,
            color: CUT_LINE_COLOR,
        }
    }
}

/// Complete cut line configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CutLineOptions {
    pub card: CardDimensions,
    pub anchors: Vec<Anchor>,
    pub right_bottom_indent: RightBottomIndent,
    pub line_style: LineStyle,
}

impl Default for CutLineOptions {
    fn default() -> Self {
        Self {
            card: CardDimensions::default(),
            anchors: Anchor::four_up(),
            right_bottom_indent: RightBottomIndent::default(),
            line_style: LineStyle::default(),
        }
    }
}

impl CutLineOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CutLineError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CutLineError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() {
            return Err(CutLineError::Config("No card anchors specified".to_string()));
        }

        let card = &self.card;
        for (name, value) in [
            ("card_width", card.card_width),
            ("card_height", card.card_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CutLineError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("left_indent", card.left_indent),
            ("right_indent", card.right_indent),
            ("top_indent", card.top_indent),
            ("bottom_indent", card.bottom_indent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CutLineError::Config(format!(
                    "{} must be zero or positive, got {}",
                    name, value
                )));
            }
        }

        if card.left_indent + card.right_indent >= card.card_width {
            return Err(CutLineError::Config(
                "Left and right indents must be smaller than the card width".to_string(),
            ));
        }
        if card.top_indent + card.bottom_indent >= card.card_height {
            return Err(CutLineError::Config(
                "Top and bottom indents must be smaller than the card height".to_string(),
            ));
        }

        for (i, anchor) in self.anchors.iter().enumerate() {
            if !anchor.x.is_finite() || !anchor.y.is_finite() {
                return Err(CutLineError::Geometry(format!(
                    "Anchor {} is not a finite point: ({}, {})",
                    i, anchor.x, anchor.y
                )));
            }
        }

        let style = &self.line_style;
        if !style.width.is_finite() || style.width <= 0.0 {
            return Err(CutLineError::Config(format!(
                "Line width must be positive, got {}",
                style.width
            )));
        }
        if style.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(CutLineError::Config(
                "Line color components must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of line annotations each page receives
    pub fn lines_per_page(&self) -> usize {
        self.anchors.len() * LINES_PER_CARD
    }
}
