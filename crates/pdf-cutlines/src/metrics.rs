//! Page measurements used to decide where guide lines stop
//!
//! Only the first page is measured: 4-up card sheets use one page size
//! throughout, and every card is laid out against the same midlines.

use crate::annotate::load_pdf;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Parent chains deeper than this are treated as cyclic
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Size and midlines of a page, in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    /// Lower-left x of the page box
    pub left: f32,
    /// Lower-left y of the page box
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl PageMetrics {
    /// Metrics for a page box whose lower-left corner is the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_origin(0.0, 0.0, width, height)
    }

    pub fn with_origin(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Build metrics from a `[llx lly urx ury]` box, normalizing swapped corners
    pub fn from_box(llx: f32, lly: f32, urx: f32, ury: f32) -> Result<Self> {
        if ![llx, lly, urx, ury].iter().all(|v| v.is_finite()) {
            return Err(CutLineError::InvalidPageBox(format!(
                "non-finite coordinates [{} {} {} {}]",
                llx, lly, urx, ury
            )));
        }

        let (left, right) = (llx.min(urx), llx.max(urx));
        let (bottom, top) = (lly.min(ury), lly.max(ury));
        let width = right - left;
        let height = top - bottom;

        if width <= 0.0 || height <= 0.0 {
            return Err(CutLineError::InvalidPageBox(format!(
                "empty page box [{} {} {} {}]",
                llx, lly, urx, ury
            )));
        }

        Ok(Self::with_origin(left, bottom, width, height))
    }

    /// Measure the first page of a loaded document
    pub fn from_document(doc: &Document) -> Result<Self> {
        let (_, first_page_id) = doc
            .get_pages()
            .into_iter()
            .next()
            .ok_or(CutLineError::NoPages)?;

        let media_box = inherited_media_box(doc, first_page_id)?;
        let coords = media_box
            .iter()
            .map(|obj| resolve(doc, obj).and_then(|o| o.as_float().map_err(CutLineError::from)))
            .collect::<Result<Vec<f32>>>()
            .map_err(|e| CutLineError::InvalidPageBox(format!("bad MediaBox entry: {}", e)))?;

        match coords.as_slice() {
            [llx, lly, urx, ury] => Self::from_box(*llx, *lly, *urx, *ury),
            other => Err(CutLineError::InvalidPageBox(format!(
                "MediaBox has {} entries, expected 4",
                other.len()
            ))),
        }
    }

    /// Y coordinate of the line splitting the page into top and bottom halves
    pub fn mid_horizontal(&self) -> f32 {
        self.bottom + self.height / 2.0
    }

    /// X coordinate of the line splitting the page into left and right halves
    pub fn mid_vertical(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// `(mid_horizontal, mid_vertical)`
    pub fn midpoints(&self) -> (f32, f32) {
        (self.mid_horizontal(), self.mid_vertical())
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }
}

/// Load a document and measure its first page
pub async fn read_page_metrics(path: impl AsRef<Path>) -> Result<PageMetrics> {
    let doc = load_pdf(path).await?;
    PageMetrics::from_document(&doc)
}

/// Midlines of the first page of the document at `path`, as
/// `(mid_horizontal, mid_vertical)`
pub async fn find_page_middle(path: impl AsRef<Path>) -> Result<(f32, f32)> {
    Ok(read_page_metrics(path).await?.midpoints())
}

/// Find the MediaBox for a page, walking up `/Parent` for inherited values
fn inherited_media_box(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let array = resolve(doc, obj)?
                .as_array()
                .map_err(|_| CutLineError::InvalidPageBox("MediaBox is not an array".to_string()))?;
            return Ok(array.clone());
        }

        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => dict = doc.get_dictionary(parent_id)?,
            Err(_) => break,
        }
    }

    Err(CutLineError::InvalidPageBox(
        "first page has no MediaBox".to_string(),
    ))
}

/// Follow indirect references to the underlying object
fn resolve<'a>(doc: &'a Document, mut obj: &'a Object) -> Result<&'a Object> {
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        match obj {
            Object::Reference(id) => obj = doc.get_object(*id)?,
            _ => return Ok(obj),
        }
    }
    Err(CutLineError::InvalidPageBox(
        "reference chain too deep".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_midpoints() {
        let metrics = PageMetrics::new(612.0, 792.0);
        assert_eq!(metrics.midpoints(), (396.0, 306.0));
        assert_eq!(metrics.right(), 612.0);
        assert_eq!(metrics.top(), 792.0);
    }

    #[test]
    fn test_from_box_normalizes_swapped_corners() {
        let metrics = PageMetrics::from_box(612.0, 792.0, 0.0, 0.0).unwrap();
        assert_eq!(metrics, PageMetrics::new(612.0, 792.0));
    }

    #[test]
    fn test_from_box_offset_origin() {
        let metrics = PageMetrics::from_box(10.0, 20.0, 622.0, 812.0).unwrap();
        assert_eq!(metrics.width, 612.0);
        assert_eq!(metrics.height, 792.0);
        assert_eq!(metrics.midpoints(), (416.0, 316.0));
    }

    #[test]
    fn test_from_box_rejects_empty() {
        assert!(matches!(
            PageMetrics::from_box(0.0, 0.0, 0.0, 792.0),
            Err(CutLineError::InvalidPageBox(_))
        ));
    }
}
