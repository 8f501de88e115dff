//! Line annotation objects
//!
//! Each guide line becomes a `/Line` annotation with its own appearance
//! stream. The appearance is a form XObject in page space, so its BBox and
//! the annotation Rect are the same rectangle and no Matrix is needed.

use crate::constants::ANNOTATION_FLAG_PRINT;
use crate::options::LineStyle;
use crate::types::LineSegment;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Rect around a segment, padded so horizontal and vertical lines are not
/// zero-area
pub(crate) fn annotation_rect(segment: &LineSegment, style: &LineStyle) -> [f32; 4] {
    let (x_min, y_min, x_max, y_max) = segment.bounds();
    let pad = style.width;
    [x_min - pad, y_min - pad, x_max + pad, y_max + pad]
}

/// Content stream stroking the segment
pub(crate) fn appearance_ops(segment: &LineSegment, style: &LineStyle) -> String {
    let [r, g, b] = style.color;
    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} RG\n", r, g, b));
    ops.push_str(&format!("{} w\n", style.width));
    ops.push_str("[] 0 d\n");
    ops.push_str(&format!(
        "{} {} m {} {} l S\n",
        segment.start.x, segment.start.y, segment.end.x, segment.end.y
    ));
    ops.push_str("Q\n");
    ops
}

/// Add the normal appearance stream for a segment, shareable across pages
pub(crate) fn add_appearance(
    doc: &mut Document,
    segment: &LineSegment,
    style: &LineStyle,
) -> ObjectId {
    let bbox = annotation_rect(segment, style);
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => reals(&bbox),
    };
    doc.add_object(Stream::new(dict, appearance_ops(segment, style).into_bytes()))
}

/// Build the `/Line` annotation dictionary for one segment on one page
pub(crate) fn line_annotation(
    segment: &LineSegment,
    style: &LineStyle,
    page_id: ObjectId,
    appearance_id: ObjectId,
) -> Dictionary {
    let start = segment.start;
    let end = segment.end;

    let mut border = Dictionary::new();
    border.set("W", Object::Real(style.width));
    border.set("S", Object::Name(b"S".to_vec()));

    let mut appearance = Dictionary::new();
    appearance.set("N", Object::Reference(appearance_id));

    let mut annot = Dictionary::new();
    annot.set("Type", Object::Name(b"Annot".to_vec()));
    annot.set("Subtype", Object::Name(b"Line".to_vec()));
    annot.set("Rect", reals(&annotation_rect(segment, style)));
    annot.set("L", reals(&[start.x, start.y, end.x, end.y]));
    annot.set(
        "LE",
        Object::Array(vec![
            Object::Name(b"None".to_vec()),
            Object::Name(b"None".to_vec()),
        ]),
    );
    annot.set("C", reals(&style.color));
    annot.set("BS", Object::Dictionary(border));
    annot.set("F", Object::Integer(ANNOTATION_FLAG_PRINT));
    annot.set("P", Object::Reference(page_id));
    annot.set("AP", Object::Dictionary(appearance));
    annot
}

fn reals(values: &[f32]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn test_rect_pads_vertical_line() {
        let seg = LineSegment::new(Point::new(68.4, 722.2), Point::new(68.4, 792.0));
        let rect = annotation_rect(&seg, &LineStyle::default());
        assert!(rect[2] > rect[0]);
        assert_eq!(rect[1], 722.2 - 0.5);
        assert_eq!(rect[3], 792.5);
    }

    #[test]
    fn test_rect_normalizes_reversed_segment() {
        let seg = LineSegment::new(Point::new(100.0, 50.0), Point::new(0.0, 50.0));
        let rect = annotation_rect(&seg, &LineStyle::default());
        assert_eq!(rect, [-0.5, 49.5, 100.5, 50.5]);
    }

    #[test]
    fn test_appearance_ops_strokes_segment() {
        let seg = LineSegment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let ops = appearance_ops(&seg, &LineStyle::default());
        assert!(ops.starts_with("q\n"));
        assert!(ops.contains("0.5 w\n"));
        assert!(ops.contains("1 2 m 3 4 l S\n"));
        assert!(ops.ends_with("Q\n"));
    }
}
