mod common;

use common::*;
use lopdf::Object;
use pdf_cutlines::*;

#[test]
fn test_metrics_from_first_page() {
    let doc = create_test_pdf(3);
    let metrics = PageMetrics::from_document(&doc).unwrap();
    assert_eq!(metrics.width, 612.0);
    assert_eq!(metrics.height, 792.0);
    assert_eq!(metrics.midpoints(), (396.0, 306.0));
}

#[test]
fn test_metrics_inherited_media_box() {
    let doc = create_test_pdf_with(2, None, Some(media_box(0, 0, 842, 595)));
    let metrics = PageMetrics::from_document(&doc).unwrap();
    assert_eq!(metrics.midpoints(), (297.5, 421.0));
}

#[test]
fn test_metrics_real_and_indirect_media_box() {
    let mut doc = create_test_pdf_with(1, None, None);
    let box_id = doc.add_object(Object::Array(vec![
        Object::Real(0.0),
        Object::Real(0.0),
        Object::Real(595.5),
        Object::Real(842.0),
    ]));
    let page_id = page_ids(&doc)[0];
    doc.get_dictionary_mut(page_id)
        .unwrap()
        .set("MediaBox", Object::Reference(box_id));

    let metrics = PageMetrics::from_document(&doc).unwrap();
    assert_eq!(metrics.midpoints(), (421.0, 297.75));
}

#[test]
fn test_metrics_missing_media_box() {
    let doc = create_test_pdf_with(1, None, None);
    let result = PageMetrics::from_document(&doc);
    assert!(matches!(result, Err(CutLineError::InvalidPageBox(_))));
}

#[test]
fn test_metrics_short_media_box() {
    let doc = create_test_pdf_with(
        1,
        Some(Object::Array(vec![Object::Integer(0), Object::Integer(0)])),
        None,
    );
    let result = PageMetrics::from_document(&doc);
    assert!(matches!(result, Err(CutLineError::InvalidPageBox(_))));
}

#[test]
fn test_metrics_no_pages() {
    let doc = create_test_pdf(0);
    let result = PageMetrics::from_document(&doc);
    assert!(matches!(result, Err(CutLineError::NoPages)));
}

#[tokio::test]
async fn test_find_page_middle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.pdf");
    write_pdf(&mut create_test_pdf(2), &path);

    let (mid_horizontal, mid_vertical) = find_page_middle(&path).await.unwrap();
    assert_eq!(mid_horizontal, 396.0);
    assert_eq!(mid_vertical, 306.0);
}

#[tokio::test]
async fn test_read_page_metrics_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_page_metrics(dir.path().join("missing.pdf")).await;
    match result {
        Err(CutLineError::DocumentRead { path, .. }) => {
            assert!(path.ends_with("missing.pdf"));
        }
        other => panic!("Expected DocumentRead error, got {:?}", other),
    }
}
