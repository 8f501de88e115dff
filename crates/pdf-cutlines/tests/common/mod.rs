#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

pub fn media_box(llx: i64, lly: i64, urx: i64, ury: i64) -> Object {
    Object::Array(vec![
        Object::Integer(llx),
        Object::Integer(lly),
        Object::Integer(urx),
        Object::Integer(ury),
    ])
}

/// Letter-sized document with `num_pages` pages, MediaBox on each page
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_with(num_pages, Some(media_box(0, 0, 612, 792)), None)
}

/// Build a document, putting the MediaBox on the pages or on the page tree root
pub fn create_test_pdf_with(
    num_pages: usize,
    page_box: Option<Object>,
    tree_box: Option<Object>,
) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some(mb) = &page_box {
            page.set("MediaBox", mb.clone());
        }
        let page_id = doc.add_object(page);
        kids.push(Object::Reference(page_id));
    }

    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    if let Some(mb) = tree_box {
        pages_dict.set("MediaBox", mb);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_pdf(doc: &mut Document, path: &Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Resolved annotation dictionaries of a page, in `/Annots` order
pub fn annotations(doc: &Document, page_id: ObjectId) -> Vec<Dictionary> {
    let page = doc.get_dictionary(page_id).unwrap();
    let annots = match page.get(b"Annots") {
        Ok(Object::Reference(id)) => doc.get_object(*id).unwrap(),
        Ok(obj) => obj,
        Err(_) => return Vec::new(),
    };
    annots
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            doc.get_dictionary(r.as_reference().unwrap())
                .unwrap()
                .clone()
        })
        .collect()
}

pub fn floats(dict: &Dictionary, key: &[u8]) -> Vec<f32> {
    dict.get(key)
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_float().unwrap())
        .collect()
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {}, got {}",
        expected,
        actual
    );
}
