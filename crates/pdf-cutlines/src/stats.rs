use crate::options::CutLineOptions;
use crate::types::*;
use lopdf::Document;

/// Calculate what an annotation run over `doc` will add
pub fn calculate_statistics(
    doc: &Document,
    options: &CutLineOptions,
) -> Result<CutLineStatistics> {
    let pages = doc.get_pages().len();
    if pages == 0 {
        return Err(CutLineError::NoPages);
    }

    let annotations_per_page = options.lines_per_page();

    Ok(CutLineStatistics {
        pages,
        cards: options.anchors.len(),
        annotations_per_page,
        total_annotations: pages * annotations_per_page,
    })
}
