//! Cut line annotation - overlaying guide lines onto card sheets
//!
//! This module orchestrates a run:
//! 1. Load the source document
//! 2. Measure the first page
//! 3. Lay out the cards and resolve their guide lines
//! 4. Attach line annotations to every page and save

mod io;
mod line;
mod repair;

pub use io::{default_output_path, load_pdf, save_pdf};

use crate::card::{Card, layout_cards};
use crate::metrics::PageMetrics;
use crate::options::{CutLineOptions, LineStyle};
use crate::stats::calculate_statistics;
use crate::types::*;
use line::{add_appearance, line_annotation};
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::Path;

/// Annotate `input` with extended cut lines and write the result to `output`.
///
/// The output is written in full or not at all; `input` is never modified.
pub async fn add_extended_cut_lines(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CutLineOptions,
) -> Result<CutLineStatistics> {
    options.validate()?;

    let input = input.as_ref();
    let output = output.as_ref();
    log::info!("Adding cut lines: {} -> {}", input.display(), output.display());

    let doc = load_pdf(input).await?;
    let options = options.clone();

    let (doc, stats) = tokio::task::spawn_blocking(move || {
        let mut doc = doc;
        let stats = annotate_sync(&mut doc, &options)?;
        Ok::<_, CutLineError>((doc, stats))
    })
    .await??;

    save_pdf(doc, output).await?;
    log::info!(
        "Added {} line annotations across {} pages",
        stats.total_annotations,
        stats.pages
    );
    Ok(stats)
}

fn annotate_sync(doc: &mut Document, options: &CutLineOptions) -> Result<CutLineStatistics> {
    let stats = calculate_statistics(doc, options)?;

    let metrics = PageMetrics::from_document(doc)?;
    log::info!(
        "Page {} x {} pt, midlines at y={} x={}",
        metrics.width,
        metrics.height,
        metrics.mid_horizontal(),
        metrics.mid_vertical()
    );

    let cards = layout_cards(options, &metrics)?;
    let added = annotate_document(doc, &cards, &options.line_style)?;
    debug_assert_eq!(added, stats.total_annotations);

    Ok(stats)
}

/// Attach every card's guide lines to every page of `doc`.
///
/// Annotations go on in card order, then in [`CutLine::ALL`] order, after any
/// annotations the page already has. Returns the number of annotations added.
pub fn annotate_document(doc: &mut Document, cards: &[Card], style: &LineStyle) -> Result<usize> {
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    if page_ids.is_empty() {
        return Err(CutLineError::NoPages);
    }
    unshare_annotation_arrays(doc, &page_ids)?;

    // Appearance streams depend only on the segment, so pages share them
    let segments: Vec<(LineSegment, ObjectId)> = cards
        .iter()
        .flat_map(|card| card.lines.iter().copied())
        .map(|segment| {
            let appearance_id = add_appearance(doc, &segment, style);
            (segment, appearance_id)
        })
        .collect();

    let mut added = 0;
    for page_id in page_ids {
        let annot_ids: Vec<ObjectId> = segments
            .iter()
            .map(|(segment, appearance_id)| {
                doc.add_object(line_annotation(segment, style, page_id, *appearance_id))
            })
            .collect();
        added += annot_ids.len();
        append_annotations(doc, page_id, &annot_ids)?;
    }

    Ok(added)
}

/// Give each page its own `/Annots` array object.
///
/// Pages may point at one shared array; extending it in place would list
/// every page's lines on all of them.
fn unshare_annotation_arrays(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let mut seen = HashSet::new();
    for &page_id in page_ids {
        let Ok(array_id) = doc
            .get_dictionary(page_id)?
            .get(b"Annots")
            .and_then(|annots| annots.as_reference())
        else {
            continue;
        };
        if seen.insert(array_id) {
            continue;
        }

        let copy = doc.get_object(array_id)?.as_array()?.clone();
        let copy_id = doc.add_object(Object::Array(copy));
        doc.get_dictionary_mut(page_id)?
            .set("Annots", Object::Reference(copy_id));
        log::debug!(
            "Page {:?} shares /Annots {:?}, copied to {:?}",
            page_id,
            array_id,
            copy_id
        );
    }
    Ok(())
}

/// Append annotation references to a page's `/Annots`, which may be missing,
/// a direct array, or a reference to an array
fn append_annotations(
    doc: &mut Document,
    page_id: ObjectId,
    annot_ids: &[ObjectId],
) -> Result<()> {
    let refs = annot_ids.iter().map(|id| Object::Reference(*id));
    let existing = doc.get_dictionary(page_id)?.get(b"Annots").ok().cloned();

    match existing {
        Some(Object::Reference(array_id)) => {
            doc.get_object_mut(array_id)?.as_array_mut()?.extend(refs);
        }
        Some(Object::Array(_)) => {
            doc.get_dictionary_mut(page_id)?
                .get_mut(b"Annots")?
                .as_array_mut()?
                .extend(refs);
        }
        _ => {
            doc.get_dictionary_mut(page_id)?
                .set("Annots", Object::Array(refs.collect()));
        }
    }

    Ok(())
}
