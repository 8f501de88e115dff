//! Document I/O for cut line annotation

use super::repair::rebuild_xref;
use crate::constants::OUTPUT_SUFFIX;
use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load a PDF document.
///
/// Files whose cross-reference data is broken are retried with a table rebuilt
/// from the object headers. Anything still unreadable is a `DocumentRead`.
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| CutLineError::DocumentRead {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    let doc = tokio::task::spawn_blocking(move || parse_lenient(&bytes))
        .await?
        .map_err(|e| CutLineError::DocumentRead {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

fn parse_lenient(bytes: &[u8]) -> lopdf::Result<Document> {
    match Document::load_mem(bytes) {
        Ok(doc) if !doc.get_pages().is_empty() => Ok(doc),
        first => {
            let Some(repaired) = rebuild_xref(bytes) else {
                return first;
            };
            match Document::load_mem(&repaired) {
                Ok(doc) if !doc.get_pages().is_empty() => {
                    log::warn!("Cross-reference table was damaged; rebuilt from object headers");
                    Ok(doc)
                }
                _ => first,
            }
        }
    }
}

/// Save a document, replacing `path` only once the whole file is written
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        write_atomically(&path, &bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok::<_, CutLineError>(())
    })
    .await??;
    Ok(())
}

/// Write to a temp file next to `path`, sync it, then rename it into place.
/// The temp file is removed if any step fails.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| CutLineError::Write {
        path: path.to_owned(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".cutlines-")
        .suffix(".pdf.tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Output path for an input sheet: `<dir>/<dir name>_extended_cut_lines.pdf`.
///
/// Files without a named parent directory use their own stem instead.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let parent = input.parent().filter(|p| !p.as_os_str().is_empty());

    let base = parent
        .and_then(Path::file_name)
        .or_else(|| input.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{}{}", base, OUTPUT_SUFFIX);

    match parent {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_folder_name() {
        assert_eq!(
            default_output_path("./Sidequests_Tavern/Sidequests Tavern-4up.pdf"),
            PathBuf::from("./Sidequests_Tavern/Sidequests_Tavern_extended_cut_lines.pdf")
        );
    }

    #[test]
    fn test_default_output_path_bare_file() {
        assert_eq!(
            default_output_path("npcs-4up.pdf"),
            PathBuf::from("npcs-4up_extended_cut_lines.pdf")
        );
        assert_eq!(
            default_output_path("./npcs-4up.pdf"),
            PathBuf::from("./npcs-4up_extended_cut_lines.pdf")
        );
    }
}
