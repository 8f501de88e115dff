//! Cross-reference recovery for damaged files

use std::collections::BTreeMap;
use std::io::Write;

/// Rebuild the cross-reference table by scanning for `N G obj` headers.
///
/// Returns the original bytes with a fresh xref section and trailer appended,
/// or `None` when no objects or no `/Root` reference can be found.
pub(super) fn rebuild_xref(bytes: &[u8]) -> Option<Vec<u8>> {
    let offsets = scan_object_offsets(bytes);
    let (root_num, root_gen) = find_root(bytes)?;
    let size = offsets.keys().next_back()? + 1;

    let mut output = bytes.to_vec();
    if !output.ends_with(b"\n") {
        output.push(b'\n');
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 1\n0000000000 65535 f\r\n");
    for (num, (generation, offset)) in &offsets {
        let _ = write!(output, "{} 1\n{:010} {:05} n\r\n", num, offset, generation);
    }
    let _ = write!(
        output,
        "trailer\n<< /Size {} /Root {} {} R >>\nstartxref\n{}\n%%EOF\n",
        size, root_num, root_gen, xref_offset
    );

    log::debug!("Rebuilt xref with {} objects", offsets.len());
    Some(output)
}

/// Byte offset of every object header; later definitions win, as with
/// incremental updates
fn scan_object_offsets(bytes: &[u8]) -> BTreeMap<u32, (u16, usize)> {
    let mut offsets = BTreeMap::new();
    for (pos, window) in bytes.windows(3).enumerate() {
        if window != b"obj" {
            continue;
        }
        let after = bytes.get(pos + 3).copied();
        if after.is_some_and(|b| b.is_ascii_alphanumeric()) {
            continue;
        }
        if let Some((num, generation, start)) = object_header_before(bytes, pos) {
            if num > 0 {
                offsets.insert(num, (generation, start));
            }
        }
    }
    offsets
}

/// Parse `N G ` backwards from the `obj` keyword at `obj_pos`
fn object_header_before(bytes: &[u8], obj_pos: usize) -> Option<(u32, u16, usize)> {
    let gen_end = skip_back(bytes, obj_pos, is_space);
    let gen_start = skip_back(bytes, gen_end, u8::is_ascii_digit);
    let num_end = skip_back(bytes, gen_start, is_space);
    let num_start = skip_back(bytes, num_end, u8::is_ascii_digit);

    if gen_end == obj_pos || gen_start == gen_end || num_end == gen_start || num_start == num_end {
        return None;
    }
    if num_start > 0 && !is_space(&bytes[num_start - 1]) {
        return None;
    }

    let generation = std::str::from_utf8(&bytes[gen_start..gen_end]).ok()?.parse().ok()?;
    let num = std::str::from_utf8(&bytes[num_start..num_end]).ok()?.parse().ok()?;
    Some((num, generation, num_start))
}

/// The last `/Root N G R` in the file
fn find_root(bytes: &[u8]) -> Option<(u32, u16)> {
    let key = b"/Root";
    let pos = bytes.windows(key.len()).rposition(|w| w == key)?;
    let mut rest = &bytes[pos + key.len()..];

    let read_number = |rest: &mut &[u8]| -> Option<u32> {
        let start = rest.iter().position(|b| !is_space(b))?;
        let digits = rest[start..].iter().take_while(|b| b.is_ascii_digit()).count();
        let value = std::str::from_utf8(&rest[start..start + digits]).ok()?.parse().ok()?;
        *rest = &rest[start + digits..];
        Some(value)
    };
    let num = read_number(&mut rest)?;
    let generation = read_number(&mut rest)?;

    let keyword = rest.iter().find(|b| !is_space(b))?;
    (*keyword == b'R').then_some((num, u16::try_from(generation).ok()?))
}

fn skip_back(bytes: &[u8], mut i: usize, pred: impl Fn(&u8) -> bool) -> usize {
    while i > 0 && pred(&bytes[i - 1]) {
        i -= 1;
    }
    i
}

fn is_space(b: &u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t' | b'\x0c' | b'\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
        2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n\
        trailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n9999\n%%EOF\n";

    #[test]
    fn test_scan_finds_headers_not_endobj() {
        let offsets = scan_object_offsets(BODY);
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets[&1], (0, 9));
        assert!(BODY[offsets[&2].1..].starts_with(b"2 0 obj"));
    }

    #[test]
    fn test_find_root_reference() {
        assert_eq!(find_root(BODY), Some((1, 0)));
        assert_eq!(find_root(b"/Root /Catalog"), None);
    }

    #[test]
    fn test_rebuild_appends_new_trailer() {
        let rebuilt = rebuild_xref(BODY).unwrap();
        assert!(rebuilt.starts_with(BODY));
        let tail = std::str::from_utf8(&rebuilt[BODY.len()..]).unwrap();
        assert!(tail.starts_with("xref\n0 1\n"));
        assert!(tail.contains("1 1\n0000000009 00000 n\r\n"));
        assert!(tail.contains("<< /Size 3 /Root 1 0 R >>"));
        assert!(tail.ends_with(&format!("startxref\n{}\n%%EOF\n", BODY.len())));
    }

    #[test]
    fn test_rebuild_gives_up_without_objects() {
        assert!(rebuild_xref(b"this is not a pdf").is_none());
    }
}
