//! DOCX package reading.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::options::{ErrorMode, OpenOptions};
use super::{DocxPackage, PackageEntry};
use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{blocks_from_nodes, Document, Story, StoryKind};
use crate::xml;

/// Part name used when the package relationships do not name one.
const DEFAULT_MAIN_PART: &str = "word/document.xml";

const PACKAGE_RELS: &str = "_rels/.rels";

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Load a package from bytes.
pub(super) fn load(data: &[u8], options: &OpenOptions) -> Result<DocxPackage> {
    detect_format_from_bytes(data)?;

    let entries = read_entries(data)?;
    let main_part = main_part_name(&entries);
    log::debug!(
        "Package has {} entries, main part {}",
        entries.len(),
        main_part
    );

    let main_entry = entries
        .iter()
        .find(|e| e.name == main_part)
        .ok_or_else(|| Error::MissingPart(main_part.clone()))?;

    let mut main_root = xml::parse_bytes(&main_entry.data)?;
    let body = main_root
        .child_mut("w:body")
        .ok_or_else(|| Error::MissingPart(format!("{}: w:body", main_part)))?;
    let mut document = Document {
        body: blocks_from_nodes(std::mem::take(&mut body.children)),
        ..Document::default()
    };

    let mut story_roots = BTreeMap::new();
    if options.load_stories {
        for entry in &entries {
            let Some(kind) = story_kind(&entry.name) else {
                continue;
            };

            let mut root = match xml::parse_bytes(&entry.data) {
                Ok(root) => root,
                Err(e) => {
                    if options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Keeping unparseable part {} as is: {}", entry.name, e);
                    continue;
                }
            };

            let story = Story {
                part_name: entry.name.clone(),
                kind,
                blocks: blocks_from_nodes(std::mem::take(&mut root.children)),
            };
            match kind {
                StoryKind::Header => document.headers.push(story),
                StoryKind::Footer => document.footers.push(story),
            }
            story_roots.insert(entry.name.clone(), root);
        }
    }

    Ok(DocxPackage {
        entries,
        main_part,
        main_root,
        story_roots,
        document,
    })
}

/// Read every zip entry into memory, preserving order.
fn read_entries(data: &[u8]) -> Result<Vec<PackageEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        entries.push(PackageEntry {
            name: file.name().to_string(),
            data: bytes,
            compression: file.compression(),
            is_dir: file.is_dir(),
        });
    }
    Ok(entries)
}

/// Resolve the main document part from the package relationships.
fn main_part_name(entries: &[PackageEntry]) -> String {
    let target = entries
        .iter()
        .find(|e| e.name == PACKAGE_RELS)
        .and_then(|e| xml::parse_bytes(&e.data).ok())
        .and_then(|rels| {
            rels.children_named("Relationship")
                .find(|rel| {
                    rel.attr("Type")
                        .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL))
                })
                .and_then(|rel| rel.attr("Target"))
                .map(|t| t.trim_start_matches('/').to_string())
        });

    match target {
        Some(name) if entries.iter().any(|e| e.name == name) => name,
        _ => DEFAULT_MAIN_PART.to_string(),
    }
}

/// Classify `word/headerN.xml` and `word/footerN.xml` parts.
pub(super) fn story_kind(name: &str) -> Option<StoryKind> {
    let stem = name.strip_prefix("word/")?.strip_suffix(".xml")?;
    let (kind, digits) = if let Some(rest) = stem.strip_prefix("header") {
        (StoryKind::Header, rest)
    } else if let Some(rest) = stem.strip_prefix("footer") {
        (StoryKind::Footer, rest)
    } else {
        return None;
    };

    digits
        .chars()
        .all(|c| c.is_ascii_digit())
        .then_some(kind)
}
