//! DOCX package writing.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::DocxPackage;
use crate::error::{Error, Result};
use crate::model::{blocks_into_nodes, Block};
use crate::xml::{self, Element};

/// Serialize a package to zip bytes.
///
/// Parsed parts are rebuilt from the model; every other entry is copied
/// byte-for-byte with its original compression method.
pub(super) fn write(package: &DocxPackage) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in &package.entries {
        let options = SimpleFileOptions::default().compression_method(match entry.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        });

        if entry.is_dir {
            zip.add_directory(entry.name.as_str(), options)?;
            continue;
        }

        let rebuilt = if entry.name == package.main_part {
            Some(main_part_bytes(package)?)
        } else {
            story_part_bytes(package, &entry.name)?
        };

        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(rebuilt.as_deref().unwrap_or(&entry.data))?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn main_part_bytes(package: &DocxPackage) -> Result<Vec<u8>> {
    let mut root = package.main_root.clone();
    let body = root
        .child_mut("w:body")
        .ok_or_else(|| Error::MissingPart(format!("{}: w:body", package.main_part)))?;
    body.children = blocks_into_nodes(package.document.body.clone());
    xml::to_bytes(&root)
}

fn story_part_bytes(package: &DocxPackage, name: &str) -> Result<Option<Vec<u8>>> {
    let Some(skeleton) = package.story_roots.get(name) else {
        return Ok(None);
    };
    let Some(story) = package.document.stories().find(|s| s.part_name == name) else {
        log::debug!("Story {} was removed from the model, writing original part", name);
        return Ok(None);
    };

    let root = with_blocks(skeleton, &story.blocks);
    xml::to_bytes(&root).map(Some)
}

fn with_blocks(skeleton: &Element, blocks: &[Block]) -> Element {
    let mut root = skeleton.clone();
    root.children = blocks_into_nodes(blocks.to_vec());
    root
}
