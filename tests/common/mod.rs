//! Shared fixtures: small `.docx` packages built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Fake image bytes, stored uncompressed like real media parts.
pub const IMAGE_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

/// A `w:r` with optional bold formatting.
pub fn run(text: &str, bold: bool) -> String {
    let props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#, props, text)
}

/// A `w:p` holding the given runs.
pub fn paragraph(runs: &[String]) -> String {
    format!("<w:p>{}</w:p>", runs.concat())
}

/// A `w:p` holding one plain run.
pub fn text_paragraph(text: &str) -> String {
    paragraph(&[run(text, false)])
}

/// A `w:tr` with one plain paragraph per cell.
pub fn row(cells: &[&str]) -> String {
    let cells: String = cells
        .iter()
        .map(|text| {
            format!(
                r#"<w:tc><w:tcPr><w:tcW w:w="1000" w:type="dxa"/></w:tcPr>{}</w:tc>"#,
                text_paragraph(text)
            )
        })
        .collect();
    format!("<w:tr>{}</w:tr>", cells)
}

/// A `w:tbl` with an 8-column grid.
pub fn table(rows: &[String]) -> String {
    let grid: String = (0..8).map(|_| r#"<w:gridCol w:w="1000"/>"#).collect();
    format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="8000" w:type="dxa"/></w:tblPr><w:tblGrid>{}</w:tblGrid>{}</w:tbl>"#,
        grid,
        rows.concat()
    )
}

/// The creditor list table: header, group row, `1.1 ..= 1.n`, section 2.
pub fn creditor_table(data_rows: usize) -> String {
    let mut rows = vec![
        row(&[
            "№ п/п",
            "Содержание обязательства",
            "Кредитор",
            "Место нахождения",
            "Основание возникновения",
            "Сумма обязательства",
            "Сумма задолженности по денежным обязательствам",
            "Штрафы, пени",
        ]),
        row(&["1", "Денежные обязательства", "", "", "", "", "", ""]),
    ];
    for i in 1..=data_rows {
        let label = format!("1.{}", i);
        let name = format!("Старый кредитор {}", i);
        rows.push(row(&[label.as_str(), "заём", name.as_str(), "", "", "0", "0", "0"]));
    }
    rows.push(row(&["2", "Обязательные платежи", "", "", "", "", "", ""]));
    rows.push(row(&["2.1", "Налог на имущество", "", "", "", "", "", ""]));
    table(&rows)
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#,
        W_NS, body
    )
}

pub fn story_xml(root: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:{root} xmlns:w="{ns}">{body}</w:{root}>"#,
        root = root,
        ns = W_NS,
        body = body
    )
}

/// Build a package from a body and optional header/footer bodies.
pub fn build_docx(body: &str, header: Option<&str>, footer: Option<&str>) -> Vec<u8> {
    let mut parts: Vec<(&str, Vec<u8>)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("word/document.xml", document_xml(body).into_bytes()),
    ];
    if let Some(header) = header {
        parts.push(("word/header1.xml", story_xml("hdr", header).into_bytes()));
    }
    if let Some(footer) = footer {
        parts.push(("word/footer1.xml", story_xml("ftr", footer).into_bytes()));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in parts {
        zip.start_file(name, deflated).unwrap();
        zip.write_all(&data).unwrap();
    }

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("word/media/image1.png", stored).unwrap();
    zip.write_all(IMAGE_BYTES).unwrap();

    zip.finish().unwrap().into_inner()
}

/// Read one entry of a package.
pub fn read_part(docx: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name(name).ok()?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    Some(data)
}

/// Entry names of a package, in order.
pub fn part_names(docx: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}
