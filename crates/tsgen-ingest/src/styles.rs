//! Number-format hints for xlsx packages.
//!
//! calamine reads cell styles only far enough to tell dates from numbers, so
//! percent and thousands-grouping formats are read here straight from the
//! package: `xl/styles.xml` maps style indices to number formats, the
//! worksheet part maps cells to style indices.

use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};
use thiserror::Error;
use zip::ZipArchive;
use zip::read::ZipFile;
use zip::result::ZipError;

use crate::cell::NumberFormat;

const STYLES_PART: &str = "xl/styles.xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

#[derive(Debug, Error)]
pub(crate) enum StylesError {
    #[error("invalid package: {0}")]
    Zip(#[from] ZipError),

    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("no worksheet part for sheet '{0}'")]
    MissingWorksheet(String),
}

/// Number formats of the styled cells of one worksheet, by 0-based
/// (row, column). Unlisted cells use the general format.
#[derive(Debug, Default)]
pub(crate) struct SheetFormats {
    cells: HashMap<(usize, usize), NumberFormat>,
}

impl SheetFormats {
    pub(crate) fn get(&self, row: usize, column: usize) -> NumberFormat {
        self.cells.get(&(row, column)).copied().unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Read the non-general number formats of the cells of `sheet_name`.
pub(crate) fn read_sheet_formats<R: Read + Seek>(
    package: &mut ZipArchive<R>,
    sheet_name: &str,
) -> Result<SheetFormats, StylesError> {
    let styles = style_formats(package)?;
    if styles.iter().all(|format| *format == NumberFormat::General) {
        return Ok(SheetFormats::default());
    }
    let part = worksheet_part(package, sheet_name)?
        .ok_or_else(|| StylesError::MissingWorksheet(sheet_name.to_string()))?;
    cell_formats(package, &part, &styles)
}

type PartReader<'a, R> = Reader<BufReader<ZipFile<'a, R>>>;

fn part_reader<'a, R: Read + Seek>(
    package: &'a mut ZipArchive<R>,
    name: &str,
) -> Result<Option<PartReader<'a, R>>, StylesError> {
    match package.by_name(name) {
        Ok(file) => Ok(Some(Reader::from_reader(BufReader::new(file)))),
        Err(ZipError::FileNotFound) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn attribute(
    element: &BytesStart<'_>,
    name: &str,
    decoder: Decoder,
) -> Result<Option<String>, StylesError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.decode_and_unescape_value(decoder)?.into_owned())),
        None => Ok(None),
    }
}

/// Number format of every entry of `cellXfs`, indexed like the `s` attribute.
fn style_formats<R: Read + Seek>(
    package: &mut ZipArchive<R>,
) -> Result<Vec<NumberFormat>, StylesError> {
    let Some(mut reader) = part_reader(package, STYLES_PART)? else {
        return Ok(Vec::new());
    };
    let mut custom: HashMap<String, String> = HashMap::new();
    let mut xf_format_ids: Vec<String> = Vec::new();
    let mut in_cell_xfs = false;
    let mut buf = Vec::new();
    loop {
        let decoder = reader.decoder();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = true,
            Event::End(e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"numFmt" => {
                    let id = attribute(&e, "numFmtId", decoder)?;
                    let code = attribute(&e, "formatCode", decoder)?;
                    if let (Some(id), Some(code)) = (id, code) {
                        custom.insert(id, code);
                    }
                }
                b"xf" if in_cell_xfs => {
                    xf_format_ids.push(attribute(&e, "numFmtId", decoder)?.unwrap_or_default());
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(xf_format_ids
        .iter()
        .map(|id| match custom.get(id) {
            Some(code) => classify_format_code(code),
            None => builtin_format(id),
        })
        .collect())
}

/// Package path of the worksheet named `sheet_name`, via the workbook
/// relationships.
fn worksheet_part<R: Read + Seek>(
    package: &mut ZipArchive<R>,
    sheet_name: &str,
) -> Result<Option<String>, StylesError> {
    let Some(relationship) = sheet_relationship(package, sheet_name)? else {
        return Ok(None);
    };
    let Some(mut reader) = part_reader(package, WORKBOOK_RELS_PART)? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    loop {
        let decoder = reader.decoder();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if attribute(&e, "Id", decoder)?.as_deref() == Some(relationship.as_str()) {
                    return Ok(attribute(&e, "Target", decoder)?.map(|target| part_path(&target)));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn sheet_relationship<R: Read + Seek>(
    package: &mut ZipArchive<R>,
    sheet_name: &str,
) -> Result<Option<String>, StylesError> {
    let Some(mut reader) = part_reader(package, WORKBOOK_PART)? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    loop {
        let decoder = reader.decoder();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                if attribute(&e, "name", decoder)?.as_deref() == Some(sheet_name) {
                    let id = match attribute(&e, "r:id", decoder)? {
                        Some(id) => Some(id),
                        None => attribute(&e, "relationships:id", decoder)?,
                    };
                    return Ok(id);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Relationship targets are relative to `xl/` unless rooted.
fn part_path(target: &str) -> String {
    if let Some(rooted) = target.strip_prefix('/') {
        rooted.to_string()
    } else if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{target}")
    }
}

fn cell_formats<R: Read + Seek>(
    package: &mut ZipArchive<R>,
    part: &str,
    styles: &[NumberFormat],
) -> Result<SheetFormats, StylesError> {
    let Some(mut reader) = part_reader(package, part)? else {
        return Err(StylesError::MissingWorksheet(part.to_string()));
    };
    let mut formats = SheetFormats::default();
    let (mut row, mut column, mut next_row) = (0usize, 0usize, 0usize);
    let mut buf = Vec::new();
    loop {
        let decoder = reader.decoder();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    row = attribute(&e, "r", decoder)?
                        .and_then(|r| r.parse::<usize>().ok())
                        .and_then(|r| r.checked_sub(1))
                        .unwrap_or(next_row);
                    next_row = row + 1;
                    column = 0;
                }
                b"c" => {
                    if let Some((r, c)) = attribute(&e, "r", decoder)?
                        .as_deref()
                        .and_then(parse_cell_reference)
                    {
                        row = r;
                        column = c;
                    }
                    let format = attribute(&e, "s", decoder)?
                        .and_then(|s| s.parse::<usize>().ok())
                        .and_then(|s| styles.get(s).copied())
                        .unwrap_or_default();
                    if format != NumberFormat::General {
                        formats.cells.insert((row, column), format);
                    }
                    column += 1;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(formats)
}

/// `"B12"` → `(11, 1)`.
fn parse_cell_reference(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|ch: char| ch.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut column = 0usize;
    for letter in letters.chars() {
        if !letter.is_ascii_uppercase() {
            return None;
        }
        column = column * 26 + (letter as usize - 'A' as usize + 1);
    }
    let row: usize = digits.parse().ok()?;
    Some((row.checked_sub(1)?, column - 1))
}

/// Built-in number formats of the OOXML spreadsheet standard.
fn builtin_format(id: &str) -> NumberFormat {
    match id.parse::<u32>() {
        Ok(3 | 37 | 38) => NumberFormat::Grouped { decimals: 0 },
        Ok(4 | 39 | 40) => NumberFormat::Grouped { decimals: 2 },
        Ok(9 | 10) => NumberFormat::Percent,
        _ => NumberFormat::General,
    }
}

/// Classify a custom format code by its first (positive) section.
fn classify_format_code(code: &str) -> NumberFormat {
    let section = code.split(';').next().unwrap_or_default();
    let mut placeholders = String::new();
    let mut chars = section.chars();
    let mut quoted = false;
    while let Some(ch) = chars.next() {
        match ch {
            '"' => quoted = !quoted,
            _ if quoted => {}
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                }
            }
            _ => placeholders.push(ch),
        }
    }

    if placeholders.contains('%') {
        NumberFormat::Percent
    } else if placeholders.contains(',') && placeholders.contains(['0', '#']) {
        let decimals = placeholders.split_once('.').map_or(0, |(_, fraction)| {
            fraction
                .chars()
                .take_while(|ch| matches!(ch, '0' | '#'))
                .count()
        });
        NumberFormat::Grouped { decimals }
    } else {
        NumberFormat::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids() {
        assert_eq!(builtin_format("9"), NumberFormat::Percent);
        assert_eq!(builtin_format("10"), NumberFormat::Percent);
        assert_eq!(builtin_format("3"), NumberFormat::Grouped { decimals: 0 });
        assert_eq!(builtin_format("4"), NumberFormat::Grouped { decimals: 2 });
        assert_eq!(builtin_format("14"), NumberFormat::General);
        assert_eq!(builtin_format("0"), NumberFormat::General);
    }

    #[test]
    fn custom_codes() {
        assert_eq!(classify_format_code("0.0%"), NumberFormat::Percent);
        assert_eq!(
            classify_format_code("#,##0.000;[Red]-#,##0.000"),
            NumberFormat::Grouped { decimals: 3 }
        );
        assert_eq!(
            classify_format_code(r#"_("$"* #,##0_)"#),
            NumberFormat::Grouped { decimals: 0 }
        );
        assert_eq!(classify_format_code(r#"0.00" %""#), NumberFormat::General);
        assert_eq!(classify_format_code("dd mmm, yyyy"), NumberFormat::General);
        assert_eq!(classify_format_code("0.00"), NumberFormat::General);
    }

    #[test]
    fn cell_references() {
        assert_eq!(parse_cell_reference("A1"), Some((0, 0)));
        assert_eq!(parse_cell_reference("B12"), Some((11, 1)));
        assert_eq!(parse_cell_reference("AA3"), Some((2, 26)));
        assert_eq!(parse_cell_reference("12"), None);
        assert_eq!(parse_cell_reference("A0"), None);
    }

    #[test]
    fn relationship_targets() {
        assert_eq!(part_path("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(part_path("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
        assert_eq!(part_path("xl/worksheets/sheet3.xml"), "xl/worksheets/sheet3.xml");
    }
}
