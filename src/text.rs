//! Editable UTF-16LE text form of a string table.
//!
//! The first line holds the decimal file identifier; every following line
//! is one entry. Control characters inside entries are written as `\r`,
//! `\n`, `\t` and a backslash as `\\`.

use crate::error::StrError;

const BOM: u16 = 0xFEFF;
const CR: u16 = b'\r' as u16;
const LF: u16 = b'\n' as u16;
const TAB: u16 = b'\t' as u16;
const BACKSLASH: u16 = b'\\' as u16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    pub file_id: u32,
    pub lines: Vec<Vec<u16>>,
}

/// Split UTF-16 units into lines. `\n`, `\r`, `\r\n` and `\n\r` each end a
/// line; a break at the very end is followed by one empty line.
pub fn split_lines(units: &[u16]) -> Vec<&[u16]> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < units.len() {
        let unit = units[i];
        if unit == LF || unit == CR {
            lines.push(&units[start..i]);
            i += 1;
            let pair = if unit == LF { CR } else { LF };
            if units.get(i) == Some(&pair) {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    lines.push(&units[start..]);
    lines
}

fn parse_file_id(line: &[u16]) -> Result<u32, StrError> {
    let mut id = 0u32;
    for &unit in line {
        match unit {
            0x30..=0x39 => {
                id = id
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u32::from(unit - 0x30)))
                    .ok_or_else(|| StrError::Text("file identifier out of range".into()))?;
            }
            // Separators people put into the number.
            0x2C | 0x2E | 0x20 | TAB => {}
            _ => {
                return Err(StrError::Text(
                    "non-digit character in first line of text file".into(),
                ))
            }
        }
    }
    Ok(id)
}

/// Resolve `\r`, `\n`, `\t` and `\\`. Any other escaped unit is kept as is
/// and a trailing lone backslash is dropped.
pub fn unescape_line(line: &[u16]) -> Vec<u16> {
    let mut out = Vec::with_capacity(line.len());
    let mut iter = line.iter().copied();
    while let Some(unit) = iter.next() {
        if unit != BACKSLASH {
            out.push(unit);
            continue;
        }
        match iter.next() {
            Some(0x72) => out.push(CR),
            Some(0x6E) => out.push(LF),
            Some(0x74) => out.push(TAB),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}

/// Escape one entry for output, stopping at an embedded NUL.
pub fn escape_line(entry: &[u16], out: &mut Vec<u16>) {
    for &unit in entry.iter().take_while(|&&u| u != 0) {
        match unit {
            LF => out.extend_from_slice(&[BACKSLASH, 0x6E]),
            CR => out.extend_from_slice(&[BACKSLASH, 0x72]),
            TAB => out.extend_from_slice(&[BACKSLASH, 0x74]),
            BACKSLASH => out.extend_from_slice(&[BACKSLASH, BACKSLASH]),
            other => out.push(other),
        }
    }
}

impl TextDocument {
    /// Parse a UTF-16LE text file. A trailing odd byte is ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self, StrError> {
        let mut units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        if units.first() == Some(&BOM) {
            units.remove(0);
        }
        let lines = split_lines(&units);
        let (first, rest) = lines
            .split_first()
            .ok_or_else(|| StrError::Text("no lines in text file".into()))?;
        let file_id = parse_file_id(first)?;
        Ok(Self {
            file_id,
            lines: rest.iter().map(|l| unescape_line(l)).collect(),
        })
    }

    /// Serialize with a byte order mark and CR LF line ends.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut units = vec![BOM];
        units.extend(self.file_id.to_string().bytes().map(u16::from));
        units.extend_from_slice(&[CR, LF]);
        for line in &self.lines {
            escape_line(line, &mut units);
            units.extend_from_slice(&[CR, LF]);
        }
        units.iter().flat_map(|u| u.to_le_bytes()).collect()
    }
}
