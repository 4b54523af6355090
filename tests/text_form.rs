use strtool::text::{escape_line, unescape_line};
use strtool::{CodecOptions, CodepageTable, StrError, StrFile, TextDocument};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn utf16le(s: &str, bom: bool) -> Vec<u8> {
    let mut units = Vec::new();
    if bom {
        units.push(0xFEFF);
    }
    units.extend(s.encode_utf16());
    units.iter().flat_map(|u| u.to_le_bytes()).collect()
}

#[test]
fn parse_with_bom() {
    let doc = TextDocument::parse(&utf16le("1,234\r\nHello\r\nTab\\tbed\r\n", true)).unwrap();
    assert_eq!(doc.file_id, 1234);
    assert_eq!(doc.lines, vec![u("Hello"), u("Tab\tbed"), u("")]);
}

#[test]
fn parse_without_bom() {
    let doc = TextDocument::parse(&utf16le("7\nx", false)).unwrap();
    assert_eq!(doc.file_id, 7);
    assert_eq!(doc.lines, vec![u("x")]);
}

#[test]
fn bad_identifier() {
    assert!(matches!(
        TextDocument::parse(&utf16le("12x\r\nHello", true)),
        Err(StrError::Text(_))
    ));
    assert!(matches!(
        TextDocument::parse(&utf16le("99999999999\r\n", true)),
        Err(StrError::Text(_))
    ));
}

#[test]
fn empty_file() {
    let doc = TextDocument::parse(&[]).unwrap();
    assert_eq!(doc.file_id, 0);
    assert!(doc.lines.is_empty());
}

#[test]
fn exact_output() {
    let doc = TextDocument {
        file_id: 5,
        lines: vec![u("a\\b"), u("line\nbreak")],
    };
    assert_eq!(
        doc.to_bytes(),
        utf16le("5\r\na\\\\b\r\nline\\nbreak\r\n", true)
    );
}

#[test]
fn escape_stops_at_nul() {
    let mut out = Vec::new();
    escape_line(&[u16::from(b'a'), 0, u16::from(b'b')], &mut out);
    assert_eq!(out, u("a"));
}

#[test]
fn unescape_rules() {
    assert_eq!(unescape_line(&u("a\\r\\n\\t\\\\")), u("a\r\n\t\\"));
    assert_eq!(unescape_line(&u("\\q")), u("q"));
    assert_eq!(unescape_line(&u("end\\")), u("end"));
}

#[test]
fn written_text_reads_back() {
    let doc = TextDocument {
        file_id: 4_000_000_000,
        lines: vec![u("plain"), u("with\\escape"), u("cr\rlf\n"), u("")],
    };
    let parsed = TextDocument::parse(&doc.to_bytes()).unwrap();
    assert_eq!(parsed.file_id, doc.file_id);
    // The final CR LF adds one empty line.
    assert_eq!(&parsed.lines[..4], doc.lines.as_slice());
    assert_eq!(parsed.lines.len(), 5);
}

#[test]
fn str_to_text_and_back() {
    let table = CodepageTable::from_units((0u16..256).collect());
    let original = StrFile {
        file_id: 31,
        entries: vec![u("first\\nsecond"), u("50%% off %2"), u("back\\\\slash")],
    };
    let str_bytes = original.to_bytes(&table, &CodecOptions::default()).unwrap();

    let decoded = StrFile::decode(&str_bytes, &table).unwrap();
    assert_eq!(decoded, original);

    let text = decoded.to_text().to_bytes();
    let from_text = StrFile::from_text(TextDocument::parse(&text).unwrap());
    assert_eq!(from_text.entries.len(), original.entries.len() + 1);
    assert_eq!(
        from_text.to_bytes(&table, &CodecOptions::default()).unwrap(),
        str_bytes
    );
}

#[test]
fn files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level1.txt");
    let file = StrFile {
        file_id: 12,
        entries: vec![u("one"), u("two")],
    };
    file.write_text(&path).unwrap();
    let back = StrFile::read_text(&path).unwrap();
    assert_eq!(back.file_id, 12);
    assert_eq!(&back.entries[..2], file.entries.as_slice());
}
