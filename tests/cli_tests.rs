use std::fs;
use std::path::Path;
use std::process::Command;

fn write_codepage(path: &Path) {
    let mut bytes = b"BFMU\0\0".to_vec();
    for unit in 0u16..256 {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(path, bytes).unwrap();
}

fn utf16le(s: &str) -> Vec<u8> {
    std::iter::once(0xFEFFu16)
        .chain(s.encode_utf16())
        .flat_map(|u| u.to_le_bytes())
        .collect()
}

#[test]
fn create_then_export_cli() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    write_codepage(&dir.path().join("MBToUni.dat"));
    let base = dir.path().join("level");
    let txt = dir.path().join("level.txt");
    let text = utf16le("42\r\nHello\r\n100%% sure %1\r\n");
    fs::write(&txt, &text).unwrap();

    let status = Command::new(exe)
        .args([base.to_str().unwrap(), "c"])
        .status()
        .expect("create failed");
    assert!(status.success());
    let str_bytes = fs::read(dir.path().join("level.str")).unwrap();
    assert_eq!(&str_bytes[..4], b"BFST");
    assert_eq!(&str_bytes[4..12], &[42, 0, 0, 0, 2, 0, 0, 0]);

    fs::remove_file(&txt).unwrap();
    let status = Command::new(exe)
        .args([base.to_str().unwrap(), "export", "-v"])
        .status()
        .expect("export failed");
    assert!(status.success());
    assert_eq!(fs::read(&txt).unwrap(), text);
}

#[test]
fn operation_letters_ignore_case() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    write_codepage(&dir.path().join("MBToUni.dat"));
    let base = dir.path().join("upper");
    let txt = dir.path().join("upper.txt");
    let text = utf16le("8\r\nShout\r\n");
    fs::write(&txt, &text).unwrap();

    assert!(Command::new(exe)
        .args([base.to_str().unwrap(), "C"])
        .status()
        .unwrap()
        .success());
    fs::remove_file(&txt).unwrap();
    assert!(Command::new(exe)
        .args([base.to_str().unwrap(), "X"])
        .status()
        .unwrap()
        .success());
    assert_eq!(fs::read(&txt).unwrap(), text);
    assert!(Command::new(exe)
        .args([base.to_str().unwrap(), "Dump"])
        .status()
        .unwrap()
        .success());
}

#[test]
fn dump_json_cli() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    write_codepage(&dir.path().join("MBToUni.dat"));
    let base = dir.path().join("menu");
    fs::write(
        dir.path().join("menu.txt"),
        utf16le("3\r\nHello\r\n100%% sure %1\r\n"),
    )
    .unwrap();
    assert!(Command::new(exe)
        .args([base.to_str().unwrap(), "create"])
        .status()
        .unwrap()
        .success());

    let output = Command::new(exe)
        .args([base.to_str().unwrap(), "d", "--json"])
        .output()
        .expect("dump failed");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["file_id"], 3);
    assert_eq!(report["entry_count"], 2);
    assert_eq!(report["entries"][0]["text"], "Hello");
    assert_eq!(report["entries"][1]["chunks"][0]["size"], 10);
    assert_eq!(report["entries"][1]["chunks"][1]["kind"], "parameter");
    assert_eq!(report["entries"][1]["text"], "100%% sure %1");
}

#[test]
fn codepage_override_cli() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    let codepage = dir.path().join("custom.dat");
    write_codepage(&codepage);
    let base = dir.path().join("names");
    fs::write(dir.path().join("names.txt"), utf16le("1\r\nBob\r\n")).unwrap();

    let status = Command::new(exe)
        .args([
            base.to_str().unwrap(),
            "c",
            "--codepage",
            codepage.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("names.str").exists());
}

#[test]
fn missing_codepage_error() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("names");
    fs::write(dir.path().join("names.txt"), utf16le("1\r\nBob\r\n")).unwrap();
    let output = Command::new(exe)
        .args([base.to_str().unwrap(), "c"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reading codepage"));
    assert!(stderr.contains("Check that the file exists"));
}

#[test]
fn truncated_str_error() {
    let exe = env!("CARGO_BIN_EXE_strtool");
    let dir = tempfile::tempdir().unwrap();
    write_codepage(&dir.path().join("MBToUni.dat"));
    fs::write(dir.path().join("bad.str"), b"BFST\x01\x00\x00\x00\x09").unwrap();
    let base = dir.path().join("bad");
    let output = Command::new(exe)
        .args([base.to_str().unwrap(), "x"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("truncated or corrupted"));
}

#[test]
fn codepage_dump_cli() {
    let exe = env!("CARGO_BIN_EXE_codepage_dump");
    let dir = tempfile::tempdir().unwrap();
    let codepage = dir.path().join("MBToUni.dat");
    write_codepage(&codepage);
    let output = Command::new(exe)
        .args([codepage.to_str().unwrap(), "66"])
        .output()
        .expect("run failed");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("   65 U+0041 A"));
    assert!(!stdout.contains("U+0043"));
    assert!(stdout.contains("Total mappings: 256"));
}
