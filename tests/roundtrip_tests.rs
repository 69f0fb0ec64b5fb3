use std::path::PathBuf;

use commented_ini::{CommentedIni, Error, HEADER};
use tempfile::TempDir;

/// Helper to create a temporary directory for file-based tests
fn temp_config_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

const BASIC: &str = "\
# top of file
; alternate marker

[app]
# name of the app
name = demo

[server]
port = 8080
# trailing note
";

/// `BASIC` after a round trip: a block captured above a key re-emits
/// directly below that key's rendered line, everything else stays put.
const BASIC_RESTORED: &str = "\
# top of file
; alternate marker

[app]
name = demo
# name of the app

[server]
port = 8080
# trailing note
";

#[test]
fn roundtrip_reattaches_comments_to_their_anchors() {
    let dir = temp_config_dir();
    let path = write_fixture(&dir, "basic.ini", BASIC);

    let mut config = CommentedIni::new();
    let loaded = config.read(&[&path]).expect("Failed to read fixture");

    assert_eq!(loaded, vec![path]);
    assert_eq!(config.writes(true), BASIC_RESTORED);
}

#[test]
fn roundtrip_through_write_to_stream() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines(BASIC.as_bytes())
        .expect("Failed to read source");

    let mut out = Vec::new();
    config.write(&mut out, true).expect("Failed to write");

    assert_eq!(String::from_utf8(out).expect("utf8 output"), BASIC_RESTORED);
}

#[test]
fn roundtrip_is_byte_stable_for_header_and_trailing_blocks() {
    // Top-of-file and end-of-file blocks are the ones with no line to be
    // displaced behind; for these the round trip is byte-identical.
    let stable = "# top of file\n\n[s]\nk = 1\n# trailing note\n";

    let mut config = CommentedIni::new();
    config
        .read_from_lines(stable.as_bytes())
        .expect("Failed to read source");

    assert_eq!(config.writes(true), stable);
}

#[test]
fn concrete_scenario_map_and_output() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines("# top\n[S]\n# before-k\nk=1\n".as_bytes())
        .expect("Failed to read source");

    let map = config.comments().expect("comment map populated");
    assert_eq!(
        map.block(HEADER, HEADER),
        Some(["# top".to_string()].as_slice())
    );
    assert_eq!(
        map.block("[S]", "k"),
        Some(["# before-k".to_string()].as_slice())
    );
    // The section's own header bucket exists but holds nothing.
    let empty: &[String] = &[];
    assert_eq!(map.block("[S]", HEADER), Some(empty));

    assert_eq!(config.writes(true), "# top\n[S]\nk = 1\n# before-k\n");
}

#[test]
fn delimiter_spacing_can_be_disabled() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines("[s]\n# c\nk = 1\n".as_bytes())
        .expect("Failed to read source");

    assert_eq!(config.writes(false), "[s]\nk=1\n# c\n");
}

#[test]
fn mutated_values_keep_their_comments() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines(BASIC.as_bytes())
        .expect("Failed to read source");

    config.set("server", "port", "9090");
    let out = config.writes(true);

    assert!(out.contains("port = 9090"));
    assert!(out.contains("# top of file"));
    assert!(out.contains("# name of the app"));
    assert!(out.contains("# trailing note"));
}

#[test]
fn missing_files_are_skipped_silently() {
    let dir = temp_config_dir();
    let good = write_fixture(&dir, "good.ini", "[s]\nk = 1\n");
    let missing = dir.path().join("does-not-exist.ini");

    let mut config = CommentedIni::new();
    let loaded = config
        .read(&[missing.clone(), good.clone()])
        .expect("Failed to read mixed path list");

    assert_eq!(loaded, vec![good]);
    assert_eq!(config.get("s", "k"), Some("1"));
}

#[test]
fn multi_file_load_accumulates_comment_map() {
    let dir = temp_config_dir();
    let first = write_fixture(&dir, "one.ini", "[a]\n# one\nx = 1\n");
    let second = write_fixture(&dir, "two.ini", "[b]\n# two\ny = 2\n");

    let mut config = CommentedIni::new();
    let loaded = config
        .read(&[&first, &second])
        .expect("Failed to read fixtures");
    assert_eq!(loaded.len(), 2);

    let out = config.writes(true);
    assert!(out.contains("# one"));
    assert!(out.contains("# two"));

    let map = config.comments().expect("comment map populated");
    assert_eq!(map.block("[a]", "x"), Some(["# one".to_string()].as_slice()));
    assert_eq!(map.block("[b]", "y"), Some(["# two".to_string()].as_slice()));
}

#[test]
fn mapping_load_passes_through_untouched() {
    let mut config = CommentedIni::new();
    config.read_from_mapping(vec![(
        "section".to_string(),
        vec![("key".to_string(), "value".to_string())],
    )]);

    assert!(config.comments().is_none());
    assert_eq!(config.writes(true), "[section]\nkey = value\n");
}

#[test]
fn string_load_is_not_intercepted() {
    let mut config = CommentedIni::new();
    config
        .read_from_string("# dropped on purpose\n[s]\nk = 1\n")
        .expect("Failed to read string");

    assert!(config.comments().is_none());
    assert_eq!(config.writes(true), "[s]\nk = 1\n");
}

#[test]
fn delimiter_variants_share_first_delimiter_rule() {
    let mut config = CommentedIni::new();
    config
        .read_from_string(
            "[s]\na = value\nb=value\nc=:value\nd:=value\ne : value\nf:value\nkey with spaces=value\ng: value with = in it\n",
        )
        .expect("Failed to read string");

    assert_eq!(config.get("s", "a"), Some("value"));
    assert_eq!(config.get("s", "b"), Some("value"));
    assert_eq!(config.get("s", "c"), Some(":value"));
    assert_eq!(config.get("s", "d"), Some("=value"));
    assert_eq!(config.get("s", "e"), Some("value"));
    assert_eq!(config.get("s", "f"), Some("value"));
    assert_eq!(config.get("s", "key with spaces"), Some("value"));
    assert_eq!(config.get("s", "g"), Some("value with = in it"));
}

#[test]
fn indented_sections_and_comments_are_recognized() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines("\t; tabbed comment\n\t[SECTION]\n  # spaced comment\nk = 1\n".as_bytes())
        .expect("Failed to read source");

    assert!(config.has_section("SECTION"));
    let map = config.comments().expect("comment map populated");
    assert_eq!(
        map.block("[SECTION]", "k"),
        Some(["  # spaced comment".to_string()].as_slice())
    );
    assert_eq!(
        map.block(HEADER, HEADER),
        Some(["\t; tabbed comment".to_string()].as_slice())
    );
}

#[test]
fn section_names_are_trimmed_inside_brackets() {
    let mut config = CommentedIni::new();
    config
        .read_from_lines("[ padded ]\n# c\nk = 1\n".as_bytes())
        .expect("Failed to read source");

    assert!(config.has_section("padded"));
    assert_eq!(config.writes(true), "[padded]\nk = 1\n# c\n");
}

#[test]
fn failed_parse_leaves_no_comments_behind() {
    let mut config = CommentedIni::new();
    let err = config
        .read_from_lines("# stray\n[s]\nbroken line\n".as_bytes())
        .expect_err("Expected parse failure");
    assert!(matches!(err, Error::InvalidLine { .. }));
    assert!(config.comments().is_none());

    config
        .read_from_lines("[s]\nk = 1\n".as_bytes())
        .expect("Failed to read source");
    assert!(!config.writes(true).contains("# stray"));
}

#[test]
fn line_without_delimiter_is_rejected() {
    let mut config = CommentedIni::new();
    let err = config
        .read_from_string("[s]\nnot an assignment\n")
        .expect_err("Expected parse failure");

    match err {
        Error::InvalidLine { line, text } => {
            assert_eq!(line, 2);
            assert_eq!(text, "not an assignment");
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn option_before_section_is_rejected() {
    let mut config = CommentedIni::new();
    let err = config
        .read_from_string("orphan = 1\n")
        .expect_err("Expected parse failure");

    assert!(matches!(err, Error::MissingSectionHeader { line: 1, .. }));
}

#[test]
fn never_loaded_instance_writes_nothing() {
    let mut config = CommentedIni::new();
    assert_eq!(config.writes(true), "");
}
