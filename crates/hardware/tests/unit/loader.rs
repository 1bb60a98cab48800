//! Program Loader Tests.

use mipsim_core::common::LoadError;
use mipsim_core::sim::loader;
use std::io::Write;

/// Well-formed listings parse in order; comments and blanks are skipped.
#[test]
fn parses_words_skipping_comments() {
    let words = loader::parse_hex("3c081234\n\n# entry point\n35280042\n0000000c\n").unwrap();
    assert_eq!(words, vec![0x3C08_1234, 0x3528_0042, 0x0000_000C]);
}

/// A malformed line is reported with its 1-based line number.
#[test]
fn malformed_word_reports_line() {
    let err = loader::parse_hex("3c081234\nnot-hex\n").unwrap_err();
    match err {
        LoadError::BadWord { line, word } => {
            assert_eq!(line, 2);
            assert_eq!(word, "not-hex");
        }
        other => panic!("expected BadWord, got {other:?}"),
    }
}

/// Words longer than 32 bits are rejected.
#[test]
fn oversized_word_rejected() {
    assert!(loader::parse_hex("123456789\n").is_err());
}

/// Round trip through a real file.
#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "2402000a").unwrap();
    writeln!(file, "0000000c").unwrap();

    let words = loader::load_hex_file(file.path()).unwrap();
    assert_eq!(words, vec![0x2402_000A, 0x0000_000C]);
}

/// A missing file surfaces as an I/O load error.
#[test]
fn missing_file_is_io_error() {
    let err = loader::load_hex_file(std::path::Path::new("/no/such/program.hex")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
