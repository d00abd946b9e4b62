use std::path::Path;

use super::*;

fn parse(content: &str) -> Result<Vec<Profile>> {
    ProfileParser::new().parse(content, Path::new("coverage.out"))
}

#[test]
fn parses_single_block() {
    let profiles = parse("mode: set\nf.go:1.1,2.2 1 1\n").unwrap();

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].file_name, "f.go");
    assert_eq!(profiles[0].mode, "set");
    assert_eq!(
        profiles[0].blocks,
        vec![ProfileBlock {
            start_line: 1,
            start_col: 1,
            end_line: 2,
            end_col: 2,
            num_stmt: 1,
            count: 1,
        }]
    );
}

#[test]
fn groups_blocks_by_file_sorted_by_name() {
    let profiles = parse(
        "mode: count\n\
         example.com/z/z.go:3.1,4.2 2 0\n\
         example.com/a/a.go:10.5,12.2 1 4\n\
         example.com/z/z.go:1.1,2.2 1 7\n",
    )
    .unwrap();

    let names: Vec<_> = profiles.iter().map(|p| p.file_name.as_str()).collect();
    assert_eq!(names, vec!["example.com/a/a.go", "example.com/z/z.go"]);
    let z = &profiles[1];
    assert_eq!(z.blocks[0].start_line, 1);
    assert_eq!(z.blocks[1].start_line, 3);
}

#[test]
fn empty_input_yields_no_profiles() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n").unwrap().is_empty());
}

#[test]
fn header_only_yields_no_profiles() {
    assert!(parse("mode: set\n").unwrap().is_empty());
}

#[test]
fn blank_lines_are_skipped() {
    let profiles = parse("mode: set\n\nf.go:1.1,2.2 1 1\n\n").unwrap();
    assert_eq!(profiles[0].blocks.len(), 1);
}

#[test]
fn windows_style_file_names_keep_their_colon() {
    let profiles = parse("mode: set\nC:\\src\\f.go:1.1,2.2 3 0\n").unwrap();
    assert_eq!(profiles[0].file_name, "C:\\src\\f.go");
    assert_eq!(profiles[0].blocks[0].num_stmt, 3);
}

#[test]
fn missing_header_is_rejected() {
    let err = parse("f.go:1.1,2.2 1 1\n").unwrap_err();

    match err {
        GocoverdirError::ProfileParse { line, .. } => assert_eq!(line, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_mode_is_rejected() {
    assert!(parse("mode: \nf.go:1.1,2.2 1 1\n").is_err());
}

#[test]
fn malformed_block_reports_line_number() {
    let err = parse("mode: set\nf.go:1.1,2.2 1 1\nf.go:garbage\n").unwrap_err();

    match err {
        GocoverdirError::ProfileParse { line, message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("f.go:garbage"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeated_identical_header_is_tolerated() {
    let profiles = parse("mode: set\na.go:1.1,2.2 1 1\nmode: set\nb.go:1.1,2.2 1 0\n").unwrap();
    assert_eq!(profiles.len(), 2);
}

#[test]
fn conflicting_header_is_rejected() {
    let err = parse("mode: set\na.go:1.1,2.2 1 1\nmode: count\n").unwrap_err();
    assert!(err.to_string().contains("conflicts"));
}

#[test]
fn duplicate_blocks_are_or_ed_in_set_mode() {
    let profiles = parse("mode: set\nf.go:1.1,2.2 2 0\nf.go:1.1,2.2 2 1\n").unwrap();

    assert_eq!(profiles[0].blocks.len(), 1);
    assert_eq!(profiles[0].blocks[0].count, 1);
    assert_eq!(profiles[0].total_statements(), 2);
}

#[test]
fn duplicate_blocks_are_summed_in_count_mode() {
    let profiles = parse("mode: count\nf.go:1.1,2.2 2 3\nf.go:1.1,2.2 2 4\n").unwrap();

    assert_eq!(profiles[0].blocks.len(), 1);
    assert_eq!(profiles[0].blocks[0].count, 7);
}

#[test]
fn duplicate_blocks_with_different_statement_counts_are_rejected() {
    let err = parse("mode: set\nf.go:1.1,2.2 2 0\nf.go:1.1,2.2 3 1\n").unwrap_err();

    match err {
        GocoverdirError::ProfileParse { line, message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("inconsistent NumStmt"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_file_reports_missing_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let err = ProfileParser::new()
        .parse_file(&temp_dir.path().join("absent.out"))
        .unwrap_err();

    assert!(matches!(err, GocoverdirError::FileRead { .. }));
}
