use std::io::Write;

use tempfile::TempDir;

use super::*;

#[test]
fn dash_selects_stderr() {
    assert!(matches!(LogSink::open("-").unwrap(), LogSink::Stderr));
}

#[test]
fn empty_logfile_selects_buffer() {
    assert!(matches!(LogSink::open("").unwrap(), LogSink::Buffer(_)));
}

#[test]
fn path_logfile_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.log");

    let sink = LogSink::open(path.to_str().unwrap()).unwrap();

    assert!(matches!(sink, LogSink::File { .. }));
    assert!(path.exists());
}

#[test]
fn path_logfile_in_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("run.log");

    let err = LogSink::open(path.to_str().unwrap()).unwrap_err();

    assert!(matches!(err, GocoverdirError::FileWrite { .. }));
}

#[test]
fn buffer_collects_writer_output_and_absorbed_bytes() {
    let sink = LogSink::buffer();

    sink.make_writer().write_all(b"walking .\n").unwrap();
    sink.absorb(b"ok  \tpkg/a\t0.01s\n");

    assert_eq!(sink.buffered(), b"walking .\nok  \tpkg/a\t0.01s\n");
}

#[test]
fn clones_share_one_buffer() {
    let sink = LogSink::buffer();
    let clone = sink.clone();

    clone.absorb(b"shared");

    assert_eq!(sink.buffered(), b"shared");
}

#[test]
fn file_sink_receives_absorbed_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.log");
    let sink = LogSink::open(path.to_str().unwrap()).unwrap();

    sink.absorb(b"FAIL\tpkg/b\n");
    sink.make_writer().flush().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "FAIL\tpkg/b\n");
}

#[test]
fn unbuffered_sinks_report_nothing_buffered() {
    assert!(LogSink::Stderr.buffered().is_empty());
}

#[test]
fn runner_stdio_is_available_for_every_sink() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.log");

    assert!(LogSink::Stderr.runner_stdio().is_ok());
    assert!(LogSink::buffer().runner_stdio().is_ok());
    assert!(
        LogSink::open(path.to_str().unwrap())
            .unwrap()
            .runner_stdio()
            .is_ok()
    );
}
