#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the gocoverdir binary.
#[macro_export]
macro_rules! gocoverdir {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("gocoverdir"))
    };
}

/// Stand-in for the go tool. `test` writes a two-block profile (one covered, one
/// not) for its target into `-outputdir`; `tool cover` writes an empty report.
/// Every invocation records its arguments.
#[cfg(unix)]
const FAKE_RUNNER: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/invocations.log"
if [ "$1" = "tool" ]; then
  echo "<html></html>" > "$6"
  exit 0
fi
while [ $# -gt 0 ]; do
  case "$1" in
    -coverprofile) name="$2"; shift 2 ;;
    -outputdir) dir="$2"; shift 2 ;;
    *) target="$1"; shift ;;
  esac
done
echo "ok $target"
printf 'mode: set\n%s/f.go:1.1,2.2 1 1\n%s/f.go:3.1,4.2 1 0\n' "$target" "$target" > "$dir/$name"
"#;

/// Creates a temporary source tree for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
    pub out: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty tree and a separate output directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            out: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the tree.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a Go source file in the tree.
    pub fn create_go_file(&self, relative_path: &str) {
        self.create_file(relative_path, "package p\n");
    }

    /// Creates a directory in the tree.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Root of the source tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the combined profile inside the output directory.
    pub fn profile_path(&self) -> PathBuf {
        self.out.path().join("coverage.out")
    }

    pub fn profile_arg(&self) -> String {
        self.profile_path().to_string_lossy().into_owned()
    }

    pub fn read_profile(&self) -> String {
        fs::read_to_string(self.profile_path()).expect("Failed to read profile")
    }

    /// Writes a config file into the output directory and returns its path.
    pub fn create_config(&self, content: &str) -> String {
        let path = self.out.path().join("gocoverdir.toml");
        fs::write(&path, content).expect("Failed to write config");
        path.to_string_lossy().into_owned()
    }

    /// Installs the fake runner and returns a config file pointing at it.
    #[cfg(unix)]
    pub fn create_fake_runner_config(&self, extra: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = self.out.path().join("fake-go");
        fs::write(&script, FAKE_RUNNER).expect("Failed to write fake runner");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake runner executable");

        self.create_config(&format!(
            "[runner]\nprogram = \"{}\"\ngodep_program = \"{}\"\n{extra}",
            script.display(),
            script.display()
        ))
    }

    /// Argument lines recorded by the fake runner, one per invocation.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.out.path().join("invocations.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// `-outputdir` values the fake runner was given, one per test invocation.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        self.invocations()
            .iter()
            .filter_map(|line| {
                let mut words = line.split(' ');
                words.find(|word| *word == "-outputdir")?;
                words.next().map(PathBuf::from)
            })
            .collect()
    }
}
