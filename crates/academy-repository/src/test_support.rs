//! Shared on-disk repository fixture for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::Repository;

pub(crate) const QUIZ_XHTML: &str = r#"<h1>C basics</h1>
<quiz>
  <question>
    Which header declares printf?
    <answer value="1">stdio.h</answer>
    <answer value="0">stdlib.h</answer>
  </question>
</quiz>
"#;

pub(crate) const CODE_XHTML: &str = "<code><python>print(1)</python></code>";

/// Repository layout:
///
/// ```text
/// academy/                 content.html  meta.json (title)
///   c/                     content.xhtml meta.json
///     01-intro/            content.html  meta.json  images/diagram.svg  notes.txt
///     02-pointers/         content.php   meta.json
///     drafts/              meta.json only
///   rust/                  content.xhtml meta.json (title, course.weeks)
///   .git/                  ignored
/// ```
pub(crate) struct Fixture {
    _temp: tempfile::TempDir,
    root: PathBuf,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("academy");
        let fixture = Self { _temp: temp, root };

        fixture.write("", "content.html", "<p>Welcome</p>");
        fixture.write("", "meta.json", r#"{"title": "Digital Academy"}"#);

        fixture.write("c", "content.xhtml", QUIZ_XHTML);
        fixture.write("c", "meta.json", "{}");

        fixture.document("c/01-intro", "content.html");
        fixture.write("c/01-intro/images", "diagram.svg", "<svg/>");
        fixture.write("c/01-intro", "notes.txt", "notes");

        fixture.write("c/02-pointers", "content.php", "<?php echo 'ptr'; ?>");
        fixture.write("c/02-pointers", "meta.json", "{}");

        fixture.write("c/drafts", "meta.json", "{}");

        fixture.write("rust", "content.xhtml", CODE_XHTML);
        fixture.write(
            "rust",
            "meta.json",
            r#"{"title": "Rust in practice", "course": {"weeks": 6}}"#,
        );

        fixture.document(".git", "content.html");
        fixture
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn open(&self) -> Repository {
        Repository::open(&self.root).unwrap()
    }

    /// Write one file, creating directories as needed.
    pub(crate) fn write(&self, dir: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a minimal qualifying document.
    pub(crate) fn document(&self, dir: &str, content_file: &str) -> PathBuf {
        self.write(dir, content_file, "<p>x</p>");
        self.write(dir, "meta.json", "{}");
        self.root.join(dir)
    }
}
