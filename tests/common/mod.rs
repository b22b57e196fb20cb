//! # Fixture Loader
//!
//! Each `NAME.sgl` under `tests/fixtures` is paired with a `NAME.js` holding
//! the expected output, one rendered form per line.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A source file and the JavaScript it must compile to.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub path: PathBuf,
    pub source: String,
    pub expected: String,
}

/// Discovers every fixture pair below `dir`, sorted by path.
pub fn load_fixtures(dir: &Path) -> Vec<Fixture> {
    let mut fixtures: Vec<Fixture> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().map_or(false, |x| x == "sgl"))
        .map(|entry| {
            let path = entry.into_path();
            let expected_path = path.with_extension("js");
            let source = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {e}", path.display()));
            let expected = std::fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                panic!("Missing expected output '{}': {e}", expected_path.display())
            });
            Fixture {
                path,
                source,
                expected,
            }
        })
        .collect();
    fixtures.sort_by(|a, b| a.path.cmp(&b.path));
    fixtures
}
