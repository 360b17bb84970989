/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Parses every fixture under `tests/fixtures/parse`.
//!
//! `*-pass.ele` files must parse; `*-fail.ele` files must be rejected with a
//! syntax error pointing inside the file.

use element_compiler::{ErrorCode, parse_element};
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures(suffix: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/parse");
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .expect("fixture directory should exist")
        .map(|entry| entry.expect("readable entry").path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .collect();
    paths.sort();
    paths
}

#[test]
fn pass_fixtures_parse() {
    let paths = fixtures("-pass.ele");
    assert!(!paths.is_empty(), "no pass fixtures found");
    for path in paths {
        let source = fs::read_to_string(&path).expect("readable fixture");
        if let Err(err) = parse_element(&source) {
            panic!("{} should parse:\n{err}", path.display());
        }
    }
}

#[test]
fn fail_fixtures_are_rejected() {
    let paths = fixtures("-fail.ele");
    assert!(!paths.is_empty(), "no fail fixtures found");
    for path in paths {
        let source = fs::read_to_string(&path).expect("readable fixture");
        let Err(err) = parse_element(&source) else {
            panic!("{} should not parse", path.display());
        };
        assert_eq!(err.code, ErrorCode::SyntaxError, "{}", path.display());
        assert!(
            err.line >= 1 && err.line <= source.lines().count().max(1),
            "{}: line {} out of range",
            path.display(),
            err.line
        );
    }
}

#[test]
fn pass_fixtures_compile_without_duplicates() {
    for path in fixtures("-pass.ele") {
        let source = fs::read_to_string(&path).expect("readable fixture");
        let compilation = element_compiler::compile_element(&source).expect("parse");
        assert!(
            compilation.diagnostics().is_empty(),
            "{}: {:?}",
            path.display(),
            compilation.diagnostics()
        );
    }
}
