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

//! Embedded Element prelude and helpers to compile it next to user code.
//!
//! The prelude is shipped as a plain Element file and merged in front of the
//! user sources when [`crate::CompileOptions::include_prelude`] is set.

use crate::source::ElementSource;

/// Canonical path of the embedded prelude.
pub const PRELUDE_PATH: &str = "stdlib/prelude.ele";

/// Embedded source text for `stdlib/prelude.ele`.
pub const PRELUDE_SOURCE: &str = include_str!("../stdlib/prelude.ele");

/// Returns the embedded prelude as a source unit.
pub fn prelude_source() -> ElementSource {
    ElementSource::new(PRELUDE_PATH, PRELUDE_SOURCE)
}

/// Puts the prelude in front of `user_sources`.
///
/// A user source whose path equals [`PRELUDE_PATH`] replaces the embedded
/// copy.
pub fn merge_with_prelude(user_sources: &[ElementSource]) -> Vec<ElementSource> {
    let mut merged = Vec::with_capacity(user_sources.len() + 1);
    if !user_sources.iter().any(|src| src.path == PRELUDE_PATH) {
        merged.push(prelude_source());
    }
    merged.extend_from_slice(user_sources);
    merged
}
