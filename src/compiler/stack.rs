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

//! Lexical scope frames used while resolving names.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Value;

#[derive(Debug, Default)]
struct Frame {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<CompilationStack>,
}

/// Handle to one scope frame.
///
/// Cloning the handle shares the frame. Parents are only ever read through
/// a child, so frames pushed from the same parent stay independent.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompilationStack(Rc<Frame>);

impl CompilationStack {
    /// Creates an empty root frame.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates a child frame whose parent is `self`.
    pub(crate) fn push(&self) -> Self {
        Self(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    /// Looks `name` up in this frame only.
    pub(crate) fn get_local(&self, name: &str) -> Option<Value> {
        self.0.bindings.borrow().get(name).cloned()
    }

    /// Looks `name` up in this frame, then in each ancestor; nearest wins.
    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if let Some(value) = current.get_local(name) {
                return Some(value);
            }
            frame = current.0.parent.as_ref();
        }
        None
    }

    /// Binds `name` in this frame, replacing an earlier local binding.
    pub(crate) fn add(&self, name: &str, value: Value) {
        self.0.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Returns whether both handles share one frame.
    #[cfg(test)]
    pub(crate) fn same_frame(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_binding_shadows_ancestors() {
        let root = CompilationStack::new();
        root.add("x", Value::Constant(1.0));
        let child = root.push();
        assert_eq!(child.get("x"), Some(Value::Constant(1.0)));
        assert_eq!(child.get_local("x"), None);

        child.add("x", Value::Constant(2.0));
        assert_eq!(child.get("x"), Some(Value::Constant(2.0)));
        assert_eq!(root.get("x"), Some(Value::Constant(1.0)));
    }

    #[test]
    fn sibling_frames_are_independent() {
        let root = CompilationStack::new();
        let left = root.push();
        let right = root.push();
        left.add("a", Value::Constant(3.0));
        assert_eq!(right.get("a"), None);
        assert_eq!(root.get("a"), None);
        assert!(!left.same_frame(&right));
        assert!(left.same_frame(&left.clone()));
    }
}
