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

//! AST definitions for Element with byte-offset source spans.
//!
//! The parser creates this tree once; the resolver only reads it. Function
//! declarations and type statements are reference counted so compiled
//! functions can share them without copying bodies.

use nom_locate::LocatedSpan;
use std::fmt;
use std::rc::Rc;

/// Parser input span type carrying byte offsets.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Name of the implicit single output of a function.
pub const RETURN: &str = "return";

/// Identifier that marks a method's receiver port.
pub const SELF_PARAMETER: &str = "this";

/// Byte range of a node inside its source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SourceSpan {
    /// Creates a source span from parser start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type annotation on a port (`x:Number`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    /// Referenced type name.
    pub name: String,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

/// One declared input or output.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Port identifier.
    pub name: String,
    /// Optional declared type; `Any` when absent.
    pub ty: Option<TypeAnnotation>,
    /// Receiver marker for method-call dispatch.
    pub is_self: bool,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

impl Port {
    /// Implicit `return: Any` output of functions without declared outputs.
    pub fn implicit_return() -> Self {
        Self {
            name: RETURN.to_string(),
            ty: None,
            is_self: false,
            span: SourceSpan::default(),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}:{}", self.name, ty.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One link of an expression chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// Identifier reference.
    Variable(String),
    /// Member access on the previous link (`.name`).
    Member(String),
    /// Call of the previous link with argument chains.
    Call(Vec<ExprList>),
}

/// Spanned expression link.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Link payload.
    pub kind: ExprKind,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

/// Left-folded expression chain, e.g. `Vec2(3, 4).length()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    /// Links in source order; the parser never produces an empty chain.
    pub exprs: Vec<Expr>,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

/// Function body variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// Block of named sub-statements (`{ ... }`).
    Block(Vec<Statement>),
    /// Single assignment chain (`= expr;`).
    Assign(ExprList),
}

/// Structural classification of a function declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionShape {
    /// Assignment body; none of the block-bodied shapes.
    Assignment,
    /// Block body with declared inputs.
    Function,
    /// Block body without inputs or outputs.
    Namespace,
    /// Block body without inputs but with outputs; outputs double as inputs.
    Class,
}

impl FunctionShape {
    /// Returns whether members can be accessed without arguments.
    pub fn is_namespace(self) -> bool {
        matches!(self, FunctionShape::Namespace | FunctionShape::Class)
    }
}

/// Function, namespace or class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Declared inputs (`None` when the name has no parameter list).
    pub inputs: Option<Vec<Port>>,
    /// Declared outputs (`None` when no output clause is present).
    pub outputs: Option<Vec<Port>>,
    /// Function body.
    pub body: FunctionBody,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

impl FunctionDecl {
    /// Classifies the declaration from its syntactic parts.
    pub fn shape(&self) -> FunctionShape {
        match (&self.body, &self.inputs, &self.outputs) {
            (FunctionBody::Assign(_), _, _) => FunctionShape::Assignment,
            (FunctionBody::Block(_), Some(_), _) => FunctionShape::Function,
            (FunctionBody::Block(_), None, Some(_)) => FunctionShape::Class,
            (FunctionBody::Block(_), None, None) => FunctionShape::Namespace,
        }
    }
}

/// Nominal record type (`type Point(x:Number, y:Number);`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// Type name.
    pub name: String,
    /// Field ports in declaration order.
    pub ports: Vec<Port>,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

/// Statement variants inside a block body or at top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Function, namespace or class definition.
    Function(Rc<FunctionDecl>),
    /// Type statement.
    Type(Rc<TypeDecl>),
}

impl Statement {
    /// Name bound by the statement.
    pub fn name(&self) -> &str {
        match self {
            Statement::Function(decl) => &decl.name,
            Statement::Type(decl) => &decl.name,
        }
    }

    /// Source location for diagnostics.
    pub fn span(&self) -> &SourceSpan {
        match self {
            Statement::Function(decl) => &decl.span,
            Statement::Type(decl) => &decl.span,
        }
    }
}

/// Full parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}
