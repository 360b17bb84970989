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

//! Numeric built-ins visible from the root scope.

use crate::diagnostics::ErrorCode;

use super::context::Reported;
use super::{Compilation, Value};

/// Built-in taking one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Sin,
    Cos,
    Ln,
    Exp,
}

impl UnaryOp {
    const ALL: [UnaryOp; 9] = [
        UnaryOp::Sqrt,
        UnaryOp::Abs,
        UnaryOp::Floor,
        UnaryOp::Ceil,
        UnaryOp::Round,
        UnaryOp::Sin,
        UnaryOp::Cos,
        UnaryOp::Ln,
        UnaryOp::Exp,
    ];

    fn name(self) -> &'static str {
        match self {
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Abs => "abs",
            UnaryOp::Floor => "floor",
            UnaryOp::Ceil => "ceil",
            UnaryOp::Round => "round",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Ln => "ln",
            UnaryOp::Exp => "exp",
        }
    }

    fn apply(self, a: f64) -> f64 {
        match self {
            UnaryOp::Sqrt => a.sqrt(),
            UnaryOp::Abs => a.abs(),
            UnaryOp::Floor => a.floor(),
            UnaryOp::Ceil => a.ceil(),
            UnaryOp::Round => a.round(),
            UnaryOp::Sin => a.sin(),
            UnaryOp::Cos => a.cos(),
            UnaryOp::Ln => a.ln(),
            UnaryOp::Exp => a.exp(),
        }
    }
}

/// Built-in taking two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Min,
    Max,
}

impl BinaryOp {
    const ALL: [BinaryOp; 8] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::Pow,
        BinaryOp::Min,
        BinaryOp::Max,
    ];

    fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Rem => "rem",
            BinaryOp::Pow => "pow",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            // IEEE semantics: division by zero yields an infinity or NaN.
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            BinaryOp::Pow => a.powf(b),
            BinaryOp::Min => a.min(b),
            BinaryOp::Max => a.max(b),
        }
    }
}

/// Built-in numeric function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Intrinsic {
    /// Every intrinsic, binary ones first.
    pub fn all() -> impl Iterator<Item = Intrinsic> {
        BinaryOp::ALL
            .into_iter()
            .map(Intrinsic::Binary)
            .chain(UnaryOp::ALL.into_iter().map(Intrinsic::Unary))
    }

    /// Looks an intrinsic up by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|intrinsic| intrinsic.name() == name)
    }

    /// Source name.
    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Unary(op) => op.name(),
            Intrinsic::Binary(op) => op.name(),
        }
    }

    /// Number of numeric arguments taken.
    pub fn arity(self) -> usize {
        match self {
            Intrinsic::Unary(_) => 1,
            Intrinsic::Binary(_) => 2,
        }
    }
}

impl Compilation {
    /// Evaluates an intrinsic over constant arguments.
    pub(crate) fn apply_intrinsic(&mut self, intrinsic: Intrinsic, arguments: &[Value]) -> Value {
        let result = match intrinsic {
            Intrinsic::Unary(op) => self
                .expect_numbers::<1>(intrinsic, arguments)
                .map(|[a]| op.apply(a)),
            Intrinsic::Binary(op) => self
                .expect_numbers::<2>(intrinsic, arguments)
                .map(|[a, b]| op.apply(a, b)),
        };
        result.map_or(Value::Error, Value::Constant)
    }

    /// Validates arity and extracts exactly `N` numeric arguments.
    fn expect_numbers<const N: usize>(
        &mut self,
        intrinsic: Intrinsic,
        arguments: &[Value],
    ) -> Result<[f64; N], Reported> {
        let name = intrinsic.name();
        if arguments.len() != N {
            return Err(self.context.report(
                ErrorCode::ArgumentCount,
                format!(
                    "{name} expects exactly {N} argument(s), found {}",
                    arguments.len()
                ),
            ));
        }
        let mut numbers = [0.0; N];
        for (slot, argument) in numbers.iter_mut().zip(arguments) {
            match argument {
                Value::Constant(number) => *slot = *number,
                Value::Error => return Err(Reported),
                other => {
                    let shown = self.display_value(other);
                    return Err(self.context.report(
                        ErrorCode::ArgumentType,
                        format!("{name} expects numbers, got `{shown}`"),
                    ));
                }
            }
        }
        Ok(numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        assert_eq!(Intrinsic::all().count(), 17);
        for intrinsic in Intrinsic::all() {
            assert_eq!(Intrinsic::from_name(intrinsic.name()), Some(intrinsic));
        }
        assert_eq!(Intrinsic::from_name("hypot"), None);
        assert_eq!(Intrinsic::from_name("pow").map(Intrinsic::arity), Some(2));
        assert_eq!(Intrinsic::from_name("sqrt").map(Intrinsic::arity), Some(1));
    }

    #[test]
    fn ops_follow_ieee() {
        assert_eq!(BinaryOp::Div.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOp::Pow.apply(2.0, 10.0), 1024.0);
        assert_eq!(BinaryOp::Rem.apply(7.0, 4.0), 3.0);
        assert!(UnaryOp::Sqrt.apply(-1.0).is_nan());
    }

    #[test]
    fn wrong_arity_is_reported_not_evaluated() {
        let mut c = crate::compile_element("a = 1;").expect("parse");
        let sqrt = Intrinsic::Unary(UnaryOp::Sqrt);
        let value = c.apply_intrinsic(sqrt, &[Value::Constant(4.0), Value::Constant(9.0)]);
        assert_eq!(value, Value::Error);
        let pow = Intrinsic::Binary(BinaryOp::Pow);
        assert_eq!(c.apply_intrinsic(pow, &[Value::Constant(3.0)]), Value::Error);
        let codes: Vec<ErrorCode> = c.diagnostics().iter().map(|error| error.code).collect();
        assert_eq!(codes, vec![ErrorCode::ArgumentCount, ErrorCode::ArgumentCount]);
        assert_eq!(c.apply_intrinsic(sqrt, &[Value::Constant(9.0)]), Value::Constant(3.0));
    }
}
