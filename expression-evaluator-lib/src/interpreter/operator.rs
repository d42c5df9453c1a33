use crate::interpreter::token::{OperatorKind, Token};
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A named function that can appear in an expression, e.g. `sin(x)`.
///
/// `Area`, `Perimeter`, `X`, `Y` and `Z` are reserved names: they are recognized
/// while tokenizing but have no evaluation rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Sine,
    Cosine,
    Tangent,
    PositiveSquareRoot,
    NaturalLogarithm,
    Power,
    AbsoluteValue,
    Area,
    Perimeter,
    X,
    Y,
    Z,
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        Token::Operator(self.kind())
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            BinaryOperator::Add => OperatorKind::Add,
            BinaryOperator::Subtract => OperatorKind::Subtract,
            BinaryOperator::Multiply => OperatorKind::Multiply,
            BinaryOperator::Divide => OperatorKind::Divide,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_ge(&self, other: &Self) -> bool {
        self.precedence().ge(&other.precedence())
    }

    pub(crate) fn precedence_lt(&self, other: &Self) -> bool {
        self.precedence().lt(&other.precedence())
    }
}

impl FunctionKind {
    const ALL: [FunctionKind; 12] = [
        FunctionKind::Sine,
        FunctionKind::Cosine,
        FunctionKind::Tangent,
        FunctionKind::PositiveSquareRoot,
        FunctionKind::NaturalLogarithm,
        FunctionKind::Power,
        FunctionKind::AbsoluteValue,
        FunctionKind::Area,
        FunctionKind::Perimeter,
        FunctionKind::X,
        FunctionKind::Y,
        FunctionKind::Z,
    ];

    /// Looks up a function by its name, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use expression_evaluator::interpreter::operator::FunctionKind;
    ///
    /// assert_eq!(FunctionKind::from_name("SQRT"), Some(FunctionKind::PositiveSquareRoot));
    /// assert_eq!(FunctionKind::from_name("foo"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<FunctionKind> {
        Self::ALL
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FunctionKind::Sine => "sin",
            FunctionKind::Cosine => "cos",
            FunctionKind::Tangent => "tan",
            FunctionKind::PositiveSquareRoot => "sqrt",
            FunctionKind::NaturalLogarithm => "ln",
            FunctionKind::Power => "pow",
            FunctionKind::AbsoluteValue => "abs",
            FunctionKind::Area => "area",
            FunctionKind::Perimeter => "perimeter",
            FunctionKind::X => "x",
            FunctionKind::Y => "y",
            FunctionKind::Z => "z",
        }
    }

    /// The number of arguments the function is evaluated with,
    /// or `None` if the function has no evaluation rule.
    pub fn arity(&self) -> Option<usize> {
        match self {
            FunctionKind::Sine
            | FunctionKind::Cosine
            | FunctionKind::Tangent
            | FunctionKind::PositiveSquareRoot
            | FunctionKind::NaturalLogarithm
            | FunctionKind::AbsoluteValue => Some(1),
            FunctionKind::Power => Some(2),
            FunctionKind::Area
            | FunctionKind::Perimeter
            | FunctionKind::X
            | FunctionKind::Y
            | FunctionKind::Z => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn operator_equality_correspond_with_precedence() {
        let equal1 = BinaryOperator::Multiply;
        let equal2 = BinaryOperator::Divide;
        assert!(equal1.precedence_eq(&equal2))
    }

    #[test]
    fn operator_ge_correspond_with_precedence() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Subtract;
        assert!(greater.precedence_ge(&lesser));
        assert!(lesser.precedence_ge(&BinaryOperator::Add));
        assert!(!lesser.precedence_ge(&greater));
    }

    #[test]
    fn operator_lt_correspond_with_precedence() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Add;
        assert!(lesser.precedence_lt(&greater))
    }

    #[parameterized(
    name = { "sin", "COS", "Tan", "sqrt", "LN", "pow", "abs", "Area", "perimeter", "X", "y", "z" },
    expected = {
    FunctionKind::Sine,
    FunctionKind::Cosine,
    FunctionKind::Tangent,
    FunctionKind::PositiveSquareRoot,
    FunctionKind::NaturalLogarithm,
    FunctionKind::Power,
    FunctionKind::AbsoluteValue,
    FunctionKind::Area,
    FunctionKind::Perimeter,
    FunctionKind::X,
    FunctionKind::Y,
    FunctionKind::Z,
    }
    )]
    fn function_names_are_recognized_case_insensitively(name: &str, expected: FunctionKind) {
        assert_eq!(FunctionKind::from_name(name), Some(expected));
    }

    #[test]
    fn unknown_function_name_is_not_recognized() {
        assert_eq!(FunctionKind::from_name("sinh"), None);
        assert_eq!(FunctionKind::from_name(""), None);
    }

    #[test]
    fn reserved_functions_have_no_arity() {
        assert_eq!(FunctionKind::Area.arity(), None);
        assert_eq!(FunctionKind::Z.arity(), None);
        assert_eq!(FunctionKind::Power.arity(), Some(2));
        assert_eq!(FunctionKind::Sine.arity(), Some(1));
    }
}
