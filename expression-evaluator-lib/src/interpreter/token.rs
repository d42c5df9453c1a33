use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Clone, PartialEq)]
pub enum Token {
    Operand(f64),
    Operator(OperatorKind),
    /// A function call together with the flat token sequence between its parentheses.
    Function {
        kind: FunctionKind,
        arguments: Vec<Token>,
    },
    /// Separates the arguments of a function call.
    Separator,
}

/// The single-character symbols that split an expression into tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParenthesis,
    CloseParenthesis,
}

pub static SYMBOLS: [char; 7] = ['+', '-', '*', '/', '(', ')', ','];

impl OperatorKind {
    pub fn from_symbol(symbol: char) -> Option<OperatorKind> {
        match symbol {
            '+' => Some(OperatorKind::Add),
            '-' => Some(OperatorKind::Subtract),
            '*' => Some(OperatorKind::Multiply),
            '/' => Some(OperatorKind::Divide),
            '(' => Some(OperatorKind::OpenParenthesis),
            ')' => Some(OperatorKind::CloseParenthesis),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            OperatorKind::Add => '+',
            OperatorKind::Subtract => '-',
            OperatorKind::Multiply => '*',
            OperatorKind::Divide => '/',
            OperatorKind::OpenParenthesis => '(',
            OperatorKind::CloseParenthesis => ')',
        }
    }

    /// Parentheses are not binary operators, everything else is.
    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            OperatorKind::Add => Some(BinaryOperator::Add),
            OperatorKind::Subtract => Some(BinaryOperator::Subtract),
            OperatorKind::Multiply => Some(BinaryOperator::Multiply),
            OperatorKind::Divide => Some(BinaryOperator::Divide),
            OperatorKind::OpenParenthesis | OperatorKind::CloseParenthesis => None,
        }
    }
}

impl Token {
    /// An 'operand' is a token that evaluates to a value on its own,
    /// i.e. a literal or a whole function call.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Operand(_) | Token::Function { .. })
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => write!(f, "{}", value),
            Token::Operator(kind) => write!(f, "{}", kind),
            Token::Function { kind, arguments } => {
                write!(f, "{}(", kind)?;
                for argument in arguments {
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Token::Separator => write!(f, ","),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
