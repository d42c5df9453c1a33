use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use thiserror::Error;

/// Failures while splitting an expression into tokens.
///
/// Positions are byte offsets into the original expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("malformed operand '{text}' at position {position}")]
    MalformedOperand { text: String, position: usize },
    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },
    #[error("expected '(' after function '{name}' at position {position}")]
    ExpectedArguments { name: String, position: usize },
    #[error("arguments of function '{name}' starting at position {position} are never closed")]
    UnterminatedArguments { name: String, position: usize },
    #[error("argument separator outside of a function call at position {position}")]
    UnexpectedSeparator { position: usize },
}

/// Failures while building an expression tree from tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("closing parenthesis has no matching opening parenthesis")]
    UnmatchedCloseParen,
    #[error("operator '{operator}' is missing an operand")]
    InsufficientOperands { operator: BinaryOperator },
    #[error("malformed expression: {reason}")]
    MalformedExpression { reason: String },
}

/// Failures while evaluating an expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("function '{function}' can not be evaluated with {arguments} argument(s)")]
    UnsupportedFunction {
        function: FunctionKind,
        arguments: usize,
    },
    #[error("{argument} is outside the domain of function '{function}'")]
    Domain { function: FunctionKind, argument: f64 },
    #[error("operand {value} can not be represented in the requested number type")]
    UnrepresentableOperand { value: f64 },
}

/// Any failure of the tokenize, build and evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Evaluate(#[from] EvalError),
}

impl BuildError {
    pub(crate) fn malformed(reason: impl Into<String>) -> BuildError {
        BuildError::MalformedExpression {
            reason: reason.into(),
        }
    }
}
