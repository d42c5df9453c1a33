pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::error::PipelineError;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use log::debug;
use num_traits::Float;
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Calculates the value of the given arithmetic expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The value of the expression, or the first error found while tokenizing,
/// building or evaluating it.
///
/// # Examples
///
/// ```
/// use expression_evaluator::interpreter::compute_expression;
///
/// let value = compute_expression("3 + 5 * (2 - 8)");
/// assert_eq!(value, Ok(-27.0));
/// ```
pub fn compute_expression(expression: &str) -> Result<f64, PipelineError> {
    compute_expression_as::<f64>(expression)
}

/// Calculates the value of the given arithmetic expression in any floating point type.
pub fn compute_expression_as<T: Float>(expression: &str) -> Result<T, PipelineError> {
    let expression_tree = convert(expression)?;
    let value = evaluator::evaluate_as::<T>(&expression_tree)?;
    debug!(
        "'{}' evaluated to {}",
        expression,
        value.to_f64().unwrap_or(f64::NAN)
    );
    Ok(value)
}

/// Converts the given input string into an equivalent expression tree.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use expression_evaluator::interpreter::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let expression = "2 * sqrt(9)";
/// let tree = convert(expression)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> Result<Node, PipelineError> {
    let tokens = lexer::tokenize(expression)?;
    let expression_tree = parser::build_tree(tokens)?;
    Ok(expression_tree)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use expression_evaluator::interpreter::tokens_to_string;
/// use expression_evaluator::interpreter::token::{OperatorKind, Token};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Operand(2.0),
///     Token::Operator(OperatorKind::Multiply),
///     Token::Operand(0.5),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "2 * 0.5");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());
    append_tokens(&mut builder, tokens);
    builder.string().context("Failed to build token string")
}

fn append_tokens(builder: &mut Builder, tokens: Vec<Token>) {
    for token in tokens {
        match token {
            Token::Operator(kind) if kind.as_binary_operator().is_some() => {
                builder.append(" ");
                builder.append(kind.to_string());
                builder.append(" ");
            }
            Token::Function { kind, arguments } => {
                builder.append(kind.name());
                builder.append("(");
                append_tokens(builder, arguments);
                builder.append(")");
            }
            Token::Separator => builder.append(", "),
            _ => builder.append(token.to_string()),
        }
    }
}
