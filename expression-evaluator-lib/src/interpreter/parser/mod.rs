mod tree_builder;

use crate::interpreter::error::BuildError;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use log::debug;

/// Builds an expression tree from the given infix tokens, honoring operator
/// precedence and parentheses.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The root of the equivalent expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_evaluator::interpreter::parser::build_tree;
/// use expression_evaluator::interpreter::token::{OperatorKind, Token};
///
/// let infix_tokens = vec![
///     Token::Operand(2.0),
///     Token::Operator(OperatorKind::Add),
///     Token::Operand(3.0),
/// ];
/// let tree = build_tree(infix_tokens)?;
/// assert_eq!(tree.node_count(), 3);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn build_tree(infix_tokens: Vec<Token>) -> Result<Node, BuildError> {
    let tree = tree_builder::build(infix_tokens)?;
    debug!("built tree with {} nodes", tree.node_count());
    Ok(tree)
}
