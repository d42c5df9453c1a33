use crate::interpreter::error::BuildError;
use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::{OperatorKind, Token};

/// Builds a tree directly from infix tokens using an operator stack and an operand stack.
pub(super) fn build(tokens: Vec<Token>) -> Result<Node, BuildError> {
    let mut builder = TreeBuilder::new();
    for token in tokens {
        builder.push(token)?;
    }
    builder.finish()
}

struct TreeBuilder {
    operators: Vec<OperatorKind>,
    operands: Vec<Node>,
    /// True at the start and after `(` or a binary operator.
    expects_operand: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            operators: Vec::new(),
            operands: Vec::new(),
            expects_operand: true,
        }
    }

    fn push(&mut self, token: Token) -> Result<(), BuildError> {
        match token {
            Token::Operand(value) => {
                self.expect_operand()?;
                self.operands.push(Node::new_operand(value));
                self.expects_operand = false;
            }
            Token::Function { kind, arguments } => {
                self.expect_operand()?;
                let node = build_function(kind, arguments)?;
                self.operands.push(node);
                self.expects_operand = false;
            }
            Token::Operator(OperatorKind::OpenParenthesis) => {
                self.expect_operand()?;
                self.operators.push(OperatorKind::OpenParenthesis);
            }
            Token::Operator(OperatorKind::CloseParenthesis) => {
                self.parse_closing_parenthesis()?;
                self.expects_operand = false;
            }
            Token::Operator(kind) => {
                if let Some(operator) = kind.as_binary_operator() {
                    if self.expects_operand {
                        return Err(BuildError::InsufficientOperands { operator });
                    }
                }
                self.parse_operator(kind)?;
                self.expects_operand = true;
            }
            Token::Separator => {
                return Err(BuildError::malformed(
                    "argument separator outside of a function call",
                ))
            }
        }
        Ok(())
    }

    fn expect_operand(&self) -> Result<(), BuildError> {
        if self.expects_operand {
            Ok(())
        } else {
            Err(BuildError::malformed(
                "operands are not separated by operators",
            ))
        }
    }

    /// Reduces every operator on the stack that binds at least as tightly as the new one,
    /// which makes operators of equal precedence associate to the left.
    fn parse_operator(&mut self, kind: OperatorKind) -> Result<(), BuildError> {
        if let Some(operator) = kind.as_binary_operator() {
            while let Some(top_of_operator_stack) = self.top_binary_operator() {
                if !top_of_operator_stack.precedence_ge(&operator) {
                    break;
                }
                self.operators.pop();
                self.reduce(top_of_operator_stack)?;
            }
        }
        self.operators.push(kind);
        Ok(())
    }

    fn parse_closing_parenthesis(&mut self) -> Result<(), BuildError> {
        loop {
            match self.operators.pop() {
                None => return Err(BuildError::UnmatchedCloseParen),
                // Discard the open parenthesis.
                Some(OperatorKind::OpenParenthesis) => return Ok(()),
                Some(kind) => self.reduce_kind(kind)?,
            }
        }
    }

    fn finish(mut self) -> Result<Node, BuildError> {
        while let Some(kind) = self.operators.pop() {
            match kind {
                OperatorKind::OpenParenthesis => {
                    return Err(BuildError::malformed("mismatched parenthesis"));
                }
                kind => self.reduce_kind(kind)?,
            }
        }

        let root = self
            .operands
            .pop()
            .ok_or_else(|| BuildError::malformed("no tree root found"))?;
        if !self.operands.is_empty() {
            return Err(BuildError::malformed(
                "operands are not separated by operators",
            ));
        }
        Ok(root)
    }

    fn top_binary_operator(&self) -> Option<BinaryOperator> {
        self.operators
            .last()
            .and_then(OperatorKind::as_binary_operator)
    }

    fn reduce_kind(&mut self, kind: OperatorKind) -> Result<(), BuildError> {
        match kind.as_binary_operator() {
            Some(operator) => self.reduce(operator),
            None => Err(BuildError::malformed("mismatched parenthesis")),
        }
    }

    /// Replaces the two topmost operands with an operation joining them.
    fn reduce(&mut self, operator: BinaryOperator) -> Result<(), BuildError> {
        let right_operand = self
            .operands
            .pop()
            .ok_or(BuildError::InsufficientOperands { operator })?;
        let left_operand = self
            .operands
            .pop()
            .ok_or(BuildError::InsufficientOperands { operator })?;
        self.operands.push(Node::new_binary_operation(
            operator,
            left_operand,
            right_operand,
        ));
        Ok(())
    }
}

/// Builds one child per separator-delimited argument, in the order they were written.
fn build_function(kind: FunctionKind, arguments: Vec<Token>) -> Result<Node, BuildError> {
    let children = if arguments.is_empty() {
        Vec::new()
    } else {
        arguments
            .split(|token| *token == Token::Separator)
            .map(|argument| build(argument.to_vec()))
            .collect::<Result<Vec<Node>, BuildError>>()?
    };
    Ok(Node::new_function(kind, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use parameterized_macro::parameterized;

    fn add(left: Node, right: Node) -> Node {
        Node::new_binary_operation(BinaryOperator::Add, left, right)
    }

    fn subtract(left: Node, right: Node) -> Node {
        Node::new_binary_operation(BinaryOperator::Subtract, left, right)
    }

    fn multiply(left: Node, right: Node) -> Node {
        Node::new_binary_operation(BinaryOperator::Multiply, left, right)
    }

    fn divide(left: Node, right: Node) -> Node {
        Node::new_binary_operation(BinaryOperator::Divide, left, right)
    }

    fn operand(value: f64) -> Node {
        Node::new_operand(value)
    }

    fn build_expression(expression: &str) -> Result<Node, BuildError> {
        build(tokenize(expression).unwrap())
    }

    #[test]
    fn simple_expression_returns_correct_tree() {
        let tokens = vec![
            Token::Operand(1.0),
            Token::Operator(OperatorKind::Add),
            Token::Operand(2.0),
        ];

        let actual_tree = build(tokens).unwrap();

        assert_eq!(actual_tree, add(operand(1.0), operand(2.0)));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 3 + 5 * (2 - 8)
        let expected_tree = add(
            operand(3.0),
            multiply(operand(5.0), subtract(operand(2.0), operand(8.0))),
        );

        let actual_tree = build_expression("3 + 5 * (2 - 8)").unwrap();

        assert_eq!(actual_tree, expected_tree);
    }

    #[test]
    fn equal_precedence_associates_to_the_left() {
        // ((8 - 4) - 2) and ((8 / 4) * 2)
        assert_eq!(
            build_expression("8 - 4 - 2").unwrap(),
            subtract(subtract(operand(8.0), operand(4.0)), operand(2.0))
        );
        assert_eq!(
            build_expression("8 / 4 * 2").unwrap(),
            multiply(divide(operand(8.0), operand(4.0)), operand(2.0))
        );
    }

    #[test]
    fn nested_parenthesis_expression_returns_correct_tree() {
        // a + ((b + c) * d)
        let expected_tree = add(
            operand(1.0),
            multiply(add(operand(2.0), operand(3.0)), operand(4.0)),
        );

        let actual_tree = build_expression("1 + ((2 + 3) * 4)").unwrap();

        assert_eq!(actual_tree, expected_tree);
    }

    #[test]
    fn redundant_parentheses_do_not_change_tree() {
        assert_eq!(
            build_expression("((1)) + (((2)))").unwrap(),
            build_expression("1 + 2").unwrap()
        );
    }

    #[test]
    fn function_arguments_become_children_in_order() {
        let expected_tree = add(
            operand(1.0),
            Node::new_function(
                FunctionKind::Power,
                vec![add(operand(2.0), operand(3.0)), operand(4.0)],
            ),
        );

        let actual_tree = build_expression("1 + pow(2 + 3, 4)").unwrap();

        assert_eq!(actual_tree, expected_tree);
    }

    #[test]
    fn nested_function_calls_return_nested_nodes() {
        let expected_tree = Node::new_function(
            FunctionKind::Sine,
            vec![Node::new_function(FunctionKind::Cosine, vec![operand(0.0)])],
        );

        assert_eq!(build_expression("sin(cos(0))").unwrap(), expected_tree);
    }

    #[test]
    fn function_without_arguments_has_no_children() {
        assert_eq!(
            build_expression("area()").unwrap(),
            Node::new_function(FunctionKind::Area, vec![])
        );
    }

    #[test]
    fn unmatched_closing_parenthesis_returns_err() {
        let error = build_expression("2+3)").unwrap_err();

        assert_eq!(error, BuildError::UnmatchedCloseParen);
    }

    #[test]
    fn unclosed_parenthesis_returns_err() {
        let error = build_expression("(2+3").unwrap_err();

        assert!(matches!(error, BuildError::MalformedExpression { .. }));
    }

    #[parameterized(
    expression = { "2 +", "* 3", "(4 -) 1", "1 + * 2", "* 2 3", "(/ 2)" },
    operator = {
    BinaryOperator::Add,
    BinaryOperator::Multiply,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    }
    )]
    fn missing_operand_returns_err(expression: &str, operator: BinaryOperator) {
        let error = build_expression(expression).unwrap_err();

        assert_eq!(error, BuildError::InsufficientOperands { operator });
    }

    #[parameterized(expression = { "", "()", "2 3", "(1) (2)", "pow(1, )", "sin() 1" })]
    fn expression_not_reducing_to_one_tree_returns_err(expression: &str) {
        let error = build_expression(expression).unwrap_err();

        assert!(
            matches!(error, BuildError::MalformedExpression { .. }),
            "unexpected error {:?}",
            error
        );
    }

    #[parameterized(expression = { "2 3 +", "1 + 2 3 *", "sin(1 2 +)", "(1 + 2) 3", "4 (5)" })]
    fn operand_following_operand_returns_err(expression: &str) {
        let error = build_expression(expression).unwrap_err();

        assert_eq!(
            error,
            BuildError::malformed("operands are not separated by operators")
        );
    }

    #[test]
    fn separator_outside_function_returns_err() {
        let tokens = vec![Token::Operand(1.0), Token::Separator, Token::Operand(2.0)];

        let error = build(tokens).unwrap_err();

        assert!(matches!(error, BuildError::MalformedExpression { .. }));
    }
}
