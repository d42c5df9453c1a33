use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_function, SyntaxVisitor,
};
use crate::interpreter::token::{OperatorKind, Token};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A node of an expression tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Operand(f64),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    Function {
        function: FunctionKind,
        arguments: Vec<Node>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum OperandSide {
    Left,
    Right,
}

impl Node {
    pub fn new_operand(value: f64) -> Node {
        Node::Operand(value)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_function(function: FunctionKind, arguments: Vec<Node>) -> Node {
        Node::Function {
            function,
            arguments,
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::Operand(_) | Node::Function { .. } => None,
        }
    }

    /// The number of nodes in the tree rooted at this node, including itself.
    pub fn node_count(&self) -> usize {
        let mut visitor = NodeCountVisitor { count: 0 };
        self.accept(&mut visitor);
        visitor.count
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Operand(value) => visitor.visit_operand(*value),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::Function {
                function,
                arguments,
            } => visitor.visit_function(function, arguments),
        }
    }

    /// Regenerates infix tokens from the tree, only inserting the parentheses
    /// needed to keep the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// use expression_evaluator::interpreter::{convert, tokens_to_string};
    ///
    /// let tree = convert("((2 * 3)) - (4 - 1)")?;
    /// let regenerated_tokens = tree.to_infix();
    ///
    /// assert_eq!(tokens_to_string(regenerated_tokens)?, "2 * 3 - (4 - 1)");
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        tokens
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::Operand(value) => tokens.push(Token::Operand(*value)),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                parenthesize_if(
                    tokens,
                    left_operand.needs_parentheses(operator, OperandSide::Left),
                    |tokens| left_operand.build_expression(tokens),
                );
                tokens.push(operator.token());
                parenthesize_if(
                    tokens,
                    right_operand.needs_parentheses(operator, OperandSide::Right),
                    |tokens| right_operand.build_expression(tokens),
                );
            }
            Node::Function {
                function,
                arguments,
            } => {
                let built_arguments = arguments.iter().map(Node::to_infix);
                // Have to use fully qualified syntax here until 'intersperse' is added into stdlib
                let argument_tokens =
                    itertools::Itertools::intersperse(built_arguments, vec![Token::Separator])
                        .flatten()
                        .collect();
                tokens.push(Token::Function {
                    kind: *function,
                    arguments: argument_tokens,
                });
            }
        }
    }

    /// A child operation binding weaker than its parent needs parentheses. So does a right
    /// operand of equal precedence, since operators of equal precedence associate to the left.
    fn needs_parentheses(&self, parent_operator: &BinaryOperator, side: OperandSide) -> bool {
        match self.as_binary_operator() {
            Some(operator) => {
                operator.precedence_lt(parent_operator)
                    || (side == OperandSide::Right && operator.precedence_eq(parent_operator))
            }
            None => false,
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: bool,
    build_interior: impl FnOnce(&mut Vec<Token>),
) {
    if predicate {
        tokens.push(Token::Operator(OperatorKind::OpenParenthesis));
    }

    build_interior(tokens);

    if predicate {
        tokens.push(Token::Operator(OperatorKind::CloseParenthesis));
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_operand(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_function(&mut self, function: &FunctionKind, arguments: &[Node]) {
        self.builder.begin_child(format!("{}", function));
        walk_function(self, arguments);
        self.builder.end_child();
    }
}

struct NodeCountVisitor {
    count: usize,
}

impl SyntaxVisitor for NodeCountVisitor {
    fn visit_operand(&mut self, _value: f64) {
        self.count += 1;
    }
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.count += 1;
        walk_binary_operation(self, left_operand, right_operand);
    }
    fn visit_function(&mut self, _function: &FunctionKind, arguments: &[Node]) {
        self.count += 1;
        walk_function(self, arguments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        print!("{}", tree);
    }

    #[test]
    fn printed_tree_contains_every_node() {
        let printed = create_complex_tree().to_string();

        assert!(printed.starts_with("expression"));
        for label in ["+", "*", "sqrt", "1", "2", "3", "4"] {
            assert!(printed.contains(label), "missing '{}' in {}", label, printed);
        }
    }

    #[test]
    fn node_count_includes_every_node() {
        assert_eq!(create_complex_tree().node_count(), 8);
        assert_eq!(Node::new_operand(1.0).node_count(), 1);
    }

    #[test]
    fn simple_tree_converts_back_to_simple_expression() {
        let tree = Node::new_binary_operation(
            BinaryOperator::Add,
            Node::new_operand(1.0),
            Node::new_operand(2.0),
        );

        let actual_tokens = tree.to_infix();

        assert_eq!(
            actual_tokens,
            vec![
                Token::Operand(1.0),
                Token::Operator(OperatorKind::Add),
                Token::Operand(2.0),
            ]
        );
    }

    #[test]
    fn complex_tree_converts_back_to_complex_expression() {
        let expected_tokens = vec![
            Token::Operand(1.0),
            Token::Operator(OperatorKind::Add),
            Token::Operator(OperatorKind::OpenParenthesis),
            Token::Operand(2.0),
            Token::Operator(OperatorKind::Subtract),
            Token::Operand(3.0),
            Token::Operator(OperatorKind::CloseParenthesis),
            Token::Operator(OperatorKind::Multiply),
            Token::Function {
                kind: FunctionKind::PositiveSquareRoot,
                arguments: vec![Token::Operand(4.0)],
            },
        ];
        let tree = create_complex_tree();

        let actual_tokens = tree.to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn right_operand_of_equal_precedence_is_parenthesized() {
        // 8 - (4 - 2)
        let tree = Node::new_binary_operation(
            BinaryOperator::Subtract,
            Node::new_operand(8.0),
            Node::new_binary_operation(
                BinaryOperator::Subtract,
                Node::new_operand(4.0),
                Node::new_operand(2.0),
            ),
        );

        let tokens = tree.to_infix();

        assert_eq!(tokens[2], Token::Operator(OperatorKind::OpenParenthesis));
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn function_arguments_are_separated() {
        let tree = Node::new_function(
            FunctionKind::Power,
            vec![Node::new_operand(2.0), Node::new_operand(3.0)],
        );

        assert_eq!(
            tree.to_infix(),
            vec![Token::Function {
                kind: FunctionKind::Power,
                arguments: vec![Token::Operand(2.0), Token::Separator, Token::Operand(3.0)],
            }]
        );
    }

    fn create_complex_tree() -> Node {
        // 1 + (2 - 3) * sqrt(4)
        let difference = Node::new_binary_operation(
            BinaryOperator::Subtract,
            Node::new_operand(2.0),
            Node::new_operand(3.0),
        );
        let root = Node::new_function(FunctionKind::PositiveSquareRoot, vec![Node::new_operand(4.0)]);
        let product = Node::new_binary_operation(BinaryOperator::Multiply, difference, root);
        Node::new_binary_operation(BinaryOperator::Add, Node::new_operand(1.0), product)
    }
}
