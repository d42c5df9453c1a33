use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_operand(&mut self, _value: f64) {}
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_function(&mut self, _function: &FunctionKind, arguments: &[Node]) {
        walk_function(self, arguments)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_function(visitor: &mut impl SyntaxVisitor, arguments: &[Node]) {
    arguments.iter().for_each(|node| node.accept(visitor));
}
