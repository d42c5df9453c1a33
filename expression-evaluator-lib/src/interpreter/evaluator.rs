use crate::interpreter::error::EvalError;
use crate::interpreter::operator::{BinaryOperator, FunctionKind};
use crate::interpreter::syntax::expression_tree::Node;
use num_traits::Float;

/// Evaluates the given expression tree using double precision.
///
/// # Arguments
///
/// * `node`: The root of the tree to evaluate.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_evaluator::interpreter::convert;
/// use expression_evaluator::interpreter::evaluator::evaluate;
///
/// let tree = convert("2*(3+4)+5")?;
/// assert_eq!(evaluate(&tree)?, 19.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(node: &Node) -> Result<f64, EvalError> {
    evaluate_as::<f64>(node)
}

/// Evaluates the given expression tree in any floating point type.
///
/// Divisors smaller in magnitude than the type's epsilon count as zero. `sqrt` of a
/// negative number, `ln` of a non-positive number and `pow` without a real result are
/// domain errors rather than NaN.
pub fn evaluate_as<T: Float>(node: &Node) -> Result<T, EvalError> {
    match node {
        // Float casts saturate to infinity rather than failing.
        Node::Operand(value) => T::from(*value)
            .filter(|cast| cast.is_finite() || !value.is_finite())
            .ok_or(EvalError::UnrepresentableOperand { value: *value }),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate_as::<T>(left_operand)?;
            let right = evaluate_as::<T>(right_operand)?;
            evaluate_binary_operation(*operator, left, right)
        }
        Node::Function {
            function,
            arguments,
        } => {
            let values = arguments
                .iter()
                .map(evaluate_as::<T>)
                .collect::<Result<Vec<T>, EvalError>>()?;
            evaluate_function(*function, &values)
        }
    }
}

fn evaluate_binary_operation<T: Float>(
    operator: BinaryOperator,
    left: T,
    right: T,
) -> Result<T, EvalError> {
    match operator {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Subtract => Ok(left - right),
        BinaryOperator::Multiply => Ok(left * right),
        BinaryOperator::Divide => {
            if right.abs() < T::epsilon() {
                return Err(EvalError::DivisionByZero);
            }
            Ok(left / right)
        }
    }
}

fn evaluate_function<T: Float>(function: FunctionKind, arguments: &[T]) -> Result<T, EvalError> {
    let unsupported = || EvalError::UnsupportedFunction {
        function,
        arguments: arguments.len(),
    };
    if function.arity() != Some(arguments.len()) {
        return Err(unsupported());
    }

    match (function, arguments) {
        (FunctionKind::Sine, [x]) => Ok(x.sin()),
        (FunctionKind::Cosine, [x]) => Ok(x.cos()),
        (FunctionKind::Tangent, [x]) => Ok(x.tan()),
        (FunctionKind::AbsoluteValue, [x]) => Ok(x.abs()),
        (FunctionKind::PositiveSquareRoot, [x]) => {
            if *x < T::zero() {
                return Err(domain_error(function, *x));
            }
            Ok(x.sqrt())
        }
        (FunctionKind::NaturalLogarithm, [x]) => {
            if *x <= T::zero() {
                return Err(domain_error(function, *x));
            }
            Ok(x.ln())
        }
        (FunctionKind::Power, [base, exponent]) => {
            let value = base.powf(*exponent);
            if value.is_nan() {
                return Err(domain_error(function, *base));
            }
            Ok(value)
        }
        _ => Err(unsupported()),
    }
}

fn domain_error<T: Float>(function: FunctionKind, argument: T) -> EvalError {
    EvalError::Domain {
        function,
        argument: argument.to_f64().unwrap_or(f64::NAN),
    }
}
