use crate::interpreter::error::TokenizeError;
use crate::interpreter::operator::FunctionKind;
use crate::interpreter::token::{OperatorKind, Token, SYMBOLS};
use log::trace;

/// Splits the given infix expression into tokens.
///
/// Whitespace separates tokens, as do the symbols `+ - * / ( ) ,`. Every other run of
/// characters is either a function name, which must be followed by its parenthesized
/// arguments, or a decimal literal. A `+` or `-` where an operand is expected is read
/// as the sign of the following literal.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The tokens of the expression, with the arguments of each function call
/// nested inside its token.
///
/// # Examples
///
/// ```
/// use expression_evaluator::interpreter::lexer::tokenize;
/// use expression_evaluator::interpreter::operator::FunctionKind;
/// use expression_evaluator::interpreter::token::{OperatorKind, Token};
///
/// let tokens = tokenize("2 * sqrt(9)").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Operand(2.0),
///         Token::Operator(OperatorKind::Multiply),
///         Token::Function {
///             kind: FunctionKind::PositiveSquareRoot,
///             arguments: vec![Token::Operand(9.0)],
///         },
///     ]
/// );
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut lexer = Lexer::default();
    for (position, character) in expression.char_indices() {
        lexer.read(character, position)?;
    }
    let tokens = lexer.finish()?;
    trace!("tokenized '{}' into {:?}", expression, tokens);
    Ok(tokens)
}

/// Parses a locale-independent decimal literal: an optional sign, digits and at most one
/// decimal point. Returns `None` for anything else, including exponents, `inf`/`NaN` and
/// literals too long to be finite.
pub(crate) fn parse_literal(text: &str) -> Option<f64> {
    let unsigned = text
        .strip_prefix(|character: char| character == '+' || character == '-')
        .unwrap_or(text);

    let mut seen_decimal_point = false;
    let mut digits = 0;
    for character in unsigned.chars() {
        match character {
            '0'..='9' => digits += 1,
            '.' if !seen_decimal_point => seen_decimal_point = true,
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }

    text.parse().ok().filter(|value: &f64| value.is_finite())
}

/// A function whose name has been read but whose `(` has not.
struct PendingFunction {
    kind: FunctionKind,
    name: String,
    position: usize,
}

/// The argument list of a function call that is still being read.
struct ArgumentList {
    function: PendingFunction,
    arguments: Vec<Token>,
    /// Parentheses opened inside the argument list and not yet closed.
    depth: usize,
}

/// State of a single `tokenize` call.
struct Lexer {
    tokens: Vec<Token>,
    literal: String,
    literal_position: usize,
    pending_function: Option<PendingFunction>,
    open_calls: Vec<ArgumentList>,
    expects_operand: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer {
            tokens: Vec::new(),
            literal: String::new(),
            literal_position: 0,
            pending_function: None,
            open_calls: Vec::new(),
            expects_operand: true,
        }
    }
}

impl Lexer {
    fn read(&mut self, character: char, position: usize) -> Result<(), TokenizeError> {
        if character.is_whitespace() {
            return self.flush_literal();
        }

        if let Some(function) = self.pending_function.take() {
            return self.open_call(function, character, position);
        }

        if SYMBOLS.contains(&character) {
            self.flush_literal()?;
            match self.pending_function.take() {
                Some(function) => self.open_call(function, character, position),
                None => self.read_symbol(character, position),
            }
        } else {
            if self.literal.is_empty() {
                self.literal_position = position;
            }
            self.literal.push(character);
            Ok(())
        }
    }

    fn read_symbol(&mut self, symbol: char, position: usize) -> Result<(), TokenizeError> {
        if symbol == ',' {
            let separates_arguments =
                matches!(self.open_calls.last(), Some(call) if call.depth == 0);
            if !separates_arguments {
                return Err(TokenizeError::UnexpectedSeparator { position });
            }
            self.emit(Token::Separator);
            return Ok(());
        }

        let kind = match OperatorKind::from_symbol(symbol) {
            Some(kind) => kind,
            None => return Ok(()),
        };
        match kind {
            OperatorKind::Add | OperatorKind::Subtract if self.expects_operand => {
                self.literal_position = position;
                self.literal.push(symbol);
            }
            OperatorKind::OpenParenthesis => {
                if let Some(call) = self.open_calls.last_mut() {
                    call.depth += 1;
                }
                self.emit(Token::Operator(kind));
            }
            OperatorKind::CloseParenthesis => {
                let closes_call = match self.open_calls.last_mut() {
                    Some(call) if call.depth > 0 => {
                        call.depth -= 1;
                        false
                    }
                    Some(_) => true,
                    None => false,
                };
                if closes_call {
                    self.close_call();
                } else {
                    self.emit(Token::Operator(kind));
                }
            }
            _ => self.emit(Token::Operator(kind)),
        }
        Ok(())
    }

    fn open_call(
        &mut self,
        function: PendingFunction,
        character: char,
        position: usize,
    ) -> Result<(), TokenizeError> {
        if character != '(' {
            return Err(TokenizeError::ExpectedArguments {
                name: function.name,
                position,
            });
        }
        self.open_calls.push(ArgumentList {
            function,
            arguments: Vec::new(),
            depth: 0,
        });
        self.expects_operand = true;
        Ok(())
    }

    fn close_call(&mut self) {
        if let Some(call) = self.open_calls.pop() {
            self.emit(Token::Function {
                kind: call.function.kind,
                arguments: call.arguments,
            });
        }
    }

    /// Classifies the buffered characters as a function name or a literal.
    fn flush_literal(&mut self) -> Result<(), TokenizeError> {
        if self.literal.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.literal);
        let position = self.literal_position;

        if let Some(kind) = FunctionKind::from_name(&text) {
            self.pending_function = Some(PendingFunction {
                kind,
                name: text,
                position,
            });
            return Ok(());
        }

        match parse_literal(&text) {
            Some(value) => {
                self.emit(Token::Operand(value));
                Ok(())
            }
            None => Err(classify_bad_literal(text, position)),
        }
    }

    fn emit(&mut self, token: Token) {
        self.expects_operand =
            !(token.is_operand() || token == Token::Operator(OperatorKind::CloseParenthesis));
        match self.open_calls.last_mut() {
            Some(call) => call.arguments.push(token),
            None => self.tokens.push(token),
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, TokenizeError> {
        self.flush_literal()?;
        if let Some(function) = self.pending_function {
            return Err(TokenizeError::UnknownFunction {
                name: function.name,
                position: function.position,
            });
        }
        if let Some(call) = self.open_calls.pop() {
            return Err(TokenizeError::UnterminatedArguments {
                name: call.function.name,
                position: call.function.position,
            });
        }
        Ok(self.tokens)
    }
}

/// Text starting with a letter was meant as a name, anything else as a number.
fn classify_bad_literal(text: String, position: usize) -> TokenizeError {
    let looks_like_name = text
        .trim_start_matches(|character: char| character == '+' || character == '-')
        .starts_with(char::is_alphabetic);
    if looks_like_name {
        TokenizeError::UnknownFunction {
            name: text,
            position,
        }
    } else {
        TokenizeError::MalformedOperand {
            text,
            position,
        }
    }
}
