//! Annotation classifier.
//!
//! Turns textual type annotations like `Option<Vec<int>>` or
//! `Literal["json", "yaml"]` into [`TypeDescriptor`] trees. The grammar is
//! small enough for a hand-rolled tokenizer and a recursive-descent parser;
//! nesting is bounded by [`MAX_NESTING_DEPTH`] so untrusted annotation text
//! cannot recurse without limit.

use tracing::debug;

use crate::descriptor::{ChoiceSet, ContainerKind, ScalarKind, TypeDescriptor};
use crate::error::{Result, SpecError};

/// Maximum nesting depth accepted by [`classify`].
///
/// The grammar itself only permits shallow shapes (`Option` around a
/// collection around a scalar is the practical maximum), so the limit
/// exists to fail loudly on pathological input rather than to constrain
/// real specifications.
pub const MAX_NESTING_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Literal(String),
    Lt,
    Gt,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    DotDot,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("'{name}'"),
            Token::Literal(value) => format!("\"{value}\""),
            Token::Lt => "'<'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::DotDot => "'..'".to_string(),
        }
    }
}

/// Classifies a textual type annotation into a [`TypeDescriptor`].
///
/// # Errors
///
/// Returns [`SpecError::UnrecognizedType`] for text outside the grammar,
/// [`SpecError::NestingTooDeep`] past [`MAX_NESTING_DEPTH`] levels,
/// [`SpecError::MixedChoiceKind`] when literal options mix strings and
/// booleans, and [`SpecError::EmptyChoice`] for `Literal[]`.
///
/// # Examples
///
/// ```
/// use param_schema_core::{classify, ContainerKind, ScalarKind, TypeDescriptor};
///
/// let d = classify("Vec<int>").unwrap();
/// assert_eq!(
///     d,
///     TypeDescriptor::Collection {
///         container: ContainerKind::List,
///         inner: Box::new(TypeDescriptor::Scalar(ScalarKind::Int)),
///     }
/// );
///
/// assert!(classify("Option<Option<str>>").is_err());
/// ```
pub fn classify(annotation: &str) -> Result<TypeDescriptor> {
    let tokens = tokenize(annotation)?;
    let mut parser = Parser {
        annotation,
        tokens,
        pos: 0,
    };
    let descriptor = parser.parse_type(0)?;
    if let Some(extra) = parser.peek() {
        return Err(unrecognized(
            annotation,
            format!("trailing {} after complete type", extra.describe()),
        ));
    }
    debug!(annotation, descriptor = %descriptor, "classified annotation");
    Ok(descriptor)
}

fn unrecognized(annotation: &str, detail: impl Into<String>) -> SpecError {
    SpecError::UnrecognizedType {
        annotation: annotation.to_string(),
        detail: detail.into(),
    }
}

fn tokenize(annotation: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = annotation.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '<' => tokens.push(Token::Lt),
            '>' => tokens.push(Token::Gt),
            '[' => tokens.push(Token::LBracket),
            ']' => tokens.push(Token::RBracket),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            '.' => {
                if chars.next_if_eq(&'.').is_some() {
                    tokens.push(Token::DotDot);
                } else {
                    return Err(unrecognized(annotation, "stray '.'"));
                }
            }
            '"' => {
                let mut value = String::new();
                loop {
                    let Some(c) = chars.next() else {
                        return Err(unrecognized(annotation, "unterminated string literal"));
                    };
                    match c {
                        '"' => break,
                        '\\' => {
                            let Some(escaped) = chars.next() else {
                                return Err(unrecognized(annotation, "unterminated string literal"));
                            };
                            value.push(escaped);
                        }
                        other => value.push(other),
                    }
                }
                tokens.push(Token::Literal(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_alphanumeric() && next != '_' {
                        break;
                    }
                    ident.push(next);
                    chars.next();
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(unrecognized(
                    annotation,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    annotation: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, wanted: Token, context: &str) -> Result<()> {
        match self.advance() {
            Some(token) if token == wanted => Ok(()),
            Some(token) => Err(unrecognized(
                self.annotation,
                format!("expected {} {context}, found {}", wanted.describe(), token.describe()),
            )),
            None => Err(unrecognized(
                self.annotation,
                format!("expected {} {context}, found end of annotation", wanted.describe()),
            )),
        }
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeDescriptor> {
        if depth > MAX_NESTING_DEPTH {
            return Err(SpecError::NestingTooDeep {
                annotation: self.annotation.to_string(),
                limit: MAX_NESTING_DEPTH,
            });
        }

        match self.advance() {
            Some(Token::Ident(name)) => match name.as_str() {
                "str" => Ok(TypeDescriptor::Scalar(ScalarKind::Str)),
                "int" => Ok(TypeDescriptor::Scalar(ScalarKind::Int)),
                "float" => Ok(TypeDescriptor::Scalar(ScalarKind::Float)),
                "bool" => Ok(TypeDescriptor::Scalar(ScalarKind::Bool)),
                "Option" => self.parse_optional(depth),
                "Vec" => self.parse_collection(ContainerKind::List, depth),
                "Set" => self.parse_collection(ContainerKind::Set, depth),
                "Literal" => self.parse_choice(),
                other => Err(unrecognized(
                    self.annotation,
                    format!("unknown type name '{other}'"),
                )),
            },
            Some(Token::LParen) => self.parse_tuple(depth),
            Some(token) => Err(unrecognized(
                self.annotation,
                format!("expected a type, found {}", token.describe()),
            )),
            None => Err(unrecognized(self.annotation, "expected a type")),
        }
    }

    fn parse_optional(&mut self, depth: usize) -> Result<TypeDescriptor> {
        self.expect(Token::Lt, "after 'Option'")?;
        let inner = self.parse_type(depth + 1)?;
        self.expect(Token::Gt, "to close 'Option'")?;
        if inner.is_optional() {
            return Err(unrecognized(
                self.annotation,
                "'Option' cannot nest inside 'Option'",
            ));
        }
        Ok(TypeDescriptor::Optional(Box::new(inner)))
    }

    fn parse_collection(&mut self, container: ContainerKind, depth: usize) -> Result<TypeDescriptor> {
        self.expect(Token::Lt, &format!("after '{}'", container.name()))?;
        let inner = self.parse_type(depth + 1)?;
        self.expect(Token::Gt, &format!("to close '{}'", container.name()))?;
        if !is_element_type(&inner) {
            return Err(unrecognized(
                self.annotation,
                "collection elements must be scalar or literal types",
            ));
        }
        Ok(TypeDescriptor::Collection {
            container,
            inner: Box::new(inner),
        })
    }

    fn parse_choice(&mut self) -> Result<TypeDescriptor> {
        self.expect(Token::LBracket, "after 'Literal'")?;

        let mut strings: Vec<String> = Vec::new();
        let mut booleans: Vec<bool> = Vec::new();

        loop {
            match self.advance() {
                Some(Token::RBracket) => break,
                Some(Token::Literal(value)) => strings.push(value),
                Some(Token::Ident(word)) if word == "true" => booleans.push(true),
                Some(Token::Ident(word)) if word == "false" => booleans.push(false),
                Some(token) => {
                    return Err(unrecognized(
                        self.annotation,
                        format!(
                            "literal options must be quoted strings or booleans, found {}",
                            token.describe()
                        ),
                    ));
                }
                None => {
                    return Err(unrecognized(
                        self.annotation,
                        "expected ']' to close 'Literal', found end of annotation",
                    ));
                }
            }

            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RBracket) => break,
                Some(token) => {
                    return Err(unrecognized(
                        self.annotation,
                        format!("expected ',' or ']' in literal options, found {}", token.describe()),
                    ));
                }
                None => {
                    return Err(unrecognized(
                        self.annotation,
                        "expected ']' to close 'Literal', found end of annotation",
                    ));
                }
            }
        }

        match (strings.is_empty(), booleans.is_empty()) {
            (true, true) => Err(SpecError::EmptyChoice {
                annotation: self.annotation.to_string(),
            }),
            (false, false) => Err(SpecError::MixedChoiceKind {
                annotation: self.annotation.to_string(),
            }),
            (false, true) => Ok(TypeDescriptor::Choice(ChoiceSet::Str(strings))),
            (true, false) => Ok(TypeDescriptor::Choice(ChoiceSet::Bool(booleans))),
        }
    }

    fn parse_tuple(&mut self, depth: usize) -> Result<TypeDescriptor> {
        let first = self.parse_type(depth + 1)?;
        if !is_element_type(&first) {
            return Err(unrecognized(
                self.annotation,
                "tuple elements must be scalar or literal types",
            ));
        }
        self.expect(Token::Comma, "after the first tuple element")?;

        if self.peek() == Some(&Token::DotDot) {
            self.advance();
            self.expect(Token::RParen, "to close the tuple")?;
            return Ok(TypeDescriptor::VariableTuple(Box::new(first)));
        }

        let mut elements = vec![first];
        loop {
            let element = self.parse_type(depth + 1)?;
            if !is_element_type(&element) {
                return Err(unrecognized(
                    self.annotation,
                    "tuple elements must be scalar or literal types",
                ));
            }
            elements.push(element);

            match self.advance() {
                Some(Token::RParen) => break,
                Some(Token::Comma) => {
                    if self.peek() == Some(&Token::RParen) {
                        self.advance();
                        break;
                    }
                }
                Some(token) => {
                    return Err(unrecognized(
                        self.annotation,
                        format!("expected ',' or ')' in tuple, found {}", token.describe()),
                    ));
                }
                None => {
                    return Err(unrecognized(
                        self.annotation,
                        "expected ')' to close the tuple, found end of annotation",
                    ));
                }
            }
        }

        Ok(TypeDescriptor::FixedTuple(elements))
    }
}

/// Whether a descriptor may appear inside a collection or tuple.
fn is_element_type(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::Scalar(_) | TypeDescriptor::Choice(_)
    )
}
