//! Variable interpolation for a single line of text.
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the value of `NAME`
//! - `$NAME` - same, where `NAME` matches `[A-Za-z_][A-Za-z0-9_]*`
//! - `$$` - a literal `$`
//! - `${NAME-word}`, `${NAME:-word}` - `word` when `NAME` is empty (`:-` only)
//! - `${NAME+word}`, `${NAME:+word}` - `word` when `NAME` is set (non-empty
//!   for `:+`), otherwise empty
//!
//! Any other `$` (e.g. the positional parameter in `WHERE id = $1`) is kept
//! as-is. `NAME` must always be bound, even in the operator forms: a default
//! never stands in for a missing variable. `word` is itself interpolated,
//! and only when it is used.

use thiserror::Error;

use super::env::Environment;

/// Why a line could not be interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// The referenced variable has no binding.
    #[error("{0} not set in environment")]
    Unbound(String),

    /// The reference itself is malformed.
    #[error("{0}")]
    Syntax(String),
}

/// Operator of a `${NAME<op>word}` expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `-`: the value of `NAME`
    Default,
    /// `:-`: `word` if `NAME` is empty
    DefaultIfEmpty,
    /// `+`: `word`
    Alternate,
    /// `:+`: `word` if `NAME` is non-empty, else empty
    AlternateIfNonEmpty,
}

impl Operator {
    /// Split a leading operator off `rest`.
    fn strip(rest: &str) -> Option<(Self, &str)> {
        [
            (":-", Self::DefaultIfEmpty),
            (":+", Self::AlternateIfNonEmpty),
            ("-", Self::Default),
            ("+", Self::Alternate),
        ]
        .into_iter()
        .find_map(|(token, op)| rest.strip_prefix(token).map(|word| (op, word)))
    }

    fn apply(
        self,
        value: String,
        word: &str,
        env: &dyn Environment,
    ) -> Result<String, InterpolationError> {
        match self {
            Self::Default => Ok(value),
            Self::DefaultIfEmpty if value.is_empty() => interpolate(word, env),
            Self::DefaultIfEmpty => Ok(value),
            Self::Alternate => interpolate(word, env),
            Self::AlternateIfNonEmpty if value.is_empty() => Ok(String::new()),
            Self::AlternateIfNonEmpty => interpolate(word, env),
        }
    }
}

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name} or $name
    Variable(String),
    /// Operator expansion: ${name:-word} and friends
    Expansion {
        name: String,
        operator: Operator,
        word: String,
    },
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse the text between `${` and `}`.
fn parse_braced(body: &str) -> Result<Segment, InterpolationError> {
    if body.is_empty() {
        return Err(InterpolationError::Syntax(
            "empty variable name in '${}'".to_string(),
        ));
    }

    let name_len = match body.chars().next() {
        Some(c) if is_name_start(c) => body.find(|c: char| !is_name_char(c)).unwrap_or(body.len()),
        _ => 0,
    };
    let (name, rest) = body.split_at(name_len);

    if name.is_empty() {
        return Err(InterpolationError::Syntax(format!(
            "invalid variable name '{}'",
            body
        )));
    }
    if rest.is_empty() {
        return Ok(Segment::Variable(name.to_string()));
    }

    match Operator::strip(rest) {
        Some((operator, word)) => Ok(Segment::Expansion {
            name: name.to_string(),
            operator,
            word: word.to_string(),
        }),
        None => Err(InterpolationError::Syntax(format!(
            "unsupported expansion '${{{}}}'",
            body
        ))),
    }
}

/// Parse a line into literal and variable segments.
///
/// # Errors
///
/// Returns [`InterpolationError::Syntax`] for `${` without a closing brace,
/// `${}`, a braced name not starting with `[A-Za-z_]`, or a braced name
/// followed by anything other than `-`, `:-`, `+` or `:+`.
pub fn parse_interpolation(input: &str) -> Result<Vec<Segment>, InterpolationError> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                current_literal.push('$');
            }
            Some('{') => {
                chars.next();

                let mut body = String::new();
                let mut depth = 0usize;
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        '}' if depth == 0 => {
                            closed = true;
                            break;
                        }
                        '}' => depth -= 1,
                        '{' => depth += 1,
                        _ => {}
                    }
                    body.push(c);
                }

                if !closed {
                    return Err(InterpolationError::Syntax(format!(
                        "unterminated variable reference '${{{}'",
                        body
                    )));
                }
                let segment = parse_braced(&body)?;

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                segments.push(segment);
            }
            Some(&next) if is_name_start(next) => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                segments.push(Segment::Variable(name));
            }
            _ => current_literal.push('$'),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Substitute every variable reference in `line` from `env`.
///
/// # Errors
///
/// Fails on the first malformed reference or unbound variable. Nothing is
/// substituted with an empty string.
pub fn interpolate(line: &str, env: &dyn Environment) -> Result<String, InterpolationError> {
    let segments = parse_interpolation(line)?;
    let mut result = String::with_capacity(line.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value = env
                    .lookup(&name)
                    .ok_or(InterpolationError::Unbound(name))?;
                result.push_str(&value);
            }
            Segment::Expansion {
                name,
                operator,
                word,
            } => {
                let value = env
                    .lookup(&name)
                    .ok_or(InterpolationError::Unbound(name))?;
                result.push_str(&operator.apply(value, &word, env)?);
            }
        }
    }

    Ok(result)
}
