//! Route pattern compilation.
//!
//! # Grammar
//! - Literal characters match themselves
//! - `:name` captures one or more characters other than `/`
//!   (name characters: ASCII letters, digits, `_`, `-`, `!`, `@`)
//! - `##` is a comment marker and is stripped before compilation
//!
//! # Design Decisions
//! - Anchored at the start of the location only; a pattern matches any
//!   location it is a prefix of
//! - No regex: captures backtrack the way a greedy `([^/]+)` group would
//! - Compilation never fails; anything the grammar does not recognise is literal

use std::fmt;

/// Marker stripped from patterns before tokenizing.
const COMMENT_MARKER: &str = "##";

/// Rendering of a capture group in the compiled form.
const CAPTURE_SOURCE: &str = "([^/]+)";

/// A single compiled element of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text that must appear verbatim.
    Literal(String),
    /// A named parameter capturing a non-empty run of non-`/` characters.
    Capture(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
    names: Vec<String>,
}

impl Pattern {
    /// Compile a route expression.
    pub fn compile(source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = tokenize(&source.replace(COMMENT_MARKER, ""));
        let names = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Capture(name) => Some(name.clone()),
                Token::Literal(_) => None,
            })
            .collect();

        Self {
            source,
            tokens,
            names,
        }
    }

    /// The route expression as it was registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parameter names in left-to-right order of appearance.
    pub fn param_names(&self) -> &[String] {
        &self.names
    }

    /// True when the pattern has no captures and is a plain prefix test.
    pub fn is_literal(&self) -> bool {
        self.names.is_empty()
    }

    /// Length of the compiled form, used to order routes for dispatch.
    pub fn compiled_len(&self) -> usize {
        self.to_string().chars().count()
    }

    /// Match `location` and return the captured values in parameter order.
    pub fn captures(&self, location: &str) -> Option<Vec<String>> {
        let mut values = Vec::with_capacity(self.names.len());
        if match_tokens(&self.tokens, location, &mut values) {
            Some(values)
        } else {
            None
        }
    }

    pub fn matches(&self, location: &str) -> bool {
        self.captures(location).is_some()
    }
}

/// Renders the compiled form, e.g. `/users/:id` → `^/users/([^/]+)`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("^")?;
        for token in &self.tokens {
            match token {
                Token::Literal(text) => f.write_str(text)?,
                Token::Capture(_) => f.write_str(CAPTURE_SOURCE)?,
            }
        }
        Ok(())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '!' | '@')
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek().is_some_and(|&n| is_name_char(n)) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            let mut name = String::new();
            while let Some(&n) = chars.peek() {
                if !is_name_char(n) {
                    break;
                }
                name.push(n);
                chars.next();
            }
            tokens.push(Token::Capture(name));
        } else {
            literal.push(c);
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn match_tokens(tokens: &[Token], input: &str, values: &mut Vec<String>) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return true;
    };

    match first {
        Token::Literal(text) => match input.strip_prefix(text.as_str()) {
            Some(remaining) => match_tokens(rest, remaining, values),
            None => false,
        },
        Token::Capture(_) => {
            let run = input.find('/').unwrap_or(input.len());
            let ends: Vec<usize> = input[..run]
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect();

            // Longest capture first, then give characters back.
            for &end in ends.iter().rev() {
                values.push(input[..end].to_string());
                if match_tokens(rest, &input[end..], values) {
                    return true;
                }
                values.pop();
            }
            false
        }
    }
}
