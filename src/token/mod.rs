//! Tokens produced from text with embedded color escape sequences.
//!
//! The [`tokenizer`] turns raw input into an ordered [`Tokens`] sequence of
//! color changes and text runs. The renderer walks that sequence once.

mod tokenizer;

use crate::color::Rgba;
use crate::text::display_width;

pub use tokenizer::tokenize;

/// The effect carried by a color token.
///
/// Only [`ColorType::Reset`], [`ColorType::Reverse`] and the foreground and
/// background variants change how pixels are painted. The other attributes
/// are recognized so they can be skipped cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    RapidBlink,
    Reverse,
    Hide,
    Strikethrough,
    Foreground(Rgba),
    Background(Rgba),
}

impl ColorType {
    /// Attribute for an SGR parameter in `0..=9`.
    pub fn from_attribute(n: u32) -> Option<Self> {
        let attr = match n {
            0 => Self::Reset,
            1 => Self::Bold,
            2 => Self::Dim,
            3 => Self::Italic,
            4 => Self::Underline,
            5 => Self::Blink,
            6 => Self::RapidBlink,
            7 => Self::Reverse,
            8 => Self::Hide,
            9 => Self::Strikethrough,
            _ => return None,
        };
        Some(attr)
    }
}

/// A single unit of tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Changes the active color state.
    Color(ColorType),
    /// A run of literal text, possibly spanning several lines.
    Text(String),
}

impl Token {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn foreground(color: Rgba) -> Self {
        Self::Color(ColorType::Foreground(color))
    }

    pub fn background(color: Rgba) -> Self {
        Self::Color(ColorType::Background(color))
    }

    pub fn reset() -> Self {
        Self::Color(ColorType::Reset)
    }
}

/// An ordered token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<Token>);

impl Tokens {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a token. Consecutive text runs are merged into one.
    pub fn push(&mut self, token: Token) {
        if let (Some(Token::Text(last)), Token::Text(text)) = (self.0.last_mut(), &token) {
            last.push_str(text);
            return;
        }
        self.0.push(token);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenation of every text run, with color tokens dropped.
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .filter_map(|t| match t {
                Token::Text(s) => Some(s.as_str()),
                Token::Color(_) => None,
            })
            .collect()
    }

    /// The plain text split into display lines.
    pub fn lines(&self) -> Vec<String> {
        self.plain_text().split('\n').map(str::to_string).collect()
    }

    /// Widest line, in terminal cells.
    pub fn max_line_width(&self) -> usize {
        self.plain_text()
            .split('\n')
            .map(display_width)
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(tokens: Vec<Token>) -> Self {
        let mut out = Tokens::new();
        for token in tokens {
            out.push(token);
        }
        out
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
