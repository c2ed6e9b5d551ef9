//! Lexer implementation.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Comma,
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    Name,
    Number,
    Eof,
}

impl TokenKind {
    /// The punctuator table, character to kind.
    pub fn from_punct(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            ',' => Some(Self::Comma),
            '=' => Some(Self::Assign),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Asterisk),
            '/' => Some(Self::Slash),
            '^' => Some(Self::Caret),
            _ => None,
        }
    }

    /// The punctuator table, kind to character.
    pub fn punct_char(self) -> Option<char> {
        match self {
            Self::LeftParen => Some('('),
            Self::RightParen => Some(')'),
            Self::Comma => Some(','),
            Self::Assign => Some('='),
            Self::Plus => Some('+'),
            Self::Minus => Some('-'),
            Self::Asterisk => Some('*'),
            Self::Slash => Some('/'),
            Self::Caret => Some('^'),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("a name"),
            Self::Number => f.write_str("a number"),
            Self::Eof => f.write_str("end of input"),
            kind => {
                // Every remaining kind is a punctuator.
                let c = kind.punct_char().unwrap_or('?');
                write!(f, "`{}`", c)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unrecognized character {ch:?} at byte {at}")]
    Unrecognized { ch: char, at: usize },
}

/// Turns equation text into a lazy token stream.
///
/// The lexer owns nothing but a scan cursor; `next` returns `Eof`
/// tokens forever once the input is exhausted.
#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn next(&mut self) -> Result<Token<'src>, LexError> {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_whitespace() {
                self.pos += 1;
                continue;
            }

            if let Some(kind) = TokenKind::from_punct(c) {
                let start = self.pos;
                self.pos += 1;
                return Ok(Token {
                    kind,
                    text: &self.src[start..self.pos],
                });
            }

            if c.is_ascii_alphabetic() {
                return Ok(self.scan_name());
            }

            if c.is_ascii_digit() || c == '.' {
                // A lone `.` does not start a number.
                if c == '.' && !self.peek_char_at(1).is_some_and(|d| d.is_ascii_digit()) {
                    return Err(LexError::Unrecognized { ch: c, at: self.pos });
                }
                return Ok(self.scan_number());
            }

            return Err(LexError::Unrecognized { ch: c, at: self.pos });
        }

        Ok(Token {
            kind: TokenKind::Eof,
            text: "",
        })
    }

    /// Maximal run of letters and digits, first character a letter.
    fn scan_name(&mut self) -> Token<'src> {
        let start = self.pos;
        self.pos += 1;
        while self.peek_char().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Name,
            text: &self.src[start..self.pos],
        }
    }

    /// Maximal digit run with at most one `.` inside it.
    fn scan_number(&mut self) -> Token<'src> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Number,
            text: &self.src[start..self.pos],
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }
}
