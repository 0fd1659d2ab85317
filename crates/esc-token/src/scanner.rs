//! A compact ECMAScript 5.1 character scanner.
//!
//! A minimal, correct-enough scanner so the rest of the pipeline (IR
//! construction, lexical context, type lattice) has real tokens to
//! work with end to end, rather than a subject of its own.

use crate::kind::TokenKind;
use crate::token::Token;
use esc_common::Diagnostic;
use esc_common::diagnostics::DiagnosticCategory;
use esc_common::Span;

pub struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: u32,
    file: String,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, file: impl Into<String>) -> Self {
        Scanner { text, bytes: text.as_bytes(), pos: 0, file: file.into() }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos as usize).copied()
    }

    fn peek_at(&self, offset: u32) -> Option<u8> {
        self.bytes.get((self.pos + offset) as usize).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.pos += 1;
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.pos += 2;
                    while self.peek().is_some() && !(self.peek() == Some(b'*') && self.peek_at(1) == Some(b'/')) {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.bytes.len() as u32);
                }
                _ => break,
            }
        }
    }

    /// Scan the next token, returning `Err` for an unrecognized
    /// character.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        self.skip_trivia();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, start, 0));
        };

        if c.is_ascii_digit() {
            return Ok(self.scan_number(start));
        }
        if c == b'"' || c == b'\'' {
            return self.scan_string(start, c);
        }
        if is_ident_start(c) {
            return Ok(self.scan_identifier_or_keyword(start));
        }
        self.scan_punctuator(start).ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCategory::ParserError,
                "unrecognized.character",
                self.file.clone(),
                Span::at(start),
                format!("unrecognized character '{}'", c as char),
            )
        })
    }

    fn scan_number(&mut self, start: u32) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.pos += 1;
                }
            } else {
                self.pos = save;
            }
        }
        Token::new(TokenKind::NumericLiteral, start, self.pos - start)
    }

    fn scan_string(&mut self, start: u32, quote: u8) -> Result<Token, Diagnostic> {
        self.pos += 1;
        loop {
            match self.bump() {
                None | Some(b'\n') => {
                    return Err(Diagnostic::new(
                        DiagnosticCategory::ParserError,
                        "unterminated.string",
                        self.file.clone(),
                        Span::new(start, self.pos),
                        "unterminated string literal",
                    ));
                }
                Some(b'\\') => {
                    self.pos += 1;
                }
                Some(c) if c == quote => break,
                _ => {}
            }
        }
        Ok(Token::new(TokenKind::StringLiteral, start, self.pos - start))
    }

    fn scan_identifier_or_keyword(&mut self, start: u32) -> Token {
        self.pos += 1;
        while matches!(self.peek(), Some(c) if is_ident_part(c)) {
            self.pos += 1;
        }
        let text = &self.text[start as usize..self.pos as usize];
        let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, start, self.pos - start)
    }

    fn scan_punctuator(&mut self, start: u32) -> Option<Token> {
        // Longest-match-first over the fixed punctuator set.
        const THREE: &[(&str, TokenKind)] = &[
            ("===", TokenKind::EqEqEq),
            ("!==", TokenKind::NotEqEq),
            (">>>", TokenKind::UnsignedShiftRight),
            ("...", TokenKind::DotDotDot),
        ];
        const FOUR: &[(&str, TokenKind)] = &[(">>>=", TokenKind::UnsignedShiftRightEq)];
        const TWO: &[(&str, TokenKind)] = &[
            ("==", TokenKind::EqEq),
            ("!=", TokenKind::NotEq),
            ("<=", TokenKind::Le),
            (">=", TokenKind::Ge),
            ("++", TokenKind::PlusPlus),
            ("--", TokenKind::MinusMinus),
            ("<<", TokenKind::ShiftLeft),
            (">>", TokenKind::ShiftRight),
            ("&&", TokenKind::AmpAmp),
            ("||", TokenKind::PipePipe),
            ("+=", TokenKind::PlusEq),
            ("-=", TokenKind::MinusEq),
            ("*=", TokenKind::StarEq),
            ("%=", TokenKind::PercentEq),
            ("&=", TokenKind::AmpEq),
            ("|=", TokenKind::PipeEq),
            ("^=", TokenKind::CaretEq),
            ("/=", TokenKind::SlashEq),
            ("=>", TokenKind::Arrow),
        ];
        let rest = &self.text[start as usize..];
        for (s, k) in FOUR {
            if rest.starts_with(s) {
                self.pos += 4;
                return Some(Token::new(*k, start, 4));
            }
        }
        for (s, k) in THREE {
            if rest.starts_with(s) {
                self.pos += 3;
                return Some(Token::new(*k, start, 3));
            }
        }
        for (s, k) in TWO {
            if rest.starts_with(s) {
                self.pos += 2;
                return Some(Token::new(*k, start, 2));
            }
        }
        let c = self.bump()?;
        let kind = match c {
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'.' => TokenKind::Dot,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'%' => TokenKind::Percent,
            b'&' => TokenKind::Amp,
            b'|' => TokenKind::Pipe,
            b'^' => TokenKind::Caret,
            b'!' => TokenKind::Bang,
            b'~' => TokenKind::Tilde,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            b'=' => TokenKind::Eq,
            b'/' => TokenKind::Slash,
            _ => {
                self.pos -= 1;
                return None;
            }
        };
        Some(Token::new(kind, start, 1))
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_part(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "new" => TokenKind::New,
        "return" => TokenKind::Return,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "null" => TokenKind::Null,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "let" => TokenKind::Let,
        "const" => TokenKind::Const,
        "yield" => TokenKind::Yield,
        "of" => TokenKind::Of,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut s = Scanner::new(src, "test.js");
        let mut out = Vec::new();
        loop {
            let tok = s.next_token().expect("scan error");
            if tok.kind() == TokenKind::Eof {
                break;
            }
            out.push(tok.kind());
        }
        out
    }

    #[test]
    fn scans_var_declaration() {
        assert_eq!(
            kinds("var x = 1 + 2;"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::NumericLiteral,
                TokenKind::Plus,
                TokenKind::NumericLiteral,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn prefers_longest_punctuator_match() {
        assert_eq!(kinds("a === b"), vec![TokenKind::Identifier, TokenKind::EqEqEq, TokenKind::Identifier]);
        assert_eq!(kinds("a >>> b"), vec![TokenKind::Identifier, TokenKind::UnsignedShiftRight, TokenKind::Identifier]);
    }

    #[test]
    fn reports_unterminated_string() {
        let mut s = Scanner::new("\"abc", "test.js");
        assert!(s.next_token().is_err());
    }

    #[test]
    fn skips_comments() {
        assert_eq!(kinds("// comment\nvar /* inline */ x;"), vec![TokenKind::Var, TokenKind::Identifier, TokenKind::Semicolon]);
    }
}
