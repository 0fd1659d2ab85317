//! Token kinds recognized by the ECMAScript 5.1 (+ selected ES6)
//! lexical grammar. This is the enum packed into the low bits of a
//! [`crate::Token`].

/// Discriminant for a lexical token. Fits in 10 bits (values 0..=1023);
/// `Token`'s bit layout reserves 16 bits for it, leaving headroom for
/// future grammar growth without changing the packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    Eof = 0,
    Error,

    // Literals
    NumericLiteral,
    StringLiteral,
    TemplateLiteral,
    RegexLiteral,
    Identifier,

    // Keywords (ES5.1 reserved words + selected ES6)
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    In,
    Instanceof,
    New,
    Return,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Null,
    True,
    False,
    // Selected ES6
    Let,
    Const,
    Yield,
    Of,

    // Punctuators
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    DotDotDot,
    Semicolon,
    Comma,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Plus,
    Minus,
    Star,
    Percent,
    PlusPlus,
    MinusMinus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    Question,
    Colon,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    PercentEq,
    ShiftLeftEq,
    ShiftRightEq,
    UnsignedShiftRightEq,
    AmpEq,
    PipeEq,
    CaretEq,
    Slash,
    SlashEq,
    Arrow,
}

impl TokenKind {
    /// Inverse of the `as u16` cast used when packing a `Token`. Kept
    /// in lock-step with the variant list above; new variants must be
    /// added both to the enum and to the `ALL` table here.
    pub fn from_u16(v: u16) -> Option<TokenKind> {
        const ALL: &[TokenKind] = &[
            TokenKind::Eof,
            TokenKind::Error,
            TokenKind::NumericLiteral,
            TokenKind::StringLiteral,
            TokenKind::TemplateLiteral,
            TokenKind::RegexLiteral,
            TokenKind::Identifier,
            TokenKind::Break,
            TokenKind::Case,
            TokenKind::Catch,
            TokenKind::Continue,
            TokenKind::Debugger,
            TokenKind::Default,
            TokenKind::Delete,
            TokenKind::Do,
            TokenKind::Else,
            TokenKind::Finally,
            TokenKind::For,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::In,
            TokenKind::Instanceof,
            TokenKind::New,
            TokenKind::Return,
            TokenKind::Switch,
            TokenKind::This,
            TokenKind::Throw,
            TokenKind::Try,
            TokenKind::Typeof,
            TokenKind::Var,
            TokenKind::Void,
            TokenKind::While,
            TokenKind::With,
            TokenKind::Null,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Yield,
            TokenKind::Of,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Dot,
            TokenKind::DotDotDot,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::EqEqEq,
            TokenKind::NotEqEq,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Percent,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::UnsignedShiftRight,
            TokenKind::Amp,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Bang,
            TokenKind::Tilde,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Eq,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::PercentEq,
            TokenKind::ShiftLeftEq,
            TokenKind::ShiftRightEq,
            TokenKind::UnsignedShiftRightEq,
            TokenKind::AmpEq,
            TokenKind::PipeEq,
            TokenKind::CaretEq,
            TokenKind::Slash,
            TokenKind::SlashEq,
            TokenKind::Arrow,
        ];
        ALL.get(v as usize).copied()
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Continue
                | TokenKind::Debugger
                | TokenKind::Default
                | TokenKind::Delete
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::In
                | TokenKind::Instanceof
                | TokenKind::New
                | TokenKind::Return
                | TokenKind::Switch
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::Try
                | TokenKind::Typeof
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::With
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Yield
                | TokenKind::Of
        )
    }

    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::PercentEq
                | TokenKind::ShiftLeftEq
                | TokenKind::ShiftRightEq
                | TokenKind::UnsignedShiftRightEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::SlashEq
        )
    }
}
