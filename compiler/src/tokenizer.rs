use std::fmt;
use regex::Regex;
use lazy_static::lazy_static;
use crate::error::BazError;
use crate::types::ValueType;

lazy_static! {
    pub static ref FRAGMENT_RX: Regex = Regex::new(r"^([A-Za-z0-9_]+|;|,|\(|\)|\{|\}|->)$").unwrap();
    pub static ref LINE_BREAK_RX: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Split order matters: paired characters go first.
pub const STRUCTURAL_CHARS: [char; 6] = ['(', ')', '{', '}', ';', ','];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Srv,
    Msg,
    Proc,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Srv  => "srv",
            Keyword::Msg  => "msg",
            Keyword::Proc => "proc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Arrow,
    ValueType,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword    => "KEYWORD",
            TokenKind::Identifier => "IDENT",
            TokenKind::Semicolon  => "SEMICOLON",
            TokenKind::Comma      => "COMMA",
            TokenKind::LParen     => "LPAREN",
            TokenKind::RParen     => "RPAREN",
            TokenKind::LBrace     => "LBRACE",
            TokenKind::RBrace     => "RBRACE",
            TokenKind::Arrow      => "ARROW",
            TokenKind::ValueType  => "VALTYPE",
            TokenKind::EndOfInput => "EOF",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(String),
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Arrow,
    ValueType(ValueType),
    EndOfInput,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Keyword(_)    => TokenKind::Keyword,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Semicolon     => TokenKind::Semicolon,
            Token::Comma         => TokenKind::Comma,
            Token::LParen        => TokenKind::LParen,
            Token::RParen        => TokenKind::RParen,
            Token::LBrace        => TokenKind::LBrace,
            Token::RBrace        => TokenKind::RBrace,
            Token::Arrow         => TokenKind::Arrow,
            Token::ValueType(_)  => TokenKind::ValueType,
            Token::EndOfInput    => TokenKind::EndOfInput,
        }
    }

    /// Literal source text of the token; `None` for `EndOfInput`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Keyword(kw)     => Some(kw.as_str()),
            Token::Identifier(id)  => Some(id),
            Token::Semicolon       => Some(";"),
            Token::Comma           => Some(","),
            Token::LParen          => Some("("),
            Token::RParen          => Some(")"),
            Token::LBrace          => Some("{"),
            Token::RBrace          => Some("}"),
            Token::Arrow           => Some("->"),
            Token::ValueType(ty)   => Some(ty.as_str()),
            Token::EndOfInput      => None,
        }
    }

    /// Classifies an already validated fragment. The keyword and punctuation
    /// table wins over value types, which win over identifiers.
    fn classify(raw: &str) -> Token {
        match raw {
            "srv"  => Token::Keyword(Keyword::Srv),
            "msg"  => Token::Keyword(Keyword::Msg),
            "proc" => Token::Keyword(Keyword::Proc),
            ";"    => Token::Semicolon,
            ","    => Token::Comma,
            "("    => Token::LParen,
            ")"    => Token::RParen,
            "{"    => Token::LBrace,
            "}"    => Token::RBrace,
            "->"   => Token::Arrow,
            other  => match ValueType::from_name(other) {
                Some(ty) => Token::ValueType(ty),
                None     => Token::Identifier(other.to_string()),
            },
        }
    }
}

/// Splits `fragment` around every occurrence of `delim`, keeping each
/// delimiter as a standalone fragment.
fn split_keeping<'a>(fragment: &'a str, delim: char, out: &mut Vec<&'a str>) {
    let mut last = 0;
    for (start, matched) in fragment.match_indices(delim) {
        if start > last {
            out.push(&fragment[last..start]);
        }
        out.push(matched);
        last = start + matched.len();
    }
    if last < fragment.len() {
        out.push(&fragment[last..]);
    }
}

fn raw_fragments(text: &str) -> Vec<&str> {
    let spaced: Vec<&str> = LINE_BREAK_RX
        .split(text)
        .flat_map(|line| line.split(' '))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    STRUCTURAL_CHARS.iter().fold(spaced, |fragments, &delim| {
        let mut out = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            split_keeping(fragment, delim, &mut out);
        }
        out
    })
}

/// Turns source text into tokens, always terminated by one `EndOfInput`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, BazError> {
    let fragments = raw_fragments(text);

    if let Some(bad) = fragments.iter().find(|raw| !FRAGMENT_RX.is_match(raw)) {
        return Err(BazError::Lex {
            fragment: bad.to_string(),
        });
    }

    let mut tokens: Vec<Token> = fragments.into_iter().map(Token::classify).collect();
    tokens.push(Token::EndOfInput);
    Ok(tokens)
}
