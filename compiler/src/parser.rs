use std::collections::HashSet;
use std::fmt;
use crate::{
    error::{BazError, NameScope},
    tokenizer::{Keyword, Token, TokenKind},
    types::{Declaration, Field, Message, Procedure, Program, Service, ValueType},
};

/// Upper bound on the number of arguments a procedure may take.
pub const MAX_ARGS: usize = 32;

static END_OF_INPUT: Token = Token::EndOfInput;

/// What the parser wants at the current position: a token kind or a keyword literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    Keyword(Keyword),
}

impl Expected {
    fn matches(self, token: &Token) -> bool {
        match (self, token) {
            (Expected::Keyword(want), Token::Keyword(got)) => want == *got,
            (Expected::Keyword(_), _) => false,
            (Expected::Kind(kind), token) => token.kind() == kind,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Keyword(kw) => write!(f, "`{}`", kw.as_str()),
        }
    }
}

/// Forward-only cursor over a token slice with one token of lookahead.
struct Cursor<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, index: 0 }
    }

    fn current(&self) -> &'a Token {
        self.tokens.get(self.index).unwrap_or(&END_OF_INPUT)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind() == kind
    }

    fn advance(&mut self) -> &'a Token {
        let tok = self.current();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        tok
    }

    fn eat(&mut self, expected: Expected) -> Result<&'a Token, BazError> {
        self.one_of(&[expected])
    }

    fn one_of(&mut self, alternatives: &[Expected]) -> Result<&'a Token, BazError> {
        if alternatives.iter().any(|alt| alt.matches(self.current())) {
            return Ok(self.advance());
        }
        Err(self.mismatch(alternatives))
    }

    fn eat_identifier(&mut self) -> Result<String, BazError> {
        if let Token::Identifier(name) = self.current() {
            self.advance();
            return Ok(name.clone());
        }
        Err(self.mismatch(&[Expected::Kind(TokenKind::Identifier)]))
    }

    fn eat_value_type(&mut self) -> Result<ValueType, BazError> {
        if let Token::ValueType(ty) = self.current() {
            self.advance();
            return Ok(*ty);
        }
        Err(self.mismatch(&[Expected::Kind(TokenKind::ValueType)]))
    }

    fn mismatch(&self, alternatives: &[Expected]) -> BazError {
        let found = match self.current().text() {
            Some(text) => format!("`{}`", text),
            None       => "end of input".to_string(),
        };
        let expected = alternatives
            .iter()
            .map(|alt| alt.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        BazError::Parse { found, expected }
    }
}

/// Records `name` in `seen`, failing if it was already there.
fn claim(seen: &mut HashSet<String>, name: &str, scope: NameScope) -> Result<(), BazError> {
    if !seen.insert(name.to_string()) {
        return Err(BazError::Duplicate {
            scope,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Parses a whole program. The first mismatch aborts; nothing partial is returned.
pub fn parse_program(tokens: &[Token]) -> Result<Program, BazError> {
    let mut cursor        = Cursor::new(tokens);
    let mut declarations  = Vec::new();
    let mut service_names = HashSet::new();
    let mut message_names = HashSet::new();

    while !cursor.at(TokenKind::EndOfInput) {
        let keyword = cursor.one_of(&[
            Expected::Keyword(Keyword::Srv),
            Expected::Keyword(Keyword::Msg),
        ])?;
        let name = cursor.eat_identifier()?;
        cursor.eat(Expected::Kind(TokenKind::LBrace))?;

        let declaration = match keyword {
            Token::Keyword(Keyword::Srv) => Declaration::Service(Service {
                procedures: parse_procedures(&mut cursor, &name)?,
                name,
            }),
            _ => Declaration::Message(Message {
                fields: parse_fields(&mut cursor, &name)?,
                name,
            }),
        };
        cursor.eat(Expected::Kind(TokenKind::RBrace))?;

        match &declaration {
            Declaration::Service(srv) => claim(&mut service_names, &srv.name, NameScope::Service)?,
            Declaration::Message(msg) => claim(&mut message_names, &msg.name, NameScope::Message)?,
        }
        declarations.push(declaration);
    }

    Ok(Program { declarations })
}

fn parse_procedures(cursor: &mut Cursor, service: &str) -> Result<Vec<Procedure>, BazError> {
    let mut procedures = Vec::new();
    let mut seen       = HashSet::new();

    while !cursor.at(TokenKind::RBrace) {
        let procedure = parse_procedure(cursor)?;
        claim(
            &mut seen,
            &procedure.name,
            NameScope::Procedure { service: service.to_string() },
        )?;
        procedures.push(procedure);
    }
    Ok(procedures)
}

// 'proc' IDENT '(' (IDENT (',' IDENT)*)? ')' ('->' | IDENT) IDENT ';'
fn parse_procedure(cursor: &mut Cursor) -> Result<Procedure, BazError> {
    cursor.eat(Expected::Keyword(Keyword::Proc))?;
    let name = cursor.eat_identifier()?;
    cursor.eat(Expected::Kind(TokenKind::LParen))?;

    let mut args = Vec::new();
    if cursor.at(TokenKind::RParen) {
        cursor.advance();
    } else {
        loop {
            if args.len() == MAX_ARGS {
                return Err(BazError::TooManyArgs {
                    procedure: name,
                    limit:     MAX_ARGS,
                });
            }
            args.push(cursor.eat_identifier()?);
            let sep = cursor.one_of(&[
                Expected::Kind(TokenKind::Comma),
                Expected::Kind(TokenKind::RParen),
            ])?;
            if *sep == Token::RParen {
                break;
            }
        }
    }

    // The arrow is optional: an identifier in its place is consumed and dropped.
    cursor.one_of(&[
        Expected::Kind(TokenKind::Arrow),
        Expected::Kind(TokenKind::Identifier),
    ])?;
    let return_type = cursor.eat_identifier()?;
    cursor.eat(Expected::Kind(TokenKind::Semicolon))?;

    Ok(Procedure { name, args, return_type })
}

fn parse_fields(cursor: &mut Cursor, message: &str) -> Result<Vec<Field>, BazError> {
    let mut fields = Vec::new();
    let mut seen   = HashSet::new();

    while !cursor.at(TokenKind::RBrace) {
        let name  = cursor.eat_identifier()?;
        let type_ = cursor.eat_value_type()?;
        cursor.eat(Expected::Kind(TokenKind::Semicolon))?;

        claim(&mut seen, &name, NameScope::Field { message: message.to_string() })?;
        fields.push(Field { name, type_ });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(text: &str) -> Result<Program, BazError> {
        parse_program(&tokenize(text).expect("tokenize failed"))
    }

    fn proc_with_args(count: usize) -> String {
        let args = (0..count).map(|i| format!("A{}", i)).collect::<Vec<_>>().join(", ");
        format!("srv S {{ proc p({}) -> R; }}", args)
    }

    #[test]
    fn test_parse_service_and_message() {
        let program = parse(
            "msg Req { id number; tags array; }\n\
             srv Api {\n  proc get(Req) -> Req;\n  proc ping() -> Req;\n}",
        )
        .unwrap();

        assert_eq!(program.declarations.len(), 2);
        assert_eq!(
            program.declarations[0],
            Declaration::Message(Message {
                name:   "Req".into(),
                fields: vec![
                    Field { name: "id".into(),   type_: ValueType::Number },
                    Field { name: "tags".into(), type_: ValueType::Array },
                ],
            })
        );

        let srv = program.services().next().unwrap();
        assert_eq!(srv.name, "Api");
        assert_eq!(srv.procedures.len(), 2);
        assert_eq!(srv.procedures[0].args, vec!["Req".to_string()]);
        assert_eq!(srv.procedures[0].return_type, "Req");
        assert!(srv.procedures[1].args.is_empty());
    }

    #[test]
    fn test_parse_empty_program_and_bodies() {
        assert!(parse("").unwrap().declarations.is_empty());
        let program = parse("srv S { } msg M { }").unwrap();
        assert_eq!(program.declarations.len(), 2);
    }

    #[test]
    fn test_identifier_accepted_in_arrow_position() {
        let program = parse("srv S { proc p(A) returns R; }").unwrap();
        let srv = program.services().next().unwrap();
        assert_eq!(srv.procedures[0].return_type, "R");
    }

    #[test]
    fn test_missing_return_type_is_rejected() {
        let err = parse("srv S { proc p(A) R; }").unwrap_err();
        match err {
            BazError::Parse { found, expected } => {
                assert_eq!(found, "`;`");
                assert_eq!(expected, "IDENT");
            }
            other => panic!("expected a Parse error but got {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_lists_all_alternatives() {
        let err = parse("srv S { proc p(A; }").unwrap_err();
        match err {
            BazError::Parse { found, expected } => {
                assert_eq!(found, "`;`");
                assert_eq!(expected, "COMMA or RPAREN");
            }
            other => panic!("expected a Parse error but got {:?}", other),
        }

        let err = parse("enum E { }").unwrap_err();
        assert!(matches!(err, BazError::Parse { ref expected, .. } if expected == "`srv` or `msg`"));
    }

    #[test]
    fn test_unterminated_declaration() {
        let err = parse("msg M { a string;").unwrap_err();
        assert!(matches!(err, BazError::Parse { ref found, .. } if found == "end of input"));
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        let err = parse("srv S { proc p(A,) -> R; }").unwrap_err();
        assert!(matches!(err, BazError::Parse { ref found, .. } if found == "`)`"));
    }

    #[test]
    fn test_argument_limit() {
        let program = parse(&proc_with_args(MAX_ARGS)).unwrap();
        assert_eq!(program.services().next().unwrap().procedures[0].args.len(), MAX_ARGS);

        let err = parse(&proc_with_args(MAX_ARGS + 1)).unwrap_err();
        assert!(
            matches!(err, BazError::TooManyArgs { ref procedure, limit: MAX_ARGS } if procedure == "p"),
            "expected TooManyArgs but got {:?}",
            err
        );
    }

    #[test]
    fn test_duplicate_procedure() {
        let err = parse("srv S { proc p() -> R; proc p(A) -> R; }").unwrap_err();
        match err {
            BazError::Duplicate { scope, name } => {
                assert_eq!(scope, NameScope::Procedure { service: "S".into() });
                assert_eq!(name, "p");
            }
            other => panic!("expected a Duplicate error but got {:?}", other),
        }
    }

    #[test]
    fn test_same_procedure_name_in_different_services() {
        assert!(parse("srv A { proc p() -> R; } srv B { proc p() -> R; }").is_ok());
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse("msg M { a string; a number; }").unwrap_err();
        assert!(matches!(
            err,
            BazError::Duplicate { scope: NameScope::Field { .. }, ref name } if name == "a"
        ));
    }

    #[test]
    fn test_duplicate_declarations() {
        let err = parse("srv A { } srv A { }").unwrap_err();
        assert!(matches!(err, BazError::Duplicate { scope: NameScope::Service, .. }));

        let err = parse("msg A { } msg A { }").unwrap_err();
        assert!(matches!(err, BazError::Duplicate { scope: NameScope::Message, .. }));

        assert!(parse("srv A { } msg A { }").is_ok());
    }

    #[test]
    fn test_field_requires_value_type() {
        let err = parse("msg M { a Other; }").unwrap_err();
        assert!(matches!(err, BazError::Parse { ref expected, .. } if expected == "VALTYPE"));
    }

    #[test]
    fn test_missing_end_of_input_token() {
        // A slice without the terminal token still stops cleanly.
        let tokens = vec![Token::Keyword(Keyword::Msg), Token::Identifier("M".into()), Token::LBrace];
        let err = parse_program(&tokens).unwrap_err();
        assert!(matches!(err, BazError::Parse { ref found, .. } if found == "end of input"));
    }
}
