use kev_ast::token::TokenKind;
use kev_parse::Lexer;

fn lex_all(src: &[u8]) -> Vec<(TokenKind, Vec<u8>)> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let done = tok.kind == TokenKind::Eof;
        tokens.push((tok.kind, tok.literal));
        if done {
            break;
        }
    }
    tokens
}

#[test]
fn full_token_stream() {
    use TokenKind::*;

    let src = r#"var five = 5;
var add = func(x, y) {
    x + y;
};
!-/*5;
5 < 10 > 5;
if (5 < 10) { return true; } else { return false; }
10 == 10;
10 != 9;
"foobar"
"foo bar"
[1, 2];
{"foo": "bar"}
"#;

    let expected: Vec<(TokenKind, &str)> = vec![
        (Var, "var"),
        (Ident, "five"),
        (Assign, "="),
        (Int, "5"),
        (Semicolon, ";"),
        (Var, "var"),
        (Ident, "add"),
        (Assign, "="),
        (Function, "func"),
        (LParen, "("),
        (Ident, "x"),
        (Comma, ","),
        (Ident, "y"),
        (RParen, ")"),
        (LBrace, "{"),
        (Ident, "x"),
        (Plus, "+"),
        (Ident, "y"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Semicolon, ";"),
        (Bang, "!"),
        (Minus, "-"),
        (Slash, "/"),
        (Asterisk, "*"),
        (Int, "5"),
        (Semicolon, ";"),
        (Int, "5"),
        (Lt, "<"),
        (Int, "10"),
        (Gt, ">"),
        (Int, "5"),
        (Semicolon, ";"),
        (If, "if"),
        (LParen, "("),
        (Int, "5"),
        (Lt, "<"),
        (Int, "10"),
        (RParen, ")"),
        (LBrace, "{"),
        (Return, "return"),
        (True, "true"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Else, "else"),
        (LBrace, "{"),
        (Return, "return"),
        (False, "false"),
        (Semicolon, ";"),
        (RBrace, "}"),
        (Int, "10"),
        (Eq, "=="),
        (Int, "10"),
        (Semicolon, ";"),
        (Int, "10"),
        (NotEq, "!="),
        (Int, "9"),
        (Semicolon, ";"),
        (String, "foobar"),
        (String, "foo bar"),
        (LBracket, "["),
        (Int, "1"),
        (Comma, ","),
        (Int, "2"),
        (RBracket, "]"),
        (Semicolon, ";"),
        (LBrace, "{"),
        (String, "foo"),
        (Colon, ":"),
        (String, "bar"),
        (RBrace, "}"),
        (Eof, ""),
    ];

    let actual = lex_all(src.as_bytes());
    assert_eq!(actual.len(), expected.len(), "token count");
    for (i, ((kind, literal), (want_kind, want_literal))) in
        actual.iter().zip(expected.iter()).enumerate()
    {
        assert_eq!(kind, want_kind, "token {i} kind");
        assert_eq!(literal.as_slice(), want_literal.as_bytes(), "token {i} literal");
    }
}

#[test]
fn unterminated_string_extends_to_eof() {
    let tokens = lex_all(br#""never closed"#);
    assert_eq!(tokens[0], (TokenKind::String, b"never closed".to_vec()));
    assert_eq!(tokens[1].0, TokenKind::Eof);
}

#[test]
fn string_lexeme_excludes_quotes_and_keeps_bytes_raw() {
    let tokens = lex_all(br#""a\nb""#);
    // no escape processing: the backslash and 'n' pass through as-is
    assert_eq!(tokens[0], (TokenKind::String, b"a\\nb".to_vec()));
}

#[test]
fn string_content_may_be_arbitrary_non_utf8_bytes() {
    let tokens = lex_all(b"\"a\xFFb\"");
    assert_eq!(tokens[0], (TokenKind::String, vec![b'a', 0xFF, b'b']));
    assert_eq!(tokens[1].0, TokenKind::Eof);
}

#[test]
fn unknown_bytes_are_illegal_tokens() {
    let tokens = lex_all(b"5 @ 6");
    assert_eq!(tokens[0], (TokenKind::Int, b"5".to_vec()));
    assert_eq!(tokens[1], (TokenKind::Illegal, b"@".to_vec()));
    assert_eq!(tokens[2], (TokenKind::Int, b"6".to_vec()));
}

#[test]
fn non_ascii_bytes_keep_their_value_in_illegal_lexemes() {
    // "é" encodes as the two bytes 0xC3 0xA9; each one reaches the catch-all
    // arm on its own and must come back out unchanged, not replaced
    let tokens = lex_all(b"5 \xC3\xA9 6");
    assert_eq!(tokens[0], (TokenKind::Int, b"5".to_vec()));
    assert_eq!(tokens[1], (TokenKind::Illegal, vec![0xC3]));
    assert_eq!(tokens[2], (TokenKind::Illegal, vec![0xA9]));
    assert_eq!(tokens[3], (TokenKind::Int, b"6".to_vec()));
}

#[test]
fn keywords_resolve_ahead_of_identifiers() {
    let tokens = lex_all(b"func funcs return returned");
    assert_eq!(tokens[0].0, TokenKind::Function);
    assert_eq!(tokens[1], (TokenKind::Ident, b"funcs".to_vec()));
    assert_eq!(tokens[2].0, TokenKind::Return);
    assert_eq!(tokens[3], (TokenKind::Ident, b"returned".to_vec()));
}

#[test]
fn underscores_are_identifier_characters() {
    let tokens = lex_all(b"_private snake_case");
    assert_eq!(tokens[0], (TokenKind::Ident, b"_private".to_vec()));
    assert_eq!(tokens[1], (TokenKind::Ident, b"snake_case".to_vec()));
}

#[test]
fn lexing_is_deterministic_on_reread() {
    let src = b"var x = [1, 2]; x[0] == 1;";
    assert_eq!(lex_all(src), lex_all(src));
}
