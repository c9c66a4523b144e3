#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod token {
    use std::fmt;

    /// Closed set of token kinds the lexer can produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TokenKind {
        Illegal,
        Eof,
        // identifiers / literals
        Ident,
        Int,
        String,
        // assignment
        Assign,
        // arithmetic
        Plus,
        Minus,
        Asterisk,
        Slash,
        // prefix
        Bang,
        // relational
        Lt,
        Gt,
        // equality
        Eq,
        NotEq,
        // punctuation
        Comma,
        Semicolon,
        Colon,
        LParen,
        RParen,
        LBrace,
        RBrace,
        LBracket,
        RBracket,
        // keywords
        Function,
        Var,
        If,
        Else,
        Return,
        True,
        False,
    }

    impl fmt::Display for TokenKind {
        /// Renders the kind the way diagnostics spell it: abstract kinds and
        /// keywords by name, punctuation and operators as their glyph.
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                TokenKind::Illegal => "ILLEGAL",
                TokenKind::Eof => "EOF",
                TokenKind::Ident => "IDENT",
                TokenKind::Int => "INT",
                TokenKind::String => "STRING",
                TokenKind::Assign => "=",
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                TokenKind::Asterisk => "*",
                TokenKind::Slash => "/",
                TokenKind::Bang => "!",
                TokenKind::Lt => "<",
                TokenKind::Gt => ">",
                TokenKind::Eq => "==",
                TokenKind::NotEq => "!=",
                TokenKind::Comma => ",",
                TokenKind::Semicolon => ";",
                TokenKind::Colon => ":",
                TokenKind::LParen => "(",
                TokenKind::RParen => ")",
                TokenKind::LBrace => "{",
                TokenKind::RBrace => "}",
                TokenKind::LBracket => "[",
                TokenKind::RBracket => "]",
                TokenKind::Function => "FUNCTION",
                TokenKind::Var => "VAR",
                TokenKind::If => "IF",
                TokenKind::Else => "ELSE",
                TokenKind::Return => "RETURN",
                TokenKind::True => "TRUE",
                TokenKind::False => "FALSE",
            };
            f.write_str(s)
        }
    }

    /// A token pairs its kind with the exact byte run that produced it.
    /// For `Int` the lexeme is the digit run; for `String` it is the content
    /// between the quotes, exclusive; for `Illegal` it is the offending byte
    /// itself. Source is raw 8-bit bytes, so the lexeme is a byte sequence,
    /// not guaranteed to be valid UTF-8.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Token {
        pub kind: TokenKind,
        pub literal: Vec<u8>,
    }

    impl Token {
        pub fn new(kind: TokenKind, literal: impl Into<Vec<u8>>) -> Self {
            Self {
                kind,
                literal: literal.into(),
            }
        }
    }

    /// The keyword table. Identifier runs resolve here before falling back to
    /// `Ident`; this check is authoritative, so a keyword can never reach the
    /// parser as an identifier.
    pub fn lookup_ident(ident: &[u8]) -> TokenKind {
        match ident {
            b"func" => TokenKind::Function,
            b"var" => TokenKind::Var,
            b"if" => TokenKind::If,
            b"else" => TokenKind::Else,
            b"return" => TokenKind::Return,
            b"true" => TokenKind::True,
            b"false" => TokenKind::False,
            _ => TokenKind::Ident,
        }
    }
}

pub mod ast {
    use super::token::Token;
    use std::fmt;

    /// Root node: an ordered sequence of top-level statements.
    #[derive(Debug, Clone, Default)]
    pub struct Program {
        pub statements: Vec<Statement>,
    }

    impl Program {
        pub fn token_literal(&self) -> &[u8] {
            match self.statements.first() {
                Some(stmt) => stmt.token_literal(),
                None => &[],
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Statement {
        Var(VarStatement),
        Return(ReturnStatement),
        Expression(ExpressionStatement),
    }

    impl Statement {
        pub fn token_literal(&self) -> &[u8] {
            match self {
                Statement::Var(s) => &s.token.literal,
                Statement::Return(s) => &s.token.literal,
                Statement::Expression(s) => &s.token.literal,
            }
        }
    }

    /// `var <name> = <value>;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct VarStatement {
        pub token: Token, // the `var` token
        pub name: Identifier,
        pub value: Expression,
    }

    /// `return <value>;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct ReturnStatement {
        pub token: Token, // the `return` token
        pub value: Expression,
    }

    /// A bare expression in statement position.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExpressionStatement {
        pub token: Token, // first token of the expression
        pub expression: Expression,
    }

    /// `{ stmt* }`, occurring only as an `if` branch or a function body.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BlockStatement {
        pub token: Token, // the `{` token
        pub statements: Vec<Statement>,
    }

    impl BlockStatement {
        pub fn token_literal(&self) -> &[u8] {
            &self.token.literal
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Identifier {
        pub token: Token, // the `Ident` token
        pub value: String,
    }

    /// Prefix operators.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UnOp {
        Bang,
        Neg,
    }

    /// Infix operators.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BinOp {
        Add,
        Sub,
        Mul,
        Div,
        Lt,
        Gt,
        Eq,
        NotEq,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Expression {
        Identifier(Identifier),
        IntegerLiteral {
            token: Token,
            value: i64,
        },
        /// Raw byte passthrough: the value is whatever bytes sat between the
        /// quotes, valid UTF-8 or not.
        StringLiteral {
            token: Token,
            value: Vec<u8>,
        },
        Boolean {
            token: Token,
            value: bool,
        },
        /// `[e1, e2, ...]`
        Array {
            token: Token,
            elements: Vec<Expression>,
        },
        /// `{k1: v1, k2: v2, ...}`. Pairs stay in source order; duplicate
        /// keys are a runtime concern, not a parse concern.
        Hash {
            token: Token,
            pairs: Vec<(Expression, Expression)>,
        },
        Prefix {
            token: Token,
            op: UnOp,
            right: Box<Expression>,
        },
        Infix {
            token: Token,
            left: Box<Expression>,
            op: BinOp,
            right: Box<Expression>,
        },
        If {
            token: Token,
            condition: Box<Expression>,
            consequence: BlockStatement,
            alternative: Option<BlockStatement>,
        },
        Function {
            token: Token,
            parameters: Vec<Identifier>,
            body: BlockStatement,
        },
        Call {
            token: Token, // the `(` token
            function: Box<Expression>,
            arguments: Vec<Expression>,
        },
        Index {
            token: Token, // the `[` token
            left: Box<Expression>,
            index: Box<Expression>,
        },
    }

    impl Expression {
        /// The lexeme of the head token of this node.
        pub fn token_literal(&self) -> &[u8] {
            match self {
                Expression::Identifier(id) => &id.token.literal,
                Expression::IntegerLiteral { token, .. } => &token.literal,
                Expression::StringLiteral { token, .. } => &token.literal,
                Expression::Boolean { token, .. } => &token.literal,
                Expression::Array { token, .. } => &token.literal,
                Expression::Hash { token, .. } => &token.literal,
                Expression::Prefix { token, .. } => &token.literal,
                Expression::Infix { token, .. } => &token.literal,
                Expression::If { token, .. } => &token.literal,
                Expression::Function { token, .. } => &token.literal,
                Expression::Call { token, .. } => &token.literal,
                Expression::Index { token, .. } => &token.literal,
            }
        }
    }

    // ======= display =======
    //
    // Display reproduces a canonical source form. Prefix and infix nodes are
    // fully parenthesized so the stringified tree makes grouping visible.
    // Lexemes are raw bytes; they decode lossily here, at the display
    // boundary only (every token outside string content is ASCII anyway).

    fn lexeme(token: &Token) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&token.literal)
    }

    impl fmt::Display for Program {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for stmt in &self.statements {
                write!(f, "{stmt}")?;
            }
            Ok(())
        }
    }

    impl fmt::Display for Statement {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Statement::Var(s) => {
                    write!(f, "{} {} = {};", lexeme(&s.token), s.name, s.value)
                }
                Statement::Return(s) => write!(f, "{} {};", lexeme(&s.token), s.value),
                Statement::Expression(s) => write!(f, "{}", s.expression),
            }
        }
    }

    impl fmt::Display for BlockStatement {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for stmt in &self.statements {
                write!(f, "{stmt}")?;
            }
            Ok(())
        }
    }

    impl fmt::Display for Identifier {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.value)
        }
    }

    impl fmt::Display for UnOp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                UnOp::Bang => "!",
                UnOp::Neg => "-",
            })
        }
    }

    impl fmt::Display for BinOp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
                BinOp::Lt => "<",
                BinOp::Gt => ">",
                BinOp::Eq => "==",
                BinOp::NotEq => "!=",
            })
        }
    }

    impl fmt::Display for Expression {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Expression::Identifier(id) => write!(f, "{id}"),
                Expression::IntegerLiteral { token, .. } => f.write_str(&lexeme(token)),
                Expression::StringLiteral { token, .. } => f.write_str(&lexeme(token)),
                Expression::Boolean { token, .. } => f.write_str(&lexeme(token)),
                Expression::Array { elements, .. } => {
                    let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                    write!(f, "[{}]", elems.join(", "))
                }
                Expression::Hash { pairs, .. } => {
                    let pairs: Vec<String> =
                        pairs.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                    write!(f, "{{{}}}", pairs.join(", "))
                }
                Expression::Prefix { op, right, .. } => write!(f, "({op}{right})"),
                Expression::Infix {
                    left, op, right, ..
                } => write!(f, "({left} {op} {right})"),
                Expression::If {
                    condition,
                    consequence,
                    alternative,
                    ..
                } => {
                    write!(f, "if{condition} {consequence}")?;
                    if let Some(alt) = alternative {
                        write!(f, "else {alt}")?;
                    }
                    Ok(())
                }
                Expression::Function {
                    token,
                    parameters,
                    body,
                } => {
                    let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                    write!(f, "{}({}) {}", lexeme(token), params.join(", "), body)
                }
                Expression::Call {
                    function,
                    arguments,
                    ..
                } => {
                    let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                    write!(f, "{}({})", function, args.join(", "))
                }
                Expression::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            }
        }
    }
}
