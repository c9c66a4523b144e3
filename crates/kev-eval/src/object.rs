//! Runtime values.
//!
//! `Object` is a closed sum type; `ReturnValue` and `Error` are transient
//! propagation markers that exist only between an originating expression and
//! the boundary that unwraps them. Well-behaved evaluation never stores them
//! in arrays, hashes or captured environments.

use std::collections::HashMap;
use std::fmt;

use kev_ast::ast::{BlockStatement, Identifier};

use crate::env::Env;

/// Host-implemented callable: variadic `Object` arguments in, one `Object`
/// out. Argument validation is the callable's own job.
pub type BuiltinFn = fn(Vec<Object>) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    /// Immutable byte sequence. Strings are raw byte passthrough from the
    /// source, so the content need not be valid UTF-8; it is decoded lossily
    /// only when displayed.
    Str(Vec<u8>),
    Null,
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(BuiltinFn),
    /// Wrapper that walks an early `return` back up to the nearest call or
    /// program boundary.
    ReturnValue(Box<Object>),
    /// First-class runtime error; short-circuits enclosing evaluation.
    Error(String),
}

impl Object {
    /// Type tag used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Hash-key derivation for the three hashable types. Everything else
    /// returns `None` and surfaces as an `unusable as hash key` error at the
    /// call site.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                object_type: "INTEGER",
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                object_type: "BOOLEAN",
                value: u64::from(*value),
            }),
            Object::Str(value) => Some(HashKey {
                object_type: "STRING",
                value: fnv1a(value),
            }),
            _ => None,
        }
    }
}

/// A user function value: parameter list, body, and the environment captured
/// at the point the literal was evaluated (the closure's defining scope).
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

// The captured environment can contain the function itself (recursive
// bindings form a cycle), so Debug must not traverse it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A stored hash entry. The original key object is kept alongside the value
/// so the display form can reproduce it.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// `(type tag, 64-bit discriminant)`: integers hash as themselves, booleans
/// as 0/1, strings as FNV-1a over their bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub object_type: &'static str,
    pub value: u64,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::Str(value) => f.write_str(&String::from_utf8_lossy(value)),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Object::Function(function) => {
                let params: Vec<String> =
                    function.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "func({}) {{\n{}\n}}", params.join(", "), function.body)
            }
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::ReturnValue(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}
