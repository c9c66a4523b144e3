#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod builtins;
mod env;
mod eval;
mod object;

pub use env::{Env, Environment};
pub use eval::{eval_expression, eval_program};
pub use object::{Function, HashKey, HashPair, Object};
