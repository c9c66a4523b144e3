//! Tree-walking evaluator for Kev programs.
//!
//! Runtime faults are first-class [`Object::Error`] values that short-circuit
//! enclosing evaluation; an early `return` travels as an
//! [`Object::ReturnValue`] wrapper and is unwrapped at the nearest call or
//! program boundary. Evaluation depth is bounded by the host call stack.

use std::collections::HashMap;

use kev_ast::ast::{BinOp, BlockStatement, Expression, Program, Statement, UnOp};

use crate::builtins;
use crate::env::{Env, Environment};
use crate::object::{Function, HashPair, Object};

/// Evaluate a whole program against `env`.
///
/// `None` is the "absent" result: the program ended on a statement (such as
/// `var`) that produces no value. Drivers suppress printing for absent.
pub fn eval_program(program: &Program, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in &program.statements {
        match eval_statement(stmt, env) {
            Some(Object::ReturnValue(value)) => return Some(*value),
            Some(err @ Object::Error(_)) => return Some(err),
            other => result = other,
        }
    }
    result
}

/// Like [`eval_program`], except returns and errors stay wrapped so that
/// enclosing blocks unwind too.
fn eval_block(block: &BlockStatement, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in &block.statements {
        match eval_statement(stmt, env) {
            Some(obj @ (Object::ReturnValue(_) | Object::Error(_))) => return Some(obj),
            other => result = other,
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Env) -> Option<Object> {
    match stmt {
        Statement::Var(var) => {
            let value = eval_expression(&var.value, env);
            if value.is_error() {
                return Some(value);
            }
            env.borrow_mut().set(var.name.value.clone(), value);
            None
        }
        Statement::Return(ret) => {
            let value = eval_expression(&ret.value, env);
            if value.is_error() {
                Some(value)
            } else {
                Some(Object::ReturnValue(Box::new(value)))
            }
        }
        Statement::Expression(stmt) => Some(eval_expression(&stmt.expression, env)),
    }
}

pub fn eval_expression(expr: &Expression, env: &Env) -> Object {
    match expr {
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::StringLiteral { value, .. } => Object::Str(value.clone()),
        Expression::Boolean { value, .. } => Object::Boolean(*value),

        Expression::Identifier(id) => eval_identifier(&id.value, env),

        Expression::Array { elements, .. } => match eval_expressions(elements, env) {
            Ok(elements) => Object::Array(elements),
            Err(err) => err,
        },
        Expression::Hash { pairs, .. } => eval_hash_literal(pairs, env),

        Expression::Prefix { op, right, .. } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(*op, right)
        }
        Expression::Infix {
            left, op, right, ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(*op, left, right)
        }

        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),

        // A function literal closes over the environment it was evaluated in.
        Expression::Function {
            parameters, body, ..
        } => Object::Function(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }),

        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            match eval_expressions(arguments, env) {
                Ok(args) => apply_function(function, args),
                Err(err) => err,
            }
        }

        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Object::Error(format!("identifier not found: {name}"))
}

/// Evaluates a list in source order, stopping at the first error.
fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        result.push(value);
    }
    Ok(result)
}

fn eval_prefix_expression(op: UnOp, right: Object) -> Object {
    match op {
        UnOp::Bang => eval_bang_operator(right),
        UnOp::Neg => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

/// `!` inverts truthiness: false and null are falsy, everything else
/// (including 0 and the empty string) is truthy.
fn eval_bang_operator(right: Object) -> Object {
    match right {
        Object::Boolean(value) => Object::Boolean(!value),
        Object::Null => Object::Boolean(true),
        _ => Object::Boolean(false),
    }
}

fn is_truthy(obj: &Object) -> bool {
    !matches!(obj, Object::Null | Object::Boolean(false))
}

fn eval_infix_expression(op: BinOp, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(op, left, right)
        }
        (Object::Boolean(left), Object::Boolean(right)) => match op {
            BinOp::Eq => Object::Boolean(left == right),
            BinOp::NotEq => Object::Boolean(left != right),
            _ => Object::Error(format!("unknown operator: BOOLEAN {op} BOOLEAN")),
        },
        (Object::Str(left), Object::Str(right)) => match op {
            BinOp::Add => Object::Str([left, right].concat()),
            BinOp::Eq => Object::Boolean(left == right),
            BinOp::NotEq => Object::Boolean(left != right),
            _ => Object::Error(format!("unknown operator: STRING {op} STRING")),
        },
        (left, right) if left.type_name() != right.type_name() => Object::Error(format!(
            "type mismatch: {} {op} {}",
            left.type_name(),
            right.type_name()
        )),
        (left, right) => Object::Error(format!(
            "unknown operator: {} {op} {}",
            left.type_name(),
            right.type_name()
        )),
    }
}

fn eval_integer_infix_expression(op: BinOp, left: i64, right: i64) -> Object {
    match op {
        BinOp::Add => Object::Integer(left + right),
        BinOp::Sub => Object::Integer(left - right),
        BinOp::Mul => Object::Integer(left * right),
        // checked_div also covers the i64::MIN / -1 overflow, which must not
        // take the interpreter down either
        BinOp::Div => match left.checked_div(right) {
            Some(value) => Object::Integer(value),
            None if right == 0 => Object::Error("division by zero".to_string()),
            None => Object::Error(format!("integer overflow: {left} / {right}")),
        },
        BinOp::Lt => Object::Boolean(left < right),
        BinOp::Gt => Object::Boolean(left > right),
        BinOp::Eq => Object::Boolean(left == right),
        BinOp::NotEq => Object::Boolean(left != right),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Env,
) -> Object {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    // An if-expression must produce a proper value, so an absent-valued
    // branch (one ending on `var`) collapses to null.
    if is_truthy(&condition) {
        eval_block(consequence, env).unwrap_or(Object::Null)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env).unwrap_or(Object::Null)
    } else {
        Object::Null
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Object {
    let mut hash = HashMap::new();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unusable as hash key: {}", key.type_name()));
        };
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        hash.insert(hash_key, HashPair { key, value });
    }
    Object::Hash(hash)
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(function) => {
            if args.len() != function.parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    function.parameters.len()
                ));
            }

            // Fresh call frame enclosing the *captured* environment, not the
            // caller's; that is what makes scoping lexical.
            let call_env = Environment::new_enclosed(function.env.clone());
            for (param, arg) in function.parameters.iter().zip(args) {
                call_env.borrow_mut().set(param.value.clone(), arg);
            }

            match eval_block(&function.body, &call_env) {
                // Unwrap returns here so they do not bubble past the call;
                // errors pass through unwrapped-as-errors.
                Some(Object::ReturnValue(value)) => *value,
                Some(value) => value,
                // body ended on an absent-valued statement
                None => Object::Null,
            }
        }
        Object::Builtin(function) => function(args),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(idx)) => {
            // negative indices are out of range, no wrap-around
            if idx < 0 || idx as usize >= elements.len() {
                Object::Null
            } else {
                elements[idx as usize].clone()
            }
        }
        (Object::Hash(pairs), index) => match index.hash_key() {
            Some(key) => match pairs.get(&key) {
                Some(pair) => pair.value.clone(),
                None => Object::Null,
            },
            None => Object::Error(format!("unusable as hash key: {}", index.type_name())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}
