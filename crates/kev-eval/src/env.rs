use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// Shared handle to an environment. Closures co-own the environment they
/// captured, so a chain stays alive as long as any function value still
/// points into it. A function bound to a name in its own captured scope forms
/// a reference cycle; such cycles are accepted and leak (the language has no
/// observable finalization).
pub type Env = Rc<RefCell<Environment>>;

/// Name-to-value map with an optional outer environment. Lookup walks
/// outward until a binding is found; writes always land in the innermost map
/// (inner scopes shadow, they never mutate enclosing bindings).
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: None,
        }))
    }

    /// A fresh innermost environment enclosing `outer`, used for function
    /// call frames.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}
