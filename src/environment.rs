use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// Cloning an Environment clones the handle, not the scope: a function
// value and the evaluator share one live scope, so bindings created
// after a closure is built are still visible through it.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

#[derive(Debug, Default)]
struct Scope {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_enclosed(outer: &Environment) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                store: Default::default(),
                outer: Some(outer.clone()),
            })),
        }
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.scope.borrow();

        match scope.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    pub fn set(&self, name: &str, val: Object) {
        self.scope.borrow_mut().store.insert(name.to_owned(), val);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_walks_outward() {
        let global = Environment::new();
        global.set("a", Object::Integer(1));

        let local = Environment::with_enclosed(&global);
        local.set("b", Object::Integer(2));

        assert_eq!(local.get("a"), Some(Object::Integer(1)));
        assert_eq!(local.get("b"), Some(Object::Integer(2)));
        assert_eq!(local.get("c"), None);
    }

    #[test]
    fn test_set_stays_innermost() {
        let global = Environment::new();
        let local = Environment::with_enclosed(&global);

        local.set("a", Object::Integer(1));

        assert_eq!(global.get("a"), None);
    }

    #[test]
    fn test_shadowing_leaves_outer_binding_alone() {
        let global = Environment::new();
        global.set("a", Object::Integer(1));

        let local = Environment::with_enclosed(&global);
        local.set("a", Object::Integer(2));

        assert_eq!(local.get("a"), Some(Object::Integer(2)));
        assert_eq!(global.get("a"), Some(Object::Integer(1)));
    }

    #[test]
    fn test_enclosed_scope_sees_later_outer_bindings() {
        let global = Environment::new();
        let local = Environment::with_enclosed(&global);

        global.set("x", Object::Integer(5));

        assert_eq!(local.get("x"), Some(Object::Integer(5)));
    }
}
