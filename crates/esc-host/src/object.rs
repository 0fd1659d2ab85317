//! `AbstractJsObject`: the abstract capability a host-script
//! object must provide, with default implementations for every
//! non-essential member so a minimal host only has to override what
//! it actually supports.

use crate::error::HostError;
use std::cell::RefCell;
use std::rc::Rc;

/// A reference to a host-script object. `RefCell` because the trait's
/// mutating members (`set_member`, `set_slot`, ...) take `&self` at
/// the call site (the host object is shared via `Rc`) but need
/// interior mutability to actually mutate.
pub type ObjectHandle = Rc<RefCell<dyn AbstractJsObject>>;

#[derive(Clone, Debug)]
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Object(ObjectHandle),
}

/// `dyn AbstractJsObject` carries no `PartialEq` of its own, so object
/// equality is by-handle identity (`Rc::ptr_eq`) rather than derived —
/// the same notion `Mirror::identical` uses for the boundary case.
impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a.to_bits() == b.to_bits(),
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl JsValue {
    /// Every `JsValue` except `Object` is primitive — the predicate
    /// `getDefaultValue`'s ECMA 8.6.2 loop stops on.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, JsValue::Object(_))
    }

    /// The offending value's class name, for error messages like
    /// `Bindings`' class-cast failure that must name what was passed.
    pub fn class_name(&self) -> String {
        match self {
            JsValue::Undefined => "Undefined".to_string(),
            JsValue::Null => "Null".to_string(),
            JsValue::Boolean(_) => "Boolean".to_string(),
            JsValue::Number(_) => "Number".to_string(),
            JsValue::String(_) => "String".to_string(),
            JsValue::Object(obj) => obj.borrow().get_class_name().to_string(),
        }
    }
}

/// `getDefaultValue`'s hint (ECMA 8.6.2): which conversion order to
/// try first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Number,
    String,
    /// No hint given: treated identically to `Number` by ECMA 8.6.2
    /// except for `Date`, which this core does not special-case (no
    /// built-in `Date` object lives in the compiler core itself).
    Default,
}

/// The abstract capability a host-script object must provide.
/// Every member below is non-essential except `get_class_name`,
/// `is_function`, and `is_array`: a minimal implementor only needs to
/// override the members it actually supports, and inherits
/// "unsupported"/empty/false defaults for the rest.
pub trait AbstractJsObject {
    fn call(&self, _this_arg: JsValue, _args: &[JsValue]) -> Result<JsValue, HostError> {
        Err(HostError::UnsupportedOperation("call"))
    }

    fn new_object(&self, _args: &[JsValue]) -> Result<JsValue, HostError> {
        Err(HostError::UnsupportedOperation("newObject"))
    }

    fn eval(&self, _source: &str) -> Result<JsValue, HostError> {
        Err(HostError::UnsupportedOperation("eval"))
    }

    fn get_member(&self, _name: &str) -> JsValue {
        JsValue::Undefined
    }

    fn has_member(&self, _name: &str) -> bool {
        false
    }

    fn set_member(&self, _name: &str, _value: JsValue) {}

    fn remove_member(&self, _name: &str) -> bool {
        false
    }

    fn get_slot(&self, _index: usize) -> JsValue {
        JsValue::Undefined
    }

    fn has_slot(&self, _index: usize) -> bool {
        false
    }

    fn set_slot(&self, _index: usize, _value: JsValue) {}

    fn key_set(&self) -> Vec<Rc<str>> {
        Vec::new()
    }

    fn values(&self) -> Vec<JsValue> {
        Vec::new()
    }

    fn is_instance(&self, _value: &JsValue) -> bool {
        false
    }

    fn is_instance_of(&self, _class_name: &str) -> bool {
        false
    }

    fn get_class_name(&self) -> &str {
        "Object"
    }

    fn is_function(&self) -> bool {
        false
    }

    fn is_array(&self) -> bool {
        false
    }

    /// `Mirror`'s one override: hands back the handle it wraps so
    /// callers can unwrap a mirror layer without downcasting. `None`
    /// for every object that isn't itself a mirror.
    fn as_mirror_target(&self) -> Option<ObjectHandle> {
        None
    }

    /// ECMA 8.6.2: for a `Number` (or `Default`) hint, try `valueOf`
    /// then `toString`; for `String`, the reverse. Each candidate
    /// method's result is returned iff primitive. If neither yields a
    /// primitive, fails with a `TypeError`.
    ///
    /// Member functions looked up here are invoked with
    /// `JsValue::Undefined` as `this_arg`: the trait has no way to
    /// hand its own `&self` to `call` as a `JsValue::Object` (that
    /// requires an owning `Rc`, which a `&self` method does not have
    /// access to). A concrete object's `call` is expected to bind its
    /// own receiver internally regardless of what `this_arg` carries,
    /// the same way a method closed over its receiver at
    /// construction would.
    fn get_default_value(&self, hint: Hint) -> Result<JsValue, HostError> {
        let order: [&str; 2] = match hint {
            Hint::String => ["toString", "valueOf"],
            Hint::Number | Hint::Default => ["valueOf", "toString"],
        };
        for method_name in order {
            if let JsValue::Object(method) = self.get_member(method_name) {
                let is_callable = method.borrow().is_function();
                if is_callable {
                    if let Ok(result) = method.borrow().call(JsValue::Undefined, &[]) {
                        if result.is_primitive() {
                            return Ok(result);
                        }
                    }
                }
            }
        }
        Err(HostError::TypeError(format!("no primitive value from {}", self.get_class_name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainObject;
    impl AbstractJsObject for PlainObject {}

    #[test]
    fn default_call_is_unsupported() {
        assert_eq!(PlainObject.call(JsValue::Undefined, &[]), Err(HostError::UnsupportedOperation("call")));
    }

    #[test]
    fn default_get_member_is_undefined() {
        assert_eq!(PlainObject.get_member("x"), JsValue::Undefined);
    }

    #[test]
    fn default_get_default_value_fails_with_type_error() {
        assert!(matches!(PlainObject.get_default_value(Hint::Default), Err(HostError::TypeError(_))));
    }

    struct Boxed(RefCell<f64>);
    impl AbstractJsObject for Boxed {
        fn get_member(&self, name: &str) -> JsValue {
            if name == "valueOf" {
                JsValue::Object(Rc::new(RefCell::new(ValueOfFn(*self.0.borrow()))))
            } else {
                JsValue::Undefined
            }
        }
    }

    struct ValueOfFn(f64);
    impl AbstractJsObject for ValueOfFn {
        fn is_function(&self) -> bool {
            true
        }
        fn call(&self, _this_arg: JsValue, _args: &[JsValue]) -> Result<JsValue, HostError> {
            Ok(JsValue::Number(self.0))
        }
    }

    #[test]
    fn get_default_value_returns_value_of_result_for_number_hint() {
        let boxed = Boxed(RefCell::new(3.5));
        assert_eq!(boxed.get_default_value(Hint::Number), Ok(JsValue::Number(3.5)));
    }
}
