//! `Bindings`: the `Map`-shaped view over a global object host
//! code uses to get/set/remove variables, with the internal
//! `undefined` value translated to the host's `null` the same way
//! `Mirror`'s own member accessors do.

use crate::error::HostError;
use crate::object::{AbstractJsObject, JsValue, ObjectHandle};

pub struct Bindings {
    global: ObjectHandle,
}

impl Bindings {
    pub fn new(global: ObjectHandle) -> Self {
        Bindings { global }
    }

    /// Validates a `Bindings` key: must be a non-empty string.
    fn validate_key(key: &JsValue) -> Result<&str, HostError> {
        match key {
            JsValue::String(s) if s.is_empty() => Err(HostError::IllegalArgument("key can not be empty".into())),
            JsValue::String(s) => Ok(s),
            JsValue::Null => Err(HostError::NullArgument),
            other => Err(HostError::ClassCast(other.class_name())),
        }
    }

    pub fn get(&self, key: &JsValue) -> Result<JsValue, HostError> {
        let name = Self::validate_key(key)?;
        Ok(match self.global.borrow().get_member(name) {
            JsValue::Undefined => JsValue::Null,
            other => other,
        })
    }

    pub fn put(&self, key: &JsValue, value: JsValue) -> Result<(), HostError> {
        let name = Self::validate_key(key)?;
        self.global.borrow().set_member(name, value);
        Ok(())
    }

    pub fn remove(&self, key: &JsValue) -> Result<bool, HostError> {
        let name = Self::validate_key(key)?;
        Ok(self.global.borrow().remove_member(name))
    }

    pub fn contains_key(&self, key: &JsValue) -> Result<bool, HostError> {
        let name = Self::validate_key(key)?;
        Ok(self.global.borrow().has_member(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Dummy;
    impl AbstractJsObject for Dummy {}

    fn bindings() -> Bindings {
        Bindings::new(Rc::new(RefCell::new(Dummy)))
    }

    #[test]
    fn empty_string_key_is_illegal_argument() {
        let b = bindings();
        assert!(matches!(b.get(&JsValue::String("".into())), Err(HostError::IllegalArgument(_))));
    }

    #[test]
    fn null_key_is_null_argument() {
        let b = bindings();
        assert_eq!(b.get(&JsValue::Null), Err(HostError::NullArgument));
    }

    #[test]
    fn non_string_key_is_class_cast() {
        let b = bindings();
        assert_eq!(b.get(&JsValue::Number(1.0)), Err(HostError::ClassCast("Number".into())));
    }

    #[test]
    fn class_cast_message_names_offending_class() {
        let b = bindings();
        let err = b.get(&JsValue::Number(42.0)).unwrap_err();
        assert!(err.to_string().contains("Number"), "message should include the offending class name: {err}");
    }

    #[test]
    fn undefined_member_reads_back_as_null() {
        let b = bindings();
        assert_eq!(b.get(&JsValue::String("missing".into())), Ok(JsValue::Null));
    }
}
