//! `Mirror`: the boundary object the host sees. Wraps an
//! internal script object and its *home global*, swapping the ambient
//! global around every operation so host-initiated calls run under
//! the scope they were captured in rather than whatever happens to be
//! ambient at the call site.

use crate::error::HostError;
use crate::object::{AbstractJsObject, Hint, JsValue, ObjectHandle};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static AMBIENT_GLOBAL: RefCell<Option<ObjectHandle>> = const { RefCell::new(None) };
}

/// The engine is explicitly single-threaded per instance, so the
/// ambient global is a thread-local rather than process-global cell:
/// swapping it is a begin-on-construct, end-on-drop RAII guard, the
/// same shape as any scoped-acquire-release guard, just swapping a
/// cell instead of emitting a trace event.
pub struct AmbientGlobalGuard {
    previous: Option<ObjectHandle>,
}

impl AmbientGlobalGuard {
    fn enter(new_global: ObjectHandle) -> Self {
        let previous = AMBIENT_GLOBAL.with(|g| g.borrow_mut().replace(new_global));
        AmbientGlobalGuard { previous }
    }
}

impl Drop for AmbientGlobalGuard {
    fn drop(&mut self) {
        AMBIENT_GLOBAL.with(|g| *g.borrow_mut() = self.previous.take());
    }
}

pub fn current_global() -> Option<ObjectHandle> {
    AMBIENT_GLOBAL.with(|g| g.borrow().clone())
}

pub struct Mirror {
    target: ObjectHandle,
    home_global: ObjectHandle,
    json_compatible: bool,
}

impl Mirror {
    pub fn new(target: ObjectHandle, home_global: ObjectHandle, json_compatible: bool) -> Self {
        Mirror { target, home_global, json_compatible }
    }

    fn with_home_global<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = AmbientGlobalGuard::enter(self.home_global.clone());
        f()
    }

    /// Wraps a result value with the same `jsonCompatible` flag as
    /// this mirror, recursing into a fresh `Mirror` for any nested
    /// object.
    fn wrap(&self, value: JsValue) -> JsValue {
        match value {
            JsValue::Object(obj) => {
                JsValue::Object(Rc::new(RefCell::new(Mirror::new(obj, self.home_global.clone(), self.json_compatible))))
            }
            other => other,
        }
    }

    /// `getDefaultValue` catches the engine's exception-equivalent and
    /// re-raises as unsupported-operation rather than letting
    /// any internal error kind leak across the boundary.
    pub fn get_default_value(&self, hint: Hint) -> Result<JsValue, HostError> {
        self.with_home_global(|| {
            self.target
                .borrow()
                .get_default_value(hint)
                .map(|v| self.wrap(v))
                .map_err(|_| HostError::UnsupportedOperation("getDefaultValue"))
        })
    }

    /// `identical(a, b)`: compares underlying objects, unwrapping any
    /// mirror layer first.
    pub fn identical(a: &JsValue, b: &JsValue) -> bool {
        match (Self::unwrap_value(a), Self::unwrap_value(b)) {
            (JsValue::Object(x), JsValue::Object(y)) => Rc::ptr_eq(&x, &y),
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
            (JsValue::Number(x), JsValue::Number(y)) => x.to_bits() == y.to_bits(),
            (JsValue::String(x), JsValue::String(y)) => x == y,
            _ => false,
        }
    }

    /// Elementwise wrap. `JsValue::String` is already a flat `Rc<str>`
    /// — no rope representation exists in the compiler core (see
    /// `esc-abi`'s `ConsString` host-type tag, which names the concept
    /// only for `LinkerServices::compare_conversion`'s special case) —
    /// so there is no flattening step to perform here.
    pub fn wrap_array(&self, values: &[JsValue]) -> Vec<JsValue> {
        values.iter().map(|v| self.wrap(v.clone())).collect()
    }

    pub fn unwrap_array(values: &[JsValue]) -> Vec<JsValue> {
        values.iter().map(Self::unwrap_value).collect()
    }

    /// Peels away every `Mirror` layer wrapping an object value,
    /// following `as_mirror_target` until it bottoms out at a handle
    /// that isn't itself a mirror.
    fn unwrap_value(value: &JsValue) -> JsValue {
        match value {
            JsValue::Object(obj) => {
                let mut current = obj.clone();
                while let Some(inner) = current.borrow().as_mirror_target() {
                    current = inner;
                }
                JsValue::Object(current)
            }
            other => other.clone(),
        }
    }
}

impl AbstractJsObject for Mirror {
    fn call(&self, this_arg: JsValue, args: &[JsValue]) -> Result<JsValue, HostError> {
        let _span = tracing::span!(tracing::Level::DEBUG, "mirror_call", class = self.target.borrow().get_class_name()).entered();
        self.with_home_global(|| self.target.borrow().call(this_arg, args).map(|v| self.wrap(v)))
    }

    fn new_object(&self, args: &[JsValue]) -> Result<JsValue, HostError> {
        self.with_home_global(|| self.target.borrow().new_object(args).map(|v| self.wrap(v)))
    }

    fn eval(&self, source: &str) -> Result<JsValue, HostError> {
        self.with_home_global(|| self.target.borrow().eval(source).map(|v| self.wrap(v)))
    }

    fn get_member(&self, name: &str) -> JsValue {
        self.with_home_global(|| self.wrap(self.target.borrow().get_member(name)))
    }

    fn has_member(&self, name: &str) -> bool {
        self.with_home_global(|| self.target.borrow().has_member(name))
    }

    fn set_member(&self, name: &str, value: JsValue) {
        self.with_home_global(|| self.target.borrow().set_member(name, value))
    }

    fn remove_member(&self, name: &str) -> bool {
        self.with_home_global(|| self.target.borrow().remove_member(name))
    }

    fn get_slot(&self, index: usize) -> JsValue {
        self.with_home_global(|| self.wrap(self.target.borrow().get_slot(index)))
    }

    fn has_slot(&self, index: usize) -> bool {
        self.with_home_global(|| self.target.borrow().has_slot(index))
    }

    fn set_slot(&self, index: usize, value: JsValue) {
        self.with_home_global(|| self.target.borrow().set_slot(index, value))
    }

    fn key_set(&self) -> Vec<Rc<str>> {
        self.with_home_global(|| self.target.borrow().key_set())
    }

    fn values(&self) -> Vec<JsValue> {
        self.with_home_global(|| self.wrap_array(&self.target.borrow().values()))
    }

    fn is_instance(&self, value: &JsValue) -> bool {
        self.with_home_global(|| self.target.borrow().is_instance(value))
    }

    fn is_instance_of(&self, class_name: &str) -> bool {
        self.with_home_global(|| self.target.borrow().is_instance_of(class_name))
    }

    fn get_class_name(&self) -> &str {
        "Mirror"
    }

    fn is_function(&self) -> bool {
        self.with_home_global(|| self.target.borrow().is_function())
    }

    fn is_array(&self) -> bool {
        self.with_home_global(|| self.target.borrow().is_array())
    }

    fn get_default_value(&self, hint: Hint) -> Result<JsValue, HostError> {
        Mirror::get_default_value(self, hint)
    }

    fn as_mirror_target(&self) -> Option<ObjectHandle> {
        Some(self.target.clone())
    }
}
