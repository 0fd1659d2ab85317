//! `EngineException`: the user-visible shape of a script `throw`
//! crossing the host boundary — file/line/column, the filtered
//! script stack, and the thrown value.

use crate::mirror::Mirror;
use crate::object::{JsValue, ObjectHandle};
use esc_common::EngineFailure;
use std::cell::RefCell;
use std::rc::Rc;

pub type EngineException = EngineFailure<JsValue>;

impl EngineException {
    /// Populates `ecmaError` with a mirror under `home_global` before
    /// rethrowing — every scoped global swap does this on catch so
    /// the host always sees a `TypeError`-compatible object rather
    /// than a bare internal script value.
    pub fn mirrored_under(self, home_global: ObjectHandle) -> EngineException {
        let ecma_error = match self.ecma_error {
            JsValue::Object(obj) => {
                let mirror: ObjectHandle = Rc::new(RefCell::new(Mirror::new(obj, home_global, false)));
                JsValue::Object(mirror)
            }
            other => other,
        };
        EngineException { ecma_error, ..self }
    }
}

impl std::fmt::Display for EngineException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self.file_name.as_deref().unwrap_or("<unknown>");
        write!(f, "{file}:{}:{}", self.line_number, self.column_number)?;
        for frame in &self.script_stack {
            write!(f, "\n\tat {} ({})", frame.method_name, frame.file_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineException {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::AbstractJsObject;
    use esc_common::RawFrame;

    struct Thrown;
    impl AbstractJsObject for Thrown {
        fn get_class_name(&self) -> &str {
            "Error"
        }
    }

    fn handle() -> ObjectHandle {
        Rc::new(RefCell::new(Thrown))
    }

    #[test]
    fn mirrored_under_wraps_an_object_ecma_error() {
        let raw_frames = [RawFrame::new("<foo.js>.<program>")];
        let exc = EngineException::new(Some("foo.js".to_string()), 3, 7, &raw_frames, JsValue::Object(handle()));
        let home = handle();
        let mirrored = exc.mirrored_under(home.clone());
        match mirrored.ecma_error {
            JsValue::Object(obj) => assert_eq!(obj.borrow().get_class_name(), "Mirror"),
            _ => panic!("expected an object ecmaError"),
        }
    }

    #[test]
    fn mirrored_under_leaves_primitive_ecma_error_untouched() {
        let exc = EngineException::new(None, 0, 0, &[], JsValue::String("boom".into()));
        let mirrored = exc.mirrored_under(handle());
        assert_eq!(mirrored.ecma_error, JsValue::String("boom".into()));
    }

    #[test]
    fn display_renders_location_and_filtered_frames() {
        let raw_frames = [RawFrame::new("<foo.js>.<program>"), RawFrame::new("<foo.js>.bar$1$baz")];
        let exc = EngineException::new(Some("foo.js".to_string()), 12, 4, &raw_frames, JsValue::Undefined);
        let rendered = exc.to_string();
        assert!(rendered.contains("foo.js:12:4"));
        assert!(rendered.contains("at <program> (foo.js)"));
        assert!(rendered.contains("at baz (foo.js)"));
    }
}
