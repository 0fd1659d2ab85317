//! `LinkerServices` — the native-interop linker boundary. The
//! core never performs method-handle linking itself; it asks this
//! trait for a converter and, at overload-resolution time, which of
//! two candidate conversions is preferred.

use crate::method_handle::MethodHandle;

/// Result of comparing two candidate conversions for the same source
/// type, used by overload resolution at a call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionPreference {
    Type1Better,
    Type2Better,
    Indeterminate,
}

/// A host type tag. The concrete representation (a JVM `Class`, a
/// native type descriptor, ...) is host-specific; the core only needs
/// to pass these opaquely between calls on this trait.
pub type HostType = &'static str;

pub trait LinkerServices {
    /// A method handle performing `from -> to`, or `None` if the host
    /// has no such conversion.
    fn get_type_converter(&self, from: HostType, to: HostType) -> Option<MethodHandle>;

    /// Adapts `handle` to exactly signature `ty`, if possible.
    fn as_type(&self, handle: MethodHandle, ty: HostType) -> Option<MethodHandle>;

    /// Compares two conversions away from `src`, with the core-specific
    /// override that a rope-like `ConsString` converting to
    /// `String`/`CharSequence` is strictly better than any other
    /// conversion, regardless of what a generic type-distance metric
    /// would say.
    fn compare_conversion(&self, src: HostType, t1: HostType, t2: HostType) -> ConversionPreference {
        if src == "ConsString" && (t1 == "String" || t1 == "CharSequence") && t2 != t1 {
            return ConversionPreference::Type1Better;
        }
        if src == "ConsString" && (t2 == "String" || t2 == "CharSequence") && t1 != t2 {
            return ConversionPreference::Type2Better;
        }
        self.compare_conversion_generic(src, t1, t2)
    }

    /// Host-specific fallback used once the `ConsString` override
    /// above doesn't apply.
    fn compare_conversion_generic(&self, src: HostType, t1: HostType, t2: HostType) -> ConversionPreference;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoPreference;
    impl LinkerServices for NoPreference {
        fn get_type_converter(&self, _from: HostType, _to: HostType) -> Option<MethodHandle> {
            None
        }
        fn as_type(&self, handle: MethodHandle, _ty: HostType) -> Option<MethodHandle> {
            Some(handle)
        }
        fn compare_conversion_generic(&self, _src: HostType, _t1: HostType, _t2: HostType) -> ConversionPreference {
            ConversionPreference::Indeterminate
        }
    }

    #[test]
    fn cons_string_to_string_wins_regardless_of_generic_metric() {
        let linker = NoPreference;
        assert_eq!(
            linker.compare_conversion("ConsString", "String", "Number"),
            ConversionPreference::Type1Better
        );
        assert_eq!(
            linker.compare_conversion("ConsString", "Number", "CharSequence"),
            ConversionPreference::Type2Better
        );
    }

    #[test]
    fn falls_back_to_generic_metric_otherwise() {
        let linker = NoPreference;
        assert_eq!(
            linker.compare_conversion("Number", "String", "Object"),
            ConversionPreference::Indeterminate
        );
    }
}
