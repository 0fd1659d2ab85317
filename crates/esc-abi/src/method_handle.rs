//! `MethodHandleFunctionality` — an abstract wrapper mirroring the
//! host's method-handle combinators. The core composes handles
//! (filter arguments, guard-with-test, bind, ...) without ever naming
//! a concrete method-handle implementation.

use crate::linker_services::HostType;

/// An opaque handle to a (possibly composed) callable on the host
/// side. The core treats this as a value it passes between
/// `MethodHandleFunctionality` combinators; it never inspects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MethodHandle(pub u32);

pub trait MethodHandleFunctionality {
    fn identity(&self, ty: HostType) -> MethodHandle;
    fn constant(&self, ty: HostType, value_repr: &str) -> MethodHandle;

    fn filter_arguments(&self, target: MethodHandle, pos: usize, filters: &[MethodHandle]) -> MethodHandle;
    fn filter_return_value(&self, target: MethodHandle, filter: MethodHandle) -> MethodHandle;
    fn guard_with_test(&self, test: MethodHandle, target: MethodHandle, fallback: MethodHandle) -> MethodHandle;
    fn insert_arguments(&self, target: MethodHandle, pos: usize, values_repr: &[String]) -> MethodHandle;
    fn drop_arguments(&self, target: MethodHandle, pos: usize, count: usize) -> MethodHandle;
    fn fold_arguments(&self, target: MethodHandle, pos: usize, combiner: MethodHandle) -> MethodHandle;
    fn cast(&self, target: MethodHandle, ty: HostType) -> MethodHandle;
    fn as_type(&self, target: MethodHandle, ty: HostType) -> MethodHandle;
    fn as_collector(&self, target: MethodHandle, array_type: HostType, count: usize) -> MethodHandle;
    fn as_spreader(&self, target: MethodHandle, array_type: HostType, count: usize) -> MethodHandle;
    fn bind_to(&self, target: MethodHandle, receiver_repr: &str) -> MethodHandle;
    fn throw_exception(&self, ty: HostType, exception_type: HostType) -> MethodHandle;
    fn catch_exception(&self, target: MethodHandle, exception_type: HostType, handler: MethodHandle) -> MethodHandle;

    fn element_getter(&self, array_type: HostType) -> MethodHandle;
    fn element_setter(&self, array_type: HostType) -> MethodHandle;

    fn find_getter(&self, owner: HostType, name: &str, ty: HostType) -> Option<MethodHandle>;
    fn find_setter(&self, owner: HostType, name: &str, ty: HostType) -> Option<MethodHandle>;
    fn find_static_getter(&self, owner: HostType, name: &str, ty: HostType) -> Option<MethodHandle>;
    fn find_static_setter(&self, owner: HostType, name: &str, ty: HostType) -> Option<MethodHandle>;
    fn find_virtual(&self, owner: HostType, name: &str, params: &[HostType], ret: HostType) -> Option<MethodHandle>;
    fn find_special(&self, owner: HostType, name: &str, params: &[HostType], ret: HostType) -> Option<MethodHandle>;

    /// A `SwitchPoint`-equivalent invalidation token; returns an opaque
    /// id the caller can later invalidate to deoptimize anything
    /// guarded on it.
    fn new_switch_point(&self) -> u32;
    fn invalidate_switch_point(&self, id: u32);
}
