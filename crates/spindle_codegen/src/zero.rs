//! Zero values.
//!
//! An injector that fails early still has to return something in its value
//! position. That is the zero value of the result type, chosen by structural
//! category.

use spindle_types::ty::{BasicKind, Qualifier, Shape, Type};

/// Returns the zero-value literal of `ty`.
///
/// | Shape | Zero value |
/// |-------|------------|
/// | struct, array | `T{}` |
/// | numeric | `0` |
/// | bool | `false` |
/// | string | `""` |
/// | pointer, unsafe pointer, interface, map, func, chan, slice | `nil` |
///
/// # Panics
///
/// Panics on [`BasicKind::Invalid`]. The front end never reports a type it
/// failed to resolve as a provider output, so reaching this is a bug.
#[must_use]
pub fn zero_value(ty: &Type, qualifier: &dyn Qualifier) -> String {
    match ty.shape() {
        Shape::Struct | Shape::Array => format!("{}{{}}", ty.render(qualifier)),
        Shape::Basic(kind) if kind.is_boolean() => "false".to_string(),
        Shape::Basic(kind) if kind.is_numeric() => "0".to_string(),
        Shape::Basic(kind) if kind.is_string() => "\"\"".to_string(),
        Shape::Basic(BasicKind::UnsafePointer)
        | Shape::Pointer
        | Shape::Interface
        | Shape::Map
        | Shape::Func
        | Shape::Chan
        | Shape::Slice => "nil".to_string(),
        Shape::Basic(kind) => panic!("no zero value for {ty} ({})", kind.name()),
    }
}
