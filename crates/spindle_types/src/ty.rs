//! Type identity for producible values.
//!
//! A [`Type`] is the key the planner binds providers to. It is a closed set of
//! variants covering every category the front end can report, so consumers
//! can match exhaustively.
//!
//! # Identity
//!
//! - Named types are identified by `(unit, name)` alone. Two [`NamedType`]s
//!   with the same unit and name are the same type, whatever shape they
//!   record.
//! - Unnamed types compare structurally.
//!
//! Named types record the [`Shape`] of their underlying type rather than the
//! underlying type itself, so self-referential declarations (a struct holding
//! a pointer to itself) stay representable.

use core::fmt::{self, Write as _};
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::unit::UnitPath;

// ─────────────────────────────────────────────────────────────────────────────
// Basic types
// ─────────────────────────────────────────────────────────────────────────────

/// Predeclared scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `int8`
    Int8,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `uint`
    Uint,
    /// `uint8`
    Uint8,
    /// `uint16`
    Uint16,
    /// `uint32`
    Uint32,
    /// `uint64`
    Uint64,
    /// `uintptr`
    Uintptr,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `complex64`
    Complex64,
    /// `complex128`
    Complex128,
    /// `string`
    String,
    /// `unsafe.Pointer`
    UnsafePointer,
    /// A type the front end failed to resolve.
    Invalid,
}

impl BasicKind {
    /// Returns the host spelling of this type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::Invalid => "invalid type",
        }
    }

    /// Returns true for `bool`.
    #[must_use]
    pub fn is_boolean(self) -> bool {
        self == BasicKind::Bool
    }

    /// Returns true for integer, floating-point and complex types.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            BasicKind::Bool | BasicKind::String | BasicKind::UnsafePointer | BasicKind::Invalid
        )
    }

    /// Returns true for `string`.
    #[must_use]
    pub fn is_string(self) -> bool {
        self == BasicKind::String
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shapes and named types
// ─────────────────────────────────────────────────────────────────────────────

/// The structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A predeclared scalar.
    Basic(BasicKind),
    /// A record type.
    Struct,
    /// A fixed-length array.
    Array,
    /// A pointer.
    Pointer,
    /// A dynamically sized slice.
    Slice,
    /// A hash map.
    Map,
    /// A channel.
    Chan,
    /// A function or closure.
    Func,
    /// An interface (abstract type).
    Interface,
}

/// A declared type, identified by its unit and name.
#[derive(Debug, Clone)]
pub struct NamedType {
    unit: UnitPath,
    name: Arc<str>,
    shape: Shape,
}

impl NamedType {
    /// Returns the unit that declares this type.
    #[must_use]
    pub fn unit(&self) -> &UnitPath {
        &self.unit
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the shape of the underlying type.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }
}

impl PartialEq for NamedType {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.name == other.name
    }
}

impl Eq for NamedType {}

impl Hash for NamedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.name.hash(state);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composite parts
// ─────────────────────────────────────────────────────────────────────────────

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// Bidirectional: `chan T`.
    Both,
    /// Send-only: `chan<- T`.
    Send,
    /// Receive-only: `<-chan T`.
    Recv,
}

/// A function signature.
///
/// When `variadic` is set the last parameter must be a slice; it renders as
/// `...elem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Parameter types in order.
    pub params: Vec<Type>,
    /// Result types in order.
    pub results: Vec<Type>,
    /// Whether the last parameter is variadic.
    pub variadic: bool,
}

/// An interface method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    /// Method name.
    pub name: Arc<str>,
    /// Method signature.
    pub signature: Signature,
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name. For embedded fields this is the type's name.
    pub name: Arc<str>,
    /// Field type.
    pub ty: Type,
    /// Whether the field is embedded.
    pub embedded: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Type
// ─────────────────────────────────────────────────────────────────────────────

/// Identity key for a producible value's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A predeclared scalar.
    Basic(BasicKind),
    /// A declared type.
    Named(Arc<NamedType>),
    /// `*T`
    Pointer(Box<Type>),
    /// `[]T`
    Slice(Box<Type>),
    /// `[N]T`
    Array {
        /// Number of elements.
        len: u64,
        /// Element type.
        elem: Box<Type>,
    },
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<Type>,
        /// Value type.
        value: Box<Type>,
    },
    /// `chan T`
    Chan {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<Type>,
    },
    /// `func(...) ...`
    Func(Arc<Signature>),
    /// `interface{...}`
    Interface(Arc<[Method]>),
    /// `struct{...}`
    Struct(Arc<[Field]>),
}

impl Type {
    /// Creates a predeclared scalar type.
    #[must_use]
    pub fn basic(kind: BasicKind) -> Self {
        Type::Basic(kind)
    }

    /// Creates a named type declared in `unit`.
    #[must_use]
    pub fn named(unit: UnitPath, name: impl Into<Arc<str>>, shape: Shape) -> Self {
        Type::Named(Arc::new(NamedType {
            unit,
            name: name.into(),
            shape,
        }))
    }

    /// Creates a predeclared named type such as `error` or `any`.
    #[must_use]
    pub fn universe(name: impl Into<Arc<str>>, shape: Shape) -> Self {
        Type::named(UnitPath::universe(), name, shape)
    }

    /// The predeclared `error` interface.
    #[must_use]
    pub fn error() -> Self {
        Type::universe("error", Shape::Interface)
    }

    /// Creates `*elem`.
    #[must_use]
    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    /// Creates `[]elem`.
    #[must_use]
    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    /// Creates `[len]elem`.
    #[must_use]
    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Creates `map[key]value`.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a channel type.
    #[must_use]
    pub fn chan(dir: ChanDir, elem: Type) -> Self {
        Type::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Creates a non-variadic function type.
    #[must_use]
    pub fn func(params: Vec<Type>, results: Vec<Type>) -> Self {
        Type::Func(Arc::new(Signature {
            params,
            results,
            variadic: false,
        }))
    }

    /// Creates an interface type.
    #[must_use]
    pub fn interface(methods: Vec<Method>) -> Self {
        Type::Interface(methods.into())
    }

    /// Creates an unnamed struct type.
    #[must_use]
    pub fn structure(fields: Vec<Field>) -> Self {
        Type::Struct(fields.into())
    }

    /// Returns the structural category of this type.
    ///
    /// For named types this is the category of the underlying type.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Type::Basic(kind) => Shape::Basic(*kind),
            Type::Named(named) => named.shape,
            Type::Pointer(_) => Shape::Pointer,
            Type::Slice(_) => Shape::Slice,
            Type::Array { .. } => Shape::Array,
            Type::Map { .. } => Shape::Map,
            Type::Chan { .. } => Shape::Chan,
            Type::Func(_) => Shape::Func,
            Type::Interface(_) => Shape::Interface,
            Type::Struct(_) => Shape::Struct,
        }
    }

    /// Returns the named type, if this is one.
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Type::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Appends every unit referenced by a named type inside this type.
    ///
    /// Units are appended in the order they are encountered and may repeat.
    pub fn collect_units(&self, out: &mut Vec<UnitPath>) {
        match self {
            Type::Basic(_) => {}
            Type::Named(named) if named.unit.is_universe() => {}
            Type::Named(named) => out.push(named.unit.clone()),
            Type::Pointer(elem) | Type::Slice(elem) => elem.collect_units(out),
            Type::Array { elem, .. } | Type::Chan { elem, .. } => elem.collect_units(out),
            Type::Map { key, value } => {
                key.collect_units(out);
                value.collect_units(out);
            }
            Type::Func(sig) => sig.collect_units(out),
            Type::Interface(methods) => {
                for method in methods.iter() {
                    method.signature.collect_units(out);
                }
            }
            Type::Struct(fields) => {
                for field in fields.iter() {
                    field.ty.collect_units(out);
                }
            }
        }
    }

    /// Renders the host spelling of this type.
    ///
    /// Named types are prefixed with whatever `qualifier` returns for their
    /// unit; `None` leaves the name unqualified.
    #[must_use]
    pub fn render(&self, qualifier: &dyn Qualifier) -> String {
        let mut out = String::new();
        self.write(&mut out, qualifier);
        out
    }

    fn write(&self, out: &mut String, q: &dyn Qualifier) {
        match self {
            Type::Basic(kind) => out.push_str(kind.name()),
            Type::Named(named) => {
                if named.unit.is_universe() {
                    out.push_str(&named.name);
                    return;
                }
                if let Some(prefix) = q.qualify(&named.unit) {
                    out.push_str(prefix);
                    out.push('.');
                }
                out.push_str(&named.name);
            }
            Type::Pointer(elem) => {
                out.push('*');
                elem.write(out, q);
            }
            Type::Slice(elem) => {
                out.push_str("[]");
                elem.write(out, q);
            }
            Type::Array { len, elem } => {
                let _ = write!(out, "[{len}]");
                elem.write(out, q);
            }
            Type::Map { key, value } => {
                out.push_str("map[");
                key.write(out, q);
                out.push(']');
                value.write(out, q);
            }
            Type::Chan { dir, elem } => {
                let parens = *dir == ChanDir::Both
                    && matches!(
                        **elem,
                        Type::Chan {
                            dir: ChanDir::Recv,
                            ..
                        }
                    );
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                if parens {
                    out.push('(');
                }
                elem.write(out, q);
                if parens {
                    out.push(')');
                }
            }
            Type::Func(sig) => {
                out.push_str("func");
                sig.write(out, q);
            }
            Type::Interface(methods) => {
                out.push_str("interface{");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    method.signature.write(out, q);
                }
                out.push('}');
            }
            Type::Struct(fields) => {
                out.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    field.ty.write(out, q);
                }
                out.push('}');
            }
        }
    }
}

impl Signature {
    fn collect_units(&self, out: &mut Vec<UnitPath>) {
        for ty in self.params.iter().chain(&self.results) {
            ty.collect_units(out);
        }
    }

    fn write(&self, out: &mut String, q: &dyn Qualifier) {
        out.push('(');
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match param {
                Type::Slice(elem) if self.variadic && i + 1 == self.params.len() => {
                    out.push_str("...");
                    elem.write(out, q);
                }
                _ => param.write(out, q),
            }
        }
        out.push(')');
        match self.results.as_slice() {
            [] => {}
            [single] => {
                out.push(' ');
                single.write(out, q);
            }
            many => {
                out.push_str(" (");
                for (i, result) in many.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    result.write(out, q);
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FullPath))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Qualifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Decides how a named type's unit is spelled when rendering a type.
pub trait Qualifier {
    /// Returns the prefix for names declared in `unit`, or `None` to leave
    /// them unqualified.
    fn qualify<'a>(&'a self, unit: &'a UnitPath) -> Option<&'a str>;
}

/// Qualifies every named type with its full unit path.
///
/// Used for diagnostics, where there is no import table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullPath;

impl Qualifier for FullPath {
    fn qualify<'a>(&'a self, unit: &'a UnitPath) -> Option<&'a str> {
        Some(unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Local<'a>(&'a str);

    impl Qualifier for Local<'_> {
        fn qualify<'a>(&'a self, unit: &'a UnitPath) -> Option<&'a str> {
            (unit.as_str() != self.0).then_some("dep")
        }
    }

    fn app() -> UnitPath {
        UnitPath::new("example.com/app")
    }

    #[test]
    fn named_identity_ignores_shape() {
        let a = Type::named(app(), "Config", Shape::Struct);
        let b = Type::named(app(), "Config", Shape::Pointer);
        assert_eq!(a, b);

        let other_unit = Type::named(UnitPath::new("example.com/other"), "Config", Shape::Struct);
        assert_ne!(a, other_unit);
    }

    #[test]
    fn unnamed_types_compare_structurally() {
        let a = Type::map(Type::basic(BasicKind::String), Type::slice(Type::basic(BasicKind::Int)));
        let b = Type::map(Type::basic(BasicKind::String), Type::slice(Type::basic(BasicKind::Int)));
        assert_eq!(a, b);
        assert_ne!(a, Type::map(Type::basic(BasicKind::String), Type::basic(BasicKind::Int)));
    }

    #[test]
    fn display_uses_full_paths() {
        let ty = Type::pointer(Type::named(app(), "Server", Shape::Struct));
        assert_eq!(ty.to_string(), "*example.com/app.Server");
    }

    #[test]
    fn render_with_qualifier() {
        let dep = UnitPath::new("example.com/db");
        let ty = Type::map(
            Type::named(app(), "Key", Shape::Basic(BasicKind::String)),
            Type::pointer(Type::named(dep, "Conn", Shape::Struct)),
        );
        assert_eq!(ty.render(&Local("example.com/app")), "map[Key]*dep.Conn");
    }

    #[test]
    fn render_composites() {
        let q = Local("example.com/app");
        let int = || Type::basic(BasicKind::Int);
        let error = Type::error();

        let func = Type::Func(Arc::new(Signature {
            params: vec![Type::basic(BasicKind::String), Type::slice(int())],
            results: vec![int(), error],
            variadic: true,
        }));
        assert_eq!(func.render(&q), "func(string, ...int) (int, error)");

        let nested = Type::chan(ChanDir::Both, Type::chan(ChanDir::Recv, int()));
        assert_eq!(nested.render(&q), "chan (<-chan int)");
        assert_eq!(Type::chan(ChanDir::Send, int()).render(&q), "chan<- int");

        let record = Type::structure(vec![
            Field {
                name: "N".into(),
                ty: int(),
                embedded: false,
            },
            Field {
                name: "Base".into(),
                ty: Type::named(app(), "Base", Shape::Struct),
                embedded: true,
            },
        ]);
        assert_eq!(record.render(&q), "struct{N int; Base}");
        assert_eq!(Type::structure(Vec::new()).render(&q), "struct{}");

        let iface = Type::interface(vec![Method {
            name: "Close".into(),
            signature: Signature {
                params: Vec::new(),
                results: Vec::new(),
                variadic: false,
            },
        }]);
        assert_eq!(iface.render(&q), "interface{Close()}");
        assert_eq!(Type::array(4, int()).render(&q), "[4]int");
    }

    #[test]
    fn collect_units_walks_composites() {
        let db = UnitPath::new("example.com/db");
        let ty = Type::func(
            vec![Type::named(app(), "Config", Shape::Struct)],
            vec![Type::pointer(Type::named(db.clone(), "Conn", Shape::Struct))],
        );
        let mut units = Vec::new();
        ty.collect_units(&mut units);
        assert_eq!(units, vec![app(), db]);
    }

    #[test]
    fn universe_names_are_never_qualified_or_collected() {
        let ty = Type::func(
            vec![Type::universe("any", Shape::Interface)],
            vec![Type::error()],
        );
        assert_eq!(ty.render(&Local("example.com/app")), "func(any) error");
        assert_eq!(ty.render(&FullPath), "func(any) error");

        let mut units = Vec::new();
        ty.collect_units(&mut units);
        assert!(units.is_empty());
    }

    #[test]
    fn shapes() {
        assert_eq!(Type::slice(Type::basic(BasicKind::Int)).shape(), Shape::Slice);
        assert_eq!(
            Type::named(app(), "Port", Shape::Basic(BasicKind::Int)).shape(),
            Shape::Basic(BasicKind::Int)
        );
        assert!(BasicKind::Complex64.is_numeric());
        assert!(!BasicKind::UnsafePointer.is_numeric());
    }
}
