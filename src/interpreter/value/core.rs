use std::{fmt, rc::Rc};

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    ast::{FunctionExpression, LiteralValue, PathToNode, SourceRange, write_number},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        memory::ScopeId,
        value::geometry::{ExtrudeGroup, SketchGroup},
    },
};

/// Links a value back to the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Byte range of the producing expression.
    pub source_range: SourceRange,
    /// Path from the program root to the producing node.
    pub path_to_node: PathToNode,
}

impl Metadata {
    /// Creates a metadata entry.
    #[must_use]
    pub const fn new(source_range: SourceRange, path_to_node: PathToNode) -> Self {
        Self { source_range,
               path_to_node }
    }
}

/// A function literal closed over the scope it was evaluated in.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// The literal.
    pub expression: Rc<FunctionExpression>,
    /// AST path of the literal, used as the base path of its body.
    pub path:       PathToNode,
    /// Scope the literal was evaluated in. Calls run in a child of it.
    pub scope:      ScopeId,
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.expression, &other.expression) && self.scope == other.scope
    }
}

impl Serialize for FunctionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FunctionValue", 2)?;
        state.serialize_field("expression", self.expression.as_ref())?;
        state.serialize_field("pathToNode", &self.path)?;
        state.end()
    }
}

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// declarations, function returns and standard library calls. Consumers match
/// on it exhaustively; a variant that is not accepted somewhere raises
/// `TypeMismatch` rather than being coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    String(String),
    /// A boolean value, produced by literals and comparisons.
    Boolean(bool),
    /// A 2D profile. Shared, never mutated after construction.
    SketchGroup(Rc<SketchGroup>),
    /// A 3D extrusion of a profile.
    ExtrudeGroup(Rc<ExtrudeGroup>),
    /// A user defined function.
    Function(Rc<FunctionValue>),
    /// Opaque structured data, such as the result of
    /// `getExtrudeWallTransform` or a binding injected by the host.
    UserVal(serde_json::Value),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Bool(b) => Self::Boolean(*b),
        }
    }
}

impl Value {
    /// Name of the variant, for error messages.
    ///
    /// # Example
    /// ```
    /// use partscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "Number");
    /// assert_eq!(Value::Boolean(true).type_name(), "Boolean");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
            Self::SketchGroup(_) => "SketchGroup",
            Self::ExtrudeGroup(_) => "ExtrudeGroup",
            Self::Function(_) => "Function",
            Self::UserVal(_) => "UserVal",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `range`: Source range reported on failure.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::TypeMismatch)`: Otherwise.
    pub fn as_number(&self, range: SourceRange) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(expected("Number", other, range)),
        }
    }

    /// Borrows the string, or returns an error if not a string.
    pub fn as_str(&self, range: SourceRange) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(expected("String", other, range)),
        }
    }

    /// Returns the shared sketch, or an error for any other variant.
    pub fn as_sketch(&self, range: SourceRange) -> EvalResult<Rc<SketchGroup>> {
        match self {
            Self::SketchGroup(sketch) => Ok(Rc::clone(sketch)),
            other => Err(expected("SketchGroup", other, range)),
        }
    }

    /// Returns the shared extrusion, or an error for any other variant.
    pub fn as_extrude(&self, range: SourceRange) -> EvalResult<Rc<ExtrudeGroup>> {
        match self {
            Self::ExtrudeGroup(extrude) => Ok(Rc::clone(extrude)),
            other => Err(expected("ExtrudeGroup", other, range)),
        }
    }

    /// The lineage carried inside geometry values; empty for everything
    /// else.
    #[must_use]
    pub fn geometry_meta(&self) -> &[Metadata] {
        match self {
            Self::SketchGroup(sketch) => &sketch.meta,
            Self::ExtrudeGroup(extrude) => &extrude.meta,
            _ => &[],
        }
    }
}

fn expected(type_name: &str, found: &Value, range: SourceRange) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("expected {type_name}, found {}",
                                                  found.type_name()),
                                 range }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::SketchGroup(sketch) => {
                write!(f, "SketchGroup({}, {} segment(s))", sketch.id, sketch.value.len())
            },
            Self::ExtrudeGroup(extrude) => {
                write!(f, "ExtrudeGroup({}, height {})", extrude.id, extrude.height)
            },
            Self::Function(function) => {
                write!(f, "Function({} parameter(s))", function.expression.params.len())
            },
            Self::UserVal(json) => write!(f, "{json}"),
        }
    }
}

/// What Program Memory binds a name to: a value plus the metadata linking it
/// to the source that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryItem {
    /// The bound value.
    pub value: Value,
    /// At least one entry for the producing expression.
    #[serde(rename = "__meta")]
    pub meta:  Vec<Metadata>,
}

impl MemoryItem {
    /// Creates an item with a single metadata entry.
    #[must_use]
    pub fn new(value: Value, meta: Metadata) -> Self {
        Self { value,
               meta: vec![meta] }
    }
}
