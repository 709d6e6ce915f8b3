use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed value flowing through a test case: arguments,
/// keyword values, expected results and actual results.
///
/// # Examples
///
/// ```rust
/// use testfunc::Value;
/// let n = Value::from(3);
/// assert_eq!(n.type_name(), "Int");
/// assert_eq!(Value::from(3), Value::from(3.0));
/// assert_eq!(Value::from("hi").repr(), "\"hi\"");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Map(OrdMap<String, Value>),
    /// Several positional arguments packed into one case slot. Only this
    /// variant is ever spread into multiple call arguments.
    Args(Vec<Value>),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::Tuple(_) => "Tuple",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Args(_) => "Args",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrdMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Builds a `Map` value from name/value pairs.
    pub fn map<K, V, I>(entries: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Canonical, unambiguous representation of the value.
    ///
    /// Strings are quoted and escaped, container brackets are preserved and
    /// a one-element tuple keeps its trailing comma, so the text can be read
    /// back into the same structure.
    ///
    /// ```rust
    /// use testfunc::{tuple, list, Value};
    /// assert_eq!(tuple![1].repr(), "(1,)");
    /// assert_eq!(list!["a", 2.0].repr(), "[\"a\", 2.0]");
    /// assert_eq!(Value::Nil.repr(), "nil");
    /// ```
    pub fn repr(&self) -> String {
        Repr(self).to_string()
    }

    // ------------------------------------------------------------------------
    // Representation helpers
    // ------------------------------------------------------------------------

    fn fmt_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
        if x.is_nan() {
            write!(f, "nan")
        } else if x.is_infinite() {
            write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" })
        } else if x.fract() == 0.0 {
            write!(f, "{:.1}", x)
        } else {
            write!(f, "{}", x)
        }
    }

    fn fmt_seq(
        f: &mut fmt::Formatter<'_>,
        open: &str,
        items: &[Value],
        close: &str,
    ) -> fmt::Result {
        write!(f, "{}", open)?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", Repr(item))?;
        }
        write!(f, "{}", close)
    }
}

/// Display adapter producing [`Value::repr`] output.
pub struct Repr<'a>(pub &'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => Value::fmt_float(f, *x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Tuple(items) if items.len() == 1 => {
                write!(f, "({},)", Repr(&items[0]))
            }
            Value::Tuple(items) => Value::fmt_seq(f, "(", items, ")"),
            Value::List(items) => Value::fmt_seq(f, "[", items, "]"),
            Value::Args(items) => Value::fmt_seq(f, "args(", items, ")"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", k, Repr(v))?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Human-facing form: a top-level string prints without quotes, everything
/// else prints its canonical representation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            other => write!(f, "{}", Repr(other)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => int_eq_float(*a, *b),
            (Str(a), Str(b)) => a == b,
            (Tuple(a), Tuple(b)) | (List(a), List(b)) | (Args(a), Args(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison: the float must hold an integral value inside the i64
/// range, and that value must be `a`.
fn int_eq_float(a: i64, b: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    b.fract() == 0.0 && (-LIMIT..LIMIT).contains(&b) && b as i64 == a
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<OrdMap<String, Value>> for Value {
    fn from(map: OrdMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

/// Builds a `Value::Tuple` from the given expressions.
#[macro_export]
macro_rules! tuple {
    ($($x:expr),* $(,)?) => {
        $crate::Value::Tuple(::std::vec![$($crate::Value::from($x)),*])
    };
}

/// Builds a `Value::List` from the given expressions.
#[macro_export]
macro_rules! list {
    ($($x:expr),* $(,)?) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($x)),*])
    };
}

/// Packs several positional arguments into one case slot (`Value::Args`).
#[macro_export]
macro_rules! args {
    ($($x:expr),* $(,)?) => {
        $crate::Value::Args(::std::vec![$($crate::Value::from($x)),*])
    };
}

/// Builds a keyword-argument `Value::Map`: `kwargs! { "sep" => "," }`.
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::Value::Map(::std::default::Default::default())
    };
    ($($k:expr => $v:expr),+ $(,)?) => {
        $crate::Value::map(::std::vec![$(($k, $crate::Value::from($v))),*])
    };
}
