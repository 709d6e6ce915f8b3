//! # Callables and Invocations
//!
//! A function under test is anything implementing [`Callable`]. The harness
//! never inspects a callable's parameters; it builds an [`Invocation`]
//! (ordered positional values plus named values) and hands it over.
//!
//! - **`NamedFn`**: wraps a closure that receives the whole invocation
//! - **`Pure`**: a named [`PureFn`] pointer over positional values; keywords
//!   are rejected before it runs

use crate::value::{Repr, Value};
use im::OrdMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// CORE TYPES AND TRAITS
// ============================================================================

/// Errors a callee may report instead of returning a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("{func}() takes {expected} positional argument(s) but {actual} were given")]
    Arity {
        func: String,
        expected: String,
        actual: usize,
    },
    #[error("{func}() expected {expected}, found {found}")]
    Type {
        func: String,
        expected: String,
        found: String,
    },
    #[error("{func}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { func: String, name: String },
    #[error("division by zero")]
    ZeroDivision,
    #[error("panicked: {message}")]
    Panicked { message: String },
    #[error("{0}")]
    Custom(String),
}

/// The function under test.
pub trait Callable {
    /// Declared name, used when rendering the call signature.
    fn name(&self) -> &str;
    fn call(&self, invocation: &Invocation) -> Result<Value, CallError>;
}

/// Pure callables: operate only on positional values.
pub type PureFn = fn(args: &[Value]) -> Result<Value, CallError>;

/// Fails with [`CallError::Arity`] unless `min <= args.len() <= max`.
pub fn check_arity(func: &str, args: &[Value], min: usize, max: usize) -> Result<(), CallError> {
    let actual = args.len();
    if (min..=max).contains(&actual) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else if max == usize::MAX {
        format!("at least {}", min)
    } else {
        format!("{} to {}", min, max)
    };
    Err(CallError::Arity {
        func: func.to_string(),
        expected,
        actual,
    })
}

/// Positional and keyword arguments for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub args: Vec<Value>,
    pub kwargs: OrdMap<String, Value>,
}

impl Invocation {
    pub fn new(args: Vec<Value>, kwargs: OrdMap<String, Value>) -> Self {
        Self { args, kwargs }
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn kwarg(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    /// Fails on the first keyword not listed in `allowed`.
    pub fn expect_keywords(&self, func: &str, allowed: &[&str]) -> Result<(), CallError> {
        match self.kwargs.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(name) => Err(CallError::UnexpectedKeyword {
                func: func.to_string(),
                name: name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Renders `func_name(arg1, arg2, kw=val)` using canonical representations.
    pub fn signature(&self, func_name: &str) -> String {
        format!("{}({})", func_name, self)
    }
}

/// The argument list without parentheses: `1, "a", x=99`.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positional = self.args.iter().map(|v| Repr(v).to_string());
        let named = self
            .kwargs
            .iter()
            .map(|(k, v)| format!("{}={}", k, Repr(v)));
        let rendered: Vec<String> = positional.chain(named).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

// ============================================================================
// CALLABLE IMPLEMENTATIONS
// ============================================================================

/// A named closure receiving the full invocation.
pub struct NamedFn<F> {
    name: String,
    func: F,
}

impl<F> NamedFn<F>
where
    F: Fn(&Invocation) -> Result<Value, CallError>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Callable for NamedFn<F>
where
    F: Fn(&Invocation) -> Result<Value, CallError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, invocation: &Invocation) -> Result<Value, CallError> {
        (self.func)(invocation)
    }
}

/// Shorthand for [`NamedFn::new`].
pub fn func<F>(name: impl Into<String>, f: F) -> NamedFn<F>
where
    F: Fn(&Invocation) -> Result<Value, CallError>,
{
    NamedFn::new(name, f)
}

/// A plain function pointer over positional values. Keywords are rejected.
#[derive(Clone, Copy)]
pub struct Pure {
    pub name: &'static str,
    pub func: PureFn,
}

impl Callable for Pure {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, invocation: &Invocation) -> Result<Value, CallError> {
        invocation.expect_keywords(self.name, &[])?;
        (self.func)(&invocation.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kwargs, list};

    fn invocation(args: Vec<Value>, kw: Value) -> Invocation {
        let kwargs = kw.as_map().cloned().unwrap_or_default();
        Invocation::new(args, kwargs)
    }

    #[test]
    fn test_signature_renders_args_then_keywords() {
        let inv = invocation(
            vec![Value::from(1), Value::from("a")],
            kwargs! { "x" => 99 },
        );
        assert_eq!(inv.signature("foo"), r#"foo(1, "a", x=99)"#);
    }

    #[test]
    fn test_signature_without_arguments() {
        assert_eq!(Invocation::default().signature("bar"), "bar()");
    }

    #[test]
    fn test_signature_keeps_sequence_argument_brackets() {
        let inv = invocation(vec![list![1, 2]], kwargs! {});
        assert_eq!(inv.signature("sum"), "sum([1, 2])");
    }

    #[test]
    fn test_check_arity_messages() {
        let args = [Value::from(1)];
        assert!(check_arity("abs", &args, 1, 1).is_ok());
        assert!(check_arity("split", &args, 1, 2).is_ok());
        let err = check_arity("divmod", &args, 2, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "divmod() takes 2 positional argument(s) but 1 were given"
        );
        let err = check_arity("split", &[], 1, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "split() takes 1 to 2 positional argument(s) but 0 were given"
        );
        let err = check_arity("many", &[], 1, usize::MAX).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_pure_rejects_keywords() {
        fn first(args: &[Value]) -> Result<Value, CallError> {
            Ok(args.first().cloned().unwrap_or_default())
        }
        let f = Pure {
            name: "first",
            func: first,
        };
        let err = f
            .call(&invocation(vec![], kwargs! { "sep" => "," }))
            .unwrap_err();
        assert!(matches!(err, CallError::UnexpectedKeyword { .. }));
    }

    #[test]
    fn test_named_fn_sees_whole_invocation() {
        let count = func("count", |inv: &Invocation| {
            Ok(Value::from((inv.args.len() + inv.kwargs.len()) as i64))
        });
        let out = count
            .call(&invocation(vec![Value::Nil], kwargs! { "k" => 1 }))
            .unwrap();
        assert_eq!(out, Value::from(2));
        assert_eq!(count.name(), "count");
    }
}
