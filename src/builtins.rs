//! # Builtin Callables
//!
//! A handful of small functions used by the demo batches and the tests.
//!
//! - **Arithmetic**: `abs`, `divmod`
//! - **Strings**: `split`
//! - **Introspection**: `describe` echoes how its arguments were bound

use crate::callable::{check_arity, CallError, Callable, Invocation, Pure};
use crate::value::{Repr, Value};
use im::OrdMap;

// ============================================================================
// HELPERS
// ============================================================================

fn type_error(func: &str, expected: &str, found: &Value) -> CallError {
    CallError::Type {
        func: func.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// Floor division with a remainder carrying the divisor's sign.
fn floor_divmod(a: i64, b: i64) -> Result<(i64, i64), CallError> {
    if b == 0 {
        return Err(CallError::ZeroDivision);
    }
    let overflow = || CallError::Custom("integer overflow in divmod".to_string());
    let mut q = a.checked_div(b).ok_or_else(overflow)?;
    let mut r = a.checked_rem(b).ok_or_else(overflow)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        q -= 1;
        r += b;
    }
    Ok((q, r))
}

// ============================================================================
// ARITHMETIC
// ============================================================================

/// Absolute value of a number.
///
/// Example: `abs(-2)` returns `2`.
pub const ABS: Pure = Pure {
    name: "abs",
    func: |args| {
        check_arity("abs", args, 1, 1)?;
        match &args[0] {
            Value::Int(n) => n
                .checked_abs()
                .map(Value::Int)
                .ok_or_else(|| CallError::Custom("integer overflow in abs".to_string())),
            Value::Float(x) => Ok(Value::Float(x.abs())),
            other => Err(type_error("abs", "a number", other)),
        }
    },
};

/// Quotient and remainder as a tuple, using floor division.
///
/// Example: `divmod(10, 3)` returns `(3, 1)`; a zero divisor fails.
pub const DIVMOD: Pure = Pure {
    name: "divmod",
    func: |args| {
        check_arity("divmod", args, 2, 2)?;
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => {
                let (q, r) = floor_divmod(*a, *b)?;
                Ok(Value::Tuple(vec![Value::Int(q), Value::Int(r)]))
            }
            (a, b) => {
                let x = a.as_float().ok_or_else(|| type_error("divmod", "a number", a))?;
                let y = b.as_float().ok_or_else(|| type_error("divmod", "a number", b))?;
                if y == 0.0 {
                    return Err(CallError::ZeroDivision);
                }
                let q = (x / y).floor();
                Ok(Value::Tuple(vec![Value::Float(q), Value::Float(x - q * y)]))
            }
        }
    },
};

// ============================================================================
// STRINGS
// ============================================================================

/// Splits a string on whitespace, or on an explicit separator.
///
/// Example: `split("1,,2,", ",")` returns `["1", "", "2", ""]`.
pub const SPLIT: Pure = Pure {
    name: "split",
    func: |args| {
        check_arity("split", args, 1, 2)?;
        let (text, sep) = (&args[0], args.get(1));
        let text = text.as_str().ok_or_else(|| type_error("split", "a string", text))?;
        let parts: Vec<Value> = match sep {
            None | Some(Value::Nil) => text.split_whitespace().map(Value::from).collect(),
            Some(sep) => {
                let sep = sep.as_str().ok_or_else(|| type_error("split", "a string", sep))?;
                if sep.is_empty() {
                    return Err(CallError::Custom("empty separator".to_string()));
                }
                text.split(sep).map(Value::from).collect()
            }
        };
        Ok(Value::List(parts))
    },
};

// ============================================================================
// INTROSPECTION
// ============================================================================

/// Binds `(a, b="b", *args, **kw)` and reports the binding as a string:
/// `a = 1 b = 2 args = ("x",) kw = {"k": 1}`.
pub struct Describe;

impl Describe {
    fn bind<'a>(
        inv: &'a Invocation,
        index: usize,
        name: &str,
    ) -> Result<Option<&'a Value>, CallError> {
        match (inv.arg(index), inv.kwarg(name)) {
            (Some(_), Some(_)) => Err(CallError::Custom(format!(
                "describe() got multiple values for argument '{}'",
                name
            ))),
            (positional, named) => Ok(positional.or(named)),
        }
    }
}

impl Callable for Describe {
    fn name(&self) -> &str {
        "describe"
    }

    fn call(&self, inv: &Invocation) -> Result<Value, CallError> {
        let a = Self::bind(inv, 0, "a")?.ok_or_else(|| CallError::Arity {
            func: "describe".to_string(),
            expected: "at least 1".to_string(),
            actual: inv.args.len(),
        })?;
        let default_b = Value::from("b");
        let b = Self::bind(inv, 1, "b")?.unwrap_or(&default_b);
        let rest = Value::Tuple(inv.args.iter().skip(2).cloned().collect());
        let kw: OrdMap<String, Value> = inv
            .kwargs
            .iter()
            .filter(|(k, _)| k.as_str() != "a" && k.as_str() != "b")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Value::Str(format!(
            "a = {} b = {} args = {} kw = {}",
            a,
            b,
            Repr(&rest),
            Repr(&Value::Map(kw))
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kwargs, list, tuple};

    fn call(f: &dyn Callable, args: Vec<Value>, kw: Value) -> Result<Value, CallError> {
        let kwargs = kw.as_map().cloned().unwrap_or_default();
        f.call(&Invocation::new(args, kwargs))
    }

    #[test]
    fn test_abs() {
        assert_eq!(call(&ABS, vec![Value::from(-2)], kwargs! {}), Ok(Value::from(2)));
        assert_eq!(call(&ABS, vec![Value::from(-1.5)], kwargs! {}), Ok(Value::from(1.5)));
        assert!(matches!(
            call(&ABS, vec![Value::from("x")], kwargs! {}),
            Err(CallError::Type { .. })
        ));
        assert!(call(&ABS, vec![Value::Int(i64::MIN)], kwargs! {}).is_err());
    }

    #[test]
    fn test_divmod_floors_toward_negative_infinity() {
        assert_eq!(
            call(&DIVMOD, vec![Value::from(10), Value::from(3)], kwargs! {}),
            Ok(tuple![3, 1])
        );
        assert_eq!(
            call(&DIVMOD, vec![Value::from(-7), Value::from(2)], kwargs! {}),
            Ok(tuple![-4, 1])
        );
        assert_eq!(
            call(&DIVMOD, vec![Value::from(7.5), Value::from(2)], kwargs! {}),
            Ok(tuple![3.0, 1.5])
        );
    }

    #[test]
    fn test_divmod_by_zero() {
        assert_eq!(
            call(&DIVMOD, vec![Value::from(1), Value::from(0)], kwargs! {}),
            Err(CallError::ZeroDivision)
        );
    }

    #[test]
    fn test_split() {
        assert_eq!(
            call(&SPLIT, vec![Value::from("hello world")], kwargs! {}),
            Ok(list!["hello", "world"])
        );
        assert_eq!(
            call(&SPLIT, vec![Value::from("1,,2,"), Value::from(",")], kwargs! {}),
            Ok(list!["1", "", "2", ""])
        );
    }

    #[test]
    fn test_arity_is_checked() {
        assert!(matches!(
            call(&ABS, vec![], kwargs! {}),
            Err(CallError::Arity { .. })
        ));
        assert!(matches!(
            call(&DIVMOD, vec![Value::from(1)], kwargs! {}),
            Err(CallError::Arity { .. })
        ));
        let err = call(
            &SPLIT,
            vec![Value::from("a"), Value::from(" "), Value::from(1)],
            kwargs! {},
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "split() takes 1 to 2 positional argument(s) but 3 were given"
        );
    }

    #[test]
    fn test_split_rejects_keyword_separator() {
        let err = call(&SPLIT, vec![Value::from(",1")], kwargs! { "sep" => "," }).unwrap_err();
        assert!(matches!(err, CallError::UnexpectedKeyword { .. }));
    }

    #[test]
    fn test_describe_bindings() {
        assert_eq!(
            call(&Describe, vec![Value::from(1)], kwargs! {}),
            Ok(Value::from("a = 1 b = b args = () kw = {}"))
        );
        assert_eq!(
            call(&Describe, vec![Value::from(1)], kwargs! { "b" => 2 }),
            Ok(Value::from("a = 1 b = 2 args = () kw = {}"))
        );
        assert_eq!(
            call(
                &Describe,
                vec![Value::from(1), Value::from(2), Value::from("a"), Value::from("b")],
                kwargs! { "x" => 99 }
            ),
            Ok(Value::from(r#"a = 1 b = 2 args = ("a", "b") kw = {"x": 99}"#))
        );
    }

    #[test]
    fn test_describe_requires_a() {
        assert!(matches!(
            call(&Describe, vec![], kwargs! { "x" => 99 }),
            Err(CallError::Arity { .. })
        ));
    }
}
