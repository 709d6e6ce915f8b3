//! Case normalization: turns one raw `(args, expected)` or
//! `(args, kwargs, expected)` sequence into an [`Invocation`] plus the
//! expected value.

use crate::callable::Invocation;
use crate::error::CaseError;
use crate::value::Value;
use std::fmt;

/// One test case exactly as the caller wrote it.
///
/// Well-formed cases hold two or three elements. Any other length is kept
/// as-is so it can be reported as malformed instead of rejected at compile
/// time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCase(pub Vec<Value>);

impl RawCase {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RawCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::List(self.0.clone()).repr())
    }
}

impl From<Vec<Value>> for RawCase {
    fn from(items: Vec<Value>) -> Self {
        RawCase(items)
    }
}

impl<A, E> From<(A, E)> for RawCase
where
    A: Into<Value>,
    E: Into<Value>,
{
    fn from((args, expected): (A, E)) -> Self {
        RawCase(vec![args.into(), expected.into()])
    }
}

impl<A, K, E> From<(A, K, E)> for RawCase
where
    A: Into<Value>,
    K: Into<Value>,
    E: Into<Value>,
{
    fn from((args, kwargs, expected): (A, K, E)) -> Self {
        RawCase(vec![args.into(), kwargs.into(), expected.into()])
    }
}

/// A case ready to be invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCase {
    pub invocation: Invocation,
    pub expected: Value,
}

/// Interprets `case` under the batch's unpack policy.
///
/// Only a [`Value::Args`] in the argument slot is spread into several
/// positional arguments, and only when `unpack` is set. With `unpack` off
/// it is passed through as a single tuple; any other value is always
/// exactly one argument.
pub fn normalize(case: &RawCase, unpack: bool) -> Result<NormalizedCase, CaseError> {
    let (raw_args, kwargs, expected) = match case.0.as_slice() {
        [args, expected] => (args, Default::default(), expected),
        [args, Value::Map(kwargs), expected] => (args, kwargs.clone(), expected),
        [_, other, _] => {
            return Err(CaseError::MalformedCase {
                case: case.to_string(),
                reason: format!("keyword arguments must be a map, found {}", other.type_name()),
            })
        }
        items => {
            return Err(CaseError::MalformedCase {
                case: case.to_string(),
                reason: format!("expected 2 or 3 elements, found {}", items.len()),
            })
        }
    };

    let args = match raw_args {
        Value::Args(items) if unpack => items.clone(),
        Value::Args(items) => vec![Value::Tuple(items.clone())],
        single => vec![single.clone()],
    };

    Ok(NormalizedCase {
        invocation: Invocation::new(args, kwargs),
        expected: expected.clone(),
    })
}
