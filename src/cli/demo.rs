//! Demo batches showing each case shape the runner understands.

use crate::builtins::{Describe, ABS, DIVMOD, SPLIT};
use crate::case::RawCase;
use crate::runner::{BatchOptions, TestRunner};
use crate::value::Value;
use crate::{args, kwargs, list, tuple};

pub fn run_demo(runner: &mut TestRunner) {
    runner.run_batch(
        &ABS,
        [(1, 1), (-2, 2)],
        &BatchOptions::default().summary("one argument and one return value"),
    );

    runner.run_batch(&ABS, [(-1, -1)], &BatchOptions::default().summary("failed test"));

    runner.run_batch(
        &DIVMOD,
        [(args![10, 3], tuple![3, 1]), (args![10, 5], tuple![2, 0])],
        &BatchOptions::default().summary("two arguments and two return values"),
    );

    runner.run_batch(
        &SPLIT,
        [("hello world", list!["hello", "world"])],
        &BatchOptions::default().summary("return a list"),
    );

    // The second case errors: split takes its separator positionally only.
    runner.run_batch(
        &SPLIT,
        [
            RawCase::from((args!["1,,2,", ","], list!["1", "", "2", ""])),
            RawCase::from((",1,,2,", kwargs! { "sep" => "," }, list!["1", "", "2"])),
        ],
        &BatchOptions::default().summary("two arguments and return a list"),
    );

    runner.run_batch(
        &Describe,
        [
            RawCase::from((1, "a = 1 b = b args = () kw = {}")),
            RawCase::from((args![1, 2], "a = 1 b = 2 args = () kw = {}")),
            RawCase::from((1, kwargs! { "b" => 2 }, "a = 1 b = 2 args = () kw = {}")),
            RawCase::from((
                args![1, 2, "a", "b"],
                r#"a = 1 b = 2 args = ("a", "b") kw = {}"#,
            )),
            RawCase::from((
                args![1, 2, "a", "b"],
                kwargs! { "x" => 99 },
                r#"a = 1 b = 2 args = ("a", "b") kw = {"x": 99}"#,
            )),
        ],
        &BatchOptions::default().summary("arbitrary arguments"),
    );

    runner.run_batch(
        &Describe,
        [(
            args![1, 2],
            kwargs! { "x" => 99 },
            r#"a = (1, 2) b = b args = () kw = {"x": 99}"#,
        )],
        &BatchOptions::default()
            .summary("pass a tuple as argument")
            .unpack(false),
    );

    runner.run_batch(
        &ABS,
        [
            RawCase::default(),
            RawCase(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c"),
                Value::from("d"),
            ]),
        ],
        &BatchOptions::default().summary("wrong test data"),
    );

    runner.run_batch(
        &Describe,
        [(args![], kwargs! { "x" => 99 }, r#"a = 1 b = b args = () kw = {"x": 99}"#)],
        &BatchOptions::default().summary("missing required argument"),
    );
}
