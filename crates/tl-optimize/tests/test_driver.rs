mod support;

use pretty_assertions::assert_eq;
use support::go::{function, print_function, print_go, transform};
use tl_optimize::{FunctionOutcome, Optimizer, SkipReason};

const MIXED: &str = r#"package main

import "fmt"

// Double is not recursive.
func Double(x int) int {
	return x * 2
}

func Sum(n, acc int) int {
	if n == 0 {
		return acc
	}
	return Sum(n-1, acc+n)
}

func main() {
	fmt.Println(Sum(10, 0), Double(4))
}
"#;

const NEAR_MISSES: &str = r#"package main

func Count(n int) int {
	x := n
	if x == 0 {
		return 0
	}
	return Count(x - 1)
}

func Fact(n int) int {
	if n == 0 {
		return 1
	}
	return n * Fact(n-1)
}

func Log(n int) int {
	if n == 0 {
		println("done")
		return 0
	}
	return Log(n - 1)
}

func external(x int) int

func (c *Counter) Next(n int) int {
	if n == 0 {
		return c.value
	}
	return c.Next(n - 1)
}
"#;

#[test]
fn only_the_matching_function_changes() {
    let (original, rewritten, report) = transform(MIXED);

    assert_eq!(
        report.outcome("Double"),
        Some(FunctionOutcome::Skipped(SkipReason::NoTailCall))
    );
    assert_eq!(report.outcome("Sum"), Some(FunctionOutcome::Rewritten));
    assert_eq!(
        report.outcome("main"),
        Some(FunctionOutcome::Skipped(SkipReason::NoTailCall))
    );

    for name in ["Double", "main"] {
        assert_eq!(function(&original, name), function(&rewritten, name));
        assert_eq!(
            print_function(function(&original, name)),
            print_function(function(&rewritten, name))
        );
    }
    assert_ne!(function(&original, "Sum"), function(&rewritten, "Sum"));
}

#[test]
fn whole_file_output() {
    let (_, rewritten, _) = transform(MIXED);
    let expected = r#"package main

import "fmt"

// Double is not recursive.
func Double(x int) int {
	return x * 2
}

func Sum(n, acc int) int {
	for n != 0 {
		tmpn := n-1
		tmpacc := acc+n
		n, acc = tmpn, tmpacc
	}
	return acc
}

func main() {
	fmt.Println(Sum(10, 0), Double(4))
}
"#;
    assert_eq!(print_go(&rewritten), expected);
}

#[test]
fn near_misses_pass_through_untouched() {
    let (original, rewritten, report) = transform(NEAR_MISSES);

    assert_eq!(rewritten, original);
    assert_eq!(print_go(&rewritten), print_go(&original));
    assert_eq!(
        report.functions.iter().map(|(name, outcome)| (name.as_str(), *outcome)).collect::<Vec<_>>(),
        vec![
            ("Count", FunctionOutcome::Skipped(SkipReason::NoGuard)),
            ("Fact", FunctionOutcome::Skipped(SkipReason::NoTailCall)),
            ("Log", FunctionOutcome::Skipped(SkipReason::NoBaseReturn)),
            ("external", FunctionOutcome::Skipped(SkipReason::EmptyBody)),
            ("Next", FunctionOutcome::Skipped(SkipReason::NoTailCall)),
        ]
    );
}

#[test]
fn functions_are_reported_in_source_order() {
    let (_, _, report) = transform(MIXED);
    let names: Vec<_> = report.functions.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Double", "Sum", "main"]);
    assert_eq!(report.pass, "tail_recursion");
}

#[test]
fn optimizer_runs_the_default_pipeline() {
    let (original, _, _) = transform(MIXED);
    let mut unit = original.clone();
    let reports = Optimizer::default().optimize_unit(&mut unit).unwrap();

    assert_eq!(reports.len(), 1);
    let rewritten: Vec<_> = reports[0].rewritten().map(|name| name.as_str()).collect();
    assert_eq!(rewritten, vec!["Sum"]);
    assert_eq!(print_go(&unit), print_go(&transform(MIXED).1));
}

#[test]
fn skipped_functions_keep_their_comments_and_layout() {
    let source = r#"package main

// Copy is not recursive.
func Copy(x int /* n */, y int) int {
	z := x + y // sum

	// twice
	return z + z
}
"#;
    let (_, rewritten, report) = transform(source);
    assert_eq!(
        report.outcome("Copy"),
        Some(FunctionOutcome::Skipped(SkipReason::NoTailCall))
    );
    assert_eq!(print_go(&rewritten), source);
}
