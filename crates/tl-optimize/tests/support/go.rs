use tl_core::ast::{AstSerializer, FunctionDeclaration, SourceUnit};
use tl_golang::{GoParser, GoSerializer};
use tl_optimize::{OptimizePass, PassReport, TailRecursionPass};

pub fn parse_go(source: &str) -> SourceUnit {
    GoParser::default()
        .parse_str(source)
        .expect("test source should parse")
}

pub fn print_go(unit: &SourceUnit) -> String {
    GoSerializer::default()
        .serialize_unit(unit)
        .expect("serialize should succeed")
}

pub fn print_function(func: &FunctionDeclaration) -> String {
    GoSerializer::default()
        .serialize_function(func)
        .expect("serialize should succeed")
}

/// Parses `source` and runs the tail-recursion pass over it.
pub fn transform(source: &str) -> (SourceUnit, SourceUnit, PassReport) {
    let original = parse_go(source);
    let mut rewritten = original.clone();
    let report = TailRecursionPass::default()
        .optimize_unit(&mut rewritten)
        .expect("pass never fails");
    (original, rewritten, report)
}

pub fn function<'a>(unit: &'a SourceUnit, name: &str) -> &'a FunctionDeclaration {
    unit.function(name)
        .unwrap_or_else(|| panic!("function {name} should exist"))
}
