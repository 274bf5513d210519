mod common;

use common::run_source;

#[test]
fn assign_and_say_arithmetic() {
    let out = run_source("set x to 10\nsay x + 5\n");
    assert_eq!(out, "15\n");
}

#[test]
fn say_string_concatenation() {
    let out = run_source("set name to \"world\"\nsay \"hello \" + name\n");
    assert_eq!(out, "hello world\n");
}

#[test]
fn put_and_let_assign_like_set() {
    let out = run_source("let x be 1\nput 2 into y\nsay x + y\n");
    assert_eq!(out, "3\n");
}

#[test]
fn multiply_and_divide_mutations() {
    let out = run_source("set x to 6\nmultiply x by 7\nsay x\ndivide x by 6\nsay x\n");
    assert_eq!(out, "42\n7\n");
}
