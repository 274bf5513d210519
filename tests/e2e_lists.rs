mod common;

use common::run_source;

#[test]
fn create_add_remove_list() {
    let out = run_source("create list nums\nadd 5 to nums\nadd 8 to nums\nremove 5 from nums\nsay nums\n");
    assert_eq!(out, "[8]\n");
}

#[test]
fn for_each_over_list() {
    let out = run_source("create list nums\nadd 1 to nums\nadd 2 to nums\nadd 3 to nums\nfor each n in nums\nsay n\nend for\n");
    assert_eq!(out, "1\n2\n3\n");
}

#[test]
fn for_each_over_string_iterates_characters() {
    let out = run_source("for each c in \"ab\"\nsay c\nend for\n");
    assert_eq!(out, "a\nb\n");
}

#[test]
fn remove_missing_value_is_runtime_error() {
    let (_, stderr) = common::run_source_expect_failure("create list nums\nadd 1 to nums\nremove 9 from nums\n");
    assert!(stderr.contains("not found"));
}
