mod common;

use common::run_source;

#[test]
fn otherwise_if_chain_picks_matching_branch() {
    let src = "set score to 85\nif score is at least 90 then\nsay \"A\"\notherwise if score is at least 80 then\nsay \"B\"\notherwise\nsay \"C\"\nend if\n";
    assert_eq!(run_source(src), "B\n");
}

#[test]
fn only_one_branch_runs_even_when_multiple_conditions_are_true() {
    let src = "set x to 10\nif x is at least 0 then\nsay \"first\"\notherwise if x is at least 5 then\nsay \"second\"\nend if\n";
    assert_eq!(run_source(src), "first\n");
}

#[test]
fn otherwise_runs_when_no_branch_matches() {
    let src = "set x to -1\nif x is at least 0 then\nsay \"non-negative\"\notherwise\nsay \"negative\"\nend if\n";
    assert_eq!(run_source(src), "negative\n");
}

#[test]
fn when_then_is_an_alias_for_if_then() {
    let src = "set x to 1\nwhen x is 1 then\nsay \"one\"\nend if\n";
    assert_eq!(run_source(src), "one\n");
}
