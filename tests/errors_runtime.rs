mod common;

use common::run_source_expect_failure;

#[test]
fn stop_at_top_level_is_a_runtime_error() {
    let (stdout, stderr) = run_source_expect_failure("say \"before\"\nstop\nsay \"after\"\n");
    assert_eq!(stdout, "before\n");
    assert!(stderr.to_lowercase().contains("stop"));
    assert!(stderr.to_lowercase().contains("outside a loop"));
}

#[test]
fn skip_at_top_level_is_a_runtime_error() {
    let (_, stderr) = run_source_expect_failure("skip\n");
    assert!(stderr.to_lowercase().contains("skip"));
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    let (_, stderr) = run_source_expect_failure("say missing_name\n");
    assert!(stderr.contains("undefined variable"));
}

#[test]
fn repeat_with_a_float_count_is_a_type_mismatch() {
    let (_, stderr) = run_source_expect_failure("repeat 2.5 times\nsay \"x\"\nend repeat\n");
    assert!(stderr.contains("must be an integer"));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let (_, stderr) = run_source_expect_failure("set x to 1\ndivide x by 0\n");
    assert!(stderr.contains("division by zero"));
}

#[test]
fn min_of_an_empty_list_is_a_runtime_error_not_a_panic() {
    let src = "create list nums\nsay min(nums)\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(stderr.contains("empty"));
}

#[test]
fn bad_index_is_a_runtime_error() {
    let src = "create list nums\nadd 1 to nums\nsay nums[5]\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(!stderr.is_empty());
}

#[test]
fn runtime_error_points_at_the_correct_line() {
    let src = "say \"ok\"\nsay \"still ok\"\nsay missing_name\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(stderr.contains('3'));
}

#[test]
fn no_statement_after_the_failing_one_runs() {
    let src = "say \"first\"\nsay missing_name\nsay \"never\"\n";
    let (stdout, _) = run_source_expect_failure(src);
    assert_eq!(stdout, "first\n");
}
