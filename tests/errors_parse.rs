mod common;

use common::{check_source, run_source_expect_failure};

#[test]
fn unknown_statement_suggests_a_close_typo() {
    let (_, stderr) = run_source_expect_failure("sya \"hi\"\n");
    assert!(stderr.contains("did you mean"));
}

#[test]
fn missing_closer_names_the_expected_closer() {
    let (_, stderr) = run_source_expect_failure("if 1 is 1 then\nsay \"hi\"\n");
    assert!(stderr.contains("missing its closer"));
}

#[test]
fn unexpected_closer_at_top_level_is_an_error() {
    let (_, stderr) = run_source_expect_failure("end if\n");
    assert!(stderr.contains("unexpected"));
}

#[test]
fn mixed_param_styles_are_rejected() {
    let src = "define f with a, b and c\nreturn a\nend define\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(stderr.contains("mixes comma") || stderr.contains("mixed"));
}

#[test]
fn well_formed_programs_pass_check() {
    assert!(check_source("set x to 1\nsay x\n"));
}

#[test]
fn malformed_programs_fail_check_without_running() {
    assert!(!check_source("sya \"hi\"\n"));
}

#[test]
fn parse_error_points_at_the_correct_line() {
    let src = "say \"ok\"\nsay \"still ok\"\nsya \"broken\"\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(stderr.contains('3'));
}

#[test]
fn mismatched_closer_is_reported_at_its_own_line_not_the_opener_line() {
    let src = "if 1 is 1 then\nsay \"hi\"\nend define\n";
    let (_, stderr) = run_source_expect_failure(src);
    assert!(stderr.contains("unexpected"));
    assert!(stderr.contains("end define"));
    assert!(stderr.contains('3'));
}
