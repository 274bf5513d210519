mod common;

use common::{run_source, run_source_expect_failure, run_source_with_args};

#[test]
fn repeat_while_counts_up() {
    let src = "set x to 0\nrepeat while x is less than 3\nadd 1 to x\nsay x\nend repeat\n";
    assert_eq!(run_source(src), "1\n2\n3\n");
}

#[test]
fn repeat_n_times_is_an_alias_for_do_n_times() {
    let a = run_source("repeat 3 times\nsay \"a\"\nend repeat\n");
    let b = run_source("do 3 times\nsay \"a\"\nend repeat\n");
    assert_eq!(a, b);
    assert_eq!(a, "a\na\na\n");
}

#[test]
fn while_do_is_an_alias_for_repeat_while() {
    let a = run_source("set x to 0\nrepeat while x is less than 2\nadd 1 to x\nend repeat\nsay x\n");
    let b = run_source("set x to 0\nwhile x is less than 2 do\nadd 1 to x\nend repeat\nsay x\n");
    assert_eq!(a, b);
}

#[test]
fn stop_exits_the_loop_early() {
    let src = "set x to 0\nrepeat 5 times\nadd 1 to x\nif x is 2 then\nstop\nend if\nend repeat\nsay x\n";
    assert_eq!(run_source(src), "2\n");
}

#[test]
fn skip_continues_to_the_next_iteration() {
    let src = "create list seen\nfor each n in [1, 2, 3]\nif n is 2 then\nskip\nend if\nadd n to seen\nend for\nsay seen\n";
    assert_eq!(run_source(src), "[1, 3]\n");
}

#[test]
fn runaway_loop_is_rejected_before_further_statements_run() {
    let src = "repeat while 1 is at least 0\nsay \"spin\"\nend repeat\nsay \"never reached\"\n";
    let (stdout, stderr, success) =
        run_source_with_args(src, &["--max-loop-iterations", "50"]);
    assert!(!success);
    assert!(!stdout.contains("never reached"));
    assert!(stderr.contains("runaway_loop") || stderr.to_lowercase().contains("loop"));
}

#[test]
fn stop_outside_a_loop_is_a_runtime_error_mentioning_stop_and_loop() {
    let (_, stderr) = run_source_expect_failure("stop\n");
    assert!(stderr.to_lowercase().contains("stop"));
    assert!(stderr.to_lowercase().contains("loop"));
}
