mod common;

use common::run_source;

fn assert_same(a: &str, b: &str) {
    assert_eq!(run_source(a), run_source(b), "alias pair produced different output:\n{a}\n---\n{b}");
}

#[test]
fn set_let_put_are_equivalent() {
    assert_same("set x to 5\nsay x\n", "let x be 5\nsay x\n");
    assert_same("set x to 5\nsay x\n", "put 5 into x\nsay x\n");
}

#[test]
fn say_print_show_are_equivalent() {
    assert_same("say \"hi\"\n", "print \"hi\"\n");
    assert_same("say \"hi\"\n", "show \"hi\"\n");
}

#[test]
fn add_increase_are_equivalent() {
    assert_same(
        "set x to 1\nadd 2 to x\nsay x\n",
        "set x to 1\nincrease x by 2\nsay x\n",
    );
}

#[test]
fn subtract_decrease_are_equivalent() {
    assert_same(
        "set x to 10\nsubtract 3 from x\nsay x\n",
        "set x to 10\ndecrease x by 3\nsay x\n",
    );
}

#[test]
fn create_list_make_list_are_equivalent() {
    assert_same(
        "create list nums\nadd 1 to nums\nsay nums\n",
        "make list nums\nadd 1 to nums\nsay nums\n",
    );
}

#[test]
fn remove_take_are_equivalent() {
    assert_same(
        "create list nums\nadd 1 to nums\nadd 2 to nums\nremove 1 from nums\nsay nums\n",
        "create list nums\nadd 1 to nums\nadd 2 to nums\ntake 1 from nums\nsay nums\n",
    );
}

#[test]
fn if_when_are_equivalent() {
    assert_same(
        "if 1 is 1 then\nsay \"yes\"\nend if\n",
        "when 1 is 1 then\nsay \"yes\"\nend if\n",
    );
}

#[test]
fn otherwise_if_or_if_are_equivalent() {
    let a = "if 1 is 2 then\nsay \"a\"\notherwise if 1 is 1 then\nsay \"b\"\nend if\n";
    let b = "if 1 is 2 then\nsay \"a\"\nor if 1 is 1 then\nsay \"b\"\nend if\n";
    assert_same(a, b);
}

#[test]
fn otherwise_else_are_equivalent() {
    let a = "if 1 is 2 then\nsay \"a\"\notherwise\nsay \"b\"\nend if\n";
    let b = "if 1 is 2 then\nsay \"a\"\nelse\nsay \"b\"\nend if\n";
    assert_same(a, b);
}

#[test]
fn for_each_for_every_are_equivalent() {
    assert_same(
        "for each n in [1, 2]\nsay n\nend for\n",
        "for every n in [1, 2]\nsay n\nend for\n",
    );
}

#[test]
fn define_function_are_equivalent() {
    assert_same(
        "define f with n\nreturn n\nend define\nsay call f with 1\n",
        "function f with n\nreturn n\nend define\nsay call f with 1\n",
    );
}

#[test]
fn end_define_end_function_finish_function_are_equivalent() {
    let results = [
        "define f with n\nreturn n\nend define\nsay call f with 1\n",
        "define f with n\nreturn n\nend function\nsay call f with 1\n",
        "define f with n\nreturn n\nfinish function\nsay call f with 1\n",
    ]
    .map(run_source);
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn return_give_back_are_equivalent() {
    assert_same(
        "define f\nreturn 7\nend define\nsay call f\n",
        "define f\ngive back 7\nend define\nsay call f\n",
    );
}

#[test]
fn call_run_are_equivalent_as_statements() {
    assert_same(
        "define f with n\nsay n\nend define\ncall f with 1\n",
        "define f with n\nsay n\nend define\nrun f with 1\n",
    );
}
