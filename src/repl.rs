//! Interactive REPL: reads statements from stdin, accumulating multi-line
//! blocks until their closer is seen, and runs each completed chunk against
//! a [`plang::interpreter::Interpreter`] whose global frame persists across
//! submissions.

use std::io::{self, BufRead, Write};

use plang::config::Config;
use plang::interpreter::{Flow, Interpreter, Value};

const HELP_TEXT: &str = "\
Meta-commands:
  :help        show this message
  :vars        list variables in the global scope
  :reset       clear all variables and start fresh
  :load <path> run the statements in a source file
  exit / quit  end the session";

fn first_word(line: &str) -> String {
    line.trim().split_whitespace().next().unwrap_or("").to_lowercase()
}

/// True for statement lines that open a new block and increase nesting
/// depth; mirrors [`crate::parser`]'s block openers without depending on
/// its internals.
fn opens_block(line: &str) -> bool {
    matches!(
        first_word(line).as_str(),
        "if" | "when" | "repeat" | "do" | "while" | "for" | "define" | "function"
    )
}

/// True for closer lines (and their aliases); decreases nesting depth.
/// `otherwise`/`otherwise if`/`else`/`or if` are mid-block continuations and
/// deliberately excluded, since they don't change nesting.
fn closes_block(line: &str) -> bool {
    let trimmed = line.trim().to_lowercase();
    trimmed.starts_with("end ") || trimmed.starts_with("finish ")
}

/// Runs the interactive REPL loop until `exit`/`quit`/EOF.
pub fn run(config: Config) -> io::Result<()> {
    println!("plang REPL — type :help for meta-commands, 'exit' to quit.");
    let stdin = io::stdin();
    let mut interp = Interpreter::new(config);
    let mut buffer = String::new();
    let mut depth: i32 = 0;

    loop {
        let prompt = if depth == 0 { ">>> " } else { "... " };
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            println!();
            break;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).to_string();

        if depth == 0 {
            let command = trimmed.trim();
            if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
                break;
            }
            if command.is_empty() {
                continue;
            }
            if let Some(rest) = command.strip_prefix(':') {
                handle_meta_command(rest, config, &mut interp, &mut buffer, &mut depth);
                continue;
            }
        }

        if opens_block(&trimmed) {
            depth += 1;
        } else if closes_block(&trimmed) {
            depth -= 1;
        }
        buffer.push_str(&trimmed);
        buffer.push('\n');

        if depth <= 0 {
            depth = 0;
            run_chunk(&mut interp, &buffer);
            buffer.clear();
        }
    }

    Ok(())
}

fn run_chunk(interp: &mut Interpreter, source: &str) {
    let program = match plang::parser::parse_source(source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("parse error: {err}");
            return;
        }
    };

    match interp.exec_block(&program) {
        Ok(Flow::Normal) => {}
        Ok(Flow::Return(_)) => eprintln!("runtime error: 'return' used outside a function"),
        Ok(Flow::Break) => eprintln!("runtime error: 'stop' used outside a loop"),
        Ok(Flow::Continue) => eprintln!("runtime error: 'skip' used outside a loop"),
        Err(err) => eprintln!("runtime error: {err}"),
    }
}

fn handle_meta_command(command: &str, config: Config, interp: &mut Interpreter, buffer: &mut String, depth: &mut i32) {
    let mut parts = command.trim().splitn(2, char::is_whitespace);
    match parts.next().unwrap_or("") {
        "help" => println!("{HELP_TEXT}"),
        "vars" => print_vars(interp),
        "reset" => {
            *interp = Interpreter::new(config);
            buffer.clear();
            *depth = 0;
            println!("environment reset");
        }
        "load" => {
            let path = parts.next().unwrap_or("").trim();
            if path.is_empty() {
                eprintln!(":load requires a file path");
                return;
            }
            match std::fs::read_to_string(path) {
                Ok(source) => run_chunk(interp, &source),
                Err(err) => eprintln!("failed to read '{path}': {err}"),
            }
        }
        other => eprintln!("unknown meta-command ':{other}' (try :help)"),
    }
}

fn print_vars(interp: &Interpreter) {
    let mut names: Vec<(String, Value)> = interp
        .env()
        .globals()
        .iter()
        .filter(|(k, _)| !plang::interpreter::builtins::is_builtin(k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    names.sort_by(|a, b| a.0.cmp(&b.0));
    if names.is_empty() {
        println!("(no variables)");
        return;
    }
    for (name, value) in names {
        println!("{name} = {}", value.display());
    }
}
