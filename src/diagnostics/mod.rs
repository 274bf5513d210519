//! Error reporting: turns a [`crate::driver::CompileError`] into an
//! `ariadne` report printed to stderr, pointing at the offending line.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::driver::CompileError;
use plang::lexer::LexError;
use plang::parser::ParseError;
use plang::interpreter::RuntimeError;

/// Byte range of 1-based `line` within `source`, used as the label span.
fn line_byte_range(source: &str, line: usize) -> Range<usize> {
    let mut start = 0usize;
    for (idx, text) in source.split('\n').enumerate() {
        let line_no = idx + 1;
        let end = start + text.len();
        if line_no == line {
            return start..end.max(start);
        }
        start = end + 1;
    }
    let end = source.len();
    end.saturating_sub(1).max(0)..end
}

fn print_report(filename: &str, source: &str, line: usize, short_message: &str, label_message: &str, help: Option<&str>) {
    let span_range = line_byte_range(source, line);
    let mut report = Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(short_message)
        .with_label(Label::new((filename, span_range)).with_message(label_message).with_color(Color::Red));

    if let Some(help_message) = help {
        report = report.with_help(help_message);
    }

    if let Err(report_err) = report.finish().eprint((filename, Source::from(source))) {
        eprintln!("{filename}:{line}: {short_message}: {label_message}");
        if let Some(help_message) = help {
            eprintln!("help: {help_message}");
        }
        eprintln!("(failed to render detailed report: {report_err})");
    }
}

fn report_lex_error(filename: &str, source: &str, error: &LexError) {
    print_report(filename, source, error.line, "lexical error", &error.message, None);
}

fn report_parse_error(filename: &str, source: &str, error: &ParseError) {
    let help = error.suggestion.as_deref().map(|s| format!("did you mean '{s}'?"));
    print_report(filename, source, error.line, "parse error", &error.message, help.as_deref());
}

fn report_runtime_error(filename: &str, source: &str, error: &RuntimeError) {
    print_report(filename, source, error.line, "runtime error", &error.message, None);
}

/// Renders `error` against `source` (from `filename`) as a labelled report
/// on stderr.
pub fn report_error(filename: &str, source: &str, error: &CompileError) {
    match error {
        CompileError::Lexical(e) => report_lex_error(filename, source, e),
        CompileError::Parse(e) => report_parse_error(filename, source, e),
        CompileError::Runtime(e) => report_runtime_error(filename, source, e),
        CompileError::Io { path, source: io_err } => {
            eprintln!("error: failed to read '{path}': {io_err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_range_finds_middle_line() {
        let source = "aa\nbbb\ncccc";
        let range = line_byte_range(source, 2);
        assert_eq!(&source[range], "bbb");
    }

    #[test]
    fn line_range_finds_first_line() {
        let source = "aa\nbbb";
        let range = line_byte_range(source, 1);
        assert_eq!(&source[range], "aa");
    }
}
