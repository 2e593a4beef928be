//! The line loop: one fresh interpreter per non-empty line, the result of
//! each written on its own line. The first line that fails to evaluate
//! ends the loop with an error; there is no per-line recovery.

use std::{
    fmt,
    io::{self, BufRead, Write},
};

use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    interpreter::{self, Interpreter, Value},
    lexer::Dialect,
};

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub dialect: Dialect,
    /// Written before every line is read. `None` disables prompting.
    pub prompt: Option<String>,
    pub dump_tokens: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            prompt: Some("calc> ".to_owned()),
            dump_tokens: false,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// Line `line` (1-based) is not a valid expression.
    Eval {
        line: usize,
        source: interpreter::Error,
    },
    Io(io::Error),
    Readline(ReadlineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Eval { line, source } => write!(f, "line {line}: {source}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Readline(err) => write!(f, "line editor error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Error::Readline(err)
    }
}

/// Evaluate one line. Empty lines are skipped and produce no value.
fn evaluate_line(
    text: &str,
    line: usize,
    config: &ReplConfig,
) -> Result<Option<Value>, Error> {
    if text.is_empty() {
        debug!("skipping empty line {line}");
        return Ok(None);
    }
    Interpreter::new(text, config.dialect)
        .dump_tokens(config.dump_tokens)
        .expr()
        .map(Some)
        .map_err(|source| Error::Eval { line, source })
}

/// Run the loop over buffered `input` until it is exhausted, writing the
/// prompt and results to `output`.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: &ReplConfig,
) -> Result<(), Error> {
    let mut lines = input.lines();
    let mut line = 0;
    loop {
        if let Some(prompt) = &config.prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }
        let Some(text) = lines.next().transpose()? else {
            break;
        };
        line += 1;
        if let Some(value) = evaluate_line(&text, line, config)? {
            writeln!(output, "{value}")?;
        }
    }
    debug!("end of input after {line} lines");
    Ok(())
}

/// Run the loop on the terminal through a line editor with history.
/// Ctrl-D and Ctrl-C both end the session cleanly.
pub fn interactive(config: &ReplConfig) -> Result<(), Error> {
    let mut editor = DefaultEditor::new()?;
    let prompt = config.prompt.as_deref().unwrap_or_default();
    let mut line = 0;
    loop {
        let text = match editor.readline(prompt) {
            Ok(text) => text,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        };
        line += 1;
        if !text.is_empty() {
            editor.add_history_entry(text.as_str()).ok();
        }
        if let Some(value) = evaluate_line(&text, line, config)? {
            println!("{value}");
        }
    }
    debug!("session ended after {line} lines");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexError;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn quiet(dialect: Dialect) -> ReplConfig {
        ReplConfig {
            dialect,
            prompt: None,
            dump_tokens: false,
        }
    }

    fn run_to_string(input: &str, config: &ReplConfig) -> (Result<(), Error>, String) {
        let mut output = Vec::new();
        let result = run(input.as_bytes(), &mut output, config);
        (result, String::from_utf8(output).expect("output is utf-8"))
    }

    #[test]
    fn prints_one_result_per_line() {
        let input = indoc! {"
            3+5
            10 - 4
            3-5
        "};
        let (result, output) = run_to_string(input, &quiet(Dialect::Extended));
        assert!(result.is_ok());
        assert_eq!("8\n6\n-2\n", output);
    }

    #[test]
    fn skips_empty_lines() {
        let input = "\n1+1\n\n\n2+2\n";
        let (result, output) = run_to_string(input, &quiet(Dialect::Extended));
        assert!(result.is_ok());
        assert_eq!("2\n4\n", output);
    }

    #[test]
    fn empty_input_produces_nothing() {
        let (result, output) = run_to_string("", &quiet(Dialect::Extended));
        assert!(result.is_ok());
        assert_eq!("", output);
    }

    #[test]
    fn accepts_windows_line_endings_and_missing_final_newline() {
        let (result, output) = run_to_string("1+2\r\n3+4", &quiet(Dialect::Extended));
        assert!(result.is_ok());
        assert_eq!("3\n7\n", output);
    }

    #[test]
    fn prompts_before_every_read() {
        let config = ReplConfig {
            dialect: Dialect::Extended,
            ..Default::default()
        };
        let (result, output) = run_to_string("1+1\n\n", &config);
        assert!(result.is_ok());
        assert_eq!("calc> 2\ncalc> calc> ", output);
    }

    #[test]
    fn stops_at_first_invalid_line() {
        let input = indoc! {"
            1+1
            2*2
            3+3
        "};
        let (result, output) = run_to_string(input, &quiet(Dialect::Extended));
        assert_eq!("2\n", output);
        match result {
            Err(Error::Eval {
                line: 2,
                source:
                    interpreter::Error::Lex(LexError::UnexpectedCharacter {
                        found: '*',
                        offset: 1,
                    }),
            }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_line_is_evaluated() {
        let (result, output) = run_to_string("  \n", &quiet(Dialect::Extended));
        assert_eq!("", output);
        assert!(matches!(
            result,
            Err(Error::Eval {
                line: 1,
                source: interpreter::Error::Parse(_)
            })
        ));
    }

    #[test]
    fn classic_dialect_rejects_wide_operands() {
        let input = indoc! {"
            3+5
            12+3
        "};
        let (result, output) = run_to_string(input, &quiet(Dialect::Classic));
        assert_eq!("8\n", output);
        assert!(matches!(
            result,
            Err(Error::Eval {
                line: 2,
                source: interpreter::Error::Parse(_)
            })
        ));
    }

    #[test]
    fn error_names_the_line() {
        let (result, _) = run_to_string("1+\n", &quiet(Dialect::Extended));
        assert_eq!(
            "line 1: error parsing input: expected an integer, found Token(EOF, None) at offset 2",
            result.unwrap_err().to_string()
        );
    }
}
