use clap::{Parser, ValueEnum};

use crate::{lexer::Dialect, repl::ReplConfig};

/// Grammar versions selectable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// Single digit operands, `+` only, no whitespace
    Classic,
    /// Multi digit operands, `+` and `-`, whitespace between tokens
    Extended,
}

impl From<Grammar> for Dialect {
    fn from(grammar: Grammar) -> Self {
        match grammar {
            Grammar::Classic => Dialect::Classic,
            Grammar::Extended => Dialect::Extended,
        }
    }
}

/// Evaluate `INTEGER (+|-) INTEGER` expressions, one per line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ProgramArguments {
    /// Grammar version to accept
    #[arg(short, long, value_enum, default_value_t = Grammar::Extended)]
    pub grammar: Grammar,

    /// Output tokens as they are pulled by the evaluator
    #[arg(short, long, default_value = "false")]
    pub dump_tokens: bool,

    /// Prompt written before each line is read
    #[arg(short, long, default_value = "calc> ")]
    pub prompt: String,

    /// Do not write a prompt when reading from a pipe or file
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Evaluate these expressions instead of reading standard input
    #[arg(short, long = "expr", value_name = "EXPR")]
    pub exprs: Vec<String>,
}

impl ProgramArguments {
    /// Settings for the line loop. `prompting` is false when the prompt
    /// should be suppressed regardless of `--prompt`.
    pub fn repl_config(&self, prompting: bool) -> ReplConfig {
        ReplConfig {
            dialect: self.grammar.into(),
            prompt: (prompting && !self.quiet).then(|| self.prompt.clone()),
            dump_tokens: self.dump_tokens,
        }
    }
}

pub fn parse_args() -> ProgramArguments {
    ProgramArguments::parse()
}
