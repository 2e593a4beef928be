mod interpreter;
mod lexer;
mod options;
mod repl;
mod utils;

use std::io::{self, Cursor, IsTerminal};

use anyhow::Context;
use log::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = options::parse_args();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if !args.exprs.is_empty() {
        let config = args.repl_config(false);
        debug!("evaluating {} expressions from the command line", args.exprs.len());
        let input = Cursor::new(args.exprs.join("\n"));
        return repl::run(input, io::stdout().lock(), &config)
            .context("while evaluating command line expressions");
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl::interactive(&args.repl_config(true)).context("while reading from the terminal")
    } else {
        repl::run(stdin.lock(), io::stdout().lock(), &args.repl_config(true))
            .context("while reading standard input")
    }
}
