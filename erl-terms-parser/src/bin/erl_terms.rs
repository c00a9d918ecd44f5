//! Command-line interface for the term compiler.
//!
//! A developer tool for trying out term text: parse and re-render terms,
//! decompose call expressions, run the formatter, and match patterns.
//! Set `RUST_LOG=trace` to see parser and matcher decisions.

use clap::{Parser as ClapParser, Subcommand};
use erl_terms_parser::{format, parse, parse_all, parse_mfa};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses terms and prints them back in canonical form
    Parse {
        /// Term text; all terms in the file if `--file` is given
        text: Option<String>,
        /// Input file with terms separated by `.`
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Also print the kind of each term
        #[arg(short, long)]
        kind: bool,
    },
    /// Parses a `Module:Function(Args)` call
    Mfa {
        /// Call text
        text: String,
    },
    /// Formats term arguments with an `io:format`-style string
    Format {
        /// Format string
        fmt: String,
        /// Arguments, each in term syntax
        args: Vec<String>,
    },
    /// Matches a subject against a pattern and prints the bindings
    Match {
        /// Pattern, may contain variables
        pattern: String,
        /// Subject term
        subject: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse { text, file, kind } => {
            let input = match (file, text) {
                (Some(path), _) => fs::read_to_string(path)?,
                (None, Some(text)) => text,
                (None, None) => return Err("either a term or --file is required".into()),
            };
            for term in parse_all(&input)? {
                if kind {
                    println!("{} : {}", term, term.kind());
                } else {
                    println!("{term}.");
                }
            }
        }
        Commands::Mfa { text } => {
            let mfa = parse_mfa(&text)?;
            println!("module:   {}", mfa.module);
            println!("function: {}", mfa.function);
            println!("args:     {}", mfa.args_list());
        }
        Commands::Format { fmt, args } => {
            let args = args
                .iter()
                .map(|a| parse(a))
                .collect::<Result<Vec<_>, _>>()?;
            print!("{}", format(&fmt, &args)?);
        }
        Commands::Match { pattern, subject } => {
            let pattern = parse(&pattern)?;
            let subject = parse(&subject)?;
            match pattern.match_term(&subject) {
                Some(binding) if binding.is_empty() => println!("match"),
                Some(binding) => println!("{binding}"),
                None => {
                    println!("no match");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
