//! cairn: batch interpreter for the cairn stack language.
//!
//! Reads a program from a file (to end-of-file) or interactively from
//! stdin (to the `;;` terminator), runs the two front-end passes, and
//! either reports every static defect or executes the program. Program
//! output goes to stdout; diagnostics, faults, and debug dumps go to
//! stderr.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use cairn_core::error::{sort_for_report, Diagnostic};
use cairn_core::lexer::{self, RawToken, Source};
use cairn_core::parser::{self, Instr};
use cairn_eval::{Machine, RunError};

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Cairn stack language interpreter.
#[derive(Parser)]
#[command(name = "cairn", version, about = "Cairn stack language interpreter")]
struct Cli {
    /// Program file to run; reads the program from stdin when omitted
    /// (interactive input ends at a `;;` line)
    file: Option<PathBuf>,

    /// Dump the scanned token and instruction streams to stderr before
    /// the run
    #[arg(long)]
    debug: bool,

    /// Diagnostic output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let scanned = match &cli.file {
        Some(path) => match File::open(path) {
            Ok(file) => lexer::lex(BufReader::new(file), Source::File),
            Err(e) => {
                eprintln!("error: cannot open {}: {}", path.display(), e);
                return 1;
            }
        },
        None => lexer::lex(io::stdin().lock(), Source::Interactive),
    };
    let (tokens, mut diags) = match scanned {
        Ok(scanned) => scanned,
        Err(e) => {
            eprintln!("error: read failed: {e}");
            return 1;
        }
    };

    let (program, parse_diags) = parser::parse(&tokens);
    diags.extend(parse_diags);

    if cli.debug {
        dump_streams(&tokens, &program);
    }

    // Static defects gate execution entirely.
    if !diags.is_empty() {
        sort_for_report(&mut diags);
        report(&diags, cli.output);
        return 1;
    }

    match Machine::new(io::stdout().lock()).run(&program) {
        Ok(()) => 0,
        Err(RunError::Fault(fault)) => {
            report(&[fault], cli.output);
            1
        }
        Err(RunError::Io(e)) => {
            eprintln!("error: output failed: {e}");
            1
        }
    }
}

fn report(diags: &[Diagnostic], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for d in diags {
                eprintln!("{d}");
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = diags.iter().map(Diagnostic::to_json_value).collect();
            eprintln!("{}", serde_json::Value::Array(values));
        }
    }
}

fn dump_streams(tokens: &[RawToken], program: &[Instr]) {
    eprintln!("-- scanned tokens ({}) --", tokens.len());
    for token in tokens {
        eprintln!("  {token:?}");
    }
    eprintln!("-- instructions ({}) --", program.len());
    for instr in program {
        eprintln!("  {instr:?}");
    }
}
