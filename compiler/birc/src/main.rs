//! Bir interpreter CLI.

use bir_diagnostic::{Diagnostic, ErrorCode};
use birc::commands::{fail, lex_file, parse_file, run_file};

fn main() {
    birc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        fail(&Diagnostic::error(ErrorCode::E9001).with_message("missing script path"));
    };

    match command.as_str() {
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Bir {}", env!("CARGO_PKG_VERSION"));
        }
        "lex" | "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: bir {command} <file>");
                fail(&Diagnostic::error(ErrorCode::E9001).with_message("missing file path"));
            };
            if command == "lex" {
                lex_file(path);
            } else {
                parse_file(path);
            }
        }
        path => run_file(path),
    }
}

fn print_usage() {
    eprintln!("Bir interpreter");
    eprintln!();
    eprintln!("Usage: bir <script>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  <script>        Run a Bir script");
    eprintln!("  lex <file>      Tokenize and display tokens");
    eprintln!("  parse <file>    Parse and display a summary");
    eprintln!("  help            Show this help message");
    eprintln!("  version         Show version information");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  BIR_STDLIB      Directory searched by `use` (default: ./bir)");
    eprintln!("  BIR_LOG         Log filter, e.g. `bir_eval=debug` (falls back to RUST_LOG)");
    eprintln!("  BIR_LOG_TREE    Show logs as an indented span tree");
}
