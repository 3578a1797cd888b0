//! SPL command-line driver.

use splc::commands::{ast_file, check_file, explain_error, run_file, tokens_file};

fn main() {
    splc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let file_command: Option<fn(&str)> = match command {
        "run" => Some(run_file),
        "check" => Some(check_file),
        "ast" => Some(ast_file),
        "tokens" => Some(tokens_file),
        _ => None,
    };

    if let Some(handler) = file_command {
        let Some(path) = args.get(2) else {
            eprintln!("Usage: splc {command} <file.spl>");
            std::process::exit(1);
        };
        handler(path);
        return;
    }

    match command {
        "explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: splc explain <error-code>");
                std::process::exit(1);
            };
            explain_error(code);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("splc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("SPL interpreter");
    println!();
    println!("Usage: splc <command> [args]");
    println!();
    println!("Commands:");
    println!("  run <file>        Evaluate a file and print its value");
    println!("  check <file>      Lex, parse and resolve without running");
    println!("  ast <file>        Print the resolved syntax tree");
    println!("  tokens <file>     Print the token stream");
    println!("  explain <code>    Describe an error code");
    println!("  help              Show this message");
    println!("  version           Show the version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG          Enable tracing, e.g. RUST_LOG=spl_eval=trace");
    println!("  NO_COLOR          Disable colored diagnostics");
}
