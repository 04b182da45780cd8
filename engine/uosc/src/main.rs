//! UOS script engine CLI.

use uosc::commands::{check_file, lex_file, parse_file, parse_run_options, run_files};
use uosc::{init_tracing, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let result = match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: uos run <file.uos>... [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --tick-ms=<ms>       Sleep between ticks (default 10)");
                eprintln!("  --min-loop-ms=<ms>   Minimum loop iteration time (default 25)");
                eprintln!("  --max-ticks=<n>      Give up after n ticks");
                eprintln!("  --isolate            Give every script its own namespace");
                std::process::exit(1);
            }
            parse_run_options(&args[2..]).and_then(|(options, paths)| {
                if paths.is_empty() {
                    return Err(CliError::NoScript);
                }
                run_files(&paths, &options)
            })
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: uos check <file.uos>...");
                std::process::exit(1);
            }
            check_all(&args[2..])
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: uos parse <file.uos>");
                std::process::exit(1);
            }
            parse_file(&args[2])
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: uos lex <file.uos>");
                std::process::exit(1);
            }
            lex_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("UOS script engine {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // A bare script path runs it with default options.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("uos"))
            {
                parse_run_options(&args[1..])
                    .and_then(|(options, paths)| run_files(&paths, &options))
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Check each file, reporting all of them before failing.
fn check_all(paths: &[String]) -> Result<(), CliError> {
    let mut failed = 0;
    for path in paths {
        match check_file(path) {
            Ok(statements) => println!("{path}: ok ({statements} statements)"),
            Err(err) => {
                eprintln!("{err}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(CliError::ScriptsFailed {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

fn print_usage() {
    println!("UOS script engine");
    println!();
    println!("Usage: uos <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.uos>...    Run scripts side by side until they stop");
    println!("  check <file.uos>...  Parse scripts without running them");
    println!("  parse <file.uos>     Parse and display the syntax tree");
    println!("  lex <file.uos>       Tokenize and display statements");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Logging: set UOS_LOG (or RUST_LOG), e.g. UOS_LOG=uos_eval=debug.");
    println!("UOS_LOG_TREE=1 prints nested spans as a tree.");
}
