//! camlerr CLI
//!
//! `ocamlfind ocamlopt ... 2>&1 | camlerr`

use std::io::{self, IsTerminal};

use camlerr::{init_tracing, parse_args, run, Command};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Version) => {
            println!("camlerr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Run 'camlerr --help' for usage.");
            std::process::exit(2);
        }
    };

    let input = match io::read_to_string(io::stdin()) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: failed to read stdin: {err}");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let mut out = stdout.lock();
    if let Err(err) = run(&input, &options, &mut out, is_tty) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("camlerr - legible OCaml type errors");
    println!();
    println!("Usage: camlerr [options] < compiler-output.txt");
    println!();
    println!("Options:");
    println!("  --format=<fmt>       Output format: terminal, json (default: terminal)");
    println!("  --color=<mode>       Color: auto, always, never (default: auto)");
    println!("  -k, --keep-going     Skip blocks that fail to parse instead of aborting");
    println!("  --dialect=<name>     Compiler wording (default: ocaml-4)");
    println!("  --no-relative-paths  Show paths exactly as the compiler printed them");
    println!("  -h, --help           Show this help");
    println!("  -V, --version        Show version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable debug logging on stderr (e.g. camlerr_diagnostic=debug)");
}
