// ctree: C89 parser producing concrete parse trees

mod parser;

use std::fs;
use std::path::Path;

use parser::lexer::lex;
use parser::parse::Parser;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("ctree");

    let mut tokens_only = false;
    let mut file = None;
    for arg in &args[1..] {
        if arg == "--tokens" {
            tokens_only = true;
        } else {
            file = Some(arg.clone());
        }
    }

    let Some(file) = file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} [--tokens] <file.c>", program_name);
        eprintln!();
        eprintln!("Prints the concrete parse tree of a C89 translation unit,");
        eprintln!("or the token stream with --tokens.");
        std::process::exit(1);
    };

    if !Path::new(&file).exists() {
        eprintln!("Error: File '{}' not found", file);
        eprintln!("Usage: {} [--tokens] <file.c>", program_name);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(&file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", file, e);
            std::process::exit(1);
        }
    };

    if tokens_only {
        match lex(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}", token);
                }
            }
            Err(e) => {
                eprintln!("Lexer error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut parser = Parser::new(&source);
    match parser.parse() {
        Ok(tree) => print!("{}", tree),
        Err(e) => {
            eprintln!("Parser error: {}", e);
            std::process::exit(1);
        }
    }
}
