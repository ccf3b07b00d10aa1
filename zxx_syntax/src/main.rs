use std::env;
use std::fs;
use std::path::Path;
use zxx_syntax::lexical::LexerError;
use zxx_syntax::utils::{SourceMap, Span};
use zxx_syntax::{file_processor, lexical, logging, pipeline};

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    tree: bool,
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.zxx> [--tree] [--json]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let input_path = Path::new(&args[1]);
    let options = parse_options(&args[2..]);

    if !input_path.is_file() {
        eprintln!("Error: Input must be a Zxx source file");
        eprintln!("  File: {}", input_path.display());
        std::process::exit(1);
    }

    if options.tree {
        print_tree(input_path, &options)?;
    } else {
        print_symbols(input_path, &options)?;
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("zxx-fast v{}", env!("CARGO_PKG_VERSION"));
    println!("Fast lexical pass over Zxx source files");
    println!();
    println!("USAGE:");
    println!("    {} <input.zxx> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help     Show this help message");
    println!("    --tree     Build the declaration tree instead of listing symbols");
    println!("    --json     Print output as JSON");
    println!();
    println!("OUTPUT:");
    println!("    Success: one symbol per line as LINE:COLUMN KIND \"TEXT\"");
    println!("    Failure: cargo-style excerpt pointing at the offending position");
    println!();
    println!("LIMITS:");
    println!(
        "    Max file size: {} bytes",
        file_processor::get_max_file_size()
    );
    println!("    {}", zxx_syntax::config::build_info::source_info());
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--tree" => options.tree = true,
            "--json" => options.json = true,
            _ => eprintln!("Warning: Unknown option '{}'", arg),
        }
    }

    options
}

fn print_symbols(path: &Path, options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let file_result = match file_processor::process_file(path) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            std::process::exit(1);
        }
    };

    match lexical::fast(&file_result.source) {
        Ok(symbols) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&symbols)?);
            } else {
                for symbol in &symbols {
                    println!("{}", symbol);
                }
            }
        }
        Err(error) => {
            eprint!("{}", render_lexer_error(&file_result.source, &error));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_tree(path: &Path, options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::process_file(path) {
        Ok(result) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&result.file)?);
                return Ok(());
            }

            for (id, node) in result.file.declarations() {
                let text = result.file.text_of(id).unwrap_or_default();
                println!("{:?} ({} symbols)", node.kind, node.symbols.len());
                for line in text.lines() {
                    println!("    {}", line);
                }
            }
            println!(
                "\n{} declarations, {} symbols, {:.2}ms",
                result.declaration_count(),
                result.symbol_count,
                result.processing_duration.as_secs_f64() * 1000.0
            );
        }
        Err(pipeline::PipelineError::LexicalAnalysis(error)) => {
            match fs::read(path) {
                Ok(source) => eprint!("{}", render_lexer_error(&source, &error)),
                Err(_) => eprintln!("\nFAILED: {}", error),
            }
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn render_lexer_error(source: &[u8], error: &LexerError) -> String {
    let map = SourceMap::new(source);
    let message = format!("[{}] {}", error.error_code(), error);
    map.format_error(&Span::single(error.position()), &message)
}
