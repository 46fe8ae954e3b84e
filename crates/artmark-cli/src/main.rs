//! artmark CLI - render, validate, and inspect article files
//!
//! Usage:
//!   amcli [OPTIONS] [COMMAND] <FILE>...
//!
//! Commands:
//!   render    Render hypertext and plain text (default)
//!   validate  Check documents for errors
//!   stats     Show document statistics
//!
//! Files are processed independently: a failing document does not abort
//! its siblings, but any failure makes the exit status nonzero.

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use artmark_core::{render, Document, EscapeHighlight, NodeKind, Parser, Rendered};
use serde::Serialize;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let mut failures = 0usize;
    for file in &config.files {
        if let Err(e) = run_file(file, &config) {
            eprintln!("error: {}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        Err(format!("{} of {} file(s) failed", failures, config.files.len()))
    } else {
        Ok(())
    }
}

fn run_file(file: &str, config: &Config) -> Result<(), String> {
    let input =
        fs::read_to_string(file).map_err(|e| format!("failed to read '{}': {}", file, e))?;

    let base_dir = Path::new(file).parent().unwrap_or_else(|| Path::new("."));
    let parser = Parser::new(file, base_dir);

    match config.command {
        Command::Render => cmd_render(&parser, &input, file, config),
        Command::Validate => cmd_validate(&parser, &input, file, config),
        Command::Stats => cmd_stats(&parser, &input, file),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    files: Vec<String>,
    format: OutputFormat,
    plain: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Render,
    Validate,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Render;
    let mut format = OutputFormat::Text;
    let mut plain = false;
    let mut files = Vec::new();

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("amcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-j" | "--json" => format = OutputFormat::Json,
            "-t" | "--txt" => plain = true,
            "render" => command = Command::Render,
            "validate" => command = Command::Validate,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => files.push(arg.clone()),
        }
        i += 1;
    }

    if files.is_empty() {
        return Err("no input files specified".to_string());
    }

    Ok(Config {
        command,
        files,
        format,
        plain,
    })
}

fn print_help() {
    eprintln!(
        r#"amcli - artmark article renderer and validator

USAGE:
    amcli [OPTIONS] [COMMAND] <FILE>...

COMMANDS:
    render      Render hypertext and plain text (default)
    validate    Check documents for errors without output
    stats       Show document statistics

OPTIONS:
    -t, --txt        Emit the plain-text form instead of hypertext
    -j, --json       Output in JSON format
    -h, --help       Print help information
    -V, --version    Print version information

EXAMPLES:
    amcli article.txt            Render an article to hypertext
    amcli -t article.txt         Render the plain-text form
    amcli -j article.txt         Render everything as JSON
    amcli validate a.txt b.txt   Validate a batch of articles
    amcli stats article.txt      Show document statistics
"#
    );
}

// =============================================================================
// Render Command
// =============================================================================

#[derive(Serialize)]
struct JsonRendered<'a> {
    file: &'a str,
    title: String,
    date: String,
    description: String,
    html: &'a str,
    text: &'a str,
}

fn cmd_render(parser: &Parser, input: &str, file: &str, config: &Config) -> Result<(), String> {
    let doc = parser.parse(input).map_err(|e| e.to_string())?;
    let out: Rendered = render(&doc, &EscapeHighlight);

    match config.format {
        OutputFormat::Json => {
            let highlighter = EscapeHighlight;
            let json = JsonRendered {
                file,
                title: doc.title().html(&highlighter),
                date: doc.date().html(&highlighter),
                description: doc.description().html(&highlighter),
                html: &out.html,
                text: &out.text,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?
            );
        }
        OutputFormat::Text => {
            if config.plain {
                print!("{}", out.text);
            } else {
                print!("{}", out.html);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &Parser, input: &str, file: &str, config: &Config) -> Result<(), String> {
    match parser.parse(input) {
        Ok(_) => {
            match config.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({"file": file, "valid": true, "error": null})
                ),
                OutputFormat::Text => println!("{}: OK", file),
            }
            Ok(())
        }
        Err(e) => {
            if matches!(config.format, OutputFormat::Json) {
                println!(
                    "{}",
                    serde_json::json!({
                        "file": file,
                        "valid": false,
                        "error": {
                            "message": e.message,
                            "line": e.line,
                            "structural": e.kind.is_structural(),
                        }
                    })
                );
            }
            Err(e.to_string())
        }
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &Parser, input: &str, file: &str) -> Result<(), String> {
    let doc = parser.parse(input).map_err(|e| e.to_string())?;
    let stats = DocumentStats::from_document(&doc, input);

    println!("Document Statistics: {}", file);
    println!("--------------------");
    println!("Title:        {}", doc.title().meta());
    println!("Date:         {}", doc.date().meta());
    println!();
    println!("Content:");
    println!("  Total nodes:    {}", stats.total_nodes);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  List items:     {}", stats.list_items);
    println!("  Tips:           {}", stats.tips);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

struct DocumentStats {
    total_nodes: usize,
    headings: usize,
    paragraphs: usize,
    code_blocks: usize,
    list_items: usize,
    tips: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_nodes: 0,
            headings: 0,
            paragraphs: 0,
            code_blocks: 0,
            list_items: 0,
            tips: 0,
            chars: input.len(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        };

        for node in doc.nodes() {
            stats.total_nodes += 1;
            match node.kind() {
                NodeKind::H1 | NodeKind::H2 | NodeKind::H3 => stats.headings += 1,
                NodeKind::Text => stats.paragraphs += 1,
                NodeKind::CppCode | NodeKind::AsmCode | NodeKind::Code => stats.code_blocks += 1,
                NodeKind::ListItem => stats.list_items += 1,
                NodeKind::Tip => stats.tips += 1,
                _ => {}
            }
        }

        stats
    }
}
