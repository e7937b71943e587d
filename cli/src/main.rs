mod html;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use compiler::{CompileOptions, Compiler, DiagnosticError, ValidationLevel};

const SUBCOMMANDS: &[&str] = &["compile", "test", "help"];

#[derive(Parser)]
#[command(name = "card", version, about = "Message card compiler")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a card document
    Compile(CompileArgs),

    /// Run .test.json fixture files
    Test(TestArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented node tree
    Tree,
    /// Output tree as JSON
    Json,
    /// Standalone HTML fragment
    Html,
}

#[derive(clap::Args)]
struct CompileArgs {
    /// JSON card file to compile
    file: String,

    /// Validation level: off, warning or error
    #[arg(long)]
    validate: Option<ValidationLevel>,

    /// Locale used for i18n text, e.g. en_us
    #[arg(short, long)]
    locale: Option<String>,

    /// Maximum element nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// TOML file with compile options (flags take precedence)
    #[arg(long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tree")]
    format: Format,

    /// Compile only, print nothing on success (exit 0 if valid)
    #[arg(long)]
    check: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.json file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse_from(with_default_subcommand(std::env::args().collect()));

    match cli.command {
        Command::Compile(compile_args) => do_compile(compile_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// `card [FLAGS] file.json` works like `card compile [FLAGS] file.json`.
/// Leading flags may take values, so `compile` goes right after the program
/// name whenever the first bare word is not a subcommand.
fn with_default_subcommand(mut args: Vec<String>) -> Vec<String> {
    let needs_compile = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .is_some_and(|a| !SUBCOMMANDS.contains(&a.as_str()));
    if needs_compile {
        args.insert(1, "compile".to_string());
    }
    args
}

/// Options from `--config`, overridden by explicit flags.
fn load_options(args: &CompileArgs) -> Result<CompileOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path, e))?;
            toml::from_str(&text).map_err(|e| format!("invalid config '{}': {}", path, e))?
        }
        None => CompileOptions::default(),
    };
    if let Some(level) = args.validate {
        options.validate = level;
    }
    if let Some(locale) = &args.locale {
        options.locale = Some(locale.clone());
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    Ok(options)
}

fn do_compile(args: CompileArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let compiler = Compiler::new(options);
    let result = compiler.compile_source(&source, file_id);

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();

    let compilation = match result {
        Ok(compilation) => {
            emit_diagnostics(&writer, &config, &files, &compilation.warnings);
            compilation
        }
        Err(error) => {
            emit_diagnostics(&writer, &config, &files, std::slice::from_ref(&error));
            process::exit(1);
        }
    };

    if args.check {
        eprintln!("ok: {} compiled successfully", args.file);
        return;
    }

    match args.format {
        Format::Tree => print!("{}", compilation.tree),
        Format::Json => match serde_json::to_string_pretty(&compilation.tree) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize output: {}", e);
                process::exit(1);
            }
        },
        Format::Html => println!("{}", html::render(&compilation.tree)),
    }
}

fn emit_diagnostics(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    diagnostics: &[DiagnosticError],
) {
    for diag in diagnostics {
        let diagnostic = diag.to_diagnostic();
        if term::emit_to_write_style(&mut writer.lock(), config, files, &diagnostic).is_err() {
            let prefix = if diag.is_warning { "warning" } else { "error" };
            eprintln!("{}: {}", prefix, diag);
        }
    }
}
