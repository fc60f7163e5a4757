//! zhs: The zhscript compiler CLI.
//!
//! Usage:
//!   zhs [options] [file...]
//!   zhs -e '<source>'
//!
//! Compiles `.zh` sources to JavaScript, or dumps their tokens or syntax tree.

use clap::Parser as ClapParser;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use zhscript_compiler::{compile_with_options, dump_ast, is_config_path, CompileError, FileOutput, Project, ANONYMOUS_SOURCE};
use zhscript_diagnostics::{messages, Diagnostic};
use zhscript_options::{default_config_text, parse_config_file, CompilerOptions, CONFIG_FILE_NAME};

#[derive(ClapParser, Debug)]
#[command(name = "zhs", about = "zhs - compile zhscript to JavaScript", disable_version_flag = true)]
struct Cli {
    /// zhscript files to compile.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to zhscript.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Redirect output structure to the directory.
    #[arg(long = "outDir")]
    out_dir: Option<String>,

    /// Do not emit outputs.
    #[arg(long = "noEmit")]
    no_emit: bool,

    /// Print the JavaScript to stdout instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Compile the given source text and print the result.
    #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
    eval: Option<String>,

    /// Print the token stream instead of compiling.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree instead of compiling.
    #[arg(long)]
    ast: bool,

    /// Initialize a zhscript.json file.
    #[arg(long)]
    init: bool,

    /// Print the compiler version.
    #[arg(short = 'v', long)]
    version: bool,

    /// Enable pretty printing for diagnostics (`--pretty false` turns it off).
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pretty: bool,
}

/// What to print for each source when not compiling to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DumpMode {
    Tokens,
    Ast,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("zhs Version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if cli.init {
        process::exit(run_init());
    }

    let exit_code = match &cli.eval {
        Some(source) => run_eval(&cli, source),
        None => run_compile(&cli),
    };
    process::exit(exit_code);
}

fn run_eval(cli: &Cli, source: &str) -> i32 {
    let use_color = cli.pretty && atty_is_terminal();
    if let Some(mode) = dump_mode(cli) {
        return dump_source(mode, ANONYMOUS_SOURCE, source, use_color);
    }
    match compile_with_options(ANONYMOUS_SOURCE, source, &cli_overrides(cli)) {
        Ok(js) => {
            println!("{}", js);
            0
        }
        Err(err) => {
            print_compile_error(err, use_color);
            2
        }
    }
}

fn run_compile(cli: &Cli) -> i32 {
    let start = Instant::now();
    let use_color = cli.pretty && atty_is_terminal();

    let mut project = match resolve_project(cli) {
        Ok(project) => project,
        Err(code) => return code,
    };
    if project.root_files.is_empty() {
        print_diagnostic(&Diagnostic::new(&messages::NO_INPUTS_WERE_FOUND, &[]), use_color);
        return 1;
    }
    project.options.merge(&cli_overrides(cli));

    if let Err(err) = project.load_root_files() {
        print_compile_error(err, use_color);
        return 1;
    }
    for diag in project.diagnostics() {
        print_diagnostic(diag, use_color);
    }

    if let Some(mode) = dump_mode(cli) {
        let mut exit_code = 0;
        for file in project.source_files() {
            exit_code = exit_code.max(dump_source(mode, &file.file_name, &file.text, use_color));
        }
        return exit_code;
    }

    let outputs = if cli.stdout { project.compile_all() } else { project.emit() };
    let compiled = outputs.iter().filter(|o| o.result.is_ok()).count();
    let exit_code = report_outputs(outputs, cli.stdout, use_color);

    if exit_code != 0 {
        return exit_code;
    }

    let elapsed = start.elapsed();
    if !cli.stdout {
        let summary = messages::COMPILED_0_FILES.format(&[&compiled.to_string()]);
        if use_color {
            eprintln!("{}{} ({:.2}s){}", GRAY, summary, elapsed.as_secs_f64(), RESET);
        } else {
            eprintln!("{}", summary);
        }
    }
    0
}

/// Print per-file results. Returns 2 when any file failed to parse, 1 when
/// only I/O failed.
fn report_outputs(outputs: Vec<FileOutput>, to_stdout: bool, use_color: bool) -> i32 {
    let mut parse_errors = 0usize;
    let mut io_errors = 0usize;
    for output in outputs {
        match output.result {
            Ok(result) => {
                if to_stdout {
                    println!("{}", result.js_content);
                }
            }
            Err(err) => {
                match err {
                    CompileError::Parse { .. } => parse_errors += 1,
                    CompileError::Io { .. } | CompileError::Write { .. } => io_errors += 1,
                }
                print_compile_error(err, use_color);
            }
        }
    }

    let count = parse_errors + io_errors;
    if count > 0 {
        let summary = messages::FOUND_0_ERRORS.format(&[&count.to_string()]);
        if use_color {
            eprintln!("\n{}{}{}", RED, summary, RESET);
        } else {
            eprintln!("\n{}", summary);
        }
    }
    if parse_errors > 0 {
        2
    } else if io_errors > 0 {
        1
    } else {
        0
    }
}

fn dump_source(mode: DumpMode, file_name: &str, source: &str, use_color: bool) -> i32 {
    match mode {
        DumpMode::Tokens => {
            for token in zhscript_scanner::tokenize(source) {
                println!("{}:{}\t{}", token.line, token.column, token);
            }
            0
        }
        DumpMode::Ast => match dump_ast(file_name, source) {
            Ok(tree) => {
                println!("{}", tree);
                0
            }
            Err(err) => {
                print_compile_error(err, use_color);
                2
            }
        },
    }
}

fn dump_mode(cli: &Cli) -> Option<DumpMode> {
    if cli.tokens {
        Some(DumpMode::Tokens)
    } else if cli.ast {
        Some(DumpMode::Ast)
    } else {
        None
    }
}

/// Options given on the command line; these win over zhscript.json.
fn cli_overrides(cli: &Cli) -> CompilerOptions {
    CompilerOptions {
        out_dir: cli.out_dir.clone(),
        no_emit: cli.no_emit.then_some(true),
        ..CompilerOptions::default()
    }
}

fn run_init() -> i32 {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        print_error(&format!("A {} file already exists in the current directory.", CONFIG_FILE_NAME));
        return 1;
    }
    match std::fs::write(config_path, default_config_text()) {
        Ok(()) => {
            println!("Successfully created a {} file.", CONFIG_FILE_NAME);
            0
        }
        Err(e) => {
            print_error(&format!("Failed to create {}: {}", CONFIG_FILE_NAME, e));
            1
        }
    }
}

/// The project for `-p`, for explicit files, or for a zhscript.json in the
/// current directory. `Err` carries the exit code.
fn resolve_project(cli: &Cli) -> Result<Project, i32> {
    if let Some(project) = &cli.project {
        return load_project(Path::new(project));
    }
    match cli.files.as_slice() {
        [single] if is_config_path(Path::new(single)) => load_project(Path::new(single)),
        [] if Path::new(CONFIG_FILE_NAME).exists() => load_project(Path::new(CONFIG_FILE_NAME)),
        files => {
            let files = files.iter().map(PathBuf::from).collect();
            Ok(Project::new(files, CompilerOptions::default()))
        }
    }
}

fn load_project(path: &Path) -> Result<Project, i32> {
    let path = if path.is_dir() { path.join(CONFIG_FILE_NAME) } else { path.to_path_buf() };
    match parse_config_file(&path) {
        Ok(loaded) => Ok(Project::from_config(&loaded)),
        Err(e) => {
            print_error(&e.to_string());
            Err(1)
        }
    }
}

fn print_compile_error(err: CompileError, use_color: bool) {
    if use_color {
        eprintln!("{:?}", miette::Report::new(err));
    } else {
        print_error(&format_plain(&err));
    }
}

fn format_plain(err: &CompileError) -> String {
    match err {
        CompileError::Parse { file_name, .. } => format!("{}: {}", file_name, err),
        CompileError::Io { .. } | CompileError::Write { .. } => err.to_string(),
    }
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}: ", CYAN, file, RESET);
        }
        eprintln!(
            "{}{}{}{} {}ZH{}{}: {}",
            BOLD, color, diag.category, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("zhs").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags() {
        let cli = cli(&["--outDir", "out", "--noEmit", "--stdout", "a.zh", "b.zh"]);
        assert_eq!(cli.files, vec!["a.zh", "b.zh"]);
        assert_eq!(cli.out_dir.as_deref(), Some("out"));
        assert!(cli.no_emit && cli.stdout && cli.pretty);
    }

    #[test]
    fn test_pretty_can_be_turned_off() {
        assert!(!cli(&["--pretty", "false", "a.zh"]).pretty);
        assert!(cli(&["--pretty", "true", "a.zh"]).pretty);
    }

    #[test]
    fn test_overrides_only_set_given_flags() {
        let overrides = cli_overrides(&cli(&["a.zh"]));
        assert_eq!(overrides, CompilerOptions::default());

        let overrides = cli_overrides(&cli(&["--noEmit", "--outDir", "build"]));
        assert_eq!(overrides.no_emit, Some(true));
        assert_eq!(overrides.out_dir.as_deref(), Some("build"));
    }

    #[test]
    fn test_dump_mode() {
        assert_eq!(dump_mode(&cli(&["--tokens", "-e", "令 a;"])), Some(DumpMode::Tokens));
        assert_eq!(dump_mode(&cli(&["--ast", "a.zh"])), Some(DumpMode::Ast));
        assert_eq!(dump_mode(&cli(&["a.zh"])), None);
    }

    #[test]
    fn test_explicit_files_make_a_project() {
        let project = resolve_project(&cli(&["a.zh", "lib/b.zh"])).unwrap();
        assert_eq!(project.root_files, vec![PathBuf::from("a.zh"), PathBuf::from("lib/b.zh")]);
        assert!(project.root_dir.is_none());
    }

    #[test]
    fn test_plain_error_names_the_file() {
        let err = compile_with_options("坏.zh", "令 = 1;", &CompilerOptions::default()).unwrap_err();
        assert_eq!(
            format_plain(&err),
            "坏.zh: Parse Error at line 1, column 3: Expected IDENTIFIER but found ASSIGN"
        );
    }

    #[test]
    fn test_report_outputs_exit_codes() {
        let mut project = Project::new(vec![], CompilerOptions::default());
        project.add_source("ok.zh", "令 a = 1;");
        assert_eq!(report_outputs(project.compile_all(), false, false), 0);
        project.add_source("bad.zh", "令 = 1;");
        assert_eq!(report_outputs(project.compile_all(), false, false), 2);
    }
}
