//! zhscript_compiler: Compiler orchestration.
//!
//! Runs tokenize, parse and print for single sources, and compiles whole
//! projects with one arena per file, in parallel across files.

mod discover;
mod error;

pub use discover::resolve_config_files;
pub use error::CompileError;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use zhscript_core::CompilerArena;
use zhscript_diagnostics::{messages, Diagnostic};
use zhscript_emitter::{EmitResult, Emitter};
use zhscript_options::{is_source_file, CompilerOptions, LoadedConfig};
use zhscript_printer::transpile_with_options;

/// Stack size of project compile workers.
pub const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Name used for sources that do not come from a file.
pub const ANONYMOUS_SOURCE: &str = "<input>";

/// Compile zhscript source to JavaScript with default options.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with_options(ANONYMOUS_SOURCE, source, &CompilerOptions::default())
}

/// Compile one source; `file_name` only labels errors.
pub fn compile_with_options(file_name: &str, source: &str, options: &CompilerOptions) -> Result<String, CompileError> {
    let arena = CompilerArena::for_source(source.len());
    let tokens = zhscript_scanner::tokenize(source);
    let program = zhscript_parser::parse(arena.bump(), &tokens)
        .map_err(|error| CompileError::parse(file_name, source, error))?;
    Ok(transpile_with_options(&program, &options.printer_options()))
}

/// The parsed tree of `source`, pretty-printed with `Debug`.
pub fn dump_ast(file_name: &str, source: &str) -> Result<String, CompileError> {
    let arena = CompilerArena::for_source(source.len());
    let program = zhscript_parser::parse_source(arena.bump(), source)
        .map_err(|error| CompileError::parse(file_name, source, error))?;
    Ok(format!("{:#?}", program))
}

/// One source of a project.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
}

/// The compilation result for one source of a project.
#[derive(Debug)]
pub struct FileOutput {
    pub file_name: String,
    pub result: Result<EmitResult, CompileError>,
}

/// The project represents the entire compilation unit.
pub struct Project {
    /// Compiler options.
    pub options: CompilerOptions,
    /// The root file names.
    pub root_files: Vec<PathBuf>,
    /// Directory `outDir` paths are computed from.
    pub root_dir: Option<PathBuf>,
    /// Loaded sources, in the order they were added.
    source_files: Vec<SourceFile>,
    /// Non-fatal diagnostics gathered while loading.
    diagnostics: Vec<Diagnostic>,
}

impl Project {
    /// Create a new project from root files and options.
    pub fn new(root_files: Vec<PathBuf>, options: CompilerOptions) -> Self {
        Self {
            options,
            root_files,
            root_dir: None,
            source_files: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// A project for the files and options of a loaded zhscript.json.
    pub fn from_config(loaded: &LoadedConfig) -> Self {
        let mut project = Self::new(resolve_config_files(loaded), loaded.config.compiler_options());
        project.root_dir = Some(loaded.root_dir.clone());
        project
    }

    /// Add a source file to the project.
    pub fn add_source(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        self.source_files.push(SourceFile {
            file_name: file_name.into(),
            text: text.into(),
        });
    }

    /// Load all root files from disk. Stops at the first unreadable file.
    pub fn load_root_files(&mut self) -> Result<(), CompileError> {
        for path in self.root_files.clone() {
            if !is_source_file(&path) {
                let name = path.display().to_string();
                self.diagnostics
                    .push(Diagnostic::new(&messages::FILE_0_HAS_UNSUPPORTED_EXTENSION, &[&name]));
            }
            let text = std::fs::read_to_string(&path).map_err(|source| CompileError::io(&path, source))?;
            self.add_source(path.display().to_string(), text);
        }
        Ok(())
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }

    /// Warnings gathered while loading sources.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn emitter(&self) -> Emitter {
        Emitter::from_options(&self.options, self.root_dir.clone())
    }

    /// Compile every source in parallel. Results keep the order of the sources.
    ///
    /// Workers get [`WORKER_STACK_SIZE`] stacks so input nested up to the
    /// parser's depth limit reports an error instead of overflowing.
    pub fn compile_all(&self) -> Vec<FileOutput> {
        let emitter = self.emitter();
        match ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE).build() {
            Ok(pool) => pool.install(|| {
                self.source_files
                    .par_iter()
                    .map(|file| compile_output(&emitter, file))
                    .collect()
            }),
            Err(_) => self
                .source_files
                .iter()
                .map(|file| compile_output(&emitter, file))
                .collect(),
        }
    }

    /// Compile and write every output. Returns the per-file results; write
    /// failures surface as `Write` errors of that file.
    pub fn emit(&self) -> Vec<FileOutput> {
        let emitter = self.emitter();
        let mut outputs = self.compile_all();
        if self.options.no_emit() {
            return outputs;
        }
        for output in &mut outputs {
            if let Ok(result) = &output.result {
                if let Err(source) = emitter.write_output_files(result) {
                    let path = first_output_path(result).unwrap_or_else(|| PathBuf::from(&output.file_name));
                    output.result = Err(CompileError::write(path, source));
                }
            }
        }
        outputs
    }
}

fn compile_output(emitter: &Emitter, file: &SourceFile) -> FileOutput {
    FileOutput {
        file_name: file.file_name.clone(),
        result: compile_file(emitter, file),
    }
}

fn compile_file(emitter: &Emitter, file: &SourceFile) -> Result<EmitResult, CompileError> {
    let arena = CompilerArena::for_source(file.text.len());
    let program = zhscript_parser::parse_source(arena.bump(), &file.text)
        .map_err(|error| CompileError::parse(&file.file_name, &file.text, error))?;
    Ok(emitter.emit(&program, &file.file_name))
}

fn first_output_path(result: &EmitResult) -> Option<PathBuf> {
    result.output_files.first().map(|f| f.path.clone())
}

/// Whether `path` names a project file rather than a source.
pub fn is_config_path(path: &Path) -> bool {
    path.file_name().map_or(false, |name| name == zhscript_options::CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_let() {
        assert_eq!(compile("令 x = 10;").unwrap(), "let x = 10;");
    }

    #[test]
    fn test_compile_error_text() {
        let err = compile("函数 add(a, b) { 返回 a + }").unwrap_err();
        assert_eq!(err.to_string(), "Parse Error at line 1, column 23: Unexpected token RBRACE '}'");
    }

    #[test]
    fn test_parse_span_is_in_bytes() {
        // `函数 ` is 7 bytes but 3 chars.
        let err = compile("函数 }").unwrap_err();
        match err {
            CompileError::Parse { span, .. } => {
                assert_eq!(span.offset(), 7);
                assert_eq!(span.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_is_config_path() {
        assert!(is_config_path(Path::new("proj/zhscript.json")));
        assert!(!is_config_path(Path::new("proj/main.zh")));
    }
}
