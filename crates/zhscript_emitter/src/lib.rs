//! zhscript_emitter: JavaScript file output.
//!
//! Prints a parsed program and decides where its `.js` file goes:
//! next to the source, or under `outDir` keeping the path relative to the
//! project root.

use std::path::{Path, PathBuf};
use zhscript_ast::Program;
use zhscript_options::CompilerOptions;
use zhscript_printer::{Printer, PrinterOptions};

/// The emitter produces output files from the AST.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    pub printer_options: PrinterOptions,
    /// Output directory override.
    pub out_dir: Option<PathBuf>,
    /// Root directory for calculating paths under `out_dir`.
    pub root_dir: Option<PathBuf>,
}

/// The result of emitting a source file.
#[derive(Debug, Clone)]
pub struct EmitResult {
    /// The emitted JavaScript content.
    pub js_content: String,
    pub output_files: Vec<OutputFile>,
}

/// A file produced by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// The output file path.
    pub path: PathBuf,
    /// The content of the file.
    pub text: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A relative `outDir` is taken relative to `root_dir` when one is given.
    pub fn from_options(options: &CompilerOptions, root_dir: Option<PathBuf>) -> Self {
        let out_dir = options.out_dir.as_ref().map(|dir| match &root_dir {
            Some(root) => root.join(dir),
            None => PathBuf::from(dir),
        });
        Self {
            printer_options: options.printer_options(),
            out_dir,
            root_dir,
        }
    }

    /// Emit a program parsed from `file_name`.
    pub fn emit(&self, program: &Program<'_>, file_name: &str) -> EmitResult {
        let js_content = Printer::with_options(self.printer_options.clone()).print_program(program);
        let path = self.get_output_path(Path::new(file_name));
        EmitResult {
            output_files: vec![OutputFile {
                path,
                text: js_content.clone(),
            }],
            js_content,
        }
    }

    /// Write output files to disk.
    pub fn write_output_files(&self, result: &EmitResult) -> std::io::Result<()> {
        for file in &result.output_files {
            write_output_file(file)?;
        }
        Ok(())
    }

    /// The `.js` path for `source`.
    pub fn get_output_path(&self, source: &Path) -> PathBuf {
        let js_name = source.with_extension("js");
        let Some(out_dir) = &self.out_dir else {
            return js_name;
        };
        let relative = self
            .root_dir
            .as_deref()
            .and_then(|root| js_name.strip_prefix(root).ok())
            .map(Path::to_path_buf);
        match relative {
            Some(relative) => out_dir.join(relative),
            None => out_dir.join(js_name.file_name().unwrap_or_default()),
        }
    }
}

/// Write one file, creating its parent directories.
pub fn write_output_file(file: &OutputFile) -> std::io::Result<()> {
    if let Some(parent) = file.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&file.path, &file.text)
}
