//! Compiler integration tests.
//!
//! End-to-end tests for the compilation pipeline: tokenize -> parse -> print,
//! for single sources and for projects.

use std::path::PathBuf;
use zhscript_compiler::{compile, compile_with_options, dump_ast, CompileError, Project};
use zhscript_options::{parse_config_file, CompilerOptions};

/// Helper: compile and unwrap.
fn js(source: &str) -> String {
    compile(source).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("zhscript_compiler_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Single sources
// ============================================================================

#[test]
fn test_compile_empty_file() {
    assert_eq!(js(""), "");
}

#[test]
fn test_compile_let() {
    assert_eq!(js("令 x = 10;"), "let x = 10;");
}

#[test]
fn test_compile_function() {
    assert_eq!(js("函数 add(a, b) { 返回 a + b; }"), "function add(a, b) {\n  return a + b;\n}");
}

#[test]
fn test_compile_destructuring_call() {
    assert_eq!(js("令 [a, b] = f();"), "let [a, b] = f();");
}

#[test]
fn test_compile_component() {
    let source = "导出 默认 组件 应用(属性) {\n  返回 <div 类名=\"app\">{属性.标题}</div>;\n}";
    assert_eq!(
        js(source),
        "export default function 应用(属性) {\n  return React.createElement(\"div\", { 类名: \"app\" }, 属性.标题);\n}"
    );
}

#[test]
fn test_compile_cjk_punctuation_program() {
    assert_eq!(js("令 列表 = 【1，2】；\n控制台。日志（列表）；"), "let 列表 = [1, 2];\n控制台.日志(列表);");
}

#[test]
fn test_compile_same_input_same_output() {
    let source = "如果 (a ?? b || c) { 当 (x < y) { x += 1; } }";
    assert_eq!(js(source), js(source));
}

#[test]
fn test_compile_with_options() {
    let options = CompilerOptions {
        indent_width: Some(4),
        trailing_newline: Some(true),
        jsx_factory: Some("h".to_string()),
        ..CompilerOptions::default()
    };
    let output = compile_with_options("a.zh", "函数 f() { 返回 <p/>; }", &options).unwrap();
    assert_eq!(output, "function f() {\n    return h(\"p\", null);\n}\n");
}

#[test]
fn test_parse_error_is_reported() {
    let err = compile_with_options("坏.zh", "令 = 1;", &CompilerOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Parse Error at line 1, column 3: Expected IDENTIFIER but found ASSIGN");
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.file.as_deref(), Some("坏.zh"));
    assert_eq!(diagnostic.code, 1001);
    assert_eq!(err.parse_error().map(|e| e.column), Some(3));
}

#[test]
fn test_dump_ast() {
    let text = dump_ast("a.zh", "令 x = 1;").unwrap();
    assert!(text.contains("VariableDeclaration"));
    assert!(text.contains("Let"));
}

// ============================================================================
// Projects
// ============================================================================

#[test]
fn test_project_keeps_input_order() {
    let mut project = Project::new(vec![], CompilerOptions::default());
    for i in 0..32 {
        project.add_source(format!("f{}.zh", i), format!("令 v{} = {};", i, i));
    }
    let outputs = project.compile_all();
    assert_eq!(outputs.len(), 32);
    for (i, output) in outputs.iter().enumerate() {
        assert_eq!(output.file_name, format!("f{}.zh", i));
        let result = output.result.as_ref().unwrap();
        assert_eq!(result.js_content, format!("let v{} = {};", i, i));
    }
}

#[test]
fn test_project_isolates_failures() {
    let mut project = Project::new(vec![], CompilerOptions::default());
    project.add_source("good.zh", "令 a = 1;");
    project.add_source("bad.zh", "令 a = ;");
    project.add_source("also_good.zh", "令 b = 2;");
    let outputs = project.compile_all();
    assert!(outputs[0].result.is_ok());
    assert!(matches!(outputs[1].result, Err(CompileError::Parse { .. })));
    assert!(outputs[2].result.is_ok());
}

#[test]
fn test_project_deep_nesting_is_an_error() {
    let deep = format!("令 x = {}1{};", "(".repeat(99), ")".repeat(99));
    let mut project = Project::new(vec![], CompilerOptions::default());
    project.add_source("deep_a.zh", deep.clone());
    project.add_source("deep_b.zh", deep);
    project.add_source("shallow.zh", "令 y = ((1));");
    let outputs = project.compile_all();
    for output in &outputs[..2] {
        let err = output.result.as_ref().unwrap_err();
        assert_eq!(
            err.parse_error().map(|e| e.message.as_str()),
            Some("Maximum nesting depth of 200 exceeded")
        );
    }
    assert_eq!(outputs[2].result.as_ref().unwrap().js_content, "let y = 1;");
}

#[test]
fn test_load_missing_root_file() {
    let mut project = Project::new(vec![PathBuf::from("/nonexistent/main.zh")], CompilerOptions::default());
    let err = project.load_root_files().unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
    assert_eq!(err.to_diagnostic().code, 5001);
}

#[test]
fn test_unsupported_extension_warns() {
    let dir = temp_dir("extension");
    let path = dir.join("main.txt");
    std::fs::write(&path, "令 a = 1;").unwrap();
    let mut project = Project::new(vec![path], CompilerOptions::default());
    project.load_root_files().unwrap();
    assert_eq!(project.diagnostics().len(), 1);
    assert!(!project.diagnostics()[0].is_error());
    assert_eq!(project.source_files().len(), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_project_from_config_emits_to_out_dir() {
    let dir = temp_dir("project");
    std::fs::create_dir_all(dir.join("src/ui")).unwrap();
    std::fs::write(dir.join("src/主.zh"), "导入 { 卡片 } 从 \"./ui/卡片\";\n令 a = 卡片();").unwrap();
    std::fs::write(dir.join("src/ui/卡片.zh"), "导出 组件 卡片() { 返回 <div/>; }").unwrap();
    std::fs::write(
        dir.join("zhscript.json"),
        r#"{ "compilerOptions": { "outDir": "dist", "trailingNewline": true } }"#,
    )
    .unwrap();

    let loaded = parse_config_file(&dir.join("zhscript.json")).unwrap();
    let mut project = Project::from_config(&loaded);
    project.load_root_files().unwrap();
    let outputs = project.emit();
    assert!(outputs.iter().all(|o| o.result.is_ok()));

    let main = std::fs::read_to_string(dir.join("dist/src/主.js")).unwrap();
    assert_eq!(main, "import { 卡片 } from \"./ui/卡片\";\nlet a = 卡片();\n");
    let card = std::fs::read_to_string(dir.join("dist/src/ui/卡片.js")).unwrap();
    assert_eq!(card, "export function 卡片() {\n  return React.createElement(\"div\", null);\n}\n");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_blocked_output_is_a_write_error() {
    let dir = temp_dir("blocked");
    let source = dir.join("a.zh");
    std::fs::write(&source, "令 a = 1;").unwrap();
    std::fs::write(dir.join("blocker"), "not a directory").unwrap();
    let options = CompilerOptions {
        out_dir: Some(dir.join("blocker").display().to_string()),
        ..CompilerOptions::default()
    };
    let mut project = Project::new(vec![source], options);
    project.load_root_files().unwrap();
    let outputs = project.emit();

    let err = outputs[0].result.as_ref().unwrap_err();
    assert!(matches!(err, CompileError::Write { .. }));
    assert!(err.to_string().starts_with("Cannot write file '"));
    assert_eq!(err.to_diagnostic().code, 5002);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_no_emit_writes_nothing() {
    let dir = temp_dir("noemit");
    let source = dir.join("a.zh");
    std::fs::write(&source, "令 a = 1;").unwrap();
    let options = CompilerOptions {
        no_emit: Some(true),
        ..CompilerOptions::default()
    };
    let mut project = Project::new(vec![source], options);
    project.load_root_files().unwrap();
    let outputs = project.emit();
    assert_eq!(outputs.len(), 1);
    assert!(!dir.join("a.js").exists());
    std::fs::remove_dir_all(&dir).unwrap();
}
