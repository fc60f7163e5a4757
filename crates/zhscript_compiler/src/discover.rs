//! Source file discovery for projects.

use std::path::{Path, PathBuf};
use zhscript_options::{is_source_file, LoadedConfig};

/// Directories skipped when `exclude` is not given.
const DEFAULT_EXCLUDE: &[&str] = &["node_modules"];

/// The root files a loaded zhscript.json names.
///
/// `files` wins when present; otherwise every `.zh` file under the `include`
/// directories (default `src`) is collected, sorted and deduplicated.
pub fn resolve_config_files(loaded: &LoadedConfig) -> Vec<PathBuf> {
    let root = loaded.root_dir.as_path();
    if let Some(files) = &loaded.config.files {
        return files.iter().map(|f| resolve_relative(root, f)).collect();
    }

    let include = match &loaded.config.include {
        Some(include) => include.clone(),
        None => vec!["src".to_string()],
    };
    let mut exclude: Vec<String> = match &loaded.config.exclude {
        Some(exclude) => exclude.clone(),
        None => DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
    };
    if let Some(out_dir) = loaded.config.compiler_options.as_ref().and_then(|o| o.out_dir.clone()) {
        exclude.push(out_dir);
    }

    let mut result = Vec::new();
    for entry in &include {
        let path = resolve_relative(root, entry);
        if path.is_dir() {
            walk_directory(&path, root, &exclude, &mut result);
        } else if path.is_file() {
            result.push(path);
        }
    }
    result.sort();
    result.dedup();
    result
}

fn resolve_relative(root: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn walk_directory(dir: &Path, root: &Path, exclude: &[String], result: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if is_excluded(&path, root, exclude) {
            continue;
        }
        if path.is_dir() {
            walk_directory(&path, root, exclude, result);
        } else if is_source_file(&path) {
            result.push(path);
        }
    }
}

/// Whether any component of the path below `root` matches an exclude entry.
fn is_excluded(path: &Path, root: &Path, exclude: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    exclude.iter().any(|pattern| {
        let pattern = Path::new(pattern.trim_start_matches("./"));
        relative.starts_with(pattern) || relative.components().any(|c| c.as_os_str() == pattern.as_os_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhscript_options::ZhConfig;

    fn temp_project(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zhscript_discover_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        for file in ["src/主.zh", "src/ui/卡片.zh", "src/ui/readme.md", "src/node_modules/x.zh", "dist/old.zh"] {
            let path = dir.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "令 a = 1;").unwrap();
        }
        dir
    }

    fn loaded(root: &Path, config: ZhConfig) -> LoadedConfig {
        LoadedConfig {
            path: root.join("zhscript.json"),
            root_dir: root.to_path_buf(),
            config,
        }
    }

    #[test]
    fn test_explicit_files_are_joined_to_root() {
        let config = ZhConfig {
            files: Some(vec!["a.zh".to_string(), "lib/b.zh".to_string()]),
            ..ZhConfig::default()
        };
        let files = resolve_config_files(&loaded(Path::new("proj"), config));
        assert_eq!(files, vec![PathBuf::from("proj/a.zh"), PathBuf::from("proj/lib/b.zh")]);
    }

    #[test]
    fn test_include_walks_directories() {
        let root = temp_project("include");
        let files = resolve_config_files(&loaded(&root, ZhConfig::default()));
        assert_eq!(files, vec![root.join("src/ui/卡片.zh"), root.join("src/主.zh")]);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_exclude_and_out_dir() {
        let root = temp_project("exclude");
        let config = ZhConfig {
            include: Some(vec![".".to_string()]),
            exclude: Some(vec!["src/ui".to_string(), "node_modules".to_string()]),
            compiler_options: Some(zhscript_options::CompilerOptions {
                out_dir: Some("dist".to_string()),
                ..Default::default()
            }),
            ..ZhConfig::default()
        };
        let files = resolve_config_files(&loaded(&root, config));
        assert_eq!(files, vec![root.join("./src/主.zh")]);
        std::fs::remove_dir_all(&root).unwrap();
    }
}
