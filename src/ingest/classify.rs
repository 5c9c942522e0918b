use super::types::{ProjectType, TreeEntry};

/// Documentation file names, matched case-insensitively against path suffixes
const DOC_FILES: &[&str] = &["readme.md", "readme", "license", "contributors", "contributing.md"];

/// Well-known configuration file names, matched case-insensitively
const CONFIG_FILES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "vite.config.ts",
    "vite.config.js",
    "next.config.js",
    "angular.json",
    "tailwind.config.js",
    "postcss.config.js",
    "webpack.config.js",
    "babel.config.js",
    "pyproject.toml",
    "requirements.txt",
    "go.mod",
    "cargo.toml",
    "pom.xml",
    "build.gradle",
    "makefile",
    ".env.example",
];

/// Source-code file extensions
const CODE_EXTENSIONS: &[&str] = &[
    ".js", ".ts", ".jsx", ".tsx", ".py", ".java", ".go", ".rs", ".cpp", ".c", ".cs", ".php",
    ".rb", ".kt", ".swift",
];

/// Directory prefixes excluded from every category
const IGNORED_FOLDERS: &[&str] =
    &["node_modules", "dist", "build", "coverage", ".next", "out", "target", "bin"];

/// The category a repository path is assigned to
///
/// A path matching several rules gets exactly one category, in fixed
/// precedence order: doc > config > code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Doc,
    Config,
    Code,
}

/// Classifies a path, or returns `None` when no rule matches
pub fn classify(path: &str) -> Option<FileCategory> {
    if is_doc_file(path) {
        Some(FileCategory::Doc)
    } else if is_config_file(path) {
        Some(FileCategory::Config)
    } else if is_code_file(path) {
        Some(FileCategory::Code)
    } else {
        None
    }
}

/// Checks whether a path lives under one of the ignored directory prefixes
pub fn is_ignored(path: &str) -> bool {
    IGNORED_FOLDERS.iter().any(|folder| path.starts_with(folder))
}

fn is_doc_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    DOC_FILES.iter().any(|name| lower.ends_with(name))
}

fn is_config_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    CONFIG_FILES.iter().any(|name| lower.ends_with(name))
}

fn is_code_file(path: &str) -> bool {
    CODE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Derives project-type flags from the full tree listing
pub fn detect_project_types(tree: &[TreeEntry]) -> ProjectType {
    let paths: Vec<String> = tree.iter().map(|entry| entry.path.to_lowercase()).collect();

    ProjectType {
        is_node: paths.iter().any(|p| p.ends_with("package.json")),
        is_python: paths
            .iter()
            .any(|p| p.ends_with("requirements.txt") || p.ends_with("pyproject.toml")),
        is_go: paths.iter().any(|p| p.ends_with("go.mod")),
        is_rust: paths.iter().any(|p| p.ends_with("cargo.toml")),
        is_java: paths
            .iter()
            .any(|p| p.ends_with("pom.xml") || p.ends_with("build.gradle")),
        is_monorepo: paths.iter().filter(|p| p.ends_with("package.json")).count() > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str) -> TreeEntry {
        TreeEntry { path: path.to_string(), kind: "blob".to_string() }
    }

    #[test]
    fn test_doc_classification_is_case_insensitive() {
        assert_eq!(classify("README.md"), Some(FileCategory::Doc));
        assert_eq!(classify("docs/readme"), Some(FileCategory::Doc));
        assert_eq!(classify("LICENSE"), Some(FileCategory::Doc));
        assert_eq!(classify("CONTRIBUTING.md"), Some(FileCategory::Doc));
    }

    #[test]
    fn test_config_classification() {
        assert_eq!(classify("package.json"), Some(FileCategory::Config));
        assert_eq!(classify("sub/dir/Cargo.toml"), Some(FileCategory::Config));
        assert_eq!(classify("Makefile"), Some(FileCategory::Config));
        assert_eq!(classify(".env.example"), Some(FileCategory::Config));
    }

    #[test]
    fn test_code_classification_is_case_sensitive() {
        assert_eq!(classify("src/main.rs"), Some(FileCategory::Code));
        assert_eq!(classify("app/page.tsx"), Some(FileCategory::Code));
        assert_eq!(classify("src/MAIN.RS"), None);
        assert_eq!(classify("image.png"), None);
    }

    #[test]
    fn test_precedence_doc_over_config_over_code() {
        // A .ts path that is also a config file name stays a config file
        assert_eq!(classify("vite.config.ts"), Some(FileCategory::Config));
        // A .md path that is also a doc name stays a doc
        assert_eq!(classify("readme.md"), Some(FileCategory::Doc));
    }

    #[test]
    fn test_ignored_prefixes() {
        assert!(is_ignored("node_modules/react/index.js"));
        assert!(is_ignored("target/debug/main.rs"));
        assert!(is_ignored(".next/cache/page.js"));
        assert!(!is_ignored("src/node_modules_helper.rs"));
        assert!(!is_ignored("src/main.rs"));
    }

    #[test]
    fn test_detect_project_types() {
        let tree = vec![
            blob("package.json"),
            blob("apps/web/package.json"),
            blob("Cargo.toml"),
            blob("scripts/build.gradle"),
        ];
        let detected = detect_project_types(&tree);

        assert!(detected.is_node);
        assert!(detected.is_rust);
        assert!(detected.is_java);
        assert!(detected.is_monorepo);
        assert!(!detected.is_python);
        assert!(!detected.is_go);
    }

    #[test]
    fn test_detect_single_package_json_is_not_monorepo() {
        let tree = vec![blob("package.json")];
        let detected = detect_project_types(&tree);

        assert!(detected.is_node);
        assert!(!detected.is_monorepo);
    }
}
