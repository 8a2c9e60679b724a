use std::path::Path;

pub const DEFAULT_ROOTS: &[&str] = &["app/", "rootbeerlib/"];
pub const DEFAULT_MANIFESTS: &[&str] = &["CMakeLists.txt"];
pub const DEFAULT_EXTENSIONS: &[&str] = &["java", "kt", "cpp", "c", "h", "cmake"];

const EXCLUDED_SEGMENTS: &[&str] = &["/test/", "/androidtest/"];

/// Decides whether a repository path is implementation source.
///
/// Rules, in order:
/// 1. the path must start with one of the roots;
/// 2. a `/test/` or `/androidTest/` segment (any case) excludes it;
/// 3. a file named exactly like a build manifest is source;
/// 4. otherwise the lowercased extension must be whitelisted.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    roots: Vec<String>,
    manifests: Vec<String>,
    extensions: Vec<String>,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ROOTS.iter().map(|r| r.to_string()).collect())
    }
}

impl FileClassifier {
    pub fn new(roots: Vec<String>) -> Self {
        Self {
            roots,
            manifests: DEFAULT_MANIFESTS.iter().map(|m| m.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn is_source_file(&self, path: &str) -> bool {
        if !self.roots.iter().any(|root| path.starts_with(root.as_str())) {
            return false;
        }

        let lower = path.to_lowercase();
        if EXCLUDED_SEGMENTS.iter().any(|seg| lower.contains(seg)) {
            return false;
        }

        let file = Path::new(path);
        if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
            if self.manifests.iter().any(|m| m == name) {
                return true;
            }
        }

        file.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_src(path: &str) -> bool {
        FileClassifier::default().is_source_file(path)
    }

    #[test]
    fn accepts_whitelisted_sources_under_roots() {
        assert!(is_src("app/src/main/Foo.java"));
        assert!(is_src("app/src/main/kotlin/Bar.kt"));
        assert!(is_src("rootbeerlib/src/main/cpp/toolChecker.cpp"));
        assert!(is_src("rootbeerlib/src/main/cpp/toolChecker.H"));
        assert!(is_src("rootbeerlib/cmake/flags.cmake"));
    }

    #[test]
    fn rejects_paths_outside_roots() {
        assert!(!is_src("docs/readme.md"));
        assert!(!is_src("lib/src/Foo.java"));
        assert!(!is_src("myapp/src/Foo.java"));
        assert!(!is_src("CMakeLists.txt"));
    }

    #[test]
    fn rejects_test_directories() {
        assert!(!is_src("app/src/androidTest/Foo.java"));
        assert!(!is_src("app/src/test/FooTest.java"));
        assert!(!is_src("rootbeerlib/src/TEST/Foo.java"));
    }

    #[test]
    fn rejects_unlisted_extensions() {
        assert!(!is_src("app/build.gradle"));
        assert!(!is_src("app/src/main/res/layout/main.xml"));
        assert!(!is_src("app/src/main/Makefile"));
    }

    #[test]
    fn manifest_name_overrides_extension_rules() {
        assert!(is_src("rootbeerlib/CMakeLists.txt"));
        assert!(is_src("app/src/main/cpp/CMakeLists.txt"));
        assert!(!is_src("rootbeerlib/cmakelists.txt"));
        assert!(!is_src("rootbeerlib/OldCMakeLists.txt"));
    }

    #[test]
    fn test_exclusion_is_checked_before_manifest() {
        assert!(!is_src("rootbeerlib/src/test/CMakeLists.txt"));
    }

    #[test]
    fn custom_roots() {
        let c = FileClassifier::new(vec!["core/".to_string()]);
        assert!(c.is_source_file("core/src/x.c"));
        assert!(!c.is_source_file("app/src/main/Foo.java"));
        assert_eq!(c.roots(), ["core/".to_string()]);
    }
}
