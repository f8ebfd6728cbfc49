//! Framework-name filter for component paths.

use regex::RegexSet;

/// Matches component names that belong to the framework or routing layer
/// rather than the application.
///
/// Patterns are literal names or globs where `*` matches any run of
/// characters. Matching is against the whole name.
#[derive(Debug, Clone)]
pub struct FrameworkFilter {
    set: RegexSet,
}

impl FrameworkFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = RegexSet::new(patterns.into_iter().map(|p| glob_to_regex(p.as_ref())))?;
        Ok(Self { set })
    }

    /// A filter that matches nothing.
    pub fn empty() -> Self {
        Self {
            set: RegexSet::empty(),
        }
    }

    pub fn is_framework(&self, name: &str) -> bool {
        self.set.is_match(name)
    }

    /// `path` without framework names, order preserved.
    pub fn user_path(&self, path: &[String]) -> Vec<String> {
        path.iter()
            .filter(|name| !self.is_framework(name))
            .cloned()
            .collect()
    }
}

/// Translate a `*` glob into an anchored regex.
pub fn glob_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{}$", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("ErrorBoundary"), "^ErrorBoundary$");
        assert_eq!(glob_to_regex("*Provider"), "^.*Provider$");
        assert_eq!(glob_to_regex("Context.Provider"), r"^Context\.Provider$");
    }

    #[test]
    fn test_literal_and_glob_matching() {
        let filter = FrameworkFilter::new(["ErrorBoundary", "*Provider", "Route*"]).unwrap();
        assert!(filter.is_framework("ErrorBoundary"));
        assert!(!filter.is_framework("MyErrorBoundary"));
        assert!(filter.is_framework("ThemeProvider"));
        assert!(filter.is_framework("Theme.Provider"));
        assert!(filter.is_framework("RouterOutlet"));
        assert!(!filter.is_framework("ProviderList"));
    }

    #[test]
    fn test_user_path_removes_framework_names() {
        let filter = FrameworkFilter::new(["ErrorBoundary"]).unwrap();
        let full = path(&["App", "ErrorBoundary", "Button"]);
        assert_eq!(filter.user_path(&full), path(&["App", "Button"]));
    }

    #[test]
    fn test_user_path_is_subsequence() {
        let filter = FrameworkFilter::new(["*Provider", "Suspense", "Outlet"]).unwrap();
        let full = path(&["ThemeProvider", "App", "Suspense", "Layout", "Outlet", "Card"]);
        let user = filter.user_path(&full);

        let mut rest = full.iter();
        for name in &user {
            assert!(rest.any(|n| n == name), "{} out of order", name);
        }
        assert_eq!(user, path(&["App", "Layout", "Card"]));
    }

    #[test]
    fn test_empty_filter() {
        let filter = FrameworkFilter::empty();
        assert!(!filter.is_framework("Anything"));
        assert_eq!(filter.user_path(&path(&["A", "B"])), path(&["A", "B"]));
    }
}
