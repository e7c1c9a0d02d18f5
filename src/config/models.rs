use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy for requests whose final path segment starts with a dot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotfilesPolicy {
    /// Dotfiles are served like any other file
    Allow,
    /// Dotfiles are never served directly
    #[default]
    Deny,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StaticOptions {
    /// File name served when a request resolves to a directory. `None`
    /// disables index resolution entirely.
    pub index: Option<String>,
    /// Redirect directory requests lacking a trailing slash to the slashed form
    pub dir_trailing_slash: bool,
    /// Collapse runs of consecutive slashes and redirect to the collapsed path
    pub collapse_slashes: bool,
    /// Substring removed (first occurrence only) from the request path before
    /// resolution
    pub strip_prefix: Option<String>,
    /// Extra headers merged into every response. `Content-Type` and
    /// `Location` stay resolver-owned and are rejected here.
    pub headers: HashMap<String, String>,
    pub dotfiles: DotfilesPolicy,
    /// Fallback MIME type when none can be guessed for a file
    pub default_mime: String,
    /// Charset appended to every `Content-Type` header
    pub charset: String,
}

impl Default for StaticOptions {
    fn default() -> Self {
        Self {
            index: Some("index.html".to_string()),
            dir_trailing_slash: true,
            collapse_slashes: true,
            strip_prefix: None,
            headers: HashMap::new(),
            dotfiles: DotfilesPolicy::default(),
            default_mime: "text/plain".to_string(),
            charset: "utf-8".to_string(),
        }
    }
}

impl StaticOptions {
    /// Create a new options builder
    pub fn builder() -> StaticOptionsBuilder {
        StaticOptionsBuilder::default()
    }
}

/// Builder for StaticOptions to allow for cleaner configuration creation
#[derive(Default)]
pub struct StaticOptionsBuilder {
    options: StaticOptions,
}

impl StaticOptionsBuilder {
    /// Set the directory index file name
    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.options.index = Some(name.into());
        self
    }

    /// Disable directory index resolution
    pub fn no_index(mut self) -> Self {
        self.options.index = None;
        self
    }

    /// Enable or disable trailing-slash redirects for directories
    pub fn dir_trailing_slash(mut self, enabled: bool) -> Self {
        self.options.dir_trailing_slash = enabled;
        self
    }

    /// Enable or disable slash-collapsing redirects
    pub fn collapse_slashes(mut self, enabled: bool) -> Self {
        self.options.collapse_slashes = enabled;
        self
    }

    /// Set the substring stripped from request paths before resolution
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.strip_prefix = Some(prefix.into());
        self
    }

    /// Add an extra header merged into every response
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    /// Set the dotfile policy
    pub fn dotfiles(mut self, policy: DotfilesPolicy) -> Self {
        self.options.dotfiles = policy;
        self
    }

    /// Set the fallback MIME type
    pub fn default_mime(mut self, mime: impl Into<String>) -> Self {
        self.options.default_mime = mime.into();
        self
    }

    /// Set the charset appended to `Content-Type` headers
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.options.charset = charset.into();
        self
    }

    /// Build the final StaticOptions
    pub fn build(self) -> StaticOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = StaticOptions::default();

        assert_eq!(options.index.as_deref(), Some("index.html"));
        assert!(options.dir_trailing_slash);
        assert!(options.collapse_slashes);
        assert_eq!(options.strip_prefix, None);
        assert!(options.headers.is_empty());
        assert_eq!(options.dotfiles, DotfilesPolicy::Deny);
        assert_eq!(options.default_mime, "text/plain");
        assert_eq!(options.charset, "utf-8");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let options: StaticOptions = serde_yaml::from_str("{}").expect("Failed to parse options");

        assert_eq!(options.index.as_deref(), Some("index.html"));
        assert_eq!(options.dotfiles, DotfilesPolicy::Deny);
    }

    #[test]
    fn test_null_index_disables_index_resolution() {
        let yaml = "index: null\ncharset: latin1\n";
        let options: StaticOptions = serde_yaml::from_str(yaml).expect("Failed to parse options");

        assert_eq!(options.index, None);
        assert_eq!(options.charset, "latin1");
    }

    #[test]
    fn test_dotfiles_policy_names() {
        let options: StaticOptions =
            serde_yaml::from_str("dotfiles: allow\n").expect("Failed to parse options");
        assert_eq!(options.dotfiles, DotfilesPolicy::Allow);

        let options: StaticOptions =
            serde_yaml::from_str("dotfiles: deny\n").expect("Failed to parse options");
        assert_eq!(options.dotfiles, DotfilesPolicy::Deny);
    }

    #[test]
    fn test_builder() {
        let options = StaticOptions::builder()
            .index("default.htm")
            .collapse_slashes(false)
            .strip_prefix("/assets")
            .header("x-served-by", "statik")
            .dotfiles(DotfilesPolicy::Allow)
            .default_mime("application/octet-stream")
            .charset("ascii")
            .build();

        assert_eq!(options.index.as_deref(), Some("default.htm"));
        assert!(!options.collapse_slashes);
        assert_eq!(options.strip_prefix.as_deref(), Some("/assets"));
        assert_eq!(
            options.headers.get("x-served-by").map(String::as_str),
            Some("statik")
        );
        assert_eq!(options.dotfiles, DotfilesPolicy::Allow);
        assert_eq!(options.default_mime, "application/octet-stream");
        assert_eq!(options.charset, "ascii");
    }

    #[test]
    fn test_builder_no_index() {
        let options = StaticOptions::builder().no_index().build();
        assert_eq!(options.index, None);
    }
}
