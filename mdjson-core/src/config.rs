//! Conversion options and their compiled form.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Image service base used when no `iiif` option is supplied.
pub const DEFAULT_IIIF: &str = "https://iiif.elifesciences.org/journal-cms:";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid substitution pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Node kinds whose payload may arrive base64 encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeKind {
    Table,
    Code,
}

impl EncodeKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(EncodeKind::Table),
            "code" => Some(EncodeKind::Code),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeKind::Table => "table",
            EncodeKind::Code => "code",
        }
    }
}

/// Raw conversion options, as read from a config file or built by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Base URI substituted for the `public://iiif/` storage prefix
    #[serde(default)]
    pub iiif: Option<String>,

    /// Node kinds whose inner payload is base64 encoded
    #[serde(default)]
    pub encode: Vec<EncodeKind>,

    /// Ordered pattern to replacement substitutions
    #[serde(default)]
    pub regexes: IndexMap<String, String>,
}

impl ConvertOptions {
    /// Load options from a YAML file, or JSON when the extension is `.json`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let options = if is_json {
            serde_json::from_str(&contents)?
        } else if contents.trim().is_empty() {
            ConvertOptions::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        Ok(options)
    }
}

/// A compiled `pattern -> replacement` pair.
#[derive(Debug, Clone)]
pub struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, ConfigError> {
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Per-call conversion context: the validated form of [`ConvertOptions`].
#[derive(Debug, Clone)]
pub struct ConvertContext {
    iiif: String,
    encode: BTreeSet<EncodeKind>,
    regexes: Vec<Substitution>,
}

impl Default for ConvertContext {
    fn default() -> Self {
        Self {
            iiif: DEFAULT_IIIF.to_string(),
            encode: BTreeSet::new(),
            regexes: Vec::new(),
        }
    }
}

impl ConvertContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iiif(mut self, iiif: impl Into<String>) -> Self {
        self.iiif = iiif.into();
        self
    }

    pub fn with_encode(mut self, kind: EncodeKind) -> Self {
        self.encode.insert(kind);
        self
    }

    /// Append a substitution; it runs after every substitution added before it.
    pub fn with_regex(
        mut self,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.regexes.push(Substitution::new(pattern, replacement)?);
        Ok(self)
    }

    pub fn iiif(&self) -> &str {
        &self.iiif
    }

    pub fn encodes(&self, kind: EncodeKind) -> bool {
        self.encode.contains(&kind)
    }

    pub fn regexes(&self) -> &[Substitution] {
        &self.regexes
    }
}

impl TryFrom<ConvertOptions> for ConvertContext {
    type Error = ConfigError;

    fn try_from(options: ConvertOptions) -> Result<Self, Self::Error> {
        let mut context = ConvertContext::default();
        if let Some(iiif) = options.iiif {
            context.iiif = iiif;
        }
        context.encode.extend(options.encode);
        for (pattern, replacement) in options.regexes {
            context.regexes.push(Substitution::new(&pattern, replacement)?);
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_values() {
        let context = ConvertContext::default();

        assert_eq!(context.iiif(), DEFAULT_IIIF);
        assert!(!context.encodes(EncodeKind::Table));
        assert!(!context.encodes(EncodeKind::Code));
        assert!(context.regexes().is_empty());
    }

    #[test]
    fn test_yaml_options_keep_regex_order() {
        let yaml = r#"
iiif: "https://images.example.org/prefix:"
encode: [table]
regexes:
  "b": "c"
  "a": "b"
"#;
        let options: ConvertOptions = serde_yaml::from_str(yaml).unwrap();
        let context = ConvertContext::try_from(options).unwrap();

        assert_eq!(context.iiif(), "https://images.example.org/prefix:");
        assert!(context.encodes(EncodeKind::Table));
        assert!(!context.encodes(EncodeKind::Code));
        let patterns: Vec<&str> = context.regexes().iter().map(|s| s.pattern()).collect();
        assert_eq!(patterns, vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_encode_kind_is_rejected() {
        let yaml = "encode: [image]";
        assert!(serde_yaml::from_str::<ConvertOptions>(yaml).is_err());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = ConvertContext::new().with_regex("(unclosed", "x").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_from_file_json_and_yaml() {
        let mut json = NamedTempFile::with_suffix(".json").unwrap();
        write!(json, r#"{{"encode": ["code"], "regexes": {{"x": "y"}}}}"#).unwrap();
        let options = ConvertOptions::from_file(json.path()).unwrap();
        assert_eq!(options.encode, vec![EncodeKind::Code]);
        assert_eq!(options.regexes.get("x").map(String::as_str), Some("y"));

        let mut yaml = NamedTempFile::with_suffix(".yml").unwrap();
        writeln!(yaml, "iiif: \"https://example.org/\"").unwrap();
        let options = ConvertOptions::from_file(yaml.path()).unwrap();
        assert_eq!(options.iiif.as_deref(), Some("https://example.org/"));
        assert!(options.encode.is_empty());
    }

    #[test]
    fn test_encode_kind_from_str() {
        assert_eq!(EncodeKind::from_str("Table"), Some(EncodeKind::Table));
        assert_eq!(EncodeKind::from_str(" code "), Some(EncodeKind::Code));
        assert_eq!(EncodeKind::from_str("image"), None);
        assert_eq!(EncodeKind::Code.as_str(), "code");
    }
}
