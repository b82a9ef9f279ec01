//! .env file parsing.
//!
//! Env files supply variables for ENVSUB regions without exporting them into
//! the shell that runs cooked-goose.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parses .env files into a map of variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=postgres://host/db?sslmode=disable`
///
/// # Example
///
/// ```
/// use cooked_goose::config::EnvFileParser;
///
/// let content = r#"
/// # Database roles
/// export APP_USER=app
/// APP_PASSWORD="s3cret value"
/// EMPTY=
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("APP_USER"), Some(&"app".to_string()));
/// assert_eq!(vars.get("APP_PASSWORD"), Some(&"s3cret value".to_string()));
/// assert_eq!(vars.get("EMPTY"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content into a map of variables.
    ///
    /// Lines that are not assignments are skipped with a warning.
    pub fn parse(content: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Some((key, value)) => {
                    vars.insert(key, value);
                }
                None => {
                    tracing::warn!("Ignoring env file line {}: {:?}", index + 1, line);
                }
            }
        }

        vars
    }

    /// Parse a single `KEY=value` line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();

        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }

        Some((key.to_string(), Self::unquote(value.trim())))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));

        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read env file {}", path.display()))?;
        Ok(Self::parse(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_env_file() {
        let content = r#"
KEY1=value1
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("KEY1"), Some(&"value1".to_string()));
        assert_eq!(vars.get("KEY2"), Some(&"value2".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# This is a comment
KEY=value

# Another comment
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
LONE="
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
        assert_eq!(vars.get("LONE"), Some(&"\"".to_string()));
    }

    #[test]
    fn handles_export_prefix() {
        let vars = EnvFileParser::parse("export SCHEMA=tenant_a");
        assert_eq!(vars.get("SCHEMA"), Some(&"tenant_a".to_string()));
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("DSN=postgres://h/db?sslmode=disable");
        assert_eq!(
            vars.get("DSN"),
            Some(&"postgres://h/db?sslmode=disable".to_string())
        );
    }

    #[test]
    fn handles_whitespace_around_equals() {
        let vars = EnvFileParser::parse("KEY = value with spaces");
        assert_eq!(vars.get("KEY"), Some(&"value with spaces".to_string()));
    }

    #[test]
    fn skips_lines_without_assignment() {
        let content = r#"
KEY1=value1
invalid line without equals
=no_key
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "APP_USER=app\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("APP_USER"), Some(&"app".to_string()));
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = EnvFileParser::load(Path::new("/nonexistent/path/.env")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/path/.env"));
    }
}
