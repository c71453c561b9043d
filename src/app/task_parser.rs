//! Loads a calculation from a small TOML task document, so a run can be
//! scripted instead of typed:
//!
//! ```toml
//! [integral]
//! function = "sin(x) + x**2"
//! lower = 0
//! upper = 3.14
//! plot = "sin_plus_square.png"
//! ```
//!
//! Bounds stay raw strings here; the calculator validates them the same
//! way it validates typed input.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationTask {
    pub function: String,
    pub lower: String,
    pub upper: String,
    pub plot: Option<PathBuf>,
}

/// Parses task text into an [`IntegrationTask`].
pub fn parse_task(text: &str) -> Result<IntegrationTask, String> {
    let table: toml::Table = text
        .parse()
        .map_err(|e| format!("invalid task file: {}", e))?;
    let section = table
        .get("integral")
        .and_then(|v| v.as_table())
        .ok_or_else(|| "task file must contain an [integral] section".to_string())?;

    let function = section
        .get("function")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "the [integral] section must set 'function' to a string".to_string())?
        .to_string();
    let lower = bound_as_string(section, "lower")?;
    let upper = bound_as_string(section, "upper")?;
    let plot = match section.get("plot") {
        None => None,
        Some(value) => Some(PathBuf::from(value.as_str().ok_or_else(|| {
            "'plot' must be a file path string".to_string()
        })?)),
    };

    Ok(IntegrationTask {
        function,
        lower,
        upper,
        plot,
    })
}

/// Bounds may be written as TOML numbers or strings; either way they are
/// handed to the calculator as raw text.
fn bound_as_string(section: &toml::Table, key: &str) -> Result<String, String> {
    let value = section
        .get(key)
        .ok_or_else(|| format!("the [integral] section must set '{}'", key))?;
    if let Some(f) = value.as_float() {
        return Ok(f.to_string());
    }
    if let Some(i) = value.as_integer() {
        return Ok(i.to_string());
    }
    if let Some(s) = value.as_str() {
        return Ok(s.to_string());
    }
    Err(format!("'{}' must be a number or a string", key))
}

/// Reads and parses a task file from disk.
pub fn load_task_file(path: &Path) -> Result<IntegrationTask, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read task file {}: {}", path.display(), e))?;
    parse_task(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_task() {
        let task = parse_task(
            r#"
            [integral]
            function = "x**2"
            lower = 0
            upper = 2.5
            plot = "out.png"
            "#,
        )
        .unwrap();
        assert_eq!(task.function, "x**2");
        assert_eq!(task.lower, "0");
        assert_eq!(task.upper, "2.5");
        assert_eq!(task.plot, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_bounds_as_strings() {
        let task = parse_task(
            r#"
            [integral]
            function = "sin(x)"
            lower = "-1"
            upper = "1"
            "#,
        )
        .unwrap();
        assert_eq!(task.lower, "-1");
        assert_eq!(task.upper, "1");
        assert_eq!(task.plot, None);
    }

    #[test]
    fn test_missing_section() {
        let err = parse_task("function = \"x\"").unwrap_err();
        assert!(err.contains("[integral]"), "got: {}", err);
    }

    #[test]
    fn test_missing_bound() {
        let err = parse_task(
            r#"
            [integral]
            function = "x"
            lower = 0
            "#,
        )
        .unwrap_err();
        assert!(err.contains("'upper'"), "got: {}", err);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_task("[integral").is_err());
    }

    #[test]
    fn test_load_task_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.toml");
        fs::write(&path, "[integral]\nfunction = \"x\"\nlower = 0\nupper = 1\n").unwrap();
        let task = load_task_file(&path).unwrap();
        assert_eq!(task.function, "x");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_task_file(Path::new("/no/such/task.toml")).unwrap_err();
        assert!(err.contains("cannot read"), "got: {}", err);
    }
}
