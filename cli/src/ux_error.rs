use colored::Colorize;
use errors::CodecError;
use std::path::Path;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>,
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None,
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!();
            eprintln!("{} {}", "why:".yellow().bold(), why);
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".cyan().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn unknown_format(path: &Path) -> UxError {
    UxError::new(format!("Cannot tell the format of '{}'", path.display()))
        .why("The format is chosen from the file extension: .json, .toml, .yaml or .yml")
        .fix("Rename the file with a supported extension")
        .fix("Or name the format explicitly")
        .suggest(format!("simpleconf check {} --format yaml", path.display()))
}

pub fn unreadable(path: &Path, source: &std::io::Error) -> UxError {
    UxError::new(format!("Cannot access '{}'", path.display()))
        .why(source.to_string())
        .fix("Check that the path exists and is readable")
}

pub fn codec_failure(path: &Path, error: &CodecError) -> UxError {
    match error {
        CodecError::Format { format, .. } => {
            UxError::new(format!("'{}' is not valid {}", path.display(), format))
                .why(error.to_string())
                .fix("Fix the syntax error reported above")
        }
        CodecError::Shape { .. } => UxError::new(format!(
            "'{}' does not hold a configuration mapping",
            path.display(),
        ))
        .why(error.to_string())
        .fix("A configuration document must be a mapping of keys to values at the top level"),
        CodecError::Unrepresentable { format, .. } => {
            UxError::new(format!("Cannot write this document as {}", format))
                .why(error.to_string())
                .fix("Remove the offending value or convert to another format")
        }
    }
}

pub fn not_a_mapping(path: &Path, found: &str) -> UxError {
    UxError::new(format!(
        "'{}' does not hold a configuration mapping",
        path.display(),
    ))
    .why(format!("The top-level value is a {}", found))
    .fix("A configuration document must be a mapping of keys to values at the top level")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fixes() {
        let err = UxError::new("what")
            .why("because")
            .fix("one")
            .fix("two")
            .suggest("simpleconf check a.json");
        assert_eq!(err.what, "what");
        assert_eq!(err.why.as_deref(), Some("because"));
        assert_eq!(err.how_to_fix, vec!["one", "two"]);
        assert_eq!(err.suggested_command.as_deref(), Some("simpleconf check a.json"));
        assert_eq!(err.to_string(), "what");
    }

    #[test]
    fn test_unknown_format_suggests_explicit_format() {
        let err = unknown_format(Path::new("app.ini"));
        assert!(err.what.contains("app.ini"));
        assert!(
            err.suggested_command
                .unwrap()
                .contains("--format"),
        );
    }

    #[test]
    fn test_codec_failure_variants() {
        let path = Path::new("app.toml");

        let err = codec_failure(path, &CodecError::format("TOML", "expected `=`"));
        assert_eq!(err.what, "'app.toml' is not valid TOML");
        assert!(err.why.unwrap().contains("expected `=`"));

        let err = codec_failure(
            path,
            &CodecError::Shape {
                format: "YAML",
                found: "string".to_string(),
            },
        );
        assert!(err.what.contains("mapping"));

        let err = codec_failure(
            path,
            &CodecError::Unrepresentable {
                format: "TOML",
                path: "parent".to_string(),
                reason: "TOML has no null value".to_string(),
            },
        );
        assert_eq!(err.what, "Cannot write this document as TOML");
    }

    #[test]
    fn test_display_does_not_panic() {
        not_a_mapping(Path::new("list.json"), "sequence").display();
    }
}
