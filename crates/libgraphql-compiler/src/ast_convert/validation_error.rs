use crate::loc;
use thiserror::Error;

/// One validation failure.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    pub location: Option<loc::FilePosition>,
    pub message: String,
    /// The offending source line, when the source text is available.
    pub preview: Option<String>,
}
impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
            if let Some(preview) = &self.preview {
                let marker_indent = " ".repeat(location.col.saturating_sub(1));
                write!(f, "\n> \n> {preview}\n> {marker_indent}^^^")?;
            }
        }
        Ok(())
    }
}

/// Every validation failure found in one set of definitions.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("You supplied a GraphQL document with validation errors:\n{}", format_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);
impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|err| err.message.as_str()).collect()
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors.iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
