use thiserror::Error;

use crate::models::MonthYear;

/// Field-level failure: the line sits where the grammar expects it, but its
/// value is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{section}: '{field}' must be a MM/YYYY date, got '{value}'")]
    InvalidDate {
        section: String,
        field: String,
        value: String,
    },

    #[error("{section}: '{field}' cannot be empty")]
    EmptyValue { section: String, field: String },

    #[error("{section}: '{field}' must be a single line without surrounding whitespace")]
    MalformedValue { section: String, field: String },

    #[error("date window starts {start} but ends {end}")]
    InvertedRange { start: MonthYear, end: MonthYear },
}

impl ValidationError {
    pub fn section(&self) -> &str {
        match self {
            ValidationError::InvalidDate { section, .. }
            | ValidationError::EmptyValue { section, .. }
            | ValidationError::MalformedValue { section, .. } => section,
            ValidationError::InvertedRange { .. } => "Date Window",
        }
    }
}

/// Grammar violation. Every variant names the section path it was found in,
/// e.g. `Experience > Roles > Role[1] > Basics`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("line {line}: unrecognized top-level section '{header}'")]
    UnknownSection { header: String, line: usize },

    #[error("line {line}: unexpected header '{header}' in {section}")]
    UnexpectedHeader {
        section: String,
        header: String,
        line: usize,
    },

    #[error("line {line}: header '{header}' skips a nesting level in {section}")]
    SkippedLevel {
        section: String,
        header: String,
        line: usize,
    },

    #[error("line {line}: content outside of any block in {section}")]
    StrayContent { section: String, line: usize },

    #[error("line {line}: {section} appears more than once")]
    Duplicate { section: String, line: usize },

    #[error("{section}: missing required block '{block}'")]
    MissingBlock { section: String, block: String },

    #[error("{section}: missing required field '{field}'")]
    MissingField { section: String, field: String },

    #[error("line {line}: {section}: field '{field}' given more than once")]
    DuplicateField {
        section: String,
        field: String,
        line: usize,
    },

    #[error("{section}: must contain at least one {entry}")]
    EmptyList { section: String, entry: String },

    #[error("line {line}: list line in {section} must start with '* ': '{text}'")]
    MalformedListLine {
        section: String,
        line: usize,
        text: String,
    },

    #[error("line {line}: label line in {section} must look like 'Key: value': '{text}'")]
    MalformedLabelLine {
        section: String,
        line: usize,
        text: String,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl StructuralError {
    /// The section path the error points at, for user-facing messages.
    pub fn section(&self) -> &str {
        match self {
            StructuralError::UnknownSection { header, .. } => header,
            StructuralError::UnexpectedHeader { section, .. }
            | StructuralError::SkippedLevel { section, .. }
            | StructuralError::StrayContent { section, .. }
            | StructuralError::Duplicate { section, .. }
            | StructuralError::MissingBlock { section, .. }
            | StructuralError::MissingField { section, .. }
            | StructuralError::DuplicateField { section, .. }
            | StructuralError::EmptyList { section, .. }
            | StructuralError::MalformedListLine { section, .. }
            | StructuralError::MalformedLabelLine { section, .. } => section,
            StructuralError::Invalid(inner) => inner.section(),
        }
    }

    /// True for field-level failures as opposed to grammar-shape failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, StructuralError::Invalid(_))
    }
}

pub type ParseResult<T> = std::result::Result<T, StructuralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_points_at_missing_field_block() {
        let err = StructuralError::MissingField {
            section: "Education > Degrees > Degree[0]".to_string(),
            field: "School".to_string(),
        };
        assert_eq!(err.section(), "Education > Degrees > Degree[0]");
        assert_eq!(
            err.to_string(),
            "Education > Degrees > Degree[0]: missing required field 'School'"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error_keeps_section_context() {
        let err: StructuralError = ValidationError::InvalidDate {
            section: "Experience > Roles > Role[0] > Basics".to_string(),
            field: "Start Date".to_string(),
            value: "2019-01".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.section(), "Experience > Roles > Role[0] > Basics");
        assert!(err.to_string().contains("Start Date"));
    }
}
