//! Stateless block strategies: label, text, and list.

use tracing::debug;

use crate::errors::{ParseResult, StructuralError, ValidationError};
use crate::markdown::grammar::{BlockKind, FieldSpec, LabelSchema, ValueKind, LIST_MARKER};
use crate::models::MonthYear;
use crate::validation;

/// A source line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl Line<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The parsed body of a leaf header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Label(Fields),
    Text(String),
    List(Vec<String>),
}

/// Dispatches a block body to the strategy its leaf header maps to.
pub fn parse_block(kind: BlockKind, body: &[Line<'_>], section: &str) -> ParseResult<Block> {
    match kind {
        BlockKind::Label(schema) => parse_label(schema, body, section).map(Block::Label),
        BlockKind::Text => parse_text(body, section).map(Block::Text),
        BlockKind::List => parse_list(body, section).map(Block::List),
    }
}

/// Recognized `Key: value` pairs of one label block, keyed by canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    section: String,
    values: Vec<(&'static FieldSpec, String)>,
}

impl Fields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(spec, _)| spec.key == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn required(&self, key: &str) -> ParseResult<String> {
        self.text(key).ok_or_else(|| StructuralError::MissingField {
            section: self.section.clone(),
            field: key.to_string(),
        })
    }

    pub fn date(&self, key: &str) -> ParseResult<Option<MonthYear>> {
        self.get(key)
            .map(|value| validation::parse_month_year(&self.section, key, value))
            .transpose()
            .map_err(StructuralError::from)
    }

    pub fn required_date(&self, key: &str) -> ParseResult<MonthYear> {
        let value = self.required(key)?;
        Ok(validation::parse_month_year(&self.section, key, &value)?)
    }
}

/// Splits each non-blank line on its first `:`. Unknown keys are dropped;
/// required keys must be present with a non-empty value; an empty optional
/// value counts as absent. Date values are checked here so the error names
/// the field even if the caller never reads it.
pub fn parse_label(
    schema: &'static LabelSchema,
    body: &[Line<'_>],
    section: &str,
) -> ParseResult<Fields> {
    let mut fields = Fields {
        section: section.to_string(),
        values: Vec::new(),
    };

    for line in body.iter().filter(|line| !line.is_blank()) {
        let (key, value) =
            line.text
                .split_once(':')
                .ok_or_else(|| StructuralError::MalformedLabelLine {
                    section: section.to_string(),
                    line: line.number,
                    text: line.text.trim().to_string(),
                })?;

        let Some(spec) = schema.lookup(key) else {
            debug!(section, key = key.trim(), "ignoring unrecognized label key");
            continue;
        };

        if fields.get(spec.key).is_some() {
            return Err(StructuralError::DuplicateField {
                section: section.to_string(),
                field: spec.key.to_string(),
                line: line.number,
            });
        }

        let value = value.trim();
        if value.is_empty() {
            if spec.required {
                return Err(ValidationError::EmptyValue {
                    section: section.to_string(),
                    field: spec.key.to_string(),
                }
                .into());
            }
            continue;
        }
        validation::check_value(section, spec.key, value)?;
        if spec.kind == ValueKind::Date {
            validation::parse_month_year(section, spec.key, value)?;
        }
        fields.values.push((spec, value.to_string()));
    }

    if let Some(missing) = schema.required().find(|spec| fields.get(spec.key).is_none()) {
        return Err(StructuralError::MissingField {
            section: section.to_string(),
            field: missing.key.to_string(),
        });
    }

    Ok(fields)
}

/// Keeps the body verbatim, trimmed only at its outer boundaries. A bare
/// carriage return inside the body is rejected.
pub fn parse_text(body: &[Line<'_>], section: &str) -> ParseResult<String> {
    let text = body
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();
    validation::check_text(section, &text, false)?;
    Ok(text)
}

/// Every non-blank line must be `* item`; items keep their source order.
pub fn parse_list(body: &[Line<'_>], section: &str) -> ParseResult<Vec<String>> {
    body.iter()
        .filter(|line| !line.is_blank())
        .map(|line| {
            line.text
                .trim_start()
                .strip_prefix(LIST_MARKER)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .ok_or_else(|| StructuralError::MalformedListLine {
                    section: section.to_string(),
                    line: line.number,
                    text: line.text.trim().to_string(),
                })
                .and_then(|item| {
                    validation::check_value(section, "item", item)?;
                    Ok(item.to_string())
                })
        })
        .collect()
}
