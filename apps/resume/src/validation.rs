//! Field-level validation shared by the parser and by documents built
//! directly from form input.

use crate::errors::{ParseResult, StructuralError, ValidationError};
use crate::markdown::grammar::{
    self, child_path, entry_path, parse_header_line, Leaf, SectionName,
};
use crate::markdown::labels::LabelBlock;
use crate::models::{Document, MonthYear, Project, Role};

/// Parses a `MM/YYYY` value, naming the field on failure.
pub fn parse_month_year(section: &str, field: &str, value: &str) -> Result<MonthYear, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidDate {
            section: section.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// A label value or list item: non-empty, trimmed, one line.
pub fn check_value(section: &str, field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue {
            section: section.to_string(),
            field: field.to_string(),
        });
    }
    if value != value.trim() || value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(ValidationError::MalformedValue {
            section: section.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

/// A text block: trimmed, and no line that would read back as a header.
pub fn check_text(section: &str, text: &str, required: bool) -> Result<(), ValidationError> {
    let field = section.rsplit(" > ").next().unwrap_or(section);
    if required && text.is_empty() {
        return Err(ValidationError::EmptyValue {
            section: section.to_string(),
            field: field.to_string(),
        });
    }
    if text != text.trim()
        || text.contains('\r')
        || text.lines().any(|line| parse_header_line(line).is_some())
    {
        return Err(ValidationError::MalformedValue {
            section: section.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

fn check_label<T: LabelBlock>(block: &T, section: &str) -> Result<(), ValidationError> {
    for spec in T::SCHEMA.fields {
        match block.field(spec.key) {
            Some(value) => check_value(section, spec.key, &value)?,
            None if spec.required => {
                return Err(ValidationError::EmptyValue {
                    section: section.to_string(),
                    field: spec.key.to_string(),
                })
            }
            None => {}
        }
    }
    Ok(())
}

fn check_list(section: &str, items: &[String]) -> Result<(), ValidationError> {
    items
        .iter()
        .try_for_each(|item| check_value(section, "item", item))
}

fn check_text_block(
    parent: &str,
    leaf: Leaf,
    text: Option<&str>,
) -> Result<(), ValidationError> {
    match text {
        Some(text) => check_text(&child_path(parent, leaf.title()), text, false),
        None => Ok(()),
    }
}

fn check_role(role: &Role, path: &str) -> Result<(), ValidationError> {
    check_label(&role.basics, &child_path(path, Leaf::Basics.title()))?;
    check_text_block(path, Leaf::Summary, role.summary.as_deref())?;
    check_text_block(path, Leaf::Responsibilities, role.responsibilities.as_deref())?;
    if let Some(skills) = &role.skills {
        check_list(&child_path(path, Leaf::RoleSkills.title()), skills)?;
    }
    Ok(())
}

fn check_project(project: &Project, path: &str) -> Result<(), ValidationError> {
    check_label(&project.overview, &child_path(path, Leaf::Overview.title()))?;
    check_text(
        &child_path(path, Leaf::Description.title()),
        &project.description,
        true,
    )?;
    if let Some(skills) = &project.skills {
        check_list(&child_path(path, Leaf::ProjectSkills.title()), skills)?;
    }
    Ok(())
}

fn non_empty<T>(items: &[T], section: String, entry: &str) -> ParseResult<()> {
    if items.is_empty() {
        return Err(StructuralError::EmptyList {
            section,
            entry: entry.to_string(),
        });
    }
    Ok(())
}

impl Document {
    /// Checks every invariant that `parse` guarantees, for documents built
    /// directly from form input. A document that passes serializes to text
    /// that parses back to an equal document.
    pub fn validate(&self) -> ParseResult<()> {
        if let Some(personal) = &self.personal {
            let path = SectionName::Personal.title();
            if let Some(contact) = &personal.contact_information {
                check_label(contact, &child_path(path, Leaf::ContactInformation.title()))?;
            }
            if let Some(websites) = &personal.websites {
                check_label(websites, &child_path(path, Leaf::Websites.title()))?;
            }
            if let Some(visa) = &personal.visa_status {
                check_label(visa, &child_path(path, Leaf::VisaStatus.title()))?;
            }
            check_text_block(path, Leaf::Banner, personal.banner.as_deref())?;
            check_text_block(path, Leaf::Note, personal.note.as_deref())?;
        }

        if let Some(education) = &self.education {
            let path = child_path(SectionName::Education.title(), grammar::DEGREES);
            non_empty(&education.degrees, path.clone(), Leaf::Degree.title())?;
            for (index, degree) in education.degrees.iter().enumerate() {
                check_label(degree, &entry_path(&path, Leaf::Degree.title(), index))?;
            }
        }

        if let Some(certifications) = &self.certifications {
            let path = child_path(
                SectionName::Certifications.title(),
                grammar::CERTIFICATIONS,
            );
            non_empty(
                &certifications.certifications,
                path.clone(),
                Leaf::Certification.title(),
            )?;
            for (index, certification) in certifications.certifications.iter().enumerate() {
                check_label(
                    certification,
                    &entry_path(&path, Leaf::Certification.title(), index),
                )?;
            }
        }

        if let Some(experience) = &self.experience {
            let section = SectionName::Experience.title();
            if experience.projects.is_none() && experience.roles.is_none() {
                return Err(StructuralError::MissingBlock {
                    section: section.to_string(),
                    block: format!("{} or {}", grammar::PROJECTS, grammar::ROLES),
                });
            }
            if let Some(projects) = &experience.projects {
                let path = child_path(section, grammar::PROJECTS);
                non_empty(projects, path.clone(), grammar::PROJECT)?;
                for (index, project) in projects.iter().enumerate() {
                    check_project(project, &entry_path(&path, grammar::PROJECT, index))?;
                }
            }
            if let Some(roles) = &experience.roles {
                let path = child_path(section, grammar::ROLES);
                non_empty(roles, path.clone(), grammar::ROLE)?;
                for (index, role) in roles.iter().enumerate() {
                    check_role(role, &entry_path(&path, grammar::ROLE, index))?;
                }
            }
        }

        Ok(())
    }
}
