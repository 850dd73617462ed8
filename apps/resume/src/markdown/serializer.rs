//! Deterministic Document -> canonical Markdown.
//!
//! Sections come out in canonical order with canonical title-case headers;
//! label fields follow their schema order. Every header and every non-empty
//! block body is one chunk, and chunks are separated by exactly one blank line.

use tracing::debug;

use crate::markdown::grammar::{
    self, header_line, Leaf, SectionName, ENTRY_BLOCK_LEVEL, ENTRY_LEVEL, LIST_MARKER,
    SECTION_LEVEL, SUBSECTION_LEVEL,
};
use crate::markdown::labels::LabelBlock;
use crate::models::{Document, Experience, Personal, Project, Role};

#[derive(Default)]
struct Writer {
    chunks: Vec<String>,
}

impl Writer {
    fn header(&mut self, level: usize, title: &str) {
        self.chunks.push(header_line(level, title));
    }

    fn body(&mut self, body: String) {
        if !body.is_empty() {
            self.chunks.push(body);
        }
    }

    fn label<T: LabelBlock>(&mut self, level: usize, leaf: Leaf, block: &T) {
        self.header(level, leaf.title());
        let lines: Vec<String> = T::SCHEMA
            .fields
            .iter()
            .filter_map(|spec| block.field(spec.key).map(|value| format!("{}: {}", spec.key, value)))
            .collect();
        self.body(lines.join("\n"));
    }

    fn text(&mut self, level: usize, leaf: Leaf, text: &str) {
        self.header(level, leaf.title());
        self.body(text.to_string());
    }

    fn list(&mut self, level: usize, leaf: Leaf, items: &[String]) {
        self.header(level, leaf.title());
        let lines: Vec<String> = items
            .iter()
            .map(|item| format!("{LIST_MARKER}{item}"))
            .collect();
        self.body(lines.join("\n"));
    }

    fn finish(self) -> String {
        if self.chunks.is_empty() {
            return String::new();
        }
        let mut out = self.chunks.join("\n\n");
        out.push('\n');
        out
    }
}

/// Serializes a document to canonical Markdown.
///
/// Total over documents that satisfy [`Document::validate`]. A document that
/// does not is a programming error (documents come from `parse` or from
/// validated edits), so this panics rather than emit text that would not
/// parse back.
pub fn serialize(doc: &Document) -> String {
    if let Err(err) = doc.validate() {
        panic!("serialize called on a document that violates its invariants: {err}");
    }

    let mut out = Writer::default();
    for name in SectionName::CANONICAL_ORDER {
        match name {
            SectionName::Personal => {
                if let Some(personal) = &doc.personal {
                    out.header(SECTION_LEVEL, name.title());
                    write_personal(&mut out, personal);
                }
            }
            SectionName::Education => {
                if let Some(education) = &doc.education {
                    out.header(SECTION_LEVEL, name.title());
                    out.header(SUBSECTION_LEVEL, grammar::DEGREES);
                    for degree in &education.degrees {
                        out.label(ENTRY_LEVEL, Leaf::Degree, degree);
                    }
                }
            }
            SectionName::Certifications => {
                if let Some(certifications) = &doc.certifications {
                    out.header(SECTION_LEVEL, name.title());
                    out.header(SUBSECTION_LEVEL, grammar::CERTIFICATIONS);
                    for certification in &certifications.certifications {
                        out.label(ENTRY_LEVEL, Leaf::Certification, certification);
                    }
                }
            }
            SectionName::Experience => {
                if let Some(experience) = &doc.experience {
                    out.header(SECTION_LEVEL, name.title());
                    write_experience(&mut out, experience);
                }
            }
        }
    }

    debug!(chunks = out.chunks.len(), "serialized resume");
    out.finish()
}

fn write_personal(out: &mut Writer, personal: &Personal) {
    if let Some(contact) = &personal.contact_information {
        out.label(SUBSECTION_LEVEL, Leaf::ContactInformation, contact);
    }
    if let Some(websites) = &personal.websites {
        out.label(SUBSECTION_LEVEL, Leaf::Websites, websites);
    }
    if let Some(visa) = &personal.visa_status {
        out.label(SUBSECTION_LEVEL, Leaf::VisaStatus, visa);
    }
    if let Some(banner) = &personal.banner {
        out.text(SUBSECTION_LEVEL, Leaf::Banner, banner);
    }
    if let Some(note) = &personal.note {
        out.text(SUBSECTION_LEVEL, Leaf::Note, note);
    }
}

fn write_experience(out: &mut Writer, experience: &Experience) {
    if let Some(projects) = &experience.projects {
        out.header(SUBSECTION_LEVEL, grammar::PROJECTS);
        for project in projects {
            write_project(out, project);
        }
    }
    if let Some(roles) = &experience.roles {
        out.header(SUBSECTION_LEVEL, grammar::ROLES);
        for role in roles {
            write_role(out, role);
        }
    }
}

fn write_project(out: &mut Writer, project: &Project) {
    out.header(ENTRY_LEVEL, grammar::PROJECT);
    out.label(ENTRY_BLOCK_LEVEL, Leaf::Overview, &project.overview);
    out.text(ENTRY_BLOCK_LEVEL, Leaf::Description, &project.description);
    if let Some(skills) = &project.skills {
        out.list(ENTRY_BLOCK_LEVEL, Leaf::ProjectSkills, skills);
    }
}

fn write_role(out: &mut Writer, role: &Role) {
    out.header(ENTRY_LEVEL, grammar::ROLE);
    out.label(ENTRY_BLOCK_LEVEL, Leaf::Basics, &role.basics);
    if let Some(summary) = &role.summary {
        out.text(ENTRY_BLOCK_LEVEL, Leaf::Summary, summary);
    }
    if let Some(responsibilities) = &role.responsibilities {
        out.text(ENTRY_BLOCK_LEVEL, Leaf::Responsibilities, responsibilities);
    }
    if let Some(skills) = &role.skills {
        out.list(ENTRY_BLOCK_LEVEL, Leaf::RoleSkills, skills);
    }
}
