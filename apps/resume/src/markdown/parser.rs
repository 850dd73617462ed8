//! Line-oriented resume parser.
//!
//! Pass 1 scans lines with a header stack and builds an outline of
//! `(level, title, body, children)` nodes. Pass 2 resolves the outline
//! against the grammar, dispatching each leaf body through the block table.
//! The first violation aborts the parse; no partial document is returned.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{ParseResult, StructuralError, ValidationError};
use crate::markdown::blocks::{self, Block, Line};
use crate::markdown::grammar::{
    self, child_path, entry_path, lookup_block, parse_header_line, Context, Leaf, SectionName,
};
use crate::markdown::labels::LabelBlock;
use crate::models::{
    Certifications, ContactInformation, Document, Education, Experience, Personal, Project,
    ProjectOverview, Role, RoleBasics, VisaStatus, Websites,
};

#[derive(Debug)]
struct Node<'a> {
    level: usize,
    title: &'a str,
    line: usize,
    body: Vec<Line<'a>>,
    children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    fn new(level: usize, title: &'a str, line: usize) -> Self {
        Self {
            level,
            title,
            line,
            body: Vec::new(),
            children: Vec::new(),
        }
    }

    fn is(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title)
    }

    /// Section and container headers carry no content of their own.
    fn reject_content(&self, section: &str) -> ParseResult<()> {
        match self.body.iter().find(|line| !line.is_blank()) {
            Some(line) => Err(StructuralError::StrayContent {
                section: section.to_string(),
                line: line.number,
            }),
            None => Ok(()),
        }
    }

    /// Leaf headers carry no nested headers.
    fn reject_children(&self, section: &str) -> ParseResult<()> {
        match self.children.first() {
            Some(child) => Err(unexpected(section, child)),
            None => Ok(()),
        }
    }
}

fn unexpected(section: &str, node: &Node<'_>) -> StructuralError {
    StructuralError::UnexpectedHeader {
        section: section.to_string(),
        header: node.title.to_string(),
        line: node.line,
    }
}

fn duplicate(section: &str, node: &Node<'_>) -> StructuralError {
    StructuralError::Duplicate {
        section: section.to_string(),
        line: node.line,
    }
}

fn missing_block(section: &str, block: &str) -> StructuralError {
    StructuralError::MissingBlock {
        section: section.to_string(),
        block: block.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 1: outline
// ────────────────────────────────────────────────────────────────────────────

fn stack_path(stack: &[Node<'_>]) -> String {
    if stack.is_empty() {
        return "Document".to_string();
    }
    stack
        .iter()
        .map(|node| node.title)
        .collect::<Vec<_>>()
        .join(" > ")
}

fn close_top<'a>(stack: &mut Vec<Node<'a>>, roots: &mut Vec<Node<'a>>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

fn outline(text: &str) -> ParseResult<Vec<Node<'_>>> {
    let mut roots = Vec::new();
    let mut stack: Vec<Node<'_>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        match parse_header_line(raw) {
            Some((level, title)) => {
                while stack.last().is_some_and(|node| node.level >= level) {
                    close_top(&mut stack, &mut roots);
                }
                let parent_level = stack.last().map_or(0, |node| node.level);
                if level != parent_level + 1 {
                    return Err(StructuralError::SkippedLevel {
                        section: stack_path(&stack),
                        header: title.to_string(),
                        line: number,
                    });
                }
                stack.push(Node::new(level, title, number));
            }
            None => match stack.last_mut() {
                Some(node) => node.body.push(Line { number, text: raw }),
                None if raw.trim().is_empty() => {}
                None => {
                    return Err(StructuralError::StrayContent {
                        section: stack_path(&stack),
                        line: number,
                    })
                }
            },
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    Ok(roots)
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 2: resolve against the grammar
// ────────────────────────────────────────────────────────────────────────────

/// Parses resume Markdown into a validated [`Document`].
///
/// Header titles and label keys match case-insensitively; blank lines are
/// free. Any grammar or field violation fails the whole parse.
pub fn parse(text: &str) -> ParseResult<Document> {
    let roots = outline(text)?;
    let mut doc = Document::default();
    let mut seen = HashSet::new();

    for node in &roots {
        let name = SectionName::from_title(node.title).ok_or_else(|| {
            StructuralError::UnknownSection {
                header: node.title.to_string(),
                line: node.line,
            }
        })?;
        let path = name.title();
        if !seen.insert(name) {
            return Err(duplicate(path, node));
        }
        node.reject_content(path)?;

        match name {
            SectionName::Personal => doc.personal = Some(parse_personal(node)?),
            SectionName::Education => {
                doc.education = Some(Education {
                    degrees: parse_label_entries(
                        node,
                        name,
                        grammar::DEGREES,
                        Context::Degrees,
                        Leaf::Degree,
                    )?,
                })
            }
            SectionName::Certifications => {
                doc.certifications = Some(Certifications {
                    certifications: parse_label_entries(
                        node,
                        name,
                        grammar::CERTIFICATIONS,
                        Context::Certifications,
                        Leaf::Certification,
                    )?,
                })
            }
            SectionName::Experience => doc.experience = Some(parse_experience(node)?),
        }
    }

    debug!(
        sections = seen.len(),
        projects = doc.projects().len(),
        roles = doc.roles().len(),
        "parsed resume"
    );
    Ok(doc)
}

fn parse_personal(node: &Node<'_>) -> ParseResult<Personal> {
    let path = SectionName::Personal.title();
    let mut personal = Personal::default();
    let mut seen = HashSet::new();

    for child in &node.children {
        let leaf = lookup_block(Context::Personal, child.title)
            .ok_or_else(|| unexpected(path, child))?;
        let block_path = child_path(path, leaf.title());
        if !seen.insert(leaf) {
            return Err(duplicate(&block_path, child));
        }
        child.reject_children(&block_path)?;

        match (leaf, blocks::parse_block(leaf.kind(), &child.body, &block_path)?) {
            (Leaf::ContactInformation, Block::Label(fields)) => {
                personal.contact_information = Some(ContactInformation::from_fields(&fields)?)
            }
            (Leaf::Websites, Block::Label(fields)) => {
                personal.websites = Some(Websites::from_fields(&fields)?)
            }
            (Leaf::VisaStatus, Block::Label(fields)) => {
                personal.visa_status = Some(VisaStatus::from_fields(&fields)?)
            }
            (Leaf::Banner, Block::Text(text)) => personal.banner = Some(text),
            (Leaf::Note, Block::Text(text)) => personal.note = Some(text),
            (leaf, _) => unreachable!("{leaf:?} is not registered under Personal"),
        }
    }
    Ok(personal)
}

/// `## <container>` holding one or more `### <entry>` label blocks.
fn parse_label_entries<T: LabelBlock>(
    section: &Node<'_>,
    name: SectionName,
    container: &str,
    context: Context,
    entry: Leaf,
) -> ParseResult<Vec<T>> {
    let section_path = name.title();
    let list_path = child_path(section_path, container);
    let mut entries = None;

    for list in &section.children {
        if !list.is(container) {
            return Err(unexpected(section_path, list));
        }
        if entries.is_some() {
            return Err(duplicate(&list_path, list));
        }
        list.reject_content(&list_path)?;

        let mut parsed = Vec::with_capacity(list.children.len());
        for (index, node) in list.children.iter().enumerate() {
            let leaf = lookup_block(context, node.title).ok_or_else(|| unexpected(&list_path, node))?;
            let path = entry_path(&list_path, leaf.title(), index);
            node.reject_children(&path)?;
            match blocks::parse_block(leaf.kind(), &node.body, &path)? {
                Block::Label(fields) => parsed.push(T::from_fields(&fields)?),
                _ => unreachable!("{leaf:?} is registered as a label block"),
            }
        }
        if parsed.is_empty() {
            return Err(StructuralError::EmptyList {
                section: list_path.clone(),
                entry: entry.title().to_string(),
            });
        }
        entries = Some(parsed);
    }

    entries.ok_or_else(|| missing_block(section_path, container))
}

fn parse_experience(node: &Node<'_>) -> ParseResult<Experience> {
    let path = SectionName::Experience.title();
    let mut projects = None;
    let mut roles = None;

    for list in &node.children {
        if list.is(grammar::PROJECTS) {
            let list_path = child_path(path, grammar::PROJECTS);
            if projects.is_some() {
                return Err(duplicate(&list_path, list));
            }
            projects = Some(parse_entries(list, &list_path, grammar::PROJECT, parse_project)?);
        } else if list.is(grammar::ROLES) {
            let list_path = child_path(path, grammar::ROLES);
            if roles.is_some() {
                return Err(duplicate(&list_path, list));
            }
            roles = Some(parse_entries(list, &list_path, grammar::ROLE, parse_role)?);
        } else {
            return Err(unexpected(path, list));
        }
    }

    if projects.is_none() && roles.is_none() {
        return Err(missing_block(
            path,
            &format!("{} or {}", grammar::PROJECTS, grammar::ROLES),
        ));
    }
    Ok(Experience { projects, roles })
}

/// `## <list>` holding one or more `### <entry>` headers, each with level-4 blocks.
fn parse_entries<T>(
    list: &Node<'_>,
    list_path: &str,
    entry_title: &str,
    parse_entry: fn(&Node<'_>, &str) -> ParseResult<T>,
) -> ParseResult<Vec<T>> {
    list.reject_content(list_path)?;
    let entries = list
        .children
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is(entry_title) {
                return Err(unexpected(list_path, entry));
            }
            let path = entry_path(list_path, entry_title, index);
            entry.reject_content(&path)?;
            parse_entry(entry, &path)
        })
        .collect::<ParseResult<Vec<T>>>()?;

    if entries.is_empty() {
        return Err(StructuralError::EmptyList {
            section: list_path.to_string(),
            entry: entry_title.to_string(),
        });
    }
    Ok(entries)
}

/// Resolves the level-4 blocks of one entry, rejecting repeats.
fn entry_blocks(
    node: &Node<'_>,
    path: &str,
    context: Context,
) -> ParseResult<Vec<(Leaf, String, Block)>> {
    let mut seen = HashSet::new();
    node.children
        .iter()
        .map(|child| {
            let leaf = lookup_block(context, child.title).ok_or_else(|| unexpected(path, child))?;
            let block_path = child_path(path, leaf.title());
            if !seen.insert(leaf) {
                return Err(duplicate(&block_path, child));
            }
            child.reject_children(&block_path)?;
            let block = blocks::parse_block(leaf.kind(), &child.body, &block_path)?;
            Ok((leaf, block_path, block))
        })
        .collect()
}

fn parse_project(node: &Node<'_>, path: &str) -> ParseResult<Project> {
    let mut overview = None;
    let mut description = None;
    let mut skills = None;

    for (leaf, block_path, block) in entry_blocks(node, path, Context::Project)? {
        match (leaf, block) {
            (Leaf::Overview, Block::Label(fields)) => {
                overview = Some(ProjectOverview::from_fields(&fields)?)
            }
            (Leaf::Description, Block::Text(text)) => {
                if text.is_empty() {
                    return Err(ValidationError::EmptyValue {
                        section: block_path,
                        field: leaf.title().to_string(),
                    }
                    .into());
                }
                description = Some(text)
            }
            (Leaf::ProjectSkills, Block::List(items)) => skills = Some(items),
            (leaf, _) => unreachable!("{leaf:?} is not registered under Project"),
        }
    }

    Ok(Project {
        overview: overview.ok_or_else(|| missing_block(path, Leaf::Overview.title()))?,
        description: description.ok_or_else(|| missing_block(path, Leaf::Description.title()))?,
        skills,
    })
}

fn parse_role(node: &Node<'_>, path: &str) -> ParseResult<Role> {
    let mut basics = None;
    let mut summary = None;
    let mut responsibilities = None;
    let mut skills = None;

    for (leaf, _, block) in entry_blocks(node, path, Context::Role)? {
        match (leaf, block) {
            (Leaf::Basics, Block::Label(fields)) => basics = Some(RoleBasics::from_fields(&fields)?),
            (Leaf::Summary, Block::Text(text)) => summary = Some(text),
            (Leaf::Responsibilities, Block::Text(text)) => responsibilities = Some(text),
            (Leaf::RoleSkills, Block::List(items)) => skills = Some(items),
            (leaf, _) => unreachable!("{leaf:?} is not registered under Role"),
        }
    }

    Ok(Role {
        basics: basics.ok_or_else(|| missing_block(path, Leaf::Basics.title()))?,
        summary,
        responsibilities,
        skills,
    })
}
