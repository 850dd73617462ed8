//! Reconstruction: derives an export-ready Document from a source Document,
//! an inclusion policy, and an optional date window.
//!
//! # Rules
//! - `Omit`: the entry is dropped.
//! - `NotRelevant` role: Basics, Summary, and Skills kept; Responsibilities
//!   replaced by [`NOT_RELEVANT_PLACEHOLDER`].
//! - `NotRelevant` project: kept unchanged (projects have no Responsibilities).
//! - Date window: applies to roles only, under a [`WindowRule`].
//! - Survivors keep their relative order. An Experience section left with no
//!   entries is dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::export::policy::{Inclusion, InclusionPolicy};
use crate::models::{DateRange, Document, EntryRef, Experience, MonthYear, Project, Role};

/// Responsibilities text of a `NotRelevant` role.
pub const NOT_RELEVANT_PLACEHOLDER: &str = "";

/// How a role's employment interval is tested against a date window.
/// Both bounds are inclusive at month granularity; an ongoing role extends
/// without end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRule {
    /// Any overlap between the role and the window.
    #[default]
    Overlap,
    /// The whole role lies inside the window. Ongoing roles never qualify.
    Contained,
}

pub const DEFAULT_WINDOW_RULE: WindowRule = WindowRule::Overlap;

impl WindowRule {
    pub fn admits(self, start: MonthYear, end: Option<MonthYear>, window: &DateRange) -> bool {
        match self {
            WindowRule::Overlap => {
                start <= window.end() && end.map_or(true, |end| end >= window.start())
            }
            WindowRule::Contained => {
                start >= window.start() && end.is_some_and(|end| end <= window.end())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown window rule '{0}' (expected 'overlap' or 'contained')")]
pub struct InvalidWindowRule(pub String);

impl FromStr for WindowRule {
    type Err = InvalidWindowRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlap" => Ok(WindowRule::Overlap),
            "contained" => Ok(WindowRule::Contained),
            _ => Err(InvalidWindowRule(s.to_string())),
        }
    }
}

impl fmt::Display for WindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowRule::Overlap => f.write_str("overlap"),
            WindowRule::Contained => f.write_str("contained"),
        }
    }
}

/// Derives an export Document using [`DEFAULT_WINDOW_RULE`].
pub fn reconstruct(
    doc: &Document,
    policy: &InclusionPolicy,
    window: Option<&DateRange>,
) -> Document {
    reconstruct_with_rule(doc, policy, window, DEFAULT_WINDOW_RULE)
}

/// Derives an export Document under an explicit window rule.
///
/// Like `serialize`, this is total over documents that satisfy
/// [`Document::validate`] and panics on any other input.
pub fn reconstruct_with_rule(
    doc: &Document,
    policy: &InclusionPolicy,
    window: Option<&DateRange>,
    rule: WindowRule,
) -> Document {
    if let Err(err) = doc.validate() {
        panic!("reconstruct called on a document that violates its invariants: {err}");
    }

    let projects: Vec<Project> = doc
        .projects()
        .iter()
        .enumerate()
        .filter_map(|(index, project)| {
            match policy.get(EntryRef::Project(index)) {
                Inclusion::Omit => {
                    debug!(entry = %EntryRef::Project(index), "omitting project");
                    None
                }
                Inclusion::Include | Inclusion::NotRelevant => Some(project.clone()),
            }
        })
        .collect();

    let roles: Vec<Role> = doc
        .roles()
        .iter()
        .enumerate()
        .filter_map(|(index, role)| {
            let entry = EntryRef::Role(index);
            let inclusion = policy.get(entry);
            if inclusion == Inclusion::Omit {
                debug!(%entry, "omitting role");
                return None;
            }
            if let Some(window) = window {
                if !rule.admits(role.basics.start_date, role.basics.end_date, window) {
                    debug!(%entry, %window, %rule, "role outside date window");
                    return None;
                }
            }
            Some(match inclusion {
                Inclusion::NotRelevant => reduce(role),
                _ => role.clone(),
            })
        })
        .collect();

    let kept = (projects.len(), roles.len());
    let derived = Document {
        personal: doc.personal.clone(),
        education: doc.education.clone(),
        certifications: doc.certifications.clone(),
        experience: Experience::from_lists(projects, roles),
    };

    info!(
        projects_in = doc.projects().len(),
        projects_out = kept.0,
        roles_in = doc.roles().len(),
        roles_out = kept.1,
        "reconstructed resume"
    );
    derived
}

fn reduce(role: &Role) -> Role {
    Role {
        basics: role.basics.clone(),
        summary: role.summary.clone(),
        responsibilities: Some(NOT_RELEVANT_PLACEHOLDER.to_string()),
        skills: role.skills.clone(),
    }
}
