use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::entries::{
    Certification, ContactInformation, Degree, Project, Role, VisaStatus, Websites,
};

/// One resume. Each of the four top-level sections is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub personal: Option<Personal>,
    pub education: Option<Education>,
    pub certifications: Option<Certifications>,
    pub experience: Option<Experience>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personal {
    pub contact_information: Option<ContactInformation>,
    pub websites: Option<Websites>,
    pub visa_status: Option<VisaStatus>,
    pub banner: Option<String>,
    pub note: Option<String>,
}

/// Holds at least one degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degrees: Vec<Degree>,
}

/// Holds at least one certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certifications {
    pub certifications: Vec<Certification>,
}

/// Holds a non-empty project list, a non-empty role list, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub projects: Option<Vec<Project>>,
    pub roles: Option<Vec<Role>>,
}

impl Experience {
    /// Builds an Experience section from two possibly empty lists, or `None`
    /// when both are empty, so an empty section is never produced.
    pub fn from_lists(projects: Vec<Project>, roles: Vec<Role>) -> Option<Self> {
        let projects = (!projects.is_empty()).then_some(projects);
        let roles = (!roles.is_empty()).then_some(roles);
        if projects.is_none() && roles.is_none() {
            return None;
        }
        Some(Self { projects, roles })
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.as_deref().unwrap_or_default()
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.as_deref().unwrap_or_default()
    }
}

/// Identity of an Experience entry: its zero-based position in the source
/// document's project or role list. Written `role:0`, `project:2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryRef {
    Role(usize),
    Project(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an entry reference (expected role:N or project:N)")]
pub struct InvalidEntryRef(pub String);

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRef::Role(index) => write!(f, "role:{index}"),
            EntryRef::Project(index) => write!(f, "project:{index}"),
        }
    }
}

impl FromStr for EntryRef {
    type Err = InvalidEntryRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidEntryRef(s.to_string());
        let (kind, index) = s.trim().split_once(':').ok_or_else(invalid)?;
        let index: usize = index.trim().parse().map_err(|_| invalid())?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "role" => Ok(EntryRef::Role(index)),
            "project" => Ok(EntryRef::Project(index)),
            _ => Err(invalid()),
        }
    }
}

impl Document {
    pub fn roles(&self) -> &[Role] {
        self.experience.as_ref().map(Experience::roles).unwrap_or_default()
    }

    pub fn projects(&self) -> &[Project] {
        self.experience
            .as_ref()
            .map(Experience::projects)
            .unwrap_or_default()
    }

    pub fn role(&self, index: usize) -> Option<&Role> {
        self.roles().get(index)
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects().get(index)
    }

    pub fn role_mut(&mut self, index: usize) -> Option<&mut Role> {
        self.experience.as_mut()?.roles.as_mut()?.get_mut(index)
    }

    pub fn project_mut(&mut self, index: usize) -> Option<&mut Project> {
        self.experience.as_mut()?.projects.as_mut()?.get_mut(index)
    }

    /// Appends a role, creating the Experience section if needed.
    pub fn push_role(&mut self, role: Role) -> EntryRef {
        let experience = self.experience.get_or_insert_with(|| Experience {
            projects: None,
            roles: None,
        });
        let roles = experience.roles.get_or_insert_with(Vec::new);
        roles.push(role);
        EntryRef::Role(roles.len() - 1)
    }

    /// Appends a project, creating the Experience section if needed.
    pub fn push_project(&mut self, project: Project) -> EntryRef {
        let experience = self.experience.get_or_insert_with(|| Experience {
            projects: None,
            roles: None,
        });
        let projects = experience.projects.get_or_insert_with(Vec::new);
        projects.push(project);
        EntryRef::Project(projects.len() - 1)
    }

    /// Removes an Experience entry. Lists and the Experience section itself
    /// are dropped once they become empty.
    pub fn remove_entry(&mut self, entry: EntryRef) -> bool {
        let Some(experience) = self.experience.take() else {
            return false;
        };
        let mut projects = experience.projects.unwrap_or_default();
        let mut roles = experience.roles.unwrap_or_default();
        let removed = match entry {
            EntryRef::Role(index) if index < roles.len() => {
                roles.remove(index);
                true
            }
            EntryRef::Project(index) if index < projects.len() => {
                projects.remove(index);
                true
            }
            _ => false,
        };
        self.experience = Experience::from_lists(projects, roles);
        removed
    }

    /// Every Experience entry in document order: projects first, then roles.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef> + '_ {
        let projects = (0..self.projects().len()).map(EntryRef::Project);
        let roles = (0..self.roles().len()).map(EntryRef::Role);
        projects.chain(roles)
    }

    /// One-line human label for an entry, used when authoring policies.
    pub fn describe(&self, entry: EntryRef) -> Option<String> {
        match entry {
            EntryRef::Role(index) => self.role(index).map(|role| {
                let basics = &role.basics;
                let end = basics
                    .end_date
                    .map_or_else(|| "present".to_string(), |d| d.to_string());
                format!(
                    "{} at {} ({} - {})",
                    basics.title, basics.company, basics.start_date, end
                )
            }),
            EntryRef::Project(index) => self
                .project(index)
                .map(|project| project.overview.title.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entries::RoleBasics;
    use crate::models::MonthYear;

    fn role(company: &str) -> Role {
        Role::new(RoleBasics::new(
            company,
            "Engineer",
            MonthYear::new(1, 2020).unwrap(),
        ))
    }

    #[test]
    fn test_entry_ref_round_trips_through_text() {
        for entry in [EntryRef::Role(0), EntryRef::Project(12)] {
            assert_eq!(entry.to_string().parse::<EntryRef>().unwrap(), entry);
        }
        assert_eq!("Role: 3".parse::<EntryRef>().unwrap(), EntryRef::Role(3));
        assert!("skill:1".parse::<EntryRef>().is_err());
        assert!("role".parse::<EntryRef>().is_err());
        assert!("role:-1".parse::<EntryRef>().is_err());
    }

    #[test]
    fn test_push_creates_experience_lazily() {
        let mut doc = Document::default();
        assert!(doc.roles().is_empty());
        assert_eq!(doc.push_role(role("Acme")), EntryRef::Role(0));
        assert_eq!(doc.push_role(role("Globex")), EntryRef::Role(1));
        assert_eq!(
            doc.push_project(Project::new("Tool", "A tool")),
            EntryRef::Project(0)
        );
        assert_eq!(doc.roles().len(), 2);
        assert_eq!(doc.role(1).unwrap().basics.company, "Globex");
    }

    #[test]
    fn test_mutable_accessors_edit_in_place() {
        let mut doc = Document::default();
        assert!(doc.role_mut(0).is_none());
        doc.push_role(role("Acme"));
        doc.push_project(Project::new("Tool", "A tool"));

        let edited = doc.role_mut(0).unwrap();
        edited.basics.end_date = MonthYear::new(6, 2022);
        edited.summary = Some("Led the platform team.".to_string());
        doc.project_mut(0).unwrap().skills = Some(vec!["Rust".to_string()]);

        assert!(!doc.role(0).unwrap().is_ongoing());
        assert_eq!(
            doc.describe(EntryRef::Role(0)).unwrap(),
            "Engineer at Acme (01/2020 - 06/2022)"
        );
        assert_eq!(doc.project(0).unwrap().skills.as_deref().unwrap(), ["Rust"]);
        assert!(doc.project_mut(1).is_none());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_remove_last_entry_drops_experience() {
        let mut doc = Document::default();
        doc.push_role(role("Acme"));
        assert!(!doc.remove_entry(EntryRef::Project(0)));
        assert!(doc.experience.is_some());
        assert!(doc.remove_entry(EntryRef::Role(0)));
        assert!(doc.experience.is_none());
    }

    #[test]
    fn test_entries_lists_projects_then_roles() {
        let mut doc = Document::default();
        doc.push_role(role("Acme"));
        doc.push_project(Project::new("Tool", "A tool"));
        let entries: Vec<_> = doc.entries().collect();
        assert_eq!(entries, vec![EntryRef::Project(0), EntryRef::Role(0)]);
        assert_eq!(
            doc.describe(EntryRef::Role(0)).unwrap(),
            "Engineer at Acme (01/2020 - present)"
        );
        assert_eq!(doc.describe(EntryRef::Project(0)).unwrap(), "Tool");
        assert!(doc.describe(EntryRef::Role(5)).is_none());
    }

    #[test]
    fn test_from_lists_never_builds_empty_section() {
        assert!(Experience::from_lists(vec![], vec![]).is_none());
        let exp = Experience::from_lists(vec![], vec![role("Acme")]).unwrap();
        assert!(exp.projects.is_none());
        assert_eq!(exp.roles().len(), 1);
    }
}
