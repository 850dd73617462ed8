use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::EntryRef;

/// Export directive for one Experience entry. Editing state only; never
/// written into the Markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    #[default]
    Include,
    NotRelevant,
    Omit,
}

/// Inclusion per entry, keyed by position. Unlisted entries are `Include`.
///
/// JSON form: `{"roles": {"0": "omit"}, "projects": {"1": "not_relevant"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionPolicy {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    roles: BTreeMap<usize, Inclusion>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    projects: BTreeMap<usize, Inclusion>,
}

impl InclusionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entry: EntryRef) -> Inclusion {
        let map = match entry {
            EntryRef::Role(_) => &self.roles,
            EntryRef::Project(_) => &self.projects,
        };
        map.get(&index_of(entry)).copied().unwrap_or_default()
    }

    /// Setting `Include` clears the entry back to the default.
    pub fn set(&mut self, entry: EntryRef, inclusion: Inclusion) {
        let map = match entry {
            EntryRef::Role(_) => &mut self.roles,
            EntryRef::Project(_) => &mut self.projects,
        };
        match inclusion {
            Inclusion::Include => {
                map.remove(&index_of(entry));
            }
            other => {
                map.insert(index_of(entry), other);
            }
        }
    }

    pub fn with(mut self, entry: EntryRef, inclusion: Inclusion) -> Self {
        self.set(entry, inclusion);
        self
    }

    /// Entries with a non-default directive.
    pub fn overrides(&self) -> impl Iterator<Item = (EntryRef, Inclusion)> + '_ {
        let projects = self
            .projects
            .iter()
            .map(|(index, inclusion)| (EntryRef::Project(*index), *inclusion));
        let roles = self
            .roles
            .iter()
            .map(|(index, inclusion)| (EntryRef::Role(*index), *inclusion));
        projects
            .chain(roles)
            .filter(|(_, inclusion)| *inclusion != Inclusion::Include)
    }
}

fn index_of(entry: EntryRef) -> usize {
    match entry {
        EntryRef::Role(index) | EntryRef::Project(index) => index,
    }
}
