//! Resume Markdown grammar.
//!
//! Header nesting:
//! ```text
//! # Personal        ## Contact Information | Websites | Visa Status | Banner | Note
//! # Education       ## Degrees         ### Degree
//! # Certifications  ## Certifications  ### Certification
//! # Experience      ## Projects        ### Project  #### Overview | Description | Skills
//!                   ## Roles           ### Role     #### Basics | Summary | Responsibilities | Skills
//! ```
//!
//! Leaf headers are resolved through [`lookup_block`], a static table from
//! (nesting context, header title) to one of three block strategies.

pub const SECTION_LEVEL: usize = 1;
pub const SUBSECTION_LEVEL: usize = 2;
pub const ENTRY_LEVEL: usize = 3;
pub const ENTRY_BLOCK_LEVEL: usize = 4;
pub const MAX_HEADER_LEVEL: usize = ENTRY_BLOCK_LEVEL;

pub const LIST_MARKER: &str = "* ";

pub const DEGREES: &str = "Degrees";
pub const CERTIFICATIONS: &str = "Certifications";
pub const PROJECTS: &str = "Projects";
pub const PROJECT: &str = "Project";
pub const ROLES: &str = "Roles";
pub const ROLE: &str = "Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionName {
    Personal,
    Education,
    Certifications,
    Experience,
}

impl SectionName {
    /// Output order, independent of input order.
    pub const CANONICAL_ORDER: [SectionName; 4] = [
        SectionName::Personal,
        SectionName::Education,
        SectionName::Certifications,
        SectionName::Experience,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionName::Personal => "Personal",
            SectionName::Education => "Education",
            SectionName::Certifications => "Certifications",
            SectionName::Experience => "Experience",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::CANONICAL_ORDER
            .into_iter()
            .find(|name| name.title().eq_ignore_ascii_case(title.trim()))
    }
}

/// Splits a header line into `(level, title)`.
///
/// A header is a run of 1..=4 `#` at the very start of the line followed by a
/// space or the end of the line. Deeper runs and `#word` are ordinary content.
pub fn parse_header_line(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > MAX_HEADER_LEVEL {
        return None;
    }
    let rest = &line[level..];
    if rest.trim().is_empty() {
        return Some((level, ""));
    }
    if rest.starts_with(' ') || rest.starts_with('\t') {
        return Some((level, rest.trim()));
    }
    None
}

pub fn header_line(level: usize, title: &str) -> String {
    format!("{} {}", "#".repeat(level), title)
}

/// `Experience > Roles`
pub fn child_path(parent: &str, child: &str) -> String {
    format!("{parent} > {child}")
}

/// `Experience > Roles > Role[2]`, zero-based like `EntryRef`.
pub fn entry_path(parent: &str, title: &str, index: usize) -> String {
    format!("{parent} > {title}[{index}]")
}

// ────────────────────────────────────────────────────────────────────────────
// Label schemas
// ────────────────────────────────────────────────────────────────────────────

pub mod keys {
    pub const NAME: &str = "Name";
    pub const EMAIL: &str = "Email";
    pub const PHONE: &str = "Phone";
    pub const LOCATION: &str = "Location";

    pub const GITHUB: &str = "GitHub";
    pub const LINKEDIN: &str = "LinkedIn";
    pub const WEBSITE: &str = "Website";
    pub const TWITTER: &str = "Twitter";

    pub const WORK_STATUS: &str = "Work Status";
    pub const REQUIRE_SPONSORSHIP: &str = "Require Sponsorship";

    pub const SCHOOL: &str = "School";
    pub const DEGREE: &str = "Degree";
    pub const START_DATE: &str = "Start Date";
    pub const END_DATE: &str = "End Date";
    pub const MAJOR: &str = "Major";
    pub const GPA: &str = "GPA";

    pub const ISSUER: &str = "Issuer";
    pub const ISSUED: &str = "Issued";
    pub const EXPIRES: &str = "Expires";
    pub const ID: &str = "ID";

    pub const TITLE: &str = "Title";
    pub const URL: &str = "URL";
    pub const URL_DESCRIPTION: &str = "URL Description";

    pub const COMPANY: &str = "Company";
    pub const AGENCY: &str = "Agency";
    pub const JOB_CATEGORY: &str = "Job Category";
    pub const EMPLOYMENT_TYPE: &str = "Employment Type";
    pub const REASON_FOR_CHANGE: &str = "Reason For Change";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Plain,
    /// `MM/YYYY`
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub required: bool,
    pub kind: ValueKind,
}

const fn optional(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        required: false,
        kind: ValueKind::Plain,
    }
}

const fn required(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        required: true,
        kind: ValueKind::Plain,
    }
}

const fn date(key: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        key,
        required,
        kind: ValueKind::Date,
    }
}

/// Recognized keys of one label block, in canonical output order.
#[derive(Debug)]
pub struct LabelSchema {
    pub fields: &'static [FieldSpec],
}

impl LabelSchema {
    /// Case-insensitive key lookup; unknown keys return `None`.
    pub fn lookup(&self, key: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields
            .iter()
            .find(|spec| spec.key.eq_ignore_ascii_case(key.trim()))
    }

    pub fn required(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().filter(|spec| spec.required)
    }
}

pub const CONTACT_INFORMATION: LabelSchema = LabelSchema {
    fields: &[
        required(keys::NAME),
        optional(keys::EMAIL),
        optional(keys::PHONE),
        optional(keys::LOCATION),
    ],
};

pub const WEBSITES: LabelSchema = LabelSchema {
    fields: &[
        optional(keys::GITHUB),
        optional(keys::LINKEDIN),
        optional(keys::WEBSITE),
        optional(keys::TWITTER),
    ],
};

pub const VISA_STATUS: LabelSchema = LabelSchema {
    fields: &[
        optional(keys::WORK_STATUS),
        optional(keys::REQUIRE_SPONSORSHIP),
    ],
};

pub const DEGREE: LabelSchema = LabelSchema {
    fields: &[
        required(keys::SCHOOL),
        optional(keys::DEGREE),
        date(keys::START_DATE, false),
        date(keys::END_DATE, false),
        optional(keys::MAJOR),
        optional(keys::GPA),
    ],
};

pub const CERTIFICATION: LabelSchema = LabelSchema {
    fields: &[
        required(keys::NAME),
        optional(keys::ISSUER),
        date(keys::ISSUED, false),
        date(keys::EXPIRES, false),
        optional(keys::ID),
    ],
};

pub const PROJECT_OVERVIEW: LabelSchema = LabelSchema {
    fields: &[
        required(keys::TITLE),
        optional(keys::URL),
        optional(keys::URL_DESCRIPTION),
        date(keys::START_DATE, false),
        date(keys::END_DATE, false),
    ],
};

pub const ROLE_BASICS: LabelSchema = LabelSchema {
    fields: &[
        required(keys::COMPANY),
        optional(keys::AGENCY),
        optional(keys::JOB_CATEGORY),
        optional(keys::EMPLOYMENT_TYPE),
        date(keys::START_DATE, true),
        date(keys::END_DATE, false),
        optional(keys::REASON_FOR_CHANGE),
        required(keys::TITLE),
        optional(keys::LOCATION),
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Block dispatch
// ────────────────────────────────────────────────────────────────────────────

/// The three block strategies.
#[derive(Debug, Clone, Copy)]
pub enum BlockKind {
    Label(&'static LabelSchema),
    Text,
    List,
}

/// Where a leaf header sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Level 2 under `# Personal`.
    Personal,
    /// Level 3 under `## Degrees`.
    Degrees,
    /// Level 3 under `## Certifications`.
    Certifications,
    /// Level 4 under `### Project`.
    Project,
    /// Level 4 under `### Role`.
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf {
    ContactInformation,
    Websites,
    VisaStatus,
    Banner,
    Note,
    Degree,
    Certification,
    Overview,
    Description,
    ProjectSkills,
    Basics,
    Summary,
    Responsibilities,
    RoleSkills,
}

impl Leaf {
    pub fn title(self) -> &'static str {
        match self {
            Leaf::ContactInformation => "Contact Information",
            Leaf::Websites => "Websites",
            Leaf::VisaStatus => "Visa Status",
            Leaf::Banner => "Banner",
            Leaf::Note => "Note",
            Leaf::Degree => "Degree",
            Leaf::Certification => "Certification",
            Leaf::Overview => "Overview",
            Leaf::Description => "Description",
            Leaf::ProjectSkills | Leaf::RoleSkills => "Skills",
            Leaf::Basics => "Basics",
            Leaf::Summary => "Summary",
            Leaf::Responsibilities => "Responsibilities",
        }
    }

    pub fn kind(self) -> BlockKind {
        match self {
            Leaf::ContactInformation => BlockKind::Label(&CONTACT_INFORMATION),
            Leaf::Websites => BlockKind::Label(&WEBSITES),
            Leaf::VisaStatus => BlockKind::Label(&VISA_STATUS),
            Leaf::Degree => BlockKind::Label(&DEGREE),
            Leaf::Certification => BlockKind::Label(&CERTIFICATION),
            Leaf::Overview => BlockKind::Label(&PROJECT_OVERVIEW),
            Leaf::Basics => BlockKind::Label(&ROLE_BASICS),
            Leaf::Banner
            | Leaf::Note
            | Leaf::Description
            | Leaf::Summary
            | Leaf::Responsibilities => BlockKind::Text,
            Leaf::ProjectSkills | Leaf::RoleSkills => BlockKind::List,
        }
    }
}

/// New leaf block types register here.
const BLOCK_TABLE: &[(Context, Leaf)] = &[
    (Context::Personal, Leaf::ContactInformation),
    (Context::Personal, Leaf::Websites),
    (Context::Personal, Leaf::VisaStatus),
    (Context::Personal, Leaf::Banner),
    (Context::Personal, Leaf::Note),
    (Context::Degrees, Leaf::Degree),
    (Context::Certifications, Leaf::Certification),
    (Context::Project, Leaf::Overview),
    (Context::Project, Leaf::Description),
    (Context::Project, Leaf::ProjectSkills),
    (Context::Role, Leaf::Basics),
    (Context::Role, Leaf::Summary),
    (Context::Role, Leaf::Responsibilities),
    (Context::Role, Leaf::RoleSkills),
];

/// Resolves a header title (case-insensitive) in a nesting context.
pub fn lookup_block(context: Context, title: &str) -> Option<Leaf> {
    BLOCK_TABLE
        .iter()
        .filter(|(ctx, _)| *ctx == context)
        .map(|(_, leaf)| *leaf)
        .find(|leaf| leaf.title().eq_ignore_ascii_case(title.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("personal", Some(SectionName::Personal))]
    #[case("EDUCATION", Some(SectionName::Education))]
    #[case(" Certifications ", Some(SectionName::Certifications))]
    #[case("Experience", Some(SectionName::Experience))]
    #[case("Skills", None)]
    fn test_section_titles_match_case_insensitively(
        #[case] title: &str,
        #[case] expected: Option<SectionName>,
    ) {
        assert_eq!(SectionName::from_title(title), expected);
    }

    #[rstest]
    #[case("# Personal", Some((1, "Personal")))]
    #[case("#### Basics  ", Some((4, "Basics")))]
    #[case("##\tRoles", Some((2, "Roles")))]
    #[case("#", Some((1, "")))]
    #[case("##### Deep", None)]
    #[case("#hashtag", None)]
    #[case(" # indented", None)]
    #[case("plain text", None)]
    fn test_header_line_detection(#[case] line: &str, #[case] expected: Option<(usize, &str)>) {
        assert_eq!(parse_header_line(line), expected);
    }

    #[test]
    fn test_skills_resolve_per_context() {
        assert_eq!(lookup_block(Context::Role, "skills"), Some(Leaf::RoleSkills));
        assert_eq!(
            lookup_block(Context::Project, "SKILLS"),
            Some(Leaf::ProjectSkills)
        );
        assert_eq!(lookup_block(Context::Personal, "Skills"), None);
        assert_eq!(lookup_block(Context::Project, "Responsibilities"), None);
    }

    #[test]
    fn test_every_table_entry_resolves_to_itself() {
        for (context, leaf) in BLOCK_TABLE {
            assert_eq!(lookup_block(*context, leaf.title()), Some(*leaf));
        }
    }

    #[test]
    fn test_role_basics_required_keys() {
        let required: Vec<_> = ROLE_BASICS.required().map(|s| s.key).collect();
        assert_eq!(required, vec![keys::COMPANY, keys::START_DATE, keys::TITLE]);
        assert_eq!(ROLE_BASICS.lookup("start date").unwrap().kind, ValueKind::Date);
        assert!(ROLE_BASICS.lookup("Salary").is_none());
    }
}
