//! Leaf records of a resume: the label blocks and the Experience entries.
//!
//! Required fields are plain `String`/`MonthYear`; everything else is optional.
//! Label values are stored trimmed and single-line.

use serde::{Deserialize, Serialize};

use crate::models::date::MonthYear;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInformation {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Websites {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaStatus {
    pub work_status: Option<String>,
    pub require_sponsorship: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    pub school: String,
    pub degree: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
    pub major: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub issued: Option<MonthYear>,
    pub expires: Option<MonthYear>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBasics {
    pub company: String,
    pub agency: Option<String>,
    pub job_category: Option<String>,
    pub employment_type: Option<String>,
    pub start_date: MonthYear,
    /// `None` means the role is ongoing.
    pub end_date: Option<MonthYear>,
    pub reason_for_change: Option<String>,
    pub title: String,
    pub location: Option<String>,
}

impl RoleBasics {
    pub fn new(company: impl Into<String>, title: impl Into<String>, start_date: MonthYear) -> Self {
        Self {
            company: company.into(),
            agency: None,
            job_category: None,
            employment_type: None,
            start_date,
            end_date: None,
            reason_for_change: None,
            title: title.into(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub basics: RoleBasics,
    pub summary: Option<String>,
    pub responsibilities: Option<String>,
    /// Output order follows insertion order.
    pub skills: Option<Vec<String>>,
}

impl Role {
    pub fn new(basics: RoleBasics) -> Self {
        Self {
            basics,
            summary: None,
            responsibilities: None,
            skills: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.basics.end_date.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub title: String,
    pub url: Option<String>,
    pub url_description: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub overview: ProjectOverview,
    pub description: String,
    pub skills: Option<Vec<String>>,
}

impl Project {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            overview: ProjectOverview {
                title: title.into(),
                ..ProjectOverview::default()
            },
            description: description.into(),
            skills: None,
        }
    }
}
