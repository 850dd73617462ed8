//! Mapping between label schemas and the typed model records.

use crate::errors::ParseResult;
use crate::markdown::blocks::Fields;
use crate::markdown::grammar::{self, keys, LabelSchema};
use crate::models::{
    Certification, ContactInformation, Degree, MonthYear, ProjectOverview, RoleBasics,
    VisaStatus, Websites,
};

/// A model record stored as a label block.
pub trait LabelBlock: Sized {
    const SCHEMA: &'static LabelSchema;

    fn from_fields(fields: &Fields) -> ParseResult<Self>;

    /// The value written for `key`, or `None` when the field is absent.
    fn field(&self, key: &str) -> Option<String>;
}

fn date(value: Option<MonthYear>) -> Option<String> {
    value.map(|d| d.to_string())
}

impl LabelBlock for ContactInformation {
    const SCHEMA: &'static LabelSchema = &grammar::CONTACT_INFORMATION;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            name: fields.required(keys::NAME)?,
            email: fields.text(keys::EMAIL),
            phone: fields.text(keys::PHONE),
            location: fields.text(keys::LOCATION),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::NAME => Some(self.name.clone()),
            keys::EMAIL => self.email.clone(),
            keys::PHONE => self.phone.clone(),
            keys::LOCATION => self.location.clone(),
            _ => None,
        }
    }
}

impl LabelBlock for Websites {
    const SCHEMA: &'static LabelSchema = &grammar::WEBSITES;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            github: fields.text(keys::GITHUB),
            linkedin: fields.text(keys::LINKEDIN),
            website: fields.text(keys::WEBSITE),
            twitter: fields.text(keys::TWITTER),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::GITHUB => self.github.clone(),
            keys::LINKEDIN => self.linkedin.clone(),
            keys::WEBSITE => self.website.clone(),
            keys::TWITTER => self.twitter.clone(),
            _ => None,
        }
    }
}

impl LabelBlock for VisaStatus {
    const SCHEMA: &'static LabelSchema = &grammar::VISA_STATUS;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            work_status: fields.text(keys::WORK_STATUS),
            require_sponsorship: fields.text(keys::REQUIRE_SPONSORSHIP),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::WORK_STATUS => self.work_status.clone(),
            keys::REQUIRE_SPONSORSHIP => self.require_sponsorship.clone(),
            _ => None,
        }
    }
}

impl LabelBlock for Degree {
    const SCHEMA: &'static LabelSchema = &grammar::DEGREE;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            school: fields.required(keys::SCHOOL)?,
            degree: fields.text(keys::DEGREE),
            start_date: fields.date(keys::START_DATE)?,
            end_date: fields.date(keys::END_DATE)?,
            major: fields.text(keys::MAJOR),
            gpa: fields.text(keys::GPA),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::SCHOOL => Some(self.school.clone()),
            keys::DEGREE => self.degree.clone(),
            keys::START_DATE => date(self.start_date),
            keys::END_DATE => date(self.end_date),
            keys::MAJOR => self.major.clone(),
            keys::GPA => self.gpa.clone(),
            _ => None,
        }
    }
}

impl LabelBlock for Certification {
    const SCHEMA: &'static LabelSchema = &grammar::CERTIFICATION;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            name: fields.required(keys::NAME)?,
            issuer: fields.text(keys::ISSUER),
            issued: fields.date(keys::ISSUED)?,
            expires: fields.date(keys::EXPIRES)?,
            id: fields.text(keys::ID),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::NAME => Some(self.name.clone()),
            keys::ISSUER => self.issuer.clone(),
            keys::ISSUED => date(self.issued),
            keys::EXPIRES => date(self.expires),
            keys::ID => self.id.clone(),
            _ => None,
        }
    }
}

impl LabelBlock for ProjectOverview {
    const SCHEMA: &'static LabelSchema = &grammar::PROJECT_OVERVIEW;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            title: fields.required(keys::TITLE)?,
            url: fields.text(keys::URL),
            url_description: fields.text(keys::URL_DESCRIPTION),
            start_date: fields.date(keys::START_DATE)?,
            end_date: fields.date(keys::END_DATE)?,
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::TITLE => Some(self.title.clone()),
            keys::URL => self.url.clone(),
            keys::URL_DESCRIPTION => self.url_description.clone(),
            keys::START_DATE => date(self.start_date),
            keys::END_DATE => date(self.end_date),
            _ => None,
        }
    }
}

impl LabelBlock for RoleBasics {
    const SCHEMA: &'static LabelSchema = &grammar::ROLE_BASICS;

    fn from_fields(fields: &Fields) -> ParseResult<Self> {
        Ok(Self {
            company: fields.required(keys::COMPANY)?,
            agency: fields.text(keys::AGENCY),
            job_category: fields.text(keys::JOB_CATEGORY),
            employment_type: fields.text(keys::EMPLOYMENT_TYPE),
            start_date: fields.required_date(keys::START_DATE)?,
            end_date: fields.date(keys::END_DATE)?,
            reason_for_change: fields.text(keys::REASON_FOR_CHANGE),
            title: fields.required(keys::TITLE)?,
            location: fields.text(keys::LOCATION),
        })
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            keys::COMPANY => Some(self.company.clone()),
            keys::AGENCY => self.agency.clone(),
            keys::JOB_CATEGORY => self.job_category.clone(),
            keys::EMPLOYMENT_TYPE => self.employment_type.clone(),
            keys::START_DATE => date(Some(self.start_date)),
            keys::END_DATE => date(self.end_date),
            keys::REASON_FOR_CHANGE => self.reason_for_change.clone(),
            keys::TITLE => Some(self.title.clone()),
            keys::LOCATION => self.location.clone(),
            _ => None,
        }
    }
}
