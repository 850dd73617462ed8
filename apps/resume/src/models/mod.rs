pub mod date;
pub mod entries;
pub mod resume;

pub use date::{DateRange, InvalidMonthYear, MonthYear};
pub use entries::{
    Certification, ContactInformation, Degree, Project, ProjectOverview, Role, RoleBasics,
    VisaStatus, Websites,
};
pub use resume::{Certifications, Document, Education, EntryRef, Experience, Personal};
