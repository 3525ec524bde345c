mod application;
mod status;

pub use application::{Application, LoanTerms, Name, PersonalInformation};
pub use status::{ApplicationStatus, StatusError};
