use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("postcode {postcode:?} does not map to a department")]
    InvalidPostcode { postcode: String },
}
