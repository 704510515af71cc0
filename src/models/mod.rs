pub mod document;
pub mod upload;
pub mod user;

pub use document::{Document, ViewSync};
pub use upload::{
    AttemptStatus, FilePayload, Priority, ProgressSnapshot, UploadAttempt, UploadOutcome,
    UploadPayload, ValidatedRequest, DEPARTMENTS,
};
pub use user::AuthUser;
