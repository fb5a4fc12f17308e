pub mod identifiers;
pub mod validation;

pub use identifiers::{ContentVersion, DocumentId, IdParseError, ProjectId};
pub use validation::{FieldViolation, Limit, ValidationError, Violation, Violations};
