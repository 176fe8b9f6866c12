pub mod issue;
pub mod record;
pub mod verdict;

pub use issue::{Issue, IssueKind, Severity};
pub use record::{GeoRecord, RecordRef};
pub use verdict::LocationVerdict;
