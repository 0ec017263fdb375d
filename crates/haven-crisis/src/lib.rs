pub mod detect;
pub mod response;

pub use detect::{log_detection, CrisisDetector, CrisisVerdict, Severity};
pub use response::crisis_response;
