pub mod error;
pub mod params;
pub mod response;
pub mod validated_json;

pub use params::ListParams;
pub use response::{AffectedRows, ApiResponse};
pub use validated_json::ValidatedJson;
