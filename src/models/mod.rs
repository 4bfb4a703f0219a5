pub mod upload;
pub mod user;

pub use upload::{UploadKind, UploadRecord, UploadView};
pub use user::UserRecord;
