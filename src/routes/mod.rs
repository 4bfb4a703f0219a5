pub mod auth;
pub mod health;
pub mod results;
pub mod upload;

pub use auth::{login, login_form, logout, register, register_form};
pub use health::health_check;
pub use results::results;
pub use upload::{comparison_form, index_form, upload_comparison, upload_initial};
