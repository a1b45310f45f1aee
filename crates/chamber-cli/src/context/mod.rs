mod app_context;
mod config_warnings;
mod mailer;
pub mod session_file;

pub use app_context::AppContext;
pub use config_warnings::warn_unconfigured;
pub use mailer::AppMailer;
