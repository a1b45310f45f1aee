mod business;
mod category;
mod config;
mod content;
mod directory;
mod enquiry;
mod mail;
mod receipt;
mod session;
mod user;

pub use business::{BusinessCommands, BusinessFields, GalleryCommands, ServiceCommands};
pub use category::{CategoryCommands, TypeCommands};
pub use config::ConfigCommands;
pub use content::{BlogCommands, EventCommands};
pub use directory::{BusinessGridArgs, DirectoryCommands, PolicyArg};
pub use enquiry::EnquiryCommands;
pub use mail::MailCommands;
pub use receipt::ReceiptCommands;
pub use session::SessionCommands;
pub use user::UserCommands;
