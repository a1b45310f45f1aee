pub mod blog;
pub mod business;
pub mod business_type;
pub mod category;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod enquiry;
pub mod event;
pub mod export;
pub mod gallery;
pub mod init;
pub mod mail;
pub mod receipt;
pub mod service;
pub mod session;
pub mod shared;
pub mod upload;
pub mod user;
