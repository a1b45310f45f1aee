pub mod files;
pub mod limit;
pub mod lookup;
pub mod notify;
pub mod parse;
pub mod status;
