//! ID prefix constants.
//!
//! IDs are generated by the database layer as `{prefix}-{8 hex chars}`,
//! e.g. `biz-a3f8b2c1`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_CATEGORY: &str = "cat";
pub const PREFIX_TYPE: &str = "typ";
pub const PREFIX_BUSINESS: &str = "biz";
pub const PREFIX_SERVICE: &str = "svc";
pub const PREFIX_IMAGE: &str = "img";
pub const PREFIX_ENQUIRY: &str = "enq";
pub const PREFIX_RECEIPT: &str = "rct";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_POST: &str = "pst";

/// Every prefix, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_CATEGORY,
    PREFIX_TYPE,
    PREFIX_BUSINESS,
    PREFIX_SERVICE,
    PREFIX_IMAGE,
    PREFIX_ENQUIRY,
    PREFIX_RECEIPT,
    PREFIX_EVENT,
    PREFIX_POST,
];
