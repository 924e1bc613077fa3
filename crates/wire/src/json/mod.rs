//! JSON wire encoding for agent records

mod decode;
mod encode;

pub use decode::{decode_agent, DecodeError};
pub use encode::{encode_agent, EncodeError};

/// Wire tags in emission order
pub const TAGS: [&str; 9] = [
    "ID",
    "DID",
    "NAME",
    "ADDRESS",
    "REPRESENTS",
    "TYPE",
    "ROLES",
    "IAM",
    "STATUS",
];
