//! Defines common types shared between the allowance client and its
//! consumers

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod types;
