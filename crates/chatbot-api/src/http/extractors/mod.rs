//! Request extractors: JSON bodies with envelope rejections, lenient
//! pagination parameters, and conversation ids.

pub mod json;
pub mod path;
pub mod query;
