//! Output formats for parsed OPN
//!
//! - `source` - canonical OPN text, supporting round-trips
//! - `tag` - XML-like structural dump
//! - `treeviz` - indented tree for quick inspection
//!
//! JSON and YAML output go through [`crate::opn::ast::snapshot`] plus
//! serde, not through this module.

pub mod source;
pub mod tag;
pub mod treeviz;

pub use source::to_source;
pub use tag::to_tag_string;
pub use treeviz::to_treeviz_string;
