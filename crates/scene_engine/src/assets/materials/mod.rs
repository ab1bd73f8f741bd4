//! Material file support

pub mod mtl_parser;

pub use mtl_parser::{MtlParser, MtlData};
