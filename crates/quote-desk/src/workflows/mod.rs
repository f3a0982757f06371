pub mod catalog_import;
pub mod quoting;
