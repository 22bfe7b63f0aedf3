pub mod catalog_service;
pub mod spec_formatter;
