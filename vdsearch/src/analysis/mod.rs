pub mod evidence;
pub mod ribozyme_filter;
pub mod summary;
