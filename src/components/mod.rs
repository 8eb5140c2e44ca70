pub mod app;
pub mod file_list;
pub mod lock_toggle;
pub mod preferences;
pub mod results;
