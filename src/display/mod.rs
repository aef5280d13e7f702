//! Display formatting for terminal output

pub mod refs;
pub mod settings;

pub use refs::format_reference_list;
pub use settings::format_settings;
