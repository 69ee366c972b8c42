pub mod fields;
pub mod health;
pub mod report;
pub mod wizard;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use fields::list_fields;
pub use health::health_check;
pub use report::{download_report, export_report};
pub use wizard::{advance, get_wizard, jump_to_section, reset, retreat, submit, update_field};
