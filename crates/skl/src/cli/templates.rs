//! # Templates
//!
//! Output is produced by minijinja templates kept as standalone files in
//! `templates/` and embedded at compile time, so layout changes stay out of the
//! Rust code.
//!
//! Conventions:
//! - Line breaks are explicit (`{{ "\n" }}` or trimmed blocks) so loops and
//!   conditionals do not leak blank lines.
//! - Width math (padding, truncation) is done in Rust; templates get finished
//!   strings plus semantic flags and pick styles with the `style` filter.
//! - The HTML print page uses plain escaping and no `style` filter.

pub const STATUS_TEMPLATE: &str = include_str!("templates/status.jinja");
pub const LIST_TEMPLATE: &str = include_str!("templates/list.jinja");
pub const FIELDS_TEMPLATE: &str = include_str!("templates/fields.jinja");
pub const ROSTER_TEMPLATE: &str = include_str!("templates/roster.jinja");
pub const CERTIFICATE_TEMPLATE: &str = include_str!("templates/certificate.jinja");
pub const PRINT_TEMPLATE: &str = include_str!("templates/print.html.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
pub const PATHS_TEMPLATE: &str = include_str!("templates/paths.jinja");
