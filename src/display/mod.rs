/// Formats employees, balances and leave applications as Markdown text.
pub mod formatter;

pub use formatter::{
    format_ambiguous, format_application, format_balance, format_employee_card,
    format_employee_option, format_employee_options, format_not_found, format_search_matches,
    HELP_TEXT,
};
