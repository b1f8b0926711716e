//! Spreadsheet rendering of the status matrix
//!
//! The workbook holds a single sheet laid out as follows:
//!
//! - A bold, centered title merged across every column
//! - A header row with `Status`, one column per issue type, and `Total`
//! - The matrix rows, bold for the Reviewed/Pending/Overall aggregates and italic for
//!   the individual query sets, with merged blank separator rows between the groups
//!
//! Every column gets the same fixed width.

mod excel;

pub use excel::generate as generate_xlsx;
pub use excel::save as save_xlsx;

pub const DEFAULT_TITLE: &str = "Security Jiras";
pub const DEFAULT_SHEET_NAME: &str = "Jira AppSec Matrix";
pub const DEFAULT_COLUMN_WIDTH: f64 = 16.0;

/// Presentation settings for the generated workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Text of the title row
    pub title: String,

    /// Name of the worksheet
    pub sheet_name: String,

    /// Width applied to every column, in Excel character units
    pub column_width: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
