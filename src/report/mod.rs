/*!
 * Report Module
 * Peak usage reporting and byte formatting
 */

pub mod format;
pub mod report;

pub use format::format_bytes;
pub use report::{LocationRow, Report, ReportFormat};
