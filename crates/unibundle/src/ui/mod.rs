mod spinner;
mod table;

pub use spinner::StageSpinner;
pub use table::{DecisionRow, FileRow, FormatConfig, Formatter};
