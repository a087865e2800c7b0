use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};
use unibundle_ingest::{ExtractedFile, Progress};

#[derive(Debug, Clone, Tabled)]
pub struct FileRow {
    #[tabled(rename = "PATH")]
    pub path: String,
    #[tabled(rename = "BYTES")]
    pub bytes: usize,
}

impl From<&ExtractedFile> for FileRow {
    fn from(file: &ExtractedFile) -> Self {
        Self {
            path: file.path.clone(),
            bytes: file.len(),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct DecisionRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "PATH")]
    pub path: String,
    #[tabled(rename = "DECISION")]
    pub decision: String,
}

impl From<&Progress> for DecisionRow {
    fn from(progress: &Progress) -> Self {
        Self {
            index: progress.index,
            path: progress.path.clone(),
            decision: progress.decision.to_string(),
        }
    }
}

pub struct Formatter;

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Formatter {
    pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>, config: FormatConfig) -> Table {
        let mut table = Table::new(rows);
        if let Some(header) = config.header {
            table.with(Panel::header(header));
        }
        if let Some(footer) = config.footer {
            table.with(Panel::footer(footer));
        }
        table.with(Style::blank());
        table
    }
}
