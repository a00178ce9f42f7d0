use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::Result;

/// Suffix of every fetched attribute file; the analyzer selects
/// candidates by it.
pub const ATTRIBUTE_FILE_SUFFIX: &str = "gitattributes";

/// Name of the subfolder holding raw search-page dumps for audit.
const MINING_DATA_FOLDER: &str = "Mining Data";

/// On-disk layout of one mining run: one folder per query group holding
/// fetched attribute files plus a dump subfolder, and a shared append-only
/// results file at the root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn group_dir(&self, group: &str) -> PathBuf {
        self.root.join(group)
    }

    pub fn mining_data_dir(&self, group: &str) -> PathBuf {
        self.group_dir(group).join(MINING_DATA_FOLDER)
    }

    pub fn results_file(&self) -> PathBuf {
        self.root.join("results.txt")
    }

    /// Create the group's folder tree if it does not exist yet.
    pub fn ensure_group_dirs(&self, group: &str) -> Result<()> {
        fs::create_dir_all(self.mining_data_dir(group))?;
        Ok(())
    }

    /// Local name for a repository's fetched attribute file, with the
    /// path separator of `<owner>/<repo>` replaced by an underscore.
    pub fn attribute_file_name(repository: &str) -> String {
        format!(
            "{}_{}",
            repository.replace('/', "_"),
            ATTRIBUTE_FILE_SUFFIX
        )
    }

    pub fn attribute_file_path(&self, group: &str, repository: &str) -> PathBuf {
        self.group_dir(group).join(Self::attribute_file_name(repository))
    }

    /// Persist one raw search API page for audit. The page number keeps
    /// names unique when two pages arrive within the same millisecond.
    pub fn dump_search_page(&self, group: &str, page: u32, body: &str) -> Result<PathBuf> {
        let path = self.mining_data_dir(group).join(format!(
            "repositories-{}-p{}.json",
            Utc::now().timestamp_millis(),
            page
        ));
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Persist one rendered code search page for audit.
    pub fn dump_code_search_page(&self, group: &str, page: u32, html: &str) -> Result<PathBuf> {
        let path = self.mining_data_dir(group).join(format!(
            "code_search_page_{}_p{}.html",
            Utc::now().timestamp_millis(),
            page
        ));
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Append a report section to the shared results file, creating it on
    /// first use. Prior sections are never overwritten.
    pub fn append_results(&self, section: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.results_file())?;
        file.write_all(section.as_bytes())?;
        Ok(())
    }
}
