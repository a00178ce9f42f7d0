use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{AnalysisSummary, Classification};
use crate::storage::{OutputLayout, ATTRIBUTE_FILE_SUFFIX};

/// Scans a query group's folder of previously fetched attribute files,
/// classifies each one, and appends a summary section to the shared
/// results file.
pub struct AttributesAnalyzer {
    layout: OutputLayout,
}

impl AttributesAnalyzer {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// The group's folder must already exist under the output root. A
    /// repository without a fetched file is simply not analyzed; it never
    /// counts as "no LFS".
    pub fn analyze(&self, group: &str) -> Result<AnalysisSummary> {
        let group_dir = self.layout.group_dir(group);
        if !group_dir.is_dir() {
            return Err(Error::MissingAnalysisFolder(group_dir));
        }

        let mut summary = AnalysisSummary::new(group);
        for path in candidate_files(&group_dir)? {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::error!(
                        "Error while analyzing .gitattributes file \"{}\": {}",
                        path.display(),
                        e
                    );
                    continue;
                }
            };
            summary.record(Classification::of_content(&content), path);
        }

        if let Err(e) = self.layout.append_results(&summary.render()) {
            tracing::error!("Error while writing results for \"{}\": {}", group, e);
        }

        Ok(summary)
    }
}

/// Immediate children only, regular files whose names end with the
/// attribute-file suffix, in sorted order for deterministic reports.
fn candidate_files(dir: &std::path::Path) -> Result<Vec<PathBuf>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(ATTRIBUTE_FILE_SUFFIX))
        })
        .collect();
    candidates.sort();
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_attribute_file(layout: &OutputLayout, group: &str, repository: &str, content: &str) {
        fs::write(layout.attribute_file_path(group, repository), content).unwrap();
    }

    fn setup(group: &str) -> (tempfile::TempDir, OutputLayout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        layout.ensure_group_dirs(group).unwrap();
        (dir, layout)
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = AttributesAnalyzer::new(OutputLayout::new(dir.path()));
        let result = analyzer.analyze("Nothing Here");
        assert!(matches!(result, Err(Error::MissingAnalysisFolder(_))));
        assert!(!dir.path().join("results.txt").exists());
    }

    #[test]
    fn test_zero_candidates_still_appends_a_section() {
        let (dir, layout) = setup("Empty Group");
        let analyzer = AttributesAnalyzer::new(layout.clone());

        let summary = analyzer.analyze("Empty Group").unwrap();
        assert_eq!(summary.lfs_count, 0);
        assert_eq!(summary.unity_count, 0);

        let results = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert!(results.contains("Results for: Empty Group"));
        assert!(results.contains("Number of repositories using Git LFS: 0"));
        assert!(results.contains("Number of unity usages: 0"));
    }

    #[test]
    fn test_case_insensitive_lfs_detection() {
        let (_dir, layout) = setup("G");
        write_attribute_file(
            &layout,
            "G",
            "a/b",
            "A FILTER=LFS DIFF=LFS MERGE=LFS -text\n",
        );
        let analyzer = AttributesAnalyzer::new(layout);

        let summary = analyzer.analyze("G").unwrap();
        assert_eq!(summary.lfs_count, 1);
        assert_eq!(summary.unity_count, 0);
        assert_eq!(summary.non_unity_paths.len(), 1);
    }

    #[test]
    fn test_unity_files_are_counted_but_not_listed() {
        let (dir, layout) = setup("G");
        write_attribute_file(
            &layout,
            "G",
            "game/project",
            "# Unity template\n*.asset filter=lfs diff=lfs merge=lfs -text\n",
        );
        write_attribute_file(
            &layout,
            "G",
            "plain/repo",
            "*.bin filter=lfs diff=lfs merge=lfs -text\n",
        );
        write_attribute_file(&layout, "G", "no/lfs", "*.txt text\n");
        let analyzer = AttributesAnalyzer::new(layout.clone());

        let summary = analyzer.analyze("G").unwrap();
        assert_eq!(summary.lfs_count, 2);
        assert_eq!(summary.unity_count, 1);
        assert_eq!(
            summary.non_unity_paths,
            vec![layout.attribute_file_path("G", "plain/repo")]
        );

        let results = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert!(results.contains("plain_repo_gitattributes"));
        assert!(!results.contains("game_project_gitattributes"));
    }

    #[test]
    fn test_only_suffix_matching_immediate_children_are_scanned() {
        let (_dir, layout) = setup("G");
        write_attribute_file(
            &layout,
            "G",
            "a/b",
            "*.bin filter=lfs diff=lfs merge=lfs -text\n",
        );
        // Dump files and nested content must not be picked up.
        fs::write(
            layout.group_dir("G").join("notes.txt"),
            "filter=lfs diff=lfs merge=lfs\n",
        )
        .unwrap();
        fs::write(
            layout.mining_data_dir("G").join("c_d_gitattributes"),
            "*.bin filter=lfs diff=lfs merge=lfs -text\n",
        )
        .unwrap();
        let analyzer = AttributesAnalyzer::new(layout);

        let summary = analyzer.analyze("G").unwrap();
        assert_eq!(summary.lfs_count, 1);
    }

    #[test]
    fn test_sections_accumulate_across_runs() {
        let (dir, layout) = setup("First");
        layout.ensure_group_dirs("Second").unwrap();
        let analyzer = AttributesAnalyzer::new(layout);

        analyzer.analyze("First").unwrap();
        analyzer.analyze("Second").unwrap();

        let results = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert!(results.contains("Results for: First"));
        assert!(results.contains("Results for: Second"));
        let first = results.find("Results for: First").unwrap();
        let second = results.find("Results for: Second").unwrap();
        assert!(first < second);
    }

    // End-to-end example from the mining contract: one Unity LFS file and
    // one plain LFS file in group "G".
    #[test]
    fn test_report_for_mixed_group() {
        let (dir, layout) = setup("G");
        write_attribute_file(
            &layout,
            "G",
            "unity/game",
            "*.asset filter=lfs diff=lfs merge=lfs -text\n# unity junk\n",
        );
        write_attribute_file(
            &layout,
            "G",
            "other/repo",
            "*.iso filter=lfs diff=lfs merge=lfs -text\n",
        );
        let analyzer = AttributesAnalyzer::new(layout.clone());

        let summary = analyzer.analyze("G").unwrap();
        assert_eq!(summary.lfs_count, 2);
        assert_eq!(summary.unity_count, 1);
        assert_eq!(
            summary.non_unity_paths,
            vec![layout.attribute_file_path("G", "other/repo")]
        );

        let results = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert!(results.contains("Potential none unity usages:"));
        assert!(results.contains("other_repo_gitattributes"));
        assert!(results.contains("Number of repositories using Git LFS: 2"));
        assert!(results.contains("Number of unity usages: 1"));
    }
}
