use std::path::PathBuf;

/// Combined marker tokens that a Git LFS tracking rule carries.
pub const LFS_MARKER: &str = "filter=lfs diff=lfs merge=lfs";

/// Token indicating the file likely stems from a Unity project template.
pub const UNITY_TOKEN: &str = "unity";

/// Classification of a single fetched .gitattributes file, computed
/// purely from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoLfs,
    LfsUnity,
    LfsNonUnity,
}

impl Classification {
    /// Both checks are case-insensitive, line-based substring matches;
    /// the attribute format is not parsed beyond that.
    pub fn of_content(content: &str) -> Self {
        let mut uses_lfs = false;
        let mut mentions_unity = false;

        for line in content.lines() {
            let line = line.to_lowercase();
            if line.contains(LFS_MARKER) {
                uses_lfs = true;
            }
            if line.contains(UNITY_TOKEN) {
                mentions_unity = true;
            }
        }

        if !uses_lfs {
            Classification::NoLfs
        } else if mentions_unity {
            Classification::LfsUnity
        } else {
            Classification::LfsNonUnity
        }
    }

    pub fn uses_lfs(&self) -> bool {
        !matches!(self, Classification::NoLfs)
    }
}

/// Aggregated result of analyzing one query group's folder. Rendered as
/// one append-only section of the shared results file.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    pub group_name: String,
    pub lfs_count: u32,
    pub unity_count: u32,
    /// Unity template usage is the expected majority case, so the
    /// non-Unity LFS repositories are the notable finding worth listing.
    pub non_unity_paths: Vec<PathBuf>,
}

impl AnalysisSummary {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, classification: Classification, path: PathBuf) {
        match classification {
            Classification::NoLfs => {}
            Classification::LfsUnity => {
                self.lfs_count += 1;
                self.unity_count += 1;
            }
            Classification::LfsNonUnity => {
                self.lfs_count += 1;
                self.non_unity_paths.push(path);
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("--------------------------------------------------\n");
        out.push_str(&format!("Results for: {}\n", self.group_name));
        out.push('\n');

        if !self.non_unity_paths.is_empty() {
            out.push_str("Potential none unity usages:\n");
            for path in &self.non_unity_paths {
                out.push_str(&format!("\t{}\n", path.display()));
            }
        }

        out.push('\n');
        out.push_str(&format!(
            "Number of repositories using Git LFS: {}\n",
            self.lfs_count
        ));
        out.push_str(&format!("Number of unity usages: {}\n", self.unity_count));
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lfs_marker_case_insensitive() {
        let content = "A FILTER=LFS DIFF=LFS MERGE=LFS -text";
        assert_eq!(Classification::of_content(content), Classification::LfsNonUnity);

        let content = "*.psd filter=lfs diff=lfs merge=lfs -text";
        assert_eq!(Classification::of_content(content), Classification::LfsNonUnity);
    }

    #[test]
    fn test_classify_unity_subset() {
        let content = "# Unity project\n*.asset filter=lfs diff=lfs merge=lfs -text";
        assert_eq!(Classification::of_content(content), Classification::LfsUnity);
    }

    #[test]
    fn test_unity_token_alone_is_not_lfs() {
        let content = "# mentions unity but tracks nothing";
        assert_eq!(Classification::of_content(content), Classification::NoLfs);
    }

    #[test]
    fn test_marker_split_across_lines_does_not_match() {
        let content = "*.bin filter=lfs diff=lfs\nmerge=lfs";
        assert_eq!(Classification::of_content(content), Classification::NoLfs);
    }

    #[test]
    fn test_render_section_with_zero_counts() {
        let summary = AnalysisSummary::new("Empty Group");
        let section = summary.render();
        assert!(section.contains("Results for: Empty Group\n"));
        assert!(section.contains("Number of repositories using Git LFS: 0\n"));
        assert!(section.contains("Number of unity usages: 0\n"));
        assert!(!section.contains("Potential none unity usages:"));
    }

    #[test]
    fn test_render_lists_non_unity_paths() {
        let mut summary = AnalysisSummary::new("G");
        summary.record(Classification::LfsUnity, PathBuf::from("a_b_gitattributes"));
        summary.record(
            Classification::LfsNonUnity,
            PathBuf::from("c_d_gitattributes"),
        );
        let section = summary.render();
        assert!(section.contains("Potential none unity usages:\n\tc_d_gitattributes\n"));
        assert!(!section.contains("\ta_b_gitattributes"));
        assert!(section.contains("Number of repositories using Git LFS: 2\n"));
        assert!(section.contains("Number of unity usages: 1\n"));
    }
}
