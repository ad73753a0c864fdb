//! On-disk cache record format
//!
//! The record lives next to the binary as `{binary}.version`:
//! line 1 is the installed version, line 2 is blank, and every following
//! line is the root-relative path of one extracted file, in the order the
//! archive produced them. That ordered list, not a directory scan, is
//! what eviction trusts.

/// Installed-state record for one driver binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// Installed version string, exactly as resolved
    pub version: String,
    /// Root-relative paths of every extracted file, in encounter order
    pub extracted_files: Vec<String>,
}

impl CacheRecord {
    /// Creates a record for a freshly extracted install
    pub fn new(version: impl Into<String>, extracted_files: Vec<String>) -> Self {
        Self {
            version: version.into(),
            extracted_files,
        }
    }

    /// Parses the version-file text
    ///
    /// The first line is the version; anything after the blank separator is
    /// an extracted path, with blank lines skipped. Returns `None` for an
    /// empty file.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let version = lines.next()?.to_string();

        // Skip the blank separator line, then collect the path list.
        let extracted_files = lines
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            version,
            extracted_files,
        })
    }

    /// Serializes to the version-file text format
    pub fn serialize(&self) -> String {
        let mut text = String::with_capacity(
            self.version.len() + 2 + self.extracted_files.iter().map(|f| f.len() + 1).sum::<usize>(),
        );
        text.push_str(&self.version);
        text.push('\n');
        text.push('\n');
        for file in &self.extracted_files {
            text.push_str(file);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_format_has_version_blank_then_paths() {
        let record = CacheRecord::new(
            "142.0.7444.61",
            vec!["chromedriver.exe".to_string(), "LICENSE".to_string()],
        );
        assert_eq!(
            record.serialize(),
            "142.0.7444.61\n\nchromedriver.exe\nLICENSE\n"
        );
    }

    #[test]
    fn test_parse_recovers_version_and_files_in_order() {
        let record = CacheRecord::parse("142.0.7444.61\n\nchromedriver.exe\nLICENSE\n").unwrap();
        assert_eq!(record.version, "142.0.7444.61");
        assert_eq!(record.extracted_files, vec!["chromedriver.exe", "LICENSE"]);
    }

    #[test]
    fn test_parse_skips_interior_blank_lines() {
        let record = CacheRecord::parse("1.2.3.4\n\nchromedriver\n\n  \nTHIRD_PARTY\n").unwrap();
        assert_eq!(record.extracted_files, vec!["chromedriver", "THIRD_PARTY"]);
    }

    #[test]
    fn test_parse_version_only_record() {
        // A legacy record with no file list still yields its version.
        let record = CacheRecord::parse("76.0.3809.25").unwrap();
        assert_eq!(record.version, "76.0.3809.25");
        assert!(record.extracted_files.is_empty());
    }

    #[test]
    fn test_parse_empty_text_is_none() {
        assert!(CacheRecord::parse("").is_none());
    }
}
