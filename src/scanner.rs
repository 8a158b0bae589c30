// SPDX-License-Identifier: PMPL-1.0-or-later
//! Batch driver: evaluates HTML files one at a time or across a directory.
//!
//! Each file goes through the full pipeline (rule evaluation, ARIA
//! validation, compliance calculation) under one shared [`Config`].

use crate::aria::{AriaValidationResult, AriaValidator};
use crate::compliance::{ComplianceCalculator, ComplianceReport};
use crate::config::Config;
use crate::dom::Document;
use crate::error::Result;
use crate::executor::RuleExecutor;
use crate::issue::EvaluationResult;
use crate::rules::RuleRegistry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Everything produced for one document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub evaluation: EvaluationResult,
    pub aria: AriaValidationResult,
    pub compliance: ComplianceReport,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        self.evaluation.has_errors() || self.aria.has_errors()
    }
}

/// A file that could not be evaluated
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::has_errors)
    }

    pub fn total_issues(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.evaluation.summary.total_issues + f.aria.issues.len())
            .sum()
    }
}

/// Runs the pipeline over files
pub struct Scanner {
    executor: RuleExecutor,
    validator: AriaValidator,
    calculator: ComplianceCalculator,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        Self {
            executor: RuleExecutor::new(RuleRegistry::wcag(), config.clone()),
            validator: AriaValidator::new(config.aria.clone()),
            calculator: ComplianceCalculator::new(config),
        }
    }

    /// Evaluate an already parsed document
    pub fn evaluate_document(&self, path: &Path, document: &Document) -> FileReport {
        let evaluation = self.executor.evaluate(document);
        let aria = self.validator.validate(document);
        let compliance = self.calculator.calculate_configured(&evaluation);
        FileReport {
            path: path.to_path_buf(),
            evaluation,
            aria,
            compliance,
        }
    }

    /// Evaluate a single file. Unreadable or empty files are errors.
    pub fn evaluate_file(&self, path: &Path) -> Result<FileReport> {
        let document = Document::from_file(path)?;
        Ok(self.evaluate_document(path, &document))
    }

    /// Evaluate every HTML file under `dir`.
    ///
    /// Files that fail to load are recorded as skipped; the scan goes on.
    pub fn scan_directory(&self, dir: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        info!("Scanning directory: {}", dir.display());

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_str().unwrap_or("");
                if e.file_type().is_dir() && e.depth() > 0 {
                    return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
                }
                true
            })
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !SCANNABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                continue;
            }

            match self.evaluate_file(path) {
                Ok(file_report) => report.files.push(file_report),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Scanned {} files ({} skipped), found {} issues",
            report.files.len(),
            report.skipped.len(),
            report.total_issues()
        );

        report
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_nonexistent_dir() {
        let report = Scanner::default().scan_directory(Path::new("/nonexistent/path"));
        assert!(report.files.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_scan_skips_excluded_dirs() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("index.html"), r#"<html lang="en"><body><h1>Hi</h1></body></html>"#)
            .expect("write");
        fs::write(dir.path().join("notes.txt"), "<img src=x>").expect("write");
        fs::create_dir(dir.path().join("node_modules")).expect("mkdir");
        fs::write(dir.path().join("node_modules").join("bad.html"), "<img src=x>").expect("write");
        fs::create_dir(dir.path().join(".cache")).expect("mkdir");
        fs::write(dir.path().join(".cache").join("bad.html"), "<img src=x>").expect("write");

        let report = Scanner::default().scan_directory(dir.path());
        assert_eq!(report.files.len(), 1);
        assert!(report.files[0].path.ends_with("index.html"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_blank_file_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("empty.html"), "   \n").expect("write");
        fs::write(dir.path().join("page.htm"), r#"<img src="x.jpg">"#).expect("write");

        let report = Scanner::default().scan_directory(dir.path());
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("empty.html"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_evaluate_missing_file() {
        assert!(Scanner::default().evaluate_file(Path::new("/nonexistent/page.html")).is_err());
    }
}
