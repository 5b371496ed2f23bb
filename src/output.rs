//! CLI output formatting for all pipeline stages.
//!
//! Every `format_*` function is pure and returns display lines, so the exact
//! wording is unit-tested without capturing stdout. The matching `print_*`
//! wrappers (and the printer thread in `main`) write those lines out.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Images (2 matching .jpg, .png)
//!     001 a.jpg
//!     002 trips/c.JPG
//! Unreadable
//!     locked: Permission denied (os error 13)
//! ```
//!
//! ## Process
//!
//! ```text
//! 001 a.jpg
//!     Source: photos/a.jpg
//!     resized: written → a_resized.jpg
//!     thumbnail: File already exists → a_thumbnail.jpg
//! Skipping - not an image: photos/b.jpg
//! ```
//!
//! ## Summary
//!
//! ```text
//! 2 processed, 3 written, 1 reused, 1 skipped
//!     not an image (1)
//!         photos/b.jpg
//! Gallery → out/holiday/index.html (2 images)
//! ```

use crate::extensions::ExtensionSet;
use crate::process::{OutputStatus, ProcessEvent, ProcessSummary, SkipReason};
use crate::scan::ScanResult;
use std::path::Path;

/// Zero-padded positional index: `1` → `001`.
fn format_index(index: usize) -> String {
    format!("{index:03}")
}

/// `path` relative to `root` when it lies below it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the files found by a scan, relative to `root`.
pub fn format_scan_output(result: &ScanResult, root: &Path, extensions: &ExtensionSet) -> Vec<String> {
    let mut lines = vec![format!(
        "Images ({} matching {})",
        result.files.len(),
        extensions
    )];
    for (idx, file) in result.files.iter().enumerate() {
        lines.push(format!(
            "    {} {}",
            format_index(idx + 1),
            display_path(file, root)
        ));
    }

    if !result.unreadable.is_empty() {
        lines.push("Unreadable".to_string());
        for (path, reason) in &result.unreadable {
            lines.push(format!("    {}: {}", display_path(path, root), reason));
        }
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(result: &ScanResult, root: &Path, extensions: &ExtensionSet) {
    for line in format_scan_output(result, root, extensions) {
        println!("{}", line);
    }
}

// ============================================================================
// Process output
// ============================================================================

fn skip_message(reason: SkipReason) -> String {
    format!("Skipping - {reason}")
}

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ImageProcessed {
            index,
            source_path,
            outputs,
        } => {
            let mut lines = vec![
                format!("{} {}", format_index(*index), file_name(source_path)),
                format!("    Source: {}", source_path.display()),
            ];
            for output in outputs {
                let status = match output.status {
                    OutputStatus::Written => "written",
                    OutputStatus::Exists => "File already exists",
                };
                lines.push(format!(
                    "    {}: {} \u{2192} {}",
                    output.category,
                    status,
                    file_name(&output.path)
                ));
            }
            lines
        }
        ProcessEvent::ImageSkipped {
            source_path,
            reason,
            detail,
        } => {
            let mut lines = vec![format!(
                "{}: {}",
                skip_message(*reason),
                source_path.display()
            )];
            // NotAnImage carries no information beyond the reason itself
            if *reason != SkipReason::NotAnImage && !detail.is_empty() {
                lines.push(format!("    {detail}"));
            }
            lines
        }
    }
}

/// Format the end-of-run summary, grouping skipped files by reason.
pub fn format_summary(summary: &ProcessSummary) -> Vec<String> {
    let mut lines = vec![summary.to_string()];
    for (reason, paths) in &summary.skipped {
        lines.push(format!("    {} ({})", reason, paths.len()));
        for path in paths {
            lines.push(format!("        {}", path.display()));
        }
    }
    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(summary: &ProcessSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

pub fn format_generate_output(html_path: &Path, image_count: usize) -> String {
    format!(
        "Gallery \u{2192} {} ({} images)",
        html_path.display(),
        image_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::OutputInfo;
    use crate::types::Category;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }

    // =========================================================================
    // Scan output
    // =========================================================================

    #[test]
    fn scan_lists_relative_paths() {
        let result = ScanResult {
            files: vec![
                PathBuf::from("/photos/a.jpg"),
                PathBuf::from("/photos/trips/c.JPG"),
            ],
            unreadable: vec![],
        };
        let exts = ExtensionSet::normalize(["jpg", "png"]);
        let lines = format_scan_output(&result, Path::new("/photos"), &exts);
        assert_eq!(
            lines,
            vec![
                "Images (2 matching .jpg, .png)",
                "    001 a.jpg",
                "    002 trips/c.JPG",
            ]
        );
    }

    #[test]
    fn scan_reports_unreadable_entries() {
        let result = ScanResult {
            files: vec![],
            unreadable: vec![(
                PathBuf::from("/photos/locked"),
                "Permission denied".to_string(),
            )],
        };
        let exts = ExtensionSet::normalize(["jpg"]);
        let lines = format_scan_output(&result, Path::new("/photos"), &exts);
        assert_eq!(lines[0], "Images (0 matching .jpg)");
        assert_eq!(lines[1], "Unreadable");
        assert_eq!(lines[2], "    locked: Permission denied");
    }

    // =========================================================================
    // Process event formatting
    // =========================================================================

    #[test]
    fn format_processed_image() {
        let event = ProcessEvent::ImageProcessed {
            index: 1,
            source_path: PathBuf::from("photos/a.jpg"),
            outputs: vec![
                OutputInfo {
                    category: Category::Resized,
                    path: PathBuf::from("out/a_resized.jpg"),
                    status: OutputStatus::Written,
                },
                OutputInfo {
                    category: Category::Thumbnail,
                    path: PathBuf::from("out/a_thumbnail.jpg"),
                    status: OutputStatus::Exists,
                },
            ],
        };
        let lines = format_process_event(&event);
        assert_eq!(lines[0], "001 a.jpg");
        assert_eq!(lines[1], "    Source: photos/a.jpg");
        assert_eq!(lines[2], "    resized: written \u{2192} a_resized.jpg");
        assert_eq!(
            lines[3],
            "    thumbnail: File already exists \u{2192} a_thumbnail.jpg"
        );
    }

    #[test]
    fn format_skip_not_an_image() {
        let event = ProcessEvent::ImageSkipped {
            source_path: PathBuf::from("photos/b.jpg"),
            reason: SkipReason::NotAnImage,
            detail: "not an image".to_string(),
        };
        assert_eq!(
            format_process_event(&event),
            vec!["Skipping - not an image: photos/b.jpg"]
        );
    }

    #[test]
    fn format_skip_corrupt_shows_detail() {
        let event = ProcessEvent::ImageSkipped {
            source_path: PathBuf::from("photos/half.png"),
            reason: SkipReason::Corrupt,
            detail: "corrupt image: unexpected end of file".to_string(),
        };
        let lines = format_process_event(&event);
        assert_eq!(lines[0], "Skipping - corrupt image: photos/half.png");
        assert_eq!(lines[1], "    corrupt image: unexpected end of file");
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn summary_groups_skips_by_reason() {
        let mut skipped = BTreeMap::new();
        skipped.insert(SkipReason::NotAnImage, vec![PathBuf::from("b.txt")]);
        skipped.insert(
            SkipReason::Corrupt,
            vec![PathBuf::from("x.png"), PathBuf::from("y.png")],
        );
        let summary = ProcessSummary {
            processed: 2,
            written: 3,
            reused: 1,
            skipped,
        };

        let lines = format_summary(&summary);
        assert_eq!(
            lines,
            vec![
                "2 processed, 3 written, 1 reused, 3 skipped",
                "    not an image (1)",
                "        b.txt",
                "    corrupt image (2)",
                "        x.png",
                "        y.png",
            ]
        );
    }

    #[test]
    fn summary_without_skips_is_one_line() {
        let lines = format_summary(&ProcessSummary::default());
        assert_eq!(lines, vec!["0 processed, 0 written, 0 reused, 0 skipped"]);
    }

    #[test]
    fn generate_line() {
        assert_eq!(
            format_generate_output(Path::new("out/g/index.html"), 2),
            "Gallery \u{2192} out/g/index.html (2 images)"
        );
    }
}
