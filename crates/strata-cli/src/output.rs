use colored::Colorize;
use serde::Serialize;
use strata_types::{Change, ChangeSummary, ChangeType, PathEntry};

use crate::cli::OutputFormat;

#[derive(Serialize)]
struct DiffReport<'a> {
    changes: &'a [Change],
    summary: ChangeSummary,
}

pub fn render_changes(changes: &[Change], format: OutputFormat) -> anyhow::Result<String> {
    let summary = ChangeSummary::from_changes(changes);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&DiffReport { changes, summary })?),
        OutputFormat::Text => {
            if summary.is_clean() {
                return Ok("No changes.".to_string());
            }
            let mut out = String::new();
            for change in changes {
                let marker = match change.kind {
                    ChangeType::Added => "+".green().bold(),
                    ChangeType::Removed => "-".red().bold(),
                    ChangeType::Modified => "~".yellow().bold(),
                };
                out.push_str(&format!("  {} {}\n", marker, change.path));
            }
            out.push_str(&format!("\n{}", summary.to_string().bold()));
            Ok(out)
        }
    }
}

pub fn render_entry(entry: &PathEntry) -> String {
    format!("{:>12}  {:>10}  {}", entry.size, entry.mtime, entry.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_clean() {
        assert_eq!(render_changes(&[], OutputFormat::Text).unwrap(), "No changes.");
    }

    #[test]
    fn text_lists_paths_and_summary() {
        colored::control::set_override(false);
        let changes = vec![Change::added("a.txt"), Change::removed("b.txt")];
        let out = render_changes(&changes, OutputFormat::Text).unwrap();
        assert!(out.contains("  + a.txt\n"));
        assert!(out.contains("  - b.txt\n"));
        assert!(out.ends_with("1 added, 1 removed, 0 modified"));
    }

    #[test]
    fn json_report() {
        let changes = vec![Change::modified("sub/f.txt")];
        let out = render_changes(&changes, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["changes"][0]["path"], "sub/f.txt");
        assert_eq!(value["changes"][0]["type"], "modified");
        assert_eq!(value["summary"]["modified"], 1);
    }

    #[test]
    fn entry_line_ends_with_path() {
        let line = render_entry(&PathEntry::file("sub/f.txt", 3, 1_691_570_412));
        assert!(line.ends_with("  sub/f.txt"));
        assert!(line.contains("1691570412"));
    }
}
