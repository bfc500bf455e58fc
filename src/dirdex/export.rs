//! # Exporters
//!
//! CSV, JSON and Markdown writers for a filtered directory set. Writers
//! are generic over `io::Write` so tests can render into a buffer;
//! [`export_to_path`] is the file-creating dispatch the CLI uses.
//!
//! The Markdown export groups entries by category. Categories are emitted
//! in sorted order so the same input always produces the same file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{DirdexError, Result};
use crate::model::{Directory, ExportFormat};

pub fn export_to_path(records: &[Directory], format: ExportFormat, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| DirdexError::Export(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(&mut writer, records)?,
        ExportFormat::Json => write_json(&mut writer, records)?,
        ExportFormat::Markdown => write_markdown(&mut writer, records)?,
    }

    writer
        .flush()
        .map_err(|e| DirdexError::Export(e.to_string()))
}

const CSV_HEADER: &[&str] = &[
    "Name",
    "URL",
    "Description",
    "Categories",
    "Pricing",
    "Link Type",
    "Domain Rating",
    "Organic Traffic",
    "Organic Keywords",
    "Helpful Votes",
    "Submission URL",
];

pub fn write_csv<W: Write>(writer: &mut W, records: &[Directory]) -> Result<()> {
    write_csv_row(writer, CSV_HEADER.iter().map(|s| s.to_string()))?;

    for dir in records {
        write_csv_row(
            writer,
            [
                dir.name.clone(),
                dir.url.clone(),
                dir.description.clone(),
                dir.categories.join(", "),
                dir.pricing.clone(),
                dir.link_type.clone(),
                dir.domain_rating.to_string(),
                dir.organic_traffic.to_string(),
                dir.organic_keywords.to_string(),
                dir.helpful_count.to_string(),
                dir.submission_url.clone(),
            ]
            .into_iter(),
        )?;
    }
    Ok(())
}

fn write_csv_row<W: Write>(writer: &mut W, fields: impl Iterator<Item = String>) -> Result<()> {
    let row = fields
        .map(|f| csv_escape(&f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", row).map_err(|e| DirdexError::Export(e.to_string()))
}

/// RFC 4180 quoting: fields containing a comma, quote or newline are
/// wrapped in double quotes with embedded quotes doubled.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_json<W: Write>(writer: &mut W, records: &[Directory]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records).map_err(DirdexError::Serialization)?;
    writeln!(writer).map_err(|e| DirdexError::Export(e.to_string()))
}

pub fn write_markdown<W: Write>(writer: &mut W, records: &[Directory]) -> Result<()> {
    let w = |e: std::io::Error| DirdexError::Export(e.to_string());

    writeln!(writer, "# Directory Export\n").map_err(w)?;
    writeln!(writer, "Total directories: {}\n", records.len()).map_err(w)?;
    writeln!(writer, "---\n").map_err(w)?;

    let mut by_category: BTreeMap<&str, Vec<&Directory>> = BTreeMap::new();
    for dir in records {
        for category in &dir.categories {
            by_category.entry(category.as_str()).or_default().push(dir);
        }
    }

    for (category, dirs) in by_category {
        writeln!(writer, "## {}\n", category).map_err(w)?;

        for dir in dirs {
            writeln!(writer, "### [{}]({})\n", dir.name, dir.url).map_err(w)?;
            if !dir.description.is_empty() {
                writeln!(writer, "{}\n", dir.description).map_err(w)?;
            }
            writeln!(writer, "- **Pricing:** {}", dir.pricing).map_err(w)?;
            writeln!(writer, "- **Link Type:** {}", dir.link_type).map_err(w)?;
            if dir.domain_rating > 0 {
                writeln!(writer, "- **Domain Rating:** {}", dir.domain_rating).map_err(w)?;
            }
            if dir.helpful_count > 0 {
                writeln!(writer, "- **Helpful Votes:** {}", dir.helpful_count).map_err(w)?;
            }
            if !dir.submission_url.is_empty() {
                writeln!(writer, "- **Submission URL:** {}", dir.submission_url).map_err(w)?;
            }
            writeln!(writer).map_err(w)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(name: &str, categories: &[&str]) -> Directory {
        let now = Utc::now();
        Directory {
            id: format!("id-{}", name),
            slug: name.to_lowercase(),
            name: name.to_string(),
            url: format!("https://{}.example.com", name.to_lowercase()),
            description: "A listing".to_string(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            pricing: "free".to_string(),
            link_type: "dofollow".to_string(),
            domain_rating: 60,
            organic_traffic: 100,
            organic_keywords: 50,
            helpful_count: 7,
            view_count: 0,
            submission_url: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let records = vec![sample("Alpha", &["SaaS"]), sample("Beta", &["AI, Tools"])];
        let mut buf = Vec::new();
        write_csv(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,URL,Description"));
        assert!(lines[1].starts_with("Alpha,"));
        // Category containing a comma is quoted.
        assert!(lines[2].contains("\"AI, Tools\""));
    }

    #[test]
    fn test_json_roundtrips() {
        let records = vec![sample("Alpha", &["SaaS"])];
        let mut buf = Vec::new();
        write_json(&mut buf, &records).unwrap();

        let parsed: Vec<Directory> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_markdown_groups_by_category_sorted() {
        let records = vec![
            sample("Zed", &["Marketing"]),
            sample("Ace", &["AI Tools", "Marketing"]),
        ];
        let mut buf = Vec::new();
        write_markdown(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let ai_pos = text.find("## AI Tools").unwrap();
        let marketing_pos = text.find("## Marketing").unwrap();
        assert!(ai_pos < marketing_pos);
        // Ace is listed under both of its categories.
        assert_eq!(text.matches("### [Ace]").count(), 2);
        assert!(text.contains("Total directories: 2"));
    }

    #[test]
    fn test_export_to_path_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![sample("Alpha", &["SaaS"])];

        for (format, name) in [
            (ExportFormat::Csv, "out.csv"),
            (ExportFormat::Json, "out.json"),
            (ExportFormat::Markdown, "out.md"),
        ] {
            let path = dir.path().join(name);
            export_to_path(&records, format, &path).unwrap();
            assert!(std::fs::read_to_string(&path).unwrap().contains("Alpha"));
        }
    }
}
