use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, RoadmapError};
use crate::model::feature::parse_iso_date;
use crate::model::{Department, Feature, FeatureStatus, Roadmap};

/// Features parsed from a CSV file, plus departments that were referenced
/// but not yet known.
#[derive(Debug, Default)]
pub struct CsvImport {
    pub features: Vec<Feature>,
    pub departments: Vec<Department>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Department,
    Start,
    End,
    Status,
    Progress,
    Description,
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(d) = parse_iso_date(s) {
        return Some(d);
    }
    ["%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Empty cells mean "no date"; anything else must parse.
fn parse_optional_date(s: Option<&str>) -> std::result::Result<Option<NaiveDate>, ()> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw).map(Some).ok_or(()),
    }
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn header_to_column(header: &str) -> Option<Column> {
    let normalized = header.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "title" | "feature" | "name" | "featurename" | "label" => Some(Column::Title),
        "department" | "dept" | "team" | "owner" | "departmentid" => Some(Column::Department),
        "start" | "startdate" | "from" | "begin" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "due" | "duedate" => Some(Column::End),
        "status" | "stage" | "state" => Some(Column::Status),
        "progress" | "complete" | "percent" | "done" => Some(Column::Progress),
        "description" | "notes" | "details" => Some(Column::Description),
        _ => None,
    }
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse CSV text into features.
///
/// The delimiter is auto-detected (comma, semicolon, tab) and headers are
/// matched case-insensitively. Departments are matched against `known` by id
/// or name; unknown ones are created. Rows without a title or with an
/// unparseable date are skipped.
pub fn parse_csv(content: &str, known: &[Department]) -> Result<CsvImport> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(header_to_column).collect();

    let has = |c: Column| columns.contains(&Some(c));
    if !has(Column::Title) || !has(Column::Start) || !has(Column::End) {
        return Err(RoadmapError::MissingColumns {
            found: headers.iter().collect::<Vec<_>>().join(", "),
        });
    }

    let mut import = CsvImport::default();
    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {}", row, e);
                import.skipped += 1;
                continue;
            }
        };
        let field = |c: Column| {
            columns
                .iter()
                .position(|col| *col == Some(c))
                .and_then(|idx| record.get(idx))
        };

        let title = match field(Column::Title) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                log::debug!("Skipping CSV row {}: no title", row);
                import.skipped += 1;
                continue;
            }
        };

        let (Ok(start), Ok(end)) = (
            parse_optional_date(field(Column::Start)),
            parse_optional_date(field(Column::End)),
        ) else {
            log::warn!("Skipping CSV row {}: invalid date", row);
            import.skipped += 1;
            continue;
        };

        let department_name = field(Column::Department).unwrap_or("").to_string();
        let department_id = resolve_department(&department_name, known, &mut import.departments);

        let mut feature = Feature::new(department_id, title);
        feature.start_date = start;
        feature.end_date = match (start, end) {
            (Some(s), Some(e)) => Some(e.max(s)),
            _ => end,
        };
        if let Some(status) = field(Column::Status).and_then(FeatureStatus::parse) {
            feature.status = status;
        }
        if let Some(progress) = field(Column::Progress)
            .map(|p| p.trim_end_matches('%'))
            .and_then(|p| p.parse::<f64>().ok())
        {
            feature.set_progress(progress.clamp(0.0, 100.0).round() as u8);
        }
        feature.description = field(Column::Description).unwrap_or("").to_string();
        import.features.push(feature);
    }

    if import.features.is_empty() {
        return Err(RoadmapError::NoValidRows {
            skipped: import.skipped,
        });
    }
    Ok(import)
}

fn resolve_department(name: &str, known: &[Department], created: &mut Vec<Department>) -> String {
    let name = if name.trim().is_empty() { "Unassigned" } else { name.trim() };
    let matches = |d: &Department| d.id.eq_ignore_ascii_case(name) || d.name.eq_ignore_ascii_case(name);
    if let Some(existing) = known.iter().chain(created.iter()).find(|d| matches(d)) {
        return existing.id.clone();
    }
    let dept = Department::new(slugify(name), name);
    let id = dept.id.clone();
    created.push(dept);
    id
}

/// Import features from a CSV file into a new roadmap named after the file.
pub fn import_csv(path: &Path) -> Result<(Roadmap, usize)> {
    let content = std::fs::read_to_string(path)?;
    let import = parse_csv(&content, &[])?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Roadmap")
        .to_string();
    let mut roadmap = Roadmap::new(name);
    roadmap.departments = import.departments;
    roadmap.features = import.features;
    log::info!(
        "Imported {} features from {} ({} rows skipped)",
        roadmap.features.len(),
        path.display(),
        import.skipped
    );
    Ok((roadmap, import.skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[test]
    fn test_parse_semicolon_csv() {
        let csv = "Title;Department;Start Date;End Date;Status;Progress\n\
                   Client Portal;Financial Advisory;01/02/2026;2026-04-01;In Progress;40%\n\
                   Ledger Sync;Tax;2026-07-01;2026-09-14;Live;100\n";
        let known = [Department::new("tax", "Tax")];
        let import = parse_csv(csv, &known).unwrap();

        assert_eq!(import.skipped, 0);
        assert_eq!(import.features.len(), 2);
        let portal = &import.features[0];
        assert_eq!(portal.schedule(), Some((d(2, 1), d(4, 1))));
        assert_eq!(portal.status, FeatureStatus::InDevelopment);
        assert_eq!(portal.progress, 40);
        assert_eq!(portal.department_id, "financial-advisory");
        assert_eq!(import.features[1].department_id, "tax");
        assert_eq!(import.departments.len(), 1);
        assert_eq!(import.departments[0].name, "Financial Advisory");
    }

    #[test]
    fn test_comma_csv_with_blank_dates_and_bad_rows() {
        let csv = "name,start,end\n\
                   Someday,,\n\
                   ,2026-01-01,2026-01-02\n\
                   Broken,next week,2026-01-02\n\
                   Backwards,2026-05-10,2026-05-01\n";
        let import = parse_csv(csv, &[]).unwrap();
        assert_eq!(import.skipped, 2);
        let titles: Vec<_> = import.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["Someday", "Backwards"]);
        assert!(!import.features[0].has_schedule());
        assert_eq!(import.features[1].schedule(), Some((d(5, 10), d(5, 10))));
        assert_eq!(import.features[0].department_id, "unassigned");
    }

    #[test]
    fn test_missing_columns() {
        let err = parse_csv("Title;Owner\nA;B\n", &[]).unwrap_err();
        assert!(matches!(err, RoadmapError::MissingColumns { .. }));
    }

    #[test]
    fn test_no_valid_rows() {
        let err = parse_csv("Title;Start;End\n;2026-01-01;2026-01-02\n", &[]).unwrap_err();
        assert!(matches!(err, RoadmapError::NoValidRows { skipped: 1 }));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Financial  Advisory "), "financial-advisory");
        assert_eq!(slugify("R&D"), "r-d");
    }
}
