use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::Roadmap;

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Write all features as semicolon-delimited CSV.
///
/// Columns: Title ; Department ; Start Date ; End Date ; Status ; Progress ; Metric
/// Dates are formatted as YYYY-MM-DD and left empty when unscheduled.
/// Returns the number of features written.
pub fn write_csv<W: Write>(roadmap: &Roadmap, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    wtr.write_record([
        "Title",
        "Department",
        "Start Date",
        "End Date",
        "Status",
        "Progress",
        "Metric",
    ])?;

    for feature in &roadmap.features {
        let metric = feature
            .metric_id
            .and_then(|id| roadmap.metric(id))
            .map(|m| m.label().to_string())
            .unwrap_or_default();
        let start = format_date(feature.start_date);
        let end = format_date(feature.end_date);
        let progress = feature.progress.to_string();
        wtr.write_record([
            feature.title.as_str(),
            roadmap.department_name(feature),
            start.as_str(),
            end.as_str(),
            feature.status.label(),
            progress.as_str(),
            metric.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(roadmap.features.len())
}

/// Export features to a CSV file.
pub fn export_csv(roadmap: &Roadmap, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let count = write_csv(roadmap, file)?;
    log::info!("Exported {} features to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, Feature, FeatureStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_csv_rows() {
        let mut roadmap = Roadmap::new("Export");
        roadmap.departments = vec![Department::new("tax", "Tax")];
        let mut scheduled = Feature::new("tax", "E-filing").with_schedule(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        );
        scheduled.status = FeatureStatus::InDevelopment;
        scheduled.progress = 35;
        roadmap.features = vec![scheduled, Feature::new("ops", "Someday")];

        let mut out = Vec::new();
        let count = write_csv(&roadmap, &mut out).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Title;Department;Start Date;End Date;Status;Progress;Metric",
                "E-filing;Tax;2026-02-01;2026-04-01;In Development;35;",
                "Someday;ops;;;Discovery;0;",
            ]
        );
    }
}
