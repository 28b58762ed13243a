use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery stage of a roadmap feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeatureStatus {
    #[default]
    Discovery,
    Planning,
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "High Priority")]
    HighPriority,
    Live,
}

impl FeatureStatus {
    pub fn all() -> &'static [FeatureStatus] {
        &[
            FeatureStatus::Discovery,
            FeatureStatus::Planning,
            FeatureStatus::InDevelopment,
            FeatureStatus::HighPriority,
            FeatureStatus::Live,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureStatus::Discovery => "Discovery",
            FeatureStatus::Planning => "Planning",
            FeatureStatus::InDevelopment => "In Development",
            FeatureStatus::HighPriority => "High Priority",
            FeatureStatus::Live => "Live",
        }
    }

    /// Lenient parse used by CSV import.
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['-', '_'], " ");
        match key.as_str() {
            "discovery" | "idea" | "new" => Some(FeatureStatus::Discovery),
            "planning" | "planned" => Some(FeatureStatus::Planning),
            "in development" | "in progress" | "development" | "active" => {
                Some(FeatureStatus::InDevelopment)
            }
            "high priority" | "priority" => Some(FeatureStatus::HighPriority),
            "live" | "done" | "finished" | "released" => Some(FeatureStatus::Live),
            _ => None,
        }
    }
}

/// A feature on the departmental roadmap. Features with both dates set are
/// drawn as timeline bars; the rest only show up in lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    /// Slug of the owning department (e.g. `"fa"`).
    pub department_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub status: FeatureStatus,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default, with = "iso_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "iso_date")]
    pub end_date: Option<NaiveDate>,
    /// Completion from 0 to 100.
    #[serde(default)]
    pub progress: u8,
    /// Strategic metric this feature contributes to.
    #[serde(default)]
    pub metric_id: Option<Uuid>,
}

impl Feature {
    pub fn new(department_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            department_id: department_id.into(),
            title: title.into(),
            description: String::new(),
            whatsapp: None,
            status: FeatureStatus::default(),
            docs: Vec::new(),
            start_date: None,
            end_date: None,
            progress: 0,
            metric_id: None,
        }
    }

    pub fn with_schedule(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_metric(mut self, metric_id: Uuid) -> Self {
        self.metric_id = Some(metric_id);
        self
    }

    /// Both dates, when the feature can be drawn as a bar.
    pub fn schedule(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }

    pub fn has_schedule(&self) -> bool {
        self.schedule().is_some()
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// True when `day` falls inside the scheduled range (inclusive).
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.schedule()
            .map(|(start, end)| start <= day && day <= end)
            .unwrap_or(false)
    }
}

/// Parse either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp
/// (taking the UTC calendar day).
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc).date_naive())
}

/// Serde helper for optional ISO dates; always writes `YYYY-MM-DD`.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_iso_date(s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_iso_date_accepts_timestamps() {
        assert_eq!(parse_iso_date("2026-03-12"), Some(d(2026, 3, 12)));
        assert_eq!(
            parse_iso_date("2026-03-12T00:00:00.000Z"),
            Some(d(2026, 3, 12))
        );
        assert_eq!(parse_iso_date("12/03/2026"), None);
    }

    #[test]
    fn test_serializes_dates_as_plain_days() {
        let feature = Feature::new("fa", "Client portal").with_schedule(d(2026, 2, 1), d(2026, 4, 1));
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["start_date"], "2026-02-01");
        assert_eq!(json["end_date"], "2026-04-01");
        assert_eq!(json["status"], "Discovery");
    }

    #[test]
    fn test_deserializes_missing_and_timestamp_dates() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{id}","department_id":"tax","title":"E-filing",
                "status":"In Development","start_date":"2026-05-01T00:00:00.000Z"}}"#
        );
        let feature: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(feature.start_date, Some(d(2026, 5, 1)));
        assert_eq!(feature.end_date, None);
        assert_eq!(feature.status, FeatureStatus::InDevelopment);
        assert!(!feature.has_schedule());
    }

    #[test]
    fn test_rejects_garbage_dates() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{id}","department_id":"tax","title":"x","start_date":"soon"}}"#
        );
        assert!(serde_json::from_str::<Feature>(&json).is_err());
    }

    #[test]
    fn test_progress_is_capped() {
        let mut feature = Feature::new("fa", "Cap");
        feature.set_progress(180);
        assert_eq!(feature.progress, 100);
    }

    #[test]
    fn test_is_active_on() {
        let feature = Feature::new("fa", "Active").with_schedule(d(2026, 2, 1), d(2026, 2, 10));
        assert!(feature.is_active_on(d(2026, 2, 1)));
        assert!(feature.is_active_on(d(2026, 2, 10)));
        assert!(!feature.is_active_on(d(2026, 2, 11)));
        assert!(!Feature::new("fa", "Unscheduled").is_active_on(d(2026, 2, 1)));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(FeatureStatus::parse("in-progress"), Some(FeatureStatus::InDevelopment));
        assert_eq!(FeatureStatus::parse(" LIVE "), Some(FeatureStatus::Live));
        assert_eq!(FeatureStatus::parse("shrug"), None);
    }
}
