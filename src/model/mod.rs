pub mod department;
pub mod feature;
pub mod metric;
pub mod okr;
pub mod roadmap;
pub mod timeline;

pub use department::Department;
pub use feature::{Feature, FeatureStatus};
pub use metric::StrategicMetric;
pub use okr::{week_label, AnnualObjective, FiveYearTarget, KeyResult, OkrStatus, WeeklyEntry};
pub use roadmap::Roadmap;
pub use timeline::PlanningWindow;
