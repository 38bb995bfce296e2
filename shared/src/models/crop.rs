//! Crop ("cultivo") models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{flag, lenient_date, null_as_empty};

/// One crop under cultivation, as served by the farm API.
///
/// Field names on the wire follow the API (`id_cultivo`, `tipo_cultivo`, ...).
/// Dates that cannot be read deserialize to `None` instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropRecord {
    #[serde(rename = "id_cultivo")]
    pub id: i64,
    #[serde(rename = "id_usuario", default)]
    pub owner_id: i64,
    #[serde(rename = "tipo_cultivo", default, deserialize_with = "null_as_empty")]
    pub crop_type: String,
    #[serde(rename = "fecha_siembra", default, with = "lenient_date")]
    pub sow_date: Option<NaiveDate>,
    #[serde(rename = "fecha_cosecha", default, with = "lenient_date")]
    pub harvest_date: Option<NaiveDate>,
    #[serde(rename = "estado", default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(rename = "EstLogico", default = "default_active", with = "flag")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CropRecord {
    /// Create an active crop with no dates set
    pub fn new(id: i64, crop_type: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            owner_id: 0,
            crop_type: crop_type.into(),
            sow_date: None,
            harvest_date: None,
            status: status.into(),
            active: true,
        }
    }

    pub fn with_owner(mut self, owner_id: i64) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_sow_date(mut self, date: NaiveDate) -> Self {
        self.sow_date = Some(date);
        self
    }

    pub fn with_harvest_date(mut self, date: NaiveDate) -> Self {
        self.harvest_date = Some(date);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whole days between sowing and `today`; negative for future sowings.
    /// `None` when the sowing date is unknown.
    pub fn days_since_sowing(&self, today: NaiveDate) -> Option<i64> {
        self.sow_date.map(|sown| (today - sown).num_days())
    }

    /// Reference used by generated tasks to point back at this crop
    pub fn plot_ref(&self) -> String {
        self.id.to_string()
    }

    /// True unless both dates are present and sowing is after harvest
    pub fn has_consistent_dates(&self) -> bool {
        match (self.sow_date, self.harvest_date) {
            (Some(sown), Some(harvested)) => sown <= harvested,
            _ => true,
        }
    }

    /// Check the status text against a lifecycle keyword
    pub fn status_is(&self, keyword: StatusKeyword) -> bool {
        keyword.matches(&self.status)
    }
}

/// Lifecycle vocabulary recognised inside free-text crop statuses.
///
/// Matching is lower-cased substring containment, so `"Harvested"` and
/// `"cosechado"` both match [`StatusKeyword::Harvest`]. Text matching none
/// of the keywords is simply an unrecognised status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKeyword {
    Sowing,
    Growing,
    Harvest,
    Finished,
    Lost,
}

impl StatusKeyword {
    pub const ALL: [StatusKeyword; 5] = [
        StatusKeyword::Sowing,
        StatusKeyword::Growing,
        StatusKeyword::Harvest,
        StatusKeyword::Finished,
        StatusKeyword::Lost,
    ];

    /// English keyword followed by the synonyms the farm API uses
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            StatusKeyword::Sowing => &["sowing", "siembra"],
            StatusKeyword::Growing => &["growing", "crecimiento"],
            StatusKeyword::Harvest => &["harvest", "cosecha"],
            StatusKeyword::Finished => &["finished", "finalizado"],
            StatusKeyword::Lost => &["lost", "perdido"],
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        let status = status.to_lowercase();
        self.synonyms().iter().any(|word| status.contains(word))
    }

    /// First keyword found in the status text, if any
    pub fn detect(status: &str) -> Option<StatusKeyword> {
        Self::ALL.into_iter().find(|keyword| keyword.matches(status))
    }
}
