use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use citypop_common::CityRecord;

const POPULATION_STEP: f64 = 100_000.0;
const CHANGE_STEP: f64 = 10.0;

/// Row predicate applied to the loaded dataset.
///
/// Upper bounds are inclusive and always applied. Lower bounds are only
/// applied when set; the dashboard leaves them unset unless the user asks
/// for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// `None` or an empty string matches every province.
    pub province: Option<String>,
    pub max_population: f64,
    pub max_change: f64,
    #[serde(default)]
    pub min_population: Option<f64>,
    #[serde(default)]
    pub min_change: Option<f64>,
}

impl FilterCriteria {
    /// Criteria that keep every record with real numeric fields.
    pub fn unbounded(bounds: &FilterBounds) -> Self {
        Self {
            province: None,
            max_population: bounds.max_population,
            max_change: bounds.max_change,
            min_population: None,
            min_change: None,
        }
    }

    pub fn matches(&self, record: &CityRecord) -> bool {
        let province_match = match self.province.as_deref() {
            None | Some("") => true,
            Some(p) => record.province == p,
        };
        // NaN never satisfies a comparison, so malformed rows drop out here.
        let population_match = record.population_2017 <= self.max_population
            && self.min_population.map_or(true, |min| record.population_2017 >= min);
        let change_match = record.change <= self.max_change
            && self.min_change.map_or(true, |min| record.change >= min);

        province_match && population_match && change_match
    }

    /// Order-preserving subsequence of `records` that matches.
    pub fn apply(&self, records: &[CityRecord]) -> Vec<CityRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Options and slider ranges for the filter controls, derived once per load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBounds {
    /// Distinct provinces in first-seen order.
    pub provinces: Vec<String>,
    pub min_population: f64,
    /// Largest 2017 population rounded up to the next 100,000.
    pub max_population: f64,
    pub min_change: f64,
    /// Largest change rate rounded up to the next multiple of 10.
    pub max_change: f64,
}

impl FilterBounds {
    pub fn from_records(records: &[CityRecord]) -> Self {
        let provinces: IndexSet<&str> = records.iter().map(|r| r.province.as_str()).collect();

        Self {
            provinces: provinces.into_iter().map(str::to_string).collect(),
            min_population: 0.0,
            max_population: round_up(max_finite(records.iter().map(|r| r.population_2017)), POPULATION_STEP),
            min_change: 0.0,
            max_change: round_up(max_finite(records.iter().map(|r| r.change)), CHANGE_STEP),
        }
    }
}

fn max_finite(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(f64::NEG_INFINITY, f64::max)
}

fn round_up(value: f64, step: f64) -> f64 {
    if value.is_finite() {
        (value / step).ceil() * step
    } else {
        0.0
    }
}
