//! Report recipes: which rows a document export contains, and in what order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use citypop_common::CityRecord;

use crate::charts::province_aggregates;
use crate::sort::{top_by, Direction};

const REPORT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportMode {
    #[default]
    #[serde(rename = "top10")]
    Top10,
    #[serde(rename = "bottom10")]
    Bottom10,
    #[serde(rename = "highestGrowth")]
    HighestGrowth,
    #[serde(rename = "lowestGrowth")]
    LowestGrowth,
    #[serde(rename = "provinceSummary")]
    ProvinceSummary,
}

impl ReportMode {
    pub const ALL: [ReportMode; 5] = [
        ReportMode::Top10,
        ReportMode::Bottom10,
        ReportMode::HighestGrowth,
        ReportMode::LowestGrowth,
        ReportMode::ProvinceSummary,
    ];

    /// Value used in URLs and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::Top10 => "top10",
            ReportMode::Bottom10 => "bottom10",
            ReportMode::HighestGrowth => "highestGrowth",
            ReportMode::LowestGrowth => "lowestGrowth",
            ReportMode::ProvinceSummary => "provinceSummary",
        }
    }

    /// Option text shown in the report selector.
    pub fn label(&self) -> &'static str {
        match self {
            ReportMode::Top10 => "Top 10 Cities by Population",
            ReportMode::Bottom10 => "Bottom 10 Cities by Population",
            ReportMode::HighestGrowth => "Highest Growth Rate Cities",
            ReportMode::LowestGrowth => "Lowest Growth Rate Cities",
            ReportMode::ProvinceSummary => "Province-wise Summary",
        }
    }

    /// Heading printed above the report table.
    pub fn title(&self) -> &'static str {
        match self {
            ReportMode::Top10 => "Top 10 Cities by Population (2017 Census)",
            ReportMode::Bottom10 => "Bottom 10 Cities by Population (2017 Census)",
            ReportMode::HighestGrowth => "Top 10 Cities by Population Growth Rate",
            ReportMode::LowestGrowth => "Bottom 10 Cities by Population Growth Rate",
            ReportMode::ProvinceSummary => "Province Summary",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown report type '{s}'"))
    }
}

/// One line of a report table.
///
/// Province summary rows reuse the city layout: `rank` holds the number of
/// cities, `city` the province name, `province` is empty, and `change` is the
/// aggregate rate `(sum2017 - sum1998) / sum1998 * 100`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub rank: i64,
    pub city: String,
    pub province: String,
    pub population_2017: f64,
    pub population_1998: f64,
    pub change: f64,
}

impl From<&CityRecord> for ReportRow {
    fn from(record: &CityRecord) -> Self {
        Self {
            rank: record.rank,
            city: record.city.clone(),
            province: record.province.clone(),
            population_2017: record.population_2017,
            population_1998: record.population_1998,
            change: record.change,
        }
    }
}

pub fn select_report(records: &[CityRecord], mode: ReportMode) -> Vec<ReportRow> {
    let ranked = |key: fn(&CityRecord) -> f64, direction: Direction| -> Vec<ReportRow> {
        top_by(records, key, direction, REPORT_LIMIT)
            .into_iter()
            .map(ReportRow::from)
            .collect()
    };

    match mode {
        ReportMode::Top10 => ranked(|r| r.population_2017, Direction::Descending),
        ReportMode::Bottom10 => ranked(|r| r.population_2017, Direction::Ascending),
        ReportMode::HighestGrowth => ranked(|r| r.change, Direction::Descending),
        ReportMode::LowestGrowth => ranked(|r| r.change, Direction::Ascending),
        ReportMode::ProvinceSummary => province_summary(records),
    }
}

pub fn province_summary(records: &[CityRecord]) -> Vec<ReportRow> {
    province_aggregates(records)
        .into_iter()
        .map(|(province, agg)| ReportRow {
            rank: agg.count as i64,
            city: province.to_string(),
            province: String::new(),
            population_2017: agg.population_2017,
            population_1998: agg.population_1998,
            change: (agg.population_2017 - agg.population_1998) / agg.population_1998 * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<CityRecord> {
        vec![
            CityRecord::new(1, "A", "P1", 1000.0, 800.0, 25.0),
            CityRecord::new(2, "B", "P2", 500.0, 600.0, -16.7),
        ]
    }

    fn cities(rows: &[ReportRow]) -> Vec<&str> {
        rows.iter().map(|r| r.city.as_str()).collect()
    }

    #[test]
    fn highest_growth_on_scenario() {
        let rows = select_report(&scenario(), ReportMode::HighestGrowth);
        assert_eq!(cities(&rows), vec!["A", "B"]);
        assert_eq!(rows[0].change, 25.0);
        assert_eq!(rows[1].change, -16.7);
    }

    #[test]
    fn population_reports_sort_both_ways() {
        let records = scenario();
        assert_eq!(cities(&select_report(&records, ReportMode::Top10)), vec!["A", "B"]);
        assert_eq!(cities(&select_report(&records, ReportMode::Bottom10)), vec!["B", "A"]);
        assert_eq!(cities(&select_report(&records, ReportMode::LowestGrowth)), vec!["B", "A"]);
    }

    #[test]
    fn ranked_reports_cap_at_ten() {
        let records: Vec<CityRecord> = (0..25)
            .map(|i| CityRecord::new(i + 1, format!("C{i}"), "P", i as f64, 1.0, i as f64))
            .collect();
        for mode in [ReportMode::Top10, ReportMode::Bottom10, ReportMode::HighestGrowth, ReportMode::LowestGrowth] {
            assert_eq!(select_report(&records, mode).len(), 10, "{mode}");
        }
        assert_eq!(select_report(&records, ReportMode::Bottom10)[0].city, "C0");
    }

    #[test]
    fn single_city_summary_uses_population_rate_not_stored_change() {
        let records = vec![CityRecord::new(1, "A", "P1", 1000.0, 800.0, 99.0)];
        let rows = select_report(&records, ReportMode::ProvinceSummary);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].change, 25.0);
        assert_eq!(rows[0].change, records[0].computed_change());
        assert_ne!(rows[0].change, records[0].change);
    }

    #[test]
    fn summary_aggregates_per_province() {
        let records = vec![
            CityRecord::new(1, "A", "P1", 1000.0, 800.0, 25.0),
            CityRecord::new(2, "B", "P2", 500.0, 600.0, -16.7),
            CityRecord::new(3, "C", "P1", 200.0, 200.0, 0.0),
        ];
        let rows = province_summary(&records);
        assert_eq!(cities(&rows), vec!["P1", "P2"]);
        assert_eq!(rows[0].rank, 2);
        assert_eq!(rows[0].population_2017, 1200.0);
        assert_eq!(rows[0].population_1998, 1000.0);
        assert_eq!(rows[0].change, 20.0);
        assert_eq!(rows[0].province, "");
    }

    #[test]
    fn empty_input_gives_empty_reports() {
        for mode in ReportMode::ALL {
            assert!(select_report(&[], mode).is_empty());
        }
    }

    #[test]
    fn mode_round_trips_through_its_wire_value() {
        for mode in ReportMode::ALL {
            assert_eq!(mode.as_str().parse::<ReportMode>().unwrap(), mode);
        }
        assert!("top5".parse::<ReportMode>().is_err());
    }
}
