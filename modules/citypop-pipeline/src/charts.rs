//! Series behind the three dashboard charts.

use indexmap::IndexMap;
use serde::Serialize;

use citypop_common::CityRecord;

use crate::sort::{top_by, Direction};

pub const TOP_GROWTH_LIMIT: usize = 10;
pub const TOP_POPULATION_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceTotal {
    pub province: String,
    pub population_2017: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub city: String,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationPoint {
    pub city: String,
    pub population_2017: f64,
    pub population_1998: f64,
}

/// Per-province running sums.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProvinceAggregate {
    pub count: usize,
    pub population_2017: f64,
    pub population_1998: f64,
}

/// Group by province in first-seen order.
pub fn province_aggregates(records: &[CityRecord]) -> IndexMap<&str, ProvinceAggregate> {
    let mut groups: IndexMap<&str, ProvinceAggregate> = IndexMap::new();
    for record in records {
        let entry = groups.entry(record.province.as_str()).or_default();
        entry.count += 1;
        entry.population_2017 += record.population_2017;
        entry.population_1998 += record.population_1998;
    }
    groups
}

pub fn province_totals(records: &[CityRecord]) -> Vec<ProvinceTotal> {
    province_aggregates(records)
        .into_iter()
        .map(|(province, agg)| ProvinceTotal {
            province: province.to_string(),
            population_2017: agg.population_2017,
        })
        .collect()
}

pub fn top_growth(records: &[CityRecord]) -> Vec<GrowthPoint> {
    top_by(records, |r| r.change, Direction::Descending, TOP_GROWTH_LIMIT)
        .into_iter()
        .map(|r| GrowthPoint {
            city: r.city.clone(),
            change: r.change,
        })
        .collect()
}

pub fn top_population(records: &[CityRecord]) -> Vec<PopulationPoint> {
    top_by(records, |r| r.population_2017, Direction::Descending, TOP_POPULATION_LIMIT)
        .into_iter()
        .map(|r| PopulationPoint {
            city: r.city.clone(),
            population_2017: r.population_2017,
            population_1998: r.population_1998,
        })
        .collect()
}

/// The three chart series for one view of the data. Rebuilt from scratch on
/// every filter change; never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartSet {
    pub province_totals: Vec<ProvinceTotal>,
    pub top_growth: Vec<GrowthPoint>,
    pub top_population: Vec<PopulationPoint>,
}

impl ChartSet {
    pub fn build(records: &[CityRecord]) -> Self {
        Self {
            province_totals: province_totals(records),
            top_growth: top_growth(records),
            top_population: top_population(records),
        }
    }
}
