use serde::{Deserialize, Serialize};

// --- City Records ---

/// One row of the census dataset.
///
/// Wire names match the stored document fields (`Rank`, `City`, ...) so the
/// JSON served by the API is byte-compatible with existing dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "Rank")]
    pub rank: i64,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Province")]
    pub province: String,
    #[serde(rename = "Population_2017_Census")]
    pub population_2017: f64,
    #[serde(rename = "Population_1998_Census")]
    pub population_1998: f64,
    /// Percent change between the two censuses, as stored.
    #[serde(rename = "Change")]
    pub change: f64,
}

impl CityRecord {
    pub fn new(
        rank: i64,
        city: impl Into<String>,
        province: impl Into<String>,
        population_2017: f64,
        population_1998: f64,
        change: f64,
    ) -> Self {
        Self {
            rank,
            city: city.into(),
            province: province.into(),
            population_2017,
            population_1998,
            change,
        }
    }

    /// True when every numeric field holds a real number.
    pub fn has_numeric_fields(&self) -> bool {
        self.population_2017.is_finite() && self.population_1998.is_finite() && self.change.is_finite()
    }

    /// Change rate recomputed from the two population counts.
    pub fn computed_change(&self) -> f64 {
        (self.population_2017 - self.population_1998) / self.population_1998 * 100.0
    }

    /// Checks the schema constraints, returning the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.rank <= 0 {
            return Err(format!("Rank must be positive, got {}", self.rank));
        }
        if self.city.trim().is_empty() {
            return Err("City must not be empty".to_string());
        }
        if self.province.trim().is_empty() {
            return Err("Province must not be empty".to_string());
        }
        if !(self.population_2017 >= 0.0) {
            return Err("Population_2017_Census must be >= 0".to_string());
        }
        if !(self.population_1998 >= 0.0) {
            return Err("Population_1998_Census must be >= 0".to_string());
        }
        if !self.change.is_finite() {
            return Err("Change must be a number".to_string());
        }
        Ok(())
    }
}

/// Sign of a change rate, used to color table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTone {
    Positive,
    Negative,
    Neutral,
}

impl ChangeTone {
    pub fn of(rate: f64) -> Self {
        if rate > 0.0 {
            ChangeTone::Positive
        } else if rate < 0.0 {
            ChangeTone::Negative
        } else {
            ChangeTone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_document_field_names() {
        let record = CityRecord::new(1, "Karachi", "Sindh", 14_910_352.0, 9_339_023.0, 59.65);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Rank"], 1);
        assert_eq!(json["City"], "Karachi");
        assert_eq!(json["Province"], "Sindh");
        assert_eq!(json["Population_2017_Census"], 14_910_352.0);
        assert_eq!(json["Population_1998_Census"], 9_339_023.0);
        assert_eq!(json["Change"], 59.65);
    }

    #[test]
    fn computed_change_uses_population_counts() {
        let record = CityRecord::new(1, "A", "P1", 1000.0, 800.0, 99.0);
        assert_eq!(record.computed_change(), 25.0);
    }

    #[test]
    fn validate_rejects_empty_city_and_negative_population() {
        assert!(CityRecord::new(1, "", "P", 1.0, 1.0, 0.0).validate().is_err());
        assert!(CityRecord::new(1, "A", "P", -1.0, 1.0, 0.0).validate().is_err());
        assert!(CityRecord::new(0, "A", "P", 1.0, 1.0, 0.0).validate().is_err());
        assert!(CityRecord::new(3, "A", "P", 1.0, 1.0, -4.5).validate().is_ok());
    }

    #[test]
    fn nan_fields_are_not_numeric() {
        let record = CityRecord::new(1, "A", "P", f64::NAN, 1.0, 0.0);
        assert!(!record.has_numeric_fields());
    }

    #[test]
    fn change_tone_follows_sign() {
        assert_eq!(ChangeTone::of(3.2), ChangeTone::Positive);
        assert_eq!(ChangeTone::of(-0.1), ChangeTone::Negative);
        assert_eq!(ChangeTone::of(0.0), ChangeTone::Neutral);
        assert_eq!(ChangeTone::of(f64::NAN), ChangeTone::Neutral);
    }
}
