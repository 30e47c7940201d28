use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use citypop_common::{format_plain, CityPopError, CityRecord};

pub const CSV_HEADER: [&str; 6] = [
    "Rank",
    "City",
    "Province",
    "Population (2017 Census)",
    "Population (1998 Census)",
    "Change Rate (%)",
];

/// Comma-delimited dump of `records`: bare header, then one line per record
/// with text fields quoted and numbers bare.
pub fn export_csv(records: &[CityRecord]) -> Result<String, CityPopError> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(CSV_HEADER).map_err(generation)?;
    let buf = header.into_inner().map_err(|e| generation(e.into_error()))?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);
    for record in records {
        rows.write_record([
            record.rank.to_string(),
            record.city.clone(),
            record.province.clone(),
            format_plain(record.population_2017),
            format_plain(record.population_1998),
            format_plain(record.change),
        ])
        .map_err(generation)?;
    }
    let bytes = rows.into_inner().map_err(|e| generation(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| CityPopError::Generation(e.to_string()))
}

pub fn csv_file_name(now: DateTime<Utc>) -> String {
    format!("Pakistan_Population_Data_{}.csv", now.timestamp_millis())
}

fn generation(e: impl std::fmt::Display) -> CityPopError {
    CityPopError::Generation(format!("CSV export failed: {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn scenario_export_matches_expected_text() {
        let records = vec![
            CityRecord::new(1, "A", "P1", 1000.0, 800.0, 25.0),
            CityRecord::new(2, "B", "P2", 500.0, 600.0, -16.7),
        ];
        let text = export_csv(&records).unwrap();
        assert_eq!(
            text,
            "Rank,City,Province,Population (2017 Census),Population (1998 Census),Change Rate (%)\n\
             1,\"A\",\"P1\",1000,800,25\n\
             2,\"B\",\"P2\",500,600,-16.7\n"
        );
    }

    #[test]
    fn line_count_is_records_plus_header() {
        let records: Vec<CityRecord> = (0..37)
            .map(|i| CityRecord::new(i + 1, format!("City {i}"), "Punjab", 1.0, 1.0, 0.0))
            .collect();
        let text = export_csv(&records).unwrap();
        assert_eq!(text.lines().count(), records.len() + 1);
    }

    #[test]
    fn empty_export_is_header_only() {
        let text = export_csv(&[]).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Rank,City,Province,"));
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let records = vec![CityRecord::new(9, "Dera \"Ghazi\", Khan", "Punjab", 1.0, 1.0, 0.0)];
        let text = export_csv(&records).unwrap();
        assert!(text.contains("9,\"Dera \"\"Ghazi\"\", Khan\",\"Punjab\",1,1,0"), "{text}");
    }

    #[test]
    fn file_name_carries_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(csv_file_name(now), "Pakistan_Population_Data_1700000000123.csv");
    }
}
