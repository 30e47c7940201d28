use std::cmp::Ordering;

use citypop_common::CityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

/// Stable sort by a numeric key, then truncate to `limit`.
///
/// Ties keep their original relative order. NaN keys sort after every number
/// in both directions.
pub(crate) fn top_by<F>(
    records: &[CityRecord],
    key: F,
    direction: Direction,
    limit: usize,
) -> Vec<&CityRecord>
where
    F: Fn(&CityRecord) -> f64,
{
    let mut sorted: Vec<&CityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| compare(key(a), key(b), direction));
    sorted.truncate(limit);
    sorted
}

fn compare(a: f64, b: f64, direction: Direction) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, change: f64) -> CityRecord {
        CityRecord::new(1, city, "P", 100.0, 100.0, change)
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let records = vec![record("a", 1.0), record("b", 5.0), record("c", 1.0), record("d", 5.0)];
        let cities: Vec<&str> = top_by(&records, |r| r.change, Direction::Descending, 10)
            .iter()
            .map(|r| r.city.as_str())
            .collect();
        assert_eq!(cities, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn nan_sorts_last_both_ways() {
        let records = vec![record("nan", f64::NAN), record("lo", -1.0), record("hi", 2.0)];

        let desc: Vec<&str> = top_by(&records, |r| r.change, Direction::Descending, 10)
            .iter()
            .map(|r| r.city.as_str())
            .collect();
        assert_eq!(desc, vec!["hi", "lo", "nan"]);

        let asc: Vec<&str> = top_by(&records, |r| r.change, Direction::Ascending, 10)
            .iter()
            .map(|r| r.city.as_str())
            .collect();
        assert_eq!(asc, vec!["lo", "hi", "nan"]);
    }

    #[test]
    fn truncates_to_limit() {
        let records: Vec<CityRecord> = (0..20).map(|i| record(&i.to_string(), i as f64)).collect();
        assert_eq!(top_by(&records, |r| r.change, Direction::Descending, 10).len(), 10);
        assert!(top_by(&[], |r| r.change, Direction::Descending, 10).is_empty());
    }
}
