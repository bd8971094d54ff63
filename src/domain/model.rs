use crate::utils::error::{MovieError, Result};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One "Get Movies" request: built per action, used once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub year: i32,
    pub month: u32,
    pub api_key: String,
}

impl Query {
    pub fn new(year: i32, month: u32, api_key: impl Into<String>) -> Result<Self> {
        // reject months that can't form a calendar range up front
        DateRange::for_month(year, month)?;
        Ok(Self {
            year,
            month,
            api_key: api_key.into(),
        })
    }

    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::for_month(self.year, self.month)
    }
}

/// Inclusive release-date window covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn for_month(year: i32, month: u32) -> Result<Self> {
        let invalid = || MovieError::InvalidDate { year, month };

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    pub fn start_date(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_date(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    pub fn days(&self) -> u32 {
        self.end.day()
    }
}

/// A movie entry as TMDb returns it from `discover/movie`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieResult {
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl MovieResult {
    /// Field-by-field read of one `results` entry; a field with an
    /// unexpected type is treated as absent instead of failing the entry.
    pub fn from_json(entry: &Value) -> Self {
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            title: text("title"),
            poster_path: text("poster_path"),
            overview: text("overview"),
            release_date: text("release_date"),
            vote_average: entry.get("vote_average").and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("No Title")
    }

    pub fn display_overview(&self) -> &str {
        self.overview.as_deref().unwrap_or("No overview available.")
    }

    pub fn display_release_date(&self) -> &str {
        self.release_date.as_deref().unwrap_or("Unknown")
    }

    pub fn display_rating(&self) -> String {
        self.vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Envelope of a `discover/movie` page; entries stay raw until truncated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

impl DiscoverResponse {
    pub fn top(&self, n: usize) -> Vec<MovieResult> {
        self.results.iter().take(n).map(MovieResult::from_json).collect()
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Accepts "2", "02", "feb" or "February".
pub fn parse_month(input: &str) -> Option<u32> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    input.parse::<Month>().ok().map(|m| m.number_from_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_leap(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    #[test]
    fn test_february_non_leap() {
        let range = DateRange::for_month(2023, 2).unwrap();
        assert_eq!(range.start_date(), "2023-02-01");
        assert_eq!(range.end_date(), "2023-02-28");
    }

    #[test]
    fn test_february_leap() {
        let range = DateRange::for_month(2024, 2).unwrap();
        assert_eq!(range.start_date(), "2024-02-01");
        assert_eq!(range.end_date(), "2024-02-29");
    }

    #[test]
    fn test_century_leap_rules() {
        assert_eq!(DateRange::for_month(1900, 2).unwrap().days(), 28);
        assert_eq!(DateRange::for_month(2000, 2).unwrap().days(), 29);
        assert_eq!(DateRange::for_month(2100, 2).unwrap().days(), 28);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let range = DateRange::for_month(1999, 12).unwrap();
        assert_eq!(range.start_date(), "1999-12-01");
        assert_eq!(range.end_date(), "1999-12-31");
    }

    #[test]
    fn test_end_day_matches_month_length() {
        for year in 1890..=2110 {
            for month in 1..=12u32 {
                let expected = match month {
                    2 if is_leap(year) => 29,
                    2 => 28,
                    4 | 6 | 9 | 11 => 30,
                    _ => 31,
                };
                let range = DateRange::for_month(year, month).unwrap();
                assert_eq!(range.days(), expected, "{}-{:02}", year, month);
                assert_eq!(range.start.day(), 1);
            }
        }
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(
            DateRange::for_month(2024, 0),
            Err(MovieError::InvalidDate { year: 2024, month: 0 })
        ));
        assert!(DateRange::for_month(2024, 13).is_err());
        assert!(Query::new(2024, 13, "key").is_err());
    }

    #[test]
    fn test_movie_result_tolerates_missing_and_null_fields() {
        let movie = MovieResult::from_json(&serde_json::json!({"title": null, "vote_average": 7.5}));
        assert_eq!(movie.display_title(), "No Title");
        assert_eq!(movie.display_overview(), "No overview available.");
        assert_eq!(movie.display_release_date(), "Unknown");
        assert_eq!(movie.display_rating(), "7.5");
        assert!(movie.poster_path.is_none());
    }

    #[test]
    fn test_movie_result_wrong_typed_fields() {
        let movie = MovieResult::from_json(&serde_json::json!({
            "title": "Odd",
            "poster_path": 42,
            "overview": ["not", "text"],
            "vote_average": "7.0"
        }));
        assert_eq!(movie.display_title(), "Odd");
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.display_overview(), "No overview available.");
        assert_eq!(movie.vote_average, Some(7.0));

        let movie = MovieResult::from_json(&serde_json::json!("just a string"));
        assert_eq!(movie, MovieResult::default());
    }

    #[test]
    fn test_rating_keeps_one_decimal() {
        let movie = MovieResult {
            vote_average: Some(8.0),
            ..Default::default()
        };
        assert_eq!(movie.display_rating(), "8.0");

        let movie = MovieResult {
            vote_average: Some(6.456),
            ..Default::default()
        };
        assert_eq!(movie.display_rating(), "6.5");
    }

    #[test]
    fn test_discover_response_without_results() {
        let response: DiscoverResponse =
            serde_json::from_value(serde_json::json!({"page": 1})).unwrap();
        assert!(response.top(5).is_empty());
    }

    #[test]
    fn test_discover_response_keeps_bad_entries_in_place() {
        let response: DiscoverResponse = serde_json::from_value(serde_json::json!({
            "results": [
                {"title": "Good", "vote_average": 7.1},
                {"title": "Odd", "vote_average": {"avg": 7}},
                {"title": "Third"}
            ]
        }))
        .unwrap();

        let movies = response.top(2);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].display_title(), "Good");
        assert_eq!(movies[1].display_title(), "Odd");
        assert_eq!(movies[1].display_rating(), "N/A");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(2), Some("February"));
        assert_eq!(month_name(13), None);
        assert_eq!(parse_month("02"), Some(2));
        assert_eq!(parse_month("feb"), Some(2));
        assert_eq!(parse_month("December"), Some(12));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("smarch"), None);
    }
}
