use crate::domain::model::{month_name, parse_month, Query};
use crate::utils::error::{MovieError, Result};
use crate::utils::validation::{validate_ordered, validate_range};
use rand::Rng;

pub const DEFAULT_YEAR: i32 = 2023;
pub const DEFAULT_MONTH: u32 = 1;

/// Selectable year window for the year picker and the Random action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        validate_ordered("min_year", min, "max_year", max)?;
        Ok(Self { min, max })
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// Selection state owned by whichever front-end is driving the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    year: i32,
    month: u32,
    api_key: String,
    bounds: YearBounds,
}

impl SessionState {
    pub fn new(bounds: YearBounds, api_key: impl Into<String>) -> Self {
        Self {
            year: bounds.clamp(DEFAULT_YEAR),
            month: DEFAULT_MONTH,
            api_key: api_key.into(),
            bounds,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn set_year(&mut self, year: i32) -> Result<()> {
        validate_range("year", year, self.bounds.min, self.bounds.max)?;
        self.year = year;
        Ok(())
    }

    pub fn set_month(&mut self, month: u32) -> Result<()> {
        validate_range("month", month, 1, 12)?;
        self.month = month;
        Ok(())
    }

    /// Month by number or English name.
    pub fn set_month_str(&mut self, input: &str) -> Result<()> {
        let month = parse_month(input).ok_or_else(|| MovieError::InvalidConfigValueError {
            field: "month".to_string(),
            value: input.to_string(),
            reason: "expected 1-12 or a month name".to_string(),
        })?;
        self.set_month(month)
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Uniform year within bounds and uniform month.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.year = rng.gen_range(self.bounds.min..=self.bounds.max);
        self.month = rng.gen_range(1..=12);
    }

    pub fn query(&self) -> Result<Query> {
        Query::new(self.year, self.month, self.api_key.trim())
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {}",
            month_name(self.month).unwrap_or("?"),
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds(min: i32, max: i32) -> YearBounds {
        YearBounds::new(min, max).unwrap()
    }

    #[test]
    fn test_default_selection_is_clamped() {
        let session = SessionState::new(bounds(1978, 2026), "");
        assert_eq!(session.year(), 2023);
        assert_eq!(session.month(), 1);

        let session = SessionState::new(bounds(2000, 2010), "");
        assert_eq!(session.year(), 2010);

        let session = SessionState::new(bounds(2024, 2026), "");
        assert_eq!(session.year(), 2024);
    }

    #[test]
    fn test_bounds_must_be_ordered() {
        assert!(YearBounds::new(2021, 2020).is_err());
        assert!(YearBounds::new(2020, 2020).is_ok());
    }

    #[test]
    fn test_set_year_respects_bounds() {
        let mut session = SessionState::new(bounds(1978, 2026), "");
        assert!(session.set_year(1977).is_err());
        assert!(session.set_year(2027).is_err());
        assert!(session.set_year(1978).is_ok());
        assert_eq!(session.year(), 1978);
    }

    #[test]
    fn test_set_month() {
        let mut session = SessionState::new(bounds(1978, 2026), "");
        assert!(session.set_month(0).is_err());
        assert!(session.set_month(13).is_err());
        session.set_month_str("august").unwrap();
        assert_eq!(session.month(), 8);
        session.set_month_str("3").unwrap();
        assert_eq!(session.month(), 3);
        assert!(session.set_month_str("nope").is_err());
        assert_eq!(session.month(), 3);
    }

    #[test]
    fn test_api_key_presence() {
        let mut session = SessionState::new(bounds(1978, 2026), "   ");
        assert!(!session.has_api_key());
        session.set_api_key("abc");
        assert!(session.has_api_key());
        assert_eq!(session.query().unwrap().api_key, "abc");
    }

    #[test]
    fn test_randomize_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = SessionState::new(bounds(2000, 2020), "");
        let mut seen_years = std::collections::HashSet::new();
        let mut seen_months = std::collections::HashSet::new();

        for _ in 0..2000 {
            session.randomize(&mut rng);
            assert!((2000..=2020).contains(&session.year()));
            assert!((1..=12).contains(&session.month()));
            seen_years.insert(session.year());
            seen_months.insert(session.month());
        }

        assert_eq!(seen_years.len(), 21);
        assert_eq!(seen_months.len(), 12);
    }

    #[test]
    fn test_randomize_single_year_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = SessionState::new(bounds(1999, 1999), "");
        session.randomize(&mut rng);
        assert_eq!(session.year(), 1999);
    }

    #[test]
    fn test_describe() {
        let mut session = SessionState::new(bounds(1978, 2026), "");
        session.set_month(2).unwrap();
        session.set_year(2024).unwrap();
        assert_eq!(session.describe(), "February 2024");
    }
}
