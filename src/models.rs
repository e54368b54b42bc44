use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use thiserror::Error;

use crate::entities::{cast, genre, movie, review, trailer};

#[derive(Debug, Error)]
#[error("{0:?} is not an amount with at most two decimals")]
pub struct ParseAmountError(String);

/// Non-negative amount with at most two decimals, as hundredths.
fn parse_hundredths(input: &str) -> Result<i64, ParseAmountError> {
    let invalid = || ParseAmountError(input.to_string());
    let value = Decimal::from_str(input).map_err(|_| invalid())?;
    if value.is_sign_negative() || value.scale() > 2 {
        return Err(invalid());
    }
    value.checked_mul(Decimal::ONE_HUNDRED).and_then(|v| v.to_i64()).ok_or_else(invalid)
}

fn hundredths(value: i64) -> Decimal {
    Decimal::new(value, 2).round_dp(2)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hundredths(self.0).fmt(f)
    }
}

impl FromStr for Money {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s.trim()).map(Money)
    }
}

/// Review score between 0.00 and 9.99.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i32);

impl Rating {
    pub const fn from_hundredths(value: i32) -> Self {
        Self(value)
    }

    pub const fn hundredths(self) -> i32 {
        self.0
    }

    /// Mean rounded half up, `None` for no ratings.
    pub fn mean(ratings: impl IntoIterator<Item = i32>) -> Option<Self> {
        let (sum, count) =
            ratings.into_iter().fold((0i64, 0i64), |(sum, n), r| (sum + i64::from(r), n + 1));
        Self::from_total(sum, count)
    }

    /// Mean of `count` ratings adding up to `sum`.
    pub fn from_total(sum: i64, count: i64) -> Option<Self> {
        if count <= 0 {
            return None;
        }
        i32::try_from((sum * 2 + count) / (count * 2)).ok().map(Self)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hundredths(i64::from(self.0)).fmt(f)
    }
}

/// Editable movie fields. A `None` price keeps the stored one, or the
/// store default on insert.
#[derive(Clone, Debug, Default)]
pub struct NewMovie {
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub budget: Option<Money>,
    pub revenue: Option<Money>,
    pub imdb_url: Option<String>,
    pub tmdb_url: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<i64>,
    pub run_time: Option<i32>,
    pub price: Option<Money>,
}

#[derive(Clone, Debug, Default)]
pub struct NewTrailer {
    pub name: Option<String>,
    pub trailer_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewCast {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub tmdb_url: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<i64>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub salt: Option<String>,
    pub phone_number: Option<String>,
    pub two_factor_enabled: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct NewReview {
    pub rating: Rating,
    pub review_text: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Credit {
    pub cast: cast::Model,
    pub character: String,
}

#[derive(Clone, Debug)]
pub struct MovieDetails {
    pub movie: movie::Model,
    pub rating: Option<Rating>,
    pub trailers: Vec<trailer::Model>,
    pub genres: Vec<genre::Model>,
    pub credits: Vec<Credit>,
    pub reviews: Vec<review::Model>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub movies: u64,
    pub genres: u64,
    pub cast: u64,
}

/// A movie row as the index page lists it.
#[derive(Clone, Debug)]
pub struct MovieSummary {
    pub movie: movie::Model,
    pub rating: Option<Rating>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub budget: String,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("9.90", 990)]
    #[case("12", 1200)]
    #[case("12.5", 1250)]
    #[case(" 0.05 ", 5)]
    #[case("0.75", 75)]
    #[case("1200000", 120_000_000)]
    fn money_parses(#[case] input: &str, #[case] cents: i64) {
        assert_eq!(input.parse::<Money>().unwrap().cents(), cents);
    }

    #[rstest]
    #[case("")]
    #[case("1.2.3")]
    #[case("-1")]
    #[case("1.234")]
    #[case("1,000")]
    #[case("ten")]
    #[case("99999999999999999999")]
    #[case("79228162514264337593543950335")]
    fn money_rejects(#[case] input: &str) {
        assert!(input.parse::<Money>().is_err());
    }

    #[test]
    fn money_displays_two_decimals() {
        assert_eq!(Money::from_cents(990).to_string(), "9.90");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn rating_mean_rounds_half_up() {
        assert_eq!(Rating::mean([]), None);
        assert_eq!(Rating::mean([800, 900]), Some(Rating::from_hundredths(850)));
        assert_eq!(Rating::mean([100, 100, 101]), Some(Rating::from_hundredths(100)));
        assert_eq!(Rating::mean([1, 2]), Some(Rating::from_hundredths(2)));
        assert_eq!(Rating::from_hundredths(725).to_string(), "7.25");
        assert_eq!(Rating::from_hundredths(700).to_string(), "7.00");
    }

    #[test]
    fn rating_from_grouped_totals() {
        assert_eq!(Rating::from_total(0, 0), None);
        assert_eq!(Rating::from_total(1_700, 2), Some(Rating::from_hundredths(850)));
        assert_eq!(Rating::from_total(3, 2), Some(Rating::from_hundredths(2)));
    }
}
