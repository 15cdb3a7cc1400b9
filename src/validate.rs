//! Request validation. Pure functions; every failure is
//! [`AppError::Validation`] with a message naming the field.

use jiff::civil::Date;

use crate::{
    error::{AppError, AppResult},
    models::{ActorRequest, AwardRequest, MovieRequest},
};

const MIN_ACTOR_NAME_CHARS: usize = 2;
const MAX_RATING: f64 = 10.0;
/// `0.7 * 10.0` is not exactly `7.0` in binary floating point.
const TENTHS_TOLERANCE: f64 = 1e-9;
/// First surviving motion picture.
const EARLIEST_PLAUSIBLE_YEAR: i32 = 1888;
const MAX_YEARS_AHEAD: i32 = 10;

pub fn actor(req: &ActorRequest, today: Date) -> AppResult<()> {
    let name = req.name.trim();
    if name.is_empty() {
        return invalid("actor name is required");
    }
    if name.chars().count() < MIN_ACTOR_NAME_CHARS {
        return invalid("actor name must be at least 2 characters");
    }
    if let Some(birth_date) = req.birth_date {
        if birth_date > today {
            return invalid("actor birth_date must not be in the future");
        }
    }
    Ok(())
}

pub fn movie(req: &MovieRequest, today: Date) -> AppResult<()> {
    if req.title.trim().is_empty() {
        return invalid("movie title is required");
    }
    if let Some(rating) = req.rating {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return invalid("movie rating must be between 0.0 and 10.0");
        }
        let tenths = rating * 10.0;
        if (tenths - tenths.round()).abs() > TENTHS_TOLERANCE {
            return invalid("movie rating must have at most one decimal place");
        }
    }
    advise_year("movie", "release_year", req.release_year, today);
    Ok(())
}

pub fn award(req: &AwardRequest, today: Date) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return invalid("award name is required");
    }
    if req.movie_id.is_none() && req.actor_id.is_none() {
        return invalid("award must reference a movie_id or an actor_id");
    }
    advise_year("award", "year", req.year, today);
    Ok(())
}

/// Rating in tenths of a point, as stored.
pub fn rating_tenths(rating: f64) -> i16 {
    (rating * 10.0).round().clamp(0.0, 100.0) as i16
}

/// Implausible years are logged, never rejected.
fn advise_year(kind: &str, field: &str, year: i32, today: Date) -> bool {
    let latest = i32::from(today.year()) + MAX_YEARS_AHEAD;
    let plausible = (EARLIEST_PLAUSIBLE_YEAR..=latest).contains(&year);
    if !plausible {
        tracing::warn!(kind, field, year, "implausible year accepted");
    }
    plausible
}

fn invalid(message: &str) -> AppResult<()> {
    Err(AppError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use uuid::Uuid;

    use super::*;

    const TODAY: Date = date(2024, 6, 1);

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn actor_named(name: &str) -> ActorRequest {
        ActorRequest { name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn actor_name_rules() {
        assert_eq!(message(actor(&actor_named(""), TODAY)), "actor name is required");
        assert_eq!(message(actor(&actor_named("   "), TODAY)), "actor name is required");
        assert_eq!(
            message(actor(&actor_named("A"), TODAY)),
            "actor name must be at least 2 characters"
        );
        assert!(actor(&actor_named("Jo"), TODAY).is_ok());
    }

    #[test]
    fn actor_birth_date_not_in_future() {
        let mut req = actor_named("Tom Hanks");
        req.birth_date = Some(date(2024, 6, 2));
        assert_eq!(message(actor(&req, TODAY)), "actor birth_date must not be in the future");

        req.birth_date = Some(TODAY);
        assert!(actor(&req, TODAY).is_ok());
    }

    #[test]
    fn movie_rating_bounds() {
        let mut req = MovieRequest { title: "Inception".into(), release_year: 2010, ..Default::default() };
        assert!(movie(&req, TODAY).is_ok());

        for bad in [-0.1, 10.1, f64::NAN] {
            req.rating = Some(bad);
            assert_eq!(message(movie(&req, TODAY)), "movie rating must be between 0.0 and 10.0");
        }
        for good in [0.0, 8.8, 10.0] {
            req.rating = Some(good);
            assert!(movie(&req, TODAY).is_ok());
        }
    }

    #[test]
    fn movie_title_required_but_year_is_advisory() {
        let req = MovieRequest { release_year: 3000, ..Default::default() };
        assert_eq!(message(movie(&req, TODAY)), "movie title is required");

        let req = MovieRequest { title: "Future".into(), release_year: 3000, ..Default::default() };
        assert!(movie(&req, TODAY).is_ok());
        assert!(!advise_year("movie", "release_year", 3000, TODAY));
        assert!(advise_year("movie", "release_year", 1994, TODAY));
    }

    #[test]
    fn award_needs_a_reference() {
        let mut req = AwardRequest { name: "Best Actor".into(), year: 1995, ..Default::default() };
        assert_eq!(message(award(&req, TODAY)), "award must reference a movie_id or an actor_id");

        req.actor_id = Some(Uuid::nil());
        assert!(award(&req, TODAY).is_ok());

        req.actor_id = None;
        req.movie_id = Some(Uuid::nil());
        assert!(award(&req, TODAY).is_ok());

        req.name = String::new();
        assert_eq!(message(award(&req, TODAY)), "award name is required");
    }

    #[test]
    fn movie_rating_allows_one_decimal_place() {
        let mut req = MovieRequest { title: "Inception".into(), ..Default::default() };
        for bad in [7.25, 8.05, 0.01] {
            req.rating = Some(bad);
            assert_eq!(
                message(movie(&req, TODAY)),
                "movie rating must have at most one decimal place"
            );
        }
        for good in [0.7, 7.3, 9.9, 1.0] {
            req.rating = Some(good);
            assert!(movie(&req, TODAY).is_ok(), "{good} should be accepted");
        }
    }

    #[test]
    fn accepted_ratings_survive_storage() {
        for rating in [0.0, 0.1, 0.7, 2.3, 5.5, 8.8, 9.9, 10.0] {
            assert_eq!(f64::from(rating_tenths(rating)) / 10.0, rating);
        }
        assert_eq!(rating_tenths(10.0), 100);
    }
}
