use serde::Deserialize;

use crate::entities::movie;

/// A TMDB search result that has not been added to the list yet.
#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    pub id: i32,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl Candidate {
    /// Year prefix of `release_date`, e.g. `"1994-09-23"` gives `1994`.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.split('-').next()?.trim().parse().ok()
    }

    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        let path = self.poster_path.as_deref()?.trim();
        if path.is_empty() {
            return None;
        }
        Some(format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() { &self.original_title } else { &self.title }
    }
}

pub const MAX_RATING: f64 = 10.0;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingReview {
    pub rating: f64,
    pub review: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditFormErrors {
    pub rating: Option<String>,
    pub review: Option<String>,
}

impl EditForm {
    pub fn from_movie(movie: &movie::Model) -> Self {
        Self {
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
            review: movie.review.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<RatingReview, EditFormErrors> {
        let mut errors = EditFormErrors::default();

        let rating = match self.rating.trim() {
            "" => {
                errors.rating = Some("Rating is required.".to_string());
                None
            },
            raw => match raw.parse::<f64>() {
                Ok(r) if r.is_finite() && (0.0..=MAX_RATING).contains(&r) => Some(r),
                Ok(_) => {
                    errors.rating = Some(format!("Rating must be between 0 and {MAX_RATING}."));
                    None
                },
                Err(_) => {
                    errors.rating = Some("Rating must be a number, e.g. 7.5.".to_string());
                    None
                },
            },
        };

        let review = self.review.trim();
        if review.is_empty() {
            errors.review = Some("Review is required.".to_string());
        }

        match rating {
            Some(rating) if errors.review.is_none() => {
                Ok(RatingReview { rating, review: review.to_string() })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

impl AddForm {
    /// Returns the title with whitespace runs collapsed, or the field error.
    pub fn validate(&self) -> Result<String, String> {
        let title = self.title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            return Err("Movie title is required.".to_string());
        }
        Ok(title)
    }
}
