use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, Order,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::Candidate,
};

#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies ordered by rating, ties broken by id so the order is stable.
    pub async fn list_sorted_by_rating(&self, direction: Order) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by(movie::Column::Rating, direction)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<movie::Model> {
        movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie titled {title:?}")))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie with id {id}")))
    }

    pub async fn apply_rating_review(
        &self,
        title: &str,
        rating: f64,
        review: &str,
    ) -> AppResult<movie::Model> {
        let movie = self.find_by_title(title).await?;

        let mut active: movie::ActiveModel = movie.into();
        active.rating = Set(Some(rating));
        active.review = Set(Some(review.to_string()));
        let updated = active.update(&self.db).await?;

        info!(id = updated.id, title = %updated.title, rating, "updated rating and review");
        Ok(updated)
    }

    /// Removes the movie and returns the deleted row.
    pub async fn delete(&self, id: i32) -> AppResult<movie::Model> {
        let movie = self.find_by_id(id).await?;
        movie.clone().delete(&self.db).await?;

        info!(id, title = %movie.title, "deleted movie");
        Ok(movie)
    }

    /// Adds a search result to the list. Rating, ranking and review start unset.
    pub async fn insert_from_external(
        &self,
        candidate: &Candidate,
        image_base_url: &str,
    ) -> AppResult<movie::Model> {
        let year = candidate.release_year().ok_or(AppError::InvalidCandidate {
            id: candidate.id,
            reason: "it has no release year",
        })?;

        let title = candidate.original_title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::InvalidCandidate { id: candidate.id, reason: "it has no title" });
        }

        let model = movie::ActiveModel {
            title: Set(title.clone()),
            year: Set(year),
            description: Set(candidate.overview.clone()),
            img_url: Set(candidate.poster_url(image_base_url).unwrap_or_default()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(movie) => {
                info!(id = movie.id, tmdb_id = candidate.id, title = %movie.title, "added movie");
                Ok(movie)
            },
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::DuplicateTitle(title))
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Assigns `ranking = position + 1` by descending rating, unrated movies
    /// last. Rows already holding the right ranking are left alone.
    /// Returns the number of rows rewritten.
    pub async fn recompute_rankings(&self) -> AppResult<usize> {
        let txn = self.db.begin().await?;

        let movies = movie::Entity::find()
            .order_by_desc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&txn)
            .await?;

        let mut rewritten = 0;
        for (position, movie) in movies.iter().enumerate() {
            let ranking = position as i32 + 1;
            if movie.ranking == Some(ranking) {
                continue;
            }
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(ranking))
                .filter(movie::Column::Id.eq(movie.id))
                .exec(&txn)
                .await?;
            rewritten += 1;
        }

        txn.commit().await?;

        debug!(total = movies.len(), rewritten, "recomputed rankings");
        Ok(rewritten)
    }
}
