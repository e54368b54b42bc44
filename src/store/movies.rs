use std::collections::HashMap;

use sea_orm::{
    ActiveValue::{self, NotSet, Set, Unchanged},
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

use super::{Store, insert, not_found, now_sec, update};
use crate::{
    entities::{cast, genre, movie, movie_genre, review, trailer},
    error::StoreResult,
    models::{CatalogCounts, Money, MovieDetails, MovieSummary, NewMovie, NewTrailer, Rating},
};

fn movie_model(new: NewMovie, id: ActiveValue<i32>) -> movie::ActiveModel {
    movie::ActiveModel {
        id,
        title: Set(new.title),
        overview: Set(new.overview),
        tagline: Set(new.tagline),
        budget: Set(new.budget.map(Money::cents)),
        revenue: Set(new.revenue.map(Money::cents)),
        imdb_url: Set(new.imdb_url),
        tmdb_url: Set(new.tmdb_url),
        poster_url: Set(new.poster_url),
        backdrop_url: Set(new.backdrop_url),
        original_language: Set(new.original_language),
        release_date: Set(new.release_date),
        run_time: Set(new.run_time),
        price: new.price.map_or(NotSet, |price| Set(price.cents())),
        created_date: NotSet,
        updated_date: NotSet,
    }
}

fn trailer_model(new: NewTrailer) -> trailer::ActiveModel {
    trailer::ActiveModel {
        id: NotSet,
        movie_id: NotSet,
        trailer_url: Set(new.trailer_url),
        name: Set(new.name),
    }
}

impl Store {
    pub async fn create_movie(&self, new: NewMovie) -> StoreResult<movie::Model> {
        let movie = insert(&self.db, movie_model(new, NotSet)).await?;
        tracing::info!(movie_id = movie.id, title = %movie.title, "created movie");
        Ok(movie)
    }

    pub async fn movie(&self, id: i32) -> StoreResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found::<movie::Entity>(id))
    }

    pub async fn movies(&self) -> StoreResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Title).all(&self.db).await?)
    }

    pub async fn movies_in_genre(&self, genre_id: i32) -> StoreResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .inner_join(movie_genre::Entity)
            .filter(movie_genre::Column::GenreId.eq(genre_id))
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?)
    }

    /// Replaces the editable fields. `created_date` is never touched.
    pub async fn update_movie(&self, id: i32, changes: NewMovie) -> StoreResult<movie::Model> {
        let mut model = movie_model(changes, Unchanged(id));
        model.updated_date = Set(Some(now_sec()));
        let movie = update(&self.db, model, id).await?;
        tracing::info!(movie_id = id, "updated movie");
        Ok(movie)
    }

    pub async fn movie_rating(&self, id: i32) -> StoreResult<Option<Rating>> {
        let ratings: Vec<i32> = review::Entity::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::MovieId.eq(id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(Rating::mean(ratings))
    }

    /// Movies for the index page, optionally narrowed to one genre, each
    /// with its computed rating.
    pub async fn movie_summaries(&self, genre_id: Option<i32>) -> StoreResult<Vec<MovieSummary>> {
        let movies = match genre_id {
            Some(genre_id) => self.movies_in_genre(genre_id).await?,
            None => self.movies().await?,
        };

        let mut totals = review::Entity::find()
            .select_only()
            .column(review::Column::MovieId)
            .column_as(review::Column::Rating.sum(), "total")
            .column_as(review::Column::Rating.count(), "reviews")
            .group_by(review::Column::MovieId);
        if let Some(genre_id) = genre_id {
            totals = totals
                .join(JoinType::InnerJoin, review::Relation::Movie.def())
                .join(JoinType::InnerJoin, movie::Relation::MovieGenre.def())
                .filter(movie_genre::Column::GenreId.eq(genre_id));
        }
        let rows: Vec<(i32, i64, i64)> = totals.into_tuple().all(&self.db).await?;

        let ratings: HashMap<i32, Rating> = rows
            .into_iter()
            .filter_map(|(movie_id, sum, count)| {
                Rating::from_total(sum, count).map(|rating| (movie_id, rating))
            })
            .collect();

        Ok(movies
            .into_iter()
            .map(|movie| {
                let rating = ratings.get(&movie.id).copied();
                MovieSummary { movie, rating }
            })
            .collect())
    }

    pub async fn movie_details(&self, id: i32) -> StoreResult<MovieDetails> {
        let movie = self.movie(id).await?;
        let (trailers, genres, credits, reviews) = futures::try_join!(
            self.trailers_for(id),
            self.genres_for(id),
            self.credits_for(id),
            self.reviews_for(id),
        )?;
        let rating = Rating::mean(reviews.iter().map(|r| r.rating));
        tracing::debug!(
            movie_id = id,
            trailers = trailers.len(),
            reviews = reviews.len(),
            "loaded movie details"
        );
        Ok(MovieDetails { movie, rating, trailers, genres, credits, reviews })
    }

    pub async fn catalog_counts(&self) -> StoreResult<CatalogCounts> {
        let (movies, genres, cast) = futures::try_join!(
            movie::Entity::find().count(&self.db),
            genre::Entity::find().count(&self.db),
            cast::Entity::find().count(&self.db),
        )?;
        Ok(CatalogCounts { movies, genres, cast })
    }

    pub async fn add_trailer(&self, movie_id: i32, new: NewTrailer) -> StoreResult<trailer::Model> {
        let mut model = trailer_model(new);
        model.movie_id = Set(movie_id);
        let trailer = insert(&self.db, model).await?;
        tracing::info!(movie_id, trailer_id = trailer.id, "added trailer");
        Ok(trailer)
    }

    pub async fn trailers_for(&self, movie_id: i32) -> StoreResult<Vec<trailer::Model>> {
        Ok(trailer::Entity::find()
            .filter(trailer::Column::MovieId.eq(movie_id))
            .order_by_asc(trailer::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn update_trailer(
        &self,
        id: i32,
        changes: NewTrailer,
    ) -> StoreResult<trailer::Model> {
        let mut model = trailer_model(changes);
        model.id = Unchanged(id);
        update(&self.db, model, id).await
    }

    pub async fn delete_trailer(&self, id: i32) -> StoreResult<()> {
        let result = trailer::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found::<trailer::Entity>(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StoreError,
        models::{NewCast, NewReview},
        store::testing::{self, store},
    };

    #[tokio::test]
    async fn round_trip_fills_store_defaults() {
        let store = store().await;
        let new = NewMovie {
            title: "Inception".to_string(),
            overview: Some("A thief who steals corporate secrets".to_string()),
            tagline: Some("Your mind is the scene of the crime".to_string()),
            budget: Some(Money::from_cents(16_000_000_000)),
            original_language: Some("en".to_string()),
            run_time: Some(148),
            ..Default::default()
        };

        let created = store.create_movie(new.clone()).await.unwrap();
        let read = store.movie(created.id).await.unwrap();

        assert_eq!(read, created);
        assert_eq!(read.title, new.title);
        assert_eq!(read.overview, new.overview);
        assert_eq!(read.tagline, new.tagline);
        assert_eq!(read.budget, Some(16_000_000_000));
        assert_eq!(read.original_language.as_deref(), Some("en"));
        assert_eq!(read.run_time, Some(148));
        assert_eq!(read.price, 990);
        assert!(read.created_date > 0);
        assert_eq!(read.updated_date, None);
    }

    #[tokio::test]
    async fn explicit_price_is_kept() {
        let store = store().await;
        let created = store
            .create_movie(NewMovie {
                title: "Titanic".to_string(),
                price: Some(Money::from_cents(1_499)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(store.movie(created.id).await.unwrap().price, 1_499);
    }

    #[tokio::test]
    async fn oversized_title_is_rejected_and_not_stored() {
        let store = store().await;
        let err = store
            .create_movie(NewMovie { title: "x".repeat(257), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { ref column, .. } if column == "title"));
        assert_eq!(store.catalog_counts().await.unwrap().movies, 0);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_stamps_update_time() {
        let store = store().await;
        let movie = testing::movie(&store, "Avatr").await;

        let updated = store
            .update_movie(movie.id, NewMovie { title: "Avatar".to_string(), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(updated.title, "Avatar");
        assert_eq!(updated.price, 990);
        assert_eq!(updated.created_date, movie.created_date);
        assert!(updated.updated_date.is_some());
    }

    #[tokio::test]
    async fn update_of_missing_movie_is_not_found() {
        let store = store().await;
        let err = store
            .update_movie(42, NewMovie { title: "Ghost".to_string(), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref what) if what == "movie 42"), "{err:?}");
    }

    #[tokio::test]
    async fn genre_filter_and_ratings() {
        let store = store().await;
        let drama = testing::genre(&store, "Drama").await;
        let titanic = testing::movie(&store, "Titanic").await;
        let avatar = testing::movie(&store, "Avatar").await;
        store.tag_genre(titanic.id, drama.id).await.unwrap();

        for (email, hundredths) in [("a@example.com", 800), ("b@example.com", 900)] {
            let user = testing::user(&store, email).await;
            let rating = Rating::from_hundredths(hundredths);
            let review = NewReview { rating, review_text: None };
            store.add_review(titanic.id, user.id, review).await.unwrap();
        }

        let all = store.movie_summaries(None).await.unwrap();
        let titles: Vec<_> = all.iter().map(|s| s.movie.title.as_str()).collect();
        assert_eq!(titles, ["Avatar", "Titanic"]);
        assert_eq!(all[0].rating, None);
        assert_eq!(all[1].rating, Some(Rating::from_hundredths(850)));

        let dramas = store.movie_summaries(Some(drama.id)).await.unwrap();
        assert_eq!(dramas.len(), 1);
        assert_eq!(dramas[0].movie.id, titanic.id);

        let rating = store.movie_rating(titanic.id).await.unwrap();
        assert_eq!(rating, Some(Rating::from_hundredths(850)));
        assert_eq!(store.movie_rating(avatar.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn summaries_scale_past_the_bind_limit() {
        let store = store().await;
        let titles: Vec<String> = (0..40_000).map(|n| format!("Movie {n:05}")).collect();
        for chunk in titles.chunks(500) {
            let rows = chunk.iter().map(|title| movie::ActiveModel {
                title: Set(title.clone()),
                ..Default::default()
            });
            movie::Entity::insert_many(rows).exec(store.db()).await.unwrap();
        }
        let first = store.movies().await.unwrap().remove(0);
        let user = testing::user(&store, "critic@example.com").await;
        let review = NewReview { rating: Rating::from_hundredths(640), review_text: None };
        store.add_review(first.id, user.id, review).await.unwrap();

        let summaries = store.movie_summaries(None).await.unwrap();
        assert_eq!(summaries.len(), 40_000);
        assert_eq!(summaries[0].movie.title, "Movie 00000");
        assert_eq!(summaries[0].rating, Some(Rating::from_hundredths(640)));
        assert!(summaries[1..].iter().all(|s| s.rating.is_none()));
    }

    #[tokio::test]
    async fn genre_summaries_only_rate_movies_in_the_genre() {
        let store = store().await;
        let drama = testing::genre(&store, "Drama").await;
        let titanic = testing::movie(&store, "Titanic").await;
        let avatar = testing::movie(&store, "Avatar").await;
        store.tag_genre(titanic.id, drama.id).await.unwrap();
        let user = testing::user(&store, "critic@example.com").await;
        for (movie_id, hundredths) in [(titanic.id, 700), (avatar.id, 300)] {
            let rating = Rating::from_hundredths(hundredths);
            let review = NewReview { rating, review_text: None };
            store.add_review(movie_id, user.id, review).await.unwrap();
        }

        let dramas = store.movie_summaries(Some(drama.id)).await.unwrap();
        assert_eq!(dramas.len(), 1);
        assert_eq!(dramas[0].rating, Some(Rating::from_hundredths(700)));
        assert!(store.movie_summaries(Some(drama.id + 1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trailers_belong_to_an_existing_movie() {
        let store = store().await;
        let movie = testing::movie(&store, "Interstellar").await;

        let trailer = store
            .add_trailer(
                movie.id,
                NewTrailer {
                    name: Some("Official Trailer".to_string()),
                    trailer_url: Some("https://www.youtube.com/watch?v=zSWdZVtXT7E".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(store.trailers_for(movie.id).await.unwrap(), vec![trailer.clone()]);

        let renamed = store
            .update_trailer(
                trailer.id,
                NewTrailer { name: Some("Teaser".to_string()), trailer_url: None },
            )
            .await
            .unwrap();
        assert_eq!(renamed.movie_id, movie.id);
        assert_eq!(renamed.name.as_deref(), Some("Teaser"));

        let orphan = store.add_trailer(movie.id + 100, NewTrailer::default()).await.unwrap_err();
        assert!(matches!(orphan, StoreError::MissingReference(_)), "{orphan:?}");

        store.delete_trailer(trailer.id).await.unwrap();
        assert!(matches!(store.delete_trailer(trailer.id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn details_collect_related_rows() {
        let store = store().await;
        let movie = testing::movie(&store, "Fight Club").await;
        let genre = testing::genre(&store, "Thriller").await;
        let cast = store
            .create_cast(NewCast { name: Some("Brad Pitt".to_string()), ..Default::default() })
            .await
            .unwrap();
        store.tag_genre(movie.id, genre.id).await.unwrap();
        store.add_credit(movie.id, cast.id, "Tyler Durden").await.unwrap();
        store.add_trailer(movie.id, NewTrailer::default()).await.unwrap();

        let details = store.movie_details(movie.id).await.unwrap();
        assert_eq!(details.movie, movie);
        assert_eq!(details.genres, vec![genre]);
        assert_eq!(details.trailers.len(), 1);
        assert_eq!(details.credits.len(), 1);
        assert_eq!(details.credits[0].character, "Tyler Durden");
        assert_eq!(details.credits[0].cast, cast);
        assert!(details.reviews.is_empty());
        assert_eq!(details.rating, None);

        assert!(matches!(store.movie_details(movie.id + 1).await, Err(StoreError::NotFound(_))));
    }
}
