use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use super::{Store, insert, not_found, now_sec, update};
use crate::{
    entities::{favorite, movie, purchase, review},
    error::StoreResult,
    models::NewReview,
};

impl Store {
    /// The same movie may be favorited more than once by one user; see
    /// `is_favorite` for a membership check.
    pub async fn add_favorite(&self, user_id: i32, movie_id: i32) -> StoreResult<favorite::Model> {
        let model =
            favorite::ActiveModel { id: NotSet, movie_id: Set(movie_id), user_id: Set(user_id) };
        let favorite = insert(&self.db, model).await?;
        tracing::debug!(user_id, movie_id, favorite_id = favorite.id, "added favorite");
        Ok(favorite)
    }

    pub async fn remove_favorite(&self, id: i32) -> StoreResult<()> {
        let result = favorite::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found::<favorite::Entity>(id));
        }
        Ok(())
    }

    pub async fn favorites_for(&self, user_id: i32) -> StoreResult<Vec<favorite::Model>> {
        Ok(favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_asc(favorite::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn is_favorite(&self, user_id: i32, movie_id: i32) -> StoreResult<bool> {
        let count = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::MovieId.eq(movie_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Inserts a caller-built purchase row as is, after the column checks.
    pub async fn insert_purchase(
        &self,
        model: purchase::ActiveModel,
    ) -> StoreResult<purchase::Model> {
        insert(&self.db, model).await
    }

    /// Charges the movie's current price under a fresh purchase number.
    pub async fn purchase_movie(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> StoreResult<purchase::Model> {
        let txn = self.db.begin().await?;
        let movie = movie::Entity::find_by_id(movie_id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found::<movie::Entity>(movie_id))?;

        let model = purchase::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            purchase_number: Set(Uuid::new_v4().hyphenated().to_string()),
            total_price: Set(movie.price),
            purchase_date_time: Set(now_sec()),
            movie_id: Set(movie.id),
        };
        let purchase = insert(&txn, model).await?;
        txn.commit().await?;

        tracing::info!(
            user_id,
            movie_id,
            purchase_number = %purchase.purchase_number,
            total_price = purchase.total_price,
            "purchased movie"
        );
        Ok(purchase)
    }

    /// Newest first.
    pub async fn purchases_for(&self, user_id: i32) -> StoreResult<Vec<purchase::Model>> {
        Ok(purchase::Entity::find()
            .filter(purchase::Column::UserId.eq(user_id))
            .order_by_desc(purchase::Column::PurchaseDateTime)
            .order_by_desc(purchase::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn add_review(
        &self,
        movie_id: i32,
        user_id: i32,
        new: NewReview,
    ) -> StoreResult<review::Model> {
        let model = review::ActiveModel {
            movie_id: Set(movie_id),
            user_id: Set(user_id),
            rating: Set(new.rating.hundredths()),
            review_text: Set(new.review_text),
        };
        let review = insert(&self.db, model).await?;
        tracing::info!(movie_id, user_id, rating = review.rating, "added review");
        Ok(review)
    }

    pub async fn update_review(
        &self,
        movie_id: i32,
        user_id: i32,
        changes: NewReview,
    ) -> StoreResult<review::Model> {
        let model = review::ActiveModel {
            movie_id: Unchanged(movie_id),
            user_id: Unchanged(user_id),
            rating: Set(changes.rating.hundredths()),
            review_text: Set(changes.review_text),
        };
        update(&self.db, model, format!("{movie_id}/{user_id}")).await
    }

    pub async fn delete_review(&self, movie_id: i32, user_id: i32) -> StoreResult<()> {
        let result = review::Entity::delete_by_id((movie_id, user_id)).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found::<review::Entity>(format!("{movie_id}/{user_id}")));
        }
        Ok(())
    }

    pub async fn reviews_for(&self, movie_id: i32) -> StoreResult<Vec<review::Model>> {
        Ok(review::Entity::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_desc(review::Column::Rating)
            .all(&self.db)
            .await?)
    }
}
