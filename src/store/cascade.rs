//! Parent deletes. Dependents are removed by explicit statements inside the
//! same transaction as the parent, so the result does not hinge on the
//! connection's `foreign_keys` pragma.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait};

use super::{Store, not_found};
use crate::{
    entities::{
        cast, favorite, genre, movie, movie_cast, movie_genre, purchase, review, role, trailer,
        user, user_role,
    },
    error::StoreResult,
};

async fn purge<E, C>(db: &C, column: E::Column, id: i32) -> StoreResult<u64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::delete_many().filter(column.eq(id)).exec(db).await?;
    Ok(result.rows_affected)
}

/// Deletes the parent row last; a missing parent aborts the transaction.
async fn remove_parent<E, C>(db: &C, column: E::Column, id: i32) -> StoreResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if purge::<E, C>(db, column, id).await? == 0 {
        return Err(not_found::<E>(id));
    }
    Ok(())
}

impl Store {
    /// Returns the number of dependent rows removed along with the movie.
    pub async fn delete_movie(&self, id: i32) -> StoreResult<u64> {
        let txn = self.db.begin().await?;
        let mut removed = 0;
        removed += purge::<trailer::Entity, _>(&txn, trailer::Column::MovieId, id).await?;
        removed += purge::<movie_genre::Entity, _>(&txn, movie_genre::Column::MovieId, id).await?;
        removed += purge::<movie_cast::Entity, _>(&txn, movie_cast::Column::MovieId, id).await?;
        removed += purge::<favorite::Entity, _>(&txn, favorite::Column::MovieId, id).await?;
        removed += purge::<purchase::Entity, _>(&txn, purchase::Column::MovieId, id).await?;
        removed += purge::<review::Entity, _>(&txn, review::Column::MovieId, id).await?;
        remove_parent::<movie::Entity, _>(&txn, movie::Column::Id, id).await?;
        txn.commit().await?;

        tracing::info!(movie_id = id, removed, "deleted movie");
        Ok(removed)
    }

    pub async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        let txn = self.db.begin().await?;
        let mut removed = 0;
        removed += purge::<favorite::Entity, _>(&txn, favorite::Column::UserId, id).await?;
        removed += purge::<purchase::Entity, _>(&txn, purchase::Column::UserId, id).await?;
        removed += purge::<review::Entity, _>(&txn, review::Column::UserId, id).await?;
        removed += purge::<user_role::Entity, _>(&txn, user_role::Column::UserId, id).await?;
        remove_parent::<user::Entity, _>(&txn, user::Column::Id, id).await?;
        txn.commit().await?;

        tracing::info!(user_id = id, removed, "deleted user");
        Ok(removed)
    }

    pub async fn delete_genre(&self, id: i32) -> StoreResult<u64> {
        let txn = self.db.begin().await?;
        let removed =
            purge::<movie_genre::Entity, _>(&txn, movie_genre::Column::GenreId, id).await?;
        remove_parent::<genre::Entity, _>(&txn, genre::Column::Id, id).await?;
        txn.commit().await?;

        tracing::info!(genre_id = id, removed, "deleted genre");
        Ok(removed)
    }

    pub async fn delete_cast(&self, id: i32) -> StoreResult<u64> {
        let txn = self.db.begin().await?;
        let removed = purge::<movie_cast::Entity, _>(&txn, movie_cast::Column::CastId, id).await?;
        remove_parent::<cast::Entity, _>(&txn, cast::Column::Id, id).await?;
        txn.commit().await?;

        tracing::info!(cast_id = id, removed, "deleted cast member");
        Ok(removed)
    }

    pub async fn delete_role(&self, id: i32) -> StoreResult<u64> {
        let txn = self.db.begin().await?;
        let removed = purge::<user_role::Entity, _>(&txn, user_role::Column::RoleId, id).await?;
        remove_parent::<role::Entity, _>(&txn, role::Column::Id, id).await?;
        txn.commit().await?;

        tracing::info!(role_id = id, removed, "deleted role");
        Ok(removed)
    }
}
