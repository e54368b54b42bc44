use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
};

use super::{Store, insert, not_found, update};
use crate::{
    entities::{cast, genre, movie_cast, movie_genre},
    error::StoreResult,
    models::{Credit, NewCast},
};

fn cast_model(new: NewCast) -> cast::ActiveModel {
    cast::ActiveModel {
        id: NotSet,
        name: Set(new.name),
        gender: Set(new.gender),
        tmdb_url: Set(new.tmdb_url),
        profile_path: Set(new.profile_path),
    }
}

impl Store {
    pub async fn create_genre(&self, name: &str) -> StoreResult<genre::Model> {
        let model = genre::ActiveModel { id: NotSet, name: Set(name.trim().to_string()) };
        let genre = insert(&self.db, model).await?;
        tracing::info!(genre_id = genre.id, name = %genre.name, "created genre");
        Ok(genre)
    }

    pub async fn genres(&self) -> StoreResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn rename_genre(&self, id: i32, name: &str) -> StoreResult<genre::Model> {
        let model = genre::ActiveModel { id: Unchanged(id), name: Set(name.trim().to_string()) };
        update(&self.db, model, id).await
    }

    pub async fn tag_genre(&self, movie_id: i32, genre_id: i32) -> StoreResult<movie_genre::Model> {
        let model = movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre_id) };
        let tag = insert(&self.db, model).await?;
        tracing::debug!(movie_id, genre_id, "tagged genre");
        Ok(tag)
    }

    pub async fn untag_genre(&self, movie_id: i32, genre_id: i32) -> StoreResult<()> {
        let result = movie_genre::Entity::delete_by_id((movie_id, genre_id)).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found::<movie_genre::Entity>(format!("{movie_id}/{genre_id}")));
        }
        Ok(())
    }

    pub async fn genres_for(&self, movie_id: i32) -> StoreResult<Vec<genre::Model>> {
        Ok(genre::Entity::find()
            .inner_join(movie_genre::Entity)
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .order_by_asc(genre::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn create_cast(&self, new: NewCast) -> StoreResult<cast::Model> {
        let cast = insert(&self.db, cast_model(new)).await?;
        tracing::info!(cast_id = cast.id, "created cast member");
        Ok(cast)
    }

    pub async fn cast(&self, id: i32) -> StoreResult<cast::Model> {
        cast::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found::<cast::Entity>(id))
    }

    pub async fn update_cast(&self, id: i32, changes: NewCast) -> StoreResult<cast::Model> {
        let mut model = cast_model(changes);
        model.id = Unchanged(id);
        update(&self.db, model, id).await
    }

    pub async fn add_credit(
        &self,
        movie_id: i32,
        cast_id: i32,
        character: &str,
    ) -> StoreResult<movie_cast::Model> {
        let model = movie_cast::ActiveModel {
            movie_id: Set(movie_id),
            cast_id: Set(cast_id),
            character: Set(character.to_string()),
        };
        let credit = insert(&self.db, model).await?;
        tracing::debug!(movie_id, cast_id, character, "added credit");
        Ok(credit)
    }

    pub async fn remove_credit(
        &self,
        movie_id: i32,
        cast_id: i32,
        character: &str,
    ) -> StoreResult<()> {
        let result = movie_cast::Entity::delete_by_id((movie_id, cast_id, character.to_string()))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            let key = format!("{movie_id}/{cast_id}/{character}");
            return Err(not_found::<movie_cast::Entity>(key));
        }
        Ok(())
    }

    pub async fn credits_for(&self, movie_id: i32) -> StoreResult<Vec<Credit>> {
        let rows = movie_cast::Entity::find()
            .filter(movie_cast::Column::MovieId.eq(movie_id))
            .find_also_related(cast::Entity)
            .order_by_asc(movie_cast::Column::Character)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(credit, cast)| {
                cast.map(|cast| Credit { cast, character: credit.character })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StoreError,
        store::testing::{self, store},
    };

    #[tokio::test]
    async fn tagging_requires_both_parents() {
        let store = store().await;
        let movie = testing::movie(&store, "Avatar").await;
        let genre = testing::genre(&store, "Adventure").await;

        let missing_movie = store.tag_genre(movie.id + 1, genre.id).await.unwrap_err();
        assert!(matches!(missing_movie, StoreError::MissingReference(_)), "{missing_movie:?}");

        let missing_genre = store.tag_genre(movie.id, genre.id + 1).await.unwrap_err();
        assert!(matches!(missing_genre, StoreError::MissingReference(_)), "{missing_genre:?}");

        assert!(store.genres_for(movie.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_tag_is_a_conflict() {
        let store = store().await;
        let movie = testing::movie(&store, "Avatar").await;
        let genre = testing::genre(&store, "Adventure").await;

        store.tag_genre(movie.id, genre.id).await.unwrap();
        let err = store.tag_genre(movie.id, genre.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)), "{err:?}");

        store.untag_genre(movie.id, genre.id).await.unwrap();
        assert!(matches!(
            store.untag_genre(movie.id, genre.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn genres_are_listed_by_name() {
        let store = store().await;
        let movie = testing::movie(&store, "Titanic").await;
        for name in ["Romance", "Drama"] {
            let genre = testing::genre(&store, name).await;
            store.tag_genre(movie.id, genre.id).await.unwrap();
        }
        testing::genre(&store, "Horror").await;

        let tagged = store.genres_for(movie.id).await.unwrap();
        let names: Vec<_> = tagged.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Drama", "Romance"]);
        assert_eq!(store.genres().await.unwrap().len(), 3);

        let renamed = store.rename_genre(tagged[0].id, " Drama Film ").await.unwrap();
        assert_eq!(renamed.name, "Drama Film");
    }

    #[tokio::test]
    async fn same_person_can_play_several_characters() {
        let store = store().await;
        let movie = testing::movie(&store, "Dr. Strangelove").await;
        let sellers = store
            .create_cast(NewCast { name: Some("Peter Sellers".to_string()), ..Default::default() })
            .await
            .unwrap();

        let roles = ["Group Capt. Lionel Mandrake", "President Merkin Muffley", "Dr. Strangelove"];
        for character in roles {
            store.add_credit(movie.id, sellers.id, character).await.unwrap();
        }
        let dup = store.add_credit(movie.id, sellers.id, "Dr. Strangelove").await.unwrap_err();
        assert!(matches!(dup, StoreError::Conflict(_)), "{dup:?}");

        let credits = store.credits_for(movie.id).await.unwrap();
        let characters: Vec<_> = credits.iter().map(|c| c.character.as_str()).collect();
        assert_eq!(
            characters,
            ["Dr. Strangelove", "Group Capt. Lionel Mandrake", "President Merkin Muffley"]
        );

        store.remove_credit(movie.id, sellers.id, "Dr. Strangelove").await.unwrap();
        assert_eq!(store.credits_for(movie.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn credit_requires_a_character() {
        let store = store().await;
        let movie = testing::movie(&store, "Memento").await;
        let cast = store.create_cast(NewCast::default()).await.unwrap();
        let err = store.add_credit(movie.id, cast.id, &"x".repeat(451)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn cast_update_and_lookup() {
        let store = store().await;
        let cast = store
            .create_cast(NewCast { name: Some("Leo".to_string()), ..Default::default() })
            .await
            .unwrap();
        let updated = store
            .update_cast(
                cast.id,
                NewCast {
                    name: Some("Leonardo DiCaprio".to_string()),
                    gender: Some("Male".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.cast(cast.id).await.unwrap(), updated);
        assert!(matches!(store.cast(cast.id + 1).await, Err(StoreError::NotFound(_))));
    }
}
