//! Per-entity create/read/update/delete over the relational store.
//!
//! Every write goes through [`insert`] or [`update`], which run the
//! column rules from [`crate::schema`] first. Multi-statement operations
//! (cascading deletes, purchases, lockout bookkeeping) run inside one
//! transaction; all other coordination is left to SQLite.

mod accounts;
mod activity;
mod cascade;
mod catalog;
mod movies;

use std::fmt::Display;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel,
};

use crate::{
    error::{StoreError, StoreResult},
    schema::{self, Constrained},
};

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

pub(crate) async fn insert<A, C>(db: &C, model: A) -> StoreResult<ModelOf<A>>
where
    C: ConnectionTrait,
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    A::Entity: Constrained,
    ModelOf<A>: IntoActiveModel<A>,
{
    schema::validate(&model, true)?;
    Ok(model.insert(db).await?)
}

/// `key` names the row in the `NotFound` error when nothing matched.
pub(crate) async fn update<A, C>(db: &C, model: A, key: impl Display) -> StoreResult<ModelOf<A>>
where
    C: ConnectionTrait,
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    A::Entity: Constrained,
    ModelOf<A>: IntoActiveModel<A>,
{
    schema::validate(&model, false)?;
    match model.update(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => Err(not_found::<A::Entity>(key)),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn not_found<E: EntityTrait>(key: impl Display) -> StoreError {
    StoreError::NotFound(format!("{} {key}", E::default().table_name()))
}

pub(crate) fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Store;
    use crate::{
        entities::{genre, movie, user},
        models::{NewMovie, NewUser},
    };

    pub async fn store() -> Store {
        let db = crate::db::connect_and_migrate("sqlite::memory:", 1).await.unwrap();
        Store::new(db)
    }

    pub async fn movie(store: &Store, title: &str) -> movie::Model {
        store
            .create_movie(NewMovie { title: title.to_string(), ..Default::default() })
            .await
            .unwrap()
    }

    pub async fn user(store: &Store, email: &str) -> user::Model {
        store
            .create_user(NewUser { email: Some(email.to_string()), ..Default::default() })
            .await
            .unwrap()
    }

    pub async fn genre(store: &Store, name: &str) -> genre::Model {
        store.create_genre(name).await.unwrap()
    }
}
