use sea_orm::entity::prelude::*;

use crate::schema::{Constrained, Field};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    /// Cents.
    pub budget: Option<i64>,
    /// Cents.
    pub revenue: Option<i64>,
    pub imdb_url: Option<String>,
    pub tmdb_url: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<i64>,
    pub run_time: Option<i32>,
    /// Cents. The store fills in 990 when the insert leaves it out.
    pub price: i64,
    pub created_date: i64,
    pub updated_date: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trailer::Entity")]
    Trailer,
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,
    #[sea_orm(has_many = "super::movie_cast::Entity")]
    MovieCast,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorite,
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchase,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::trailer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trailer.def()
    }
}

impl Related<super::movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenre.def()
    }
}

impl Related<super::movie_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieCast.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorite.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genre::Relation::Movie.def().rev())
    }
}

impl Related<super::cast::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_cast::Relation::Cast.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_cast::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Upper bound of a `decimal(5, 2)` amount, in cents.
pub const MAX_PRICE: i64 = 99_999;

impl Constrained for Entity {
    const FIELDS: &'static [Field<Column>] = &[
        Field::new(Column::Title).required().max_len(256),
        Field::new(Column::Overview).max_len(4096),
        Field::new(Column::Tagline).max_len(512),
        Field::new(Column::Budget).range(0, i64::MAX),
        Field::new(Column::Revenue).range(0, i64::MAX),
        Field::new(Column::ImdbUrl).max_len(2048),
        Field::new(Column::TmdbUrl).max_len(2048),
        Field::new(Column::PosterUrl).max_len(2048),
        Field::new(Column::BackdropUrl).max_len(2048),
        Field::new(Column::OriginalLanguage).max_len(64),
        Field::new(Column::RunTime).range(0, i64::MAX),
        Field::new(Column::Price).range(0, MAX_PRICE),
    ];
}
