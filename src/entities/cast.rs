use sea_orm::entity::prelude::*;

use crate::schema::{Constrained, Field};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cast")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub tmdb_url: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_cast::Entity")]
    MovieCast,
}

impl Related<super::movie_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieCast.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_cast::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_cast::Relation::Cast.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Constrained for Entity {
    const FIELDS: &'static [Field<Column>] = &[
        Field::new(Column::Name).max_len(128),
        Field::new(Column::Gender).max_len(2048),
        Field::new(Column::TmdbUrl).max_len(4096),
        Field::new(Column::ProfilePath).max_len(4096),
    ];
}
