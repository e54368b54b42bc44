use sea_orm::entity::prelude::*;

use crate::schema::{Constrained, Field};

/// One credit: the same person may play several characters in a movie.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie_cast")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub cast_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub character: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
    #[sea_orm(
        belongs_to = "super::cast::Entity",
        from = "Column::CastId",
        to = "super::cast::Column::Id",
        on_delete = "Cascade"
    )]
    Cast,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Constrained for Entity {
    const FIELDS: &'static [Field<Column>] = &[
        Field::new(Column::MovieId).required(),
        Field::new(Column::CastId).required(),
        Field::new(Column::Character).required().max_len(450),
    ];
}
