use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string_len(Genre::Name, 64))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string_len(Movie::Title, 256))
                    .col(string_len_null(Movie::Overview, 4096))
                    .col(string_len_null(Movie::Tagline, 512))
                    .col(big_integer_null(Movie::Budget))
                    .col(big_integer_null(Movie::Revenue))
                    .col(string_len_null(Movie::ImdbUrl, 2048))
                    .col(string_len_null(Movie::TmdbUrl, 2048))
                    .col(string_len_null(Movie::PosterUrl, 2048))
                    .col(string_len_null(Movie::BackdropUrl, 2048))
                    .col(string_len_null(Movie::OriginalLanguage, 64))
                    .col(big_integer_null(Movie::ReleaseDate))
                    .col(integer_null(Movie::RunTime))
                    .col(big_integer(Movie::Price).default(990))
                    .col(
                        big_integer(Movie::CreatedDate)
                            .default(Expr::cust("(CAST(strftime('%s','now') AS INTEGER))")),
                    )
                    .col(big_integer_null(Movie::UpdatedDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Trailer::Table)
                    .if_not_exists()
                    .col(pk_auto(Trailer::Id))
                    .col(integer(Trailer::MovieId))
                    .col(string_len_null(Trailer::TrailerUrl, 2048))
                    .col(string_len_null(Trailer::Name, 2048))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trailer_movie")
                            .from(Trailer::Table, Trailer::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trailer_movie_id")
                    .table(Trailer::Table)
                    .col(Trailer::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenre::Table)
                    .if_not_exists()
                    .col(integer(MovieGenre::MovieId))
                    .col(integer(MovieGenre::GenreId))
                    .primary_key(Index::create().col(MovieGenre::MovieId).col(MovieGenre::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_movie")
                            .from(MovieGenre::Table, MovieGenre::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_genre")
                            .from(MovieGenre::Table, MovieGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre_genre_id")
                    .table(MovieGenre::Table)
                    .col(MovieGenre::GenreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieGenre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Trailer::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    Overview,
    Tagline,
    Budget,
    Revenue,
    ImdbUrl,
    TmdbUrl,
    PosterUrl,
    BackdropUrl,
    OriginalLanguage,
    ReleaseDate,
    RunTime,
    Price,
    CreatedDate,
    UpdatedDate,
}

#[derive(DeriveIden)]
enum Trailer {
    Table,
    Id,
    MovieId,
    TrailerUrl,
    Name,
}

#[derive(DeriveIden)]
enum MovieGenre {
    Table,
    MovieId,
    GenreId,
}
