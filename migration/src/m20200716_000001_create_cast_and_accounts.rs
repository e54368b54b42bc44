use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cast::Table)
                    .if_not_exists()
                    .col(pk_auto(Cast::Id))
                    .col(string_len_null(Cast::Name, 128))
                    .col(string_len_null(Cast::Gender, 2048))
                    .col(string_len_null(Cast::TmdbUrl, 4096))
                    .col(string_len_null(Cast::ProfilePath, 4096))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Role::Table)
                    .if_not_exists()
                    .col(pk_auto(Role::Id))
                    .col(string_len(Role::Name, 20))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len_null(User::FirstName, 128))
                    .col(string_len_null(User::LastName, 128))
                    .col(big_integer_null(User::DateOfBirth))
                    .col(string_len_null(User::Email, 256))
                    .col(string_len_null(User::HashedPassword, 1024))
                    .col(string_len_null(User::Salt, 1024))
                    .col(string_len_null(User::PhoneNumber, 16))
                    .col(boolean_null(User::TwoFactorEnabled))
                    .col(big_integer_null(User::LockoutEndDate))
                    .col(
                        big_integer_null(User::LastLoginDateTime)
                            .default(Expr::cust("(CAST(strftime('%s','now') AS INTEGER))")),
                    )
                    .col(boolean_null(User::IsLocked))
                    .col(integer(User::AccessFailedCount).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_email_unique")
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieCast::Table)
                    .if_not_exists()
                    .col(integer(MovieCast::MovieId))
                    .col(integer(MovieCast::CastId))
                    .col(string_len(MovieCast::Character, 450))
                    .primary_key(
                        Index::create()
                            .col(MovieCast::MovieId)
                            .col(MovieCast::CastId)
                            .col(MovieCast::Character),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_cast_movie")
                            .from(MovieCast::Table, MovieCast::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_cast_cast")
                            .from(MovieCast::Table, MovieCast::CastId)
                            .to(Cast::Table, Cast::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(pk_auto(Favorite::Id))
                    .col(integer(Favorite::MovieId))
                    .col(integer(Favorite::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_movie")
                            .from(Favorite::Table, Favorite::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_movie_user")
                    .table(Favorite::Table)
                    .col(Favorite::MovieId)
                    .col(Favorite::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Purchase::Table)
                    .if_not_exists()
                    .col(pk_auto(Purchase::Id))
                    .col(integer(Purchase::UserId))
                    .col(string_len(Purchase::PurchaseNumber, 36))
                    .col(big_integer(Purchase::TotalPrice))
                    .col(big_integer(Purchase::PurchaseDateTime))
                    .col(integer(Purchase::MovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_movie")
                            .from(Purchase::Table, Purchase::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_user")
                            .from(Purchase::Table, Purchase::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_number_unique")
                    .table(Purchase::Table)
                    .col(Purchase::PurchaseNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_user_id")
                    .table(Purchase::Table)
                    .col(Purchase::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(integer(Review::MovieId))
                    .col(integer(Review::UserId))
                    .col(integer(Review::Rating))
                    .col(text_null(Review::ReviewText))
                    .primary_key(Index::create().col(Review::MovieId).col(Review::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_movie")
                            .from(Review::Table, Review::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(integer(UserRole::UserId))
                    .col(integer(UserRole::RoleId))
                    .primary_key(Index::create().col(UserRole::UserId).col(UserRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_user")
                            .from(UserRole::Table, UserRole::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_role")
                            .from(UserRole::Table, UserRole::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_id")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_cast_cast_id")
                    .table(MovieCast::Table)
                    .col(MovieCast::CastId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_movie_id")
                    .table(Purchase::Table)
                    .col(Purchase::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_user_id")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_role_id")
                    .table(UserRole::Table)
                    .col(UserRole::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserRole::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Purchase::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Favorite::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieCast::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Role::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Cast::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Cast {
    Table,
    Id,
    Name,
    Gender,
    TmdbUrl,
    ProfilePath,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    HashedPassword,
    Salt,
    PhoneNumber,
    TwoFactorEnabled,
    LockoutEndDate,
    LastLoginDateTime,
    IsLocked,
    AccessFailedCount,
}

#[derive(DeriveIden)]
enum MovieCast {
    Table,
    MovieId,
    CastId,
    Character,
}

#[derive(DeriveIden)]
enum Favorite {
    Table,
    Id,
    MovieId,
    UserId,
}

#[derive(DeriveIden)]
enum Purchase {
    Table,
    Id,
    UserId,
    PurchaseNumber,
    TotalPrice,
    PurchaseDateTime,
    MovieId,
}

#[derive(DeriveIden)]
enum Review {
    Table,
    MovieId,
    UserId,
    Rating,
    ReviewText,
}

#[derive(DeriveIden)]
enum UserRole {
    Table,
    UserId,
    RoleId,
}
