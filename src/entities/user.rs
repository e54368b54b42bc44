use sea_orm::entity::prelude::*;

use crate::schema::{Constrained, Field};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<i64>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub salt: Option<String>,
    pub phone_number: Option<String>,
    pub two_factor_enabled: Option<bool>,
    pub lockout_end_date: Option<i64>,
    pub last_login_date_time: Option<i64>,
    pub is_locked: Option<bool>,
    pub access_failed_count: i32,
}

impl Model {
    /// A lock without an end date holds until an operator clears it.
    pub fn is_locked_out(&self, now: i64) -> bool {
        if self.is_locked != Some(true) {
            return false;
        }
        self.lockout_end_date.is_none_or(|end| end > now)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorite,
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchase,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
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

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Constrained for Entity {
    const FIELDS: &'static [Field<Column>] = &[
        Field::new(Column::FirstName).max_len(128),
        Field::new(Column::LastName).max_len(128),
        Field::new(Column::Email).max_len(256),
        Field::new(Column::HashedPassword).max_len(1024),
        Field::new(Column::Salt).max_len(1024),
        Field::new(Column::PhoneNumber).max_len(16),
        Field::new(Column::AccessFailedCount).required().range(0, i32::MAX as i64),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_locked: Option<bool>, lockout_end_date: Option<i64>) -> Model {
        Model {
            id: 1,
            first_name: None,
            last_name: None,
            date_of_birth: None,
            email: None,
            hashed_password: None,
            salt: None,
            phone_number: None,
            two_factor_enabled: None,
            lockout_end_date,
            last_login_date_time: None,
            is_locked,
            access_failed_count: 0,
        }
    }

    #[test]
    fn lockout_expires_at_end_date() {
        let locked = user(Some(true), Some(1_000));
        assert!(locked.is_locked_out(999));
        assert!(!locked.is_locked_out(1_000));
    }

    #[test]
    fn open_ended_lock_and_unlocked_user() {
        assert!(user(Some(true), None).is_locked_out(i64::MAX));
        assert!(!user(Some(false), Some(5_000)).is_locked_out(0));
        assert!(!user(None, None).is_locked_out(0));
    }
}
