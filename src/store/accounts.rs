use sea_orm::{
    ActiveValue::{self, NotSet, Set, Unchanged},
    ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

use super::{Store, insert, not_found, now_sec, update};
use crate::{
    entities::{role, user, user_role},
    error::StoreResult,
    models::NewUser,
};

fn user_model(new: NewUser, id: ActiveValue<i32>) -> user::ActiveModel {
    user::ActiveModel {
        id,
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        date_of_birth: Set(new.date_of_birth),
        email: Set(new.email),
        hashed_password: Set(new.hashed_password),
        salt: Set(new.salt),
        phone_number: Set(new.phone_number),
        two_factor_enabled: Set(new.two_factor_enabled),
        lockout_end_date: NotSet,
        last_login_date_time: NotSet,
        is_locked: NotSet,
        access_failed_count: NotSet,
    }
}

impl Store {
    pub async fn create_user(&self, new: NewUser) -> StoreResult<user::Model> {
        let mut model = user_model(new, NotSet);
        model.is_locked = Set(Some(false));
        model.access_failed_count = Set(0);
        let user = insert(&self.db, model).await?;
        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    pub async fn user(&self, id: i32) -> StoreResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found::<user::Entity>(id))
    }

    pub async fn user_by_email(&self, email: &str) -> StoreResult<Option<user::Model>> {
        Ok(user::Entity::find().filter(user::Column::Email.eq(email)).one(&self.db).await?)
    }

    pub async fn users(&self) -> StoreResult<Vec<user::Model>> {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    /// Replaces the profile fields; lockout state is left alone.
    pub async fn update_user(&self, id: i32, changes: NewUser) -> StoreResult<user::Model> {
        update(&self.db, user_model(changes, Unchanged(id)), id).await
    }

    /// Counts a failed sign-in. Reaching `max_failures` locks the account
    /// for `lockout_secs`.
    pub async fn record_login_failure(
        &self,
        id: i32,
        max_failures: i32,
        lockout_secs: i64,
    ) -> StoreResult<user::Model> {
        let txn = self.db.begin().await?;
        let current = user::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found::<user::Entity>(id))?;

        let failures = current.access_failed_count.saturating_add(1);
        let mut model = current.into_active_model();
        model.access_failed_count = Set(failures);
        if failures >= max_failures {
            let until = now_sec().saturating_add(lockout_secs);
            model.is_locked = Set(Some(true));
            model.lockout_end_date = Set(Some(until));
            tracing::warn!(user_id = id, failures, until, "user locked out");
        }

        let user = update(&txn, model, id).await?;
        txn.commit().await?;
        Ok(user)
    }

    pub async fn record_login_success(&self, id: i32) -> StoreResult<user::Model> {
        let model = user::ActiveModel {
            id: Unchanged(id),
            access_failed_count: Set(0),
            is_locked: Set(Some(false)),
            lockout_end_date: Set(None),
            last_login_date_time: Set(Some(now_sec())),
            ..Default::default()
        };
        update(&self.db, model, id).await
    }

    pub async fn create_role(&self, name: &str) -> StoreResult<role::Model> {
        let model = role::ActiveModel { id: NotSet, name: Set(name.trim().to_string()) };
        let role = insert(&self.db, model).await?;
        tracing::info!(role_id = role.id, name = %role.name, "created role");
        Ok(role)
    }

    pub async fn roles(&self) -> StoreResult<Vec<role::Model>> {
        Ok(role::Entity::find().order_by_asc(role::Column::Name).all(&self.db).await?)
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> StoreResult<user_role::Model> {
        let model = user_role::ActiveModel { user_id: Set(user_id), role_id: Set(role_id) };
        let assignment = insert(&self.db, model).await?;
        tracing::info!(user_id, role_id, "assigned role");
        Ok(assignment)
    }

    pub async fn revoke_role(&self, user_id: i32, role_id: i32) -> StoreResult<()> {
        let result = user_role::Entity::delete_by_id((user_id, role_id)).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found::<user_role::Entity>(format!("{user_id}/{role_id}")));
        }
        tracing::info!(user_id, role_id, "revoked role");
        Ok(())
    }

    pub async fn roles_for(&self, user_id: i32) -> StoreResult<Vec<role::Model>> {
        Ok(role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?)
    }
}
