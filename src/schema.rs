//! Column rules checked before anything is written.
//!
//! SQLite accepts any length in a `varchar(n)` column and any integer in a
//! `decimal(p, s)` one, so the widths the migrations declare are enforced
//! here. Every entity lists its rules once in [`Constrained::FIELDS`]; the
//! store runs [`validate`] on each `ActiveModel` before insert and update.

use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IdenStatic, Value};

use crate::error::{StoreError, StoreResult};

#[derive(Clone, Copy, Debug)]
pub struct Field<C> {
    pub column: C,
    pub required: bool,
    pub max_len: Option<usize>,
    pub range: Option<(i64, i64)>,
}

impl<C: Copy> Field<C> {
    pub const fn new(column: C) -> Self {
        Self { column, required: false, max_len: None, range: None }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Maximum length in characters.
    pub const fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    /// Inclusive bounds for integer columns.
    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }
}

pub trait Constrained: EntityTrait {
    const FIELDS: &'static [Field<Self::Column>];
}

/// On insert a required column must be present and non-null. On update only
/// the columns carried by the model are looked at.
pub fn validate<A>(model: &A, insert: bool) -> StoreResult<()>
where
    A: ActiveModelTrait,
    A::Entity: Constrained,
{
    for field in <A::Entity as Constrained>::FIELDS {
        let value = match model.get(field.column) {
            ActiveValue::Set(value) | ActiveValue::Unchanged(value) => value,
            ActiveValue::NotSet => {
                if insert && field.required {
                    return Err(violation::<A::Entity>(field, "is required".to_string()));
                }
                continue;
            }
        };

        if is_null(&value) {
            if field.required {
                return Err(violation::<A::Entity>(field, "is required".to_string()));
            }
            continue;
        }

        if let (true, Value::String(Some(s))) = (field.required, &value) {
            if s.trim().is_empty() {
                return Err(violation::<A::Entity>(field, "must not be blank".to_string()));
            }
        }

        if let (Some(max), Value::String(Some(s))) = (field.max_len, &value) {
            let len = s.chars().count();
            if len > max {
                return Err(violation::<A::Entity>(
                    field,
                    format!("is {len} characters, at most {max} allowed"),
                ));
            }
        }

        if let (Some((min, max)), Some(n)) = (field.range, as_i64(&value)) {
            if n < min || n > max {
                return Err(violation::<A::Entity>(
                    field,
                    format!("is {n}, must be between {min} and {max}"),
                ));
            }
        }
    }
    Ok(())
}

fn violation<E: Constrained>(field: &Field<E::Column>, reason: String) -> StoreError {
    StoreError::Validation {
        entity: E::default().table_name().to_string(),
        column: field.column.as_str().to_string(),
        reason,
    }
}

fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::String(None)
            | Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
    )
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::TinyInt(Some(n)) => Some(i64::from(*n)),
        Value::SmallInt(Some(n)) => Some(i64::from(*n)),
        Value::Int(Some(n)) => Some(i64::from(*n)),
        Value::BigInt(Some(n)) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sea_orm::{ActiveValue::NotSet, Set};

    use super::*;
    use crate::entities::{movie, purchase, review, role};

    fn movie_titled(title: &str) -> movie::ActiveModel {
        movie::ActiveModel { title: Set(title.to_string()), ..Default::default() }
    }

    fn full_purchase() -> purchase::ActiveModel {
        purchase::ActiveModel {
            id: NotSet,
            user_id: Set(1),
            purchase_number: Set("0b7f4c5e-7a43-4f0e-9d3c-3d2f5b8a9c10".to_string()),
            total_price: Set(990),
            purchase_date_time: Set(1_594_857_600),
            movie_id: Set(1),
        }
    }

    fn rejected_column<T: std::fmt::Debug>(result: StoreResult<T>) -> String {
        match result {
            Err(StoreError::Validation { column, .. }) => column,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn title_at_limit_is_accepted() {
        assert!(validate(&movie_titled(&"x".repeat(256)), true).is_ok());
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let err = validate(&movie_titled(&"x".repeat(257)), true).unwrap_err();
        assert!(err.to_string().contains("movie.title"), "{err}");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_title_is_rejected(#[case] title: &str) {
        assert_eq!(rejected_column(validate(&movie_titled(title), true)), "title");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(validate(&movie_titled(&"é".repeat(256)), true).is_ok());
    }

    #[test]
    fn missing_title_is_rejected_on_insert_only() {
        let model = <movie::ActiveModel as Default>::default();
        assert_eq!(rejected_column(validate(&model, true)), "title");
        assert!(validate(&model, false).is_ok());
    }

    #[test]
    fn price_defaults_are_left_to_the_store() {
        let model = movie_titled("Inception");
        assert!(matches!(model.price, NotSet));
        assert!(validate(&model, true).is_ok());
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(99_999, true)]
    #[case(100_000, false)]
    fn price_must_fit_decimal_5_2(#[case] cents: i64, #[case] accepted: bool) {
        let mut model = movie_titled("Avatar");
        model.price = Set(cents);
        assert_eq!(validate(&model, true).is_ok(), accepted);
    }

    #[rstest]
    #[case::user_id(purchase::Column::UserId)]
    #[case::purchase_number(purchase::Column::PurchaseNumber)]
    #[case::total_price(purchase::Column::TotalPrice)]
    #[case::purchase_date_time(purchase::Column::PurchaseDateTime)]
    fn purchase_without_required_column_is_rejected(#[case] column: purchase::Column) {
        assert!(validate(&full_purchase(), true).is_ok());

        let mut model = full_purchase();
        model.not_set(column);
        assert_eq!(rejected_column(validate(&model, true)), column.as_str());
    }

    /// A nullable column that the rules still require.
    mod note {
        use sea_orm::entity::prelude::*;

        use crate::schema::{Constrained, Field};

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "note")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub body: Option<String>,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}

        impl Constrained for Entity {
            const FIELDS: &'static [Field<Column>] = &[Field::new(Column::Body).required()];
        }
    }

    #[test]
    fn null_in_required_column_is_rejected() {
        let model = note::ActiveModel { id: NotSet, body: Set(None) };
        assert_eq!(rejected_column(validate(&model, true)), "body");
        assert_eq!(rejected_column(validate(&model, false)), "body");

        let filled = note::ActiveModel { id: NotSet, body: Set(Some("kept".to_string())) };
        assert!(validate(&filled, true).is_ok());
    }

    #[test]
    fn rating_above_decimal_3_2_is_rejected() {
        let model = review::ActiveModel {
            movie_id: Set(1),
            user_id: Set(1),
            rating: Set(1_000),
            review_text: Set(None),
        };
        assert_eq!(rejected_column(validate(&model, true)), "rating");
    }

    #[test]
    fn role_name_is_limited_to_twenty_characters() {
        let model = role::ActiveModel { id: NotSet, name: Set("x".repeat(21)) };
        assert_eq!(rejected_column(validate(&model, true)), "name");
    }
}
