use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::{
    catalog::{self, scale},
    error::AppError,
    nutrients::Nutrients,
    summary,
};

use super::dto::MealClass;
use super::repo::{self, ContributionRow, EventRow};

pub struct AddOutcome {
    pub event_id: Uuid,
    pub day: Date,
    pub contribution: Nutrients,
}

/// Log a consumption event and fold its contribution into the day's totals,
/// as one transaction. Nothing is written unless both halves succeed.
pub async fn add_consumption(
    db: &PgPool,
    user_id: Uuid,
    food_id: Uuid,
    quantity: i64,
    unit: String,
    meal_class: MealClass,
    date: Option<Date>,
) -> Result<AddOutcome, AppError> {
    if quantity <= 0 {
        return Err(AppError::invalid_quantity(quantity));
    }
    let profile = catalog::repo::get(db, food_id)
        .await?
        .ok_or(AppError::NotFound("food"))?;
    let contribution = scale::contribution(&profile, quantity)?;

    let (day, consumed_at) = match date {
        Some(d) => (d, d.midnight().assume_utc()),
        None => {
            let now = OffsetDateTime::now_utc();
            (now.date(), now)
        }
    };
    let event = EventRow {
        id: Uuid::new_v4(),
        user_id,
        food_id,
        quantity,
        unit,
        meal_class: meal_class.as_str().to_string(),
        consumed_at,
        day,
    };

    let mut tx = db.begin().await?;
    lock_day(&mut tx, user_id, day).await?;
    repo::insert_tx(&mut tx, &event)
        .await
        .map_err(AppError::LedgerStorage)?;
    summary::repo::incremental_add(&mut tx, user_id, day, &contribution)
        .await
        .map_err(AppError::AggregateStorage)?;
    tx.commit().await?;

    info!(user_id = %user_id, event_id = %event.id, food = %profile.name, %day, "consumption logged");
    Ok(AddOutcome {
        event_id: event.id,
        day,
        contribution,
    })
}

/// Delete an event and rebuild its day's totals from the remaining events,
/// as one transaction.
///
/// Recalculation rather than subtraction: contributions are truncated per
/// field, so subtracting one back is not guaranteed to invert the add, and
/// repeated add/remove cycles would drift.
pub async fn remove_consumption(
    db: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> Result<Date, AppError> {
    let mut tx = db.begin().await?;
    let event = repo::get_for_user_tx(&mut tx, event_id, user_id)
        .await
        .map_err(AppError::LedgerStorage)?
        .ok_or(AppError::NotFound("event"))?;
    lock_day(&mut tx, user_id, event.day).await?;
    if !repo::delete_tx(&mut tx, event_id)
        .await
        .map_err(AppError::LedgerStorage)?
    {
        return Err(AppError::NotFound("event"));
    }
    recalculate(&mut tx, user_id, event.day).await?;
    tx.commit().await?;

    info!(user_id = %user_id, %event_id, day = %event.day, "consumption removed");
    Ok(event.day)
}

/// Wipe a day: its events and its aggregate row go together, atomically.
pub async fn reset_day(db: &PgPool, user_id: Uuid, day: Date) -> Result<(), AppError> {
    let mut tx = db.begin().await?;
    lock_day(&mut tx, user_id, day).await?;
    let removed = repo::delete_for_day_tx(&mut tx, user_id, day)
        .await
        .map_err(AppError::LedgerStorage)?;
    summary::repo::reset_date(&mut tx, user_id, day)
        .await
        .map_err(AppError::AggregateStorage)?;
    tx.commit().await?;

    info!(user_id = %user_id, %day, events_removed = removed, "day reset");
    Ok(())
}

/// Manual water intake; no ledger event backs it. Bounds from the intake
/// dialog: a single pour is between 1 and 5000 ml.
pub async fn add_water(
    db: &PgPool,
    user_id: Uuid,
    day: Date,
    amount_ml: i64,
) -> Result<(), AppError> {
    if amount_ml <= 0 || amount_ml > 5000 {
        return Err(AppError::invalid_quantity(amount_ml));
    }
    summary::repo::add_manual_water(db, user_id, day, amount_ml)
        .await
        .map_err(AppError::AggregateStorage)?;
    info!(user_id = %user_id, %day, amount_ml, "water logged");
    Ok(())
}

/// Recompute the day's ledger-derived totals from scratch inside `tx`.
async fn recalculate(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
) -> Result<Nutrients, AppError> {
    let entries = repo::contributions_for_day_tx(tx, user_id, day)
        .await
        .map_err(AppError::AggregateStorage)?;
    let totals = sum_contributions(&entries)?;
    summary::repo::replace_derived(tx, user_id, day, &totals)
        .await
        .map_err(AppError::AggregateStorage)?;
    Ok(totals)
}

/// Field-wise sum of the contributions of every entry, with the same
/// truncation as the append path.
pub fn sum_contributions(entries: &[ContributionRow]) -> Result<Nutrients, AppError> {
    let mut totals = Nutrients::default();
    for entry in entries {
        totals += &scale::contribution(&entry.profile, entry.quantity)?;
    }
    Ok(totals)
}

/// Serialize writers on one `(user, day)` pair for the transaction's
/// lifetime. Readers are unaffected.
async fn lock_day(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
) -> Result<(), AppError> {
    let b = user_id.as_bytes();
    let user_key = i32::from_be_bytes([b[0], b[1], b[2], b[3]]);
    let day_key = day.to_julian_day();
    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(user_key)
        .bind(day_key)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::scale::tests::profile;

    fn entry(quantity: i64) -> ContributionRow {
        ContributionRow {
            quantity,
            profile: profile(100),
        }
    }

    #[test]
    fn append_then_remove_matches_sum_over_remaining_events() {
        // Scenario: base 100, calories 130, protein 2.7.
        let p = profile(100);
        let first = scale::contribution(&p, 150).unwrap();
        assert_eq!((first.calories, first.protein_g), (195, 4));

        let mut totals = Nutrients::default();
        totals += &first;
        assert_eq!((totals.calories, totals.protein_g), (195, 4));

        let second = scale::contribution(&p, 50).unwrap();
        totals += &second;
        assert_eq!((totals.calories, totals.protein_g), (260, 5));

        // Removing the first event: resum over what's left, don't subtract.
        let recalced = sum_contributions(&[entry(50)]).unwrap();
        assert_eq!((recalced.calories, recalced.protein_g), (65, 1));
    }

    #[test]
    fn recalculation_is_idempotent() {
        let entries = vec![entry(150), entry(50), entry(33)];
        let once = sum_contributions(&entries).unwrap();
        let twice = sum_contributions(&entries).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn totals_equal_field_wise_sum_of_present_contributions() {
        let entries = vec![entry(150), entry(50)];
        let summed = sum_contributions(&entries).unwrap();
        let mut expected = Nutrients::default();
        for e in &entries {
            expected += &scale::contribution(&e.profile, e.quantity).unwrap();
        }
        assert_eq!(summed, expected);
    }

    #[test]
    fn empty_day_recalculates_to_zero() {
        let summed = sum_contributions(&[]).unwrap();
        assert_eq!(summed, Nutrients::default());
    }

    #[test]
    fn a_bad_profile_fails_the_resum_instead_of_dividing() {
        let bad = ContributionRow {
            quantity: 100,
            profile: profile(0),
        };
        assert!(matches!(
            sum_contributions(&[bad]),
            Err(AppError::InvalidCatalogEntry(_))
        ));
    }
}
