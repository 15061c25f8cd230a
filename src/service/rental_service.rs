use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use sqlx::{types::Json, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::{propertydb::PropertyExt, rentaldb::RentalExt, DBClient},
    dtos::rentaldtos::CreateRentalDto,
    models::{
        paymentmodel::{Payment, PaymentMethod, PaymentStatus},
        propertymodel::Property,
        rentalmodel::{
            InstallmentStatus, MonthlyPayment, Rental, RentalPaymentStatus, RentalStatus,
        },
        usermodel::User,
    },
    service::error::ServiceError,
    utils::reference::generate_payment_reference,
};

/// Longest rental term a schedule is generated for.
pub const MAX_TERM_MONTHS: u32 = 120;

/// Monthly due dates from `start_date` up to (excluding) `end_date`. Entry `i`
/// is always `start_date + i months`, never the previous entry plus one month.
pub fn generate_payment_schedule(
    start_date: NaiveDate,
    end_date: NaiveDate,
    monthly_rent: i64,
) -> Result<Vec<MonthlyPayment>, ServiceError> {
    if end_date <= start_date {
        return Err(ServiceError::Validation(
            "End date must be after the start date".to_string(),
        ));
    }

    let mut schedule = Vec::new();
    for offset in 0..=MAX_TERM_MONTHS {
        let due_date = start_date
            .checked_add_months(Months::new(offset))
            .ok_or_else(|| ServiceError::Validation("Rental dates are out of range".to_string()))?;

        if due_date >= end_date {
            return Ok(schedule);
        }

        schedule.push(MonthlyPayment {
            due_date,
            amount: monthly_rent,
            status: InstallmentStatus::Unpaid,
            paid_at: None,
            payment_id: None,
        });
    }

    Err(ServiceError::Validation(format!(
        "Rental term cannot exceed {} months",
        MAX_TERM_MONTHS
    )))
}

pub fn derive_payment_status(schedule: &[MonthlyPayment]) -> RentalPaymentStatus {
    let paid = schedule
        .iter()
        .filter(|entry| entry.status == InstallmentStatus::Paid)
        .count();

    if paid == 0 {
        RentalPaymentStatus::Unpaid
    } else if paid == schedule.len() {
        RentalPaymentStatus::Paid
    } else {
        RentalPaymentStatus::Partial
    }
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(month: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation("Month must be formatted as YYYY-MM".to_string()))
}

/// Index of the unpaid schedule entry due in the same calendar month as `period`.
pub fn find_installment(
    schedule: &[MonthlyPayment],
    period: NaiveDate,
) -> Result<usize, ServiceError> {
    let index = schedule
        .iter()
        .position(|entry| {
            entry.due_date.year() == period.year() && entry.due_date.month() == period.month()
        })
        .ok_or_else(|| ServiceError::InstallmentNotFound(period.format("%Y-%m").to_string()))?;

    if schedule[index].status == InstallmentStatus::Paid {
        return Err(ServiceError::InstallmentAlreadyPaid(schedule[index].due_date));
    }

    Ok(index)
}

pub fn ensure_status(rental: &Rental, expected: RentalStatus) -> Result<(), ServiceError> {
    if rental.status != expected {
        return Err(ServiceError::InvalidRentalStatus(rental.id, rental.status));
    }
    Ok(())
}

pub fn ensure_cancellable(rental: &Rental) -> Result<(), ServiceError> {
    if rental.payment_status == RentalPaymentStatus::Paid {
        return Err(ServiceError::RentalAlreadyPaid(rental.id));
    }

    match rental.status {
        RentalStatus::Pending | RentalStatus::Active => Ok(()),
        status => Err(ServiceError::InvalidRentalStatus(rental.id, status)),
    }
}

pub fn ensure_payable(rental: &Rental) -> Result<(), ServiceError> {
    match rental.status {
        RentalStatus::Pending | RentalStatus::Active => Ok(()),
        status => Err(ServiceError::InvalidRentalStatus(rental.id, status)),
    }
}

/// Tenant, property owner, or an admin.
pub fn can_view_rental(rental: &Rental, property: &Property, user: &User) -> bool {
    rental.tenant_id == user.id || property.is_owned_by(user.id) || user.is_admin()
}

/// A property holds at most one active rental.
pub fn ensure_can_activate(property: &Property, other_active_rental: bool) -> Result<(), ServiceError> {
    if property.is_deleted || other_active_rental {
        return Err(ServiceError::PropertyUnavailable(property.id));
    }
    Ok(())
}

/// Whether closing `released` puts the property back on the market. Only a
/// rental that took the listing off (approved or paid into) gives it back, and
/// never while another tenant's rental is active.
pub fn should_relist(released: &Rental, property: &Property, other_active_rental: bool) -> bool {
    let held_listing = released.status == RentalStatus::Active
        || released.payment_status != RentalPaymentStatus::Unpaid;

    held_listing && !property.is_deleted && !other_active_rental
}

/// Rent payments only move from completed to failed or refunded.
pub fn ensure_reversible(payment: &Payment, status: PaymentStatus) -> Result<(), ServiceError> {
    match status {
        PaymentStatus::Failed | PaymentStatus::Refunded => {}
        _ => {
            return Err(ServiceError::Validation(
                "Rent payments can only be marked failed or refunded".to_string(),
            ))
        }
    }

    if payment.status != PaymentStatus::Completed {
        return Err(ServiceError::Validation(
            "This rent payment has already been reversed".to_string(),
        ));
    }
    Ok(())
}

/// Sets the entry settled by `payment_id` back to unpaid.
pub fn reopen_installment(
    schedule: &mut [MonthlyPayment],
    payment_id: Uuid,
) -> Result<(), ServiceError> {
    let entry = schedule
        .iter_mut()
        .find(|entry| entry.payment_id == Some(payment_id))
        .ok_or_else(|| ServiceError::Validation("Payment settles no schedule entry".to_string()))?;

    entry.status = InstallmentStatus::Unpaid;
    entry.paid_at = None;
    entry.payment_id = None;
    Ok(())
}

/// Locks the rental and then its property, the same order `pay_for_month` uses.
async fn lock_rental_and_property(
    tx: &mut Transaction<'_, Postgres>,
    rental_id: Uuid,
) -> Result<(Rental, Property), ServiceError> {
    let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1 FOR UPDATE")
        .bind(rental_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(ServiceError::RentalNotFound(rental_id))?;

    let property =
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1 FOR UPDATE")
            .bind(rental.property_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(ServiceError::PropertyNotFound(rental.property_id))?;

    Ok((rental, property))
}

async fn has_other_active_rental(
    tx: &mut Transaction<'_, Postgres>,
    rental: &Rental,
) -> Result<bool, ServiceError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM rentals
            WHERE property_id = $1 AND id <> $2 AND status = 'active'
        )
        "#,
    )
    .bind(rental.property_id)
    .bind(rental.id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(exists)
}

async fn set_rental_status(
    tx: &mut Transaction<'_, Postgres>,
    rental_id: Uuid,
    status: RentalStatus,
) -> Result<Rental, ServiceError> {
    let rental = sqlx::query_as::<_, Rental>(
        "UPDATE rentals SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(rental_id)
    .bind(status)
    .fetch_one(&mut **tx)
    .await?;

    Ok(rental)
}

async fn set_availability(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
    is_available: bool,
) -> Result<(), ServiceError> {
    sqlx::query("UPDATE properties SET is_available = $2, updated_at = NOW() WHERE id = $1")
        .bind(property_id)
        .bind(is_available)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

#[derive(Debug, Clone)]
pub struct RentalService {
    db_client: Arc<DBClient>,
}

impl RentalService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Returns the requester's open rental for the property when one exists,
    /// otherwise creates a pending one. The flag is `true` when a row was created.
    pub async fn create_or_get_rental(
        &self,
        tenant: &User,
        body: &CreateRentalDto,
    ) -> Result<(Rental, bool), ServiceError> {
        let property = self
            .db_client
            .get_property_by_id(body.property_id)
            .await?
            .filter(|property| !property.is_deleted)
            .ok_or(ServiceError::PropertyNotFound(body.property_id))?;

        if property.is_owned_by(tenant.id) {
            return Err(ServiceError::Validation(
                "You cannot rent your own property".to_string(),
            ));
        }

        if let Some(existing) = self
            .db_client
            .find_open_rental(tenant.id, property.id)
            .await?
        {
            tracing::debug!(rental_id = %existing.id, "returning existing rental");
            return Ok((existing, false));
        }

        if !property.is_available {
            return Err(ServiceError::PropertyUnavailable(property.id));
        }

        let schedule =
            generate_payment_schedule(body.start_date, body.end_date, property.monthly_rent)?;

        let rental = self
            .db_client
            .create_rental(
                tenant.id,
                property.id,
                body.start_date,
                body.end_date,
                property.monthly_rent,
                schedule,
            )
            .await?;

        tracing::info!(
            rental_id = %rental.id,
            property_id = %property.id,
            tenant_id = %tenant.id,
            "rental requested"
        );

        Ok((rental, true))
    }

    /// Loads a rental together with its property.
    pub async fn get_rental_with_property(
        &self,
        rental_id: Uuid,
    ) -> Result<(Rental, Property), ServiceError> {
        let rental = self
            .db_client
            .get_rental_by_id(rental_id)
            .await?
            .ok_or(ServiceError::RentalNotFound(rental_id))?;

        let property = self
            .db_client
            .get_property_by_id(rental.property_id)
            .await?
            .ok_or(ServiceError::PropertyNotFound(rental.property_id))?;

        Ok((rental, property))
    }

    pub async fn approve_rental(&self, owner: &User, rental_id: Uuid) -> Result<Rental, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;
        let (rental, property) = lock_rental_and_property(&mut tx, rental_id).await?;

        if !property.is_owned_by(owner.id) {
            return Err(ServiceError::UnauthorizedRentalAccess(owner.id, rental.id));
        }
        ensure_status(&rental, RentalStatus::Pending)?;

        let other_active = has_other_active_rental(&mut tx, &rental).await?;
        ensure_can_activate(&property, other_active)?;

        let rental = set_rental_status(&mut tx, rental.id, RentalStatus::Active).await?;
        set_availability(&mut tx, property.id, false).await?;

        tx.commit().await?;

        Ok(rental)
    }

    pub async fn complete_rental(&self, owner: &User, rental_id: Uuid) -> Result<Rental, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;
        let (rental, property) = lock_rental_and_property(&mut tx, rental_id).await?;

        if !property.is_owned_by(owner.id) {
            return Err(ServiceError::UnauthorizedRentalAccess(owner.id, rental.id));
        }
        ensure_status(&rental, RentalStatus::Active)?;

        let other_active = has_other_active_rental(&mut tx, &rental).await?;
        let completed = set_rental_status(&mut tx, rental.id, RentalStatus::Completed).await?;
        if should_relist(&rental, &property, other_active) {
            set_availability(&mut tx, property.id, true).await?;
        }

        tx.commit().await?;

        Ok(completed)
    }

    pub async fn cancel_rental(&self, user: &User, rental_id: Uuid) -> Result<Rental, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;
        let (rental, property) = lock_rental_and_property(&mut tx, rental_id).await?;

        if rental.tenant_id != user.id && !property.is_owned_by(user.id) {
            return Err(ServiceError::UnauthorizedRentalAccess(user.id, rental.id));
        }
        ensure_cancellable(&rental)?;

        let other_active = has_other_active_rental(&mut tx, &rental).await?;
        let cancelled = set_rental_status(&mut tx, rental.id, RentalStatus::Cancelled).await?;
        if should_relist(&rental, &property, other_active) {
            set_availability(&mut tx, property.id, true).await?;
        }

        tx.commit().await?;

        Ok(cancelled)
    }

    /// Pays the schedule entry due in `month`. The payment insert, the schedule
    /// update and the property update commit together.
    pub async fn pay_for_month(
        &self,
        tenant: &User,
        rental_id: Uuid,
        month: &str,
        method: PaymentMethod,
    ) -> Result<(Rental, Payment), ServiceError> {
        let period = parse_month(month)?;

        let mut tx = self.db_client.pool.begin().await?;

        let mut rental = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE id = $1 FOR UPDATE",
        )
        .bind(rental_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::RentalNotFound(rental_id))?;

        if rental.tenant_id != tenant.id {
            return Err(ServiceError::UnauthorizedRentalAccess(tenant.id, rental.id));
        }
        ensure_payable(&rental)?;

        let index = find_installment(&rental.payment_schedule, period)?;
        let installment = rental.payment_schedule[index].clone();

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (payer_id, amount, method, status, property_id, rental_id, period, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant.id)
        .bind(installment.amount)
        .bind(method)
        .bind(PaymentStatus::Completed)
        .bind(rental.property_id)
        .bind(rental.id)
        .bind(installment.due_date)
        .bind(generate_payment_reference())
        .fetch_one(&mut *tx)
        .await?;

        let entry = &mut rental.payment_schedule.0[index];
        entry.status = InstallmentStatus::Paid;
        entry.paid_at = Some(Utc::now());
        entry.payment_id = Some(payment.id);

        let payment_status = derive_payment_status(&rental.payment_schedule);

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET payment_schedule = $2, payment_status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(rental.id)
        .bind(Json(&rental.payment_schedule.0))
        .bind(payment_status)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE properties SET is_available = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(rental.property_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            rental_id = %rental.id,
            payment_id = %payment.id,
            due_date = %installment.due_date,
            "rent installment paid"
        );

        Ok((rental, payment))
    }

    /// Marks a rent payment failed or refunded and reopens the schedule entry it
    /// settled. The payment, the schedule and the rental status commit together.
    pub async fn reverse_rent_payment(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<(Payment, Rental), ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE id = $1 FOR UPDATE",
        )
        .bind(payment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::PaymentNotFound(payment_id))?;

        ensure_reversible(&payment, status)?;
        let rental_id = payment.rental_id.ok_or_else(|| {
            ServiceError::Validation("Payment is not linked to a rental".to_string())
        })?;

        let mut rental = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE id = $1 FOR UPDATE",
        )
        .bind(rental_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::RentalNotFound(rental_id))?;

        reopen_installment(&mut rental.payment_schedule.0, payment.id)?;
        let payment_status = derive_payment_status(&rental.payment_schedule);

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET payment_schedule = $2, payment_status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(rental.id)
        .bind(Json(&rental.payment_schedule.0))
        .bind(payment_status)
        .fetch_one(&mut *tx)
        .await?;

        let payment = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(payment.id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            payment_id = %payment.id,
            rental_id = %rental.id,
            status = ?payment.status,
            "rent payment reversed"
        );

        Ok((payment, rental))
    }
}
