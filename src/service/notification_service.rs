use serde_json::json;

use crate::{
    config::{Config, SmsConfig, SmtpConfig},
    mail::mails::{
        format_amount, send_payment_receipt_email, send_rental_request_email,
        send_rental_status_email, send_welcome_email,
    },
    models::{
        paymentmodel::Payment, propertymodel::Property, rentalmodel::Rental, usermodel::User,
    },
};

/// Email and SMS notices. Failures are logged; they never fail the request that
/// triggered them.
#[derive(Debug, Clone)]
pub struct NotificationService {
    smtp: Option<SmtpConfig>,
    sms: Option<SmsConfig>,
    http: reqwest::Client,
}

impl NotificationService {
    pub fn new(config: &Config) -> Self {
        Self {
            smtp: config.smtp.clone(),
            sms: config.sms.clone(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn notify_welcome(&self, user: &User) {
        if let Err(e) = send_welcome_email(self.smtp.as_ref(), &user.email, &user.name).await {
            tracing::warn!(user_id = %user.id, "failed to send welcome email: {}", e);
        }
    }

    pub async fn notify_rental_requested(&self, owner: &User, property: &Property, rental: &Rental) {
        let result = send_rental_request_email(
            self.smtp.as_ref(),
            &owner.email,
            &owner.name,
            &property.title,
            &rental.start_date.to_string(),
            &rental.end_date.to_string(),
        )
        .await;

        if let Err(e) = result {
            tracing::warn!(rental_id = %rental.id, "failed to send rental request email: {}", e);
        }

        self.send_sms(
            owner,
            &format!("Rentnest: new rental request for \"{}\".", property.title),
        )
        .await;
    }

    pub async fn notify_rental_status(&self, tenant: &User, property: &Property, rental: &Rental) {
        let status = serde_json::to_value(rental.status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let result = send_rental_status_email(
            self.smtp.as_ref(),
            &tenant.email,
            &tenant.name,
            &property.title,
            &status,
        )
        .await;

        if let Err(e) = result {
            tracing::warn!(rental_id = %rental.id, "failed to send rental status email: {}", e);
        }

        self.send_sms(
            tenant,
            &format!("Rentnest: your rental of \"{}\" is now {}.", property.title, status),
        )
        .await;
    }

    pub async fn notify_payment_received(&self, payer: &User, payment: &Payment) {
        let result = send_payment_receipt_email(
            self.smtp.as_ref(),
            &payer.email,
            &payer.name,
            payment.amount,
            &payment.reference,
        )
        .await;

        if let Err(e) = result {
            tracing::warn!(payment_id = %payment.id, "failed to send payment receipt: {}", e);
        }

        self.send_sms(
            payer,
            &format!(
                "Rentnest: payment of {} received. Ref {}",
                format_amount(payment.amount),
                payment.reference
            ),
        )
        .await;
    }

    async fn send_sms(&self, user: &User, message: &str) {
        let Some(phone) = user.phone.as_deref() else {
            return;
        };

        let Some(sms) = &self.sms else {
            tracing::info!(to = phone, body = message, "sms (gateway not configured, logged only)");
            return;
        };

        let result = self
            .http
            .post(&sms.api_url)
            .bearer_auth(&sms.api_key)
            .json(&json!({ "to": phone, "message": message }))
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => tracing::info!(to = phone, "sms sent"),
            Err(e) => tracing::warn!(to = phone, "failed to send sms: {}", e),
        }
    }
}
