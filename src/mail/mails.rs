use super::sendmail::{render_template, send_email};
use crate::config::SmtpConfig;

type MailResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const WELCOME_TEMPLATE: &str = include_str!("templates/Welcome-email.html");
const RENTAL_REQUEST_TEMPLATE: &str = include_str!("templates/RentalRequest-email.html");
const RENTAL_STATUS_TEMPLATE: &str = include_str!("templates/RentalStatus-email.html");
const PAYMENT_RECEIPT_TEMPLATE: &str = include_str!("templates/PaymentReceipt-email.html");

/// Formats minor currency units as `1234.50`.
pub fn format_amount(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let amount = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, amount / 100, amount % 100)
}

pub async fn send_welcome_email(smtp: Option<&SmtpConfig>, to_email: &str, name: &str) -> MailResult {
    let html = render_template(WELCOME_TEMPLATE, &[("name", name.to_string())]);
    send_email(smtp, to_email, "Welcome to Rentnest", html).await
}

pub async fn send_rental_request_email(
    smtp: Option<&SmtpConfig>,
    to_email: &str,
    owner_name: &str,
    property_title: &str,
    start_date: &str,
    end_date: &str,
) -> MailResult {
    let html = render_template(
        RENTAL_REQUEST_TEMPLATE,
        &[
            ("name", owner_name.to_string()),
            ("property", property_title.to_string()),
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ],
    );
    send_email(smtp, to_email, "New rental request", html).await
}

pub async fn send_rental_status_email(
    smtp: Option<&SmtpConfig>,
    to_email: &str,
    tenant_name: &str,
    property_title: &str,
    status: &str,
) -> MailResult {
    let html = render_template(
        RENTAL_STATUS_TEMPLATE,
        &[
            ("name", tenant_name.to_string()),
            ("property", property_title.to_string()),
            ("status", status.to_string()),
        ],
    );
    send_email(smtp, to_email, "Your rental has been updated", html).await
}

pub async fn send_payment_receipt_email(
    smtp: Option<&SmtpConfig>,
    to_email: &str,
    name: &str,
    amount: i64,
    reference: &str,
) -> MailResult {
    let html = render_template(
        PAYMENT_RECEIPT_TEMPLATE,
        &[
            ("name", name.to_string()),
            ("amount", format_amount(amount)),
            ("reference", reference.to_string()),
        ],
    );
    send_email(smtp, to_email, "Payment receipt", html).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_shown_in_major_units() {
        assert_eq!(format_amount(150_000), "1500.00");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(-1250), "-12.50");
    }

    #[test]
    fn templates_use_known_placeholders() {
        assert!(WELCOME_TEMPLATE.contains("{{name}}"));
        assert!(PAYMENT_RECEIPT_TEMPLATE.contains("{{reference}}"));
        assert!(RENTAL_STATUS_TEMPLATE.contains("{{status}}"));
        assert!(RENTAL_REQUEST_TEMPLATE.contains("{{start_date}}"));
    }
}
