use rand::{distr::Alphanumeric, Rng};

/// Human-readable payment reference, e.g. `PAY-20250301-7QK2M9XA`.
pub fn generate_payment_reference() -> String {
    let suffix = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();

    format!("PAY-{}-{}", chrono::Utc::now().format("%Y%m%d"), suffix)
}
