use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};

use crate::config::SmtpConfig;

/// Fills `{{key}}` placeholders in a template. Values are HTML-escaped.
pub fn render_template(template: &str, placeholders: &[(&str, String)]) -> String {
    placeholders
        .iter()
        .fold(template.to_string(), |html, (key, value)| {
            html.replace(&format!("{{{{{}}}}}", key), &ammonia::clean_text(value))
        })
}

/// Sends through SMTP when configured, otherwise only logs the message.
pub async fn send_email(
    smtp: Option<&SmtpConfig>,
    to_email: &str,
    subject: &str,
    html_body: String,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if !to_email.contains('@') {
        return Err(format!("Invalid email address: {}", to_email).into());
    }

    let Some(smtp) = smtp else {
        tracing::info!(to = to_email, subject, "email (smtp not configured, logged only)");
        return Ok(());
    };

    let email = Message::builder()
        .from(smtp.from.parse()?)
        .to(to_email.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body)?;

    let mailer = SmtpTransport::relay(&smtp.host)?
        .credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
        .build();

    // lettre's SmtpTransport is blocking.
    tokio::task::spawn_blocking(move || mailer.send(&email)).await??;

    tracing::info!(to = to_email, subject, "email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_placeholder() {
        let html = render_template(
            "<p>Hi {{name}}, {{name}} owes {{amount}}</p>",
            &[("name", "Ada".to_string()), ("amount", "1500.00".to_string())],
        );
        assert_eq!(html, "<p>Hi Ada, Ada owes 1500.00</p>");
    }

    #[test]
    fn user_values_cannot_inject_markup() {
        let html = render_template(
            "<h1>{{title}}</h1>",
            &[("title", "<script>alert(1)</script> & \"friends\"".to_string())],
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains('"'));
        assert!(html.starts_with("<h1>") && html.ends_with("</h1>"));
    }

    #[tokio::test]
    async fn logs_when_smtp_is_absent() {
        assert!(send_email(None, "ada@example.com", "Hello", "<p>hi</p>".into())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_malformed_recipient() {
        assert!(send_email(None, "not-an-address", "Hello", String::new())
            .await
            .is_err());
    }
}
