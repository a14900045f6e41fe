use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpConfig;

/// Outbound mail transport. Implemented over SMTP in production and as a
/// no-op in tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)?
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .port(cfg.port)
            .build();
        let from: Mailbox = cfg.from.parse()?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())?;

        self.transport.send(email).await?;
        info!(%to, "verification email sent");
        Ok(())
    }
}

pub fn verification_subject(username: &str) -> String {
    format!("Account Verification ({username})")
}

/// HTML body for the verification email: branded header, the code in a
/// large centered box, and an ignore-this note.
pub fn verification_body(code: &str) -> String {
    format!(
        concat!(
            "<!doctype html>",
            "<html lang=\"en\">",
            "<head><meta charset=\"UTF-8\" />",
            "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" /></head>",
            "<body style=\"margin:0;padding:0;background-color:#f4f6f8;\">",
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" ",
            "style=\"background-color:#f4f6f8;\">",
            "<tr><td align=\"center\" style=\"padding:24px 12px;\">",
            "<table role=\"presentation\" width=\"600\" cellpadding=\"0\" cellspacing=\"0\" ",
            "style=\"width:600px;max-width:600px;background:#ffffff;border-radius:14px;overflow:hidden;\">",
            "<tr><td style=\"padding:22px 24px;background:#0b5fff;\">",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:18px;color:#ffffff;",
            "font-weight:700;\">Doorman</div>",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:13px;color:#dbe7ff;",
            "margin-top:6px;\">Email verification</div>",
            "</td></tr>",
            "<tr><td style=\"padding:28px 24px 10px 24px;\">",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:16px;color:#111827;",
            "font-weight:700;\">Verify your email address</div>",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:14px;color:#374151;",
            "margin-top:10px;\">Enter the code below to continue.</div>",
            "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" ",
            "style=\"margin:18px 0 6px 0;\"><tr><td style=\"background:#f3f4f6;",
            "border:1px solid #e5e7eb;border-radius:12px;padding:14px 18px;\">",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:28px;letter-spacing:6px;",
            "color:#111827;font-weight:800;text-align:center;\">{code}</div>",
            "</td></tr></table>",
            "<div style=\"font-family:Arial,Helvetica,sans-serif;font-size:12px;color:#6b7280;",
            "margin-top:6px;\">If you didn't request this, ignore this email.</div>",
            "</td></tr>",
            "</table></td></tr></table>",
            "</body></html>"
        ),
        code = code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_names_the_account() {
        assert_eq!(verification_subject("alice"), "Account Verification (alice)");
    }

    #[test]
    fn body_contains_the_code() {
        let body = verification_body("12345");
        assert!(body.contains("12345"));
        assert!(body.contains("Verify your email address"));
    }
}
