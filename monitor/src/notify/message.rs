use chrono::{DateTime, FixedOffset, Utc};

use crate::config::RunConfig;
use crate::product::ProductSnapshot;

/// UTC+05:30; alert timestamps are shown in India Standard Time.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub subject: String,
    pub html_body: String,
    /// Plain-text alternative for clients that do not render HTML.
    pub text_body: String,
    pub recipient: String,
}

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within one day")
}

pub fn now_ist() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

impl AlertMessage {
    pub fn compose(snapshot: &ProductSnapshot, cfg: &RunConfig) -> Self {
        Self::compose_at(snapshot, cfg, now_ist())
    }

    pub fn compose_at(
        snapshot: &ProductSnapshot,
        cfg: &RunConfig,
        at: DateTime<FixedOffset>,
    ) -> Self {
        let discount = percent(snapshot.discount_percentage);
        let current = rupees(snapshot.current_price);
        let original = rupees(snapshot.original_price);
        let saved = rupees(snapshot.savings());
        let when = at.format("%Y-%m-%d %H:%M:%S IST").to_string();

        let subject = format!(
            "Discount Alert: {} at {}% OFF",
            snapshot.product_name, discount
        );

        let text_body = format!(
            "Discount Alert!\n\n\
             {name} has reached {discount}% OFF (target {target}%).\n\n\
             Current Price: {current}\n\
             Original Price: {original}\n\
             You save: {saved}\n\n\
             Link: {url}\n\n\
             Time: {when}\n\n\
             ---\n\
             This is an automated alert from your discount monitor.\n",
            name = snapshot.product_name,
            target = percent(cfg.target_discount),
            url = cfg.product_page_url,
        );

        let name = escape_html(&snapshot.product_name);
        let url = escape_html(&cfg.product_page_url);
        let html_body = format!(
            r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9; border-radius: 10px;">
      <h2 style="color: #2874f0;">Discount Alert!</h2>
      <div style="background-color: white; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p style="font-size: 16px;">
          <strong>{name}</strong> has reached
          <span style="color: #ff6b00; font-size: 24px; font-weight: bold;">{discount}% OFF</span>!
        </p>
        <p style="font-size: 18px;"><strong>Current Price:</strong> <span style="color: #388e3c;">{current}</span></p>
        <p><strong>Original Price:</strong> <s>{original}</s> &middot; <strong>You save:</strong> {saved}</p>
        <p style="margin: 20px 0;">
          <a href="{url}" style="display: inline-block; padding: 12px 24px; background-color: #2874f0; color: white; text-decoration: none; border-radius: 5px; font-weight: bold;">Buy Now</a>
        </p>
      </div>
      <p style="font-size: 12px; color: #666; margin-top: 20px;">
        Alert triggered at: {when}<br>
        <em>This is an automated alert from your discount monitor.</em>
      </p>
    </div>
  </body>
</html>
"#
        );

        Self {
            subject,
            html_body,
            text_body,
            recipient: cfg.receiver_email.clone(),
        }
    }
}

/// `2.0 -> "2.0"`, `2.25 -> "2.25"`, `2.333 -> "2.33"`
fn percent(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0');
    if s.ends_with('.') {
        format!("{s}0")
    } else {
        s.to_string()
    }
}

fn rupees(v: f64) -> String {
    format!("₹{v:.2}")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::{Secret, SmtpSettings};

    fn cfg() -> RunConfig {
        RunConfig {
            target_identifier: "voucher-1".into(),
            product_name: "Voucher".into(),
            api_endpoint: "http://localhost/api".into(),
            product_page_url: "https://store.example.com/view/voucher-1?a=1&b=2".into(),
            target_discount: 2.0,
            sender_email: "alerts@example.com".into(),
            receiver_email: "me@example.com".into(),
            sender_credential: Secret::new("pw"),
            smtp: SmtpSettings {
                host: "smtp.example.com".into(),
                port: 465,
            },
        }
    }

    fn snapshot() -> ProductSnapshot {
        ProductSnapshot {
            product_name: "Gift <Card>".into(),
            current_price: 9750.0,
            original_price: 10000.0,
            discount_percentage: 2.5,
        }
    }

    #[test]
    fn subject_and_recipient() {
        let at = ist().with_ymd_and_hms(2026, 1, 2, 9, 30, 0).unwrap();
        let msg = AlertMessage::compose_at(&snapshot(), &cfg(), at);

        assert_eq!(msg.subject, "Discount Alert: Gift <Card> at 2.5% OFF");
        assert_eq!(msg.recipient, "me@example.com");
    }

    #[test]
    fn bodies_carry_prices_link_and_ist_time() {
        let at = ist().with_ymd_and_hms(2026, 1, 2, 9, 30, 0).unwrap();
        let msg = AlertMessage::compose_at(&snapshot(), &cfg(), at);

        for body in [&msg.text_body, &msg.html_body] {
            assert!(body.contains("2.5% OFF"));
            assert!(body.contains("₹9750.00"));
            assert!(body.contains("₹10000.00"));
            assert!(body.contains("₹250.00"));
            assert!(body.contains("2026-01-02 09:30:00 IST"));
        }
        assert!(msg.text_body.contains("https://store.example.com/view/voucher-1?a=1&b=2"));
        assert!(msg.html_body.contains("href=\"https://store.example.com/view/voucher-1?a=1&amp;b=2\""));
    }

    #[test]
    fn html_body_escapes_product_name() {
        let msg = AlertMessage::compose(&snapshot(), &cfg());

        assert!(msg.html_body.contains("Gift &lt;Card&gt;"));
        assert!(!msg.html_body.contains("Gift <Card>"));
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(percent(2.0), "2.0");
        assert_eq!(percent(2.25), "2.25");
        assert_eq!(percent(2.333), "2.33");
        assert_eq!(percent(10.5), "10.5");
    }
}
