use crate::{models::contact::ContactMessageDto, Result};

use super::sendmail::{MailTransport, OutgoingEmail};

const CONTACT_TEMPLATE: &str = include_str!("templates/Contact-email.html");

pub async fn send_contact_email(
    mailer: &dyn MailTransport,
    recipient: &str,
    contact: &ContactMessageDto,
) -> Result<()> {
    let placeholders = vec![
        ("{{name}}", html_escape::encode_safe(&contact.name)),
        ("{{email}}", html_escape::encode_safe(&contact.email)),
        ("{{subject}}", html_escape::encode_safe(&contact.subject)),
        ("{{message}}", html_escape::encode_safe(&contact.message)),
    ];

    let email = OutgoingEmail {
        to: recipient.to_string(),
        reply_to: Some(contact.email.clone()),
        subject: format!("[Contact] {}", contact.subject),
        html_body: render_template(CONTACT_TEMPLATE, &placeholders),
    };

    mailer.send(email).await
}

/// Single pass over the template: substituted values are never rescanned,
/// so placeholder text inside user input stays literal.
fn render_template<V: AsRef<str>>(template: &str, placeholders: &[(&str, V)]) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let tail = &rest[start..];

        let token_len = tail.find("}}").map(|end| end + 2);
        let value = token_len.and_then(|len| {
            placeholders
                .iter()
                .find(|(k, _)| *k == &tail[..len])
                .map(|(_, v)| v.as_ref())
        });

        match (token_len, value) {
            (Some(len), Some(value)) => {
                html.push_str(value);
                rest = &tail[len..];
            }
            _ => {
                html.push_str("{{");
                rest = &tail[2..];
            }
        }
    }

    html.push_str(rest);
    html
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<OutgoingEmail>>);

    #[async_trait]
    impl MailTransport for Recorder {
        async fn send(&self, email: OutgoingEmail) -> Result<()> {
            self.0.lock().unwrap().push(email);
            Ok(())
        }
    }

    #[test]
    fn template_fills_each_placeholder_once() {
        let html = render_template(
            "<h2>{{subject}}</h2><p>{{message}}</p>{{unknown}}",
            &[("{{subject}}", "Hi"), ("{{message}}", "Body")],
        );
        assert_eq!(html, "<h2>Hi</h2><p>Body</p>{{unknown}}");
    }

    #[test]
    fn placeholders_in_values_are_not_expanded() {
        let html = render_template(
            "<h2>{{subject}}</h2><p>{{message}}</p>",
            &[
                ("{{subject}}", "{{message}} {{name}}"),
                ("{{message}}", "the real message body"),
            ],
        );
        assert_eq!(
            html,
            "<h2>{{message}} {{name}}</h2><p>the real message body</p>"
        );
    }

    #[tokio::test]
    async fn contact_subject_cannot_pull_in_other_fields() {
        let recorder = Recorder::default();
        let contact = ContactMessageDto {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            subject: "{{message}} {{name}}".to_string(),
            message: "the real message body".to_string(),
        };

        send_contact_email(&recorder, "inbox@example.com", &contact)
            .await
            .unwrap();

        let sent = recorder.0.lock().unwrap();
        let body = &sent[0].html_body;
        assert!(body.contains("{{message}} {{name}}</h2>"));
        assert_eq!(body.matches("the real message body").count(), 1);
    }

    #[tokio::test]
    async fn contact_email_carries_sender_and_escaped_body() {
        let recorder = Recorder::default();
        let contact = ContactMessageDto {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "<script>alert(1)</script>".to_string(),
        };

        send_contact_email(&recorder, "inbox@example.com", &contact)
            .await
            .unwrap();

        let sent = recorder.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, "inbox@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("grace@example.com"));
        assert_eq!(email.subject, "[Contact] Hello");
        assert!(email.html_body.contains("&lt;script&gt;"));
        assert!(!email.html_body.contains("<script>"));
        assert!(!email.html_body.contains("{{"));
    }
}
