use crate::domain::ports::EmailService;
use crate::error::AppError;
use crate::infra::external::{check_response, http_client};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Serialize;

const SERVICE: &str = "Email service";

/// Relays mail through an HTTP mail gateway authenticated with a bearer token.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: http_client(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct Attachment<'a> {
    filename: &'a str,
    content_base64: String,
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from_alias: &'static str,
    to_addr: &'a str,
    subject: &'a str,
    html_body: &'a str,
    attachments: Vec<Attachment<'a>>,
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        let attachments = attachment_name
            .zip(attachment_data)
            .map(|(filename, data)| Attachment {
                filename,
                content_base64: general_purpose::STANDARD.encode(data),
            })
            .into_iter()
            .collect();

        let mail = OutgoingMail {
            from_alias: "lunch",
            to_addr: recipient,
            subject,
            html_body,
            attachments,
        };

        let res = self.client.post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&mail)
            .send()
            .await;

        check_response(SERVICE, res).await?;
        Ok(())
    }
}
