//! HTTP implementation of `EmailBackend` against the outreach API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;

use crate::backend::{
    BackendError, EmailBackend, GenerateEmailRequest, GeneratedEmail, SendEmailRequest,
};
use crate::config::ClientConfig;

pub const UPLOAD_PATH: &str = "/api/resume/upload";
pub const SEND_APPLICATION_PATH: &str = "/api/resume/send_job/email";
pub const SEND_INQUIRY_PATH: &str = "/api/resume/send/email";

#[derive(Clone)]
pub struct HttpEmailBackend {
    client: Client,
    base_url: String,
}

impl HttpEmailBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl EmailBackend for HttpEmailBackend {
    async fn generate_email(
        &self,
        request: GenerateEmailRequest,
    ) -> Result<GeneratedEmail, BackendError> {
        let GenerateEmailRequest {
            resume,
            company_name,
            job_title,
            template,
        } = request;

        let file = Part::bytes(resume.content.to_vec())
            .file_name(resume.file_name)
            .mime_str(&resume.content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("companyName", company_name)
            .text("jobTitle", job_title)
            .text("template", template.as_str());

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        let body = success_body(response).await?;
        debug!("Generation response: {} bytes", body.len());

        parse_generation_body(&body)
    }

    async fn send_email(&self, request: SendEmailRequest) -> Result<(), BackendError> {
        let builder = match &request {
            SendEmailRequest::Application(params) => self
                .client
                .post(self.url(SEND_APPLICATION_PATH))
                .query(params),
            SendEmailRequest::Inquiry(params) => {
                self.client.post(self.url(SEND_INQUIRY_PATH)).query(params)
            }
        };

        let response = builder.send().await?;
        success_body(response).await?;
        Ok(())
    }
}

/// Returns the body of a 2xx response, or the status and body otherwise.
async fn success_body(response: Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// JSON bodies must match one of the `GeneratedEmail` shapes; anything that
/// is not JSON at all is taken as the email text itself.
fn parse_generation_body(body: &str) -> Result<GeneratedEmail, BackendError> {
    match serde_json::from_str::<GeneratedEmail>(body) {
        Ok(generated) => Ok(generated),
        Err(_) if serde_json::from_str::<serde_json::Value>(body).is_err() => {
            Ok(GeneratedEmail::Text(body.to_string()))
        }
        Err(_) => Err(BackendError::MalformedResponse),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, Query, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::backend::{ApplicationEmail, InquiryEmail};
    use crate::workflow::session::{EmailType, ResumeFile};

    #[test]
    fn test_parse_structured_body() {
        let parsed = parse_generation_body(r#"{"emailBody":"Hello"}"#).unwrap();
        assert_eq!(
            parsed,
            GeneratedEmail::Structured {
                email_body: Some("Hello".to_string())
            }
        );
    }

    #[test]
    fn test_parse_plain_text_body() {
        let parsed = parse_generation_body("Dear hiring team,\nI am writing...").unwrap();
        assert_eq!(
            parsed,
            GeneratedEmail::Text("Dear hiring team,\nI am writing...".to_string())
        );
    }

    #[test]
    fn test_parse_json_of_wrong_shape_is_malformed() {
        assert!(matches!(
            parse_generation_body("[1, 2, 3]"),
            Err(BackendError::MalformedResponse)
        ));
    }

    #[derive(Clone, Default)]
    struct Recorded {
        fields: Arc<Mutex<Vec<(String, String)>>>,
        inquiries: Arc<Mutex<Vec<InquiryEmail>>>,
        applications: Arc<Mutex<Vec<ApplicationEmail>>>,
    }

    async fn upload(State(rec): State<Recorded>, mut multipart: Multipart) -> Json<Value> {
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let value = if name == "file" {
                format!(
                    "{}|{}",
                    field.file_name().unwrap_or_default(),
                    field.content_type().unwrap_or_default()
                )
            } else {
                field.text().await.unwrap_or_default()
            };
            rec.fields.lock().unwrap().push((name, value));
        }
        Json(json!({ "emailBody": "  Generated  " }))
    }

    async fn send_inquiry(
        State(rec): State<Recorded>,
        Query(params): Query<InquiryEmail>,
    ) -> &'static str {
        rec.inquiries.lock().unwrap().push(params);
        "Email sent successfully!"
    }

    async fn send_application(
        State(_): State<Recorded>,
        Query(_): Query<ApplicationEmail>,
    ) -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
    }

    async fn spawn_server(rec: Recorded) -> String {
        let app = Router::new()
            .route(UPLOAD_PATH, post(upload))
            .route(SEND_INQUIRY_PATH, post(send_inquiry))
            .route(SEND_APPLICATION_PATH, post(send_application))
            .with_state(rec);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn backend(api_url: String) -> HttpEmailBackend {
        HttpEmailBackend::new(&ClientConfig {
            api_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_multipart_form() {
        let rec = Recorded::default();
        let backend = backend(spawn_server(rec.clone()).await);

        let generated = backend
            .generate_email(GenerateEmailRequest {
                resume: ResumeFile::new("jane.pdf", b"%PDF".to_vec()),
                company_name: "Acme".to_string(),
                job_title: "Engineer".to_string(),
                template: EmailType::Application,
            })
            .await
            .unwrap();

        assert_eq!(
            generated,
            GeneratedEmail::Structured {
                email_body: Some("  Generated  ".to_string())
            }
        );
        let fields = rec.fields.lock().unwrap().clone();
        assert!(fields.contains(&("file".to_string(), "jane.pdf|application/pdf".to_string())));
        assert!(fields.contains(&("companyName".to_string(), "Acme".to_string())));
        assert!(fields.contains(&("jobTitle".to_string(), "Engineer".to_string())));
        assert!(fields.contains(&("template".to_string(), "application".to_string())));
    }

    #[tokio::test]
    async fn test_inquiry_send_uses_query_params() {
        let rec = Recorded::default();
        let backend = backend(spawn_server(rec.clone()).await);
        let params = InquiryEmail {
            to: "x@y.com".to_string(),
            company_name: "Acme & Co".to_string(),
            hiring_manager_name: String::new(),
            body: "Hello,\nany openings?".to_string(),
        };

        backend
            .send_email(SendEmailRequest::Inquiry(params.clone()))
            .await
            .unwrap();

        assert_eq!(rec.inquiries.lock().unwrap().as_slice(), &[params]);
        assert!(rec.applications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_reported_with_status() {
        let backend = backend(spawn_server(Recorded::default()).await);

        let err = backend
            .send_email(SendEmailRequest::Application(ApplicationEmail {
                to: "hr@acme.com".to_string(),
                job_title: "Engineer".to_string(),
                body: "Hi".to_string(),
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Status { status: 500, .. }));
    }
}
