//! HTTP adapter for the devmatch backend.
//!
//! [`ApiClient`] implements [`MatchGateway`] over reqwest with an in-memory
//! cookie store, so the session cookie issued by `/auth/login` or
//! `/auth/signup` rides along on every subsequent call. Response bodies are
//! decoded from the backend's `{ "result": ... }` envelope; non-success
//! statuses are classified into [`GatewayError`] with the server's `message`
//! field preserved for user-facing notices.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use devmatch_core::{
    Candidate, Credentials, Decision, GatewayError, GatewayResult, Identity, MatchGateway,
    PageCursor, ProfileId, ProfileUpdate, Registration,
};

const HEADER_REQUEST_ID: &str = "x-request-id";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cookie-authenticated client for the remote matching service.
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client against `base_url` with the default request timeout.
    pub fn new(base_url: Url) -> GatewayResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// Every request carries a per-session `x-request-id` so server logs can
    /// be correlated with one client run.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> GatewayResult<Self> {
        let mut default_headers = HeaderMap::new();
        let session_id = Uuid::new_v4().to_string();
        let request_id = HeaderValue::from_str(&session_id)
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .default_headers(default_headers)
            .build()
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })
    }

    /// Pass through success responses, otherwise classify the status and the
    /// error payload's `message` field.
    async fn check(response: Response) -> GatewayResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let bytes = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());

        tracing::debug!(status, message = message.as_deref(), "backend rejected request");
        Err(GatewayError::Status { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let envelope: Envelope<T> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|err| GatewayError::Decode { source: Box::new(err) })?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl MatchGateway for ApiClient {
    async fn fetch_profile(&self) -> GatewayResult<Identity> {
        // Cache-busting headers match the original client; intermediaries
        // must never satisfy a session check from cache.
        let response = self
            .http
            .get(self.endpoint("/user/profile")?)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("If-None-Match", "")
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::decode(response).await
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<Identity> {
        let response = self
            .http
            .post(self.endpoint("/auth/login")?)
            .json(credentials)
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::decode(response).await
    }

    async fn signup(&self, registration: &Registration) -> GatewayResult<Identity> {
        let response = self
            .http
            .post(self.endpoint("/auth/signup")?)
            .json(registration)
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::decode(response).await
    }

    async fn logout(&self) -> GatewayResult<()> {
        let response = self
            .http
            .get(self.endpoint("/auth/logout")?)
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<Identity> {
        let skill = serde_json::to_string(&update.skill)
            .map_err(|err| GatewayError::Decode { source: Box::new(err) })?;

        let mut form = Form::new()
            .text("firstName", update.first_name.clone())
            .text("lastName", update.last_name.clone())
            .text("gender", update.gender.as_str())
            .text("dob", update.dob.format("%Y-%m-%d").to_string())
            .text("skill", skill);

        if let Some(photo) = &update.photo {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)
                .map_err(|err| GatewayError::Decode { source: Box::new(err) })?;
            form = form.part("profileImg", part);
        }

        let response = self
            .http
            .patch(self.endpoint("/user/profile")?)
            .multipart(form)
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::decode(response).await
    }

    async fn fetch_feed(&self, cursor: PageCursor) -> GatewayResult<Vec<Candidate>> {
        let response = self
            .http
            .get(self.endpoint("/user/feed")?)
            .query(&[
                ("pageNumber", cursor.page_number().to_string()),
                ("limit", cursor.limit().to_string()),
            ])
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;

        // The feed envelope may omit `result` entirely; treat that as an
        // empty page rather than a decode failure.
        let envelope: FeedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|err| GatewayError::Decode { source: Box::new(err) })?;
        Ok(envelope.result)
    }

    async fn send_decision(&self, candidate: &ProfileId, decision: Decision) -> GatewayResult<()> {
        let path = format!("/request/send/{}/{}", decision.wire_segment(), candidate);
        let response = self
            .http
            .post(self.endpoint(&path)?)
            .send()
            .await
            .map_err(|err| GatewayError::Transport { source: Box::new(err) })?;
        Self::check(response).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize, Default)]
struct FeedEnvelope {
    #[serde(default)]
    result: Vec<Candidate>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::Method::PATCH;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Result<ApiClient> {
        let base_url: Url = server.base_url().parse()?;
        Ok(ApiClient::new(base_url)?)
    }

    fn identity_json(id: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "gender": "female",
            "skill": ["rust"]
        })
    }

    #[tokio::test]
    async fn login_posts_credentials_and_decodes_envelope() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/auth/login").json_body(json!({
                "email": "ada@example.com",
                "password": "Sup3rSecret!"
            }));
            then.status(200).json_body(json!({ "result": identity_json("u1") }));
        });

        let client = client_for(&server)?;
        let identity = client
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "Sup3rSecret!".into(),
            })
            .await?;

        assert_eq!(identity.id, ProfileId::from("u1"));
        assert_eq!(identity.first_name, "Ada");
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn session_cookie_is_replayed_on_later_calls() -> Result<()> {
        let server = MockServer::start_async().await;
        let login = server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .header("set-cookie", "token=abc123; Path=/")
                .json_body(json!({ "result": identity_json("u1") }));
        });
        let profile = server.mock(|when, then| {
            when.method(GET)
                .path("/user/profile")
                .header("cookie", "token=abc123")
                .header("Cache-Control", "no-cache");
            then.status(200).json_body(json!({ "result": identity_json("u1") }));
        });

        let client = client_for(&server)?;
        client
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "Sup3rSecret!".into(),
            })
            .await?;
        client.fetch_profile().await?;

        login.assert();
        profile.assert();
        Ok(())
    }

    #[tokio::test]
    async fn feed_passes_cursor_as_query_parameters() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/user/feed")
                .query_param("pageNumber", "2")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "result": [{
                    "_id": "c1",
                    "firstName": "Grace",
                    "lastName": "Hopper",
                    "email": "grace@example.com",
                    "skill": ["cobol"]
                }]
            }));
        });

        let client = client_for(&server)?;
        let page = client.fetch_feed(PageCursor::new(2, 5)).await?;

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, ProfileId::from("c1"));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn feed_without_result_field_is_an_empty_page() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/user/feed");
            then.status(200).json_body(json!({}));
        });

        let client = client_for(&server)?;
        let page = client.fetch_feed(PageCursor::default()).await?;
        assert!(page.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn decision_targets_the_verdict_path() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/request/send/interested/c42");
            then.status(200).json_body(json!({ "result": "sent" }));
        });

        let client = client_for(&server)?;
        client
            .send_decision(&ProfileId::from("c42"), Decision::Accept)
            .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn backend_message_survives_classification() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401).json_body(json!({ "message": "Invalid credentials" }));
        });

        let client = client_for(&server)?;
        let err = client
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "WrongPass1!".into(),
            })
            .await
            .expect_err("login should fail");

        assert!(matches!(
            &err,
            GatewayError::Status { status: 401, message: Some(message) }
                if message == "Invalid credentials"
        ));
        assert!(err.is_auth_failure());
        assert_eq!(err.user_message(), "Invalid credentials");
        Ok(())
    }

    #[tokio::test]
    async fn opaque_error_body_yields_no_message() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/auth/logout");
            then.status(500).body("<html>oops</html>");
        });

        let client = client_for(&server)?;
        let err = client.logout().await.expect_err("logout should fail");

        assert!(matches!(
            err,
            GatewayError::Status { status: 500, message: None }
        ));
        assert_eq!(err.user_message(), GatewayError::FALLBACK_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn profile_update_is_sent_as_multipart_patch() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/user/profile");
            then.status(200).json_body(json!({ "result": identity_json("u1") }));
        });

        let client = client_for(&server)?;
        let update = ProfileUpdate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            gender: devmatch_core::Gender::Female,
            dob: chrono::NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            skill: vec!["rust".into(), "math".into()],
            photo: Some(devmatch_core::ImageUpload {
                file_name: "avatar.png".into(),
                content_type: "image/png".into(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        };

        let identity = client.update_profile(&update).await?;
        assert_eq!(identity.id, ProfileId::from("u1"));
        mock.assert();
        Ok(())
    }
}
