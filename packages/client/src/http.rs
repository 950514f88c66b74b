// ABOUTME: reqwest-backed implementation of the store's Backend
// ABOUTME: Unwraps the `{ success, data, error }` envelope and raises on non-2xx

use async_trait::async_trait;
use dayboard_core::{ConversionOverrides, User};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::backend::Backend;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Session {
    token: String,
    user: User,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// HTTP backend talking to the Dayboard REST API
#[derive(Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBackend {
    /// `base_url` is the server root, e.g. `http://localhost:4001`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| {
                ClientError::Configuration(format!("Invalid base URL {}: {}", base_url, e))
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "Base URL cannot carry a path: {}",
                base_url
            )));
        }

        Ok(Self {
            http_client: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in and keep the returned bearer token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<User> {
        let credentials = Credentials {
            email,
            password,
            name: None,
        };
        self.start_session(&["auth", "login"], &credentials).await
    }

    /// Create an account and keep the returned bearer token for later calls
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ClientResult<User> {
        let credentials = Credentials {
            email,
            password,
            name: Some(name),
        };
        self.start_session(&["auth", "register"], &credentials).await
    }

    async fn start_session(
        &mut self,
        segments: &[&str],
        credentials: &Credentials<'_>,
    ) -> ClientResult<User> {
        let url = self.endpoint(segments);
        let response = self.http_client.post(url).json(credentials).send().await?;
        let session: Session = serde_json::from_value(unwrap_envelope(response).await?)?;
        self.token = Some(session.token);
        Ok(session.user)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.bearer_auth(token))
    }
}

/// Raise on non-2xx (preferring a JSON `{error}` body over raw text), then unwrap `data`
async fn unwrap_envelope(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or(text);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope = serde_json::from_str(&text)?;
    if !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope.error.unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    Ok(envelope.data.unwrap_or(Value::Null))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self, collection: &str) -> ClientResult<Vec<Value>> {
        debug!("GET {}", collection);
        let request = self.authorized(self.http_client.get(self.endpoint(&[collection])))?;
        let data = unwrap_envelope(request.send().await?).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn save(&self, collection: &str, body: Value) -> ClientResult<Value> {
        debug!("POST {}", collection);
        let request = self.authorized(self.http_client.post(self.endpoint(&[collection])))?;
        unwrap_envelope(request.json(&body).send().await?).await
    }

    async fn delete(&self, collection: &str, id: &str) -> ClientResult<()> {
        debug!("DELETE {}/{}", collection, id);
        let request = self.authorized(self.http_client.delete(self.endpoint(&[collection, id])))?;
        unwrap_envelope(request.send().await?).await?;
        Ok(())
    }

    async fn convert_idea(
        &self,
        idea_id: &str,
        overrides: &ConversionOverrides,
    ) -> ClientResult<Value> {
        let url = self.endpoint(&["ideas", idea_id, "convert-to-project"]);
        let request = self.authorized(self.http_client.post(url))?;
        unwrap_envelope(request.json(overrides).send().await?).await
    }

    async fn get_setting(&self, key: &str) -> ClientResult<Value> {
        let request = self.authorized(self.http_client.get(self.endpoint(&["settings", key])))?;
        unwrap_envelope(request.send().await?).await
    }

    async fn put_setting(&self, key: &str, value: Value) -> ClientResult<()> {
        let request = self.authorized(self.http_client.post(self.endpoint(&["settings", key])))?;
        unwrap_envelope(request.json(&value).send().await?).await?;
        Ok(())
    }
}
