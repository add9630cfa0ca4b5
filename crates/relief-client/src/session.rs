//! Session-holding API client.

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::model::{Envelope, ErrorBody, Session};

/// Holds one user's session against a Relief Desk server.
///
/// The access token is kept in memory only. The refresh token is never
/// visible to callers; it lives in the client's cookie jar, where the
/// server put it.
#[derive(Debug)]
pub struct SessionStore {
    base_url: String,
    http: Client,
    access_token: RwLock<Option<String>>,
    refresh_gate: Mutex<()>,
}

impl SessionStore {
    /// Creates a store for the server at `base_url`, e.g. `http://localhost:3500`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::Url(base_url));
        }

        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url,
            http,
            access_token: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The current access token, if logged in.
    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Replace the in-memory access token.
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    /// Log in and keep the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        let session: Session = decode(response).await?;
        self.set_access_token(Some(session.access_token.clone())).await;
        info!(user = %session.user.username, "Logged in");
        Ok(session)
    }

    /// Trade the refresh cookie for a new access token (and a rotated cookie).
    ///
    /// On failure the in-memory access token is dropped.
    pub async fn refresh(&self) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .send()
            .await?;

        match decode::<Session>(response).await {
            Ok(session) => {
                self.set_access_token(Some(session.access_token.clone())).await;
                debug!("Access token refreshed");
                Ok(session)
            }
            Err(e) => {
                self.set_access_token(None).await;
                Err(e)
            }
        }
    }

    /// Clear the server cookie and forget the access token.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .http
            .post(self.url("/api/auth/logout"))
            .send()
            .await;
        self.set_access_token(None).await;

        let response = result?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!("Logged out");
        Ok(())
    }

    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(Response, Option<String>), ClientError> {
        let token = self.access_token().await;
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok((request.send().await?, token))
    }

    /// Send a request, refreshing once and retrying once on 401.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let (response, used) = self.send_once(&method, path, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        {
            let _gate = self.refresh_gate.lock().await;
            let current = self.access_token().await;
            // Another task may have refreshed while this request was in flight.
            if current.is_none() || current == used {
                debug!(path, "Access token rejected, refreshing");
                if self.refresh().await.is_err() {
                    return Ok(response);
                }
            }
        }

        let (retried, _) = self.send_once(&method, path, body).await?;
        Ok(retried)
    }

    /// GET and unwrap the `data` envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        decode(self.execute::<()>(Method::GET, path, None).await?).await
    }

    /// POST a JSON body and unwrap the `data` envelope.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.execute(Method::POST, path, Some(body)).await?).await
    }

    /// PUT a JSON body and unwrap the `data` envelope.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.execute(Method::PUT, path, Some(body)).await?).await
    }

    /// DELETE and unwrap the `data` envelope.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        decode(self.execute::<()>(Method::DELETE, path, None).await?).await
    }

    /// GET a raw body, e.g. a CSV export.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.execute::<()>(Method::GET, path, None).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let envelope: Envelope<T> = response.json().await?;
    Ok(envelope.data)
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    ClientError::Api {
        status,
        code: body.error,
        message: body.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let store = SessionStore::new("http://localhost:3500/").unwrap();
        assert_eq!(store.url("/api/health"), "http://localhost:3500/api/health");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(matches!(
            SessionStore::new("localhost:3500"),
            Err(ClientError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_starts_logged_out() {
        let store = SessionStore::new("http://localhost:3500").unwrap();
        assert!(store.access_token().await.is_none());
        store.set_access_token(Some("abc".into())).await;
        assert_eq!(store.access_token().await.as_deref(), Some("abc"));
    }
}
