//! HTTP transport for the GoTrue endpoints the account uses.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthResult, AuthSession, AuthUser, Credentials};
use crate::util::{supabase_error_message, supabase_service_url, unix_timestamp_now};

/// What a token or sign-up call handed back.
#[derive(Debug, PartialEq, Eq)]
pub enum Grant {
    Session(AuthSession),
    /// Account exists but must be confirmed before it can sign in.
    Pending,
}

#[derive(Debug, Clone)]
pub struct GoTrueClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl GoTrueClient {
    pub fn new(project_url: &str, anon_key: &str) -> AuthResult<Self> {
        let base_url =
            supabase_service_url(project_url, "/auth/v1").map_err(AuthError::InvalidConfiguration)?;
        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }
        Ok(Self {
            base_url,
            anon_key: anon_key.to_string(),
            client: Client::builder().build()?,
        })
    }

    pub async fn password_grant(&self, credentials: &Credentials) -> AuthResult<Grant> {
        let response = self
            .post("/token", Some("password"), credentials, None)
            .await?;
        decode_grant(response).await
    }

    pub async fn refresh_grant(&self, refresh_token: &str) -> AuthResult<Grant> {
        #[derive(Serialize)]
        struct RefreshBody<'a> {
            refresh_token: &'a str,
        }

        let response = self
            .post("/token", Some("refresh_token"), &RefreshBody { refresh_token }, None)
            .await?;
        decode_grant(response).await
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> AuthResult<Grant> {
        let response = self.post("/signup", None, credentials, None).await?;
        decode_grant(response).await
    }

    pub async fn recover(&self, email: &str) -> AuthResult<()> {
        self.post("/recover", None, &serde_json::json!({ "email": email }), None)
            .await?;
        Ok(())
    }

    /// Revoke the session behind `access_token`. An already invalid token
    /// counts as revoked.
    pub async fn logout(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .request("/logout", None, &serde_json::json!({}), Some(access_token))
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        expect_success("/logout", response).await?;
        Ok(())
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        grant_type: Option<&str>,
        body: &B,
        bearer: Option<&str>,
    ) -> AuthResult<Response> {
        let response = self.request(path, grant_type, body, bearer).send().await?;
        expect_success(path, response).await
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        path: &str,
        grant_type: Option<&str>,
        body: &B,
        bearer: Option<&str>,
    ) -> RequestBuilder {
        let request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(self.anon_key.as_str()))
            .json(body);
        match grant_type {
            Some(grant_type) => request.query(&[("grant_type", grant_type)]),
            None => request,
        }
    }
}

async fn expect_success(path: &str, response: Response) -> AuthResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = supabase_error_message(status.as_u16(), &body);
    tracing::warn!("Auth request {path} failed with HTTP {}: {message}", status.as_u16());
    Err(AuthError::Api(message))
}

async fn decode_grant(response: Response) -> AuthResult<Grant> {
    let payload = response.json::<TokenPayload>().await?;
    payload.into_grant(unix_timestamp_now())
}

/// Body of `/token` and `/signup`.
///
/// A confirmed sign-up or a token grant carries the session fields at the top
/// level. An unconfirmed sign-up carries only the user, either nested or as
/// the body itself.
#[derive(Debug, Default, Deserialize)]
struct TokenPayload {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<UserPayload>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

impl TokenPayload {
    fn into_grant(self, now: i64) -> AuthResult<Grant> {
        let Some(access_token) = self.access_token else {
            return if self.user.is_some() || self.id.is_some() {
                Ok(Grant::Pending)
            } else {
                Err(AuthError::Api(
                    "Auth response contained neither a session nor a user".to_string(),
                ))
            };
        };

        let missing = |field: &str| AuthError::Api(format!("Auth response is missing {field}"));
        let refresh_token = self.refresh_token.ok_or_else(|| missing("refresh_token"))?;
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.saturating_add(secs)))
            .ok_or_else(|| missing("expires_at"))?;
        let user = self.user.ok_or_else(|| missing("user"))?;

        Ok(Grant::Session(AuthSession {
            access_token,
            refresh_token,
            expires_at,
            user: AuthUser {
                id: user.id,
                email: user.email,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(json: &str) -> TokenPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn token_grant_uses_expires_in_when_absolute_time_missing() {
        let grant = payload(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,
                "user":{"id":"u1","email":"reader@example.com"}}"#,
        )
        .into_grant(1_000)
        .unwrap();

        let Grant::Session(session) = grant else {
            panic!("expected a session");
        };
        assert_eq!(session.expires_at, 4_600);
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.email.as_deref(), Some("reader@example.com"));
    }

    #[test]
    fn unconfirmed_sign_up_is_pending() {
        let nested = payload(r#"{"user":{"id":"u1","email":null}}"#);
        assert_eq!(nested.into_grant(0).unwrap(), Grant::Pending);

        let bare_user = payload(r#"{"id":"u1","email":"reader@example.com","role":""}"#);
        assert_eq!(bare_user.into_grant(0).unwrap(), Grant::Pending);
    }

    #[test]
    fn partial_session_is_an_error() {
        let error = payload(r#"{"access_token":"a","user":{"id":"u1"}}"#)
            .into_grant(0)
            .unwrap_err();
        assert_eq!(error.to_string(), "Auth response is missing refresh_token");

        assert!(TokenPayload::default().into_grant(0).is_err());
    }

    #[test]
    fn client_requires_scheme_and_key() {
        assert!(GoTrueClient::new("demo.supabase.co", "anon").is_err());
        assert!(GoTrueClient::new("https://demo.supabase.co", "  ").is_err());
        let client = GoTrueClient::new("https://demo.supabase.co/", "anon").unwrap();
        assert_eq!(client.base_url, "https://demo.supabase.co/auth/v1");
    }
}
