use crate::api::{AuthApi, FriendApi};
use crate::entitys::auth_entity::{AuthToken, Credentials};
use crate::entitys::friend_recommendation::FriendRecommendation;
use crate::entitys::friend_request::{FriendRequest, RequestDecision, RespondRequestBody};
use crate::entitys::user_entity::User;
use crate::session::AuthSession;
use async_trait::async_trait;
use common::config::ApiConfig;
use common::{AppError, AppResult, UserId};
use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// 基于 reqwest 的 REST 客户端，`Client` 内部带连接池，可廉价克隆
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    client: Client,
}

impl HttpApiClient {
    pub fn new(cfg: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(cfg.timeout_secs)).build()?;
        Self::with_client(&cfg.base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AppError::Validation(format!("invalid base_url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!("base_url {base_url} cannot carry a path")));
        }
        Ok(Self { base_url, client })
    }

    /// 拼接 `/api/...` 路径，每个片段单独做百分号编码
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("base_url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> AppResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url.path());
        Ok(self.client.request(method, url))
    }

    fn authed(&self, session: &AuthSession, method: Method, segments: &[&str]) -> AppResult<RequestBuilder> {
        Ok(self.request(method, segments)?.header(AUTHORIZATION, session.bearer()))
    }

    async fn check(resp: Response) -> AppResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let url = resp.url().path().to_string();
        let body = resp.text().await.unwrap_or_default();
        warn!("{} answered {}", url, status);
        Err(AppError::from_response(status.as_u16(), &body))
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
        let resp = Self::check(builder.send().await?).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn execute(builder: RequestBuilder) -> AppResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthToken> {
        Self::fetch(self.request(Method::POST, &["auth", "login"])?.json(credentials)).await
    }

    async fn register(&self, credentials: &Credentials) -> AppResult<AuthToken> {
        Self::fetch(self.request(Method::POST, &["auth", "register"])?.json(credentials)).await
    }
}

#[async_trait]
impl FriendApi for HttpApiClient {
    async fn search_users(&self, session: &AuthSession, query: &str) -> AppResult<Vec<User>> {
        let builder = self.authed(session, Method::GET, &["users", "search"])?.query(&[("q", query)]);
        Self::fetch(builder).await
    }

    async fn list_friends(&self, session: &AuthSession) -> AppResult<Vec<User>> {
        Self::fetch(self.authed(session, Method::GET, &["users", "friends"])?).await
    }

    async fn list_requests(&self, session: &AuthSession) -> AppResult<Vec<FriendRequest>> {
        Self::fetch(self.authed(session, Method::GET, &["friends", "requests"])?).await
    }

    async fn list_recommendations(&self, session: &AuthSession) -> AppResult<Vec<FriendRecommendation>> {
        Self::fetch(self.authed(session, Method::GET, &["friends", "recommendations"])?).await
    }

    async fn send_request(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()> {
        let builder = self.authed(session, Method::POST, &["friends", "request", user_id.as_str()])?.json(&serde_json::json!({}));
        Self::execute(builder).await
    }

    async fn respond_request(&self, session: &AuthSession, user_id: &UserId, decision: RequestDecision) -> AppResult<()> {
        let builder = self
            .authed(session, Method::PUT, &["friends", "request", user_id.as_str()])?
            .json(&RespondRequestBody { status: decision });
        Self::execute(builder).await
    }

    async fn remove_friend(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()> {
        Self::execute(self.authed(session, Method::DELETE, &["friends", user_id.as_str()])?).await
    }
}
