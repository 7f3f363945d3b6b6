//! `reqwest` implementation of [`ChatApi`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use chatsync_config::ApiConfig;

use crate::entities::{AuthToken, Chat, User};
use crate::remote::ChatApi;
use crate::types::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
struct AccessChatBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
}

/// HTTP client for the chat service REST API.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::configuration(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "chat service rejected credentials");
            return Err(ApiError::auth(format!("server responded with {status}")));
        }

        if !status.is_success() {
            warn!(%status, "chat service request failed");
            return Err(ApiError::network(format!("server responded with {status}")));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_chats(&self, token: &AuthToken) -> ApiResult<Vec<Chat>> {
        let request = self
            .client
            .get(self.endpoint("/api/chat"))
            .bearer_auth(token.as_str());

        let chats: Vec<Chat> = self.send(request).await?;
        debug!(count = chats.len(), "fetched chats");
        Ok(chats)
    }

    async fn search_users(&self, token: &AuthToken, query: &str) -> ApiResult<Vec<User>> {
        let request = self
            .client
            .get(self.endpoint("/api/user"))
            .query(&[("search", query)])
            .bearer_auth(token.as_str());

        let users: Vec<User> = self.send(request).await?;
        debug!(query, count = users.len(), "user search returned");
        Ok(users)
    }

    async fn access_chat(&self, token: &AuthToken, user_id: &str) -> ApiResult<Chat> {
        let request = self
            .client
            .post(self.endpoint("/api/chat"))
            .bearer_auth(token.as_str())
            .json(&AccessChatBody { user_id });

        let chat: Chat = self.send(request).await?;
        debug!(chat_id = %chat.id, user_id, "accessed chat");
        Ok(chat)
    }
}
