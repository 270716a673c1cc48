//! Typed client for the crewnet HTTP API with a path-keyed response cache.
//!
//! GET responses are cached by request path; a hit short-circuits the
//! network. Creating a post invalidates the `/api/posts` listing, the one
//! list the front end refetches after a mutation. Other mutations leave
//! the cache untouched and callers invalidate explicitly when they need
//! fresh data.

pub mod models;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    Comment, Connection, ConnectionStatus, CreateCommentInput, CreateConnectionInput,
    CreateLikeInput, CreatePostInput, CreateUserInput, Like, Post, User,
};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    cache: Arc<Mutex<HashMap<String, Value>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            client,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Drops the cached response for one path, if any.
    pub fn invalidate(&self, path: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(path);
        }
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_cached("/api/users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.get_cached(&format!("/api/users/{id}")).await
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> Result<User> {
        self.post_json("/api/users", input).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.get_cached("/api/posts").await
    }

    pub async fn list_user_posts(&self, user_id: i64) -> Result<Vec<Post>> {
        self.get_cached(&format!("/api/users/{user_id}/posts")).await
    }

    pub async fn create_post(&self, input: &CreatePostInput) -> Result<Post> {
        let post = self.post_json("/api/posts", input).await?;
        self.invalidate("/api/posts");
        Ok(post)
    }

    pub async fn list_post_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.get_cached(&format!("/api/posts/{post_id}/comments"))
            .await
    }

    pub async fn create_comment(&self, input: &CreateCommentInput) -> Result<Comment> {
        self.post_json("/api/comments", input).await
    }

    pub async fn list_user_connections(&self, user_id: i64) -> Result<Vec<Connection>> {
        self.get_cached(&format!("/api/users/{user_id}/connections"))
            .await
    }

    pub async fn create_connection(&self, input: &CreateConnectionInput) -> Result<Connection> {
        self.post_json("/api/connections", input).await
    }

    pub async fn update_connection_status(
        &self,
        id: i64,
        status: ConnectionStatus,
    ) -> Result<Connection> {
        let path = format!("/api/connections/{id}");
        let response = self
            .client
            .patch(self.url(&path))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .with_context(|| format!("failed to reach {path}"))?;
        let response = expect_success(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("failed to parse response from {path}"))
    }

    pub async fn list_post_likes(&self, post_id: i64) -> Result<Vec<Like>> {
        self.get_cached(&format!("/api/posts/{post_id}/likes")).await
    }

    pub async fn create_like(&self, input: &CreateLikeInput) -> Result<Like> {
        self.post_json("/api/likes", input).await
    }

    pub async fn delete_like(&self, user_id: i64, post_id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url("/api/likes"))
            .json(&CreateLikeInput { user_id, post_id })
            .send()
            .await
            .context("failed to reach /api/likes")?;
        expect_success(response).await?;
        Ok(())
    }

    async fn get_cached<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        if let Some(value) = self.cached(path) {
            return serde_json::from_value(value)
                .with_context(|| format!("cached response for {path} has an unexpected shape"));
        }
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("failed to reach {path}"))?;
        let response = expect_success(response).await?;
        let value: Value = response
            .json()
            .await
            .with_context(|| format!("failed to parse response from {path}"))?;
        self.store(path, value.clone());
        serde_json::from_value(value)
            .with_context(|| format!("response from {path} has an unexpected shape"))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to reach {path}"))?;
        let response = expect_success(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("failed to parse response from {path}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn cached(&self, path: &str) -> Option<Value> {
        self.cache.lock().ok()?.get(path).cloned()
    }

    fn store(&self, path: &str, value: Value) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(path.to_string(), value);
        }
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read body".to_string());
    anyhow::bail!("API returned {status}: {body}")
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}
