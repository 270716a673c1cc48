use crewnet_backend::api::{self, AppState};
use crewnet_backend::bootstrap;
use crewnet_backend::config::CrewnetConfig;
use crewnet_client::models::{
    ConnectionStatus, CreateConnectionInput, CreateLikeInput, CreatePostInput, CreateUserInput,
};
use crewnet_client::ApiClient;

struct TestServer {
    base_url: String,
    server: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let resources = bootstrap::initialize().expect("bootstrap");
        let state = AppState {
            config: CrewnetConfig::new(0),
            store: resources.store,
        };
        let app = api::router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service())
                .await
                .expect("serve");
        });
        Self {
            base_url: format!("http://{addr}"),
            server,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn sample_user(name: &str) -> CreateUserInput {
    CreateUserInput {
        name: name.to_string(),
        headline: "h".to_string(),
        bio: None,
        location: None,
        avatar: "a.png".to_string(),
        cover_image: None,
    }
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let node = TestServer::spawn().await;
    let response = reqwest::get(format!("{}/health", node.base_url))
        .await
        .expect("health request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("health body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn seeded_users_are_listed_and_fetchable() {
    let node = TestServer::spawn().await;
    let client = ApiClient::new(node.base_url.clone()).expect("client");

    let users = client.list_users().await.expect("list users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[1].id, 2);

    let first = client.get_user(1).await.expect("get user 1");
    assert_eq!(first.name, users[0].name);
}

#[tokio::test]
async fn missing_and_malformed_user_ids_are_not_found() {
    let node = TestServer::spawn().await;
    let http = reqwest::Client::new();

    for path in ["/api/users/99", "/api/users/abc"] {
        let response = http
            .get(format!("{}{path}", node.base_url))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 404, "{path}");
        let body: serde_json::Value = response.json().await.expect("body");
        assert_eq!(body["message"], "User not found");
    }

    // Filtered lists degrade to empty instead of erroring.
    let response = http
        .get(format!("{}/api/users/abc/posts", node.base_url))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let posts: Vec<serde_json::Value> = response.json().await.expect("body");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn create_endpoints_reject_malformed_shapes() {
    let node = TestServer::spawn().await;
    let http = reqwest::Client::new();

    let cases = [
        ("/api/users", serde_json::json!({}), "Invalid user data"),
        (
            "/api/posts",
            serde_json::json!({ "userId": 1 }),
            "Invalid post data",
        ),
        (
            "/api/comments",
            serde_json::json!({ "postId": 1, "content": "hi" }),
            "Invalid comment data",
        ),
        (
            "/api/connections",
            serde_json::json!({ "userId": 1, "connectedUserId": 2, "status": "blocked" }),
            "Invalid connection data",
        ),
        (
            "/api/likes",
            serde_json::json!({ "userId": 1 }),
            "Invalid like data",
        ),
    ];

    for (path, body, message) in cases {
        let response = http
            .post(format!("{}{path}", node.base_url))
            .json(&body)
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 400, "{path}");
        let body: serde_json::Value = response.json().await.expect("body");
        assert_eq!(body["message"], message, "{path}");
    }
}

#[tokio::test]
async fn patch_connection_error_paths() {
    let node = TestServer::spawn().await;
    let http = reqwest::Client::new();

    // Bad status wins over unknown id.
    let response = http
        .patch(format!("{}/api/connections/99", node.base_url))
        .json(&serde_json::json!({ "status": "blocked" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("body");
    assert_eq!(body["message"], "Invalid status");

    let response = http
        .patch(format!("{}/api/connections/99", node.base_url))
        .json(&serde_json::json!({ "status": "accepted" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("body");
    assert_eq!(body["message"], "Connection not found");
}

#[tokio::test]
async fn delete_like_is_idempotent_and_lenient() {
    let node = TestServer::spawn().await;
    let client = ApiClient::new(node.base_url.clone()).expect("client");

    client
        .create_like(&CreateLikeInput {
            user_id: 1,
            post_id: 1,
        })
        .await
        .expect("create like");
    client.delete_like(1, 1).await.expect("first delete");
    client.delete_like(1, 1).await.expect("second delete");

    // A body that is not a (user, post) pair still gets a 204.
    let response = reqwest::Client::new()
        .delete(format!("{}/api/likes", node.base_url))
        .json(&serde_json::json!({ "nonsense": true }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn end_to_end_member_scenario() {
    let node = TestServer::spawn().await;
    let client = ApiClient::new(node.base_url.clone()).expect("client");

    // Two profiles are seeded, so the next user id is 3.
    let user = client.create_user(&sample_user("A")).await.expect("user");
    assert_eq!(user.id, 3);
    assert!(user.created_at.timestamp() > 0);

    let post = client
        .create_post(&CreatePostInput {
            user_id: user.id,
            content: "hello".to_string(),
        })
        .await
        .expect("post");
    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 3);

    let posts = client.list_user_posts(user.id).await.expect("user posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, post.id);
    assert_eq!(posts[0].content, "hello");

    client
        .create_like(&CreateLikeInput {
            user_id: user.id,
            post_id: post.id,
        })
        .await
        .expect("like");
    client.delete_like(user.id, post.id).await.expect("unlike");
    let likes = client.list_post_likes(post.id).await.expect("likes");
    assert!(likes.is_empty());

    let connection = client
        .create_connection(&CreateConnectionInput {
            user_id: 1,
            connected_user_id: user.id,
            status: ConnectionStatus::Pending,
        })
        .await
        .expect("connection");
    let updated = client
        .update_connection_status(connection.id, ConnectionStatus::Accepted)
        .await
        .expect("accept");
    assert_eq!(updated.id, connection.id);
    assert_eq!(updated.status, ConnectionStatus::Accepted);
    assert_eq!(updated.user_id, 1);
    assert_eq!(updated.connected_user_id, user.id);

    // The edge is stored once but visible from both endpoints.
    for endpoint in [1, user.id] {
        let connections = client
            .list_user_connections(endpoint)
            .await
            .expect("connections");
        assert!(connections
            .iter()
            .any(|c| c.id == connection.id && c.status == ConnectionStatus::Accepted));
    }
}
