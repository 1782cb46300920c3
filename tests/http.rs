use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use chirp::clock::FixedClock;
use chirp::config::AppCfg;
use chirp::i18n::Language;
use chirp::models::post::CreatePost;
use chirp::models::user::User;
use chirp::routes;
use chirp::services::memory::MemoryBackend;
use chirp::services::{Backend, PostStore};
use chirp::state::AppState;

struct TestApp {
    router: Router,
    store: Arc<MemoryBackend>,
    state: AppState,
}

fn app() -> TestApp {
    let at = chrono::DateTime::parse_from_rfc3339("2024-01-05T15:04:05+09:00").unwrap();
    let store = Arc::new(MemoryBackend::default());
    let backend = Backend::in_memory(store.clone(), Arc::new(FixedClock(at)));
    let state = AppState::new(backend, Language::Ko);
    TestApp {
        router: routes::app(state.clone(), &AppCfg::default()),
        store,
        state,
    }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get(&self, uri: &str, uid: Option<&str>) -> (StatusCode, String) {
        let mut req = Request::get(uri);
        if let Some(uid) = uid {
            req = req
                .header("x-user-id", uid)
                .header("x-user-email", format!("{uid}@example.com"));
        }
        let (status, _, body) = self.send(req.body(Body::empty()).unwrap()).await;
        (status, body)
    }

    async fn form(
        &self,
        method: &str,
        uri: &str,
        uid: &str,
        body: &str,
    ) -> (StatusCode, axum::http::HeaderMap, String) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("x-user-id", uid)
            .header("x-user-email", format!("{uid}@example.com"))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn seed(&self, uid: &str, content: &str, created_at: &str) -> String {
        self.store
            .create_post(CreatePost {
                content: content.into(),
                created_at: created_at.into(),
                uid: uid.into(),
                email: format!("{uid}@example.com"),
                hashtags: vec![],
                image_url: String::new(),
            })
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn anonymous_home_shows_placeholder() {
    let app = app();
    let (status, body) = app.get("/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("게시글이 없습니다"));
    assert!(body.contains("전체"));
    assert!(body.contains("팔로잉"));
    assert!(!body.contains("post-form"));
    assert_eq!(app.store.broker().issued(), 0);
}

#[tokio::test]
async fn compose_with_hashtags() {
    let app = app();

    let (_, _, body) = app
        .form("POST", "/composer/hashtag", "U1", "hashtag=world+&key=+")
        .await;
    assert!(body.contains("#world"));

    let (_, _, body) = app
        .form("POST", "/composer/hashtag", "U1", "hashtag=world+&key=+")
        .await;
    assert!(body.contains("이미 입력한 태그가 있습니다."));

    let (status, _, body) = app.form("POST", "/posts", "U1", "content=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("게시글을 생성했습니다."));
    assert!(!body.contains("#world"));

    let (_, body) = app.get("/", Some("U1")).await;
    assert!(body.contains("hello"));
    assert!(body.contains("#world"));
    assert!(body.contains("2024. 1. 5. 오후 03:04:05"));
}

#[tokio::test]
async fn empty_content_creates_nothing() {
    let app = app();
    let (_, _, body) = app.form("POST", "/posts", "U1", "content=").await;
    assert!(!body.contains("게시글을 생성했습니다."));

    let (_, body) = app.get("/", Some("U1")).await;
    assert!(body.contains("게시글이 없습니다"));
}

#[tokio::test]
async fn image_upload_is_served_back() {
    let app = app();
    let boundary = "XBOUNDARYX";
    let mut payload = Vec::new();
    payload.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file-input\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    payload.extend_from_slice(b"fake-png-bytes");
    payload.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let req = Request::post("/composer/image")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .header("x-user-id", "U1")
        .body(Body::from(payload))
        .unwrap();
    let (status, _, body) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data:image/png;base64,"));

    app.form("POST", "/posts", "U1", "content=with+image").await;
    assert_eq!(app.store.object_count(), 1);

    let (_, body) = app.get("/", Some("U1")).await;
    let start = body.find("/media/U1/").expect("image url rendered");
    let url: String = body[start..].chars().take_while(|c| *c != '"').collect();

    let (status, media) = app.get(&url, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(media, "fake-png-bytes");
}

#[tokio::test]
async fn comment_is_appended() {
    let app = app();
    let id = app.seed("U9", "a post", "2024. 1. 5. 오전 09:00:00").await;

    let (status, _, body) = app
        .form("POST", &format!("/posts/{id}/comments"), "U1", "comment=nice+post")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("댓글이 생성되었습니다."));

    let post = app.store.get_post(&id).await.unwrap();
    assert_eq!(post.comments().len(), 1);
    assert_eq!(post.comments()[0].comment, "nice post");
    assert_eq!(post.comments()[0].uid, "U1");
    assert_eq!(post.comments()[0].email, "U1@example.com");

    let (_, body) = app.get(&format!("/posts/{id}"), None).await;
    assert!(body.contains("nice post"));
}

#[tokio::test]
async fn edit_redirects_to_the_post() {
    let app = app();
    let id = app.seed("U1", "old text", "2024. 1. 5. 오전 09:00:00").await;

    let (status, body) = app.get(&format!("/posts/{id}/edit"), Some("U1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("old text"));

    let (_, headers, body) = app
        .form("POST", &format!("/posts/{id}/edit"), "U1", "content=new+text")
        .await;
    assert_eq!(headers["HX-Redirect"], format!("/posts/{id}").as_str());
    assert!(body.contains("게시글을 수정했습니다."));
    assert_eq!(app.store.get_post(&id).await.unwrap().content, "new text");
}

#[tokio::test]
async fn following_tab_lists_followed_authors() {
    let app = app();
    app.seed("U2", "followed post", "2024. 1. 5. 오전 09:00:00").await;
    app.seed("U3", "stranger post", "2024. 1. 5. 오전 10:00:00").await;

    let (status, _, _) = app.form("POST", "/users/U2/follow", "U1", "").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/?tab=following", Some("U1")).await;
    assert!(body.contains("followed post"));
    assert!(!body.contains("stranger post"));

    let (_, body) = app.get("/?tab=all", Some("U1")).await;
    assert!(body.contains("followed post"));
    assert!(body.contains("stranger post"));
    assert!(body.find("stranger post") < body.find("followed post"));
}

#[tokio::test]
async fn page_views_do_not_keep_feeds_mounted() {
    let app = app();
    for uid in ["U1", "U2", "U3"] {
        let (status, _) = app.get("/", Some(uid)).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(app.state.sessions.feed_count(), 0);
    assert_eq!(app.store.broker().active(), 0);
}

#[tokio::test]
async fn session_end_releases_subscriptions() {
    let app = app();
    let me = User::new("U1", "U1@example.com");
    app.state.sessions.connect_feed(&app.state.backend, &me).await;
    assert_eq!(app.state.sessions.feed_count(), 1);
    assert_eq!(app.store.broker().active(), 3);

    let (status, _, _) = app.form("POST", "/session/end", "U1", "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.state.sessions.feed_count(), 0);
    assert_eq!(app.store.broker().active(), 0);
}

#[tokio::test]
async fn hashtag_with_url_characters_can_be_removed() {
    let app = app();
    let (_, _, body) = app
        .form("POST", "/composer/hashtag", "U1", "hashtag=%23rust%2F1+&key=+")
        .await;
    assert!(body.contains("##rust/1"));

    let (status, _, body) = app
        .form("DELETE", "/composer/hashtag", "U1", "tag=%23rust%2F1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("##rust/1"));
}

#[tokio::test]
async fn edit_page_recovers_from_a_failed_load() {
    let app = app();
    let id = app.seed("U1", "old text", "2024. 1. 5. 오전 09:00:00").await;

    app.store.fail_reads(true);
    let (status, _) = app.get(&format!("/posts/{id}/edit"), Some("U1")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    app.store.fail_reads(false);
    let (status, body) = app.get(&format!("/posts/{id}/edit"), Some("U1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("old text"));

    let (_, headers, _) = app
        .form("POST", &format!("/posts/{id}/edit"), "U1", "content=new+text")
        .await;
    assert_eq!(headers["HX-Redirect"], format!("/posts/{id}").as_str());
    assert_eq!(app.store.get_post(&id).await.unwrap().content, "new text");
}

#[tokio::test]
async fn errors_map_to_statuses() {
    let app = app();

    let req = Request::post("/posts")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("content=hi"))
        .unwrap();
    let (status, _, _) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/posts/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/media/U1/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
