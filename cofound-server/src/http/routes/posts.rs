//! Feed, comment and like endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::comments::{Comment, CommentRepo};
use crate::db::repos::posts::{Post, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::models::Content;

/// Post creation request
#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub company_id: Option<i64>,
    pub image_url: Option<String>,
}

/// Post creation response
#[derive(Serialize)]
pub struct CreatePostResponse {
    pub post_id: i64,
}

/// Post response
#[derive(Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub company_id: Option<i64>,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            company_id: p.company_id,
            content: p.content,
            image_url: p.image_url,
            likes_count: p.likes_count,
            comments_count: p.comments_count,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Comment creation request
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Comment creation response
#[derive(Serialize)]
pub struct CreateCommentResponse {
    pub message: &'static str,
    pub comment_id: i64,
}

/// Comment response
#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Like confirmation
#[derive(Serialize)]
pub struct LikeResponse {
    pub message: &'static str,
}

/// POST /posts - publish a feed post
async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let content = Content::new(&req.content)?;

    let post_id = PostRepo::new(&state.pool)
        .create(user_id, &content, req.company_id, req.image_url)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatePostResponse { post_id })))
}

/// GET /posts - the global feed, newest first
async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = PostRepo::new(&state.pool).feed().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /posts/{id}/comments - comment on a post
async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CreateCommentResponse>), ApiError> {
    let content = Content::new(&req.content)?;

    let comment_id = CommentRepo::new(&state.pool)
        .create(post_id, user_id, &content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCommentResponse {
            message: "comment added",
            comment_id,
        }),
    ))
}

/// GET /posts/{id}/comments - list comments for a post
async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = CommentRepo::new(&state.pool).list_for_post(post_id).await?;
    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// POST /posts/{id}/like - like a post
async fn like_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<LikeResponse>, ApiError> {
    PostRepo::new(&state.pool).like(post_id, user_id).await?;
    Ok(Json(LikeResponse {
        message: "post liked",
    }))
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/posts/{id}/like", post(like_post))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::server::test_app::{app, json_body, send};

    async fn register(app: &axum::Router, email: &str) -> i64 {
        let response = send(
            app,
            "POST",
            "/register",
            Some(json!({ "email": email, "password": "secretsecret" })),
        )
        .await;
        json_body(response).await["user_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn comments_bump_counter_through_api() {
        let app = app().await;
        let user_id = register(&app, "writer@cofound.app").await;

        let response = send(
            &app,
            "POST",
            &format!("/posts?user_id={user_id}"),
            Some(json!({ "content": "comment below" })),
        )
        .await;
        let post_id = json_body(response).await["post_id"].as_i64().unwrap();

        let response = send(
            &app,
            "POST",
            &format!("/posts/{post_id}/comments?user_id={user_id}"),
            Some(json!({ "content": "first" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(&app, "GET", "/posts", None).await;
        let feed = json_body(response).await;
        assert_eq!(feed[0]["comments_count"], 1);

        let response = send(
            &app,
            "GET",
            &format!("/posts/{post_id}/comments"),
            None,
        )
        .await;
        let comments = json_body(response).await;
        assert_eq!(comments.as_array().unwrap().len(), 1);
        assert_eq!(comments[0]["content"], "first");
    }

    #[tokio::test]
    async fn feed_is_newest_first() {
        let app = app().await;
        let user_id = register(&app, "writer@cofound.app").await;

        for content in ["one", "two", "three"] {
            send(
                &app,
                "POST",
                &format!("/posts?user_id={user_id}"),
                Some(json!({ "content": content })),
            )
            .await;
        }

        let response = send(&app, "GET", "/posts", None).await;
        let feed = json_body(response).await;
        let contents: Vec<_> = feed
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["content"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(contents, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn empty_content_is_validation_error() {
        let app = app().await;
        let user_id = register(&app, "writer@cofound.app").await;

        let response = send(
            &app,
            "POST",
            &format!("/posts?user_id={user_id}"),
            Some(json!({ "content": "" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_404() {
        let app = app().await;
        let user_id = register(&app, "writer@cofound.app").await;

        let response = send(
            &app,
            "POST",
            &format!("/posts/999/comments?user_id={user_id}"),
            Some(json!({ "content": "void" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
