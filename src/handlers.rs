use std::sync::{Mutex, MutexGuard};

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::MAX_POST_LENGTH;
use crate::core::errors::ApiError;
use crate::store::SocialStore;

pub type SharedStore = web::Data<Mutex<SocialStore>>;

type ApiResult = Result<HttpResponse, ApiError>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(get_current_user))
        .route("/users", web::get().to(list_users))
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}/posts", web::get().to(list_user_posts))
        .route("/users/{id}/follow", web::post().to(toggle_follow))
        .route("/posts", web::get().to(list_posts))
        .route("/posts", web::post().to(create_post))
        .route("/posts/{id}/like", web::post().to(toggle_like))
        .route("/posts/{id}/repost", web::post().to(toggle_repost));
}

fn lock(store: &SharedStore) -> Result<MutexGuard<'_, SocialStore>, ApiError> {
    store
        .lock()
        .map_err(|_| ApiError::InternalError("store lock poisoned".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTab {
    ForYou,
    Following,
}

impl FeedTab {
    pub fn parse(tab: Option<&str>) -> Result<Self, ApiError> {
        match tab {
            None | Some("for-you") => Ok(FeedTab::ForYou),
            Some("following") => Ok(FeedTab::Following),
            Some(other) => Err(ApiError::BadRequest(format!("Unknown tab: {}", other))),
        }
    }
}

#[derive(Deserialize)]
pub struct FeedQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct NewPost {
    pub content: String,
}

/// Composer guard: rejects blank or over-long input and returns the trimmed
/// text to publish.
pub fn compose(content: &str) -> Result<&str, ApiError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("Post content is required".to_string()));
    }
    if content.chars().count() > MAX_POST_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Post content exceeds {} characters",
            MAX_POST_LENGTH
        )));
    }
    Ok(trimmed)
}

async fn get_current_user(store: SharedStore) -> ApiResult {
    let store = lock(&store)?;
    let user = store.get_current_user()?;
    Ok(HttpResponse::Ok().json(user))
}

async fn list_users(store: SharedStore) -> ApiResult {
    let store = lock(&store)?;
    Ok(HttpResponse::Ok().json(store.user_views()))
}

async fn get_user(store: SharedStore, path: web::Path<String>) -> ApiResult {
    let user_id = path.into_inner();
    let store = lock(&store)?;
    match store.get_user(&user_id) {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}

async fn list_user_posts(store: SharedStore, path: web::Path<String>) -> ApiResult {
    let user_id = path.into_inner();
    let store = lock(&store)?;
    if store.get_user(&user_id).is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    let posts = store.list_posts_by_user(&user_id);
    Ok(HttpResponse::Ok().json(store.post_views(&posts)))
}

async fn list_posts(store: SharedStore, query: web::Query<FeedQuery>) -> ApiResult {
    let tab = FeedTab::parse(query.tab.as_deref())?;
    let store = lock(&store)?;
    let posts = match tab {
        FeedTab::ForYou => store.list_all_posts(),
        FeedTab::Following => store.list_timeline_posts(),
    };
    Ok(HttpResponse::Ok().json(store.post_views(&posts)))
}

async fn create_post(store: SharedStore, body: web::Json<NewPost>) -> ApiResult {
    let content = compose(&body.content)?;
    let mut store = lock(&store)?;
    let post = store.create_post(content);
    let view = store
        .post_views(&[&post])
        .pop()
        .ok_or_else(|| ApiError::InternalError("Author of new post is missing".to_string()))?;
    Ok(HttpResponse::Created().json(view))
}

async fn toggle_like(store: SharedStore, path: web::Path<String>) -> ApiResult {
    let post_id = path.into_inner();
    let state = lock(&store)?.toggle_like(&post_id)?;
    Ok(HttpResponse::Ok().json(state))
}

async fn toggle_repost(store: SharedStore, path: web::Path<String>) -> ApiResult {
    let post_id = path.into_inner();
    let state = lock(&store)?.toggle_repost(&post_id)?;
    Ok(HttpResponse::Ok().json(state))
}

async fn toggle_follow(store: SharedStore, path: web::Path<String>) -> ApiResult {
    let user_id = path.into_inner();
    let state = lock(&store)?.toggle_follow(&user_id);
    Ok(HttpResponse::Ok().json(state))
}
