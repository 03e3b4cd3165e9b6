//! In-Memory Post Store
//!
//! The outer map lock is only held to look up or insert a post. Each post
//! sits behind its own mutex, so mutations of one post are serialised while
//! different posts proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{PostId, UserId};
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{Comment, LikeState, Post};
use crate::domain::repository::PostRepository;
use crate::error::FeedResult;

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Arc<Mutex<Post>>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, post_id: &PostId) -> Option<Arc<Mutex<Post>>> {
        self.posts.read().await.get(post_id).cloned()
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> FeedResult<()> {
        self.posts
            .write()
            .await
            .insert(post.post_id, Arc::new(Mutex::new(post.clone())));
        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>> {
        match self.entry(post_id).await {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn list_recent(&self) -> FeedResult<Vec<Post>> {
        let entries: Vec<_> = self.posts.read().await.values().cloned().collect();

        let mut posts = Vec::with_capacity(entries.len());
        for entry in entries {
            posts.push(entry.lock().await.clone());
        }
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.post_id.cmp(&a.post_id))
        });

        Ok(posts)
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> FeedResult<Option<LikeState>> {
        let Some(entry) = self.entry(post_id).await else {
            return Ok(None);
        };

        let mut post = entry.lock().await;
        Ok(Some(post.toggle_like(*user_id)))
    }

    async fn append_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> FeedResult<Option<Vec<Comment>>> {
        let Some(entry) = self.entry(post_id).await else {
            return Ok(None);
        };

        let mut post = entry.lock().await;
        post.append_comment(comment.clone());
        Ok(Some(post.comments.clone()))
    }
}
