//! Read Models
//!
//! Posts and comments with author display names resolved at read time.

use std::collections::{BTreeSet, HashMap};

use auth::UserRepository;
use auth::domain::value_object::display_name::DisplayName;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entities::{Comment, Post};
use crate::domain::value_objects::Category;
use crate::error::FeedResult;

/// Shown when an author id no longer resolves to an account
pub const UNKNOWN_AUTHOR: &str = "Unknown user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    pub user_id: UserId,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment_id: CommentId,
    pub author: AuthorView,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post_id: PostId,
    pub title: String,
    pub body: String,
    pub category: Category,
    pub author: AuthorView,
    pub liked_by: Vec<UserId>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
}

/// Display names fetched in one batch
pub(crate) struct AuthorDirectory {
    names: HashMap<UserId, DisplayName>,
}

impl AuthorDirectory {
    pub(crate) async fn load<U>(users: &U, ids: BTreeSet<UserId>) -> FeedResult<Self>
    where
        U: UserRepository,
    {
        let ids: Vec<UserId> = ids.into_iter().collect();
        let names = users.find_display_names(&ids).await?;
        Ok(Self { names })
    }

    /// Like [`load`](Self::load), for use after a write has been committed
    ///
    /// A failed lookup is logged and every author renders as
    /// [`UNKNOWN_AUTHOR`], so the caller still sees the committed state.
    pub(crate) async fn load_or_unknown<U>(users: &U, ids: BTreeSet<UserId>) -> Self
    where
        U: UserRepository,
    {
        match Self::load(users, ids).await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::error!(error = %e, "Author lookup failed after write");
                Self {
                    names: HashMap::new(),
                }
            }
        }
    }

    pub(crate) fn for_posts<'a>(posts: impl IntoIterator<Item = &'a Post>) -> BTreeSet<UserId> {
        let mut ids = BTreeSet::new();
        for post in posts {
            ids.insert(post.author_id);
            ids.extend(post.comments.iter().map(|c| c.author_id));
        }
        ids
    }

    pub(crate) fn author(&self, user_id: UserId) -> AuthorView {
        let display_name = self
            .names
            .get(&user_id)
            .map_or_else(|| UNKNOWN_AUTHOR.to_string(), DisplayName::to_string);

        AuthorView {
            user_id,
            display_name,
        }
    }

    pub(crate) fn comment(&self, comment: &Comment) -> CommentView {
        CommentView {
            comment_id: comment.comment_id,
            author: self.author(comment.author_id),
            text: comment.text.to_string(),
            created_at: comment.created_at,
        }
    }

    pub(crate) fn comments(&self, comments: &[Comment]) -> Vec<CommentView> {
        comments.iter().map(|c| self.comment(c)).collect()
    }

    pub(crate) fn post(&self, post: &Post) -> PostView {
        PostView {
            post_id: post.post_id,
            title: post.title.to_string(),
            body: post.body.to_string(),
            category: post.category,
            author: self.author(post.author_id),
            liked_by: post.liked_by.iter().copied().collect(),
            comments: self.comments(&post.comments),
            created_at: post.created_at,
        }
    }
}
