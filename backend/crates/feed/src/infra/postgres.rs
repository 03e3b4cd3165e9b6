//! PostgreSQL Post Store
//!
//! Every mutation runs in its own transaction that first takes a row lock
//! on the post (`SELECT ... FOR UPDATE`). Concurrent mutations of the same
//! post therefore queue up on that lock, while other posts are unaffected.
//! Reads load posts, likes and comments from a single snapshot.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{Comment, LikeState, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Category, CommentText, PostBody, PostTitle};
use crate::error::{FeedError, FeedResult};

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the post row for the rest of the transaction
    ///
    /// Returns `false` if the post does not exist.
    async fn lock_post(tx: &mut Transaction<'_, Postgres>, post_id: &PostId) -> FeedResult<bool> {
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT post_id FROM posts WHERE post_id = $1 FOR UPDATE")
                .bind(post_id.as_uuid())
                .fetch_optional(&mut **tx)
                .await?;

        Ok(locked.is_some())
    }

    /// Start a read-only transaction whose statements share one snapshot
    async fn begin_snapshot(&self) -> FeedResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn assemble(
        tx: &mut Transaction<'_, Postgres>,
        rows: Vec<PostRow>,
    ) -> FeedResult<Vec<Post>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.post_id).collect();

        let likes: Vec<(Uuid, Uuid)> =
            sqlx::query_as("SELECT post_id, user_id FROM post_likes WHERE post_id = ANY($1)")
                .bind(&ids[..])
                .fetch_all(&mut **tx)
                .await?;

        let comments = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                post_id,
                comment_id,
                author_id,
                body,
                created_at
            FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY seq
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&mut **tx)
        .await?;

        let mut likes_by_post: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
        for (post_id, user_id) in likes {
            likes_by_post
                .entry(post_id)
                .or_default()
                .insert(UserId::from_uuid(user_id));
        }

        let mut comments_by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in comments {
            comments_by_post
                .entry(row.post_id)
                .or_default()
                .push(row.into_comment());
        }

        rows.into_iter()
            .map(|row| {
                let liked_by = likes_by_post.remove(&row.post_id).unwrap_or_default();
                let comments = comments_by_post.remove(&row.post_id).unwrap_or_default();
                row.into_post(liked_by, comments)
            })
            .collect()
    }
}

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> FeedResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                title,
                body,
                category,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.category.as_str())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>> {
        let mut tx = self.begin_snapshot().await?;
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                title,
                body,
                category,
                created_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let post = match row {
            Some(row) => Self::assemble(&mut tx, vec![row]).await?.pop(),
            None => None,
        };
        tx.commit().await?;

        Ok(post)
    }

    async fn list_recent(&self) -> FeedResult<Vec<Post>> {
        let mut tx = self.begin_snapshot().await?;
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                title,
                body,
                category,
                created_at
            FROM posts
            ORDER BY created_at DESC, post_id DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let posts = Self::assemble(&mut tx, rows).await?;
        tx.commit().await?;

        Ok(posts)
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> FeedResult<Option<LikeState>> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_post(&mut tx, post_id).await? {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let is_liked = removed == 0;
        if is_liked {
            sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
                .bind(post_id.as_uuid())
                .bind(user_id.as_uuid())
                .execute(&mut *tx)
                .await?;
        }

        let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(LikeState {
            like_count: usize::try_from(like_count)
                .map_err(|_| FeedError::Internal(format!("Negative like count: {like_count}")))?,
            is_liked,
        }))
    }

    async fn append_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> FeedResult<Option<Vec<Comment>>> {
        let mut tx = self.pool.begin().await?;

        if !Self::lock_post(&mut tx, post_id).await? {
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO post_comments (
                comment_id,
                post_id,
                author_id,
                body,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(post_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(comment.text.as_str())
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                post_id,
                comment_id,
                author_id,
                body,
                created_at
            FROM post_comments
            WHERE post_id = $1
            ORDER BY seq
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(rows.into_iter().map(CommentRow::into_comment).collect()))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    title: String,
    body: String,
    category: String,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, liked_by: BTreeSet<UserId>, comments: Vec<Comment>) -> FeedResult<Post> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| FeedError::Internal(format!("Invalid stored category: {}", self.category)))?;

        Ok(Post {
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            title: PostTitle::from_db(self.title),
            body: PostBody::from_db(self.body),
            category,
            liked_by,
            comments,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    post_id: Uuid,
    comment_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            author_id: UserId::from_uuid(self.author_id),
            text: CommentText::from_db(self.body),
            created_at: self.created_at,
        }
    }
}
