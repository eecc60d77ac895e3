use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::User;

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO users (username, password_hash, date_joined)
        VALUES (?, ?, ?)
        RETURNING id, username, password_hash, date_joined
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn fetch(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, password_hash, date_joined
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, password_hash, date_joined
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, password_hash, date_joined
        FROM users
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

/// Ids of the snippets owned by `user_id`, in snippet order.
pub async fn snippet_ids(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM snippets WHERE owner_id = ? ORDER BY created, id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Removes the user together with every snippet they own.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{self, snippets},
        highlight::Highlighter,
        models::NewSnippet,
    };

    #[actix_web::test]
    async fn usernames_are_unique() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        create(&pool, "alice", "hash").await.unwrap();

        let err = create(&pool, "alice", "other").await.unwrap_err();
        let is_unique = err
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        assert!(is_unique);
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn lookup_by_id_and_username() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        let user = create(&pool, "bob", "hash").await.unwrap();

        assert_eq!(fetch(&pool, user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(find_by_username(&pool, "bob").await.unwrap(), Some(user));
        assert_eq!(find_by_username(&pool, "nobody").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn users_are_listed_by_id() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        for name in ["carol", "alice", "bob"] {
            create(&pool, name, "hash").await.unwrap();
        }

        let names: Vec<String> = list(&pool, 10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.username)
            .collect();
        assert_eq!(names, ["carol", "alice", "bob"]);
    }

    #[actix_web::test]
    async fn user_snippet_relationship() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        let highlighter = Highlighter::new();
        let owner = create(&pool, "owner", "hash").await.unwrap();
        let other = create(&pool, "other", "hash").await.unwrap();

        let first = snippets::insert(&pool, &highlighter, owner.id, &NewSnippet::new("a"))
            .await
            .unwrap();
        snippets::insert(&pool, &highlighter, other.id, &NewSnippet::new("b"))
            .await
            .unwrap();
        let third = snippets::insert(&pool, &highlighter, owner.id, &NewSnippet::new("c"))
            .await
            .unwrap();

        assert_eq!(
            snippet_ids(&pool, owner.id).await.unwrap(),
            vec![first.id, third.id]
        );
    }

    #[actix_web::test]
    async fn deleting_a_user_cascades_to_their_snippets() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        let highlighter = Highlighter::new();
        let user = create(&pool, "gone", "hash").await.unwrap();
        let snippet = snippets::insert(&pool, &highlighter, user.id, &NewSnippet::new("x"))
            .await
            .unwrap();

        assert!(delete(&pool, user.id).await.unwrap());
        assert!(snippets::fetch(&pool, snippet.id).await.unwrap().is_none());
        assert_eq!(snippets::count(&pool).await.unwrap(), 0);
    }
}
