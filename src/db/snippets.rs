use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    highlight::Highlighter,
    models::{NewSnippet, Snippet},
};

const SELECT_SNIPPET: &str = r#"
    SELECT
        s.id,
        s.created,
        s.title,
        s.code,
        s.linenos,
        s.language,
        s.style,
        s.highlighted,
        s.owner_id,
        u.username AS owner
    FROM snippets s
    JOIN users u
      ON u.id = s.owner_id
"#;

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM snippets")
        .fetch_one(pool)
        .await
}

/// One page of snippets, oldest first.
pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Snippet>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{SELECT_SNIPPET} ORDER BY s.created, s.id LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn fetch(pool: &SqlitePool, id: i64) -> Result<Option<Snippet>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    fetch_on(&mut conn, id).await
}

async fn fetch_on(conn: &mut SqliteConnection, id: i64) -> Result<Option<Snippet>, sqlx::Error> {
    sqlx::query_as(&format!("{SELECT_SNIPPET} WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn insert_on(
    conn: &mut SqliteConnection,
    highlighter: &Highlighter,
    owner_id: i64,
    new: &NewSnippet,
) -> Result<i64, AppError> {
    let highlighted =
        highlighter.render(&new.title, &new.code, new.language, new.style, new.linenos)?;

    let id = sqlx::query_scalar(
        r#"
        INSERT INTO snippets (created, title, code, linenos, language, style, highlighted, owner_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(Utc::now())
    .bind(&new.title)
    .bind(&new.code)
    .bind(new.linenos)
    .bind(new.language)
    .bind(new.style)
    .bind(highlighted)
    .bind(owner_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

/// Stores a new snippet, rendering its highlighted page on the way in.
pub async fn insert(
    pool: &SqlitePool,
    highlighter: &Highlighter,
    owner_id: i64,
    new: &NewSnippet,
) -> Result<Snippet, AppError> {
    let mut created = insert_many(pool, highlighter, owner_id, std::slice::from_ref(new)).await?;
    created.pop().ok_or(AppError::NotFound)
}

/// Stores a batch atomically: either every snippet is created or none is.
pub async fn insert_many(
    pool: &SqlitePool,
    highlighter: &Highlighter,
    owner_id: i64,
    batch: &[NewSnippet],
) -> Result<Vec<Snippet>, AppError> {
    let mut tx = pool.begin().await?;

    let mut created = Vec::with_capacity(batch.len());
    for new in batch {
        let id = insert_on(&mut tx, highlighter, owner_id, new).await?;
        let snippet = fetch_on(&mut tx, id).await?.ok_or(AppError::NotFound)?;
        created.push(snippet);
    }

    tx.commit().await?;
    Ok(created)
}

/// Writes back the editable fields and re-renders the highlighted page.
pub async fn save(
    pool: &SqlitePool,
    highlighter: &Highlighter,
    snippet: &Snippet,
) -> Result<Snippet, AppError> {
    let highlighted = highlighter.render(
        &snippet.title,
        &snippet.code,
        snippet.language,
        snippet.style,
        snippet.linenos,
    )?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE snippets
        SET
            title       = ?,
            code        = ?,
            linenos     = ?,
            language    = ?,
            style       = ?,
            highlighted = ?
        WHERE id = ?
        "#,
    )
    .bind(&snippet.title)
    .bind(&snippet.code)
    .bind(snippet.linenos)
    .bind(snippet.language)
    .bind(snippet.style)
    .bind(highlighted)
    .bind(snippet.id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    let saved = fetch_on(&mut tx, snippet.id).await?.ok_or(AppError::NotFound)?;
    tx.commit().await?;
    Ok(saved)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM snippets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
