#![allow(dead_code)]

pub mod mock;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

/// Helper to setup an isolated, unique in-memory SQLite database.
/// A unique name per call keeps parallel tests apart while shared cache
/// lets every pooled connection see the same data.
pub async fn memory_pool() -> SqlitePool {
    let db_name = Uuid::new_v4().to_string();
    let conn_str = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&conn_str)
        .await
        .unwrap()
}

/// `budget` is declared without a type so SQLite keeps whatever
/// representation each row was inserted with.
pub async fn movies_store() -> SqlitePool {
    let pool = memory_pool().await;
    sqlx::query(
        r#"
        CREATE TABLE movies (
          movieId INTEGER PRIMARY KEY,
          imdbId TEXT,
          title TEXT,
          overview TEXT,
          productionCompanies TEXT,
          releaseDate TEXT,
          budget,
          revenue INTEGER,
          runtime REAL,
          language TEXT,
          genres TEXT,
          status TEXT
        );
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

pub async fn ratings_store() -> SqlitePool {
    let pool = memory_pool().await;
    sqlx::query(
        r#"
        CREATE TABLE ratings (
          ratingId INTEGER PRIMARY KEY,
          userId INTEGER,
          movieId INTEGER,
          rating REAL,
          timestamp INTEGER
        );
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

/// `budget_sql` is spliced in verbatim: `1000000`, `'50000'`, `NULL`, ...
pub async fn insert_movie(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    genres: &str,
    release_date: &str,
    budget_sql: &str,
) {
    let sql = format!(
        "INSERT INTO movies (movieId, imdbId, title, overview, productionCompanies, \
         releaseDate, budget, revenue, runtime, language, genres, status) \
         VALUES (?, ?, ?, ?, ?, ?, {budget_sql}, 0, 120.0, 'en', ?, 'Released')"
    );
    sqlx::query(&sql)
        .bind(id)
        .bind(format!("tt{id:07}"))
        .bind(title)
        .bind(format!("Overview of {title}"))
        .bind("[\"Studio\"]")
        .bind(release_date)
        .bind(genres)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_rating(pool: &SqlitePool, movie_id: i64, rating: f64) {
    sqlx::query("INSERT INTO ratings (userId, movieId, rating, timestamp) VALUES (1, ?, ?, 0)")
        .bind(movie_id)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

/// 120 movies spread over 1994..=1996, budgets of 1,000 x id.
pub async fn seed_catalog(pool: &SqlitePool) {
    for id in 1..=120 {
        let year = 1994 + (id % 3);
        let month = 1 + (id % 12);
        let genres = if id % 2 == 0 { "Crime|Drama" } else { "Comedy" };
        insert_movie(
            pool,
            id,
            &format!("Movie {id}"),
            genres,
            &format!("{year}-{month:02}-{:02}", 1 + (id % 28)),
            &(id * 1000).to_string(),
        )
        .await;
    }
}
