use db::{DBService, MIGRATOR, models::keyword::Keyword};
use sqlx::sqlite::SqlitePoolOptions;

async fn test_db() -> DBService {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory db");
    MIGRATOR.run(&pool).await.expect("run migrations");
    DBService { pool }
}

#[tokio::test]
async fn create_assigns_ids_and_lists_newest_first() {
    let db = test_db().await;

    let first = Keyword::create(&db.pool, "home").await.unwrap();
    let second = Keyword::create(&db.pool, "errand").await.unwrap();
    let third = Keyword::create(&db.pool, "urgent").await.unwrap();
    assert!(first.id < second.id && second.id < third.id);

    let listed = Keyword::find_all(&db.pool).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["urgent", "errand", "home"]);
}

#[tokio::test]
async fn created_keyword_round_trips_through_list() {
    let db = test_db().await;

    let created = Keyword::create(&db.pool, "groceries").await.unwrap();

    let listed = Keyword::find_all(&db.pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].name, "groceries");
    assert_eq!(listed[0].created_at, created.created_at);
    assert_eq!(listed[0].updated_at, created.updated_at);
}

#[tokio::test]
async fn find_by_ids_returns_only_existing() {
    let db = test_db().await;

    let home = Keyword::create(&db.pool, "home").await.unwrap();
    let work = Keyword::create(&db.pool, "work").await.unwrap();

    let found = Keyword::find_by_ids(&db.pool, &[home.id, work.id, 999])
        .await
        .unwrap();
    let ids: Vec<i64> = found.iter().map(|k| k.id).collect();
    assert_eq!(ids, vec![home.id, work.id]);

    let none = Keyword::find_by_ids(&db.pool, &[]).await.unwrap();
    assert!(none.is_empty());
}
