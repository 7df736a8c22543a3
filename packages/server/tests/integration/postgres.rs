//! The same HTTP flows against the sea-orm repository. Needs a Docker daemon
//! for the PostgreSQL container, so these are opt-in:
//! `cargo test -p top5-server -- --ignored`.

use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};
use serde_json::json;

use crate::common::{TestApp, routes, top_body};

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_get_round_trip() {
    let app = TestApp::spawn_postgres().await;

    let res = app.post(routes::TOPS, &top_body("Best Films")).await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();

    let fetched = app.get(&routes::top(&id)).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body, res.body);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn title_filter_is_literal_and_case_sensitive() {
    let app = TestApp::spawn_postgres().await;
    let percent = app.create_top("100% Hits").await;
    app.create_top("100 Hits").await;
    app.create_top("100% hits").await;

    let res = app.get(&routes::tops_with_title("%25%20Hits")).await;

    let ids: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![percent.as_str()]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_keeps_likes_and_delete_cascades() {
    let app = TestApp::spawn_postgres().await;
    let id = app.create_top("Best Films").await;
    app.patch(&routes::top_like(&id)).await;
    app.patch(&routes::item_like(&id, 2)).await;

    let mut body = top_body("Renamed");
    body["id"] = json!(id);
    body["likes"] = json!(50);
    body["items"][1]["name"] = json!("Bee");

    let res = app.put(&routes::top(&id), &body).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let stored = app.get(&routes::top(&id)).await;
    assert_eq!(stored.body["title"], "Renamed");
    assert_eq!(stored.body["likes"], 1);
    assert_eq!(stored.body["items"][1]["name"], "Bee");
    assert_eq!(stored.body["items"][1]["likes"], 1);

    assert_eq!(app.delete(&routes::top(&id)).await.status, 200);
    assert_eq!(app.get(&routes::top(&id)).await.status, 404);
    assert_eq!(app.patch(&routes::item_like(&id, 2)).await.status, 400);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn concurrent_likes_are_not_lost() {
    let app = TestApp::spawn_postgres().await;
    let id = app.create_top("Best Films").await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let client = app.client.clone();
        let url = format!("http://{}{}", app.addr, routes::item_like(&id, 4));
        handles.push(tokio::spawn(async move {
            client.patch(url).send().await.unwrap().status().as_u16()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }

    let stored = app.get(&routes::top(&id)).await;
    assert_eq!(stored.body["items"][3]["likes"], 10);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn deleting_top_row_removes_its_items() {
    let app = TestApp::spawn_postgres().await;
    let id = app.create_top("Best Films").await;
    let db = Database::connect(app.db_url.as_str()).await.unwrap();

    db.execute_raw(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "DELETE FROM top WHERE id = $1",
        [id.clone().into()],
    ))
    .await
    .unwrap();

    let remaining = db
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS n FROM item WHERE top_id = $1",
            [id.clone().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(remaining.try_get::<i64>("", "n").unwrap(), 0);
    assert_eq!(app.get(&routes::top(&id)).await.status, 404);
}
