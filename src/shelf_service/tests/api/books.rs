use serde_json::{Value, json};

use crate::helpers::TestApp;

async fn create_book(app: &TestApp, token: &str, title: &str, author: &str) -> Value {
    let response = app
        .post(
            "/books",
            token,
            &json!({ "title": title, "author": author, "desc": "A book" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn books_require_a_token() {
    let app = TestApp::new().await;

    let response = app.get("/books", None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn created_book_embeds_its_owner() {
    let app = TestApp::new().await;
    let user = app.signed_up_user().await;

    let body = create_book(&app, &user.token, "Dune", "Frank Herbert").await;

    assert_eq!(body["message"], "Book created successfully");
    assert_eq!(body["data"]["title"], "Dune");
    assert_eq!(body["data"]["desc"], "A book");
    assert_eq!(body["data"]["user_id"], user.id);
    assert_eq!(body["data"]["user"]["email"], user.email.as_str());

    let id = body["data"]["id"].as_i64().unwrap();
    let fetched = app.get(&format!("/books/{id}"), Some(&user.token)).await;
    assert_eq!(fetched.status().as_u16(), 200);
    let fetched: Value = fetched.json().await.unwrap();
    assert_eq!(fetched["data"]["author"], "Frank Herbert");
}

#[tokio::test]
async fn missing_title_and_author_are_reported() {
    let app = TestApp::new().await;
    let user = app.signed_up_user().await;

    let body = json!({ "desc": "x" });
    let response = app.post("/books", &user.token, &body).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn listing_searches_title_and_author() {
    let app = TestApp::new().await;
    let user = app.signed_up_user().await;
    create_book(&app, &user.token, "Dune", "Frank Herbert").await;
    create_book(&app, &user.token, "Emma", "Jane Austen").await;
    create_book(&app, &user.token, "Persuasion", "Jane Austen").await;

    let path = "/books?search=austen&sort=title&order=desc";
    let response = app.get(path, Some(&user.token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Persuasion", "Emma"]);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["size"], 10);
}

#[tokio::test]
async fn only_owner_or_admin_may_change_a_book() {
    let app = TestApp::new().await;
    let owner = app.signed_up_user().await;
    let stranger = app.signed_up_user().await;
    let admin = app.signed_up_admin().await;

    let book = create_book(&app, &owner.token, "Dune", "Frank Herbert").await;
    let path = format!("/books/{}", book["data"]["id"]);

    let takeover = json!({ "title": "Mine" });
    let denied = app.put(&path, &stranger.token, &takeover).await;
    assert_eq!(denied.status().as_u16(), 403);

    let changes = json!({ "title": "Dune Messiah", "author": "" });
    let updated = app.put(&path, &owner.token, &changes).await;
    assert_eq!(updated.status().as_u16(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["data"]["title"], "Dune Messiah");
    assert_eq!(updated["data"]["author"], "Frank Herbert");

    let denied = app.delete(&path, &stranger.token).await;
    assert_eq!(denied.status().as_u16(), 403);

    let deleted = app.delete(&path, &admin.token).await;
    assert_eq!(deleted.status().as_u16(), 200);

    let gone = app.get(&path, Some(&owner.token)).await;
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn overlong_title_is_rejected_on_update() {
    let app = TestApp::new().await;
    let owner = app.signed_up_user().await;
    let book = create_book(&app, &owner.token, "Dune", "Frank Herbert").await;

    let response = app
        .put(
            &format!("/books/{}", book["data"]["id"]),
            &owner.token,
            &json!({ "title": "x".repeat(201) }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
