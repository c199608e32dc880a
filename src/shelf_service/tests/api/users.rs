use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn only_admins_list_users() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;
    let user = app.signed_up_user().await;

    let denied = app.get("/users", Some(&user.token)).await;
    assert_eq!(denied.status().as_u16(), 403);

    let path = "/users?page=1&size=1&sort=id&order=desc";
    let response = app.get(path, Some(&admin.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], user.id);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["has_prev"], false);
}

#[tokio::test]
async fn invalid_listing_parameters_are_validation_errors() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;

    let response = app
        .get("/users?size=500&sort=password_hash", Some(&admin.token))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["size", "sort"]);
}

#[tokio::test]
async fn users_read_themselves_but_not_others() {
    let app = TestApp::new().await;
    let alice = app.signed_up_user().await;
    let bob = app.signed_up_user().await;

    let own_path = format!("/users/{}", alice.id);
    let own = app.get(&own_path, Some(&alice.token)).await;
    assert_eq!(own.status().as_u16(), 200);

    let other_path = format!("/users/{}", bob.id);
    let other = app.get(&other_path, Some(&alice.token)).await;
    assert_eq!(other.status().as_u16(), 403);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;

    let missing = app.get("/users/9999", Some(&admin.token)).await;
    assert_eq!(missing.status().as_u16(), 404);

    let malformed = app.get("/users/abc", Some(&admin.token)).await;
    assert_eq!(malformed.status().as_u16(), 400);

    let negative = app.get("/users/-1", Some(&admin.token)).await;
    assert_eq!(negative.status().as_u16(), 400);
}

#[tokio::test]
async fn users_update_their_own_name() {
    let app = TestApp::new().await;
    let user = app.signed_up_user().await;

    let response = app
        .put(
            &format!("/users/{}", user.id),
            &user.token,
            &json!({ "username": "Renamed" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["email"], user.email.as_str());
}

#[tokio::test]
async fn role_changes_need_an_admin() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;
    let user = app.signed_up_user().await;
    let path = format!("/users/{}", user.id);
    let promote = json!({ "role": "ADMIN" });

    let self_promotion = app.put(&path, &user.token, &promote).await;
    assert_eq!(self_promotion.status().as_u16(), 403);

    let promotion = app.put(&path, &admin.token, &promote).await;
    assert_eq!(promotion.status().as_u16(), 200);

    // The gate reads the stored role, so the old token now carries admin rights.
    let listing = app.get("/users", Some(&user.token)).await;
    assert_eq!(listing.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_role_is_a_validation_error() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;

    let response = app
        .put(
            &format!("/users/{}", admin.id),
            &admin.token,
            &json!({ "role": "ROOT" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn email_already_in_use_cannot_be_taken() {
    let app = TestApp::new().await;
    let alice = app.signed_up_user().await;
    let bob = app.signed_up_user().await;

    let response = app
        .put(
            &format!("/users/{}", bob.id),
            &bob.token,
            &json!({ "email": alice.email }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Email already in use");
}

#[tokio::test]
async fn deleted_accounts_lose_access_immediately() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;
    let user = app.signed_up_user().await;
    let path = format!("/users/{}", user.id);

    let denied = app.delete(&path, &user.token).await;
    assert_eq!(denied.status().as_u16(), 403);

    let response = app.delete(&path, &admin.token).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User deleted successfully");

    let profile = app.get("/profile", Some(&user.token)).await;
    assert_eq!(profile.status().as_u16(), 401);

    let login = app
        .post_login(&json!({ "email": user.email, "password": PASSWORD }))
        .await;
    assert_eq!(login.status().as_u16(), 401);

    let again = app.delete(&path, &admin.token).await;
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn email_of_a_deleted_account_can_register_again() {
    let app = TestApp::new().await;
    let admin = app.signed_up_admin().await;
    let user = app.signed_up_user().await;

    let path = format!("/users/{}", user.id);
    app.delete(&path, &admin.token).await;

    let response = app
        .post_register(&json!({
            "email": user.email,
            "username": "Returning",
            "password": PASSWORD,
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}
