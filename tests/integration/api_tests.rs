//! API integration tests against a running server
//!
//! Start the server with an administrator bootstrapped as admin/admin
//! (LOCALLIB_AUTH__ADMIN_USERNAME=admin LOCALLIB_AUTH__ADMIN_PASSWORD=admin), then run:
//! cargo test -- --ignored

use chrono::{Duration, Local, NaiveDate};
use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn get_json(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(client: &Client, token: &str, path: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header")
        .to_string()
}

/// Create an author and return its id
async fn create_author(client: &Client, token: &str, last_name: &str) -> i64 {
    let response = post_json(
        client,
        token,
        "/author/create/",
        json!({
            "first_name": "Test",
            "last_name": last_name,
            "date_of_birth": "1929-10-21"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = location(&response);
    location
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .expect("Author id in location")
}

/// Create a book with one copy and return (book id, instance id)
async fn create_book_with_copy(client: &Client, token: &str, author_id: i64) -> (i64, Uuid) {
    let response = post_json(
        client,
        token,
        "/books/",
        json!({
            "title": "How to Catalog Everything",
            "author_id": author_id,
            "summary": "A test book",
            "isbn": "9780000000002"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let book: Value = response.json().await.expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("Book id");

    let response = post_json(
        client,
        token,
        &format!("/book/{}/instances/", book_id),
        json!({ "imprint": "Test Press, 2024" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let instance: Value = response.json().await.expect("Failed to parse instance");
    assert_eq!(instance["status"], "maintenance");
    let instance_id = instance["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("Instance id");

    (book_id, instance_id)
}

/// Put a copy on loan to the admin user
async fn lend(client: &Client, token: &str, instance_id: Uuid, due_back: NaiveDate) {
    let (_, me) = get_json(client, token, "/auth/me").await;
    let response = client
        .put(format!("{}/instances/{}", BASE_URL, instance_id))
        .bearer_auth(token)
        .json(&json!({
            "status": "on_loan",
            "borrower_id": me["id"],
            "due_back": due_back
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let response = client()
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let response = client()
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_home_counts_visits_per_session() {
    let client = client();
    let token = get_auth_token(&client).await;

    let (status, first) = get_json(&client, &token, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["num_visits"], 0);

    let (_, second) = get_json(&client, &token, "/").await;
    assert_eq!(second["num_visits"], 1);

    // A new login is a new session
    let other = get_auth_token(&client).await;
    let (_, fresh) = get_json(&client, &other, "/").await;
    assert_eq!(fresh["num_visits"], 0);
}

#[tokio::test]
#[ignore]
async fn test_book_list_pages() {
    let client = client();
    let token = get_auth_token(&client).await;

    let (status, body) = get_json(&client, &token, "/books/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["some_data"], "This is just some data");

    let (status, _) = get_json(&client, &token, "/books/?page=0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&client, &token, "/books/?page=100000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_author_lifecycle() {
    let client = client();
    let token = get_auth_token(&client).await;

    let (status, initial) = get_json(&client, &token, "/author/create/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["date_of_death"], "2018-05-01");

    let author_id = create_author(&client, &token, "Lifecycle").await;

    let response = post_json(
        &client,
        &token,
        &format!("/author/{}/update/", author_id),
        json!({ "first_name": "Updated", "last_name": "Lifecycle" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/api/v1/author/{}", author_id));

    let (_, author) = get_json(&client, &token, &format!("/author/{}", author_id)).await;
    assert_eq!(author["first_name"], "Updated");
    assert!(author["date_of_birth"].is_null());

    let response = post_json(
        &client,
        &token,
        &format!("/author/{}/update/", author_id),
        json!({ "first_name": "", "last_name": "Lifecycle" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_keeps_books() {
    let client = client();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, "Deleted").await;
    let (book_id, _) = create_book_with_copy(&client, &token, author_id).await;

    let response = client
        .post(format!("{}/author/{}/delete/", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/authors/");

    let (status, _) = get_json(&client, &token, &format!("/author/{}", author_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, book) = get_json(&client, &token, &format!("/book/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book["author"].is_null());
    assert!(book["author_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_renewal() {
    let client = client();
    let token = get_auth_token(&client).await;
    let today = Local::now().date_naive();

    let author_id = create_author(&client, &token, "Renewal").await;
    let (_, instance_id) = create_book_with_copy(&client, &token, author_id).await;
    lend(&client, &token, instance_id, today + Duration::days(3)).await;

    let path = format!("/book/{}/renew/", instance_id);

    let (status, form) = get_json(&client, &token, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        form["proposed_renewal_date"],
        json!(today + Duration::weeks(3))
    );

    let response = post_json(
        &client,
        &token,
        &path,
        json!({ "renewal_date": today + Duration::weeks(5) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let new_date = today + Duration::days(10);
    let response = post_json(&client, &token, &path, json!({ "renewal_date": new_date })).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/borrowed/");

    let (_, instance) = get_json(&client, &token, &format!("/instances/{}", instance_id)).await;
    assert_eq!(instance["due_back"], json!(new_date));

    let response = post_json(
        &client,
        &token,
        &format!("/book/{}/renew/", Uuid::new_v4()),
        json!({ "renewal_date": new_date }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_borrowed_lists_order_by_due_date() {
    let client = client();
    let token = get_auth_token(&client).await;
    let today = Local::now().date_naive();

    let author_id = create_author(&client, &token, "Borrowed").await;
    let (_, soon) = create_book_with_copy(&client, &token, author_id).await;
    let (_, late) = create_book_with_copy(&client, &token, author_id).await;
    lend(&client, &token, soon, today - Duration::days(2)).await;
    lend(&client, &token, late, today + Duration::days(20)).await;

    let (status, mine) = get_json(&client, &token, "/mybooks/").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = mine["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|i| i["due_back"].as_str())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let overdue = mine["items"]
        .as_array()
        .expect("items")
        .iter()
        .find(|i| i["id"] == json!(soon))
        .map(|i| i["is_overdue"].clone());
    if let Some(flag) = overdue {
        assert_eq!(flag, true);
    }

    let (status, all) = get_json(&client, &token, "/borrowed/").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = all["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|i| i["due_back"].as_str())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}
