mod common;

use axum::http::StatusCode;
use common::{body_json, multipart_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_and_list_recipe_books() {
    let app = TestApp::new().await;

    let resp = app.get("/api/recipe-books").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));

    let resp = app
        .post_json("/api/recipe-books", json!({ "title": "Weeknight Dinners" }))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let book = body_json(resp).await;
    assert_eq!(book["title"], "Weeknight Dinners");
    assert!(book["cover_image"].is_null());
    assert!(book["id"].as_str().is_some());
    assert_eq!(book["created_at"], book["updated_at"]);

    let resp = app.get("/api/recipe-books").await;
    let books = body_json(resp).await;
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], book["id"]);
    assert_eq!(books[0]["recipe_count"], 0);
}

#[tokio::test]
async fn list_reports_recipe_counts() {
    let app = TestApp::new().await;
    let book_id = app.create_book("Soups").await;
    app.create_book("Empty").await;

    for title in ["Minestrone", "Pho"] {
        app.create_recipe(json!({ "recipe_book_id": book_id, "title": title }))
            .await;
    }

    let books = body_json(app.get("/api/recipe-books").await).await;
    let soups = books
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == book_id.as_str())
        .unwrap();
    assert_eq!(soups["recipe_count"], 2);
    assert_eq!(books[0]["title"], "Empty");
}

#[tokio::test]
async fn create_without_title_is_rejected() {
    let app = TestApp::new().await;

    let resp = app.post_json("/api/recipe-books", json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Title is required");
    assert_eq!(body["field"], "title");

    let resp = app
        .post_json("/api/recipe-books", json!({ "title": "   " }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::new().await;

    let req = axum::http::Request::builder()
        .uri("/api/recipe-books")
        .method("POST")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\":"))
        .unwrap();
    let resp = app.request(req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].as_str().is_some());
}

#[tokio::test]
async fn show_includes_recipes_without_children() {
    let app = TestApp::new().await;
    let book_id = app.create_book("Breakfast").await;
    let recipe = app
        .create_recipe(json!({
            "recipe_book_id": book_id,
            "title": "Pancakes",
            "ingredients": [{ "quantity": "1", "unit": "cup", "ingredient_name": "flour" }]
        }))
        .await;

    let resp = app.get(&format!("/api/recipe-books/{book_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "Breakfast");

    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], recipe["id"]);
    assert_eq!(recipes[0]["title"], "Pancakes");
    assert!(recipes[0].get("ingredients").is_none());
}

#[tokio::test]
async fn show_missing_book_is_404() {
    let app = TestApp::new().await;

    let resp = app.get("/api/recipe-books/does-not-exist").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Recipe book not found");
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let book_id = app.create_book("Lunch").await;

    let resp = app
        .put_json(
            &format!("/api/recipe-books/{book_id}"),
            json!({ "title": "Light Lunches" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "Light Lunches");
    assert!(body["cover_image"].is_null());

    let resp = app
        .put_json(&format!("/api/recipe-books/{book_id}"), json!({ "title": "" }))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["title"], "Light Lunches");
}

#[tokio::test]
async fn update_missing_book_is_404() {
    let app = TestApp::new().await;

    let resp = app
        .put_json("/api/recipe-books/nope", json!({ "title": "X" }))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn multipart_create_stores_cover_image() {
    let app = TestApp::new().await;

    let body = multipart_body(
        &[("title", "Holiday Baking")],
        Some(("cover_image", "cover.PNG", b"fake image bytes")),
    );
    let resp = app.send_multipart("POST", "/api/recipe-books", body).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let book = body_json(resp).await;
    assert_eq!(book["title"], "Holiday Baking");
    let cover = book["cover_image"].as_str().unwrap();
    assert!(cover.starts_with("/uploads/recipe_books/"), "{cover}");
    assert!(cover.ends_with(".png"), "{cover}");

    let stored = cover.trim_start_matches("/uploads/");
    let contents = std::fs::read(app.upload_dir.join(stored)).unwrap();
    assert_eq!(contents, b"fake image bytes");

    let resp = app.get(cover).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn multipart_update_without_file_keeps_cover() {
    let app = TestApp::new().await;

    let body = multipart_body(&[("title", "Grill")], Some(("cover_image", "bbq.jpg", b"jpg")));
    let book = body_json(app.send_multipart("POST", "/api/recipe-books", body).await).await;
    let id = book["id"].as_str().unwrap();

    // An empty file part is what a browser sends when nothing was picked
    let body = multipart_body(&[("title", "Summer Grill")], Some(("cover_image", "", b"")));
    let resp = app
        .send_multipart("PUT", &format!("/api/recipe-books/{id}"), body)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = body_json(resp).await;
    assert_eq!(updated["title"], "Summer Grill");
    assert_eq!(updated["cover_image"], book["cover_image"]);
}

#[tokio::test]
async fn delete_removes_book_and_descendants() {
    let app = TestApp::new().await;
    let book_id = app.create_book("Temporary").await;
    let recipe = app
        .create_recipe(json!({
            "recipe_book_id": book_id,
            "title": "Toast",
            "ingredients": [{ "ingredient_name": "bread" }],
            "instructions": [{ "description": "Toast the bread" }]
        }))
        .await;
    let recipe_id = recipe["id"].as_str().unwrap();

    let resp = app.delete(&format!("/api/recipe-books/{book_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        "Recipe book deleted successfully"
    );

    let resp = app.get(&format!("/api/recipes/{recipe_id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.count("SELECT COUNT(*) FROM ingredients WHERE recipe_id = ?", recipe_id)
            .await,
        0
    );
    assert_eq!(
        app.count("SELECT COUNT(*) FROM instructions WHERE recipe_id = ?", recipe_id)
            .await,
        0
    );

    let resp = app.delete(&format!("/api/recipe-books/{book_id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
