mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_with_empty_object_is_request_body_error() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(server.token(&["post:drink"]))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Request body error");
    assert_eq!(server.drink_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(server.token(&["post:drink"]))
        .header("Content-Type", "application/json")
        .body(r#"{"title": "Water""#)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], 400);
    assert_eq!(body["message"], "Bad request");
    Ok(())
}

#[tokio::test]
async fn created_drink_appears_in_detail() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(server.token(&["post:drink"]))
        .json(&json!({"title": "Water", "recipe": "none"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    let drinks = body["drinks"].as_array().expect("drinks array");
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0]["title"], "Water");
    assert_eq!(drinks[0]["recipe"], "none");
    let id = drinks[0]["id"].clone();

    let res = server
        .client
        .get(server.url("/drinks-detail"))
        .bearer_auth(server.token(&["get:drinks-detail"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let listed = body["drinks"].as_array().expect("drinks array");
    assert!(listed.iter().any(|d| d["id"] == id && d["title"] == "Water"));
    Ok(())
}

#[tokio::test]
async fn detail_keeps_full_recipe() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("Latte", common::LATTE_RECIPE).await;

    let res = server
        .client
        .get(server.url("/drinks-detail"))
        .bearer_auth(server.token(&["get:drinks-detail"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "espresso");
    assert_eq!(body["drinks"][0]["recipe"][1]["parts"], 3);
    Ok(())
}

#[tokio::test]
async fn structured_recipe_round_trips_through_create() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let recipe = json!([{"name": "matcha", "color": "green", "parts": 2}]);

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(server.token(&["post:drink"]))
        .json(&json!({"title": "Matcha", "recipe": recipe.clone()}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["recipe"], recipe);
    Ok(())
}

#[tokio::test]
async fn create_missing_recipe_or_duplicate_title_is_unprocessable() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed("Water", "none").await;
    let token = server.token(&["post:drink"]);

    for payload in [json!({"title": "Tea"}), json!({"title": "Water", "recipe": "none"})] {
        let res = server
            .client
            .post(server.url("/drinks"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "payload {}", payload);

        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    assert_eq!(server.drink_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn patch_unknown_drink_is_404() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .patch(server.url("/drinks/999"))
        .bearer_auth(server.token(&["patch:drink"]))
        .json(&json!({"title": "New"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "The drink(s) could not be found");
    Ok(())
}

#[tokio::test]
async fn patch_title_leaves_recipe_unchanged() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let drink = server.seed("Latte", common::LATTE_RECIPE).await;

    let res = server
        .client
        .patch(server.url(&format!("/drinks/{}", drink.id)))
        .bearer_auth(server.token(&["patch:drink"]))
        .json(&json!({"title": "New"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["title"], "New");
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "espresso");

    let stored = server.store_drink(drink.id).await;
    assert_eq!(stored.title, "New");
    assert_eq!(stored.recipe, common::LATTE_RECIPE);
    Ok(())
}

#[tokio::test]
async fn patch_recipe_leaves_title_unchanged() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let drink = server.seed("Latte", common::LATTE_RECIPE).await;
    let recipe = json!([{"name": "oat milk", "color": "beige", "parts": 3}]);

    let res = server
        .client
        .patch(server.url(&format!("/drinks/{}", drink.id)))
        .bearer_auth(server.token(&["patch:drink"]))
        .json(&json!({"recipe": recipe.clone()}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["title"], "Latte");
    assert_eq!(body["drinks"][0]["recipe"], recipe);

    let stored = server.store_drink(drink.id).await;
    assert_eq!(stored.title, "Latte");
    Ok(())
}

#[tokio::test]
async fn create_with_null_recipe_succeeds() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/drinks"))
        .bearer_auth(server.token(&["post:drink"]))
        .json(&json!({"title": "Ghost", "recipe": null}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["title"], "Ghost");
    assert_eq!(body["drinks"][0]["recipe"], Value::Null);
    assert_eq!(server.drink_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn patch_with_unrecognized_keys_is_request_body_error() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let drink = server.seed("Latte", common::LATTE_RECIPE).await;

    let res = server
        .client
        .patch(server.url(&format!("/drinks/{}", drink.id)))
        .bearer_auth(server.token(&["patch:drink"]))
        .json(&json!({"name": "Mocha"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Request body error");
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .delete(server.url("/drinks/latte"))
        .bearer_auth(server.token(&["delete:drink"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "not found");
    Ok(())
}

#[tokio::test]
async fn delete_removes_drink_from_listing() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let latte = server.seed("Latte", common::LATTE_RECIPE).await;
    let water = server.seed("Water", "none").await;
    let token = server.token(&["delete:drink"]);

    let res = server
        .client
        .delete(server.url(&format!("/drinks/{}", latte.id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"success": true, "delete": latte.id}));

    let res = server.client.get(server.url("/drinks")).send().await?;
    let body = res.json::<Value>().await?;
    let ids: Vec<i64> = body["drinks"]
        .as_array()
        .expect("drinks array")
        .iter()
        .filter_map(|d| d["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![water.id as i64]);

    // Second delete of the same id
    let res = server
        .client
        .delete(server.url(&format!("/drinks/{}", latte.id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
