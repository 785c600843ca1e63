
use portfolio_api::entities::skill::Skill;
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_data::*;
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn create_skill_returns_201() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/api/skills", &valid_skill()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert!(body["id"].is_string());
    assert_eq!(body["name"], "Go");
    assert_eq!(body["level"], 5);
    assert_eq!(body["category"], "Backend");
}

#[actix_rt::test]
async fn level_outside_range_is_rejected() {
    let app = TestApp::spawn().await;

    for level in [0, 6, -1] {
        let response = app.post_json("/api/skills", &skill_named("Go", level, "Backend")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "level {}", level);
    }
}

#[actix_rt::test]
async fn missing_level_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/skills", &json!({ "name": "Go", "category": "Backend" }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "level");
}

#[actix_rt::test]
async fn any_non_empty_category_is_accepted() {
    let app = TestApp::spawn().await;

    let skill = app.create_skill(&skill_named("Figma", 2, "Design")).await;

    assert_eq!(skill.category, "Design");
}

#[actix_rt::test]
async fn list_skills_returns_created_records() {
    let app = TestApp::spawn().await;
    app.create_skill(&skill_named("Rust", 4, "Backend")).await;
    app.create_skill(&skill_named("React.js", 3, "Frontend")).await;

    let skills: Vec<Skill> = app
        .client
        .get(app.url("/api/skills"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Rust", "React.js"]);
}

#[actix_rt::test]
async fn update_skill_level_zero_is_ignored() {
    let app = TestApp::spawn().await;
    let skill = app.create_skill(&valid_skill()).await;

    let response = app
        .put_json(&format!("/api/skills/{}", skill.id), &json!({ "level": 0, "name": "Golang" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Skill = response.json().await.unwrap();
    assert_eq!(updated.level, 5);
    assert_eq!(updated.name, "Golang");
    assert!(updated.updated_at > skill.updated_at);
}

#[actix_rt::test]
async fn update_skill_out_of_range_is_rejected() {
    let app = TestApp::spawn().await;
    let skill = app.create_skill(&valid_skill()).await;

    let response = app
        .put_json(&format!("/api/skills/{}", skill.id), &json!({ "level": 9 }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn delete_unknown_skill_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.delete_path("/api/skills/unknown-id").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Skill not found");

    let response = app.delete_path(&format!("/api/skills/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_skill_confirms() {
    let app = TestApp::spawn().await;
    let skill = app.create_skill(&valid_skill()).await;

    let response = app.delete_path(&format!("/api/skills/{}", skill.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Skill deleted");
}
