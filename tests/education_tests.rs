mod test_utils;

use contact_backend::repositories::memory::MemoryRepo;
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn lists_seeded_education_records() {
    let store = MemoryRepo::with_education(vec![
        education_record("BSc Computer Science"),
        education_record("MSc Distributed Systems"),
    ]);
    let app = TestApp::spawn_with(store, RecordingNotifier::default()).await;

    let response = app.get("/api/education").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let degrees: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["degree"].as_str().unwrap())
        .collect();
    assert_eq!(degrees, vec!["BSc Computer Science", "MSc Distributed Systems"]);
    assert_eq!(body["data"][0]["year"], "2019");
}

#[actix_rt::test]
async fn empty_education_set_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/education").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No education records found");
}
