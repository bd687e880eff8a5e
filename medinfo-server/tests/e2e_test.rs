//! End-to-end integration test
//!
//! Drives the public catalog and the session-gated admin API over HTTP:
//! login -> create content -> public detail page -> upload -> logout

use medinfo_server::{build_router, config::ServerConfig, AppState};
use medinfo_store::SqliteStore;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct horse";
const MAX_IMAGE_BYTES: usize = 1024;

/// Start a test server on a random port, returns (base_url, _temp_dir)
async fn start_test_server() -> (String, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let mut config = ServerConfig::default();
    config.storage.data_dir = temp_dir.path().to_path_buf();
    config.upload.max_bytes = MAX_IMAGE_BYTES;

    let store = SqliteStore::open(config.database_path()).unwrap();
    store.create_admin("Admin", ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    store.insert_body_part("Heart", "heart", "❤️").unwrap();
    store.insert_body_part("Lungs", "lungs", "🫁").unwrap();

    let state = Arc::new(AppState::new(store, config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (format!("http://{}", addr), temp_dir)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().unwrap()
}

async fn login(client: &reqwest::Client, base_url: &str) {
    let resp = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

async fn heart_id(client: &reqwest::Client, base_url: &str) -> i64 {
    let body: Value = client
        .get(format!("{}/api/body-parts", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["slug"] == "heart")
        .unwrap()["id"]
        .as_i64()
        .unwrap()
}

/// Creates Arrhythmia with two medicines, returns the illness id
async fn create_arrhythmia(client: &reqwest::Client, base_url: &str) -> i64 {
    let heart = heart_id(client, base_url).await;
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .json(&json!({
            "body_part_id": heart,
            "name": "Arrhythmia",
            "description": "Irregular heartbeat",
            "symptoms": "palpitations|dizziness",
            "care_tips": "reduce caffeine",
            "severity": "moderate",
            "medicines": [
                {"name": "Beta Blocker", "dosage": "50mg daily", "is_otc": 0},
                {"name": "Aspirin", "description": "Thins blood", "is_otc": 1}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (base_url, _dir) = start_test_server().await;
    let resp = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_admin_requires_session() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();

    for path in ["/admin/stats", "/admin/illnesses", "/admin/messages"] {
        let resp = client.get(format!("{}{}", base_url, path)).send().await.unwrap();
        assert_eq!(resp.status(), 401, "{}", path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized");
    }

    let resp = client
        .post(format!("{}/admin/tip", base_url))
        .json(&json!({"title": "t", "description": "d"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // check answers 200 either way
    let resp = client.get(format!("{}/admin/check", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_check_logout() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();

    let resp = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");

    let resp = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let set_cookie = resp.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("medinfo_session="));
    assert!(set_cookie.contains("HttpOnly"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Admin");

    let body: Value = client
        .get(format!("{}/admin/check", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);

    let resp = client.get(format!("{}/admin/stats", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.post(format!("{}/admin/logout", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.get(format!("{}/admin/stats", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_logout_revokes_token_server_side() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();

    let resp = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await
        .unwrap();
    let set_cookie = resp.headers()["set-cookie"].to_str().unwrap().to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    client.post(format!("{}/admin/logout", base_url)).send().await.unwrap();

    // replaying the old cookie no longer works
    let resp = reqwest::Client::new()
        .get(format!("{}/admin/stats", base_url))
        .header("cookie", cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_catalog_flow() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;

    let illness_id = create_arrhythmia(&client, &base_url).await;

    let heart = heart_id(&client, &base_url).await;
    let resp = client
        .post(format!("{}/admin/doctor", base_url))
        .json(&json!({
            "body_part_id": heart,
            "name": "Dr. Rao",
            "specialization": "Cardiology",
            "experience_years": 12
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{}/api/body-part/heart", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["part"]["name"], "Heart");
    assert_eq!(data["doctors"][0]["name"], "Dr. Rao");

    let illnesses = data["illnesses"].as_array().unwrap();
    assert_eq!(illnesses.len(), 1);
    let illness = &illnesses[0];
    assert_eq!(illness["id"], illness_id);
    assert_eq!(illness["symptoms_list"], json!(["palpitations", "dizziness"]));
    assert_eq!(illness["care_list"], json!(["reduce caffeine"]));

    let medicines = illness["medicines"].as_array().unwrap();
    assert_eq!(medicines.len(), 2);
    assert_eq!(medicines[0]["name"], "Beta Blocker");
    assert_eq!(medicines[0]["is_otc"], false);
    assert_eq!(medicines[0]["dosage"], "50mg daily");
    assert_eq!(medicines[0]["description"], "");
    assert_eq!(medicines[1]["name"], "Aspirin");
    assert_eq!(medicines[1]["is_otc"], true);
    assert_eq!(medicines[1]["description"], "Thins blood");

    // lungs has nothing yet
    let body: Value = client
        .get(format!("{}/api/body-part/lungs", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["illnesses"].as_array().unwrap().is_empty());

    // unknown slug
    let resp = client
        .get(format!("{}/api/body-part/spleen", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Body part not found");
}

#[tokio::test]
async fn test_soft_delete_hides_illness() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;

    let illness_id = create_arrhythmia(&client, &base_url).await;
    let heart = heart_id(&client, &base_url).await;

    let resp = client
        .put(format!("{}/admin/illness/{}", base_url, illness_id))
        .json(&json!({
            "body_part_id": heart,
            "name": "Arrhythmia",
            "is_active": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = client
        .get(format!("{}/api/body-part/heart", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["illnesses"].as_array().unwrap().is_empty());

    let body: Value = client
        .get(format!("{}/admin/illnesses", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["is_active"], false);
    assert_eq!(listed[0]["body_part_name"], "Heart");

    let body: Value = client
        .get(format!("{}/admin/stats", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["illnesses"], 0);
    assert_eq!(body["data"]["medicines"], 2);
}

#[tokio::test]
async fn test_illness_create_is_atomic() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;
    let heart = heart_id(&client, &base_url).await;

    // unknown body part
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .json(&json!({"body_part_id": 999, "name": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // a bad medicine rejects the whole request
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .json(&json!({
            "body_part_id": heart,
            "name": "Angina",
            "medicines": [{"name": "Nitroglycerin"}, {"name": "  "}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = client
        .get(format!("{}/admin/illnesses", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    // malformed JSON is an enveloped 4xx
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_contact_and_messages() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();

    let resp = client
        .post(format!("{}/api/contact", base_url))
        .json(&json!({"name": "  ", "email": "a@example.com", "message": "hi"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "All fields are required");

    let resp = client
        .post(format!("{}/api/contact", base_url))
        .json(&json!({"name": " Ana ", "email": "ana@example.com", "message": "More tips please"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Message sent successfully!");

    login(&client, &base_url).await;
    let body: Value = client
        .get(format!("{}/admin/messages", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let message = &body["data"][0];
    assert_eq!(message["name"], "Ana");
    assert_eq!(message["is_read"], false);
    let id = message["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{}/admin/message/{}/read", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let resp = client
        .post(format!("{}/admin/message/{}/read", base_url, id + 100))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = client
        .get(format!("{}/admin/stats", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["messages"], 0);
}

#[tokio::test]
async fn test_health_tips_grouped() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;

    for (category, title, sort_order, is_active) in [
        ("nutrition", "Eat greens", 2, 1),
        ("nutrition", "Drink water", 1, 1),
        ("home_care", "Rest", 0, 1),
        ("home_care", "Retired tip", 0, 0),
    ] {
        let resp = client
            .post(format!("{}/admin/tip", base_url))
            .json(&json!({
                "category": category,
                "title": title,
                "description": format!("{} often", title),
                "sort_order": sort_order,
                "is_active": is_active
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let body: Value = client
        .get(format!("{}/api/health-tips", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let groups = body["data"].as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["nutrition"][0]["title"], "Drink water");
    assert_eq!(groups["nutrition"][1]["title"], "Eat greens");
    assert_eq!(groups["home_care"].as_array().unwrap().len(), 1);

    let body: Value = client
        .get(format!("{}/admin/tips", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_medicine_image_upload() {
    let (base_url, dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;

    let illness_id = create_arrhythmia(&client, &base_url).await;
    let resp = client
        .post(format!("{}/admin/medicine", base_url))
        .json(&json!({"illness_id": illness_id, "name": "Digoxin", "is_otc": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let medicine_id = body["data"]["id"].as_i64().unwrap();

    let upload = |name: &'static str, bytes: Vec<u8>| {
        let form = Form::new().part("image", Part::bytes(bytes).file_name(name));
        client
            .post(format!("{}/admin/medicine/upload-image/{}", base_url, medicine_id))
            .multipart(form)
            .send()
    };

    // disallowed extension
    let resp = upload("notes.txt", b"hello".to_vec()).await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid file type");

    // over the configured limit
    let resp = upload("big.png", vec![0u8; MAX_IMAGE_BYTES + 1]).await.unwrap();
    assert_eq!(resp.status(), 413);

    // missing field
    let resp = client
        .post(format!("{}/admin/medicine/upload-image/{}", base_url, medicine_id))
        .multipart(Form::new().text("caption", "no file"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "No file uploaded");

    // accepted
    let resp = upload("Pill.PNG", vec![7u8; 64]).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let filename = body["data"]["filename"].as_str().unwrap().to_string();
    assert!(filename.starts_with(&format!("med_{}_", medicine_id)));
    assert!(filename.ends_with(".png"));

    let stored = dir.path().join("uploads").join(&filename);
    assert!(stored.exists());

    let resp = client
        .get(format!("{}/uploads/{}", base_url, filename))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.unwrap().len(), 64);

    let body: Value = client
        .get(format!("{}/admin/medicines", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == medicine_id)
        .unwrap()
        .clone();
    assert_eq!(listed["image_path"], filename);
    assert_eq!(listed["illness_name"], "Arrhythmia");

    // unknown medicine
    let form = Form::new().part("image", Part::bytes(vec![1u8; 8]).file_name("a.png"));
    let resp = client
        .post(format!("{}/admin/medicine/upload-image/{}", base_url, medicine_id + 100))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // deleting the medicine removes its image
    let resp = client
        .delete(format!("{}/admin/medicine/{}", base_url, medicine_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(!stored.exists());
}

#[tokio::test]
async fn test_doctor_crud_and_lookups() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;

    let resp = client
        .post(format!("{}/admin/doctor", base_url))
        .json(&json!({"name": "Dr. Abe", "specialization": "General Practice"}))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{}/admin/doctor/{}", base_url, id))
        .json(&json!({"name": "Dr. Abe", "specialization": "Family Medicine", "hospital": "City"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = client
        .get(format!("{}/admin/doctors", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"][0]["specialization"], "Family Medicine");
    assert!(body["data"][0]["body_part_name"].is_null());

    let resp = client
        .delete(format!("{}/admin/doctor/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let resp = client
        .delete(format!("{}/admin/doctor/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // lookups used by the admin forms
    let body: Value = client
        .get(format!("{}/admin/body-parts", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Heart", "Lungs"]);

    create_arrhythmia(&client, &base_url).await;
    let body: Value = client
        .get(format!("{}/admin/illnesses-list", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"], json!([{"id": 1, "name": "Arrhythmia"}]));
}

#[tokio::test]
async fn test_form_style_string_ids() {
    let (base_url, _dir) = start_test_server().await;
    let client = client();
    login(&client, &base_url).await;
    let heart = heart_id(&client, &base_url).await.to_string();

    // <select> values arrive as strings, checkboxes as "1"/"0"
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .json(&json!({
            "body_part_id": heart,
            "name": "Angina",
            "is_active": "1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let illness_id = body["data"]["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{}/admin/medicine", base_url))
        .json(&json!({
            "illness_id": illness_id.to_string(),
            "name": "Nitroglycerin",
            "is_otc": "0"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    for scope in [json!(heart), json!("")] {
        let resp = client
            .post(format!("{}/admin/doctor", base_url))
            .json(&json!({
                "body_part_id": scope,
                "name": "Dr. Rao",
                "specialization": "Cardiology"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let body: Value = client
        .get(format!("{}/api/body-part/heart", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let illness = &body["data"]["illnesses"][0];
    assert_eq!(illness["name"], "Angina");
    assert_eq!(illness["medicines"][0]["name"], "Nitroglycerin");
    assert_eq!(illness["medicines"][0]["is_otc"], false);
    assert_eq!(body["data"]["doctors"].as_array().unwrap().len(), 2);

    let body: Value = client
        .get(format!("{}/admin/doctors", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scopes: Vec<&Value> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| &d["body_part_name"])
        .collect();
    assert!(scopes.contains(&&json!("Heart")));
    assert!(scopes.contains(&&Value::Null));

    // a non-numeric id is still an enveloped client error
    let resp = client
        .post(format!("{}/admin/illness", base_url))
        .json(&json!({"body_part_id": "heart", "name": "Bad"}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}
