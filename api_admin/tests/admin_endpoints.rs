use std::{collections::HashMap, sync::Arc};

use actix_web::{App, http::StatusCode, test, web};
use chrono::NaiveDate;
use common::env_config::Config;
use db::{
    dtos::driver::DriverCreateRequest,
    memory::MemoryAccountStore,
    models::driver::{Driver, DriverStatus},
    store::SharedStore,
};
use serde_json::{Value, json};
use uuid::Uuid;

const ADMIN_KEY: &str = "admin-test-key";

fn config(admin_key: Option<&str>) -> Arc<Config> {
    let mut vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_TOKEN_SECRET", "admin-endpoint-secret"),
        ("STORE_BACKEND", "memory"),
        ("STORAGE_BACKEND", "memory"),
    ]);
    if let Some(key) = admin_key {
        vars.insert("ADMIN_API_KEY", key);
    }
    Arc::new(Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap())
}

async fn pending_driver(store: &SharedStore) -> Driver {
    store
        .insert_driver(DriverCreateRequest {
            first_name: "Bilal".to_string(),
            last_name: "Khan".to_string(),
            phone_number: "03001234567".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            email: None,
            license_number: "LHR-22-4411".to_string(),
            vehicle_model: "Suzuki Cultus".to_string(),
            profile_picture: "memory://profile".to_string(),
            vehicle_front_picture: "memory://front".to_string(),
            license_certificate: "memory://license".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        })
        .await
        .unwrap()
}

macro_rules! admin_app {
    ($config:expr, $store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .app_data(web::Data::new($config.clone()))
                .app_data(common::http::json_config())
                .service(
                    web::scope("/api")
                        .service(api_admin::mount_admin().wrap(api_admin::middleware())),
                ),
        )
        .await
    };
}

fn status_request(id: &str, key: Option<&str>, body: Value) -> test::TestRequest {
    let mut req = test::TestRequest::patch()
        .uri(&format!("/api/admins/driver/{}/status", id))
        .set_json(body);
    if let Some(key) = key {
        req = req.insert_header(("x-api-key", key));
    }
    req
}

#[actix_web::test]
async fn approves_and_reverts_a_driver() {
    let config = config(Some(ADMIN_KEY));
    let store: SharedStore = Arc::new(MemoryAccountStore::new());
    let app = admin_app!(config, store);
    let driver = pending_driver(&store).await;
    let id = driver.id.to_string();

    let req = status_request(&id, Some(ADMIN_KEY), json!({ "status": "approved" })).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Driver status updated");
    assert_eq!(body["driver"]["status"], "approved");
    assert_eq!(
        store
            .get_driver_by_id(driver.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        DriverStatus::Approved
    );

    let req = status_request(&id, Some(ADMIN_KEY), json!({ "status": "pending" })).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["driver"]["status"], "pending");
}

#[actix_web::test]
async fn wrong_or_missing_key_is_unauthorized() {
    let config = config(Some(ADMIN_KEY));
    let store: SharedStore = Arc::new(MemoryAccountStore::new());
    let app = admin_app!(config, store);
    let driver = pending_driver(&store).await;
    let id = driver.id.to_string();

    for key in [None, Some("not-the-key"), Some("")] {
        let req = status_request(&id, key, json!({ "status": "approved" })).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
    assert_eq!(
        store
            .get_driver_by_id(driver.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        DriverStatus::Pending
    );
}

#[actix_web::test]
async fn admin_routes_are_closed_without_a_configured_key() {
    let config = config(None);
    let store: SharedStore = Arc::new(MemoryAccountStore::new());
    let app = admin_app!(config, store);
    let driver = pending_driver(&store).await;

    let req = status_request(
        &driver.id.to_string(),
        Some(ADMIN_KEY),
        json!({ "status": "approved" }),
    )
    .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid admin key");
}

#[actix_web::test]
async fn unknown_driver_and_bad_bodies() {
    let config = config(Some(ADMIN_KEY));
    let store: SharedStore = Arc::new(MemoryAccountStore::new());
    let app = admin_app!(config, store);
    let driver = pending_driver(&store).await;

    let unknown = Uuid::new_v4().to_string();
    for id in [unknown.as_str(), "not-a-uuid"] {
        let req = status_request(id, Some(ADMIN_KEY), json!({ "status": "approved" })).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Driver not found");
    }

    let id = driver.id.to_string();
    let req = status_request(&id, Some(ADMIN_KEY), json!({})).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Details missing: status");

    let req = status_request(&id, Some(ADMIN_KEY), json!({ "status": "banned" })).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
