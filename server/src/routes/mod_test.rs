use super::*;

#[tokio::test]
async fn healthz_reports_ok() {
    let Json(health) = healthz().await;
    let body = serde_json::to_value(&health).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
