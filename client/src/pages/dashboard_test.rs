use super::*;

#[test]
fn toggle_message_names_the_wire_field() {
    assert_eq!(toggle_message(AoiFlag::IsActive), "AOI is_active updated");
    assert_eq!(toggle_message(AoiFlag::MonitoringEnabled), "AOI monitoring_enabled updated");
}

#[test]
fn failure_message_includes_action_and_cause() {
    assert_eq!(failure_message("delete AOI", &ApiError::Status(500)), "Failed to delete AOI: request failed: 500");
    assert_eq!(
        failure_message("load AOIs", &ApiError::Network("offline".to_owned())),
        "Failed to load AOIs: network error: offline"
    );
}

#[test]
fn failure_message_for_expired_session() {
    assert_eq!(failure_message("update AOI", &ApiError::Unauthorized), "Session expired. Please sign in again.");
}
