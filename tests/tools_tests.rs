//! Tool registry tests against a mocked API.

use serde_json::{json, Value};
use smartsheet_tools::config::Config;
use smartsheet_tools::tools::ToolRegistry;
use smartsheet_tools::{Client, RetryPolicy};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer, allow_delete: bool) -> ToolRegistry {
    let client = Client::builder()
        .base_url(server.uri())
        .access_token("test-token")
        .retry_policy(RetryPolicy::none())
        .build()
        .unwrap();
    ToolRegistry::new(client, allow_delete)
}

#[tokio::test]
async fn test_get_webhook_renders_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Changes",
            "enabled": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call("get_webhook", json!({ "webhookId": 42 }))
        .await;

    assert!(!output.is_error, "{}", output.text);
    let rendered: Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(rendered["name"], "Changes");
    assert_eq!(rendered["enabled"], true);
}

#[tokio::test]
async fn test_update_column_flattens_arguments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/sheets/1/columns/2"))
        .and(body_json(json!({ "title": "Owner", "type": "CONTACT_LIST" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": { "id": 2, "title": "Owner", "type": "CONTACT_LIST" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "update_column",
            json!({ "sheetId": 1, "columnId": 2, "title": "Owner", "type": "CONTACT_LIST" }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert!(output.text.contains("CONTACT_LIST"));
}

#[tokio::test]
async fn test_favorite_shortcut_uses_fixed_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/favorites"))
        .and(body_json(json!([{ "type": "sight", "objectId": 9 }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": [{ "type": "sight", "objectId": 9 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call("add_dashboard_to_favorites", json!({ "objectId": 9 }))
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_delete_tool_gated_by_allow_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/groups/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let refused = registry(&mock_server, false)
        .call("delete_group", json!({ "groupId": 5 }))
        .await;
    assert!(refused.is_error);
    assert!(refused.text.contains("disabled"));

    let allowed = registry(&mock_server, true)
        .call("delete_group", json!({ "groupId": 5 }))
        .await;
    assert!(!allowed.is_error, "{}", allowed.text);
    assert_eq!(allowed.text, "Successfully deleted group 5");
}

#[tokio::test]
async fn test_remove_favorites_tool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/favorites/folder"))
        .and(query_param("objectIds", "3,4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, true)
        .call("remove_favorites", json!({ "type": "folder", "objectIds": [3, 4] }))
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(output.text, "Successfully removed 2 folder item(s) from favorites");
}

#[tokio::test]
async fn test_api_failure_becomes_error_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": 1006,
            "message": "Not Found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call("get_group_members", json!({ "groupId": 404 }))
        .await;

    assert!(output.is_error);
    assert_eq!(output.text, "Failed to run get_group_members: Not Found");
}

#[tokio::test]
async fn test_events_by_action_tool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("since", "2024-05-01T00:00:00Z"))
        .and(query_param("maxCount", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "eventId": "1", "action": "DELETE", "objectType": "SHEET" },
                { "eventId": "2", "action": "CREATE", "objectType": "SHEET" }
            ],
            "moreAvailable": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "get_events_by_action",
            json!({ "action": "DELETE", "since": "2024-05-01T00:00:00Z", "maxCount": 50 }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    let events: Vec<Value> = serde_json::from_str(&output.text).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["eventId"], "1");
}

#[tokio::test]
async fn test_registry_from_config_reads_delete_gate() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let config = Config::from_lookup(|key| match key {
        "SMARTSHEET_API_KEY" => Some("test-token".to_string()),
        "SMARTSHEET_ENDPOINT" => Some(uri.clone()),
        "ALLOW_DELETE_TOOLS" => Some("true".to_string()),
        _ => None,
    })
    .unwrap();

    let registry = ToolRegistry::from_config(&config).unwrap();
    assert!(registry.allows_delete());
    assert!(registry.definition("delete_column").is_some());
}

#[tokio::test]
async fn test_share_sheet_tool_sends_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sheets/1/shares"))
        .and(query_param("sendEmail", "true"))
        .and(body_json(json!([
            { "email": "jane@example.com", "accessLevel": "VIEWER", "subject": "Plan" }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": [{ "id": "AAA", "type": "USER", "accessLevel": "VIEWER" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "share_sheet",
            json!({
                "sheetId": 1,
                "shares": [{ "email": "jane@example.com", "accessLevel": "VIEWER", "subject": "Plan" }]
            }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert!(output.text.contains("AAA"));
}

#[tokio::test]
async fn test_delete_share_tool_gated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/workspaces/2/shares/BBB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let args = json!({ "workspaceId": 2, "shareId": "BBB" });

    let refused = registry(&mock_server, false)
        .call("delete_workspace_share", args.clone())
        .await;
    assert!(refused.is_error);

    let allowed = registry(&mock_server, true)
        .call("delete_workspace_share", args)
        .await;
    assert_eq!(allowed.text, "Successfully removed share BBB");
}

#[tokio::test]
async fn test_bulk_add_rows_fills_missing_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sheets/1/rows"))
        .and(body_json(json!([
            { "toBottom": true, "cells": [{ "columnId": 7, "value": null }, { "columnId": 8, "value": 3 }] }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": [{ "id": 99 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "bulk_add_rows",
            json!({
                "sheetId": 1,
                "rows": [{ "toBottom": true, "cells": [{ "columnId": 7 }, { "columnId": 8, "value": 3 }] }]
            }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_copy_rows_drops_false_positions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sheets/1/rows/copy"))
        .and(body_json(json!({ "rowIds": [10], "to": { "sheetId": 2 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "destinationSheetId": 2,
            "rowMappings": [{ "from": 10, "to": 30 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "copy_rows",
            json!({ "sourceSheetId": 1, "rowIds": [10], "destinationSheetId": 2, "toTop": false }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert!(output.text.contains("rowMappings"));
}

#[tokio::test]
async fn test_move_sheet_requires_destination() {
    let mock_server = MockServer::start().await;

    let output = registry(&mock_server, false)
        .call("move_sheet", json!({ "sheetId": 1 }))
        .await;

    assert!(output.is_error);
    assert!(output.text.contains("folderId or workspaceId"));
}

#[tokio::test]
async fn test_missing_summary_field_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sheets/1/summary/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 100, "title": "Status" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call("get_summary_field", json!({ "sheetId": 1, "fieldId": 5 }))
        .await;

    assert!(output.is_error);
    assert_eq!(
        output.text,
        "Failed to run get_summary_field: Summary field 5 not found"
    );
}

#[tokio::test]
async fn test_sheet_in_folder_from_template_tool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/folders/3/sheets"))
        .and(body_json(json!({ "name": "Launch", "fromId": 5, "include": ["data", "forms"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": { "id": 77, "name": "Launch" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "create_sheet_in_folder_from_template",
            json!({ "folderId": 3, "templateId": 5, "sheetName": "Launch", "includes": ["data", "forms"] }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_create_cell_link_tool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/sheets/1/rows"))
        .and(body_json(json!([{
            "id": 10,
            "cells": [{
                "columnId": 20,
                "value": null,
                "linkInFromCell": { "sheetId": 2, "rowId": 11, "columnId": 21 }
            }]
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": [{ "id": 10 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call(
            "create_cell_link",
            json!({
                "sheetId": 1, "rowId": 10, "columnId": 20,
                "sourceSheetId": 2, "sourceRowId": 11, "sourceColumnId": 21
            }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
}

#[tokio::test]
async fn test_export_csv_tool_returns_csv_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sheets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Task,Owner\nPlan,Jane\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = registry(&mock_server, false)
        .call("export_sheet_to_csv", json!({ "sheetId": 1 }))
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(output.text, "Task,Owner\nPlan,Jane\n");
}

#[tokio::test]
async fn test_report_and_attachment_tools() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/4"))
        .and(query_param("include", "attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "name": "Weekly" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sheets/1/rows/2/attachments"))
        .and(body_json(json!({ "name": "Doc", "url": "https://example.com/doc", "attachmentType": "GOOGLE_DRIVE" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0,
            "result": { "id": 32, "name": "Doc" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/sheets/1/attachments/32"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "SUCCESS",
            "resultCode": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = registry(&mock_server, true);

    let report = registry
        .call("get_report", json!({ "reportId": 4, "include": "attachments" }))
        .await;
    assert!(report.text.contains("Weekly"), "{}", report.text);

    let attached = registry
        .call(
            "attach_url_to_row",
            json!({
                "sheetId": 1, "rowId": 2, "name": "Doc",
                "url": "https://example.com/doc", "attachmentType": "GOOGLE_DRIVE"
            }),
        )
        .await;
    assert!(!attached.is_error, "{}", attached.text);

    let deleted = registry
        .call("delete_attachment", json!({ "sheetId": 1, "attachmentId": 32 }))
        .await;
    assert_eq!(deleted.text, "Successfully deleted attachment 32 from sheet 1");
}
