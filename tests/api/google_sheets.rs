use pricer::{
    domain::service_query::PriceUpdate,
    services::{
        AccessTokenSource, CellWriter, GoogleSheetsClient, ServiceAccountAuth, ServiceAccountKey,
        SpreadsheetWriter, SPREADSHEETS_SCOPE,
    },
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::{fixture, service_account_key, CLIENT_EMAIL};

async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn auth(server: &MockServer) -> ServiceAccountAuth {
    ServiceAccountAuth::new(
        service_account_key(format!("{}/token", server.uri())),
        SPREADSHEETS_SCOPE,
    )
    .unwrap()
}

#[test]
fn key_file_is_read_from_disk() {
    let key = ServiceAccountKey::from_file(&fixture("sheet-info.json")).unwrap();

    assert_eq!(key.client_email, CLIENT_EMAIL);
    assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    assert!(ServiceAccountAuth::new(key, SPREADSHEETS_SCOPE).is_ok());
}

#[tokio::test]
async fn access_token_is_reused_until_expiry() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    let auth = auth(&server);

    assert_eq!(auth.access_token().await.unwrap(), "test-token");
    assert_eq!(auth.access_token().await.unwrap(), "test-token");
}

#[tokio::test]
async fn rejected_assertion_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    assert!(auth(&server).access_token().await.is_err());
}

#[tokio::test]
async fn write_cell_puts_user_entered_value() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/G4"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "range": "G4",
            "majorDimension": "ROWS",
            "values": [[89.0]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-1",
            "updatedRange": "Sheet1!G4",
            "updatedRows": 1,
            "updatedColumns": 1,
            "updatedCells": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sheets =
        GoogleSheetsClient::new(auth(&server), &server.uri(), "sheet-1".to_string()).unwrap();

    sheets.write_cell("G4", 89.0).await.unwrap();
}

#[tokio::test]
async fn failing_row_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/G4"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/G5"))
        .and(body_json(json!({
            "range": "G5",
            "majorDimension": "ROWS",
            "values": [[199.9]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updatedCells": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let sheets =
        GoogleSheetsClient::new(auth(&server), &server.uri(), "sheet-1".to_string()).unwrap();
    let writer = SpreadsheetWriter::new(sheets, "G".to_string(), None);

    let report = writer
        .apply(&[
            PriceUpdate {
                name: "Netflix Özel".to_string(),
                price: 89.0,
                row: 4,
            },
            PriceUpdate {
                name: "Disney+ Yearly".to_string(),
                price: 199.90,
                row: 5,
            },
        ])
        .await;

    assert_eq!(report.updated, vec!["Disney+ Yearly"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Netflix Özel");
}
