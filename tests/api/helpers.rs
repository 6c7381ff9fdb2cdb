use std::path::{Path, PathBuf};

use pricer::{
    configuration::{ApiKeys, LlmSettings, SearchSettings, Settings, SpreadsheetSettings},
    domain::service_query::ServiceQuery,
    services::ServiceAccountKey,
};
use serde_json::{json, Value};

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_private_key.pem");
pub const CLIENT_EMAIL: &str = "pricer@pricer-test.iam.gserviceaccount.com";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn service_account_key(token_uri: String) -> ServiceAccountKey {
    ServiceAccountKey {
        client_email: CLIENT_EMAIL.to_string(),
        private_key: TEST_PRIVATE_KEY.to_string(),
        token_uri,
    }
}

/// Writes a key file whose token endpoint is `token_uri` and returns its path.
pub fn write_key_file(token_uri: &str, file_name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(file_name);
    let contents = json!({
        "type": "service_account",
        "client_email": CLIENT_EMAIL,
        "private_key": TEST_PRIVATE_KEY,
        "token_uri": token_uri,
    });
    std::fs::write(&path, contents.to_string()).expect("Failed to write key file");
    path
}

pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "msg_01",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "claude-3-5-sonnet-latest",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 4, "total_tokens": 124}
    })
}

pub fn settings(
    search_uri: &str,
    llm_uri: &str,
    sheets_uri: &str,
    credentials_path: PathBuf,
    services: Vec<ServiceQuery>,
) -> Settings {
    Settings {
        api_keys: ApiKeys {
            google_search: "search-key".to_string(),
            google_cx: "engine-id".to_string(),
            anthropic: "llm-key".to_string(),
        },
        search: SearchSettings {
            base_url: format!("{}/customsearch/v1", search_uri),
            query_suffix: "fiyat Türkiye abonelik ücreti".to_string(),
        },
        llm: LlmSettings {
            api_base: format!("{}/v1", llm_uri),
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 300,
        },
        spreadsheet: SpreadsheetSettings {
            id: "sheet-1".to_string(),
            credentials_path,
            column: "G".to_string(),
            sheet_name: None,
            base_url: sheets_uri.to_string(),
        },
        services,
    }
}
