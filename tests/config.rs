use std::io::Write;

use bricklink_store::config::Settings;
use bricklink_store::{HttpClient, StoreClient};
use rquest_util::Emulation;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_api_settings_from_file() {
    let file = write_config(
        r#"
api:
  base_url: "https://store.example.com/api/store/v1/"
  headers:
    x-store-token: "secret"
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.api.base_url, "https://store.example.com/api/store/v1/");
    assert_eq!(
        settings.api.headers.get("x-store-token").map(String::as_str),
        Some("secret")
    );
}

#[test]
fn headers_are_optional() {
    let file = write_config("api:\n  base_url: \"https://store.example.com\"\n");
    let settings = Settings::from_file(file.path()).unwrap();
    assert!(settings.api.headers.is_empty());
}

#[test]
fn missing_base_url_is_an_error() {
    let file = write_config("api:\n  headers: {}\n");
    assert!(Settings::from_file(file.path()).is_err());
}

#[test]
fn http_client_joins_base_url_and_uri() {
    let file = write_config("api:\n  base_url: \"https://store.example.com/v1/\"\n");
    let settings = Settings::from_file(file.path()).unwrap();

    let client = HttpClient::new(&settings, Emulation::Chrome133).unwrap();
    assert_eq!(client.base_url(), "https://store.example.com/v1");
    assert_eq!(client.url("/inventories/5"), "https://store.example.com/v1/inventories/5");

    assert!(StoreClient::from_settings(&settings).is_ok());
}

#[test]
fn invalid_header_is_rejected() {
    let file = write_config(
        "api:\n  base_url: \"https://store.example.com\"\n  headers:\n    \"bad header\": \"x\"\n",
    );
    let settings = Settings::from_file(file.path()).unwrap();
    assert!(HttpClient::new(&settings, Emulation::Chrome133).is_err());
}
