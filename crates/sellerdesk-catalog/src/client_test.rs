use super::*;

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 30, "sellerdesk-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_segments() {
    let client = test_client("https://api.seller.test");
    let url = client.endpoint(&["product", "p1", "variation", "v1"]);
    assert_eq!(url.as_str(), "https://api.seller.test/product/p1/variation/v1");
}

#[test]
fn endpoint_keeps_base_path() {
    let client = test_client("https://api.seller.test/v1/");
    let url = client.endpoint(&["category", "c1", "attributes"]);
    assert_eq!(url.as_str(), "https://api.seller.test/v1/category/c1/attributes");
}

#[test]
fn endpoint_encodes_segments() {
    let client = test_client("https://api.seller.test");
    let url = client.endpoint(&["product", "a/b c"]);
    assert_eq!(url.as_str(), "https://api.seller.test/product/a%2Fb%20c");
}

#[test]
fn rejects_non_http_base_url() {
    let result = CatalogClient::new("mailto:seller@example.com", 30, "ua");
    assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));

    let result = CatalogClient::new("not a url", 30, "ua");
    assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
}

#[test]
fn authorized_requires_shop_scope() {
    let client = test_client("https://api.seller.test").with_token("tok");
    let request = client.client.get(client.endpoint(&["product", "p1"]));
    let err = client.authorized(request).unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredential("shop_id")));
}

#[test]
fn token_header_requires_token() {
    let client = test_client("https://api.seller.test").with_shop_id("shop-1");
    let request = client.client.get(client.endpoint(&["account", "detail"]));
    let err = client.with_token_header(request).unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredential("token")));
}

#[test]
fn extract_id_reads_underscore_id_then_id() {
    assert_eq!(extract_id(r#"{"_id":"p1"}"#).as_deref(), Some("p1"));
    assert_eq!(extract_id(r#"{"id":"p2"}"#).as_deref(), Some("p2"));
    assert_eq!(extract_id(""), None);
    assert_eq!(extract_id("created"), None);
    assert_eq!(extract_id(r#"{"_id":5}"#), None);
}
