use super::*;

#[test]
fn extracts_code_from_request_line() {
    let request = "GET /callback?code=AQD-abc_123 HTTP/1.1\r\nHost: 127.0.0.1:8888\r\n\r\n";
    assert_eq!(extract_code(request).unwrap(), "AQD-abc_123");
}

#[test]
fn extracts_code_after_other_parameters() {
    let request = "GET /callback?state=xyz&code=AQD HTTP/1.1\r\n";
    assert_eq!(extract_code(request).unwrap(), "AQD");
}

#[test]
fn decodes_percent_encoded_code() {
    let request = "GET /callback?code=a%2Fb HTTP/1.1\r\n";
    assert_eq!(extract_code(request).unwrap(), "a/b");
}

#[test]
fn refused_authorization_is_an_error() {
    let request = "GET /callback?error=access_denied HTTP/1.1\r\n";
    let err = extract_code(request).unwrap_err();
    assert!(err.to_string().contains("access_denied"));
}

#[test]
fn missing_code_is_an_error() {
    assert!(extract_code("GET /favicon.ico HTTP/1.1\r\n").is_err());
    assert!(extract_code("").is_err());
}

#[test]
fn redirect_port_parses_explicit_port() {
    assert_eq!(redirect_port("http://127.0.0.1:8888/callback").unwrap(), 8888);
}

#[test]
fn redirect_port_defaults_to_80() {
    assert_eq!(redirect_port("http://localhost/callback").unwrap(), 80);
}

#[test]
fn redirect_port_rejects_garbage() {
    assert!(redirect_port("http://localhost:notaport/callback").is_err());
}

#[test]
fn expiry_margin_is_applied() {
    let token = AccessToken {
        access_token: "a".to_owned(),
        refresh_token: "r".to_owned(),
        expires_at: unix_now() + 30,
    };
    assert!(token.expires_soon());

    let token = AccessToken {
        expires_at: unix_now() + 3600,
        ..token
    };
    assert!(!token.expires_soon());
}
