use freyja_publish::oauth::{
    authorization_header, percent_encode, sign, signature_base_string, Credentials,
};
use pretty_assertions::assert_eq;

// Worked example from the X developer documentation ("Creating a signature").
const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
const TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
const TIMESTAMP: i64 = 1318622958;
const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
const STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";
const EXPECTED_SIGNATURE: &str = "hCtSmYh+iHYCEqBWrE7C7hYmtUk=";

fn credentials() -> Credentials {
    Credentials {
        consumer_key: CONSUMER_KEY.to_string(),
        consumer_secret: CONSUMER_SECRET.to_string(),
        token: TOKEN.to_string(),
        token_secret: TOKEN_SECRET.to_string(),
    }
}

fn reference_params() -> Vec<(String, String)> {
    [
        ("status", STATUS),
        ("include_entities", "true"),
        ("oauth_consumer_key", CONSUMER_KEY),
        ("oauth_nonce", NONCE),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", "1318622958"),
        ("oauth_token", TOKEN),
        ("oauth_version", "1.0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn percent_encoding_follows_rfc3986() {
    assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
    assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
    assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
    assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
    assert_eq!(percent_encode("☃"), "%E2%98%83");
}

#[test]
fn base_string_matches_reference() {
    let base = signature_base_string("post", URL, &reference_params());
    assert_eq!(
        base,
        "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
         include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
         oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
         oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
         oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
         oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
         %252C%2520a%2520signed%2520OAuth%2520request%2521"
    );
}

#[test]
fn signature_matches_reference() {
    let base = signature_base_string("POST", URL, &reference_params());
    let signature = sign(&base, CONSUMER_SECRET, TOKEN_SECRET).unwrap();
    assert_eq!(signature, EXPECTED_SIGNATURE);
}

#[test]
fn header_carries_reference_signature() {
    let header = authorization_header(
        &credentials(),
        "POST",
        URL,
        &[("include_entities", "true"), ("status", STATUS)],
        NONCE,
        TIMESTAMP,
    )
    .unwrap();

    assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
    assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
    assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(header.ends_with("oauth_version=\"1.0\""));
    // request parameters are signed but not repeated in the header
    assert!(!header.contains("status="));
}
