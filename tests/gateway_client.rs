use httpmock::prelude::*;
use intouch_kit::{
    client::IntouchClient,
    concepts::Operation,
    config::{Credentials, Endpoints},
    errors::{Error, ValidationError},
    transport::AdditionalInfos,
    types::TransactionId,
};
use regex::Regex;
use serde_json::json;

const BASIC_AUTHORIZATION: &str = "Basic YXBpLXVzZXI6YXBpLXBhc3M=";
const TRANSACTION_URI: &str =
    "/dist/api/touchpayapi/v1/123/transaction?loginAgent=AG1&passwordAgent=PW1";
const DIGEST_CHALLENGE: &str = "Digest realm=\"gutouch\", nonce=\"dcd98b7102dd2f0e8b11d0f600bfb0c093\", qop=\"auth\", opaque=\"5ccc069c403ebaf9f0171e9517f40e41\"";

fn authorization() -> Regex {
    Regex::new("(?i)^authorization$").unwrap()
}

fn client(server: &MockServer) -> IntouchClient {
    IntouchClient::new(
        Credentials::builder()
            .username("api-user")
            .password("api-pass")
            .login_agent("AG1")
            .password_agent("PW1")
            .intouch_id("123")
            .build(),
    )
    .unwrap()
    .with_endpoints(Endpoints::with_base(&server.base_url()))
}

#[tokio::test]
async fn test_balance_uses_basic_auth() {
    let _ = tracing_subscriber::fmt::try_init();

    let server = MockServer::start();
    let balance_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/123/get_balance")
            .header("authorization", BASIC_AUTHORIZATION)
            .json_body(json!({
                "partner_id": "PARTNER",
                "login_api": "AG1",
                "password_api": "PW1"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "amount": 125000, "status": "SUCCESSFUL" }));
    });

    let response = client(&server)
        .transaction()
        .partner_id("PARTNER")
        .phone("690000000")
        .get_balance()
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["amount"], 125000);
    balance_mock.assert_calls(1);
}

#[tokio::test]
async fn test_cashin_body_and_service_code() {
    let server = MockServer::start();
    let cashin_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/123/cashin")
            .header("authorization", BASIC_AUTHORIZATION)
            .json_body(json!({
                "serviceId": "CASHINMTNCM2_DYNATECH",
                "recipientPhoneNumber": "677123456",
                "amount": 5000,
                "partnerId": "PARTNER",
                "partnerTransactionId": "order-42",
                "loginApi": "AG1",
                "passwordApi": "PW1",
                "callBackUrl": "https://merchant.example/intouch/callback"
            }));
        then.status(200)
            .json_body(json!({ "status": "PENDING", "partner_transaction_id": "order-42" }));
    });

    let response = client(&server)
        .transaction()
        .amount(5000)
        .phone("677123456")
        .operator("mtn")
        .unwrap()
        .partner_id("PARTNER")
        .callback("https://merchant.example/intouch/callback")
        .make_cashin(Some(TransactionId::from("order-42")))
        .await
        .unwrap();

    assert_eq!(response.body["status"], "PENDING");
    cashin_mock.assert_calls(1);
}

#[tokio::test]
async fn test_merchant_payment_answers_digest_challenge() {
    let server = MockServer::start();
    let expected_body = json!({
        "idFromClient": "client-1",
        "amount": 1500,
        "callback": "https://merchant.example/intouch/callback",
        "recipientNumber": "690000000",
        "serviceCode": "CM_PAIEMENTMARCHAND_OM_TP",
        "additionalInfos": {
            "recipientEmail": "jane@example.com",
            "recipientFirstName": "Jane",
            "recipientLastName": "Doe"
        }
    });

    let challenge_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dist/api/touchpayapi/v1/123/transaction")
            .query_param("loginAgent", "AG1")
            .query_param("passwordAgent", "PW1")
            .header_missing("authorization");
        then.status(401).header("www-authenticate", DIGEST_CHALLENGE);
    });
    let payment_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dist/api/touchpayapi/v1/123/transaction")
            .query_param("loginAgent", "AG1")
            .query_param("passwordAgent", "PW1")
            .header_matches(authorization(), Regex::new("^Digest ").unwrap())
            .header_matches(authorization(), Regex::new(r#"username="api-user""#).unwrap())
            .header_matches(
                authorization(),
                Regex::new(&format!(r#"uri="{}""#, regex::escape(TRANSACTION_URI))).unwrap(),
            )
            .header_matches(authorization(), Regex::new(r#"realm="gutouch""#).unwrap())
            .json_body(expected_body.clone());
        then.status(200)
            .json_body(json!({ "idFromClient": "client-1", "status": "INITIATED" }));
    });

    let response = client(&server)
        .transaction()
        .amount(1500)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_merchant_payment(
            AdditionalInfos::builder()
                .recipient_email("jane@example.com")
                .recipient_first_name("Jane")
                .recipient_last_name("Doe")
                .build(),
            Some(TransactionId::from("client-1")),
        )
        .await
        .unwrap();

    assert_eq!(response.body["status"], "INITIATED");
    challenge_mock.assert_calls(1);
    payment_mock.assert_calls(1);
}

#[tokio::test]
async fn test_cashout_uses_transaction_endpoint() {
    let server = MockServer::start();
    let cashout_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dist/api/touchpayapi/v1/123/transaction")
            .json_body(json!({
                "idFromClient": "cashout-1",
                "amount": 2000,
                "callback": "https://merchant.example/intouch/callback",
                "recipientNumber": "677123456",
                "serviceCode": "CASHOUTMTNCM2_DYNATECH",
                "additionalInfos": {}
            }));
        then.status(200).json_body(json!({ "status": "INITIATED" }));
    });

    let response = client(&server)
        .transaction()
        .amount(2000)
        .phone("677123456")
        .operator("MTN")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_cashout(AdditionalInfos::default(), Some(TransactionId::from("cashout-1")))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    cashout_mock.assert_calls(1);
}

#[tokio::test]
async fn test_generated_transaction_id_is_sent() {
    let server = MockServer::start();
    let payment_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dist/api/touchpayapi/v1/123/transaction")
            .body_matches(Regex::new(r#""idFromClient":"[0-9a-f]{32}""#).unwrap());
        then.status(200).json_body(json!({ "status": "INITIATED" }));
    });

    client(&server)
        .transaction()
        .amount(100)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_merchant_payment(AdditionalInfos::default(), None)
        .await
        .unwrap();

    payment_mock.assert_calls(1);
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let server = MockServer::start();
    let any_put = server.mock(|when, then| {
        when.method(PUT);
        then.status(200);
    });
    let any_post = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });
    let client = client(&server);

    let err = client
        .transaction()
        .amount(99)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_merchant_payment(AdditionalInfos::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::AmountTooLow { given: 99, .. })
    ));

    let err = client
        .transaction()
        .amount(500)
        .phone("690000000")
        .callback("https://merchant.example/intouch/callback")
        .make_merchant_payment(AdditionalInfos::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingOperator(Operation::Merchant))
    ));

    let err = client
        .transaction()
        .amount(500)
        .phone("690000000")
        .operator("mtn")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_cashin(None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingPartnerId)
    ));

    let err = client
        .transaction()
        .partner_id("PARTNER")
        .phone("0690000000")
        .get_balance()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidPhone)));

    any_put.assert_calls(0);
    any_post.assert_calls(0);
}

#[tokio::test]
async fn test_gateway_errors_propagate() {
    let server = MockServer::start();
    let _balance_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/123/get_balance");
        then.status(500)
            .json_body(json!({ "message": "internal error" }));
    });

    let err = client(&server)
        .transaction()
        .partner_id("PARTNER")
        .phone("690000000")
        .get_balance()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_unanswerable_401_propagates() {
    let server = MockServer::start();
    let payment_mock = server.mock(|when, then| {
        when.method(PUT).path("/dist/api/touchpayapi/v1/123/transaction");
        then.status(401);
    });

    let err = client(&server)
        .transaction()
        .amount(1000)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .make_merchant_payment(AdditionalInfos::default(), None)
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    payment_mock.assert_calls(1);
}

#[tokio::test]
async fn test_generated_partner_transaction_id_is_sent() {
    let server = MockServer::start();
    let cashin_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/123/cashin")
            .body_matches(Regex::new(r#""partnerTransactionId":"[0-9a-f]{32}""#).unwrap());
        then.status(200).json_body(json!({ "status": "PENDING" }));
    });

    client(&server)
        .transaction()
        .amount(100)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .partner_id("PARTNER")
        .callback("https://merchant.example/intouch/callback")
        .make_cashin(None)
        .await
        .unwrap();

    cashin_mock.assert_calls(1);
}

#[tokio::test]
async fn test_plain_text_success_body_is_kept() {
    let server = MockServer::start();
    let balance_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/123/get_balance");
        then.status(200)
            .header("content-type", "text/plain")
            .body("OK");
    });

    let response = client(&server)
        .transaction()
        .partner_id("PARTNER")
        .phone("690000000")
        .get_balance()
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!("OK"));
    balance_mock.assert_calls(1);
}

#[tokio::test]
async fn test_resolved_service_code_replaces_draft_value() {
    let server = MockServer::start();
    let payment_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/dist/api/touchpayapi/v1/123/transaction")
            .query_param("loginAgent", "AG1")
            .query_param("passwordAgent", "PW1")
            .body_matches(Regex::new(r#""serviceCode":"CM_PAIEMENTMARCHAND_OM_TP""#).unwrap());
        then.status(200).json_body(json!({ "status": "INITIATED" }));
    });

    client(&server)
        .transaction()
        .amount(1000)
        .phone("690000000")
        .operator("orange")
        .unwrap()
        .callback("https://merchant.example/intouch/callback")
        .service_code("BOGUS")
        .endpoint("https://elsewhere.example/[INTOUCH_ID]/transaction")
        .make_merchant_payment(AdditionalInfos::default(), None)
        .await
        .unwrap();

    payment_mock.assert_calls(1);
}
