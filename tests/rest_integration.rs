use std::sync::Arc;

use rust_decimal::Decimal;
use wiremock::matchers::{any, body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use khipu_api_client::auth::{Credentials, StaticCredentials, sign_request};
use khipu_api_client::error::KhipuError;
use khipu_api_client::rest::KhipuClient;
use khipu_api_client::rest::payments::{PaymentRequest, RefundRequest};
use khipu_api_client::rest::receivers::ReceiverRequest;
use khipu_api_client::types::{BankType, Currency, PaymentStatus};

const RECEIVER_ID: &str = "12345";
const SECRET: &str = "test_secret";
const API_PREFIX: &str = "/api/2.0";
const NO_PARAMS: [(&str, &str); 0] = [];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build_client(server: &MockServer) -> KhipuClient {
    init_tracing();
    let credentials = Arc::new(StaticCredentials::new(RECEIVER_ID, SECRET));
    KhipuClient::builder()
        .base_url(format!("{}{}", server.uri(), API_PREFIX))
        .credentials(credentials)
        .build()
        .unwrap()
}

fn expected_auth<I, K, V>(server: &MockServer, http_method: &str, endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let credentials = Credentials::new(RECEIVER_ID, SECRET);
    let uri = format!("{}{}{}", server.uri(), API_PREFIX, endpoint);
    sign_request(&credentials, http_method, &uri, params).unwrap()
}

fn payment_json(receiver_id: u64) -> serde_json::Value {
    serde_json::json!({
        "payment_id": "gqzdy6chjne9",
        "payment_url": "https://khipu.com/payment/info/gqzdy6chjne9",
        "simplified_transfer_url": "https://app.khipu.com/payment/simplified/gqzdy6chjne9",
        "transfer_url": "https://khipu.com/payment/manual/gqzdy6chjne9",
        "app_url": "khipu:///pos/gqzdy6chjne9",
        "ready_for_terminal": false,
        "notification_token": "9dec8aa176c5223026919b3b5579a477",
        "receiver_id": receiver_id,
        "conciliation_date": "2017-03-01T13:00:00.000Z",
        "subject": "Test",
        "amount": 1000,
        "currency": "CLP",
        "status": "done",
        "status_detail": "normal",
        "body": "",
        "receipt_url": "https://khipu.com/payment/receipt/gqzdy6chjne9",
        "attachment_urls": [],
        "bank": "DemoBank",
        "bank_id": "Bawdf",
        "out_of_date_conciliation": false,
        "transaction_id": "tx-1",
        "send_reminders": false,
        "send_email": false,
        "payment_method": "regular_transfer"
    })
}

#[tokio::test]
async fn test_get_banks() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "banks": [{
            "bank_id": "Bawdf",
            "name": "DemoBank",
            "message": "Este es un banco de pruebas.",
            "min_amount": "200.0000",
            "type": "Persona",
            "parent": "",
            "logo_url": ""
        }]
    });

    Mock::given(method("GET"))
        .and(path("/api/2.0/banks"))
        .and(header("Authorization", expected_auth(&server, "GET", "/banks", NO_PARAMS).as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let banks = client.get_banks().await.unwrap();

    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].name, "DemoBank");
    assert_eq!(banks[0].bank_type, BankType::Persona);
    assert_eq!(banks[0].min_amount, Decimal::new(200, 0));
}

#[tokio::test]
async fn test_get_payment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/payments/gqzdy6chjne9"))
        .and(header(
            "Authorization",
            expected_auth(&server, "GET", "/payments/gqzdy6chjne9", NO_PARAMS).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(12345)))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let payment = client.get_payment("gqzdy6chjne9").await.unwrap();

    assert_eq!(payment.payment_id, "gqzdy6chjne9");
    assert_eq!(payment.status, PaymentStatus::Done);
    assert_eq!(payment.amount, Decimal::new(1000, 0));
    assert!(payment.body.is_none());
}

#[tokio::test]
async fn test_get_payment_by_notification_token() {
    let server = MockServer::start().await;
    let token = "9dec8aa176c5223026919b3b5579a477";

    Mock::given(method("GET"))
        .and(path("/api/2.0/payments"))
        .and(query_param("notification_token", token))
        .and(header(
            "Authorization",
            expected_auth(&server, "GET", "/payments", [("notification_token", token)]).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(12345)))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let payment = client.get_payment_by_notification_token(token).await.unwrap();
    assert_eq!(payment.receiver_id, 12345);
    assert!(payment.is_paid());
}

#[tokio::test]
async fn test_notification_for_another_receiver_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(99999)))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get_payment_by_notification_token("some-token")
        .await
        .unwrap_err();

    match err {
        KhipuError::ReceiverMismatch { expected, actual } => {
            assert_eq!(expected, RECEIVER_ID);
            assert_eq!(actual, 99999);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_notification_accepts_padded_receiver_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(12345)))
        .mount(&server)
        .await;

    init_tracing();
    let client = KhipuClient::builder()
        .base_url(format!("{}{}", server.uri(), API_PREFIX))
        .credentials(Arc::new(StaticCredentials::new("012345\n", SECRET)))
        .build()
        .unwrap();

    let payment = client
        .get_payment_by_notification_token("some-token")
        .await
        .unwrap();
    assert_eq!(payment.receiver_id, 12345);
}

#[tokio::test]
async fn test_create_payment() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "payment_id": "gqzdy6chjne9",
        "payment_url": "https://khipu.com/payment/info/gqzdy6chjne9",
        "simplified_transfer_url": "https://app.khipu.com/payment/simplified/gqzdy6chjne9",
        "transfer_url": "https://khipu.com/payment/manual/gqzdy6chjne9",
        "app_url": "khipu:///pos/gqzdy6chjne9",
        "ready_for_terminal": false
    });

    let signed = expected_auth(
        &server,
        "POST",
        "/payments",
        [
            ("subject", "Pago de prueba"),
            ("currency", "CLP"),
            ("amount", "1000"),
            ("transaction_id", "tx-1"),
        ],
    );

    Mock::given(method("POST"))
        .and(path("/api/2.0/payments"))
        .and(header("Authorization", signed.as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("subject=Pago+de+prueba"))
        .and(body_string_contains("currency=CLP"))
        .and(body_string_contains("amount=1000"))
        .and(body_string_contains("transaction_id=tx-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = PaymentRequest::new("Pago de prueba", Currency::Clp, Decimal::new(1000, 0))
        .transaction_id("tx-1");
    let created = client.create_payment(&request).await.unwrap();

    assert_eq!(created.payment_id, "gqzdy6chjne9");
    assert!(created.simplified_transfer_url.is_some());
}

#[tokio::test]
async fn test_invalid_payment_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = PaymentRequest::new("Test", Currency::Clp, Decimal::ZERO);
    let err = client.create_payment(&request).await.unwrap_err();
    assert!(matches!(err, KhipuError::InvalidRequest(_)));

    let err = client.get_payment("").await.unwrap_err();
    assert!(matches!(err, KhipuError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_dot_segment_payment_ids_are_not_sent() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    for id in [".", ".."] {
        let err = client.delete_payment(id).await.unwrap_err();
        assert!(matches!(err, KhipuError::InvalidRequest(_)), "delete {id:?}");

        let err = client.get_payment(id).await.unwrap_err();
        assert!(matches!(err, KhipuError::InvalidRequest(_)), "get {id:?}");

        let err = client
            .refund_payment(id, &RefundRequest::full())
            .await
            .unwrap_err();
        assert!(matches!(err, KhipuError::InvalidRequest(_)), "refund {id:?}");
    }
}

#[tokio::test]
async fn test_delete_payment() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/2.0/payments/gqzdy6chjne9"))
        .and(header(
            "Authorization",
            expected_auth(&server, "DELETE", "/payments/gqzdy6chjne9", NO_PARAMS).as_str(),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Payment deleted"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.delete_payment("gqzdy6chjne9").await.unwrap();
    assert_eq!(response.message, "Payment deleted");
}

#[tokio::test]
async fn test_refund_payment_partial() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2.0/payments/gqzdy6chjne9/refunds"))
        .and(header(
            "Authorization",
            expected_auth(&server, "POST", "/payments/gqzdy6chjne9/refunds", [("amount", "500")])
                .as_str(),
        ))
        .and(body_string("amount=500"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Refund accepted"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .refund_payment("gqzdy6chjne9", &RefundRequest::partial(Decimal::new(500, 0)))
        .await
        .unwrap();
    assert_eq!(response.message, "Refund accepted");
}

#[tokio::test]
async fn test_refund_payment_full_sends_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2.0/payments/gqzdy6chjne9/refunds"))
        .and(header(
            "Authorization",
            expected_auth(&server, "POST", "/payments/gqzdy6chjne9/refunds", NO_PARAMS).as_str(),
        ))
        .and(body_string(""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Refund accepted"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .refund_payment("gqzdy6chjne9", &RefundRequest::full())
        .await
        .unwrap();
    assert_eq!(response.message, "Refund accepted");
}

#[tokio::test]
async fn test_create_receiver() {
    let server = MockServer::start().await;

    let signed = expected_auth(
        &server,
        "POST",
        "/receivers",
        [
            ("admin_first_name", "Ana"),
            ("admin_last_name", "Rojas"),
            ("admin_email", "ana@tienda.cl"),
            ("country_code", "CL"),
            ("business_identifier", "76.123.456-7"),
            ("business_category", "retail"),
            ("business_name", "Tienda SpA"),
            ("business_phone", "+56223456789"),
            ("business_address_line_1", "Av. Providencia 123"),
            ("contact_full_name", "Ana Rojas"),
            ("contact_email", "ana@tienda.cl"),
            ("contact_phone", "+56912345678"),
        ],
    );

    Mock::given(method("POST"))
        .and(path("/api/2.0/receivers"))
        .and(header("Authorization", signed.as_str()))
        .and(body_string_contains("country_code=CL"))
        .and(body_string_contains("business_name=Tienda+SpA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "receiver_id": 777888,
            "secret": "new_receiver_secret"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = ReceiverRequest {
        admin_first_name: "Ana".to_string(),
        admin_last_name: "Rojas".to_string(),
        admin_email: "ana@tienda.cl".to_string(),
        country_code: "CL".to_string(),
        business_identifier: "76.123.456-7".to_string(),
        business_category: "retail".to_string(),
        business_name: "Tienda SpA".to_string(),
        business_phone: "+56223456789".to_string(),
        business_address_line_1: "Av. Providencia 123".to_string(),
        contact_full_name: "Ana Rojas".to_string(),
        contact_email: "ana@tienda.cl".to_string(),
        contact_phone: "+56912345678".to_string(),
        ..Default::default()
    };
    let response = client.create_receiver(&request).await.unwrap();

    assert_eq!(response.receiver_id, 777888);
    let credentials = response.into_credentials();
    assert_eq!(credentials.receiver_id, "777888");
}

#[tokio::test]
async fn test_validation_error_maps_to_api_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "status": 400,
        "message": "Error de validación",
        "errors": [{"field": "amount", "message": "El monto es menor al mínimo"}]
    });

    Mock::given(method("POST"))
        .and(path("/api/2.0/payments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = PaymentRequest::new("Test", Currency::Clp, Decimal::new(1, 0));
    let err = client.create_payment(&request).await.unwrap_err();

    let api_error = err.api_error().expect("expected an API error");
    assert!(api_error.is_validation_error());
    assert_eq!(api_error.field_error("amount"), Some("El monto es menor al mínimo"));
}

#[tokio::test]
async fn test_authorization_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/banks"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "status": 403,
            "message": "Invalid hash"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_banks().await.unwrap_err();
    assert!(matches!(err, KhipuError::Api(ref e) if e.is_authorization_error()));
}

#[tokio::test]
async fn test_unexpected_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/banks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_banks().await.unwrap_err();
    match err {
        KhipuError::InvalidResponse(msg) => assert!(msg.contains("503")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2.0/banks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_banks().await.unwrap_err();
    assert!(matches!(err, KhipuError::InvalidResponse(msg) if msg.contains("not json")));
}

#[tokio::test]
async fn test_transport_failure_maps_to_http_error() {
    // Nothing listens on a port released right after binding.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}{}", listener.local_addr().unwrap(), API_PREFIX);
    drop(listener);

    init_tracing();
    let client = KhipuClient::builder()
        .base_url(base_url)
        .credentials(Arc::new(StaticCredentials::new(RECEIVER_ID, SECRET)))
        .build()
        .unwrap();

    let err = client.get_banks().await.unwrap_err();
    assert!(matches!(err, KhipuError::HttpMiddleware(_)), "{err:?}");
}
