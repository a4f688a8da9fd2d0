//! End-to-end tests for `POST /send` over the real use-case and an in-memory
//! broker.

use std::sync::Arc;

use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use notification_producer::Trace;
use notification_producer::domain::ports::NotificationPublishError;
use notification_producer::domain::{Directory, NotificationService, TRACE_ID_HEADER};
use notification_producer::inbound::http::form_config;
use notification_producer::inbound::http::notifications::send_notification;
use notification_producer::inbound::http::state::HttpState;
use notification_producer::outbound::memory::InMemoryNotificationPublisher;

const TOPIC: &str = "notifications";
const FORM: &str = "application/x-www-form-urlencoded";

#[fixture]
fn publisher() -> InMemoryNotificationPublisher {
    InMemoryNotificationPublisher::new()
}

fn state_for(publisher: &InMemoryNotificationPublisher) -> web::Data<HttpState> {
    let service = NotificationService::new(
        Arc::new(Directory::default()),
        Arc::new(publisher.clone()),
        TOPIC,
    );
    web::Data::new(HttpState::new(Arc::new(service)))
}

async fn post_form(publisher: &InMemoryNotificationPublisher, body: &'static str) -> (u16, Value) {
    post(publisher, FORM, body.to_owned()).await
}

async fn post(
    publisher: &InMemoryNotificationPublisher,
    content_type: &str,
    body: String,
) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(state_for(publisher))
            .app_data(form_config())
            .wrap(Trace)
            .service(send_notification),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/send")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn delivers_notification_keyed_by_recipient(publisher: InMemoryNotificationPublisher) {
    let (status, body) = post_form(&publisher, "fromID=1&toID=2&message=hello").await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Notification sent successfully!"}));
    let records = publisher.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.topic, TOPIC);
    assert_eq!(record.key, "2");
    let payload: Value = serde_json::from_slice(&record.payload).expect("json payload");
    assert_eq!(
        payload,
        json!({
            "from": {"id": 1, "name": "Shreyash"},
            "to": {"id": 2, "name": "Rajesh"},
            "message": "hello"
        })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_recipient_is_not_published(publisher: InMemoryNotificationPublisher) {
    let (status, body) = post_form(&publisher, "fromID=1&toID=99&message=hi").await;

    assert_eq!(status, 404);
    assert_eq!(body, json!({"message": "User Not Found"}));
    assert!(publisher.records().is_empty());
}

#[rstest]
#[actix_web::test]
async fn non_numeric_sender_is_a_bad_request(publisher: InMemoryNotificationPublisher) {
    let (status, body) = post_form(&publisher, "fromID=abc&toID=2&message=hi").await;

    assert_eq!(status, 400);
    let message = body["message"].as_str().expect("message text");
    assert!(message.starts_with("failed to parse ID from form value fromID"));
    assert!(publisher.records().is_empty());
}

#[rstest]
#[actix_web::test]
async fn repeated_requests_publish_twice(publisher: InMemoryNotificationPublisher) {
    for _ in 0..2 {
        let (status, _) = post_form(&publisher, "fromID=3&toID=4&message=again").await;
        assert_eq!(status, 200);
    }

    let keys: Vec<String> = publisher.records().into_iter().map(|r| r.key).collect();
    assert_eq!(keys, ["4", "4"]);
}

#[rstest]
#[actix_web::test]
async fn broker_failure_is_an_internal_error(publisher: InMemoryNotificationPublisher) {
    publisher.fail_with(NotificationPublishError::unavailable("all brokers down"));

    let (status, body) = post_form(&publisher, "fromID=1&toID=2&message=hello").await;

    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"message": "notification broker is unavailable: all brokers down"})
    );
    assert!(publisher.records().is_empty());
}

#[rstest]
#[actix_web::test]
async fn multipart_form_is_published(publisher: InMemoryNotificationPublisher) {
    let body = [("fromID", "1"), ("toID", "2"), ("message", "hello")]
        .iter()
        .map(|(name, value)| {
            format!("--xyz\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
        })
        .chain(std::iter::once("--xyz--\r\n".to_owned()))
        .collect::<String>();

    let (status, body) = post(&publisher, "multipart/form-data; boundary=xyz", body).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Notification sent successfully!"}));
    let records = publisher.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "2");
}

#[rstest]
#[actix_web::test]
async fn first_value_of_a_repeated_key_is_used(publisher: InMemoryNotificationPublisher) {
    let (status, _) = post_form(&publisher, "fromID=1&fromID=3&toID=2&message=hello").await;

    assert_eq!(status, 200);
    let records = publisher.records();
    assert_eq!(records.len(), 1);
    let payload: Value = serde_json::from_slice(&records[0].payload).expect("json payload");
    assert_eq!(payload["from"], json!({"id": 1, "name": "Shreyash"}));
}
