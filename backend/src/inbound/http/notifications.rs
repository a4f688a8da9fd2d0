//! Notification API handler.
//!
//! ```text
//! POST /send  (application/x-www-form-urlencoded or multipart/form-data)
//! fromID=1&toID=2&message=hello
//! ```

use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest, post, web};
use futures_util::StreamExt;
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schemas::MessageResponse;
use super::state::HttpState;
use crate::domain::ports::SendNotificationRequest;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;

/// Body returned once the broker has acknowledged the notification.
pub const SENT_MESSAGE: &str = "Notification sent successfully!";

/// Largest accepted multipart field value, in bytes.
const MULTIPART_FIELD_LIMIT: usize = 64 * 1024;

/// Form body for `POST /send`.
///
/// Fields are kept as raw strings so a missing or non-numeric id is reported
/// with the field name rather than as a generic form error. A missing
/// `message` is treated as empty. Both url-encoded and multipart bodies are
/// accepted; when a key repeats, its first value is used.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SendNotificationForm {
    /// Sender identity.
    #[serde(rename = "fromID")]
    #[schema(example = "1")]
    pub from_id: Option<String>,
    /// Recipient identity.
    #[serde(rename = "toID")]
    #[schema(example = "2")]
    pub to_id: Option<String>,
    /// Free-text message.
    #[schema(example = "hello")]
    pub message: Option<String>,
}

impl SendNotificationForm {
    /// Collect known fields from decoded `(name, value)` pairs.
    ///
    /// The first value wins for a repeated key and unknown keys are ignored.
    ///
    /// # Examples
    /// ```
    /// use notification_producer::inbound::http::notifications::SendNotificationForm;
    ///
    /// let form = SendNotificationForm::from_fields([
    ///     ("fromID".to_owned(), "1".to_owned()),
    ///     ("fromID".to_owned(), "3".to_owned()),
    /// ]);
    /// assert_eq!(form.from_id.as_deref(), Some("1"));
    /// ```
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (name, value) in fields {
            let slot = match name.as_str() {
                "fromID" => &mut form.from_id,
                "toID" => &mut form.to_id,
                "message" => &mut form.message,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn read_multipart(mut multipart: Multipart) -> Result<Vec<(String, String)>, Error> {
    let mut fields = Vec::new();
    while let Some(item) = multipart.next().await {
        let mut field =
            item.map_err(|err| Error::invalid_request(format!("invalid multipart body: {err}")))?;
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let is_file = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .is_some();
        let bytes = field
            .bytes(MULTIPART_FIELD_LIMIT)
            .await
            .map_err(|err| Error::invalid_request(format!("multipart field {name}: {err}")))?
            .map_err(|err| Error::invalid_request(format!("invalid multipart body: {err}")))?;
        if is_file {
            continue;
        }
        let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
            Error::invalid_request(format!("multipart field {name} is not valid UTF-8"))
        })?;
        fields.push((name, value));
    }
    Ok(fields)
}

impl FromRequest for SendNotificationForm {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let multipart = Multipart::new(req.headers(), payload.take());
            Box::pin(async move {
                let fields = read_multipart(multipart).await?;
                Ok(Self::from_fields(fields))
            })
        } else {
            let form = web::Form::<Vec<(String, String)>>::from_request(req, payload);
            Box::pin(async move {
                let web::Form(fields) = form.await?;
                Ok(Self::from_fields(fields))
            })
        }
    }
}

impl TryFrom<SendNotificationForm> for SendNotificationRequest {
    type Error = Error;

    fn try_from(form: SendNotificationForm) -> Result<Self, Self::Error> {
        let from = parse_id("fromID", form.from_id.as_deref())?;
        let to = parse_id("toID", form.to_id.as_deref())?;
        Ok(Self {
            from,
            to,
            message: form.message.unwrap_or_default(),
        })
    }
}

fn parse_id(field: &str, raw: Option<&str>) -> Result<UserId, Error> {
    raw.unwrap_or_default().parse::<UserId>().map_err(|err| {
        Error::invalid_request(format!("failed to parse ID from form value {field}: {err}"))
    })
}

/// Publish a notification from `fromID` to `toID`.
///
/// Responds once the broker acknowledges the record. Repeating a request
/// publishes again; there is no deduplication.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use notification_producer::inbound::http::notifications::send_notification;
///
/// let app = App::new().service(send_notification);
/// ```
#[utoipa::path(
    post,
    path = "/send",
    request_body(
        content(
            (SendNotificationForm = "application/x-www-form-urlencoded"),
            (SendNotificationForm = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Notification published", body = MessageResponse),
        (status = 400, description = "fromID or toID missing or not an integer", body = MessageResponse),
        (status = 404, description = "Sender or recipient unknown", body = MessageResponse),
        (status = 500, description = "Encoding or broker failure", body = MessageResponse)
    ),
    tags = ["notifications"],
    operation_id = "sendNotification"
)]
#[post("/send")]
pub async fn send_notification(
    state: web::Data<HttpState>,
    form: SendNotificationForm,
) -> ApiResult<web::Json<MessageResponse>> {
    let request = SendNotificationRequest::try_from(form)?;
    state.notifications.send(request).await?;
    Ok(web::Json(MessageResponse::new(SENT_MESSAGE)))
}
