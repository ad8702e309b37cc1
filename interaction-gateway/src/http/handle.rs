use crate::gateway::Outcome;
use crate::http::Server;
use crate::Error;
use futures_util::stream::Stream;
use serde_json::Value;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use warp::http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::hyper::Body;
use warp::{reply::Response, Rejection, Reply};

pub async fn handle(
    server: Arc<Server>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> Result<Response, Rejection> {
    let outcome = server
        .gateway
        .process(signature.as_deref(), timestamp.as_deref(), &body[..])
        .await
        .map_err(warp::reject::custom)?;

    match outcome {
        Outcome::Unauthorized => {
            Ok(warp::reply::with_status(warp::reply(), StatusCode::UNAUTHORIZED).into_response())
        }
        Outcome::Respond { body, after: None } => Ok(warp::reply::json(&body).into_response()),
        Outcome::Respond {
            body,
            after: Some(after),
        } => {
            let (response, released) = released_json(&body).map_err(warp::reject::custom)?;
            after.spawn_after(released);
            Ok(response)
        }
    }
}

/// JSON reply whose receiver fires once the body has been handed to the connection.
fn released_json(body: &Value) -> Result<(Response, oneshot::Receiver<()>), Error> {
    let bytes = Bytes::from(serde_json::to_vec(body)?);
    let length = bytes.len();
    let (tx, rx) = oneshot::channel();

    let mut response = Response::new(Body::wrap_stream(ReleaseOnSend {
        chunk: Some(bytes),
        release: Some(tx),
    }));

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

    Ok((response, rx))
}

struct ReleaseOnSend {
    chunk: Option<Bytes>,
    release: Option<oneshot::Sender<()>>,
}

impl ReleaseOnSend {
    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            let _ = release.send(());
        }
    }
}

impl Stream for ReleaseOnSend {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.chunk.take() {
            Some(chunk) => Poll::Ready(Some(Ok(chunk))),
            None => {
                self.release();
                Poll::Ready(None)
            }
        }
    }
}

// hyper may drop the body without polling for the end once content-length is reached
impl Drop for ReleaseOnSend {
    fn drop(&mut self) {
        if self.chunk.is_none() {
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_released_after_body_read() {
        let (response, mut released) = released_json(&json!({ "type": 5 })).unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[CONTENT_LENGTH], "10");

        assert!(released.try_recv().is_err());

        let body = warp::hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"type":5}"#);
        assert_eq!(released.try_recv(), Ok(()));
    }

    #[tokio::test]
    async fn test_not_released_when_unsent() {
        let (response, released) = released_json(&json!({})).unwrap();
        drop(response);

        assert!(released.await.is_err());
    }
}
