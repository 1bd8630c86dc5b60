//! Uplink handling: decode, assemble, hand off to a publisher.
//!
//! The pipeline itself does no I/O. Delivery belongs to the [`Publisher`]
//! supplied by the caller, together with the [`Route`] (topic and QoS) it
//! should use. Any failure before publishing is turned into a 500 response
//! and nothing is handed to the publisher.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::devices::{DeviceFamily, decode_frame};
use crate::envelope::{Envelope, assemble};
use crate::error::{DecodeError, PublishError};
use crate::uplink::{ShadowEvent, Uplink};

/// Destination of published envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub topic: String,
    pub qos: u8,
}

impl Route {
    pub fn new(topic: impl Into<String>, qos: u8) -> Self {
        Self {
            topic: topic.into(),
            qos,
        }
    }

    /// Default topic for each family, QoS 0.
    pub fn default_for(family: DeviceFamily) -> Self {
        match family {
            DeviceFamily::Ost => Self::new("ost/decoded/data", 0),
            DeviceFamily::Swx => Self::new("libelium/swx/decoded/data", 0),
        }
    }
}

/// What a publisher receives: the envelope still unserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublishRequest<'a> {
    pub topic: &'a str,
    pub qos: u8,
    pub payload: &'a Envelope,
}

/// Delivery of assembled envelopes. Serialization, retries and connection
/// management are up to the implementation.
pub trait Publisher {
    fn publish(&mut self, request: &PublishRequest<'_>) -> Result<(), PublishError>;
}

/// Lambda-style outcome of handling one uplink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    /// JSON document with a `message` and, on failure, an `error`.
    pub body: String,
}

impl HandlerResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({ "message": "processing succeeded" }).to_string(),
        }
    }

    pub fn failed(err: &HandlerError) -> Self {
        Self {
            status_code: 500,
            body: serde_json::json!({
                "message": "processing failed",
                "error": err.to_string(),
            })
            .to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Why handling an uplink failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Decode an uplink of `family` into an envelope without publishing it.
pub fn process_uplink(family: DeviceFamily, uplink: &Uplink) -> Result<Envelope, DecodeError> {
    let metadata = uplink.metadata()?;
    let reading = decode_frame(family, uplink.frame()?)?;
    debug!(
        family = %family,
        dev_eui = %metadata.dev_eui,
        fcnt = metadata.fcnt,
        "decoded uplink"
    );
    Ok(assemble(&metadata, reading))
}

/// Decode, assemble and publish one uplink.
pub fn handle_uplink<P: Publisher>(
    family: DeviceFamily,
    uplink: &Uplink,
    route: &Route,
    publisher: &mut P,
) -> HandlerResponse {
    match try_handle_uplink(family, uplink, route, publisher) {
        Ok(()) => HandlerResponse::ok(),
        Err(err) => HandlerResponse::failed(&err),
    }
}

/// [`handle_uplink`] on the reported state of a shadow update.
pub fn handle_event<P: Publisher>(
    family: DeviceFamily,
    event: &ShadowEvent,
    route: &Route,
    publisher: &mut P,
) -> HandlerResponse {
    handle_uplink(family, event.reported(), route, publisher)
}

fn try_handle_uplink<P: Publisher>(
    family: DeviceFamily,
    uplink: &Uplink,
    route: &Route,
    publisher: &mut P,
) -> Result<(), HandlerError> {
    let envelope = process_uplink(family, uplink).inspect_err(|err| {
        warn!(family = %family, error = %err, "uplink rejected");
    })?;
    let request = PublishRequest {
        topic: &route.topic,
        qos: route.qos,
        payload: &envelope,
    };
    publisher.publish(&request).inspect_err(|err| {
        error!(topic = %route.topic, error = %err, "publish failed");
    })?;
    info!(
        topic = %route.topic,
        qos = route.qos,
        dev_eui = %envelope.dev_eui,
        fcnt = envelope.fcnt,
        "envelope published"
    );
    Ok(())
}
