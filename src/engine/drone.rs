// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Worker-side responder.
//!
//! A drone routes each inbound [`Envelope`] to the handlers registered for its
//! topic and hands every handler a [`Responder`] bound to the envelope's
//! correlation id. Every matching handler is started in registration order
//! and all of them are driven together, so a handler that never finishes
//! cannot keep a later one from replying.
//!
//! Reply rules:
//! - no handler registered for the topic: the drone replies `null` itself
//! - a handler calls [`Responder::send`]: that payload is the reply
//! - a handler fails or returns without sending: no reply at all
//!
//! Only the first `send` per envelope is delivered.

use futures::future::join_all;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::codec;
use crate::engine::wire::{CorrelationId, Envelope, Reply};
use crate::errors::{CodecError, HiveError};
use crate::observability::messages::{
    drone::{NoHandlerRegistered, ReplyDropped, ReplySent},
    router::HandlerFailed,
    StructuredLog,
};
use crate::routing::TopicRouter;
use crate::traits::{handler_fn, Command, CommandHandler};

/// The inbound half of an envelope as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub topic: String,
    pub payload: Value,
    pub correlation_id: CorrelationId,
}

impl Request {
    /// Decode the payload into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        codec::decode(self.payload.clone())
    }
}

/// Reply capability for one envelope.
///
/// Clones share the same once-only flag.
#[derive(Debug, Clone)]
pub struct Responder {
    correlation_id: CorrelationId,
    outbound: UnboundedSender<Reply>,
    replied: Arc<AtomicBool>,
}

impl Responder {
    pub(crate) fn new(correlation_id: CorrelationId, outbound: UnboundedSender<Reply>) -> Self {
        Self {
            correlation_id,
            outbound,
            replied: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn has_replied(&self) -> bool {
        self.replied.load(Ordering::Acquire)
    }

    /// Post the reply for this envelope.
    ///
    /// The payload goes through [`codec::guard`] first. A second call for the
    /// same envelope fails with [`HiveError::AlreadyReplied`].
    pub fn send(&self, payload: Value) -> Result<(), HiveError> {
        if self.replied.swap(true, Ordering::AcqRel) {
            return Err(HiveError::AlreadyReplied(self.correlation_id.clone()));
        }

        self.outbound
            .send(Reply::new(&self.correlation_id, codec::guard(payload)))
            .map_err(|_| HiveError::ReplyChannelClosed(self.correlation_id.clone()))?;

        ReplySent {
            correlation_id: self.correlation_id.as_str(),
        }
        .log();
        Ok(())
    }

    /// Encode `value` and post it as the reply.
    pub fn send_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), HiveError> {
        let payload = codec::encode(value)?;
        self.send(payload)
    }
}

/// Topic-routed command responder living inside one worker.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use the_hive::engine::drone::Drone;
///
/// let mut drone = Drone::new();
/// let handler = drone.on_fn("double", |request, responder| async move {
///     let n = request.payload.as_i64().unwrap_or_default();
///     responder.send(json!(n * 2))?;
///     Ok(())
/// });
///
/// assert_eq!(drone.handler_count("double"), 1);
/// assert!(drone.off("double", &handler));
/// assert_eq!(drone.handler_count("double"), 0);
/// ```
#[derive(Debug, Default)]
pub struct Drone {
    router: TopicRouter<dyn CommandHandler>,
}

impl Drone {
    pub fn new() -> Self {
        Self {
            router: TopicRouter::new(),
        }
    }

    /// Subscribe `handler` to `topic`.
    pub fn on(&mut self, topic: impl Into<String>, handler: Arc<dyn CommandHandler>) -> &mut Self {
        self.router.register(topic, handler);
        self
    }

    /// Subscribe an async closure; the returned handle can be passed to [`off`](Drone::off).
    pub fn on_fn<F, Fut>(&mut self, topic: impl Into<String>, handler: F) -> Arc<dyn CommandHandler>
    where
        F: Fn(Request, Responder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let handler = handler_fn(handler);
        self.router.register(topic, Arc::clone(&handler));
        handler
    }

    /// Subscribe a typed handler under `C::TOPIC`.
    ///
    /// The payload is decoded into `C` and the handler's output is sent as
    /// the reply. A payload that does not decode counts as a failed handler.
    pub fn on_command<C, F, Fut>(&mut self, handler: F) -> Arc<dyn CommandHandler>
    where
        C: Command,
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<C::Output>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.on_fn(C::TOPIC, move |request: Request, responder: Responder| {
            let handler = Arc::clone(&handler);
            async move {
                let command: C = codec::decode(request.payload)?;
                let output = handler(command).await?;
                responder.send_json(&output)?;
                Ok(())
            }
        })
    }

    /// Unsubscribe one registration of `handler` from `topic`.
    pub fn off(&mut self, topic: &str, handler: &Arc<dyn CommandHandler>) -> bool {
        self.router.deregister(topic, handler)
    }

    pub fn handler_count(&self, topic: &str) -> usize {
        self.router.handler_count(topic)
    }

    pub fn topic_count(&self) -> usize {
        self.router.topic_count()
    }

    /// Handle one inbound envelope, posting any reply on `outbound`.
    pub async fn receive(&self, envelope: Envelope, outbound: UnboundedSender<Reply>) {
        let Envelope {
            topic,
            payload,
            correlation_id,
        } = envelope;

        let responder = Responder::new(correlation_id.clone(), outbound);
        let handlers = self.router.handlers(&topic);

        if handlers.is_empty() {
            NoHandlerRegistered {
                topic: &topic,
                correlation_id: correlation_id.as_str(),
            }
            .log();
            if let Err(err) = responder.send(Value::Null) {
                ReplyDropped {
                    correlation_id: correlation_id.as_str(),
                    error: &err,
                }
                .log();
            }
            return;
        }

        let request = Request {
            topic,
            payload,
            correlation_id,
        };

        let outcomes = join_all(
            handlers
                .iter()
                .map(|handler| handler.handle(request.clone(), responder.clone())),
        )
        .await;

        for err in outcomes.into_iter().filter_map(Result::err) {
            HandlerFailed {
                topic: &request.topic,
                error: &err,
            }
            .log();
        }
    }
}
