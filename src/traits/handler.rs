// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::engine::drone::{Request, Responder};

/// Drone-side handler for one topic.
///
/// A handler answers by calling [`Responder::send`]. Returning `Err` is
/// logged by the drone; no reply is emitted on the handler's behalf.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, request: Request, responder: Responder) -> anyhow::Result<()>;
}

/// Adapter turning an async closure into a [`CommandHandler`].
pub struct FnHandler<F> {
    handler: F,
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Request, Responder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, request: Request, responder: Responder) -> anyhow::Result<()> {
        (self.handler)(request, responder).await
    }
}

/// Wrap an async closure as a shareable handler.
///
/// ```
/// use the_hive::traits::handler_fn;
///
/// let shout = handler_fn(|request, responder| async move {
///     let text = request.payload.as_str().unwrap_or_default().to_uppercase();
///     responder.send(text.into())?;
///     Ok(())
/// });
/// # drop(shout);
/// ```
pub fn handler_fn<F, Fut>(handler: F) -> Arc<dyn CommandHandler>
where
    F: Fn(Request, Responder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(FnHandler { handler })
}
