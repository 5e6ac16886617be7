// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Topic router: an ordered subscription table shared by drones and the queen.
//!
//! Drones route inbound commands by topic; the queen routes replies by
//! correlation id using the very same table. The router owns no concurrency
//! of its own; callers wrap it in whatever lock their context needs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::observability::messages::{router::HandlerFailed, StructuredLog};

/// Maps a topic to the handlers subscribed to it, in registration order.
///
/// Handler identity is pointer identity of the `Arc` handed to
/// [`register`](TopicRouter::register): keep a clone of it to
/// [`deregister`](TopicRouter::deregister) later.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use the_hive::routing::TopicRouter;
///
/// type Callback = dyn Fn(&str) -> anyhow::Result<()> + Send + Sync;
///
/// let mut router: TopicRouter<Callback> = TopicRouter::new();
/// let greet: Arc<Callback> = Arc::new(|name: &str| -> anyhow::Result<()> {
///     println!("hello {}", name);
///     Ok(())
/// });
///
/// router.register("greet", greet.clone());
/// assert_eq!(router.dispatch("greet", |handler| handler("bee")), 1);
///
/// assert!(router.deregister("greet", &greet));
/// assert_eq!(router.dispatch("greet", |handler| handler("bee")), 0);
/// ```
pub struct TopicRouter<H: ?Sized> {
    subscriptions: HashMap<String, Vec<Arc<H>>>,
}

impl<H: ?Sized> TopicRouter<H> {
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
        }
    }

    /// Append `handler` to the topic's list. No uniqueness check is made.
    pub fn register(&mut self, topic: impl Into<String>, handler: Arc<H>) -> &mut Self {
        self.subscriptions
            .entry(topic.into())
            .or_default()
            .push(handler);
        self
    }

    /// Remove the first registration of `handler` under `topic`.
    ///
    /// Returns `false` when the topic is unknown or the handler isn't registered.
    pub fn deregister(&mut self, topic: &str, handler: &Arc<H>) -> bool {
        let Some(handlers) = self.subscriptions.get_mut(topic) else {
            return false;
        };

        let Some(position) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) else {
            return false;
        };

        handlers.remove(position);
        if handlers.is_empty() {
            self.subscriptions.remove(topic);
        }
        true
    }

    /// Invoke every handler registered for `topic`, in registration order.
    ///
    /// Each invocation is isolated: an error is logged and the remaining
    /// handlers still run. Returns the number of handlers invoked.
    pub fn dispatch<F>(&self, topic: &str, mut invoke: F) -> usize
    where
        F: FnMut(&H) -> anyhow::Result<()>,
    {
        let Some(handlers) = self.subscriptions.get(topic) else {
            return 0;
        };

        for handler in handlers {
            if let Err(err) = invoke(&**handler) {
                HandlerFailed {
                    topic,
                    error: &err,
                }
                .log();
            }
        }

        handlers.len()
    }

    /// Snapshot of the handlers registered for `topic`.
    pub fn handlers(&self, topic: &str) -> Vec<Arc<H>> {
        self.subscriptions
            .get(topic)
            .map(|handlers| handlers.to_vec())
            .unwrap_or_default()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.subscriptions.contains_key(topic)
    }

    pub fn handler_count(&self, topic: &str) -> usize {
        self.subscriptions.get(topic).map_or(0, Vec::len)
    }

    pub fn topic_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Keep only the handlers for which `keep` returns `true`.
    ///
    /// Returns the number of handlers removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &H) -> bool,
    {
        let mut removed = 0;
        self.subscriptions.retain(|topic, handlers| {
            let before = handlers.len();
            handlers.retain(|handler| keep(topic.as_str(), &**handler));
            removed += before - handlers.len();
            !handlers.is_empty()
        });
        removed
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl<H: ?Sized> Default for TopicRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> std::fmt::Debug for TopicRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicRouter")
            .field("topic_count", &self.subscriptions.len())
            .field("topics", &self.subscriptions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Callback = dyn Fn(u32) -> anyhow::Result<()> + Send + Sync;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> Arc<Callback> {
        let log = Arc::clone(log);
        Arc::new(move |value: u32| -> anyhow::Result<()> {
            log.lock().unwrap().push(format!("{}:{}", label, value));
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_invokes_all_handlers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        router
            .register("tick", recorder(&log, "a"))
            .register("tick", recorder(&log, "b"))
            .register("tock", recorder(&log, "c"));

        let invoked = router.dispatch("tick", |handler| handler(1));

        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), vec!["a:1", "b:1"]);
    }

    #[test]
    fn test_register_then_deregister_leaves_no_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        let handler = recorder(&log, "h");

        router.register("topic", handler.clone());
        assert!(router.deregister("topic", &handler));

        assert_eq!(router.handler_count("topic"), 0);
        assert!(!router.contains("topic"));
        assert_eq!(router.dispatch("topic", |h| h(9)), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deregister_removes_only_first_identical_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        let handler = recorder(&log, "dup");

        router.register("topic", handler.clone());
        router.register("topic", handler.clone());
        assert!(router.deregister("topic", &handler));

        assert_eq!(router.handler_count("topic"), 1);
    }

    #[test]
    fn test_deregister_unknown_is_reported_not_fatal() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        let registered = recorder(&log, "registered");
        let stranger = recorder(&log, "stranger");
        router.register("topic", registered);

        assert!(!router.deregister("missing", &stranger));
        assert!(!router.deregister("topic", &stranger));
        assert_eq!(router.handler_count("topic"), 1);
    }

    #[test]
    fn test_failing_handler_does_not_block_the_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        let failing: Arc<Callback> =
            Arc::new(|_: u32| -> anyhow::Result<()> { anyhow::bail!("nope") });
        router
            .register("topic", failing)
            .register("topic", recorder(&log, "after"));

        let invoked = router.dispatch("topic", |handler| handler(2));

        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), vec!["after:2"]);
    }

    #[test]
    fn test_retain_drops_rejected_handlers_and_empty_topics() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router: TopicRouter<Callback> = TopicRouter::new();
        router
            .register("keep", recorder(&log, "k"))
            .register("drop", recorder(&log, "d1"))
            .register("drop", recorder(&log, "d2"));

        let removed = router.retain(|topic, _| topic == "keep");

        assert_eq!(removed, 2);
        assert_eq!(router.topic_count(), 1);
        assert!(router.contains("keep"));
    }
}
