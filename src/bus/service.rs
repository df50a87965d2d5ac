use super::error::{BusError, HandlerError};
use super::protocol::{DeliverRequest, DeliverResponse, ENDPOINT_DELIVER};
use super::registry::ChannelRegistry;
use crate::membership::service::MembershipService;
use crate::membership::types::Node;

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// How the bus picks one of N live registrants for a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryStrategy {
    /// Cycle through registrants in stable (node-id) order.
    RoundRobin,
    /// Pick a registrant uniformly at random.
    Random,
}

impl DeliveryStrategy {
    pub(crate) fn pick(&self, len: usize, counter: &AtomicUsize) -> usize {
        match self {
            DeliveryStrategy::RoundRobin => counter.fetch_add(1, Ordering::Relaxed) % len,
            DeliveryStrategy::Random => {
                use rand::Rng;
                rand::thread_rng().gen_range(0..len)
            }
        }
    }
}

/// The cluster command bus.
///
/// Routing is channel-based: membership gossip tells every node which alive
/// members serve which channels, and the bus delivers each command to exactly
/// one of them. Local registrants are invoked directly; remote ones receive
/// an HTTP POST on their deliver endpoint.
pub struct CommandBus {
    membership: Arc<MembershipService>,
    registry: Arc<ChannelRegistry>,
    http_client: reqwest::Client,
    strategy: DeliveryStrategy,
    next_target: AtomicUsize,
}

impl CommandBus {
    pub fn new(membership: Arc<MembershipService>) -> Arc<Self> {
        Self::with_strategy(membership, DeliveryStrategy::RoundRobin)
    }

    pub fn with_strategy(
        membership: Arc<MembershipService>,
        strategy: DeliveryStrategy,
    ) -> Arc<Self> {
        Arc::new(Self {
            membership,
            registry: ChannelRegistry::new(),
            http_client: reqwest::Client::new(),
            strategy,
            next_target: AtomicUsize::new(0),
        })
    }

    /// The local handler table, for wiring up the deliver endpoint.
    pub fn registry(&self) -> Arc<ChannelRegistry> {
        self.registry.clone()
    }

    /// Binds a handler to a channel in this process and advertises the
    /// channel to the cluster. Re-registering replaces the previous handler;
    /// the advertisement is idempotent.
    pub async fn register_handler<F, Fut>(&self, channel: &str, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.registry.register(channel, handler);
        self.membership.advertise_channel(channel).await;
    }

    /// Sends `payload` to exactly one live handler on `channel` and awaits
    /// one reply within `timeout`.
    pub async fn request(
        &self,
        channel: &str,
        payload: Value,
        timeout: Duration,
    ) -> Result<Value, BusError> {
        let target = self
            .pick_target(channel)
            .ok_or_else(|| BusError::NoHandlerAvailable(channel.to_string()))?;

        let correlation_id = Uuid::new_v4().to_string();

        if target.id == self.membership.local_node.id {
            tracing::debug!(
                "Request {} on '{}' handled locally",
                correlation_id,
                channel
            );
            return self.invoke_local(channel, payload, timeout).await;
        }

        tracing::debug!(
            "Request {} on '{}' routed to {:?} at {}",
            correlation_id,
            channel,
            target.id,
            target.bus_addr
        );
        self.request_remote(&target, channel, correlation_id, payload, timeout)
            .await
    }

    /// Fire-and-forget: delivers `payload` to one live handler and drops the
    /// outcome. No delivery guarantee is surfaced to the caller.
    pub fn send(&self, channel: &str, payload: Value) {
        let Some(target) = self.pick_target(channel) else {
            tracing::warn!("Send on '{}' dropped: no handler available", channel);
            return;
        };

        if target.id == self.membership.local_node.id {
            let registry = self.registry.clone();
            let channel = channel.to_string();
            tokio::spawn(async move {
                if let Some(Err(e)) = registry.invoke(&channel, payload).await {
                    tracing::warn!("Send on '{}' failed in handler: {}", channel, e);
                }
            });
            return;
        }

        let request = DeliverRequest {
            channel: channel.to_string(),
            correlation_id: Uuid::new_v4().to_string(),
            payload,
            expects_reply: false,
        };

        let client = self.http_client.clone();
        let url = format!("http://{}{}", target.bus_addr, ENDPOINT_DELIVER);
        let channel = channel.to_string();
        let target_id = target.id;
        tokio::spawn(async move {
            if let Err(e) = client
                .post(url)
                .json(&request)
                .timeout(Duration::from_secs(5))
                .send()
                .await
            {
                tracing::warn!("Send on '{}' to {:?} failed: {}", channel, target_id, e);
            }
        });
    }

    fn pick_target(&self, channel: &str) -> Option<Node> {
        let mut targets = self.membership.nodes_serving(channel);
        if targets.is_empty() {
            return None;
        }

        // Member iteration order is not stable; sort so round-robin actually
        // cycles.
        targets.sort_by(|a, b| a.id.0.cmp(&b.id.0));

        let idx = self.strategy.pick(targets.len(), &self.next_target);
        Some(targets.swap_remove(idx))
    }

    async fn invoke_local(
        &self,
        channel: &str,
        payload: Value,
        timeout: Duration,
    ) -> Result<Value, BusError> {
        match tokio::time::timeout(timeout, self.registry.invoke(channel, payload)).await {
            Err(_) => Err(BusError::Timeout(channel.to_string())),
            // Advertised but not (yet) registered: a registration race.
            Ok(None) => Err(BusError::NoHandlerAvailable(channel.to_string())),
            Ok(Some(Ok(reply))) => Ok(reply),
            Ok(Some(Err(e))) => Err(BusError::HandlerFailed(e.to_string())),
        }
    }

    async fn request_remote(
        &self,
        target: &Node,
        channel: &str,
        correlation_id: String,
        payload: Value,
        timeout: Duration,
    ) -> Result<Value, BusError> {
        let request = DeliverRequest {
            channel: channel.to_string(),
            correlation_id,
            payload,
            expects_reply: true,
        };

        let url = format!("http://{}{}", target.bus_addr, ENDPOINT_DELIVER);
        let response = self
            .http_client
            .post(url)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BusError::Timeout(channel.to_string())
                } else {
                    BusError::Transport(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BusError::NoHandlerAvailable(channel.to_string()));
        }
        if !response.status().is_success() {
            return Err(BusError::Transport(format!(
                "deliver endpoint returned {}",
                response.status()
            )));
        }

        let reply: DeliverResponse = response
            .json()
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;

        match reply.error {
            Some(message) => Err(BusError::HandlerFailed(message)),
            None => Ok(reply.payload.unwrap_or(Value::Null)),
        }
    }
}
