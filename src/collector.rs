use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::models::Record;
use crate::relay::RelayReceiver;
use crate::store::DocumentStore;
use crate::submission::parser;

/// Owns the receiving half of the relay channel and the store handle.
/// The loop is strictly sequential: one datagram is fully decoded and
/// persisted before the next is accepted.
pub struct Collector {
    receiver: RelayReceiver,
    store: Arc<dyn DocumentStore>,
}

impl Collector {
    pub fn new(receiver: RelayReceiver, store: Arc<dyn DocumentStore>) -> Self {
        Self { receiver, store }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.receiver.local_addr()
    }

    /// Receive loop. No error path breaks out of it; the process is
    /// stopped only by external shutdown.
    pub async fn run(self) {
        loop {
            let (payload, addr) = match self.receiver.recv().await {
                Ok(received) => received,
                Err(e) => {
                    tracing::error!("relay receive failed: {e}");
                    continue;
                }
            };
            self.ingest(&payload, addr).await;
        }
    }

    async fn ingest(&self, payload: &[u8], addr: SocketAddr) {
        let text = match std::str::from_utf8(payload) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("discarding non-UTF-8 datagram from {addr}: {e}");
                return;
            }
        };

        let fields = match parser::parse_submission(text) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("discarding malformed datagram from {addr}: {e}");
                return;
            }
        };

        let record = Record::stamped(fields);

        // Insert failures drop the record: there is no retry queue.
        match self.store.insert(&record).await {
            Ok(()) => tracing::info!("stored submission from {addr}"),
            Err(e) => tracing::error!("failed to store record from {addr}: {e}"),
        }
    }
}
