use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::net::UdpSocket;
use uuid::Uuid;

use formrelay::collector::Collector;
use formrelay::config::Config;
use formrelay::models::Record;
use formrelay::relay::{RelayReceiver, RelaySender};
use formrelay::store::{DocumentStore, MemoryStore, StoreError};

/// A running front-end with a test-owned socket standing in for the
/// collector, plus a dedicated temporary content root.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub content_root: PathBuf,
    pub relay: UdpSocket,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Write a file under the content root.
    pub fn write_asset(&self, relative: &str, contents: &[u8]) {
        let path = self.content_root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create asset dir");
        }
        std::fs::write(path, contents).expect("failed to write asset");
    }

    /// Post a raw form-urlencoded body, return the response.
    pub async fn post_form(&self, path: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("post request failed")
    }

    /// Await the next datagram the front-end relays, as text.
    pub async fn recv_relayed(&self) -> String {
        let mut buf = vec![0u8; 65_507];
        let (len, _) = tokio::time::timeout(Duration::from_secs(2), self.relay.recv_from(&mut buf))
            .await
            .expect("timed out waiting for relayed datagram")
            .expect("relay socket recv failed");
        String::from_utf8_lossy(&buf[..len]).into_owned()
    }

    /// Await a relayed datagram for at most `dur`; None if nothing shows.
    pub async fn relayed_within(&self, dur: Duration) -> Option<String> {
        let mut buf = vec![0u8; 65_507];
        match tokio::time::timeout(dur, self.relay.recv_from(&mut buf)).await {
            Ok(Ok((len, _))) => Some(String::from_utf8_lossy(&buf[..len]).into_owned()),
            _ => None,
        }
    }
}

/// Store that refuses any record carrying the given field and delegates
/// the rest. Drives the collector's insert-failure path in tests.
pub struct RejectingStore {
    inner: MemoryStore,
    reject_key: String,
}

impl RejectingStore {
    pub fn new(inner: MemoryStore, reject_key: &str) -> Self {
        Self {
            inner,
            reject_key: reject_key.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for RejectingStore {
    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        if record.doc.get(&self.reject_key).is_some() {
            return Err(StoreError::from("store unreachable".to_string()));
        }
        self.inner.insert(record).await
    }
}

/// A running collector with an in-memory store injected.
pub struct TestCollector {
    pub addr: SocketAddr,
    pub store: MemoryStore,
}

impl TestCollector {
    /// Send one raw datagram straight at the collector.
    pub async fn send(&self, payload: &str) {
        self.send_bytes(payload.as_bytes()).await;
    }

    pub async fn send_bytes(&self, payload: &[u8]) {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind scratch socket");
        socket
            .send_to(payload, self.addr)
            .await
            .expect("failed to send datagram");
    }

    /// Poll the store until it holds `count` records.
    pub async fn wait_for_records(&self, count: usize) -> Vec<Record> {
        for _ in 0..100 {
            let records = self.store.records();
            if records.len() >= count {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!(
            "timed out waiting for {count} records, have {}",
            self.store.len()
        );
    }
}

/// A full front-end + collector pipeline sharing an in-memory store.
pub struct TestPipeline {
    pub app: TestApp,
    pub collector: TestCollector,
}

fn test_config(relay_addr: SocketAddr, content_root: PathBuf, max_body_size: usize) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        relay_addr,
        collection: "messages".to_string(),
        content_root,
        max_body_size,
        log_level: "warn".to_string(),
    }
}

fn temp_content_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "formrelay_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    ));
    std::fs::create_dir_all(&root).expect("failed to create content root");
    root
}

async fn serve_app(relay_addr: SocketAddr, max_body_size: usize) -> (SocketAddr, PathBuf, Client) {
    let content_root = temp_content_root();
    let config = test_config(relay_addr, content_root.clone(), max_body_size);

    let sender = RelaySender::bind(relay_addr)
        .await
        .expect("failed to bind relay sender");
    let app = formrelay::build_app(sender, config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    // Redirects stay visible to the tests
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build client");

    (addr, content_root, client)
}

/// Spawn a front-end whose relay target is a socket held by the test.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_body_limit(1_048_576).await
}

pub async fn spawn_app_with_body_limit(max_body_size: usize) -> TestApp {
    let relay = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test relay socket");
    let relay_addr = relay.local_addr().unwrap();

    let (addr, content_root, client) = serve_app(relay_addr, max_body_size).await;

    TestApp {
        addr,
        client,
        content_root,
        relay,
    }
}

/// Spawn a collector over a fresh in-memory store.
pub async fn spawn_collector() -> TestCollector {
    let store = MemoryStore::new();
    spawn_collector_with(Arc::new(store.clone()), store).await
}

/// Spawn a collector over a caller-provided store. `records` is the
/// handle the test reads persisted records through.
pub async fn spawn_collector_with(
    store: Arc<dyn DocumentStore>,
    records: MemoryStore,
) -> TestCollector {
    let receiver = RelayReceiver::bind("127.0.0.1:0".parse().unwrap())
        .await
        .expect("failed to bind relay receiver");
    let collector = Collector::new(receiver, store);
    let addr = collector.local_addr().unwrap();

    tokio::spawn(collector.run());

    TestCollector {
        addr,
        store: records,
    }
}

/// Spawn front-end and collector wired together end to end.
pub async fn spawn_pipeline() -> TestPipeline {
    let collector = spawn_collector().await;

    let (addr, content_root, client) = serve_app(collector.addr, 1_048_576).await;

    // The pipeline never reads this socket; the collector owns the
    // target address. It only keeps TestApp's shape uniform.
    let relay = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("failed to bind spare socket");

    TestPipeline {
        app: TestApp {
            addr,
            client,
            content_root,
            relay,
        },
        collector,
    }
}

/// Remove the temporary content root.
pub async fn cleanup(app: TestApp) {
    let _ = std::fs::remove_dir_all(&app.content_root);
}

pub async fn cleanup_pipeline(pipeline: TestPipeline) {
    cleanup(pipeline.app).await;
}
