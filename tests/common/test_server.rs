use pbdns_exporter_api::{create_routes, AppState};
use pbdns_exporter_application::ProcessEventUseCase;
use pbdns_exporter_domain::PrefixWidth;
use pbdns_exporter_infrastructure::metrics::ExporterMetrics;
use pbdns_exporter_infrastructure::telemetry::{
    ConnectionSupervisor, EventConsumer, EventHandoff, FrameSettings,
};
use pbdns_exporter_infrastructure::transaction_log::WriterTransactionLog;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Ingest listener plus scrape endpoint on ephemeral loopback ports,
/// wired the same way the binary wires them.
pub struct TestServer {
    ingest_addr: SocketAddr,
    web_addr: SocketAddr,
    metrics_path: String,
    prefix_width: PrefixWidth,
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        TestServerBuilder::new().build().await
    }

    pub fn ingest_addr(&self) -> SocketAddr {
        self.ingest_addr
    }

    pub fn prefix_width(&self) -> PrefixWidth {
        self.prefix_width
    }

    /// Opens a sender connection to the ingest listener.
    pub async fn connect(&self) -> TcpStream {
        TcpStream::connect(self.ingest_addr)
            .await
            .expect("connect to ingest listener")
    }

    /// Plain HTTP/1.1 GET against the web listener, returning (status line, body).
    pub async fn get(&self, path: &str) -> (String, String) {
        let mut stream = TcpStream::connect(self.web_addr)
            .await
            .expect("connect to web listener");

        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            path, self.web_addr
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let raw = String::from_utf8_lossy(&raw).into_owned();

        let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw.as_str(), ""));
        let status = head.lines().next().unwrap_or_default().to_string();
        (status, body.to_string())
    }

    pub async fn scrape(&self) -> String {
        let path = self.metrics_path.clone();
        self.get(&path).await.1
    }

    /// Polls the scrape endpoint until `needle` shows up.
    pub async fn wait_for_metric(&self, needle: &str) -> String {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let body = self.scrape().await;
                if body.contains(needle) {
                    return body;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("metric {:?} never appeared", needle))
    }

    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        for task in self.tasks.drain(..) {
            let _ = tokio::time::timeout(Duration::from_secs(5), task).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub struct TestServerBuilder {
    metrics_path: String,
    prefix_width: PrefixWidth,
    capacity: usize,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            metrics_path: "/metrics".to_string(),
            prefix_width: PrefixWidth::U32,
            capacity: 256,
        }
    }

    pub fn with_metrics_path(mut self, path: &str) -> Self {
        self.metrics_path = path.to_string();
        self
    }

    pub fn with_prefix_width(mut self, width: PrefixWidth) -> Self {
        self.prefix_width = width;
        self
    }

    pub async fn build(self) -> Result<TestServer, std::io::Error> {
        let metrics = Arc::new(
            ExporterMetrics::new("pdns_protobuf", "rpz").map_err(std::io::Error::other)?,
        );
        let log = Arc::new(WriterTransactionLog::new(std::io::sink()));
        let use_case = Arc::new(ProcessEventUseCase::new(metrics.clone(), log));

        let (handoff, rx) =
            EventHandoff::bounded(self.capacity, Duration::from_millis(250), metrics.clone());
        let consumer = EventConsumer::new(use_case).start(rx);

        let supervisor = ConnectionSupervisor::bind(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            handoff,
            FrameSettings {
                prefix_width: self.prefix_width,
                max_frame_size: 1024 * 1024,
            },
        )
        .await?;
        let ingest_addr = supervisor.local_addr()?;

        let web_listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let web_addr = web_listener.local_addr()?;
        let app = create_routes(AppState::new(metrics, &self.metrics_path));

        let shutdown = CancellationToken::new();

        let ingest_task = tokio::spawn(supervisor.run(shutdown.clone()));

        let web_shutdown = shutdown.clone();
        let web_task = tokio::spawn(async move {
            let _ = axum::serve(web_listener, app)
                .with_graceful_shutdown(async move { web_shutdown.cancelled().await })
                .await;
        });

        Ok(TestServer {
            ingest_addr,
            web_addr,
            metrics_path: self.metrics_path,
            prefix_width: self.prefix_width,
            shutdown,
            tasks: vec![ingest_task, web_task, consumer],
        })
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
