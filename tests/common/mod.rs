//! Minimal in-process stand-in for the EPSS distribution host
//!
//! Serves gzip-compressed CSV snapshots for dates up to a configured
//! "latest" date, answers the current-snapshot alias with a redirect to
//! that date, and counts requests so tests can assert how much network
//! work a sync actually performed.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// Snapshot payload served for every published date, metadata line included
pub const SAMPLE_CSV: &str = "\
#model_version:v2023.03.01,score_date:2023-07-14T00:00:00+0000
cve_id,epss,percentile
CVE-2021-44228,0.97565,0.99995
CVE-2014-0160,0.97234,0.99821
CVE-2023-1234,0.00042,0.05120
";

/// Number of data rows in [`SAMPLE_CSV`]
pub const SAMPLE_ROWS: usize = 3;

/// A running stub provider
pub struct StubProvider {
    pub base_url: Url,
    snapshot_requests: Arc<AtomicUsize>,
    probe_requests: Arc<AtomicUsize>,
}

impl StubProvider {
    /// Dated snapshot GETs served so far
    pub fn snapshot_requests(&self) -> usize {
        self.snapshot_requests.load(Ordering::SeqCst)
    }

    /// Latest-date probes served so far
    pub fn probe_requests(&self) -> usize {
        self.probe_requests.load(Ordering::SeqCst)
    }
}

/// Start a stub provider whose most recent published snapshot is `latest`
pub async fn start(latest: NaiveDate) -> StubProvider {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let snapshot_requests = Arc::new(AtomicUsize::new(0));
    let probe_requests = Arc::new(AtomicUsize::new(0));
    let snapshots = snapshot_requests.clone();
    let probes = probe_requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let snapshots = snapshots.clone();
            let probes = probes.clone();
            tokio::spawn(async move {
                serve_connection(socket, latest, snapshots, probes).await;
            });
        }
    });

    StubProvider {
        base_url: Url::parse(&format!("http://{addr}")).unwrap(),
        snapshot_requests,
        probe_requests,
    }
}

async fn serve_connection(
    mut socket: TcpStream,
    latest: NaiveDate,
    snapshots: Arc<AtomicUsize>,
    probes: Arc<AtomicUsize>,
) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

    let response = if path.contains("current") {
        probes.fetch_add(1, Ordering::SeqCst);
        format!(
            "HTTP/1.1 302 Found\r\nLocation: /epss_scores-{latest}.csv.gz\r\n\
             Content-Length: 0\r\nConnection: close\r\n\r\n"
        )
        .into_bytes()
    } else if published_date(&path).is_some_and(|date| date <= latest) {
        snapshots.fetch_add(1, Ordering::SeqCst);
        let body = gzip_csv(SAMPLE_CSV);
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/gzip\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(&body);
        response
    } else {
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec()
    };

    let _ = socket.write_all(&response).await;
    let _ = socket.shutdown().await;
}

/// Date encoded in a dated-snapshot request path, if any
fn published_date(path: &str) -> Option<NaiveDate> {
    let stem = path
        .strip_prefix("/epss_scores-")?
        .strip_suffix(".csv.gz")?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

/// Gzip-compress a snapshot payload the way the provider publishes it
pub fn gzip_csv(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}
