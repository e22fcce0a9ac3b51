#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{SRV, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::{oneshot, RwLock};

#[derive(Default)]
struct Zone {
    srv: HashMap<String, Vec<(String, u16)>>,
    txt: HashMap<String, Vec<Vec<String>>>,
    rcode: Option<ResponseCode>,
    truncate_udp: bool,
    silent: bool,
    wrong_id: bool,
}

#[derive(Default)]
struct Counters {
    udp: AtomicUsize,
    tcp: AtomicUsize,
}

/// Nameserver on 127.0.0.1 answering SRV and TXT questions from an in-memory
/// zone, over UDP and TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    zone: Arc<RwLock<Zone>>,
    counters: Arc<Counters>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let zone = Arc::new(RwLock::new(Zone::default()));
        let counters = Arc::new(Counters::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_zone = Arc::clone(&zone);
        let udp_counters = Arc::clone(&counters);
        let tcp_zone = Arc::clone(&zone);
        let tcp_counters = Arc::clone(&counters);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        udp_counters.udp.fetch_add(1, Ordering::SeqCst);

                        let zone = udp_zone.read().await;
                        if zone.silent {
                            continue;
                        }
                        if let Some(response) = answer(&zone, &buf[..len], true) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tcp_counters.tcp.fetch_add(1, Ordering::SeqCst);
                let zone = Arc::clone(&tcp_zone);

                tokio::spawn(async move {
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        return;
                    }
                    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                    if stream.read_exact(&mut query).await.is_err() {
                        return;
                    }

                    let response = {
                        let zone = zone.read().await;
                        answer(&zone, &query, false)
                    };
                    if let Some(response) = response {
                        let len = (response.len() as u16).to_be_bytes();
                        let _ = stream.write_all(&len).await;
                        let _ = stream.write_all(&response).await;
                    }
                });
            }
        });

        Ok(Self {
            addr,
            zone,
            counters,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `owner` without trailing dot, e.g. `_mongodb._tcp.test.build.10gen.cc`.
    pub async fn add_srv(&self, owner: &str, target: &str, port: u16) {
        self.zone
            .write()
            .await
            .srv
            .entry(owner.to_string())
            .or_default()
            .push((target.to_string(), port));
    }

    /// One call per TXT record; each element of `strings` is one
    /// character-string of that record.
    pub async fn add_txt(&self, owner: &str, strings: &[&str]) {
        self.zone
            .write()
            .await
            .txt
            .entry(owner.to_string())
            .or_default()
            .push(strings.iter().map(|s| s.to_string()).collect());
    }

    pub async fn set_rcode(&self, rcode: ResponseCode) {
        self.zone.write().await.rcode = Some(rcode);
    }

    /// UDP answers come back empty with the TC bit; TCP answers are complete.
    pub async fn set_truncate_udp(&self, truncate: bool) {
        self.zone.write().await.truncate_udp = truncate;
    }

    /// Receive UDP queries but never answer.
    pub async fn set_silent(&self, silent: bool) {
        self.zone.write().await.silent = silent;
    }

    pub async fn set_wrong_id(&self, wrong_id: bool) {
        self.zone.write().await.wrong_id = wrong_id;
    }

    pub fn udp_queries(&self) -> usize {
        self.counters.udp.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.counters.tcp.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn answer(zone: &Zone, query_bytes: &[u8], over_udp: bool) -> Option<Vec<u8>> {
    let query_message = Message::from_vec(query_bytes).ok()?;
    let query = query_message.queries().first()?.clone();

    let id = if zone.wrong_id {
        query_message.id().wrapping_add(1)
    } else {
        query_message.id()
    };

    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.add_query(query.clone());

    let owner = query.name().clone();
    let key = owner.to_utf8().trim_end_matches('.').to_string();

    if let Some(rcode) = zone.rcode {
        response.set_response_code(rcode);
        return encode(&response);
    }

    if over_udp && zone.truncate_udp {
        response.set_truncated(true);
        return encode(&response);
    }

    let mut found = false;
    match query.query_type() {
        RecordType::SRV => {
            for (target, port) in zone.srv.get(&key).into_iter().flatten() {
                let target = Name::from_str(target).ok()?;
                response.add_answer(Record::from_rdata(
                    owner.clone(),
                    60,
                    RData::SRV(SRV::new(0, 0, *port, target)),
                ));
                found = true;
            }
        }
        RecordType::TXT => {
            for strings in zone.txt.get(&key).into_iter().flatten() {
                response.add_answer(Record::from_rdata(
                    owner.clone(),
                    60,
                    RData::TXT(TXT::new(strings.clone())),
                ));
                found = true;
            }
        }
        _ => {}
    }

    let known = zone.srv.contains_key(&key) || zone.txt.contains_key(&key);
    if !found && !known {
        response.set_response_code(ResponseCode::NXDomain);
    }

    encode(&response)
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).ok()?;
    Some(buf)
}
