use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::tcp::TcpTransport;
use super::transport::udp::UdpTransport;
use super::transport::DnsTransport;
use async_trait::async_trait;
use hickory_proto::rr::RecordType;
use seedlist_application::ports::DnsLookup;
use seedlist_domain::{DomainError, SrvRecord};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Stub DNS client bound to a single nameserver.
///
/// Queries go out over UDP; a truncated answer is retried once over TCP.
/// NXDOMAIN and empty NOERROR answers both mean "no records".
pub struct WireDnsClient {
    server: SocketAddr,
    udp: UdpTransport,
    tcp: TcpTransport,
    io_timeout: Duration,
}

impl WireDnsClient {
    pub fn new(server: SocketAddr, io_timeout: Duration) -> Self {
        Self {
            server,
            udp: UdpTransport::new(server),
            tcp: TcpTransport::new(server),
            io_timeout,
        }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    async fn query(&self, name: &str, record_type: RecordType) -> Result<DnsResponse, DomainError> {
        let (id, bytes) = MessageBuilder::build_query(name, record_type)?;

        debug!(
            server = %self.server,
            name = %name,
            record_type = %record_type,
            "Sending DNS query"
        );

        let mut response = self.exchange(&self.udp, id, &bytes).await?;

        if response.truncated {
            debug!(name = %name, "UDP answer truncated, retrying over TCP");
            response = self.exchange(&self.tcp, id, &bytes).await?;
        }

        if response.is_nxdomain() {
            debug!(name = %name, record_type = %record_type, "NXDOMAIN, no records");
            return Ok(response);
        }

        if !response.is_success() {
            return Err(DomainError::UpstreamFailure {
                rcode: ResponseParser::rcode_to_status(response.rcode).to_string(),
            });
        }

        Ok(response)
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        id: u16,
        bytes: &[u8],
    ) -> Result<DnsResponse, DomainError> {
        let raw = transport.send(bytes, self.io_timeout).await?;
        let response = ResponseParser::parse(&raw.bytes)?;

        if response.id != id {
            warn!(
                server = %self.server,
                protocol = raw.protocol_used,
                expected = id,
                received = response.id,
                "DNS response ID mismatch"
            );
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                response.id, id
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl DnsLookup for WireDnsClient {
    async fn query_service_records(&self, name: &str) -> Result<Vec<SrvRecord>, DomainError> {
        let response = self.query(name, RecordType::SRV).await?;
        Ok(response.srv_records)
    }

    async fn query_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let response = self.query(name, RecordType::TXT).await?;
        Ok(response.txt_records)
    }
}
