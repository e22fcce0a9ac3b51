use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use seedlist_domain::{DomainError, SrvRecord};
use tracing::debug;

/// SRV and TXT content of an upstream answer, in answer-section order.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub srv_records: Vec<SrvRecord>,

    /// One entry per TXT record, character-strings joined by a space.
    pub txt_records: Vec<String>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut srv_records = Vec::new();
        let mut txt_records = Vec::new();

        for record in message.answers() {
            match record.data() {
                RData::SRV(srv) => {
                    srv_records.push(
                        SrvRecord::new(srv.target().to_utf8(), srv.port())
                            .with_priority(srv.priority(), srv.weight()),
                    );
                }
                RData::TXT(txt) => {
                    let segments: Vec<String> = txt
                        .txt_data()
                        .iter()
                        .map(|segment| String::from_utf8_lossy(segment).into_owned())
                        .collect();
                    txt_records.push(segments.join(" "));
                }
                other => {
                    debug!(record_type = ?other.record_type(), "Ignoring answer record");
                }
            }
        }

        debug!(
            rcode = ?rcode,
            srv = srv_records.len(),
            txt = txt_records.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            srv_records,
            txt_records,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
