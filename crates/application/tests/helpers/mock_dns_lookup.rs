#![allow(dead_code)]

use async_trait::async_trait;
use seedlist_application::ports::DnsLookup;
use seedlist_domain::{DomainError, SrvRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsLookup
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDnsLookup {
    srv: Arc<RwLock<HashMap<String, Vec<SrvRecord>>>>,
    txt: Arc<RwLock<HashMap<String, Vec<String>>>>,
    should_fail: Arc<RwLock<bool>>,
    delay: Arc<RwLock<Option<Duration>>>,
    srv_queries: Arc<AtomicUsize>,
    txt_queries: Arc<AtomicUsize>,
    last_srv_name: Arc<RwLock<Option<String>>>,
}

impl MockDnsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// SRV answer for a service name such as `_mongodb._tcp.cluster0.example.com`
    pub async fn set_srv(&self, name: &str, records: Vec<SrvRecord>) {
        self.srv.write().await.insert(name.to_string(), records);
    }

    pub async fn set_txt(&self, name: &str, records: Vec<&str>) {
        self.txt.write().await.insert(
            name.to_string(),
            records.into_iter().map(String::from).collect(),
        );
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    /// Every query sleeps this long before answering
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub fn srv_queries(&self) -> usize {
        self.srv_queries.load(Ordering::SeqCst)
    }

    pub fn txt_queries(&self) -> usize {
        self.txt_queries.load(Ordering::SeqCst)
    }

    pub async fn last_srv_name(&self) -> Option<String> {
        self.last_srv_name.read().await.clone()
    }

    async fn simulate(&self) -> Result<(), DomainError> {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.should_fail.read().await {
            return Err(DomainError::TransportConnectionRefused {
                server: "127.0.0.1:53".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DnsLookup for MockDnsLookup {
    async fn query_service_records(&self, name: &str) -> Result<Vec<SrvRecord>, DomainError> {
        self.srv_queries.fetch_add(1, Ordering::SeqCst);
        *self.last_srv_name.write().await = Some(name.to_string());
        self.simulate().await?;

        Ok(self.srv.read().await.get(name).cloned().unwrap_or_default())
    }

    async fn query_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.txt_queries.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;

        Ok(self.txt.read().await.get(name).cloned().unwrap_or_default())
    }
}
