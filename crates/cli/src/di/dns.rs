use relaydns_application::use_cases::QueryRouter;
use relaydns_domain::Config;
use relaydns_infrastructure::dns::{
    DnsCache, DnsCacheConfig, DnsServer, InFlightTable, RandomIdSource, UdpTransport, WireCodec,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub codec: Arc<WireCodec>,
    pub transport: Arc<UdpTransport>,
    pub cache: Arc<DnsCache>,
    pub pending: Arc<InFlightTable>,
    pub server: Arc<DnsServer>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let bind_addr = config.server.dns_socket_addr()?;
        let upstream = config.upstream.socket_addr()?;

        let codec = Arc::new(WireCodec::new());
        let transport = Arc::new(UdpTransport::bind(bind_addr, upstream).await?);
        let cache = Arc::new(DnsCache::new(DnsCacheConfig::from(&config.cache)));
        let pending = Arc::new(InFlightTable::new(config.dns.max_pending));

        let router = Arc::new(
            QueryRouter::new(
                codec.clone(),
                transport.clone(),
                cache.clone(),
                pending.clone(),
                Arc::new(RandomIdSource),
            )
            .with_id_allocation_attempts(config.dns.id_allocation_attempts),
        );

        let server = Arc::new(DnsServer::new(transport.clone(), router));

        info!(
            bind_address = %transport.local_addr()?,
            upstream = %upstream,
            max_pending = config.dns.max_pending,
            cache_enabled = config.cache.enabled,
            "DNS services initialized"
        );

        Ok(Self {
            codec,
            transport,
            cache,
            pending,
            server,
        })
    }
}
