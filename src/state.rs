use std::sync::Arc;

use vins_api::config::AppConfig;
use vins_api::search::EsClient;
use vins_api::service::VinService;

/// Shared per-process state / 进程级共享状态
///
/// Handlers are stateless; everything they share lives here behind one Arc.
/// The search client owns the pooled connections, so concurrent requests
/// reuse transport without any locking on our side.
pub struct AppState {
    pub config: AppConfig,
    pub search: Arc<EsClient>,
    pub vins: VinService,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let search = Arc::new(EsClient::new(&config.elasticsearch)?);
        let vins = VinService::new(search.clone(), config.elasticsearch.index.clone());

        Ok(Self {
            config,
            search,
            vins,
        })
    }

    /// Service name reported by health endpoints / 健康检查上报的服务名
    pub fn service_name(&self) -> String {
        format!("auto-discovery-{}", self.config.service.name)
    }
}
