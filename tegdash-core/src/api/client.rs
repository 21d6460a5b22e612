//! Typed client for the four simulation service endpoints.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{DailyCycle, DeviceViability, RealAnalysisResult, SimulationResult};
use super::transport::{HttpTransport, Transport};
use crate::params::{
    DailyCycleQuery, DeviceQuery, QueryPairs, RealAnalysisParameters, SimulationParameters,
};

/// Service endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Simulation,
    DailyCycle,
    RealAnalysis,
    Device,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Simulation => "/api/simular-teoria",
            Endpoint::DailyCycle => "/api/ciclo-diario",
            Endpoint::RealAnalysis => "/api/analisis-real",
            Endpoint::Device => "/api/analizar-dispositivo",
        }
    }
}

/// Client bound to one service origin.
pub struct ApiClient {
    base: String,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base", &self.base).finish()
    }
}

impl ApiClient {
    /// Client using the blocking HTTP transport.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Self::with_transport(base_url, Box::new(HttpTransport::new(timeout)?))
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(base_url: &str, transport: Box<dyn Transport>) -> Result<Self, ApiError> {
        let base = base_url.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base, transport })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Full request URL for an endpoint and its query.
    pub fn url(&self, endpoint: Endpoint, query: &QueryPairs) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base, endpoint.path()))
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.clone()))?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &QueryPairs,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint, query)?;
        tracing::debug!(%url, "GET");

        let resp = self.transport.get(&url).map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), error = %e, "request failed");
            e
        })?;

        if !resp.is_success() {
            tracing::warn!(endpoint = endpoint.path(), status = resp.status, "non-success status");
            return Err(ApiError::HttpStatus {
                status: resp.status,
            });
        }

        serde_json::from_str(&resp.body).map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), error = %e, "unparseable body");
            ApiError::Parse {
                endpoint: endpoint.path(),
                message: e.to_string(),
            }
        })
    }

    pub fn simulate(&self, params: &SimulationParameters) -> Result<SimulationResult, ApiError> {
        self.get_json(Endpoint::Simulation, &params.to_query())
    }

    pub fn daily_cycle(&self, query: &DailyCycleQuery) -> Result<DailyCycle, ApiError> {
        self.get_json(Endpoint::DailyCycle, &query.to_query())
    }

    pub fn analyze(&self, params: &RealAnalysisParameters) -> Result<RealAnalysisResult, ApiError> {
        self.get_json(Endpoint::RealAnalysis, &params.to_query())
    }

    pub fn device_viability(&self, query: &DeviceQuery) -> Result<DeviceViability, ApiError> {
        self.get_json(Endpoint::Device, &query.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RawResponse;
    use std::sync::Mutex;

    struct Canned {
        response: Result<RawResponse, ApiError>,
        seen: Mutex<Vec<String>>,
    }

    impl Transport for Canned {
        fn get(&self, url: &Url) -> Result<RawResponse, ApiError> {
            self.seen.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    fn client(response: Result<RawResponse, ApiError>) -> ApiClient {
        ApiClient::with_transport(
            "http://127.0.0.1:5000/",
            Box::new(Canned {
                response,
                seen: Mutex::new(Vec::new()),
            }),
        )
        .unwrap()
    }

    #[test]
    fn url_carries_endpoint_and_encoded_query() {
        let c = client(Ok(RawResponse::ok("{}")));
        let query = DeviceQuery::new(&RealAnalysisParameters::default(), "LED lamp", 0.5).to_query();
        let url = c.url(Endpoint::Device, &query).unwrap();
        assert_eq!(url.path(), "/api/analizar-dispositivo");
        let q = url.query().unwrap();
        assert!(q.starts_with("scenarioTh=realista&tipoFuente=fuego&dataType=tavg&RL=5"));
        assert!(q.contains("deviceName=LED+lamp"));
        assert!(q.ends_with("deviceEnergy=0.5"));
    }

    #[test]
    fn non_success_status_maps_to_http_error() {
        let c = client(Ok(RawResponse {
            status: 500,
            body: r#"{"error":"boom"}"#.into(),
        }));
        let err = c.simulate(&SimulationParameters::default()).unwrap_err();
        assert_eq!(err, ApiError::HttpStatus { status: 500 });
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn bad_body_is_parse_error() {
        let c = client(Ok(RawResponse::ok("<html>")));
        let err = c
            .daily_cycle(&DailyCycleQuery {
                source: crate::params::SourceType::Fire,
                peak_hot_c: 150.0,
                ambient_c: 10.0,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse { endpoint: "/api/ciclo-diario", .. }));
    }

    #[test]
    fn transport_error_passes_through() {
        let c = client(Err(ApiError::Transport("connection refused".into())));
        let err = c.analyze(&RealAnalysisParameters::default()).unwrap_err();
        assert_eq!(err.category(), "NET");
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ApiClient::with_transport(
            "ftp://example.com",
            Box::new(Canned {
                response: Ok(RawResponse::ok("")),
                seen: Mutex::new(Vec::new()),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }
}
