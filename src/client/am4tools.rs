use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

use super::RouteDemandSource;
use crate::config::DemandSourceConfig;
use crate::error::{AutopilotError, Result};
use crate::models::*;
use crate::{o_debug, o_trace};

/// HTTP client for the am4tools route feed.
#[derive(Clone)]
pub struct Am4ToolsDemandSource {
    client: reqwest::Client,
    base_url: String,
    api_logging: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    routes: Vec<WireCandidate>,
    #[serde(default, rename = "hasMore")]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    arrival: String,
    distance: f64,
    demand: WireDemand,
}

#[derive(Debug, Default, Deserialize)]
struct WireDemand {
    #[serde(rename = "f")]
    first: Option<u32>,
    #[serde(rename = "j")]
    business: Option<u32>,
    #[serde(rename = "y")]
    economy: Option<u32>,
    #[serde(rename = "l")]
    large: Option<u32>,
    #[serde(rename = "h")]
    heavy: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    routes: Vec<WireTicketRoute>,
    ticket: WireTicket,
}

#[derive(Debug, Deserialize)]
struct WireTicketRoute {
    distance: f64,
    demand: WireDemand,
}

#[derive(Debug, Deserialize)]
struct WireTicket {
    realism: WirePrices,
}

#[derive(Debug, Deserialize)]
struct WirePrices {
    #[serde(rename = "ticketY")]
    economy: Option<u32>,
    #[serde(rename = "ticketJ")]
    business: Option<u32>,
    #[serde(rename = "ticketF")]
    first: Option<u32>,
    #[serde(rename = "ticketL")]
    large: Option<u32>,
    #[serde(rename = "ticketH")]
    heavy: Option<u32>,
}

impl WireDemand {
    fn into_demand(self, kind: FleetKind) -> Result<ClassDemand> {
        match kind {
            FleetKind::Passenger => match (self.first, self.business, self.economy) {
                (Some(first), Some(business), Some(economy)) => {
                    Ok(ClassDemand::Passenger { first, business, economy })
                }
                _ => Err(AutopilotError::Data("passenger demand missing a class".to_string())),
            },
            FleetKind::Cargo => match (self.large, self.heavy) {
                (Some(large), Some(heavy)) => Ok(ClassDemand::Cargo { large, heavy }),
                _ => Err(AutopilotError::Data("cargo demand missing a load type".to_string())),
            },
        }
    }
}

impl WirePrices {
    fn into_prices(self, kind: FleetKind) -> Result<TicketPrices> {
        match kind {
            FleetKind::Passenger => match (self.economy, self.business, self.first) {
                (Some(economy), Some(business), Some(first)) => {
                    Ok(TicketPrices::Passenger { economy, business, first })
                }
                _ => Err(AutopilotError::Data("ticket response missing a class price".to_string())),
            },
            FleetKind::Cargo => match (self.large, self.heavy) {
                (Some(large), Some(heavy)) => Ok(TicketPrices::Cargo { large, heavy }),
                _ => Err(AutopilotError::Data("ticket response missing a cargo price".to_string())),
            },
        }
    }
}

impl Am4ToolsDemandSource {
    pub fn new(config: &DemandSourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_logging: config.api_logging,
        })
    }

    fn log_api_call(&self, url: &str, response_status: u16, response_body: Option<&str>) {
        if !self.api_logging {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== FEED CALL [{timestamp}] ===\n\
             URL: {url}\n\
             Response Status: {response_status}\n\
             Response Body: {response_body}\n\
             ========================================\n",
            timestamp = timestamp,
            url = url,
            response_status = response_status,
            response_body = response_body.unwrap_or("Not captured")
        );

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open("feed_debug.log")
        {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        o_trace!("🌐 GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AutopilotError::Transport(format!("{}: {}", url, e)))?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());
            self.log_api_call(url, status, Some(&error_body));
            return Err(AutopilotError::Transport(format!(
                "feed request failed with status {}",
                status
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AutopilotError::Transport(e.to_string()))?;
        self.log_api_call(url, status, Some(&response_text));
        Ok(response_text)
    }
}

#[async_trait]
impl RouteDemandSource for Am4ToolsDemandSource {
    async fn search_routes(&self, origin: &str, sort_class: SortClass, page: u32) -> Result<RoutePage> {
        let kind = sort_class.fleet_kind();
        let url = format!(
            "{}/route/search?type={}&departure={}&sort={}&page={}",
            self.base_url,
            kind.feed_type(),
            origin,
            sort_class.as_str(),
            page
        );

        let body = self.get_text(&url).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let mut routes = Vec::with_capacity(response.routes.len());
        for candidate in response.routes {
            let destination = candidate.arrival.clone();
            match candidate.demand.into_demand(kind) {
                Ok(demand) => routes.push(CandidateRoute {
                    origin: origin.to_string(),
                    destination: candidate.arrival,
                    distance: candidate.distance,
                    demand,
                }),
                Err(e) => o_debug!("⚠️ Dropping malformed candidate {}-{}: {}", origin, destination, e),
            }
        }

        Ok(RoutePage {
            routes,
            has_more: response.has_more,
        })
    }

    async fn get_route_ticket_detail(
        &self,
        origin: &str,
        destination: &str,
        kind: FleetKind,
    ) -> Result<RouteTicketDetail> {
        let url = format!(
            "{}/route/ticket?type={}&mode=normal&departure={}&arrival={}",
            self.base_url,
            kind.feed_type(),
            origin,
            destination
        );

        let body = self.get_text(&url).await?;
        let response: TicketResponse = serde_json::from_str(&body)?;
        let route = response.routes.into_iter().next().ok_or_else(|| {
            AutopilotError::Data(format!("no route detail for {}-{}", origin, destination))
        })?;

        Ok(RouteTicketDetail {
            distance: route.distance,
            demand: route.demand.into_demand(kind)?,
            pricing: response.ticket.realism.into_prices(kind)?,
        })
    }
}
