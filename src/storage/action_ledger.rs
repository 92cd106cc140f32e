// Persistent record of aircraft purchases whose outcome has not been seen in the fleet yet
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::FleetAircraft;
use crate::{o_debug, o_info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub route_name: String,
    pub hub_iata: String,
    pub model: String,
    pub issued_at: DateTime<Utc>,
}

/// Purchases issued to the game but not yet confirmed by a fleet snapshot.
///
/// Planning treats an entry as an already-served route for the model that ordered it, so a re-run after a partial
/// failure does not order a second aircraft for a route whose first order is still in flight.
pub struct ActionLedger {
    storage_path: Option<String>,
    /// Keyed by (lowercase model, route name).
    entries: HashMap<(String, String), LedgerEntry>,
}

impl ActionLedger {
    pub fn new(storage_path: &str) -> Self {
        let mut ledger = Self {
            storage_path: Some(storage_path.to_string()),
            entries: HashMap::new(),
        };

        if let Err(e) = ledger.load_from_disk() {
            o_info!("⚠️ Failed to load action ledger: {}", e);
            o_info!("💾 Starting with an empty action ledger");
        }

        ledger
    }

    /// A ledger that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            storage_path: None,
            entries: HashMap::new(),
        }
    }

    pub fn record_purchase(&mut self, route_name: &str, hub_iata: &str, model: &str) {
        self.record_purchase_at(route_name, hub_iata, model, Utc::now());
    }

    pub fn record_purchase_at(&mut self, route_name: &str, hub_iata: &str, model: &str, issued_at: DateTime<Utc>) {
        let entry = LedgerEntry {
            route_name: route_name.to_string(),
            hub_iata: hub_iata.to_string(),
            model: model.to_string(),
            issued_at,
        };
        o_debug!("💾 Ledger: {} ordered at {}", route_name, issued_at.format("%H:%M:%S UTC"));
        self.entries.insert(entry_key(model, route_name), entry);
    }

    /// Whether any model has an order in flight for `route_name`.
    pub fn is_pending(&self, route_name: &str) -> bool {
        self.entries.values().any(|entry| entry.route_name == route_name)
    }

    /// Routes with an order in flight for `model`. Other airframes do not serve them.
    pub fn pending_route_names<'a>(&'a self, model: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.model.eq_ignore_ascii_case(model))
            .map(|entry| entry.route_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop `model` entries whose aircraft now shows up in that model's fleet.
    /// Returns how many were confirmed.
    pub fn reconcile(&mut self, model: &str, fleet: &[FleetAircraft]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            !entry.model.eq_ignore_ascii_case(model) || !fleet.iter().any(|aircraft| aircraft.name == entry.route_name)
        });
        let confirmed = before - self.entries.len();
        if confirmed > 0 {
            o_debug!("✅ Ledger: {} purchases confirmed by fleet snapshot", confirmed);
        }
        confirmed
    }

    pub fn cleanup_expired(&mut self, ttl_hours: i64) -> usize {
        self.cleanup_expired_at(Utc::now(), ttl_hours)
    }

    pub fn cleanup_expired_at(&mut self, now: DateTime<Utc>, ttl_hours: i64) -> usize {
        let ttl = Duration::hours(ttl_hours);
        let before = self.entries.len();
        self.entries.retain(|_, entry| now.signed_duration_since(entry.issued_at) < ttl);

        let removed = before - self.entries.len();
        if removed > 0 {
            o_info!("🧹 Forgot {} unconfirmed purchases older than {}h", removed, ttl_hours);
        }
        removed
    }

    pub fn save(&self) -> Result<()> {
        let Some(storage_path) = &self.storage_path else {
            return Ok(());
        };

        let mut entries: Vec<&LedgerEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.issued_at.cmp(&b.issued_at));
        let content = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = Path::new(storage_path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(storage_path, content)?;
        Ok(())
    }

    fn load_from_disk(&mut self) -> Result<()> {
        let Some(storage_path) = &self.storage_path else {
            return Ok(());
        };
        if !Path::new(storage_path).exists() {
            return Ok(());
        }

        let content = fs::read_to_string(storage_path)?;
        let entries: Vec<LedgerEntry> = serde_json::from_str(&content)?;

        self.entries.clear();
        for entry in entries {
            self.entries.insert(entry_key(&entry.model, &entry.route_name), entry);
        }

        o_debug!("💾 Loaded {} unconfirmed purchases from disk", self.entries.len());
        Ok(())
    }
}

fn entry_key(model: &str, route_name: &str) -> (String, String) {
    (model.to_ascii_lowercase(), route_name.to_string())
}
