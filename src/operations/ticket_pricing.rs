// Keep ticket prices on operated routes at the feed's recommended values
use crate::client::{GameClient, RouteDemandSource};
use crate::error::Result;
use crate::{o_debug, o_error, o_summary};

pub struct TicketPricing<'a> {
    client: &'a dyn GameClient,
    source: &'a dyn RouteDemandSource,
}

impl<'a> TicketPricing<'a> {
    pub fn new(client: &'a dyn GameClient, source: &'a dyn RouteDemandSource) -> Self {
        Self { client, source }
    }

    /// Returns how many routes were repriced. Routes whose lookup fails are skipped.
    pub async fn update_all(&self) -> Result<usize> {
        let routes = self.client.list_routes().await?;
        let mut updated = 0;

        for route in &routes {
            let detail = match self
                .source
                .get_route_ticket_detail(&route.origin, &route.destination, route.kind)
                .await
            {
                Ok(detail) => detail,
                Err(e) => {
                    o_error!("⚠️ No pricing for {}-{}: {}", route.origin, route.destination, e);
                    continue;
                }
            };

            match self.client.set_ticket_price(route.route_id, &detail.pricing).await {
                Ok(()) => {
                    o_debug!("   {}-{} priced {:?}", route.origin, route.destination, detail.pricing);
                    updated += 1;
                }
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => o_error!("❌ Could not reprice route {}: {}", route.route_id, e),
            }
        }

        o_summary!("🎫 Ticket prices updated on {}/{} routes", updated, routes.len());
        Ok(updated)
    }
}
