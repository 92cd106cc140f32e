// Operations module - the decisions the autopilot makes each cycle

pub mod acquisition;
pub mod campaigns;
pub mod lifecycle;
pub mod resource_policy;
pub mod route_discovery;
pub mod seat_config;
pub mod ticket_pricing;

pub use acquisition::*;
pub use campaigns::*;
pub use lifecycle::*;
pub use resource_policy::*;
pub use route_discovery::*;
pub use seat_config::*;
pub use ticket_pricing::*;
