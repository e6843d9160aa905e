use serde::Serialize;

use crate::filter::SortDirection;

/// Portal data sets reachable through the accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Agents,
    Bookings,
    Vouchers,
    TransportBookings,
    LocatorPings,
    TrainingModules,
    Leads,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Agents,
        Resource::Bookings,
        Resource::Vouchers,
        Resource::TransportBookings,
        Resource::LocatorPings,
        Resource::TrainingModules,
        Resource::Leads,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Resource::Agents => "agents",
            Resource::Bookings => "bookings",
            Resource::Vouchers => "vouchers",
            Resource::TransportBookings => "transport_bookings",
            Resource::LocatorPings => "locator_pings",
            Resource::TrainingModules => "training_modules",
            Resource::Leads => "leads",
        }
    }

    /// Module key that gates every route touching this resource.
    pub fn module_key(self) -> &'static str {
        match self {
            Resource::Agents => "agents",
            Resource::Bookings => "bookings",
            Resource::Vouchers => "vouchers",
            Resource::TransportBookings => "transport",
            Resource::LocatorPings => "locator",
            Resource::TrainingModules => "training",
            Resource::Leads => "leads",
        }
    }

    /// Agent-owned rows are filtered by `agent_id` on top of `tenant_id`.
    pub fn agent_owned(self) -> bool {
        !matches!(self, Resource::Agents | Resource::TrainingModules)
    }

    /// Resources carrying a `status` column that lists may filter on.
    pub fn has_status(self) -> bool {
        matches!(
            self,
            Resource::Bookings | Resource::Vouchers | Resource::TransportBookings | Resource::Leads
        )
    }

    pub fn ordering(self) -> (&'static str, SortDirection) {
        match self {
            Resource::TransportBookings => ("pickup_at", SortDirection::Asc),
            Resource::LocatorPings => ("recorded_at", SortDirection::Desc),
            Resource::TrainingModules => ("position", SortDirection::Asc),
            Resource::Agents | Resource::Bookings | Resource::Vouchers | Resource::Leads => {
                ("created_at", SortDirection::Desc)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_directory_resources_are_tenant_wide() {
        let tenant_wide: Vec<_> = Resource::ALL.iter().filter(|r| !r.agent_owned()).collect();
        assert_eq!(tenant_wide, vec![&Resource::Agents, &Resource::TrainingModules]);
    }

    #[test]
    fn directory_and_feed_resources_have_no_status() {
        assert!(!Resource::Agents.has_status());
        assert!(!Resource::LocatorPings.has_status());
        assert!(!Resource::TrainingModules.has_status());
        assert!(Resource::TransportBookings.has_status());
    }

    #[test]
    fn module_keys_are_distinct() {
        let mut keys: Vec<_> = Resource::ALL.iter().map(|r| r.module_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Resource::ALL.len());
    }
}
