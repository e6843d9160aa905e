// Agent routes. Every handler runs the module guard first, then builds a
// scoped operation from the resolved AgentContext.
pub mod agent;
pub mod bookings;
pub mod leads;
pub mod locator;
pub mod payload;
pub mod training;
pub mod transport;
pub mod vouchers;
