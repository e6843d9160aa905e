// Administrator routes: admin role and the matching module are both required.
pub mod agents;
