// Handlers by access tier:
// public (no context) → tenant (host resolved) → protected (agent + module guard)
// → elevated (agent + admin role + module guard)
pub mod elevated;
pub mod protected;
pub mod public;
pub mod tenant;
