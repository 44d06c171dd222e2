//! Cross-component scenarios: gateways, resolution, trust boundaries, and
//! persistence exercised together through the public store API.

mod queries;
mod resolution;
