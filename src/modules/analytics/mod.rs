//! Temporal analytics engine shared by every report domain.
//!
//! Range tokens resolve against an explicit evaluation instant, filters
//! normalize under a per-domain [`models::DomainPolicy`], and
//! [`services::ReportOrchestrator`] drives the fetch pattern against a
//! domain's [`repositories::RowSource`].

pub mod models;
pub mod repositories;
pub mod services;
