//! Decision engines for an HPV vaccination program: eligibility screening, dose
//! scheduling and symptom triage, plus the configuration, error and telemetry plumbing
//! shared by the service front end.
//!
//! The engines are pure functions over explicit inputs. Anything that needs "today"
//! takes it as a parameter, with a convenience wrapper reading the local date.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod program;
pub mod schedule;
pub mod telemetry;
pub mod triage;
