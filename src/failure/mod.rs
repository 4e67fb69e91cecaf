//! Fixed CI failure used as the analysis subject.
//!
//! Stands in for a real log-parsing subsystem: a single captured failure from
//! the OpenShift conformance suite.

/// Test headline of the captured failure.
pub const FAILURE_HEADLINE: &str = "[sig-network] Services should be rejected for evicted pods (no endpoints exist) [Suite:openshift/conformance/parallel] [Suite:k8s]";

/// Pod dump captured from the failing job.
pub const FAILURE_LOGS: &str = include_str!("evicted_pods.log");

/// Render the failure as a labeled headline + log excerpt.
///
/// Pure and deterministic; repeated calls return identical text.
pub fn parse_failure() -> String {
    format!("Headline:\n{FAILURE_HEADLINE}\n\nLogs:\n{FAILURE_LOGS}")
}
