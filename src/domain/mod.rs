// Domain layer - request-scoped value types
pub mod chart;
pub mod dashboard;
