/// Allocation policies (baseline and greedy).
pub mod allocator;
/// Hour-by-hour clock for the simulated day.
pub mod clock;
pub mod engine;
pub mod kpi;
pub mod types;
