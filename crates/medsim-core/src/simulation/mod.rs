pub mod kpi;
pub mod rating;

pub use kpi::{simulate, Kpis, SimulationResult};
pub use rating::{rate_cash_flow, CashFlowRating};
