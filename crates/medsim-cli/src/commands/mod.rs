pub mod annuity;
pub mod simulate;
