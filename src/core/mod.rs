pub mod engine;
pub mod ledger;
pub mod occupancy;
pub mod report;
