pub mod ledger;
pub mod repositories;
