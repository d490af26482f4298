// Business domains
pub mod enrichment;
pub mod people;
pub mod screening;
