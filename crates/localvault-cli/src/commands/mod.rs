pub mod accounts;
pub mod entries;
pub mod generate;
pub mod transfer;
