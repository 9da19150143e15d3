//! Stat aggregation for equipment builds: fold equipped items, a pet and progression inputs
//! into one stat record, then derive effective health and melee damage from it.

pub mod cli;
pub mod combat;
pub mod data;
