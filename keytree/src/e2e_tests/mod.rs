//! End-to-end tests at the public tree API level.
//!
//! Each test file covers a specific scenario, replaying deterministic
//! command sequences and checking contents and structure after every step.

#![cfg(test)]

mod helpers;

mod test_animal_workloads;
mod test_boundaries;
mod test_degree_table;
mod test_determinism;
mod test_fruit_scenario;
mod test_mass_delete;
mod test_round_trip;
mod test_verbose;
