//! Society registry, simulation step, and runner for the HyperBeings
//! simulation.
//!
//! This crate owns every being and drives the step loop: random
//! interactions, economic activities, collaborative projects, and the
//! aggregate statistics that follow them.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `hyperbeings-config.yaml` into
//!   strongly-typed structs.
//! - [`minting`] -- [`Minter`] trait and [`StubMinter`].
//! - [`operator`] -- Shared pause/resume/stop state and the command queue.
//! - [`runner`] -- The bounded step loop ([`run_society`]).
//! - [`society`] -- The [`Society`] registry and the step itself.
//!
//! [`Minter`]: minting::Minter
//! [`StubMinter`]: minting::StubMinter
//! [`run_society`]: runner::run_society
//! [`Society`]: society::Society

pub mod config;
pub mod minting;
pub mod operator;
pub mod runner;
pub mod society;
