// SPDX-License-Identifier: MPL-2.0

pub mod calendar;
pub mod client;
pub mod commands;
pub mod config;
pub mod prompt;
pub mod rng;
pub mod run;
pub mod schedule;
