// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod oauth;
pub mod provision;
pub mod run;
pub mod tools;
pub mod types;

#[cfg(test)]
pub mod test_utils;
