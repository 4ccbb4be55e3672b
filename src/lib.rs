#![allow(non_camel_case_types)]

pub mod configuration;
pub mod controller;
pub mod dao;
pub mod error;
pub mod finance;
pub mod handler;
pub mod helpers;
pub mod ledger;
pub mod migration;
pub mod model;
pub mod provider;
pub mod server;
pub mod types;
