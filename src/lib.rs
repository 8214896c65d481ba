//! Business Annual Report API Library
//!
//! Looks up businesses registered for annual report filing and fetches their
//! details from the COLIN legacy registry, adding the year the next annual
//! report is due.
//!
//! # Modules
//!
//! - `auth_service`: Service-to-service token acquisition.
//! - `business_service`: Business lookup and COLIN detail enrichment.
//! - `config`: Configuration management.
//! - `dates`: Strict and ISO-8601 date parsing for COLIN fields.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Database models and COLIN payload helpers.
//! - `rest_service`: Bearer-authenticated JSON GET client.

pub mod auth_service;
pub mod business_service;
pub mod config;
pub mod dates;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod rest_service;
