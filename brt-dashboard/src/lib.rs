//! BRT arrivals dashboard.
//!
//! A web application that answers: "is the BRT arriving at my station?"
//! It polls a public arrival prediction API for one stop, filters and
//! sorts the predictions, and renders a countdown, a table and a map.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod predictor;
pub mod web;
