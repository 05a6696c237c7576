pub mod calendar;
pub mod classify;
pub mod config;
pub mod emblems;
pub mod error;
pub mod fixture_fetch;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod schedule;
pub mod site;
