pub mod auth;
pub mod background;
pub mod clock;
pub mod components;
pub mod composer;
pub mod config;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
