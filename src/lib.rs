//! Merchant dashboard backend for a beauty-services marketplace.
//!
//! Hosts the dashboard session (store, auth gateway, route guard) and a mock
//! REST API serving fixed demo data.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod storage;
pub mod token;

pub mod models {
    pub mod booking;
    pub mod customer;
    pub mod merchant;
    pub mod service;
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod booking;
    pub mod credential;
    pub mod customer;
    pub mod merchant;
    pub mod service;
}

pub mod services {
    pub mod auth;
    pub mod guard;
    pub mod notifications;
}

pub mod handlers {
    pub mod auth;
    pub mod bookings;
    pub mod customers;
    pub mod merchant;
    pub mod pages;
    pub mod services;
    pub mod session;
}

pub mod middleware_layer {
    pub mod guard;
}

pub use config::Config;
pub use routes::build_router;
pub use state::AppState;
