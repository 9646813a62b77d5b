#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{Config, ValidationMode};

use config::{manage_stores, ConfigFairing, DatabaseFairing};
use logging::LoggerFairing;
use store::{DynNomineeStore, DynVoteStore};

/// Build the server, loading the configuration and connecting the stores
/// at ignition.
pub fn build() -> Rocket<Build> {
    mount(rocket::build())
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
}

/// Build the server around stores and configuration that already exist.
pub fn rocket_for_stores(
    nominees: DynNomineeStore,
    votes: DynVoteStore,
    config: Config,
) -> Rocket<Build> {
    manage_stores(mount(rocket::build()), nominees, votes).manage(config)
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(LoggerFairing)
}
