use log::info;
use rusqlite::Connection;

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

mod categories;
mod config;
mod customers;
mod data;
mod error;
mod jobs;
mod profile;
mod todo;

#[cfg(test)]
mod api_tests;

use categories::endpoints as category_endpoints;
use config::TrackerConfig;
use customers::endpoints as customer_endpoints;
use data::{create_tables, DBConnection};
use jobs::endpoints as job_endpoints;
use profile::endpoints as profile_endpoints;
use todo::data::StatusCycle;

#[macro_use]
extern crate rocket;

use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};

pub fn build_rocket(connection: DBConnection, config: TrackerConfig) -> Rocket<Build> {
    let static_dir = config.static_dir.clone();

    let rocket = rocket::build()
        .manage(connection)
        .manage(config)
        .attach(AdHoc::on_liftoff("Tracker config", |rocket| {
            Box::pin(async move {
                if let Some(config) = rocket.state::<TrackerConfig>() {
                    info!(
                        "Using {}, to-dos cycle through {:?}",
                        config.db_path,
                        StatusCycle::from(config.status_cycle).states()
                    );
                }
            })
        }))
        .mount(
            "/api",
            routes![
                job_endpoints::get_jobs,
                job_endpoints::get_job_groups,
                job_endpoints::get_progress,
                job_endpoints::get_active_jobs,
                job_endpoints::get_activity,
                job_endpoints::add_job_endpoint,
                job_endpoints::update_job_endpoint,
                job_endpoints::delete_job_endpoint,
                job_endpoints::toggle_todo_endpoint,
                job_endpoints::add_todo,
                job_endpoints::add_templated_todos_endpoint,
                job_endpoints::remove_todo_endpoint,
                customer_endpoints::get_customers,
                customer_endpoints::add_customer_endpoint,
                customer_endpoints::update_customer_endpoint,
                customer_endpoints::delete_customer_endpoint,
                category_endpoints::get_categories,
                category_endpoints::add_category_endpoint,
                category_endpoints::rename_category_endpoint,
                category_endpoints::delete_category_endpoint,
                profile_endpoints::get_profile,
                profile_endpoints::set_profile,
            ],
        );

    if Path::new(&static_dir).is_dir() {
        rocket.mount("/", FileServer::from(static_dir).rank(15))
    } else {
        rocket
    }
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::load()?;

    let connection = Connection::open(&config.db_path)?;
    create_tables(&connection)?;
    let connection = Arc::new(Mutex::new(connection));

    build_rocket(connection, config).launch().await?;

    Ok(())
}
