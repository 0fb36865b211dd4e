use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::{in_transaction, DBConnection};
use crate::error::TrackerResult;
use crate::jobs::helpers::{get_jobs_from_db, save_jobs_to_db};

use super::data::*;
use super::helpers::*;

#[get("/get_customers")]
pub fn get_customers(db_connection: &State<DBConnection>) -> TrackerResult<Json<Vec<Customer>>> {
    let db_connection = db_connection.lock()?;

    let customers = get_customers_from_db(&db_connection)?;

    Ok(Json(customers))
}

#[post("/add_customer", format = "json", data = "<new_customer>")]
pub fn add_customer_endpoint(
    new_customer: Json<NewCustomer>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Customer>> {
    let db_connection = db_connection.lock()?;

    let mut customers = get_customers_from_db(&db_connection)?;
    let customer = add_customer(&mut customers, new_customer.into_inner())?;
    save_customers_to_db(&customers, &db_connection)?;
    info!("Added customer {} ({})", customer.id, customer.name);

    Ok(Json(customer))
}

#[post("/update_customer", format = "json", data = "<customer>")]
pub fn update_customer_endpoint(
    customer: Json<Customer>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Customer>> {
    let db_connection = db_connection.lock()?;

    let mut customers = get_customers_from_db(&db_connection)?;
    let customer = update_customer(&mut customers, customer.into_inner())?;
    save_customers_to_db(&customers, &db_connection)?;

    Ok(Json(customer))
}

#[post("/delete_customer", format = "json", data = "<delete_customer_request>")]
pub fn delete_customer_endpoint(
    delete_customer_request: Json<DeleteCustomerRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<()> {
    let db_connection = db_connection.lock()?;

    let customer_id = &delete_customer_request.customer_id;
    let mut customers = get_customers_from_db(&db_connection)?;
    let mut jobs = get_jobs_from_db(&db_connection)?;

    let detached = delete_customer(&mut customers, &mut jobs, customer_id)?;
    in_transaction(&db_connection, |tx| {
        save_customers_to_db(&customers, tx)?;
        save_jobs_to_db(&jobs, tx)
    })?;
    info!("Deleted customer {}, detached {} jobs", customer_id, detached);

    Ok(())
}
