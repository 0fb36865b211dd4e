use rusqlite::Connection;
use uuid::Uuid;

use crate::data::{load_collection_or_default, save_collection, CUSTOMERS_KEY};
use crate::error::{TrackerError, TrackerResult};
use crate::jobs::data::Job;

use super::data::*;

pub fn get_customers_from_db(db_connection: &Connection) -> TrackerResult<Vec<Customer>> {
    load_collection_or_default(CUSTOMERS_KEY, db_connection)
}

pub fn save_customers_to_db(customers: &[Customer], db_connection: &Connection) -> TrackerResult<()> {
    save_collection(CUSTOMERS_KEY, customers, db_connection)
}

pub fn find_customer<'a>(customers: &'a [Customer], customer_id: &str) -> Option<&'a Customer> {
    customers.iter().find(|c| c.id == customer_id)
}

// Blank optional fields are stored as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validated_name(name: &str) -> TrackerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::invalid("Customer name cannot be empty"));
    }

    Ok(name.to_string())
}

pub fn add_customer(customers: &mut Vec<Customer>, new_customer: NewCustomer) -> TrackerResult<Customer> {
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: validated_name(&new_customer.name)?,
        company_name: non_blank(new_customer.company_name),
        contact_info: non_blank(new_customer.contact_info),
    };

    customers.push(customer.clone());

    Ok(customer)
}

pub fn update_customer(customers: &mut Vec<Customer>, updated: Customer) -> TrackerResult<Customer> {
    let updated = Customer {
        name: validated_name(&updated.name)?,
        company_name: non_blank(updated.company_name),
        contact_info: non_blank(updated.contact_info),
        id: updated.id,
    };

    match customers.iter_mut().find(|c| c.id == updated.id) {
        Some(customer) => {
            *customer = updated.clone();
            Ok(updated)
        }
        None => Err(TrackerError::not_found(format!("customer {}", updated.id))),
    }
}

/// Removes the customer and clears the reference on every job that pointed at it.
/// Returns how many jobs were detached.
pub fn delete_customer(
    customers: &mut Vec<Customer>,
    jobs: &mut [Job],
    customer_id: &str,
) -> TrackerResult<usize> {
    let before = customers.len();
    customers.retain(|c| c.id != customer_id);

    if customers.len() == before {
        return Err(TrackerError::not_found(format!("customer {}", customer_id)));
    }

    let mut detached = 0;
    for job in jobs.iter_mut() {
        if job.customer_id.as_deref() == Some(customer_id) {
            job.customer_id = None;
            detached += 1;
        }
    }

    Ok(detached)
}
