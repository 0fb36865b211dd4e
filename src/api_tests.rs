use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use std::sync::{Arc, Mutex};

use crate::build_rocket;
use crate::config::TrackerConfig;
use crate::data::test_connection;
use crate::todo::data::CycleKind;

fn client_with(config: TrackerConfig) -> Client {
    let connection = Arc::new(Mutex::new(test_connection()));
    Client::tracked(build_rocket(connection, config)).expect("valid rocket instance")
}

fn client() -> Client {
    client_with(TrackerConfig {
        static_dir: "does-not-exist".to_string(),
        ..TrackerConfig::default()
    })
}

fn post(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    let status = response.status();
    let body = response
        .into_string()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(Value::Null);

    (status, body)
}

fn get(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri).dispatch();
    let status = response.status();
    let body = response
        .into_json::<Value>()
        .unwrap_or(Value::Null);

    (status, body)
}

fn add_job(client: &Client, body: Value) -> Value {
    let (status, job) = post(client, "/api/add_job", body);
    assert_eq!(status, Status::Ok);
    job
}

#[test]
fn add_and_list_jobs() {
    let client = client();

    let job = add_job(
        &client,
        json!({"title": "Cafe menu shoot", "startDate": "2024-05-01", "category": "Food Photography"}),
    );
    assert_eq!(job["category"], "Food Photography");
    assert_eq!(job["templatedTodosAdded"], false);

    add_job(&client, json!({"title": "Headshots"}));

    let (status, jobs) = get(&client, "/api/get_jobs");
    assert_eq!(status, Status::Ok);
    assert_eq!(jobs.as_array().map(Vec::len), Some(2));
    assert_eq!(jobs[1]["category"], "Uncategorized");

    let (_, filtered) = get(&client, "/api/get_jobs?category=Food%20Photography");
    assert_eq!(filtered.as_array().map(Vec::len), Some(1));
    assert_eq!(filtered[0]["id"], job["id"]);
}

#[test]
fn rejected_job_reports_bad_request() {
    let client = client();

    let (status, body) = post(&client, "/api/add_job", json!({"title": "   "}));

    assert_eq!(status, Status::BadRequest);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[test]
fn toggle_walks_standard_cycle() {
    let client = client();
    let job = add_job(&client, json!({"title": "Wedding"}));
    let (_, todo) = post(
        &client,
        "/api/add_todo",
        json!({"jobId": job["id"], "title": "Scout venue"}),
    );
    let request = json!({"jobId": job["id"], "todoId": todo["id"]});

    let (_, todo) = post(&client, "/api/toggle_todo", request.clone());
    assert_eq!(todo["status"], "in-progress");
    assert!(todo.get("completedAt").is_none());

    let (_, todo) = post(&client, "/api/toggle_todo", request.clone());
    assert_eq!(todo["status"], "checked");
    assert!(todo["completedAt"].is_string());

    let (_, progress) = get(&client, "/api/get_progress");
    assert_eq!(progress["overall"]["percent"], 100);
    assert_eq!(progress["jobs"][0]["jobId"], job["id"]);

    let (_, todo) = post(&client, "/api/toggle_todo", request);
    assert_eq!(todo["status"], "not-needed");
    assert!(todo.get("completedAt").is_none());

    let (_, progress) = get(&client, "/api/get_progress");
    assert_eq!(progress["overall"]["countable"], 0);
    assert_eq!(progress["overall"]["percent"], 0);
}

#[test]
fn toggle_follows_configured_legacy_cycle() {
    let client = client_with(TrackerConfig {
        static_dir: "does-not-exist".to_string(),
        status_cycle: CycleKind::Legacy,
        ..TrackerConfig::default()
    });
    let job = add_job(&client, json!({"title": "Product flat lays"}));
    let (_, todo) = post(
        &client,
        "/api/add_todo",
        json!({"jobId": job["id"], "title": "Steam props"}),
    );

    let (_, todo) = post(
        &client,
        "/api/toggle_todo",
        json!({"jobId": job["id"], "todoId": todo["id"]}),
    );

    assert_eq!(todo["status"], "checked");
}

#[test]
fn toggle_unknown_todo_is_not_found() {
    let client = client();
    let job = add_job(&client, json!({"title": "Wedding"}));

    let (status, _) = post(
        &client,
        "/api/toggle_todo",
        json!({"jobId": job["id"], "todoId": "missing"}),
    );

    assert_eq!(status, Status::NotFound);
}

#[test]
fn templated_todos_only_once() {
    let client = client();
    let job = add_job(&client, json!({"title": "Corporate event"}));
    let request = json!({"jobId": job["id"]});

    let (status, job) = post(&client, "/api/add_templated_todos", request.clone());
    assert_eq!(status, Status::Ok);
    assert_eq!(job["templatedTodosAdded"], true);
    assert_eq!(
        job["todos"].as_array().map(Vec::len),
        Some(TrackerConfig::default().todo_templates.len())
    );

    let (status, _) = post(&client, "/api/add_templated_todos", request);
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn update_job_cannot_rewrite_todos() {
    let client = client();
    let job = add_job(&client, json!({"title": "Birthday", "startDate": "2024-07-01"}));
    let (_, job) = post(&client, "/api/add_templated_todos", json!({"jobId": job["id"]}));
    let stored_todos = job["todos"].clone();

    let mut edited = job.clone();
    edited["title"] = json!("Birthday party");
    edited["startTime"] = json!("9:30");
    edited["templatedTodosAdded"] = json!(false);
    edited["todos"] = json!([
        {"id": "forged", "title": "Done already", "status": "checked"},
        {"id": "stale", "title": "Reopened", "status": "empty", "completedAt": "2024-01-01T09:00:00Z"}
    ]);

    let (status, updated) = post(&client, "/api/update_job", edited);
    assert_eq!(status, Status::Ok);
    assert_eq!(updated["title"], "Birthday party");
    assert_eq!(updated["startTime"], "09:30");
    assert_eq!(updated["todos"], stored_todos);
    assert_eq!(updated["templatedTodosAdded"], true);

    let (_, jobs) = get(&client, "/api/get_jobs");
    assert_eq!(jobs[0]["todos"], stored_todos);

    let (status, _) = post(&client, "/api/add_templated_todos", json!({"jobId": job["id"]}));
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn unpadded_times_sort_within_their_day() {
    let client = client();
    add_job(
        &client,
        json!({"title": "Late", "startDate": "2024-05-01", "startTime": "10:00"}),
    );
    add_job(
        &client,
        json!({"title": "Early", "startDate": "2024-5-1", "startTime": "9:05"}),
    );

    let (status, groups) = get(&client, "/api/get_job_groups?field=start");
    assert_eq!(status, Status::Ok);
    assert_eq!(groups.as_array().map(Vec::len), Some(1));
    assert_eq!(groups[0]["date"], "2024-05-01");
    assert_eq!(groups[0]["jobs"][0]["title"], "Early");
    assert_eq!(groups[0]["jobs"][0]["startTime"], "09:05");
    assert_eq!(groups[0]["jobs"][1]["title"], "Late");
}

#[test]
fn groups_by_both_dates() {
    let client = client();
    add_job(
        &client,
        json!({"title": "Album", "startDate": "2024-02-01", "deadlineDate": "2024-02-10"}),
    );
    add_job(
        &client,
        json!({"title": "Portraits", "startDate": "2024-02-01", "startTime": "08:30"}),
    );
    add_job(&client, json!({"title": "Unscheduled"}));

    let (_, groups) = get(&client, "/api/get_job_groups");
    assert_eq!(groups[0]["date"], "2024-02-01");
    assert_eq!(groups[0]["jobs"][0]["title"], "Album");
    assert_eq!(groups[0]["jobs"][1]["title"], "Portraits");
    assert_eq!(groups[1]["date"], "2024-02-10");
    assert_eq!(groups.as_array().map(Vec::len), Some(2));

    let (_, groups) = get(&client, "/api/get_job_groups?field=deadline");
    assert_eq!(groups.as_array().map(Vec::len), Some(1));

    let (status, _) = get(&client, "/api/get_job_groups?field=sideways");
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn deleting_customer_detaches_jobs() {
    let client = client();
    let (_, customer) = post(
        &client,
        "/api/add_customer",
        json!({"name": "Ada", "companyName": "Engines Ltd"}),
    );
    let job = add_job(
        &client,
        json!({"title": "Team headshots", "customerId": customer["id"]}),
    );
    assert_eq!(job["customerId"], customer["id"]);

    let (status, _) = post(
        &client,
        "/api/delete_customer",
        json!({"customerId": customer["id"]}),
    );
    assert_eq!(status, Status::Ok);

    let (_, customers) = get(&client, "/api/get_customers");
    assert_eq!(customers, json!([]));
    let (_, jobs) = get(&client, "/api/get_jobs");
    assert!(jobs[0].get("customerId").is_none());

    let (status, _) = post(
        &client,
        "/api/add_job",
        json!({"title": "Retake", "customerId": customer["id"]}),
    );
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn category_rename_and_delete_cascade() {
    let client = client();
    add_job(&client, json!({"title": "Ceremony", "category": "Weddings"}));

    let (status, categories) = post(
        &client,
        "/api/rename_category",
        json!({"oldName": "Weddings", "newName": "Elopements"}),
    );
    assert_eq!(status, Status::Ok);
    assert!(categories
        .as_array()
        .unwrap()
        .contains(&json!("Elopements")));

    let (_, jobs) = get(&client, "/api/get_jobs");
    assert_eq!(jobs[0]["category"], "Elopements");

    post(&client, "/api/delete_category", json!({"name": "Elopements"}));
    let (_, jobs) = get(&client, "/api/get_jobs");
    assert_eq!(jobs[0]["category"], "Uncategorized");

    let (status, _) = post(&client, "/api/delete_category", json!({"name": "Other"}));
    assert_eq!(status, Status::BadRequest);

    let (status, _) = post(&client, "/api/add_category", json!({"name": "Uncategorized"}));
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn profile_defaults_then_persists() {
    let client = client();

    let (_, profile) = get(&client, "/api/get_profile");
    assert_eq!(profile["role"], "Freelance Photographer");

    let (status, _) = post(
        &client,
        "/api/set_profile",
        json!({"name": "Sam Rivera", "role": "Wedding Photographer"}),
    );
    assert_eq!(status, Status::Ok);

    let (_, profile) = get(&client, "/api/get_profile");
    assert_eq!(profile["name"], "Sam Rivera");
}

#[test]
fn activity_and_active_jobs() {
    let client = client();
    let job = add_job(&client, json!({"title": "Lookbook"}));
    let (_, todo) = post(
        &client,
        "/api/add_todo",
        json!({"jobId": job["id"], "title": "Shoot"}),
    );
    let request = json!({"jobId": job["id"], "todoId": todo["id"]});
    post(&client, "/api/toggle_todo", request.clone());
    post(&client, "/api/toggle_todo", request);

    let (_, activity) = get(&client, "/api/get_activity");
    let daily_total: u64 = activity["daily"]
        .as_object()
        .unwrap()
        .values()
        .filter_map(Value::as_u64)
        .sum();
    assert_eq!(daily_total, 1);

    let (_, active) = get(&client, "/api/get_active_jobs");
    assert_eq!(active, json!([]));
}
