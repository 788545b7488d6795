//! Integration tests for API endpoints.
//!
//! These tests drive the real router through `tower::ServiceExt::oneshot`
//! with a hand-written in-memory address book behind the service trait, so
//! no database connection is required.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use address_book_api::api::{create_router, AppState};
use address_book_api::domain::{Contact, ContactWithGroups, NewContact};
use address_book_api::errors::{AppError, AppResult, ValidationKind};
use address_book_api::infra::Database;
use address_book_api::services::AddressBookService;

// =============================================================================
// In-Memory Address Book
// =============================================================================

struct InMemoryState {
    contacts: Vec<ContactWithGroups>,
    groups: Vec<String>,
    next_id: i32,
}

/// Stateful fake: behaves like the orchestrated service over real stores,
/// minus the SQL.
struct InMemoryAddressBook {
    state: Mutex<InMemoryState>,
}

impl InMemoryAddressBook {
    fn seeded() -> Self {
        let groups = ["family", "work", "friends", "book club", "gym", "neighbors"];
        let contacts = (1..=20)
            .map(|id| {
                let contact = Contact {
                    id,
                    name: format!("Contact {}", id),
                    email: format!("contact{}@example.com", id),
                    phone: (id % 2 == 0).then(|| format!("555-000-{:04}", id)),
                    birthday: None,
                    company: None,
                };
                let group = groups[(id as usize - 1) % groups.len()].to_string();
                ContactWithGroups::new(contact, vec![group])
            })
            .collect();

        Self {
            state: Mutex::new(InMemoryState {
                contacts,
                groups: groups.iter().map(|g| g.to_string()).collect(),
                next_id: 21,
            }),
        }
    }
}

#[async_trait]
impl AddressBookService for InMemoryAddressBook {
    async fn list_contacts_with_groups(&self) -> AppResult<Vec<ContactWithGroups>> {
        Ok(self.state.lock().unwrap().contacts.clone())
    }

    async fn get_contact_with_groups(&self, id: i32) -> AppResult<Option<ContactWithGroups>> {
        let state = self.state.lock().unwrap();
        Ok(state.contacts.iter().find(|c| c.contact.id == id).cloned())
    }

    async fn create_contact_with_groups(
        &self,
        contact: NewContact,
        groups: Vec<String>,
    ) -> AppResult<i32> {
        let name = match contact.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(AppError::validation(
                    ValidationKind::MissingName,
                    "Contact must have a name",
                ))
            }
        };
        let email = match contact.email {
            Some(email) if !email.trim().is_empty() => email,
            _ => {
                return Err(AppError::validation(
                    ValidationKind::MissingEmail,
                    "Contact must have an email",
                ))
            }
        };

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        for group in &groups {
            if !state.groups.contains(group) {
                state.groups.push(group.clone());
            }
        }

        let stored = Contact {
            id,
            name,
            email,
            phone: contact.phone,
            birthday: contact.birthday,
            company: contact.company,
        };
        state.contacts.push(ContactWithGroups::new(stored, groups));

        Ok(id)
    }

    async fn delete_contact_and_memberships(&self, id: i32) -> AppResult<i32> {
        let mut state = self.state.lock().unwrap();
        let before = state.contacts.len();
        state.contacts.retain(|c| c.contact.id != id);

        if state.contacts.len() == before {
            return Err(AppError::not_found("Contact"));
        }
        Ok(id)
    }

    async fn delete_group_and_memberships(&self, id: i32) -> AppResult<i32> {
        let mut state = self.state.lock().unwrap();
        let index = id as usize;
        if index == 0 || index > state.groups.len() {
            return Err(AppError::not_found("Group"));
        }
        let name = state.groups.remove(index - 1);
        for contact in &mut state.contacts {
            contact.groups.retain(|g| g != &name);
        }
        Ok(id)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let state = AppState::new(
        std::sync::Arc::new(InMemoryAddressBook::seeded()),
        std::sync::Arc::new(Database::from_connection(
            sea_orm::DatabaseConnection::default(),
        )),
    );
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Contact Endpoint Tests
// =============================================================================

#[tokio::test]
async fn list_contacts_returns_every_seeded_contact() {
    let response = test_app().oneshot(get("/contacts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 20);
}

#[tokio::test]
async fn listed_contacts_expose_exactly_the_wire_keys() {
    let response = test_app().oneshot(get("/contacts")).await.unwrap();
    let body = body_json(response).await;

    let first = body.as_array().unwrap()[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["birthday", "company", "email", "groups", "id", "name", "phone"]
    );
    // Absent optionals are null, never omitted
    assert!(first["birthday"].is_null());
}

#[tokio::test]
async fn get_contact_returns_the_contact_with_groups() {
    let response = test_app().oneshot(get("/contacts/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Contact 3");
    assert_eq!(body["groups"], json!(["friends"]));
}

#[tokio::test]
async fn get_contact_with_unknown_id_answers_404() {
    let response = test_app().oneshot(get("/contacts/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a valid contact ID");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn get_contact_with_unparsable_id_answers_the_same_404() {
    let response = test_app().oneshot(get("/contacts/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a valid contact ID");
}

#[tokio::test]
async fn create_contact_answers_201_with_the_new_id() {
    let app = test_app();

    let request = post_json(
        "/contacts",
        json!({
            "contact": {
                "name": "Patty O'Furniture",
                "email": "patty@aol.com",
                "phone": "555-888-1234"
            },
            "groups": ["G1", "G2"]
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], 21);
    assert_eq!(body["message"], "Contact created");

    // The new contact is readable with its groups attached
    let response = app.oneshot(get("/contacts/21")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["groups"], json!(["G1", "G2"]));
}

#[tokio::test]
async fn create_contact_without_groups_defaults_to_none() {
    let request = post_json(
        "/contacts",
        json!({"contact": {"name": "Solo", "email": "solo@example.com"}}),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn create_contact_without_a_name_answers_402() {
    let request = post_json("/contacts", json!({"contact": {"email": "patty@aol.com"}}));
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a name");
    assert_eq!(body["status"], 402);
}

#[tokio::test]
async fn create_contact_without_an_email_answers_402() {
    let request = post_json("/contacts", json!({"contact": {"name": "Patty"}}));
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Contact must have an email");
}

#[tokio::test]
async fn delete_contact_removes_it_from_the_listing() {
    let app = test_app();

    let response = app.clone().oneshot(delete("/contacts/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["message"], "Contact deleted");

    let response = app.oneshot(get("/contacts")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 19);
}

#[tokio::test]
async fn delete_contact_with_nonnumeric_id_answers_402() {
    let response = test_app().oneshot(delete("/contacts/five")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a contact ID number");
}

#[tokio::test]
async fn delete_with_fractional_id_answers_402() {
    // Ids must parse as whole integers; "5.5" is rejected rather than
    // truncated to 5.
    let app = test_app();

    let response = app.clone().oneshot(delete("/contacts/5.5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a contact ID number");

    let response = app.clone().oneshot(delete("/groups/2.5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a group ID number");

    // Contact 5 is untouched
    let response = app.oneshot(get("/contacts/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_contact_with_unknown_id_answers_404() {
    let response = test_app().oneshot(delete("/contacts/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Contact not found");
}

// =============================================================================
// Group Endpoint Tests
// =============================================================================

#[tokio::test]
async fn delete_group_answers_with_the_deleted_id() {
    let response = test_app().oneshot(delete("/groups/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["message"], "Group deleted");
}

#[tokio::test]
async fn delete_group_with_nonnumeric_id_answers_402() {
    let response = test_app().oneshot(delete("/groups/two")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a group ID number");
}

#[tokio::test]
async fn delete_group_with_unknown_id_answers_404() {
    let response = test_app().oneshot(delete("/groups/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Group not found");
}

// =============================================================================
// Routing and Error Contract Tests
// =============================================================================

#[tokio::test]
async fn root_answers_with_the_banner() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Welcome to the Address Book API");
}

#[tokio::test]
async fn unknown_routes_answer_the_not_built_404() {
    for request in [
        get("/nope"),
        get("/contacts/3/extra"),
        post_json("/groups", json!({})),
    ] {
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "This route is not built yet...");
    }
}

#[tokio::test]
async fn error_transport_status_matches_body_status() {
    let cases = [
        (get("/contacts/999"), StatusCode::NOT_FOUND),
        (delete("/contacts/five"), StatusCode::PAYMENT_REQUIRED),
        (get("/missing"), StatusCode::NOT_FOUND),
    ];

    for (request, expected) in cases {
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected);

        let body = body_json(response).await;
        assert_eq!(body["status"], expected.as_u16());
    }
}

#[tokio::test]
async fn health_reports_degraded_without_a_database() {
    // The test state carries a disconnected handle; ping fails.
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}
