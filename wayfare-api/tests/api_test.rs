use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use wayfare_api::{
    app,
    middleware::auth::CustomerClaims,
    state::{AppState, AuthConfig},
};
use wayfare_core::inventory::{
    Flight, FlightFilter, FlightPatch, NewFlight, NewPoi, NewVehicle, Poi, PoiFilter, PoiPatch,
    Vehicle, VehicleFilter, VehiclePatch,
};
use wayfare_core::payment::MockPaymentAdapter;
use wayfare_core::pricing::PriceRecord;
use wayfare_core::repository::{
    FlightRepository, PoiRepository, PriceRepository, ReservationRepository, StoreHealth,
    UserRepository, VehicleRepository,
};
use wayfare_core::reservation::{Reservation, ReservationStatus};
use wayfare_core::user::{ProfileUpdate, User};
use wayfare_core::{StoreError, StoreResult};
use wayfare_shared::VenueRef;
use wayfare_store::app_config::BusinessRules;

const TEST_SECRET: &str = "test-secret";

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
struct MemoryPrices {
    rows: Mutex<HashMap<VenueRef, PriceRecord>>,
}

#[async_trait]
impl PriceRepository for MemoryPrices {
    async fn find_price(&self, venue: &VenueRef) -> StoreResult<Option<PriceRecord>> {
        Ok(self.rows.lock().unwrap().get(venue).cloned())
    }

    async fn insert_price(
        &self,
        venue: &VenueRef,
        display_name: Option<&str>,
        base_price: i64,
    ) -> StoreResult<PriceRecord> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(venue) {
            return Err(StoreError::Duplicate);
        }
        let record = PriceRecord {
            venue: *venue,
            display_name: display_name.map(String::from),
            base_price,
            created_at: Utc::now(),
        };
        rows.insert(*venue, record.clone());
        Ok(record)
    }
}

#[derive(Default)]
struct MemoryFlights {
    rows: Mutex<HashMap<Uuid, Flight>>,
}

#[async_trait]
impl FlightRepository for MemoryFlights {
    async fn list(&self, filter: &FlightFilter) -> StoreResult<Vec<Flight>> {
        let rows = self.rows.lock().unwrap();
        let mut flights: Vec<Flight> = rows
            .values()
            .filter(|f| filter.origin.as_ref().is_none_or(|o| &f.origin == o))
            .filter(|f| filter.destination.as_ref().is_none_or(|d| &f.destination == d))
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.departure_at);
        Ok(flights)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, flight: &NewFlight) -> StoreResult<Flight> {
        let now = Utc::now();
        let flight = Flight {
            id: Uuid::new_v4(),
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_at: flight.departure_at,
            arrival_at: flight.arrival_at,
            price: flight.price,
            seats_available: flight.seats_available,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(flight.id, flight.clone());
        Ok(flight)
    }

    async fn update(&self, id: Uuid, patch: &FlightPatch) -> StoreResult<Option<Flight>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(flight) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.flight_number {
            flight.flight_number = v.clone();
        }
        if let Some(v) = &patch.airline {
            flight.airline = v.clone();
        }
        if let Some(v) = &patch.origin {
            flight.origin = v.clone();
        }
        if let Some(v) = &patch.destination {
            flight.destination = v.clone();
        }
        if let Some(v) = patch.departure_at {
            flight.departure_at = v;
        }
        if let Some(v) = patch.arrival_at {
            flight.arrival_at = v;
        }
        if let Some(v) = patch.price {
            flight.price = v;
        }
        if let Some(v) = patch.seats_available {
            flight.seats_available = v;
        }
        flight.updated_at = Utc::now();
        Ok(Some(flight.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        Ok(self.rows.lock().unwrap().remove(&id).map(|f| f.id))
    }
}

#[derive(Default)]
struct MemoryPois {
    rows: Mutex<HashMap<Uuid, Poi>>,
}

#[async_trait]
impl PoiRepository for MemoryPois {
    async fn list(&self, filter: &PoiFilter) -> StoreResult<Vec<Poi>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|p| filter.category.as_ref().is_none_or(|c| &p.category == c))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Poi>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, poi: &NewPoi) -> StoreResult<Poi> {
        let now = Utc::now();
        let poi = Poi {
            id: Uuid::new_v4(),
            name: poi.name.clone(),
            category: poi.category.clone(),
            city: poi.city.clone(),
            latitude: poi.latitude,
            longitude: poi.longitude,
            description: poi.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(poi.id, poi.clone());
        Ok(poi)
    }

    async fn update(&self, id: Uuid, patch: &PoiPatch) -> StoreResult<Option<Poi>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(poi) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.name {
            poi.name = v.clone();
        }
        if let Some(v) = &patch.category {
            poi.category = v.clone();
        }
        if let Some(v) = &patch.city {
            poi.city = Some(v.clone());
        }
        if let Some(v) = patch.latitude {
            poi.latitude = Some(v);
        }
        if let Some(v) = patch.longitude {
            poi.longitude = Some(v);
        }
        if let Some(v) = &patch.description {
            poi.description = Some(v.clone());
        }
        poi.updated_at = Utc::now();
        Ok(Some(poi.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        Ok(self.rows.lock().unwrap().remove(&id).map(|p| p.id))
    }
}

#[derive(Default)]
struct MemoryVehicles {
    rows: Mutex<HashMap<Uuid, Vehicle>>,
}

#[async_trait]
impl VehicleRepository for MemoryVehicles {
    async fn list(&self, filter: &VehicleFilter) -> StoreResult<Vec<Vehicle>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|v| filter.city.as_ref().is_none_or(|c| &v.city == c))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, vehicle: &NewVehicle) -> StoreResult<Vehicle> {
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            model: vehicle.model.clone(),
            vendor: vehicle.vendor.clone(),
            city: vehicle.city.clone(),
            daily_rate: vehicle.daily_rate,
            seats: vehicle.seats,
            transmission: vehicle.transmission.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: Uuid, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(vehicle) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.model {
            vehicle.model = v.clone();
        }
        if let Some(v) = &patch.vendor {
            vehicle.vendor = v.clone();
        }
        if let Some(v) = &patch.city {
            vehicle.city = v.clone();
        }
        if let Some(v) = patch.daily_rate {
            vehicle.daily_rate = v;
        }
        if let Some(v) = patch.seats {
            vehicle.seats = v;
        }
        if let Some(v) = &patch.transmission {
            vehicle.transmission = v.clone();
        }
        vehicle.updated_at = Utc::now();
        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        Ok(self.rows.lock().unwrap().remove(&id).map(|v| v.id))
    }
}

#[derive(Default)]
struct MemoryReservations {
    rows: Mutex<HashMap<Uuid, Reservation>>,
}

#[async_trait]
impl ReservationRepository for MemoryReservations {
    async fn create(&self, reservation: &Reservation) -> StoreResult<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Reservation>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Reservation>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> StoreResult<Option<Reservation>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(reservation) = rows.get_mut(&id) else {
            return Ok(None);
        };
        reservation.status = status;
        reservation.updated_at = Utc::now();
        Ok(Some(reservation.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Uuid>> {
        Ok(self.rows.lock().unwrap().remove(&id).map(|r| r.id))
    }
}

#[derive(Default)]
struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Duplicate);
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfileUpdate) -> StoreResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &patch.full_name {
            user.full_name = Some(full_name.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

struct HealthyStore;

#[async_trait]
impl StoreHealth for HealthyStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

struct UnreachableStore;

#[async_trait]
impl StoreHealth for UnreachableStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_state() -> AppState {
    AppState {
        prices: Arc::new(MemoryPrices::default()),
        flights: Arc::new(MemoryFlights::default()),
        pois: Arc::new(MemoryPois::default()),
        vehicles: Arc::new(MemoryVehicles::default()),
        reservations: Arc::new(MemoryReservations::default()),
        users: Arc::new(MemoryUsers::default()),
        store_health: Arc::new(HealthyStore),
        payments: Arc::new(MockPaymentAdapter),
        auth: AuthConfig {
            secret: TEST_SECRET.to_string(),
            expiration: 3600,
        },
        business_rules: BusinessRules { tax_rate: 0.12 },
    }
}

fn token_for(user_id: Uuid) -> String {
    let claims = CustomerClaims {
        sub: user_id.to_string(),
        email: "traveler@example.com".to_string(),
        role: "CUSTOMER".to_string(),
        exp: (Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Price surface
// ============================================================================

#[tokio::test]
async fn test_ensure_price_mints_once_then_reuses() {
    let app = app(test_state());

    let req = json_request(
        "POST",
        "/ensure-price",
        json!({ "kind": "node", "externalId": 12345, "displayName": "Hotel Aurora" }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["created"], json!(true));
    assert_eq!(body["basePrice"], json!(298_815));

    // Second call observes the existing row.
    let req = json_request(
        "POST",
        "/ensure-price",
        json!({ "kind": "node", "externalId": 12345 }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["created"], json!(false));
    assert_eq!(body["basePrice"], json!(298_815));
}

#[tokio::test]
async fn test_ensure_price_rejects_missing_fields() {
    let app = app(test_state());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/ensure-price",
            json!({ "externalId": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/ensure-price",
            json!({ "kind": "node" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/ensure-price",
            json!({ "kind": "castle", "externalId": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_price_lookup_does_not_mint() {
    let app = app(test_state());

    // Never ensured: lookup is a 404, and stays a 404 on repeat.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/price?kind=node&externalId=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/ensure-price",
            json!({ "kind": "node", "externalId": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/price?kind=node&externalId=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["basePrice"], json!(104_842));
}

#[tokio::test]
async fn test_price_lookup_rejects_missing_params() {
    let app = app(test_state());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/price?kind=node")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_store_liveness() {
    let healthy = app(test_state());
    let response = healthy
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], json!("ok"));

    let mut state = test_state();
    state.store_health = Arc::new(UnreachableStore);
    let unhealthy = app(state);
    let response = unhealthy
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Accounts & sessions
// ============================================================================

#[tokio::test]
async fn test_register_login_round_trip() {
    let app = app(test_state());

    let register = json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "hunter2hunter2",
        "full_name": "Ada L."
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/v1/auth/register", register.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["username"], json!("ada"));

    // Same account again: conflict.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/v1/auth/register", register))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login by username.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({ "identifier": "ada", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // Wrong password and unknown account are indistinguishable.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({ "identifier": "ada", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = response_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/login",
            json!({ "identifier": "nobody", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let unknown_account_body = response_json(response).await;
    assert_eq!(wrong_password_body, unknown_account_body);
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = app(test_state());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/auth/register",
            json!({ "username": "ada", "email": "ada@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_requires_session_and_updates() {
    let state = test_state();
    let user = User::new(
        "ada".to_string(),
        "ada@example.com".to_string(),
        "$argon2-not-checked".to_string(),
    );
    state.users.insert(&user).await.unwrap();
    let app = app(state);

    // No token: 401.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = token_for(user.id);
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/v1/users/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            "/v1/users/me",
            &token,
            Some(json!({ "full_name": "Ada Lovelace" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["full_name"], json!("Ada Lovelace"));
    // Email untouched by a partial update.
    assert_eq!(body["email"], json!("ada@example.com"));
}

// ============================================================================
// Inventory CRUD
// ============================================================================

#[tokio::test]
async fn test_flight_crud_round_trip() {
    let app = app(test_state());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/flights",
            json!({
                "flight_number": "WF101",
                "airline": "Wayfare Air",
                "origin": "VIE",
                "destination": "LIS",
                "departure_at": "2026-09-01T08:30:00Z",
                "arrival_at": "2026-09-01T11:45:00Z",
                "price": 129_00,
                "seats_available": 180
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Filtered list finds it; a different route does not.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/flights?origin=VIE&destination=LIS")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/flights?origin=CDG")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    // Partial update touches only the supplied field.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/v1/flights/{id}"),
            json!({ "price": 149_00 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["price"], json!(149_00));
    assert_eq!(body["flight_number"], json!("WF101"));

    // Delete returns the removed id; the row is gone afterwards.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/flights/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["deleted"], json!(id));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/flights/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = app(test_state());
    let missing = Uuid::new_v4();

    for uri in [
        format!("/v1/flights/{missing}"),
        format!("/v1/pois/{missing}"),
        format!("/v1/vehicles/{missing}"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Reservations
// ============================================================================

#[tokio::test]
async fn test_reservations_require_session() {
    let app = app(test_state());

    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/reservations",
            json!({
                "product_kind": "vehicle",
                "product_ref": "vehicle-abc",
                "pricing": { "unit_price": 100, "duration": 3, "party_size": 1 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reservation_total_is_computed_once_and_frozen() {
    let app = app(test_state());
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);

    // 100/day for 3 days, 10 in extras, 12% tax on the base.
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/v1/reservations",
            &token,
            Some(json!({
                "product_kind": "vehicle",
                "product_ref": "vehicle-abc",
                "pricing": {
                    "unit_price": 100,
                    "duration": 3,
                    "party_size": 1,
                    "extras_total": 10
                },
                "details": { "pickup": "LIS airport" }
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["total_price"], json!(346));
    let id = created["id"].as_str().unwrap().to_string();

    // Status updates do not touch the stored total.
    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/v1/reservations/{id}"),
            &token,
            Some(json!({ "status": "CANCELLED" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], json!("CANCELLED"));
    assert_eq!(body["total_price"], json!(346));
}

#[tokio::test]
async fn test_reservation_pay_captures_frozen_total() {
    let app = app(test_state());
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/v1/reservations",
            &token,
            Some(json!({
                "product_kind": "stay",
                "product_ref": "node-12345",
                "pricing": { "unit_price": 25_000, "duration": 4, "party_size": 2 }
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    // 25_000 * 4 * 2 = 200_000 base, 12% tax = 24_000.
    assert_eq!(created["total_price"], json!(224_000));

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/v1/reservations/{id}/pay"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["reservation"]["status"], json!("PAID"));
    assert_eq!(body["capture"]["amount"], json!(224_000));
    assert_eq!(body["capture"]["status"], json!("SUCCEEDED"));
}

#[tokio::test]
async fn test_reservation_is_scoped_to_owner() {
    let app = app(test_state());
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/v1/reservations",
            &token_for(owner),
            Some(json!({
                "product_kind": "flight",
                "product_ref": "flight-xyz",
                "pricing": { "unit_price": 12_900, "duration": 1, "party_size": 2 }
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/v1/reservations/{id}"),
            &token_for(stranger),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The stranger's own listing stays empty.
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/v1/reservations",
            &token_for(stranger),
            None,
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/v1/reservations",
            &token_for(owner),
            None,
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
