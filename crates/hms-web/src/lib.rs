//! HMS Web Server
//!
//! Axum-based REST API and WebSocket feed for the hospital management service.

pub mod routes;
pub mod state;
pub mod websocket;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use hms_core::lab::report::ReportGenerator;
use hms_store::StorePool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Patients
        .route("/patients", get(routes::patients::list_patients).post(routes::patients::register_patient))
        .route("/patients/{id}", get(routes::patients::get_patient))
        .route("/patients/{id}/status", put(routes::patients::update_patient_status))
        .route(
            "/patients/{id}/records",
            get(routes::patients::list_records).post(routes::patients::add_record),
        )
        // Doctors
        .route("/doctors", get(routes::doctors::list_doctors).post(routes::doctors::add_doctor))
        .route("/doctors/{id}", get(routes::doctors::get_doctor))
        .route("/doctors/{id}/status", put(routes::doctors::update_doctor_status))
        .route("/doctors/{id}/dashboard", get(routes::doctors::doctor_dashboard))
        // Appointments
        .route(
            "/appointments",
            get(routes::appointments::list_appointments).post(routes::appointments::schedule_appointment),
        )
        .route(
            "/appointments/{id}",
            get(routes::appointments::get_appointment).put(routes::appointments::update_appointment),
        )
        .route("/appointments/{id}/status", put(routes::appointments::set_status))
        .route("/appointments/{id}/cancel", post(routes::appointments::cancel_appointment))
        .route("/appointments/{id}/complete", post(routes::appointments::complete_appointment))
        .route("/appointments/{id}/bill", post(routes::appointments::bill_appointment))
        // OPD
        .route("/opd", get(routes::opd::list_registrations).post(routes::opd::register_opd))
        .route("/opd/{id}", get(routes::opd::get_registration))
        // Billing
        .route("/bills", get(routes::billing::list_bills).post(routes::billing::create_bill))
        .route("/bills/{id}", get(routes::billing::get_bill))
        .route("/bills/{id}/status", put(routes::billing::update_bill_status))
        .route("/bills/{id}/invoice", get(routes::billing::get_invoice))
        // Laboratory
        .route(
            "/lab-appointments",
            get(routes::lab::list_lab_appointments).post(routes::lab::schedule_lab_test),
        )
        .route("/lab-appointments/counts", get(routes::lab::status_counts))
        .route("/lab-appointments/{id}", get(routes::lab::get_lab_appointment))
        .route("/lab-appointments/{id}/status", put(routes::lab::update_lab_status))
        .route("/lab-appointments/{id}/draft-report", post(routes::lab::draft_report))
        .route("/lab-appointments/{id}/report", put(routes::lab::save_report))
        .route("/lab-reports/generate", post(routes::lab::generate_report))
        // Pharmacy
        .route(
            "/prescriptions",
            get(routes::prescriptions::list_prescriptions).post(routes::prescriptions::create_prescription),
        )
        .route("/prescriptions/counts", get(routes::prescriptions::status_counts))
        .route("/prescriptions/{id}", get(routes::prescriptions::get_prescription))
        .route("/prescriptions/{id}/fill", post(routes::prescriptions::fill_prescription))
        .route("/prescriptions/{id}/cancel", post(routes::prescriptions::cancel_prescription))
        .route("/prescriptions/{id}/reopen", post(routes::prescriptions::reopen_prescription))
        // Statistics
        .route("/stats/dashboard", get(routes::stats::dashboard))
        .route("/stats/daily", get(routes::stats::daily))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health::health))
        .route("/ws", get(websocket::ws_handler))
        .route("/internal/notify", post(routes::internal::notify))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(
    db: StorePool,
    generator: Arc<dyn ReportGenerator>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(db, generator);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use hms_core::lab::report::{AnalyteResult, GenerationFailure, LabReport, LabTestRequest};
    use hms_store::HmsEvent;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct StubGenerator {
        fail: bool,
    }

    #[async_trait]
    impl ReportGenerator for StubGenerator {
        async fn generate_lab_report(&self, request: &LabTestRequest) -> Result<LabReport, GenerationFailure> {
            if self.fail {
                return Err(GenerationFailure::new("backend unavailable"));
            }
            Ok(LabReport {
                results: vec![AnalyteResult {
                    analyte: "Total Cholesterol".to_string(),
                    result: "180 mg/dL".to_string(),
                    reference_range: "<200 mg/dL".to_string(),
                }],
                interpretation: format!("{} within normal limits.", request.test_name),
            })
        }
    }

    fn test_state(fail: bool) -> AppState {
        AppState::new(hms_store::in_memory(), Arc::new(StubGenerator { fail }))
    }

    async fn call(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(b) => request.body(Body::from(b.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn add_doctor(state: &AppState) -> String {
        let (status, body) = call(state, Method::POST, "/api/doctors", Some(json!({
            "name": "Dr. Anil Sharma",
            "department": "General",
            "qualification": "MBBS",
            "languages": "English, Hindi",
            "email": "anil@hospital.org"
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn add_patient(state: &AppState, doctor_id: &str) -> String {
        let (status, body) = call(state, Method::POST, "/api/patients", Some(json!({
            "name": "Asha Verma",
            "age": 40,
            "gender": "Female",
            "contact": "9876543210",
            "address": "Pune",
            "doctorId": doctor_id
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(false);
        let (status, body) = call(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }

    #[tokio::test]
    async fn test_generate_report() {
        let state = test_state(false);
        let (status, body) = call(&state, Method::POST, "/api/lab-reports/generate", Some(json!({
            "testName": "Lipid Profile"
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["referenceRange"], "<200 mg/dL");
        assert!(!body["interpretation"].as_str().unwrap().is_empty());

        let (status, _) = call(&state, Method::POST, "/api/lab-reports/generate", Some(json!({
            "testName": "  "
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_report_failure_is_generic() {
        let state = test_state(true);
        let (status, body) = call(&state, Method::POST, "/api/lab-reports/generate", Some(json!({
            "testName": "Lipid Profile"
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, Value::String("Failed to generate lab report.".to_string()));
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let state = test_state(false);
        let (status, _) = call(&state, Method::GET, "/api/patients/pat42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let doctor_id = add_doctor(&state).await;
        let (status, _) = call(&state, Method::PUT, &format!("/api/doctors/{}/status", doctor_id), Some(json!({
            "status": "retired"
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let patient_id = add_patient(&state, &doctor_id).await;
        let (status, rx) = call(&state, Method::POST, "/api/prescriptions", Some(json!({
            "patientId": patient_id,
            "medication": "Amoxicillin",
            "dosage": "500mg"
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let fill = format!("/api/prescriptions/{}/fill", rx["id"].as_str().unwrap());
        assert_eq!(call(&state, Method::POST, &fill, None).await.0, StatusCode::OK);
        assert_eq!(call(&state, Method::POST, &fill, None).await.0, StatusCode::CONFLICT);

        let reopen = format!("/api/prescriptions/{}/reopen", rx["id"].as_str().unwrap());
        let (status, reopened) = call(&state, Method::POST, &reopen, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reopened["status"], "Pending");
        assert_eq!(call(&state, Method::POST, &reopen, None).await.0, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_medical_records() {
        let state = test_state(false);
        let mut rx = state.tx.subscribe();
        let doctor_id = add_doctor(&state).await;
        let patient_id = add_patient(&state, &doctor_id).await;
        let path = format!("/api/patients/{}/records", patient_id);

        let (status, note) = call(&state, Method::POST, &path, Some(json!({
            "title": "Admission",
            "content": "Chest pain on arrival"
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(note["type"], "Note");
        assert!(note.get("fileUrl").is_none());

        let (status, _) = call(&state, Method::POST, &path, Some(json!({
            "type": "Report",
            "title": "ECG",
            "content": "Normal sinus rhythm",
            "fileUrl": "/files/ecg.pdf"
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = call(&state, Method::POST, &path, Some(json!({
            "title": "",
            "content": "text"
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, history) = call(&state, Method::GET, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history[0]["title"], "ECG");
        assert_eq!(history[0]["fileUrl"], "/files/ecg.pdf");
        assert_eq!(history[1]["title"], "Admission");

        let (status, _) = call(&state, Method::GET, "/api/patients/pat42/records", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.contains(&HmsEvent::MedicalRecordAdded {
            record_id: note["id"].as_str().unwrap().to_string(),
            patient_id,
        }));
    }

    #[tokio::test]
    async fn test_lab_flow_broadcasts() {
        let state = test_state(false);
        let mut rx = state.tx.subscribe();
        let doctor_id = add_doctor(&state).await;
        let patient_id = add_patient(&state, &doctor_id).await;

        let today = hms_core::validation::today().format("%Y-%m-%d").to_string();
        let (status, lab) = call(&state, Method::POST, "/api/lab-appointments", Some(json!({
            "patientId": patient_id,
            "testName": "Lipid Profile",
            "date": today
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = lab["id"].as_str().unwrap().to_string();

        let (status, draft) = call(&state, Method::POST, &format!("/api/lab-appointments/{}/draft-report", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, saved) = call(&state, Method::PUT, &format!("/api/lab-appointments/{}/report", id), Some(draft)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["status"], "Completed");
        assert!(saved["reportData"]["results"].is_array());

        let (_, counts) = call(&state, Method::GET, "/api/lab-appointments/counts", None).await;
        assert_eq!(counts, json!({"Cancelled": 0, "Completed": 1, "Scheduled": 0}));

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.contains(&HmsEvent::LabAppointmentUpdated {
            lab_id: id,
            status: "Completed".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_appointment_and_billing_flow() {
        let state = test_state(false);
        let doctor_id = add_doctor(&state).await;
        let date = (hms_core::validation::today() + chrono::Duration::days(1)).format("%Y-%m-%d").to_string();

        let (status, appt) = call(&state, Method::POST, "/api/appointments", Some(json!({
            "patientName": "Kavya Iyer",
            "patientAge": 31,
            "patientGender": "Female",
            "patientContact": "9876543210",
            "doctorId": doctor_id,
            "date": date,
            "time": "10:00 am",
            "reason": "Checkup",
            "paymentStatus": "Paid"
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(appt["time"], "10:00 AM");
        let id = appt["id"].as_str().unwrap();

        let (_, listed) = call(&state, Method::GET, "/api/appointments?search=kavya", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, bill) = call(&state, Method::POST, &format!("/api/appointments/{}/bill", id), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(bill["amount"], 500.0);
        assert_eq!(bill["status"], "Paid");

        let invoice_path = format!("/api/bills/{}/invoice", bill["id"].as_str().unwrap());
        let (status, invoice) = call(&state, Method::GET, &invoice_path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(invoice["patient"]["name"], "Kavya Iyer");
        assert_eq!(invoice["patient"]["id"], appt["patientId"]);

        let (_, summary) = call(&state, Method::GET, "/api/stats/dashboard", None).await;
        assert_eq!(summary["totalRevenue"], 500.0);
        assert_eq!(summary["recentAppointments"][0]["doctorName"], "Dr. Anil Sharma");

        let (status, _) = call(&state, Method::POST, &format!("/api/appointments/{}/cancel", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&state, Method::POST, &format!("/api/appointments/{}/complete", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_internal_notify_broadcasts() {
        let state = test_state(false);
        let mut rx = state.tx.subscribe();
        let (status, _) = call(&state, Method::POST, "/internal/notify", Some(json!({"type": "DashboardRefresh"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rx.try_recv().unwrap(), HmsEvent::DashboardRefresh);
    }
}
