//! Full create/list/get flow against live servers.
//!
//! Starts the mock client service and the car service on random ports, then
//! drives the car service over real HTTP using ureq and the `CarApi`
//! build/parse pairs. The mock's lookup counter checks how many remote calls
//! each read issued.

use std::net::SocketAddr;

use car_core::{ApiError, CarApi, HttpMethod, HttpRequest, HttpResponse, NewCar};
use car_service::{config::Config, AppState};
use mock_server::Registry;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`, with
/// 4xx/5xx statuses returned as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Bind a random port and serve `serve` on it from a dedicated runtime.
fn spawn_server<F, Fut>(serve: F) -> SocketAddr
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<(), std::io::Error>>,
{
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            serve(listener).await
        })
        .unwrap();
    });

    addr
}

fn new_car(matricule: &str, client_id: Option<i64>) -> NewCar {
    NewCar {
        brand: "Renault".to_string(),
        model: "Megane".to_string(),
        matricule: matricule.to_string(),
        client_id,
    }
}

#[test]
fn create_then_read_with_enrichment() {
    // Step 1: client service with one known client.
    let registry = Registry::with_clients([mock_server::Client {
        id: 42,
        name: "Alice".to_string(),
        email: Some("alice@example.com".to_string()),
    }]);
    let served = registry.clone();
    let clients_addr = spawn_server(move |listener| mock_server::serve(listener, served));

    // Step 2: car service pointed at it.
    let config = Config::from_lookup(|key| match key {
        "CLIENT_SERVICE_URL" => Some(format!("http://{clients_addr}")),
        "CLIENT_SERVICE_TIMEOUT_MS" => Some("2000".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::from_config(&config).unwrap();
    let cars_addr = spawn_server(move |listener| car_service::run(listener, state));

    let api = CarApi::new(&format!("http://{cars_addr}"));

    // Step 3: list starts empty.
    let cars = api.parse_list_cars(execute(api.build_list_cars())).unwrap();
    assert!(cars.is_empty(), "expected empty list");

    // Step 4: create three cars; one known client, none, one dangling.
    let mut ids = Vec::new();
    for (matricule, client_id) in [("M1", Some(42)), ("M2", None), ("M3", Some(99))] {
        let input = new_car(matricule, client_id);
        let created = api
            .parse_create_car(execute(api.build_create_car(&input).unwrap()))
            .unwrap();
        assert_eq!(created.matricule, matricule);
        assert_eq!(created.client_id, client_id);
        assert!(created.client.is_none(), "create must not enrich");
        ids.push(created.id);
    }
    assert_eq!(registry.lookups(), 0);

    // Step 5: get enriches from the client service.
    let car = api.parse_get_car(execute(api.build_get_car(ids[0]))).unwrap();
    assert_eq!(car.client.as_ref().map(|c| c.name.as_str()), Some("Alice"));
    assert_eq!(registry.lookups(), 1);

    // Step 6: no client reference, no lookup.
    let car = api.parse_get_car(execute(api.build_get_car(ids[1]))).unwrap();
    assert!(car.client.is_none());
    assert_eq!(registry.lookups(), 1);

    // Step 7: dangling reference comes back with client null.
    let car = api.parse_get_car(execute(api.build_get_car(ids[2]))).unwrap();
    assert_eq!(car.client_id, Some(99));
    assert!(car.client.is_none());
    assert_eq!(registry.lookups(), 2);

    // Step 8: list issues one lookup per referencing car.
    let cars = api.parse_list_cars(execute(api.build_list_cars())).unwrap();
    assert_eq!(cars.len(), 3);
    assert_eq!(registry.lookups(), 4);

    // Step 9: unknown id is an explicit not-found.
    let err = api.parse_get_car(execute(api.build_get_car(1000))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: invalid payload is rejected and not stored.
    let err = api
        .parse_create_car(execute(api.build_create_car(&new_car("", None)).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 422, .. }));
    let cars = api.parse_list_cars(execute(api.build_list_cars())).unwrap();
    assert_eq!(cars.len(), 3);
}
