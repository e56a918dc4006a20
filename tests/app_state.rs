mod common;

use std::time::Duration;

use axum::http::Method;
use chrono::NaiveDate;
use serde_json::json;

use common::{representative_json, MockBackend};
use school_admin::{
    flows::{
        confirm::{LABEL_ARMED, LABEL_IDLE},
        listing::ListState,
        payment_form::SubmitOutcome,
    },
    models::representative::{Representative, RepresentativeFilters},
    AppConfig, AppState,
};

#[tokio::test(start_paused = true)]
async fn payment_form_uses_the_configured_confirm_window() {
    // Nada é enviado: o primeiro clique só arma a confirmação
    let mut config = AppConfig::new("http://127.0.0.1:9/api/v1");
    config.confirm_window = Duration::from_millis(1500);
    let state = AppState::new(config).unwrap();

    let mut form = state.payment_form(NaiveDate::from_ymd_opt(2024, 10, 7).unwrap());
    form.representative = Some(serde_json::from_value(representative_json(3)).unwrap());
    form.amount_input = "100".into();

    let outcome = form.submit(&state.session, &state.payment_service).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::AwaitingConfirmation));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(form.confirm_label(), LABEL_ARMED);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(form.confirm_label(), LABEL_IDLE);
}

#[tokio::test]
async fn listing_and_search_use_the_configured_page_size() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/representatives/",
        200,
        json!({ "items": [representative_json(1)], "total": 1 }),
    );

    let mut config = AppConfig::new(&backend.base_url);
    config.api_token = Some("token-de-prueba".into());
    config.default_page_size = 25;
    config.search_debounce = Duration::from_millis(20);
    let state = AppState::new(config).unwrap();

    let list: ListState<Representative, RepresentativeFilters> = state.list_state();
    assert_eq!(list.params().limit, 25);
    assert_eq!(list.params().skip, 0);

    let mut search = state.representative_search();
    search.input("ana");
    search.settle().await;
    assert_eq!(search.results().len(), 1);

    let requests = backend.requests_to(Method::GET, "/representatives/");
    assert_eq!(requests.len(), 1);
    let pairs = requests[0].query_pairs();
    assert!(pairs.contains(&("limit".into(), "25".into())));
    assert!(pairs.contains(&("search".into(), "ana".into())));
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer token-de-prueba"));
}
