//! End-to-end dashboard flows against a scripted transport.
//!
//! Tests:
//! 1. A successful theoretical refresh fills cards, interpretations and charts
//! 2. HTTP 500 writes the error message and mutates no chart
//! 3. A daily-cycle failure is swallowed
//! 4. Repeated refreshes keep one chart instance per canvas
//! 5. Stale responses are ignored
//! 6. Device submissions append cards
//! 7. Hidden canvases are skipped, missing inputs fail binding

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Url;
use tegdash_core::api::{ApiClient, ApiError, RawResponse, Transport};
use tegdash_core::chart::{ChartKey, Series};
use tegdash_core::page::{ids, Page, PageError};
use tegdash_core::view::{Applied, Dashboard, RefreshRequest, ViewState};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Responds per endpoint path; unknown paths are 404.
#[derive(Clone, Default)]
struct Scripted {
    routes: Arc<Mutex<HashMap<String, RawResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Scripted {
    fn set(&self, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            RawResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for Scripted {
    fn get(&self, url: &Url) -> Result<RawResponse, ApiError> {
        self.calls.lock().unwrap().push(url.to_string());
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(url.path())
            .cloned()
            .unwrap_or(RawResponse {
                status: 404,
                body: String::new(),
            }))
    }
}

fn simulation_body(p_load: f64) -> String {
    format!(
        r#"{{"E_load": 0.1234, "E_max": 0.2, "deltaT": 140.04, "V_oc": 6.3, "V_load": 3.15678,
            "I": 0.0125, "P_load": {p_load}, "P_max": 0.05, "Q_h": 3.0,
            "efficiency_carnot": 33.09, "efficiency_teg": 1.234,
            "alpha": 0.04685, "R_interno": 2.4, "K_termica": 0.1,
            "perdidas_total": 1.5, "perdidas_radiacion": 0.25, "perdidas_conduccion": 1.25,
            "transferData": [{{"x": 0.5, "y": 10.0}}, {{"x": 2.5, "y": 39.0}}, {{"x": 5.0, "y": 30.0}}]}}"#
    )
}

fn cycle_body() -> String {
    let hours: Vec<String> = (0..24).map(|h| h.to_string()).collect();
    let temps: Vec<String> = (0..24).map(|h| format!("{}.0", 20 + h)).collect();
    format!(
        r#"{{"horas": [{}], "T_h_valores": [{}], "tipo_fuente": "fuego"}}"#,
        hours.join(","),
        temps.join(",")
    )
}

const REAL_BODY: &str = r#"{
    "temperatureData": [
        {"date": "2023-01-01", "tavg": 8.0, "tmin": -2.0},
        {"date": "2023-01-02", "tavg": 9.0, "tmin": -1.0}
    ],
    "energyTimeline": [
        {"date": "2023-01-01", "energy_wh": 3.2},
        {"date": "2023-01-02", "energy_wh": 3.4}
    ],
    "seasonalityData": [
        {"month": "January", "minEnergy": 2.1, "q1Energy": 2.8, "medianEnergy": 3.0, "q3Energy": 3.3, "maxEnergy": 4.0},
        {"month": "February", "minEnergy": null, "q1Energy": null, "medianEnergy": null, "q3Energy": null, "maxEnergy": null}
    ],
    "batteryHistory": [
        {"date": "2023-01-01", "level": 1.2},
        {"date": "2023-01-02", "level": 2.6}
    ]
}"#;

const DEVICE_BODY: &str = r#"{"device": "Radio", "energy_needed": 1.5, "viable_days": 300,
    "total_days": 365, "percentage": 82.2, "status": "Highly viable"}"#;

fn healthy() -> Scripted {
    let t = Scripted::default();
    t.set("/api/simular-teoria", 200, &simulation_body(0.039));
    t.set("/api/ciclo-diario", 200, &cycle_body());
    t.set("/api/analisis-real", 200, REAL_BODY);
    t.set("/api/analizar-dispositivo", 200, DEVICE_BODY);
    t
}

fn client(transport: &Scripted) -> ApiClient {
    ApiClient::with_transport("http://127.0.0.1:5000", Box::new(transport.clone())).unwrap()
}

fn dashboard() -> Dashboard {
    Dashboard::new(Page::standard()).unwrap()
}

fn run(dash: &mut Dashboard, client: &ApiClient, request: RefreshRequest) -> Applied {
    dash.apply(request.execute(client))
}

// ──────────────────────────────────────────────
// Theoretical view
// ──────────────────────────────────────────────

#[test]
fn successful_refresh_fills_cards_and_charts() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();
    let requests = dash.startup(ViewState::Theoretical).unwrap();
    for request in requests {
        assert_eq!(run(&mut dash, &api, request), Applied::Updated(ViewState::Theoretical));
    }

    let page = dash.page();
    assert_eq!(page.label(ids::RES_ENERGY), Some("0.12"));
    assert_eq!(page.label(ids::RES_DELTA_T), Some("140.0"));
    assert_eq!(page.label(ids::RES_VOLTAGE), Some("3.157"));
    assert_eq!(page.label(ids::RES_CURRENT), Some("12.50"));
    assert_eq!(page.label(ids::RES_POWER), Some("39.00"));
    assert_eq!(page.label(ids::RES_CARNOT), Some("33.1"));
    assert_eq!(page.label(ids::RES_TEG), Some("1.23"));
    assert!(page.label(ids::TXT_TRANSFER).unwrap().contains("39.00 mW"));

    let charts = &dash.theoretical().charts;
    assert_eq!(charts.len(), 4);
    let transfer = &charts.get(ChartKey::PowerTransfer).unwrap().config;
    assert_eq!(transfer.datasets[1].series, Series::Points(vec![(2.5, 39.0)]));
    let params = &charts.get(ChartKey::ParamsTemp).unwrap().config;
    assert_eq!(params.labels.len(), 9);

    let calls = transport.calls();
    assert!(calls[0].contains("/api/simular-teoria?area=16&espesor=3.8&R_th=0.5&emitancia=0.8"));
    assert!(calls[1].contains("/api/ciclo-diario?tipo_fuente=fuego&T_h_pico=150&T_ambiente=10"));
}

#[test]
fn http_500_reports_error_and_leaves_charts_alone() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();

    // First refresh succeeds so the charts exist.
    let request = dash.refresh_theoretical().unwrap();
    run(&mut dash, &api, request);
    let before: Vec<_> = dash
        .theoretical()
        .charts
        .iter()
        .map(|(k, c)| (k, c.clone()))
        .collect();

    transport.set("/api/simular-teoria", 500, r#"{"error": "boom"}"#);
    dash.set_number(ids::IN_LOAD, 7.0).unwrap();
    let request = dash.refresh_theoretical().unwrap();
    let applied = run(&mut dash, &api, request);

    assert_eq!(
        applied,
        Applied::Failed(ViewState::Theoretical, ApiError::HttpStatus { status: 500 })
    );
    assert_eq!(
        dash.page().container(ids::THEORY_RESULTS).unwrap(),
        ["Error: HTTP 500"]
    );
    let after: Vec<_> = dash
        .theoretical()
        .charts
        .iter()
        .map(|(k, c)| (k, c.clone()))
        .collect();
    assert_eq!(before, after);

    // Recovery clears the message.
    transport.set("/api/simular-teoria", 200, &simulation_body(0.02));
    let request = dash.refresh_theoretical().unwrap();
    run(&mut dash, &api, request);
    assert!(dash.page().container(ids::THEORY_RESULTS).unwrap().is_empty());
}

#[test]
fn failure_on_first_refresh_creates_no_charts() {
    let transport = healthy();
    transport.set("/api/simular-teoria", 503, "");
    let api = client(&transport);
    let mut dash = dashboard();
    let request = dash.refresh_theoretical().unwrap();
    run(&mut dash, &api, request);
    assert!(dash.theoretical().charts.is_empty());
    assert_eq!(
        dash.page().container(ids::THEORY_RESULTS).unwrap(),
        ["Error: HTTP 503"]
    );
}

#[test]
fn daily_cycle_failure_is_swallowed() {
    let transport = healthy();
    transport.set("/api/ciclo-diario", 500, "");
    let api = client(&transport);
    let mut dash = dashboard();
    let request = dash.refresh_theoretical().unwrap();
    assert_eq!(
        run(&mut dash, &api, request),
        Applied::Updated(ViewState::Theoretical)
    );
    let charts = &dash.theoretical().charts;
    assert!(charts.get(ChartKey::DailyCycle).is_none());
    assert!(charts.get(ChartKey::PowerTransfer).is_some());
    assert!(dash.page().container(ids::THEORY_RESULTS).unwrap().is_empty());
}

#[test]
fn repeated_refreshes_keep_one_instance_per_canvas() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();
    for i in 0..6 {
        dash.set_number(ids::IN_HOT_TEMP, 100.0 + 10.0 * i as f64).unwrap();
        let request = dash.refresh_theoretical().unwrap();
        run(&mut dash, &api, request);
    }
    let charts = &dash.theoretical().charts;
    assert_eq!(charts.len(), 4);
    assert_eq!(charts.constructed(), 4);
    assert_eq!(charts.get(ChartKey::LossBreakdown).unwrap().revision, 5);
}

#[test]
fn stale_response_is_ignored() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();

    dash.set_number(ids::IN_LOAD, 1.0).unwrap();
    let old = dash.refresh_theoretical().unwrap();
    dash.set_number(ids::IN_LOAD, 9.0).unwrap();
    let new = dash.refresh_theoretical().unwrap();

    let old_outcome = old.execute(&api);
    let new_outcome = new.execute(&api);
    assert_eq!(dash.apply(new_outcome), Applied::Updated(ViewState::Theoretical));
    assert_eq!(dash.apply(old_outcome), Applied::Stale);

    let transfer = &dash
        .theoretical()
        .charts
        .get(ChartKey::PowerTransfer)
        .unwrap()
        .config;
    assert_eq!(transfer.datasets[1].series, Series::Points(vec![(9.0, 39.0)]));
    assert!(!dash.is_loading(ViewState::Theoretical));
}

#[test]
fn preset_change_produces_single_refresh_with_preset_values() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();
    dash.startup(ViewState::Theoretical).unwrap();

    let request = dash.select(ids::IN_MODULE, "generico").unwrap().unwrap();
    run(&mut dash, &api, request);
    let calls = transport.calls();
    let last = calls
        .iter()
        .rev()
        .find(|c| c.contains("/api/simular-teoria"))
        .unwrap();
    assert!(last.contains("area=1&espesor=4"), "{last}");
    assert_eq!(dash.page().label(ids::VAL_THICKNESS), Some("4.0 mm"));

    // Locked geometry rejects user edits.
    assert!(dash.set_number(ids::IN_AREA, 10.0).unwrap().is_none());
    assert_eq!(dash.theoretical().panel.number(ids::IN_AREA).unwrap(), 1.0);
}

// ──────────────────────────────────────────────
// Real view
// ──────────────────────────────────────────────

#[test]
fn real_refresh_renders_all_four_charts() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();
    let request = dash.activate(ViewState::Real).unwrap().unwrap();
    assert_eq!(run(&mut dash, &api, request), Applied::Updated(ViewState::Real));

    let charts = &dash.real().charts;
    assert_eq!(charts.len(), 4);
    let seasonality = &charts.get(ChartKey::Seasonality).unwrap().config;
    assert_eq!(seasonality.axis("y").unwrap().min, Some(1.0));
    assert_eq!(
        seasonality.datasets[0].series,
        Series::Ranges(vec![Some((2.1, 4.0)), None])
    );
    let temperature = &charts.get(ChartKey::Temperature).unwrap().config;
    assert_eq!(temperature.datasets.len(), 2);
    assert_eq!(temperature.labels, ["2023-01-01", "2023-01-02"]);

    let call = transport.calls().last().cloned().unwrap();
    assert!(call.contains("scenarioTh=realista&tipoFuente=fuego&dataType=tavg&RL=5&chargeHours=5&batteryCapacity=10&dailyConsumption=2"));
}

#[test]
fn real_failure_is_logged_only() {
    let transport = healthy();
    transport.set("/api/analisis-real", 500, "");
    let api = client(&transport);
    let mut dash = dashboard();
    let request = dash.refresh_real().unwrap();
    let applied = run(&mut dash, &api, request);
    assert!(matches!(applied, Applied::Failed(ViewState::Real, _)));
    assert!(dash.real().charts.is_empty());
    assert!(dash.page().container(ids::THEORY_RESULTS).unwrap().is_empty());
}

#[test]
fn device_submissions_append_cards() {
    let transport = healthy();
    let api = client(&transport);
    let mut dash = dashboard();
    for _ in 0..2 {
        let request = dash.submit_device("Radio", 1.5).unwrap();
        assert!(matches!(run(&mut dash, &api, request), Applied::DeviceAdded(_)));
    }
    let cards = dash.page().container(ids::DEVICE_CONTAINER).unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards[0].contains("82.2%"));
    assert_eq!(dash.real().devices().len(), 2);
    let call = transport.calls().last().cloned().unwrap();
    assert!(call.contains("deviceName=Radio&deviceEnergy=1.5"));
}

// ──────────────────────────────────────────────
// Page layout
// ──────────────────────────────────────────────

#[test]
fn hidden_canvas_is_skipped() {
    let transport = healthy();
    let api = client(&transport);
    let mut page = Page::standard();
    page.remove(ids::CHART_LOSSES);
    page.remove(ids::THEORY_RESULTS);
    let mut dash = Dashboard::new(page).unwrap();
    let request = dash.refresh_theoretical().unwrap();
    run(&mut dash, &api, request);
    let charts = &dash.theoretical().charts;
    assert!(charts.get(ChartKey::LossBreakdown).is_none());
    assert_eq!(charts.len(), 3);

    // Error with no results container: nothing to write, no panic.
    transport.set("/api/simular-teoria", 500, "");
    let request = dash.refresh_theoretical().unwrap();
    run(&mut dash, &api, request);
    assert!(dash.page().container(ids::THEORY_RESULTS).is_none());
}

#[test]
fn missing_input_fails_startup() {
    let mut page = Page::standard();
    page.remove(ids::IN_CONSUMPTION);
    let err = Dashboard::new(page).unwrap_err();
    assert_eq!(err, PageError::MissingElement(ids::IN_CONSUMPTION.into()));
}
