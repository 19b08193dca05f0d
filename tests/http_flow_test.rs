use std::sync::Arc;

use voucher_print::adapters::memory::{MemoryDirectory, MemoryVoucherStore};
use voucher_print::domain::model::{Portal, Roll, Voucher};
use voucher_print::http::{router, AppState, GROUPS_HEADER, USER_HEADER};
use voucher_print::PrintWorkflow;

fn seeded_state() -> Arc<AppState> {
    let store = MemoryVoucherStore::with_data(
        vec![Roll {
            id: 10,
            name: "Front desk roll".to_string(),
        }],
        (1..=3u64)
            .map(|id| Voucher {
                id,
                roll: 10,
                code: format!("CODE-{id:03}"),
                printed_at: None,
                printed_by: None,
            })
            .collect(),
    );
    let directory = MemoryDirectory::new(vec![
        Portal {
            id: 1,
            name: "Lobby".to_string(),
            active: true,
            allow_printing: vec!["front-desk".to_string()],
        },
        Portal {
            id: 2,
            name: "Closed wing".to_string(),
            active: false,
            allow_printing: vec!["front-desk".to_string()],
        },
    ]);
    AppState::new(PrintWorkflow::new(Arc::new(store), Arc::new(directory)))
}

async fn spawn_server(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

fn client() -> reqwest::Client {
    // Redirects are followed by hand so the handoff response stays visible.
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_selection_redirects_and_print_returns_codes() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .post(format!("{base}/portals/1/print-selection"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .form(&[
            ("printer_type", "letter"),
            ("quantity", "2"),
            ("roll_id", "10"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(location.starts_with("/portals/1/rolls/10/print/letter?v="));

    let print = client
        .get(format!("{base}{location}"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .send()
        .await
        .unwrap();

    assert_eq!(print.status(), 200);
    let content_type = print
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let document = print.text().await.unwrap();
    assert!(document.contains("Total codes: 2"));
    assert!(document.contains("CODE-0"));
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .get(format!("{base}/portals"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_portal_list_is_filtered_per_operator() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .get(format!("{base}/portals"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let portals: serde_json::Value = response.json().await.unwrap();
    let names: Vec<&str> = portals
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Lobby"]);
}

#[tokio::test]
async fn test_unauthorized_portal_reads_as_not_found() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    // Inactive portal and missing portal give the same response.
    for portal_id in [2, 99] {
        let response = client
            .get(format!("{base}/portals/{portal_id}/print-selection"))
            .header(USER_HEADER, "clerk")
            .header(GROUPS_HEADER, "front-desk")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(response.text().await.unwrap(), "Not found");
    }
}

#[tokio::test]
async fn test_rejected_form_echoes_input() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .post(format!("{base}/portals/1/print-selection"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .form(&[
            ("printer_type", "letter"),
            ("quantity", "dozen"),
            ("roll_id", "10"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid quantity.");
    assert_eq!(body["quantity"], "dozen");
    assert_eq!(body["portal"]["name"], "Lobby");
}

#[tokio::test]
async fn test_selection_form_prefills_default_quantity() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .get(format!("{base}/portals/1/print-selection"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["quantity"], 5);
}

#[tokio::test]
async fn test_print_url_with_unknown_format_still_prints() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .post(format!("{base}/portals/1/print-selection"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .form(&[
            ("printer_type", "letter"),
            ("quantity", "1"),
            ("roll_id", "10"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .replace("/print/letter?", "/print/parchment?");

    let print = client
        .get(format!("{base}{location}"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .send()
        .await
        .unwrap();

    assert_eq!(print.status(), 200);
    let document = print.text().await.unwrap();
    assert!(document.starts_with("ACCESS VOUCHERS"));
}

#[tokio::test]
async fn test_print_replay_with_foreign_ids_reveals_nothing_extra() {
    let base = spawn_server(seeded_state()).await;
    let client = client();

    let response = client
        .post(format!("{base}/portals/1/print-selection"))
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .form(&[
            ("printer_type", "letter"),
            ("quantity", "1"),
            ("roll_id", "10"),
        ])
        .send()
        .await
        .unwrap();
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();

    // Pad the query with ids that were never claimed.
    let padded = format!("{base}{location}&v=2&v=3&v=999&v=junk");
    let print = client
        .get(padded)
        .header(USER_HEADER, "clerk")
        .header(GROUPS_HEADER, "front-desk")
        .send()
        .await
        .unwrap();

    assert_eq!(print.status(), 200);
    let document = print.text().await.unwrap();
    assert!(document.contains("Total codes: 1"));
}
