use std::sync::Arc;

use voucher_print::adapters::memory::{MemoryDirectory, MemoryVoucherStore};
use voucher_print::adapters::render::{renderer_for, DocumentRenderer, LetterRenderer};
use voucher_print::domain::model::{Operator, Portal, PrinterType, PrintJob, Roll, Voucher};
use voucher_print::{PrintWorkflow, SelectionForm, SelectionOutcome};

fn operator() -> Operator {
    Operator {
        username: "clerk".to_string(),
        groups: vec!["front-desk".to_string()],
    }
}

fn workflow_with_codes(codes: &[&str]) -> (MemoryVoucherStore, PrintWorkflow) {
    let store = MemoryVoucherStore::with_data(
        vec![Roll {
            id: 10,
            name: "Roll ten".to_string(),
        }],
        codes
            .iter()
            .enumerate()
            .map(|(index, code)| Voucher {
                id: index as u64 + 1,
                roll: 10,
                code: code.to_string(),
                printed_at: None,
                printed_by: None,
            })
            .collect(),
    );
    let directory = MemoryDirectory::new(vec![Portal {
        id: 1,
        name: "Lobby".to_string(),
        active: true,
        allow_printing: vec!["front-desk".to_string()],
    }]);
    let workflow = PrintWorkflow::new(Arc::new(store.clone()), Arc::new(directory));
    (store, workflow)
}

async fn claim_two(workflow: &PrintWorkflow, printer_type: &str) -> String {
    let outcome = workflow
        .select(
            1,
            &operator(),
            SelectionForm {
                printer_type: printer_type.to_string(),
                quantity: "2".to_string(),
                roll_id: "10".to_string(),
            },
        )
        .await
        .unwrap();
    match outcome {
        SelectionOutcome::Redirect(url) => url,
        SelectionOutcome::Retry(retry) => panic!("unexpected retry: {}", retry.error),
    }
}

fn query_of(url: &str) -> String {
    url.split_once('?').map(|(_, q)| q.to_string()).unwrap_or_default()
}

#[tokio::test]
async fn test_letter_document_contains_claimed_codes() {
    let (_, workflow) = workflow_with_codes(&["AAA-1", "BBB-2", "CCC-3"]);
    let url = claim_two(&workflow, "letter").await;

    let document = workflow
        .render(1, 10, "letter", &query_of(&url), &operator())
        .await
        .unwrap();

    assert!(document.starts_with("ACCESS VOUCHERS"));
    assert!(document.contains("Portal: Lobby"));
    assert!(document.contains("Total codes: 2"));
}

#[tokio::test]
async fn test_label_document_advances_one_label_per_code() {
    let (_, workflow) = workflow_with_codes(&["AAA-1", "BBB-2"]);
    let url = claim_two(&workflow, "address_labels").await;

    let document = workflow
        .render(1, 10, "address_labels", &query_of(&url), &operator())
        .await
        .unwrap();

    assert_eq!(document.matches('\x0c').count(), 1);
    assert_eq!(document.matches("Access voucher").count(), 2);
}

#[tokio::test]
async fn test_unknown_format_in_print_url_renders_as_letter() {
    let (store, workflow) = workflow_with_codes(&["AAA-1", "BBB-2"]);
    let url = claim_two(&workflow, "letter").await;
    let query = query_of(&url);

    // Same claim, format replaced with something nobody registered.
    let document = workflow
        .render(1, 10, "parchment", &query, &operator())
        .await
        .unwrap();

    // Compare against the letter renderer applied to the same job.
    let codes = {
        let mut codes = Vec::new();
        for id in voucher_print::core::handoff::voucher_ids_from_query(&query) {
            codes.push(store.voucher(id).await.unwrap().code);
        }
        codes
    };
    let expected = LetterRenderer.render(&PrintJob {
        portal: Portal {
            id: 1,
            name: "Lobby".to_string(),
            active: true,
            allow_printing: vec!["front-desk".to_string()],
        },
        roll: Roll {
            id: 10,
            name: "Roll ten".to_string(),
        },
        printer_type: PrinterType::Letter,
        codes,
    });
    assert_eq!(document, expected);
}

#[tokio::test]
async fn test_print_url_without_vouchers_renders_empty_document() {
    let (_, workflow) = workflow_with_codes(&["AAA-1"]);

    let document = workflow
        .render(1, 10, "letter", "", &operator())
        .await
        .unwrap();
    assert!(document.contains("Total codes: 0"));
}

#[test]
fn test_dispatch_matches_requested_layout() {
    let job = PrintJob {
        portal: Portal {
            id: 1,
            name: "Lobby".to_string(),
            active: true,
            allow_printing: vec![],
        },
        roll: Roll {
            id: 10,
            name: "Roll ten".to_string(),
        },
        printer_type: PrinterType::AddressLabels,
        codes: vec!["AAA-1".to_string()],
    };

    let labels = renderer_for(PrinterType::AddressLabels).render(&job);
    let letter = renderer_for(PrinterType::Letter).render(&job);
    assert_ne!(labels, letter);
    assert!(labels.contains("AAA-1"));
    assert!(letter.contains("AAA-1"));
}
