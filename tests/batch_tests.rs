mod common;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use common::{Embedded, FACTURX_XML, XRECHNUNG_XML, pdf_with_attachments, pdf_without_attachments};
use zugferd_extractor::input::resolve_pattern;
use zugferd_extractor::*;

#[test]
fn mixed_batch_reports_each_pdf() {
    let dir = tempfile::tempdir().unwrap();
    pdf_with_attachments(
        &dir.path().join("a.pdf"),
        &[Embedded::plain("factur-x.xml", FACTURX_XML.as_bytes())],
    );
    pdf_without_attachments(&dir.path().join("b.pdf"));
    fs::write(dir.path().join("c.txt"), FACTURX_XML).unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let pattern = format!("{}/*", dir.path().display());
    let inputs = resolve_pattern(&pattern).unwrap();
    let extractor = Extractor::new();
    let report = BatchProcessor::new(
        &extractor,
        BatchConfig {
            workers: 4,
            output_dir: Some(out.clone()),
        },
    )
    .run(&inputs, &pattern)
    .unwrap();

    assert_eq!(report.processed(), 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    for outcome in &report.outcomes {
        match outcome {
            ExtractionOutcome::Success(extracted) => {
                assert!(extracted.input.ends_with("a.pdf"));
                assert_eq!(extracted.output_path, out.join("a.xml"));
            }
            ExtractionOutcome::Failure { input, kind, stage, .. } => {
                assert!(input.ends_with("b.pdf"));
                assert_eq!(*kind, ErrorKind::ContainerUnreadable);
                assert_eq!(*stage, Stage::Attachments);
            }
        }
    }
    assert_eq!(fs::read(out.join("a.xml")).unwrap(), FACTURX_XML.as_bytes());
    assert!(!out.join("b.xml").exists());
}

#[test]
fn every_file_is_processed_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..9)
        .map(|i| {
            let xml = if i % 2 == 0 { FACTURX_XML } else { XRECHNUNG_XML };
            pdf_with_attachments(
                &dir.path().join(format!("invoice-{i}.pdf")),
                &[Embedded::flate("invoice.xml", xml.as_bytes())],
            )
        })
        .collect();
    let out = dir.path().join("xml");

    let extractor = Extractor::new();
    let report = BatchProcessor::new(
        &extractor,
        BatchConfig {
            workers: 3,
            output_dir: Some(out.clone()),
        },
    )
    .run(&inputs, "invoice-*.pdf")
    .unwrap();

    assert_eq!(report.processed(), 9);
    assert_eq!(report.succeeded, 9);
    let seen: HashSet<_> = report.outcomes.iter().map(|o| o.input().to_path_buf()).collect();
    assert_eq!(seen.len(), 9);
    for i in 0..9 {
        assert!(out.join(format!("invoice-{i}.xml")).is_file());
    }
}

#[test]
fn default_outputs_land_next_to_containers() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        pdf_with_attachments(
            &dir.path().join("one.pdf"),
            &[Embedded::plain("xrechnung.xml", XRECHNUNG_XML.as_bytes())],
        ),
        pdf_with_attachments(
            &dir.path().join("two.pdf"),
            &[Embedded::plain("daten.xml", FACTURX_XML.as_bytes())],
        ),
    ];

    let extractor = Extractor::new();
    let report = BatchProcessor::new(&extractor, BatchConfig::default())
        .run(&inputs, "*.pdf")
        .unwrap();

    assert_eq!(report.succeeded, 2);
    assert!(dir.path().join("xrechnung.xml").is_file());
    assert!(dir.path().join("two.xml").is_file());
}

#[test]
fn report_serializes_tally_and_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![pdf_without_attachments(&dir.path().join("leer.pdf"))];

    let extractor = Extractor::new();
    let report = BatchProcessor::new(&extractor, BatchConfig::default())
        .run(&inputs, "leer.pdf")
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["succeeded"], 0);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["outcomes"][0]["status"], "failure");
    assert_eq!(json["outcomes"][0]["kind"], "container_unreadable");
    assert_eq!(json["outcomes"][0]["stage"], "attachments");
}
