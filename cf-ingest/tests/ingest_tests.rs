//! Integration tests for the UniProt client and ingest run
//!
//! A local axum server stands in for the UniProt search endpoint.

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Router};
use cf_common::db;
use cf_ingest::{run_ingest, IngestError, UniProtClient};

const TSV_BODY: &str = "Entry\tProtein names\tGene Names\tOrganism\tLength\tMass\tSequence\n\
P61626\tLysozyme C\tLYZ LZM\tHomo sapiens (Human)\t148\t16537\tMKALIVLGLVLLSVTVQGKVFERCELARTLKRLGMDGYRGISLANWMCLAKWESGYNTRATNYNAGDRSTDYGIFQINSRYWCNDGKTPGAVNACHLSCSALLQDNIADAVACAKRVVRDPQGIRAWVAWRNRCQNRDVRQYVQGCGV\n\
P02768\tAlbumin\tALB\tHomo sapiens (Human)\t609\t69367\tMKWVTFISLLFLFSSAYSRGVFRRDAHKSEVAHRFKDLGEENFKALVLIAFAQYLQQCPFEDHVKLVNEVTEFAKTCVADESAENCDKSLHTLFGDKLCTVATLRETYGEMADCCAKQEPERNECFLQHKDDNPNLPRLVRPEVDVMCTAFHDNEETFLKKYLYEIARRHPYFYAPELLFFAKRYKAAFTECCQAADKAACLLPKLDELRDEGKASSAKQRLKCASLQKFGERAFKAWAVARLSQRFPKAEFAEVSKLVTDLTKVHTECCHGDLLECADDRADLAKYICENQDSISSKLKECCEKPLLEKSHCIAEVENDEMPADLPSLAADFVESKDVCKNYAEAKDVFLGMFLYEYARRHPDYSVVLLLRLAKTYETTLEKCCAAADPHECYAKVFDEFKPLVEEPQNLIKQNCELFEQLGEYKFQNALLVRYTKKVPQVSTPTLVEVSRNLGKVGSKCCKHPEAKRMPCAEDYLSVVLNQLCVLHEKTPVSDRVTKCCTESLVNRRPCFSALEVDETYVPKEFNAETFTFHADICTLSEKERQIKKQTALVELVKHKPKATKEQLKAVMDDFAAFVEKCCKADDKETCFAEEGKKLVAASQAALGL\n\
P0DTC2\tSpike glycoprotein\tS\tSARS-CoV-2\t1273\t141178\t\n";

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/uniprotkb/search", addr)
}

async fn fake_search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
    let expected = [
        ("format", "tsv"),
        (
            "fields",
            "accession,protein_name,gene_names,organism_name,length,mass,sequence",
        ),
        ("size", "3"),
        ("query", "reviewed:true AND organism_id:9606"),
    ];
    for (key, value) in expected {
        if params.get(key).map(String::as_str) != Some(value) {
            return (StatusCode::BAD_REQUEST, format!("unexpected {}", key));
        }
    }
    (StatusCode::OK, TSV_BODY.to_string())
}

#[tokio::test]
async fn test_fetch_sends_expected_parameters() {
    let url = spawn_server(Router::new().route("/uniprotkb/search", get(fake_search))).await;
    let client = UniProtClient::with_search_url(url).unwrap();

    let records = client
        .fetch_proteins("reviewed:true AND organism_id:9606", 3)
        .await
        .expect("Fetch should succeed");

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].accession.as_deref(), Some("P02768"));
    assert_eq!(records[2].sequence, None);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let router = Router::new().route(
        "/uniprotkb/search",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let url = spawn_server(router).await;
    let client = UniProtClient::with_search_url(url).unwrap();

    let err = client.fetch_proteins("anything", 10).await.unwrap_err();
    match err {
        IngestError::Api(status, body) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let client = UniProtClient::with_search_url("http://127.0.0.1:9/uniprotkb/search").unwrap();
    let err = client.fetch_proteins("anything", 1).await.unwrap_err();
    assert!(matches!(err, IngestError::Network(_)));
}

#[tokio::test]
async fn test_full_run_populates_store() {
    let url = spawn_server(Router::new().route("/uniprotkb/search", get(fake_search))).await;
    let client = UniProtClient::with_search_url(url).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let pool = db::init_database(&dir.path().join("cf.db")).await.unwrap();

    let summary = run_ingest(&pool, &client, "reviewed:true AND organism_id:9606", 3)
        .await
        .expect("Ingest should succeed");

    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.stored, 3);
    assert_eq!(summary.with_pi, 2);
    assert_eq!(summary.total_in_store, 3);
    assert!(summary.seeded_columns);

    let albumin = db::get_protein_by_accession(&pool, "P02768").await.unwrap().unwrap();
    assert_eq!(albumin.mw_kda, Some(69.367));
    assert_eq!(albumin.gene_name.as_deref(), Some("ALB"));
    assert!(albumin.pi.unwrap() < 7.0, "albumin is acidic");

    let spike = db::get_protein_by_accession(&pool, "P0DTC2").await.unwrap().unwrap();
    assert_eq!(spike.pi, None);
    assert_eq!(spike.length, Some(1273));

    // Second run: catalog already seeded, rows updated in place
    let again = run_ingest(&pool, &client, "reviewed:true AND organism_id:9606", 3)
        .await
        .unwrap();
    assert!(!again.seeded_columns);
    assert_eq!(again.total_in_store, 3);
}
