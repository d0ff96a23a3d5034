//! End-to-end pipeline tests over the embedded vector store, using the
//! deterministic hash embedder and scripted completion providers.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use ai_llm_service::normalize::CompletionOutcome;
use rag_store::{
    AnswerResult, CompletionProvider, HashEmbedder, RagConfig, RagError, RagPipeline,
};
use vector_store::VectorDb;

/// Completion provider that returns a fixed answer and records nothing.
struct CannedCompletion(&'static str);

impl CompletionProvider for CannedCompletion {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = CompletionOutcome> + Send + 'a>> {
        Box::pin(async move { CompletionOutcome::Text(self.0.to_string()) })
    }
}

/// Completion provider that always degrades, as a down endpoint would.
struct DownCompletion;

impl CompletionProvider for DownCompletion {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = CompletionOutcome> + Send + 'a>> {
        Box::pin(async move {
            CompletionOutcome::Degraded("[completion error] connection refused".to_string())
        })
    }
}

/// Completion provider that echoes the prompt it received, for asserting
/// prompt assembly end to end.
struct EchoCompletion;

impl CompletionProvider for EchoCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = CompletionOutcome> + Send + 'a>> {
        let prompt = prompt.to_string();
        Box::pin(async move { CompletionOutcome::Text(prompt) })
    }
}

const POLICY_DOC: &str = "Vacation policy: 20 days per year.\n\nSick leave: 10 days per year.";

fn policy_config() -> RagConfig {
    RagConfig {
        chunk_size: 40,
        chunk_overlap: 10,
        ..RagConfig::default()
    }
}

fn pipeline(completion: Arc<dyn CompletionProvider>, cfg: RagConfig) -> RagPipeline {
    RagPipeline::new(
        Arc::new(HashEmbedder::default()),
        completion,
        VectorDb::new(),
        cfg,
    )
    .unwrap()
}

#[tokio::test]
async fn ingest_then_ask_retrieves_the_vacation_chunk() {
    let p = pipeline(Arc::new(CannedCompletion("20 days.")), policy_config());

    let collection = p.ingest(POLICY_DOC, "policies").await.unwrap();
    assert_eq!(collection, "policies");
    assert_eq!(p.index().len("policies").unwrap(), 2);

    let result: AnswerResult = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();

    assert!(!result.answer.is_empty());
    assert_eq!(result.retrieved.len(), 2);
    assert!(result.retrieved[0].payload.text.contains("Vacation policy"));
    // Rank order: best score first.
    assert!(result.retrieved[0].score >= result.retrieved[1].score);
}

#[tokio::test]
async fn ingest_is_idempotent() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());

    p.ingest(POLICY_DOC, "policies").await.unwrap();
    let first = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();

    p.ingest(POLICY_DOC, "policies").await.unwrap();
    let second = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();

    let flat = |r: &AnswerResult| -> Vec<(String, f32)> {
        r.retrieved
            .iter()
            .map(|h| (h.payload.text.clone(), h.score))
            .collect()
    };
    assert_eq!(flat(&first), flat(&second));
}

#[tokio::test]
async fn reingest_replaces_the_collection_wholesale() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());

    p.ingest(POLICY_DOC, "policies").await.unwrap();
    p.ingest("Remote work: allowed two days per week.", "policies")
        .await
        .unwrap();

    assert_eq!(p.index().len("policies").unwrap(), 1);
    let result = p.ask("remote work?", "policies", None).await.unwrap();
    assert!(result.retrieved[0].payload.text.contains("Remote work"));
}

#[tokio::test]
async fn empty_document_is_rejected() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());

    let err = p.ingest("", "policies").await.unwrap_err();
    assert!(matches!(err, RagError::NoChunks));
    let err = p.ingest(" \n\t ", "policies").await.unwrap_err();
    assert!(matches!(err, RagError::NoChunks));
}

#[tokio::test]
async fn asking_an_unbuilt_collection_is_not_found() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());

    let err = p.ask("anything", "never-built", None).await.unwrap_err();
    assert!(matches!(
        err,
        RagError::Index(vector_store::Error::CollectionNotFound(name)) if name == "never-built"
    ));
}

#[tokio::test]
async fn completion_failure_degrades_while_retrieval_failure_raises() {
    // Generation down: ask still succeeds, with the diagnostic as answer.
    let p = pipeline(Arc::new(DownCompletion), policy_config());
    p.ingest(POLICY_DOC, "policies").await.unwrap();

    let result = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();
    assert!(result.answer.contains("[completion error]"));
    assert_eq!(result.retrieved.len(), 2);

    // Retrieval down (unknown collection): ask fails.
    assert!(p.ask("anything", "missing", None).await.is_err());
}

#[tokio::test]
async fn prompt_contains_context_blocks_and_question() {
    let p = pipeline(Arc::new(EchoCompletion), policy_config());
    p.ingest(POLICY_DOC, "policies").await.unwrap();

    let result = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();

    // The echoed prompt shows what the completion endpoint received.
    assert!(result.answer.contains("Use ONLY the provided context"));
    assert!(result.answer.contains("Vacation policy"));
    assert!(result.answer.contains("[chars "));
    assert!(result.answer.contains("QUESTION:\nHow many vacation days?"));
}

#[tokio::test]
async fn top_k_caps_retrieved_hits() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());
    p.ingest(POLICY_DOC, "policies").await.unwrap();

    let result = p
        .ask("vacation", "policies", Some(1))
        .await
        .unwrap();
    assert_eq!(result.retrieved.len(), 1);

    // Requesting more hits than entries truncates to the entry count.
    let result = p
        .ask("vacation", "policies", Some(50))
        .await
        .unwrap();
    assert_eq!(result.retrieved.len(), 2);
}

#[tokio::test]
async fn collections_serve_independent_tenants() {
    let p = pipeline(Arc::new(CannedCompletion("ok")), policy_config());

    p.ingest(POLICY_DOC, "tenant-a").await.unwrap();
    p.ingest("Parental leave: 16 weeks fully paid.", "tenant-b")
        .await
        .unwrap();

    let a = p.ask("vacation days", "tenant-a", None).await.unwrap();
    let b = p.ask("parental leave", "tenant-b", None).await.unwrap();
    assert!(a.retrieved[0].payload.text.contains("Vacation"));
    assert!(b.retrieved[0].payload.text.contains("Parental leave"));
}

#[tokio::test]
async fn answer_result_serializes_for_the_transport_layer() {
    let p = pipeline(Arc::new(CannedCompletion("20 days.")), policy_config());
    p.ingest(POLICY_DOC, "policies").await.unwrap();

    let result = p
        .ask("How many vacation days?", "policies", None)
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["answer"], "20 days.");
    assert!(json["retrieved"][0]["score"].is_number());
    assert!(
        json["retrieved"][0]["payload"]["metadata"]["start_char"].is_number()
    );
}
