//! Integration tests for the study content pipeline.
//!
//! A scripted generation service stands in for the remote model so each
//! test can assert both the shaped result and how often the service was hit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studyroom_core::{
    GenerationRequest, GenerationResult, ServiceError, StudyContentPipeline, StudyError,
    TextGenerationService,
};

struct ScriptedService {
    reply: Result<String, ServiceError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(error: ServiceError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerationService for ScriptedService {
    async fn call(&self, prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

fn pipeline(service: &Arc<ScriptedService>) -> StudyContentPipeline {
    StudyContentPipeline::new(service.clone())
}

const CELL_NOTES: &str = "Cells are the basic unit of life. Mitochondria produce ATP.";

#[tokio::test]
async fn quiz_parses_tab_separated_pairs() {
    let service = ScriptedService::replying(
        "What is the basic unit of life?\tThe cell\nWhat produces ATP?\tMitochondria",
    );
    let quiz = pipeline(&service).generate_quiz(CELL_NOTES).await.unwrap();

    assert_eq!(quiz.questions.len(), 2);
    assert_eq!(quiz.questions[0].question, "What is the basic unit of life?");
    assert_eq!(quiz.questions[0].answer, "The cell");
    assert_eq!(quiz.questions[1].answer, "Mitochondria");
    assert_eq!(service.calls(), 1);
    assert!(service.last_prompt().ends_with(CELL_NOTES));
}

#[tokio::test]
async fn quiz_is_truncated_to_five_questions() {
    let reply: String = (1..=8).map(|i| format!("Q{i}\tA{i}\n")).collect();
    let service = ScriptedService::replying(&reply);
    let quiz = pipeline(&service).generate_quiz(CELL_NOTES).await.unwrap();

    assert_eq!(quiz.questions.len(), 5);
    assert_eq!(quiz.questions[4].question, "Q5");
}

#[tokio::test]
async fn flashcards_keep_order_and_report_short_decks() {
    let service = ScriptedService::replying("Cell\tBasic unit of life\nATP\tEnergy currency\n");
    let deck = pipeline(&service)
        .generate_flashcards(CELL_NOTES, 15)
        .await
        .unwrap();

    assert_eq!(deck.cards.len(), 2);
    assert_eq!(deck.cards[0].question, "Cell");
    assert_eq!(deck.cards[1].answer, "Energy currency");
    assert_eq!(deck.target, 15);
    assert!(deck.is_short());
    assert!(service.last_prompt().contains("exactly 15"));
}

#[tokio::test]
async fn flashcards_are_capped_at_the_requested_count() {
    let reply: String = (1..=6).map(|i| format!("Term {i}\tDefinition {i}\n")).collect();
    let service = ScriptedService::replying(&reply);
    let deck = pipeline(&service)
        .generate_flashcards(CELL_NOTES, 4)
        .await
        .unwrap();

    assert_eq!(deck.cards.len(), 4);
    assert!(!deck.is_short());
}

#[tokio::test]
async fn zero_flashcards_is_rejected_without_calling_the_service() {
    let service = ScriptedService::replying("unused");
    let err = pipeline(&service)
        .generate_flashcards(CELL_NOTES, 0)
        .await
        .unwrap_err();

    assert!(matches!(err, StudyError::InvalidRequest(_)));
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn topics_pass_through_trimmed() {
    let service = ScriptedService::replying("\n* Cells\n* Mitochondria\n\n");
    let summary = pipeline(&service).extract_topics(CELL_NOTES).await.unwrap();

    assert_eq!(summary.as_str(), "* Cells\n* Mitochondria");
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn empty_input_never_reaches_the_service() {
    let service = ScriptedService::replying("Q\tA");
    let pipeline = pipeline(&service);

    for text in ["", "   \n\t  "] {
        assert!(matches!(
            pipeline.generate_quiz(text).await,
            Err(StudyError::EmptyInput)
        ));
        assert!(matches!(
            pipeline.generate_flashcards(text, 15).await,
            Err(StudyError::EmptyInput)
        ));
        assert!(matches!(
            pipeline.extract_topics(text).await,
            Err(StudyError::EmptyInput)
        ));
    }
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn reply_without_records_is_a_parse_error() {
    let service = ScriptedService::replying("Here are some questions about cells!");
    let err = pipeline(&service).generate_quiz(CELL_NOTES).await.unwrap_err();

    assert!(matches!(err, StudyError::Parse { kind: "quiz" }));
}

#[tokio::test]
async fn service_failures_are_propagated() {
    let service = ScriptedService::failing(ServiceError::Status {
        status: 503,
        body: "overloaded".into(),
    });
    let err = pipeline(&service).extract_topics(CELL_NOTES).await.unwrap_err();

    assert!(matches!(
        err,
        StudyError::Service(ServiceError::Status { status: 503, .. })
    ));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn generate_dispatches_on_request_kind() {
    let service = ScriptedService::replying("Q\tA");
    let pipeline = pipeline(&service);

    let quiz = pipeline.generate(&GenerationRequest::quiz(CELL_NOTES)).await.unwrap();
    assert!(matches!(quiz, GenerationResult::Quiz(ref q) if q.questions.len() == 1));

    let deck = pipeline
        .generate(&GenerationRequest::flashcards(CELL_NOTES, 3))
        .await
        .unwrap();
    assert!(matches!(deck, GenerationResult::Flashcards(ref d) if d.target == 3));

    let topics = pipeline.generate(&GenerationRequest::topics(CELL_NOTES)).await.unwrap();
    assert!(matches!(topics, GenerationResult::Topics { .. }));

    assert_eq!(service.calls(), 3);
}

#[tokio::test]
async fn overlapping_requests_each_call_once() {
    let service = ScriptedService::replying("Q\tA");
    let pipeline = Arc::new(pipeline(&service));

    let a = tokio::spawn({
        let pipeline = Arc::clone(&pipeline);
        async move { pipeline.generate_quiz(CELL_NOTES).await }
    });
    let b = tokio::spawn({
        let pipeline = Arc::clone(&pipeline);
        async move { pipeline.extract_topics(CELL_NOTES).await }
    });

    assert!(a.await.unwrap().is_ok());
    assert!(b.await.unwrap().is_ok());
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn records_with_an_empty_side_still_count() {
    let service = ScriptedService::replying("Q1\t\n\tA2");
    let quiz = pipeline(&service).generate_quiz(CELL_NOTES).await.unwrap();

    assert_eq!(quiz.questions.len(), 2);
    assert_eq!(quiz.questions[0].question, "Q1");
    assert_eq!(quiz.questions[0].answer, "");
    assert_eq!(quiz.questions[1].question, "");
    assert_eq!(quiz.questions[1].answer, "A2");
}
