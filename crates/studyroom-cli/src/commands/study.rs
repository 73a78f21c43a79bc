use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use studyroom_core::study::normalize_bullets;
use studyroom_core::{
    load_document, Config, GeminiClient, GenerationRequest, GenerationResult, LoadedDocument,
    StudyContentPipeline, StudyError,
};

#[derive(Args)]
pub struct StudyArgs {
    /// Document to study (.txt, .md or .docx)
    pub file: PathBuf,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StudyOutput<'a> {
    document: &'a str,
    #[serde(flatten)]
    result: &'a GenerationResult,
}

struct Session {
    config: Config,
    document: LoadedDocument,
    pipeline: StudyContentPipeline,
}

fn open(args: &StudyArgs) -> studyroom_core::error::Result<Session> {
    let config = Config::load()?;
    let document = load_document(&args.file)?;
    let client = GeminiClient::new(config.gemini_settings()).map_err(StudyError::Service)?;
    Ok(Session {
        config,
        document,
        pipeline: StudyContentPipeline::new(Arc::new(client)),
    })
}

pub async fn quiz(args: StudyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;
    let request = GenerationRequest::quiz(session.document.contents.as_str());
    generate_and_print(&session, &request, args.json).await
}

pub async fn flashcards(
    args: StudyArgs,
    count: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;
    let count = count.unwrap_or(session.config.generation.flashcard_count);
    let request = GenerationRequest::flashcards(session.document.contents.as_str(), count);
    generate_and_print(&session, &request, args.json).await
}

pub async fn topics(args: StudyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;
    let request = GenerationRequest::topics(session.document.contents.as_str());
    generate_and_print(&session, &request, args.json).await
}

async fn generate_and_print(
    session: &Session,
    request: &GenerationRequest,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = session.pipeline.generate(request).await?;

    if json {
        let output = StudyOutput {
            document: &session.document.name,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("# {}", session.document.name);
    println!();
    match &result {
        GenerationResult::Quiz(quiz) => {
            for (i, pair) in quiz.questions.iter().enumerate() {
                println!("Q{}. {}", i + 1, pair.question);
                println!("    A: {}", pair.answer);
            }
        }
        GenerationResult::Flashcards(deck) => {
            for (i, card) in deck.cards.iter().enumerate() {
                println!("[{}/{}] {}", i + 1, deck.cards.len(), card.question);
                println!("        {}", card.answer);
            }
            if deck.is_short() {
                eprintln!(
                    "note: received {} of {} requested cards",
                    deck.cards.len(),
                    deck.target
                );
            }
        }
        GenerationResult::Topics { summary } => {
            println!("{}", normalize_bullets(summary.as_str()));
        }
    }
    Ok(())
}
