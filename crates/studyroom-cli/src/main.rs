use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "studyroom-cli", version, about = "Studyroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a short quiz from a document
    Quiz(commands::study::StudyArgs),
    /// Generate a flashcard deck from a document
    Flashcards {
        #[command(flatten)]
        args: commands::study::StudyArgs,
        /// Number of cards to ask for (defaults to generation.flashcard_count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Summarize the key topics of a document
    Topics(commands::study::StudyArgs),
    /// Pomodoro session timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STUDYROOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quiz(args) => commands::study::quiz(args).await,
        Commands::Flashcards { args, count } => commands::study::flashcards(args, count).await,
        Commands::Topics(args) => commands::study::topics(args).await,
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "studyroom-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
