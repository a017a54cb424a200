use clap::Parser;
use quiz_bank::ClientConfig;
use quiz_bank::protocol::{DEFAULT_API_BASE, DEFAULT_QUESTION_COUNT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Root URL of the quiz API
    #[arg(long, env = "QUIZ_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Question bank to preselect
    #[arg(short, long)]
    category: Option<String>,

    /// Number of random questions (1-100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_QUESTION_COUNT)]
    count: usize,

    /// Take every question of the bank in order instead of a random sample
    #[arg(long)]
    sequential: bool,

    /// Shuffle the answer options of each question
    #[arg(short, long)]
    shuffle: bool,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            api_base: args.api_base,
            category: args.category,
            count: args.count,
            sequential: args.sequential,
            shuffle: args.shuffle,
        }
    }
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let config = ClientConfig::from(Args::parse());
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    if let Err(e) = quiz_bank::client::run(config).await {
        log::error!("client exited with error: {}", e);
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
