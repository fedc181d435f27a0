use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use wellness_assist::agents::LlmPlanner;
use wellness_assist::config::{LlmConfig, WorkflowConfig};
use wellness_assist::llm::create_provider;
use wellness_assist::tools::CronCheckinScheduler;
use wellness_assist::workflow::{Collaborators, WorkflowOrchestrator};

fn print_help() {
    println!("Available commands:");
    println!("  'quit' / 'exit' - Exit the program");
    println!("  'clear'         - Clear the current session and start fresh");
    println!("  'status'        - Show the current workflow stage");
    println!("  'help'          - Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let llm_config = LlmConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export WELLNESS_API_KEY=sk-...");
        std::process::exit(1);
    });
    let llm = create_provider(&llm_config)?;

    let wf_config = WorkflowConfig::default();
    tracing::info!(agent = %wf_config.agent_name, "Starting workflow session");

    let planner = Arc::new(LlmPlanner::new(llm));
    let mut collab = Collaborators::with_defaults(planner);
    collab.checkin_scheduler = Arc::new(CronCheckinScheduler::new(wf_config.checkin_count));
    let mut workflow = WorkflowOrchestrator::new(collab);

    println!("Welcome to the Health & Wellness Planner!");
    println!("Commands: 'quit' to exit, 'clear' to reset, 'help' for help, 'status' to check the workflow stage");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    eprint!("You: ");
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        // Empty input never reaches the workflow.
        if input.is_empty() {
            eprint!("You: ");
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" => {
                println!("Goodbye!");
                break;
            }
            "clear" => {
                workflow.reset();
                println!("Session cleared. Starting fresh!");
                eprint!("You: ");
                continue;
            }
            "status" => {
                println!("Current workflow stage: {}", workflow.current_stage());
                eprint!("You: ");
                continue;
            }
            "help" => {
                print_help();
                eprint!("You: ");
                continue;
            }
            _ => {}
        }

        let envelope = workflow.process_input(input).await;

        println!("\nAssistant:");
        println!("{}", envelope.response.render());
        if let Some(error) = &envelope.error {
            eprintln!("(turn failed: {} — you can just try again)", error.message);
        }
        if !envelope.next_actions.is_empty() {
            println!("\nSuggested: {}", envelope.next_actions.join(" | "));
        }
        println!("\n[Current Stage: {}]", envelope.stage);
        eprint!("You: ");
    }

    Ok(())
}
