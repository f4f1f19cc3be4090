//! Homestead - Entry Point
//!
//! Interactive loop for the household assistant: type a request, review the
//! proposal, approve or reject it. Approved commands pass through the
//! token-verified queue before anything executes.

use homestead::approval::{ApprovalQueue, ApprovalSecret};
use homestead::command::{command_from_intent, generate_proposal, should_require_approval};
use homestead::core::clock::SystemClock;
use homestead::core::config::{AssistantConfig, ConfirmationStyle};
use homestead::core::error::Result;
use homestead::core::types::Entity;
use homestead::exec::{register_entity, Dispatcher, ExecutorRegistry, MemoryHandler};
use homestead::llm::{refine_with_llm, LlmClient};
use homestead::nlu::clarify::{generate_clarification, needs_clarification};
use homestead::nlu::Interpreter;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "homestead", about = "Household assistant with natural language commands")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip approval for non-destructive commands
    #[arg(long)]
    just_do_it: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "homestead=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    };
    if args.just_do_it {
        config.approval.confirmation_style = ConfirmationStyle::JustDoIt;
    }

    tracing::info!("Homestead starting...");

    let rt = Runtime::new()?;
    let clock = Arc::new(SystemClock);
    let interpreter = Interpreter::new(clock.clone());
    let mut queue = ApprovalQueue::new(
        ApprovalSecret::generate(),
        config.approval.ttl_secs,
        clock.clone(),
    );

    // register every entity's handler, then freeze the registry
    let mut registry = ExecutorRegistry::new();
    for entity in Entity::ALL {
        let handler = Arc::new(MemoryHandler::new(entity, clock.clone()));
        register_entity(&mut registry, entity, handler)?;
    }
    registry.seal();
    let dispatcher = Dispatcher::new(registry);

    let llm_client = if config.llm.enabled {
        match LlmClient::from_settings(&config.llm) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "LLM fallback disabled");
                None
            }
        }
    } else {
        None
    };

    println!("\n=== HOMESTEAD ===");
    println!("Tell me what your household needs.");
    println!();
    println!("Commands:");
    println!("  pending          - List commands awaiting approval");
    println!("  reject <id>      - Reject a pending command");
    println!("  quit / q         - Exit");
    println!("  <any text>       - A request, e.g. \"add milk to shopping\"");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "pending" {
            queue.evict_expired();
            let pending = queue.pending();
            if pending.is_empty() {
                println!("Nothing waiting for approval.");
            } else {
                for command in pending {
                    println!("  {}  {}", command.id(), command.kind());
                }
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("reject ") {
            match Uuid::parse_str(rest.trim()) {
                Ok(id) => match queue.reject(homestead::core::types::CommandId(id)) {
                    Ok(command) => println!("Rejected {}.", command.kind()),
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: reject <command-id>"),
            }
            continue;
        }

        // classify, optionally consulting the LLM on low confidence
        let mut intent = interpreter.interpret(input);
        if let Some(client) = &llm_client {
            intent = rt.block_on(refine_with_llm(client, intent, input));
        }

        if !intent.kind.is_actionable() || needs_clarification(&intent) {
            println!("{}", generate_clarification(&intent));
            continue;
        }

        let command = match command_from_intent(&intent, Some("repl".into()), clock.as_ref()) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let requires_approval = should_require_approval(&command, Some(&config.approval));
        let proposal = generate_proposal(&command, requires_approval);

        println!();
        println!("{}", proposal.summary.title);
        println!("  {}", proposal.summary.description);
        for impact in &proposal.summary.impacts {
            println!("  - {}", impact);
        }
        for risk in &proposal.risks {
            println!("  ! {}", risk);
        }

        let narration = generate_clarification(&intent);
        let id = queue.enqueue(command);

        if requires_approval {
            print!("Approve? [y/N] ");
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            if !matches!(answer.trim(), "y" | "Y" | "yes") {
                match queue.reject(id) {
                    Ok(_) => println!("Okay, discarded."),
                    Err(e) => println!("{}", e),
                }
                continue;
            }
        } else {
            println!("{}", narration);
        }

        match queue.approve(id) {
            Ok(approval) => {
                if !queue.verify(&approval.token) {
                    println!("Approval token failed verification; not executing.");
                    continue;
                }
                let result = rt.block_on(dispatcher.dispatch(&approval.command));
                if result.success {
                    println!("{}", result.message.unwrap_or_else(|| "Done.".into()));
                } else {
                    println!("That didn't work: {}", result.error.unwrap_or_default());
                }
            }
            Err(e) => {
                // the entry can expire while the prompt waits
                println!("{}", e);
            }
        }
        println!();
    }

    println!("\nGoodbye!");
    Ok(())
}
