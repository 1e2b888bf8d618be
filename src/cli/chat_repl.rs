use agentloop_core::cli::Cli;
use agentloop_core::llm::create_provider_with_config;
use agentloop_core::{Agent, AgentOptions, AgentloopConfig};
use anyhow::Result;
use console::style;
use std::io::{self, Write};

const SLASH_HELP: &str = "  /skills   list loaded skills
  /memory   dump long-term memory
  /clear    wipe short-term conversation history
  /help     this message
  quit      exit";

/// One line of REPL input, classified
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Empty,
    Quit,
    Slash(String),
    Message(&'a str),
}

fn classify(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    if matches!(line.to_lowercase().as_str(), "quit" | "exit" | "q") {
        return ReplInput::Quit;
    }
    if line.starts_with('/') {
        let command = line.split_whitespace().next().unwrap_or(line);
        return ReplInput::Slash(command.to_lowercase());
    }
    ReplInput::Message(line)
}

/// Local commands answered without a model call
fn run_slash_command(agent: &mut Agent, command: &str) -> String {
    match command {
        "/help" => SLASH_HELP.to_string(),
        "/skills" => {
            let names = agent.skills_mut().list_names();
            if names.is_empty() {
                "skills: (none)".to_string()
            } else {
                format!("skills: {}", names.join(", "))
            }
        }
        "/memory" => {
            let store = agent.memory().long_term();
            if store.is_empty() {
                return "(empty)".to_string();
            }
            store
                .iter()
                .map(|(key, value)| format!("  {key} = {value}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        "/clear" => {
            agent.memory_mut().clear();
            "short-term memory cleared.".to_string()
        }
        other => format!("unknown command: {other}  (try /help)"),
    }
}

fn print_banner(agent: &mut Agent, config: &AgentloopConfig) {
    let skills: Vec<String> = agent
        .skills_mut()
        .discover()
        .into_iter()
        .map(|skill| skill.name.clone())
        .collect();
    let skills = if skills.is_empty() {
        "(none)".to_string()
    } else {
        skills.join(", ")
    };

    println!("{}", style("agentloop ready").cyan().bold());
    println!(
        "  model:     {}  ({})",
        config.llm.model, config.llm.base_url
    );
    println!("  workspace: {}", agent.runner().workspace().display());
    println!("  skills:    {skills}");
    println!(
        "  memory:    {} long-term key(s)",
        agent.memory().keys().len()
    );
    println!(
        "  {}\n",
        style("type /help for local commands, or just start chatting.").dim()
    );
}

/// Interactive chat loop over stdin
pub async fn handle_chat_command(args: &Cli, config: AgentloopConfig) -> Result<()> {
    let provider = create_provider_with_config(&config.llm, args.api_key_sources(&config));
    let mut agent = Agent::new(provider, AgentOptions::from_config(&config))?;
    print_banner(&mut agent, &config);

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!("\nbye.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("{} {e}", style("[error]").red());
                break;
            }
        }

        match classify(&input) {
            ReplInput::Empty => continue,
            ReplInput::Quit => {
                println!("bye.");
                break;
            }
            ReplInput::Slash(command) => {
                println!("{}", run_slash_command(&mut agent, &command));
            }
            ReplInput::Message(message) => match agent.chat(message).await {
                Ok(reply) => println!("\n{reply}\n"),
                Err(e) => eprintln!("\n{} {e:#}\n", style("[error]").red()),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentloop_core::llm::provider::{
        FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, MessageRole,
    };
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct Silent;

    #[async_trait]
    impl LLMProvider for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn model(&self) -> &str {
            "silent-1"
        }

        async fn generate(&self, _request: LLMRequest) -> Result<LLMResponse, LLMError> {
            Ok(LLMResponse {
                content: Some(String::new()),
                usage: None,
                finish_reason: FinishReason::Stop,
            })
        }
    }

    fn agent_in(temp: &TempDir) -> Agent {
        let mut options = AgentOptions::new(temp.path().join("ws"));
        options.skill_paths = vec![temp.path().join("skills")];
        Agent::new(Box::new(Silent), options).unwrap()
    }

    #[test]
    fn classifies_input_lines() {
        assert_eq!(classify("   \n"), ReplInput::Empty);
        assert_eq!(classify("EXIT\n"), ReplInput::Quit);
        assert_eq!(classify("q"), ReplInput::Quit);
        assert_eq!(
            classify("/Skills extra words"),
            ReplInput::Slash("/skills".to_string())
        );
        assert_eq!(classify("  hello \n"), ReplInput::Message("hello"));
    }

    #[test]
    fn memory_command_dumps_store() {
        let temp = TempDir::new().unwrap();
        let mut agent = agent_in(&temp);
        assert_eq!(run_slash_command(&mut agent, "/memory"), "(empty)");

        agent.memory_mut().set("user", "Ada").unwrap();
        agent.memory_mut().set("n", 2i64).unwrap();
        assert_eq!(
            run_slash_command(&mut agent, "/memory"),
            "  user = Ada\n  n = 2"
        );
    }

    #[test]
    fn clear_command_keeps_long_term_store() {
        let temp = TempDir::new().unwrap();
        let mut agent = agent_in(&temp);
        agent.memory_mut().add_message(MessageRole::User, "hi");
        agent.memory_mut().set("k", "v").unwrap();

        run_slash_command(&mut agent, "/clear");
        assert!(agent.memory().messages().is_empty());
        assert_eq!(agent.memory().keys(), vec!["k"]);
    }

    #[test]
    fn skills_command_lists_sorted_names() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta", "alpha"] {
            let dir = temp.path().join("skills").join(name);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("SKILL.md"), "body").unwrap();
        }
        let mut agent = agent_in(&temp);
        assert_eq!(
            run_slash_command(&mut agent, "/skills"),
            "skills: alpha, zeta"
        );
        assert!(run_slash_command(&mut agent, "/nope").starts_with("unknown command: /nope"));
    }
}
