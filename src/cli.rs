use std::fs;

use tracing::error;

use crate::catalog;
use crate::clients::ServiceClients;
use crate::config::AppConfig;
use crate::envelope::ToolEvent;
use crate::scheduler::{optimize_schedule, Objective, OptimizerConfig, Study};
use crate::server::{self, ServerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Optimize,
    Tools,
    Invoke,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("optimize") => Some(Command::Optimize),
        Some("tools") => Some(Command::Tools),
        Some("invoke") => Some(Command::Invoke),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Optimize) => handle_optimize(args),
        Some(Command::Tools) => handle_tools(),
        Some(Command::Invoke) => handle_invoke(args),
        None => {
            eprintln!("usage: vivarium <serve|optimize|tools|invoke>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let config = AppConfig::from_env();
    let state = ServerState {
        clients: ServiceClients::from_config(&config),
    };
    match server::run_server(&config.bind_addr, &state) {
        Ok(()) => 0,
        Err(err) => {
            error!("server error: {err}");
            1
        }
    }
}

fn handle_optimize(args: &[String]) -> i32 {
    let Some(path) = args.get(2).filter(|a| !a.starts_with("--")) else {
        eprintln!("usage: vivarium optimize <studies.json> [max_animals_per_day] [objective] [--csv]");
        return 2;
    };
    let as_csv = args.iter().any(|arg| arg == "--csv");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return 1;
        }
    };
    let studies: Vec<Study> = match serde_json::from_str(&raw) {
        Ok(studies) => studies,
        Err(err) => {
            eprintln!("invalid studies file {path}: {err}");
            return 1;
        }
    };

    let config = OptimizerConfig {
        max_animals_per_day: parse_u32_arg(
            args.get(3).filter(|a| !a.starts_with("--")),
            "max_animals_per_day",
            OptimizerConfig::default().max_animals_per_day,
        ),
        objective: parse_objective_arg(args.get(4).filter(|a| !a.starts_with("--"))),
        ..OptimizerConfig::default()
    };

    let result = optimize_schedule(&studies, &config);
    if as_csv {
        println!("day,animal_count,study_count,over_capacity,active_studies");
        for day in &result.daily_usage {
            println!(
                "{},{},{},{},{}",
                day.day,
                day.animal_count,
                day.study_count,
                day.over_capacity,
                day.active_studies.join(";")
            );
        }
        return 0;
    }

    match serde_json::to_string_pretty(&result) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize schedule: {err}");
            1
        }
    }
}

fn handle_tools() -> i32 {
    for tool in catalog::descriptors() {
        println!("{} - {}", tool.name, tool.description);
        for param in tool.parameters {
            let flag = if param.required { "required" } else { "optional" };
            println!("    {} ({flag}): {}", param.name, param.description);
        }
    }
    0
}

fn handle_invoke(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: vivarium invoke <event.json>");
        return 2;
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return 1;
        }
    };
    let event = match ToolEvent::parse(&raw) {
        Ok(event) => event,
        Err(err) => {
            eprintln!("invalid tool event {path}: {err}");
            return 1;
        }
    };

    let config = AppConfig::from_env();
    let clients = ServiceClients::from_config(&config);
    let response = catalog::dispatch(&event, &clients);
    println!("{}", response.to_pretty_json());
    0
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_objective_arg(raw: Option<&String>) -> Objective {
    raw.and_then(|value| value.parse::<Objective>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid objective '{value}', defaulting to balance_animals");
            }
            Objective::default()
        })
}
