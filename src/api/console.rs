use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    api::portal::{Portal, PortalEvent},
    api::render::{Node, Tone},
    database::session_store::SessionStore,
    jobs::TokioClock,
    services::FormField,
    utils::AppError,
};

const HELP: &str = "\
Commands:
  login <id> <password>          sign in as an official
  logout                         sign out
  tab <tab-id>                   institution-summary | member-lookup | add-member
  institution [name]             select an institution (no name clears)
  search [text]                  search members by full name
  add <name>=<value>; ...        capture new member data
  show                           redraw the screen
  help                           this text
  quit                           leave the portal";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Event(PortalEvent),
    Show,
    Help,
    Quit,
}

fn usage(text: &str) -> AppError {
    AppError::InvalidCommand(format!("usage: {}", text))
}

/// Maps one input line to a control event.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, AppError> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let event = match word {
        "login" => {
            let mut parts = rest.trim_start().splitn(2, char::is_whitespace);
            let id = parts
                .next()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| usage("login <id> <password>"))?;
            PortalEvent::LoginSubmitted {
                id: id.to_string(),
                pass: parts.next().unwrap_or("").to_string(),
            }
        }
        "logout" => PortalEvent::LogoutClicked,
        "tab" => {
            let tab = rest.trim();
            if tab.is_empty() {
                return Err(usage("tab <tab-id>"));
            }
            PortalEvent::TabClicked(tab.to_string())
        }
        // Names are exact keys: padding is part of the name.
        "institution" => PortalEvent::InstitutionChanged(rest.to_string()),
        "search" => PortalEvent::SearchInput(rest.to_string()),
        "add" => PortalEvent::IntakeSubmitted(parse_form(rest)),
        "show" | "" => return Ok(ConsoleCommand::Show),
        "help" => return Ok(ConsoleCommand::Help),
        "quit" | "exit" => return Ok(ConsoleCommand::Quit),
        other => return Err(AppError::InvalidCommand(format!("unknown command '{}'", other))),
    };

    Ok(ConsoleCommand::Event(event))
}

/// `name=value; name=value; loose` -> form fields; a segment without `=`
/// is an unnamed input.
pub fn parse_form(raw: &str) -> Vec<FormField> {
    raw.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => FormField::named(name.trim(), value),
            None => FormField::unnamed(segment),
        })
        .collect()
}

/// Text rendering of a node tree; hidden panels are skipped.
pub fn render_text(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Panel { hidden: true, .. } => {}
        Node::Panel { children, .. } => {
            for child in children {
                write_node(child, out);
            }
        }
        Node::Text(text) => {
            out.push_str(text);
            out.push('\n');
        }
        Node::Field { label, value } => {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        Node::Input { id, value } => {
            out.push_str(&format!("[{}] {}\n", id, value));
        }
        Node::Select { options, selected, .. } => {
            for option in options {
                let marker = if option.value == *selected { ">" } else { " " };
                out.push_str(&format!("{} {}\n", marker, option.label));
            }
        }
        Node::Tabs(tabs) => {
            let strip: Vec<String> = tabs
                .iter()
                .map(|tab| {
                    if tab.active {
                        format!("[*{}*]", tab.label)
                    } else {
                        format!("[{}]", tab.label)
                    }
                })
                .collect();
            out.push_str(&strip.join(" "));
            out.push('\n');
        }
        Node::Table { headers, rows } => write_table(headers, rows, out),
        Node::Notice { tone, text } => {
            let prefix = match tone {
                Tone::Error => "✖ ",
                Tone::Success => "✔ ",
                Tone::Muted => "",
            };
            out.push_str(&format!("{}{}\n", prefix, text));
        }
    }
}

fn write_table(headers: &[&str], rows: &[Vec<String>], out: &mut String) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    out.push_str(&line(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("|-{}-|\n", rule.join("-|-")));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
}

fn draw<S: SessionStore>(portal: &Portal<S, TokioClock>) {
    println!("\n{}", render_text(&portal.render()));
}

/// Reads commands from stdin until `quit` or end of input. Timers are
/// serviced between lines.
pub async fn run<S: SessionStore>(portal: &mut Portal<S, TokioClock>) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(portal);

    loop {
        let deadline = portal.next_deadline().map(|at| portal.clock().instant_at(at));

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        log::error!("❌ Failed to read input: {}", e);
                        break;
                    }
                };

                match parse_command(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Help) => println!("{}", HELP),
                    Ok(ConsoleCommand::Show) => draw(portal),
                    Ok(ConsoleCommand::Event(event)) => {
                        match portal.handle(event).await {
                            Ok(()) => draw(portal),
                            Err(e) => println!("⚠️  {}", e),
                        }
                    }
                    Err(e) => println!("⚠️  {}", e),
                }
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(tokio::time::Instant::now)), if deadline.is_some() => {
                if portal.run_due_tasks() > 0 {
                    draw(portal);
                }
            }
        }
    }

    log::info!("👋 Portal closed");
    Ok(())
}
