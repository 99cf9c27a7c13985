//! `starpulse interactive`: a line REPL over one search controller.
//!
//! Plain lines are treated as typed query text (and trigger suggestions);
//! colon commands map onto controller intents. A background task follows the
//! controller's snapshots and prints whatever changed.

use anyhow::Result;
use console::style;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::debug;

use crate::cli::context::AppContext;
use crate::cli::display::{render_history, render_profile, render_section, render_suggestions};
use crate::cli::progress::SearchProgress;
use crate::domain::models::DetailSection;
use crate::services::{recommend, ControllerSnapshot, SearchController, RECOMMENDATION_COUNT};

const HELP: &str = "\
Commands:
  <text>            type query text (suggestions after a pause)
  :q TEXT           same as typing TEXT
  :s [NAME]         search NAME, or the current query
  :pick N           search suggestion N
  :rec [N]          list quick picks, or search quick pick N
  :h [N]            list history, or show history entry N
  :c                cancel the running search
  :d                dismiss the error
  :open SECTION     open a detail section of the shown profile
  :close            close the detail section
  :hide / :show     hide or show suggestions
  :help             this text
  :quit             leave";

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Query(String),
    Search(Option<String>),
    Pick(usize),
    Recommend(Option<usize>),
    History(Option<usize>),
    Cancel,
    Dismiss,
    Open(DetailSection),
    Close,
    Hide,
    Show,
    Help,
    Quit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Query(line.to_string()));
        };

        let (verb, arg) = match command.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (command, ""),
        };
        let arg = (!arg.is_empty()).then_some(arg);

        match (verb, arg) {
            ("q", text) => Ok(Self::Query(text.unwrap_or_default().to_string())),
            ("s", name) => Ok(Self::Search(name.map(str::to_string))),
            ("pick", Some(n)) => parse_ordinal(n).map(Self::Pick),
            ("pick", None) => Err("usage: :pick N".to_string()),
            ("rec", None) => Ok(Self::Recommend(None)),
            ("rec", Some(n)) => parse_ordinal(n).map(|n| Self::Recommend(Some(n))),
            ("h", None) => Ok(Self::History(None)),
            ("h", Some(n)) => parse_ordinal(n).map(|n| Self::History(Some(n))),
            ("c", None) => Ok(Self::Cancel),
            ("d", None) => Ok(Self::Dismiss),
            ("open", Some(section)) => section.parse().map(Self::Open),
            ("open", None) => Err("usage: :open SECTION".to_string()),
            ("close", None) => Ok(Self::Close),
            ("hide", None) => Ok(Self::Hide),
            ("show", None) => Ok(Self::Show),
            ("help", _) => Ok(Self::Help),
            ("quit", _) => Ok(Self::Quit),
            _ => Err(format!("unknown command '{line}', try :help")),
        }
    }
}

/// 1-based position to 0-based index.
fn parse_ordinal(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number starting at 1, got '{text}'")),
    }
}

pub async fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    let controller = ctx.controller().await?;
    let renderer = tokio::spawn(render_updates(controller.subscribe(), json_mode));

    let picks = recommend(&mut rand::thread_rng(), RECOMMENDATION_COUNT);
    if !json_mode {
        println!("{}", style("StarPulse fame index. Type a name, or :help.").bold());
        println!("Quick picks (:rec N):\n{}", render_suggestions(&picks));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ReplCommand>() {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => {
                if let Err(message) = apply(&controller, &picks, command) {
                    eprintln!("{} {message}", style("!").yellow().bold());
                }
            }
            Err(message) => eprintln!("{} {message}", style("!").yellow().bold()),
        }
    }

    controller.close().await;
    drop(controller);
    renderer.abort();
    Ok(())
}

/// Route a command to the matching controller intent.
///
/// `picks` are the session's quick picks addressed by `:rec`.
pub fn apply(
    controller: &SearchController,
    picks: &[String],
    command: ReplCommand,
) -> Result<(), String> {
    debug!(?command, "REPL command");
    match command {
        ReplCommand::Query(text) => controller.update_query(&text),
        ReplCommand::Search(name) => {
            let name = name.unwrap_or_else(|| controller.snapshot().query);
            controller.submit_search(&name).map_err(|e| e.to_string())?;
        }
        ReplCommand::Pick(index) => {
            controller.pick_suggestion(index).map_err(|e| e.to_string())?;
        }
        ReplCommand::Recommend(None) => println!("{}", render_suggestions(picks)),
        ReplCommand::Recommend(Some(index)) => {
            let name = picks
                .get(index)
                .ok_or_else(|| format!("no quick pick {}, there are {}", index + 1, picks.len()))?;
            controller.submit_search(name).map_err(|e| e.to_string())?;
        }
        ReplCommand::History(None) => println!("{}", render_history(&controller.snapshot().history)),
        ReplCommand::History(Some(index)) => {
            controller.select_history_index(index).map_err(|e| e.to_string())?;
        }
        ReplCommand::Cancel => controller.cancel_search(),
        ReplCommand::Dismiss => controller.dismiss_error(),
        ReplCommand::Open(section) => {
            if controller.snapshot().result.is_none() {
                return Err("no profile shown".to_string());
            }
            controller.open_detail(section);
        }
        ReplCommand::Close => controller.close_detail(),
        ReplCommand::Hide => controller.hide_suggestions(),
        ReplCommand::Show => controller.show_suggestions(),
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }
    Ok(())
}

async fn render_updates(mut updates: watch::Receiver<ControllerSnapshot>, json_mode: bool) {
    let mut previous = updates.borrow_and_update().clone();
    let mut bar: Option<SearchProgress> = None;

    while updates.changed().await.is_ok() {
        let next = updates.borrow_and_update().clone();

        if json_mode {
            if let Ok(line) = serde_json::to_string(&next) {
                println!("{line}");
            }
        } else {
            if next.is_loading() {
                let bar = bar.get_or_insert_with(|| SearchProgress::new(&next.query));
                bar.update(&next.loading);
            } else if let Some(finished) = bar.take() {
                finished.finish();
            }
            for message in describe_changes(&previous, &next) {
                println!("{message}");
            }
        }

        previous = next;
    }
}

/// Human-readable messages for what changed between two snapshots.
pub fn describe_changes(previous: &ControllerSnapshot, next: &ControllerSnapshot) -> Vec<String> {
    let mut messages = Vec::new();

    let new_search = next.token != previous.token && next.is_loading();
    if new_search && previous.is_loading() {
        messages.push(style("Previous search superseded.").dim().to_string());
    }
    if next.token != previous.token && !next.is_loading() && previous.is_loading() {
        messages.push("Search cancelled.".to_string());
    }

    if next.suggestions_visible
        && (next.suggestions != previous.suggestions || !previous.suggestions_visible)
    {
        messages.push(render_suggestions(&next.suggestions));
    }

    if let Some(error) = next.error.as_ref().filter(|_| previous.error != next.error) {
        messages.push(format!("{} {error}", style("Error:").red().bold()));
    }

    if let Some(result) = &next.result {
        let changed = previous
            .result
            .as_ref()
            .is_none_or(|before| !Arc::ptr_eq(before, result));
        if changed {
            messages.push(render_profile(result));
        }
        if next.detail != previous.detail {
            if let Some(section) = next.detail {
                messages.push(render_section(result, section, &next.history));
            }
        }
    }

    messages
}
