//! Interactive `dashboard` session: one command per input line.

use std::io::{self, BufRead, Write};

use legisight_core::SearchField;
use legisight_dashboard::{Dashboard, MattersApi, ViewState};

use crate::display;

const PROMPT: &str = "legisight> ";

pub const HELP: &str = "\
Commands:
  search <field> <query>   law, file, title, name, summary, or committee
  clear                    drop the search and show recent matters
  history <matter-id>      show a matter's history
  back                     leave the history view
  watch <matter-id>        add a matter to the watchlist
  unwatch <matter-id>      remove a matter from the watchlist
  watchlist                show the watchlist
  help                     show this help
  quit                     leave the dashboard";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Search { field: SearchField, query: String },
    Clear,
    History(i64),
    Back,
    Watch(i64),
    Unwatch(i64),
    Watchlist,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let input = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "search" => {
            let (field, query) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = field.parse::<SearchField>().map_err(|e| e.to_string())?;
            Input::Search {
                field,
                query: query.trim().to_string(),
            }
        }
        "clear" => Input::Clear,
        "history" => Input::History(matter_id(rest)?),
        "back" => Input::Back,
        "watch" => Input::Watch(matter_id(rest)?),
        "unwatch" => Input::Unwatch(matter_id(rest)?),
        "watchlist" => Input::Watchlist,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command {other:?} (try `help`)")),
    };
    Ok(Some(input))
}

fn matter_id(arg: &str) -> Result<i64, String> {
    arg.parse()
        .map_err(|_| format!("expected a matter id, got {arg:?}"))
}

/// Load recent matters, then run commands from `input` until `quit` or EOF.
pub async fn run<A: MattersApi>(
    dash: &mut Dashboard<A>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    dash.load().await;
    display::write_view(out, dash.view(), dash.recent())?;
    writeln!(out)?;
    display::write_watchlist(out, dash.watchlist())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        let command = match parse_input(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        if command == Input::Quit {
            break;
        }
        apply(dash, command, out).await?;
    }
    Ok(())
}

async fn apply<A: MattersApi>(
    dash: &mut Dashboard<A>,
    command: Input,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Input::Search { field, query } => {
            if query.is_empty() {
                dash.clear_search();
            } else {
                dash.search(field, &query).await;
            }
        }
        Input::Clear => dash.clear_search(),
        Input::History(matter_id) => {
            let label = dash
                .visible_matters()
                .iter()
                .find(|m| m.id == matter_id)
                .map_or_else(|| format!("#{matter_id}"), |m| m.display_file());
            dash.open_history(matter_id, label).await;
        }
        Input::Back => {
            if !matches!(dash.view(), ViewState::ViewingHistory { .. }) {
                writeln!(out, "Not viewing a history")?;
                return Ok(());
            }
            dash.close_history();
        }
        Input::Watch(matter_id) => {
            let visible = dash
                .visible_matters()
                .iter()
                .find(|m| m.id == matter_id)
                .cloned();
            let added = match visible {
                Some(matter) => Some(dash.watch(matter)?),
                None => dash.watch_by_id(matter_id).await?,
            };
            return Ok(write_watch_outcome(out, matter_id, added)?);
        }
        Input::Unwatch(matter_id) => {
            match dash.unwatch(matter_id)? {
                Some(matter) => {
                    writeln!(out, "Removed {} from the watchlist", matter.display_file())?
                }
                None => writeln!(out, "Matter {matter_id} is not on the watchlist")?,
            }
            return Ok(());
        }
        Input::Watchlist => {
            display::write_watchlist(out, dash.watchlist())?;
            return Ok(());
        }
        Input::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
        Input::Quit => return Ok(()),
    }

    display::write_view(out, dash.view(), dash.recent())?;
    Ok(())
}

pub fn write_watch_outcome(
    out: &mut impl Write,
    matter_id: i64,
    added: Option<bool>,
) -> io::Result<()> {
    match added {
        Some(true) => writeln!(out, "Added matter {matter_id} to the watchlist"),
        Some(false) => writeln!(out, "Matter {matter_id} is already on the watchlist"),
        None => writeln!(out, "{} for id {matter_id}", display::NO_MATTERS),
    }
}
