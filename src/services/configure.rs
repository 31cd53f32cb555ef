//! Interactive channel selection
//!
//! Walks the channel catalogue and asks, for each channel, whether its
//! listings should be grabbed. Answers are read line by line; prompts and
//! echoes go to a separate writer (stderr in the binary).

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::ChannelSelection;
use crate::errors::AppResult;
use crate::models::ChannelCatalogue;

const ANSWERS: &str = "yes,no,all,none";

/// A single answer to the selection prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAnswer {
    Yes,
    No,
    All,
    None,
}

impl SelectionAnswer {
    /// Parse a trimmed answer; the empty answer is the default `no`
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "yes" => Some(Self::Yes),
            "no" | "" => Some(Self::No),
            "all" => Some(Self::All),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Prompt for every channel of the catalogue and return the selection
///
/// `all` and `none` apply to the current channel and every remaining one.
/// End of input behaves like `none`.
pub fn prompt_channel_selection<R, W>(
    catalogue: &ChannelCatalogue,
    mut input: R,
    mut prompts: W,
) -> AppResult<ChannelSelection>
where
    R: BufRead,
    W: Write,
{
    writeln!(prompts, "Select the channels that you want to receive data for.")?;

    let mut selected = Vec::new();
    let mut remaining: Option<SelectionAnswer> = None;

    for channel in catalogue.iter() {
        let answer = match remaining {
            Some(answer) => answer,
            None => {
                let answer = ask(&channel.display_name, &mut input, &mut prompts)?;
                if matches!(answer, SelectionAnswer::All | SelectionAnswer::None) {
                    remaining = Some(answer);
                }
                answer
            }
        };

        match remaining {
            Some(SelectionAnswer::All) => writeln!(prompts, "{} yes", channel.display_name)?,
            Some(_) => writeln!(prompts, "{} no", channel.display_name)?,
            None => {}
        }

        if matches!(answer, SelectionAnswer::Yes | SelectionAnswer::All) {
            selected.push(channel.id.clone());
        }
    }

    prompts.flush()?;
    debug!("Selected {} of {} channels", selected.len(), catalogue.len());
    Ok(ChannelSelection::new(selected))
}

fn ask<R: BufRead, W: Write>(
    display_name: &str,
    input: &mut R,
    prompts: &mut W,
) -> AppResult<SelectionAnswer> {
    loop {
        write!(prompts, "{display_name} [{ANSWERS} (default=no)] ")?;
        prompts.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(prompts)?;
            return Ok(SelectionAnswer::None);
        }

        match SelectionAnswer::parse(line.trim()) {
            Some(answer) => return Ok(answer),
            None => writeln!(prompts, "invalid response, please choose one of {ANSWERS}")?,
        }
    }
}
