pub mod encode;
pub mod table;

use serde::Serialize;

use crate::{clip::DisplayClip, options::Options, pipeline::Prepared};

pub use encode::{encode_commands, EncodeCommand};
pub use table::render_table;

/// Machine-readable form of everything the tool prints, used by `--json`.
#[derive(Debug, Serialize)]
pub struct Plan<'a> {
    /// Left clip first.
    pub clips: [&'a DisplayClip; 2],
    pub options: &'a Options,
    pub commands: Vec<PlannedCommand<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PlannedCommand<'a> {
    #[serde(flatten)]
    pub command: &'a EncodeCommand,
    pub line: String,
}

impl<'a> Plan<'a> {
    pub fn new(prepared: &'a Prepared, commands: &'a [EncodeCommand]) -> Self {
        Plan {
            clips: prepared.ordered(),
            options: &prepared.options,
            commands: commands
                .iter()
                .map(|command| PlannedCommand {
                    command,
                    line: command.to_string(),
                })
                .collect(),
        }
    }
}
