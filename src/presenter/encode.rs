// Builds the encoder invocation. The filter graph uses:
//   [v] scale  - brings both videos to the output height
//   [v] fade   - fades the video in and out
//   [v] hstack - puts the two videos side by side
//   [a] volume - evens out the loudness of the two streams
//   [a] afade  - fades the audio along with the video
//   [a] amerge - mixes both audio streams into one

use serde::Serialize;

use std::fmt;

use crate::{clip::DisplayClip, pipeline::Prepared};

const ENCODER: &str = "ffmpeg";
const FADE_SECS: u32 = 1;
const VIDEO_FADE_IN_START: &str = "0.05";
const AUDIO_FADE_IN_START: &str = "0";

/// One encoder invocation as a program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeCommand {
    program: String,
    args: Vec<String>,
}

impl EncodeCommand {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        EncodeCommand {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Renders the command as a line that can be pasted into a POSIX shell.
impl fmt::Display for EncodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

fn quote_arg(arg: &str) -> String {
    let is_flag = arg.starts_with('-') && !arg.contains(char::is_whitespace);
    let is_integer = !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit());
    if is_flag || is_integer {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

// milliseconds as the shortest decimal number of seconds
fn secs(ms: u64) -> String {
    (ms as f64 / 1000.0).to_string()
}

fn fade_out_start(length: u64) -> String {
    secs(length.saturating_sub(u64::from(FADE_SECS) * 1000))
}

fn video_chain(height: u32, fade_out: &str) -> String {
    [
        format!("scale=-1:{height}"),
        format!("fade=type=in:duration={FADE_SECS}:start_time={VIDEO_FADE_IN_START}"),
        format!("fade=type=out:duration={FADE_SECS}:start_time={fade_out}"),
    ]
    .join(",")
}

fn audio_chain(clip: &DisplayClip, fade_out: &str) -> String {
    [
        format!("volume={}", clip.volume),
        format!("afade=type=in:duration={FADE_SECS}:start_time={AUDIO_FADE_IN_START}"),
        format!("afade=type=out:duration={FADE_SECS}:start_time={fade_out}"),
    ]
    .join(",")
}

/// The `-filter_complex` graph. Input 0 is the left clip, input 1 the right.
pub fn filter_graph(prepared: &Prepared) -> String {
    let fade_out = fade_out_start(prepared.complete.length.as_millis());
    let video = video_chain(prepared.options.output_height, &fade_out);

    let mut chains: Vec<String> = (0..2).map(|n| format!("[{n}:v]{video}[v{n}]")).collect();
    chains.push("[v0][v1]hstack=inputs=2[v]".into());
    for (n, clip) in prepared.ordered().iter().enumerate() {
        chains.push(format!("[{n}:a]{}[a{n}]", audio_chain(clip, &fade_out)));
    }
    chains.push("[a0][a1]amerge=inputs=2[a]".into());
    chains.join(";")
}

/// Builds the encoder commands for the prepared clips. Always a single
/// command for now.
pub fn encode_commands(prepared: &Prepared) -> Vec<EncodeCommand> {
    let mut args: Vec<String> = vec!["-y".into()];
    for clip in prepared.ordered() {
        args.extend([
            "-ss".into(),
            clip.start.to_string(),
            "-i".into(),
            clip.filename.clone(),
        ]);
    }
    args.extend([
        "-t".into(),
        prepared.complete.length.to_string(),
        "-filter_complex".into(),
        filter_graph(prepared),
        "-map".into(),
        "[v]".into(),
        "-map".into(),
        "[a]".into(),
        "-ac".into(),
        "2".into(),
        prepared.options.output.clone(),
    ]);

    let command = EncodeCommand::new(ENCODER, args);
    log::debug!("Encode command: {command}");
    vec![command]
}
