use clap::Parser;
use log::LevelFilter;

use crate::{
    clip::RawClip,
    error::SplitResult,
    options::{LeftVideo, Opt, DEFAULT_OUTPUT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_TEST_DURATION},
};

const EXAMPLE: &str = "example:
  splitvod -a s1.mp4 3:53:16.082 3:50:59.214 4:05:51.942 0.2 -b s2.mp4 2:29:00.976

Timestamps are [[[D:]H:]M:]S.mmm. The clip with start and end points is A;
B's start and end are derived so that both clips line up on their sync points.";

/// Generates an ffmpeg command that puts two clips side by side, synchronized
/// on a shared moment in both.
#[derive(Debug, Parser)]
#[command(name = "splitvod", version, after_help = EXAMPLE)]
pub struct Cli {
    /// First clip: filename, sync point, optional start and end, optional volume
    #[arg(
        short = 'a',
        num_args = 2..=5,
        required = true,
        value_name = "FILE SYNC [START END] [VOL]"
    )]
    pub clip_a: Vec<String>,

    /// Second clip, same layout as -a
    #[arg(
        short = 'b',
        num_args = 2..=5,
        required = true,
        value_name = "FILE SYNC [START END] [VOL]"
    )]
    pub clip_b: Vec<String>,

    /// Which clip goes on the left: the one with start and end points (a),
    /// the derived one (b), or either at random (ab)
    #[arg(long, value_enum, ignore_case = true, default_value_t = LeftVideo::Either)]
    pub left_video: LeftVideo,

    /// Height of the output video in pixels
    #[arg(long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub output_height: u32,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Encode a short window around the sync point instead of the full clips
    #[arg(long)]
    pub test: bool,

    /// Length of the test window in seconds, implies --test
    #[arg(long, value_name = "SECS")]
    pub test_duration: Option<u32>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colors in the table
    #[arg(long)]
    pub no_color: bool,

    /// Log the intermediate steps to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            true => LevelFilter::Debug,
            false => LevelFilter::Warn,
        }
    }

    pub fn opt(&self) -> Opt {
        let test_duration = match (self.test_duration, self.test) {
            (Some(secs), _) => Some(secs),
            (None, true) => Some(DEFAULT_TEST_DURATION),
            (None, false) => None,
        };
        Opt {
            left_video: self.left_video,
            output_height: self.output_height,
            output: self.output.clone(),
            test_duration,
        }
    }

    pub fn clips(&self) -> SplitResult<(RawClip, RawClip)> {
        Ok((
            self.clip_a.as_slice().try_into()?,
            self.clip_b.as_slice().try_into()?,
        ))
    }
}
