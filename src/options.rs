use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use crate::{
    clip::ClipRole,
    error::{SplitError, SplitResult},
};

pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1080;
pub const DEFAULT_OUTPUT: &str = "out.mp4";
pub const DEFAULT_TEST_DURATION: u32 = 15;

/// Which clip goes on the left side of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LeftVideo {
    A,
    B,
    /// Pick one at random.
    #[default]
    #[value(name = "ab")]
    Either,
}

/// Options as the user gave them, before defaults that need a decision
/// (random placement) are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    pub left_video: LeftVideo,
    pub output_height: u32,
    pub output: String,
    /// Length of the test window in seconds. `None` encodes the full clip.
    pub test_duration: Option<u32>,
}

impl Opt {
    pub fn default_output_height() -> u32 {
        DEFAULT_OUTPUT_HEIGHT
    }

    pub fn default_output() -> String {
        DEFAULT_OUTPUT.into()
    }

    /// Resolves `LeftVideo::Either` exactly once using `rng`. The result is
    /// carried in `Options` and never drawn again.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> SplitResult<Options> {
        let left = match self.left_video {
            LeftVideo::A => ClipRole::A,
            LeftVideo::B => ClipRole::B,
            LeftVideo::Either => match rng.gen_bool(0.5) {
                true => ClipRole::A,
                false => ClipRole::B,
            },
        };
        let test_window = self.test_duration.map(TestWindow::new).transpose()?;

        log::debug!(
            "Resolved options: left={left} height={} test_window={:?}",
            self.output_height,
            test_window.map(|w| w.secs())
        );

        Ok(Options {
            left,
            output_height: self.output_height,
            output: self.output,
            test_window,
        })
    }
}

impl Default for Opt {
    fn default() -> Self {
        Self {
            left_video: LeftVideo::default(),
            output_height: Opt::default_output_height(),
            output: Opt::default_output(),
            test_duration: None,
        }
    }
}

/// Short encode centered on the sync point, used to check the sync before
/// committing to a full encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestWindow(u32);

impl TestWindow {
    pub fn new(secs: u32) -> SplitResult<Self> {
        match secs {
            0 => Err(SplitError::validation(
                "test duration must be at least one second",
            )),
            secs => Ok(TestWindow(secs)),
        }
    }

    pub fn secs(&self) -> u32 {
        self.0
    }

    pub fn as_millis(&self) -> u64 {
        u64::from(self.0) * 1000
    }

    /// Milliseconds on either side of the sync point.
    pub fn half_millis(&self) -> u64 {
        u64::from(self.0) * 500
    }
}

impl Default for TestWindow {
    fn default() -> Self {
        TestWindow(DEFAULT_TEST_DURATION)
    }
}

/// Options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    pub left: ClipRole,
    pub output_height: u32,
    pub output: String,
    pub test_window: Option<TestWindow>,
}

impl Options {
    pub fn right(&self) -> ClipRole {
        self.left.other()
    }
}
