use rand::Rng;

use crate::{
    align::{align, Aligned},
    clip::{ClipPair, ClipRole, DisplayClip, RawClip},
    error::SplitResult,
    options::{Opt, Options},
};

/// Both clips aligned and defaulted, with the options they were prepared
/// under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub complete: DisplayClip,
    pub partial: DisplayClip,
    pub options: Options,
}

impl Prepared {
    pub fn clip(&self, role: ClipRole) -> &DisplayClip {
        match role {
            ClipRole::A => &self.complete,
            ClipRole::B => &self.partial,
        }
    }

    pub fn left(&self) -> &DisplayClip {
        self.clip(self.options.left)
    }

    pub fn right(&self) -> &DisplayClip {
        self.clip(self.options.right())
    }

    /// Clips in output order, left first.
    pub fn ordered(&self) -> [&DisplayClip; 2] {
        [self.left(), self.right()]
    }
}

/// Runs the whole computation: sorts the clips by role, resolves the
/// options, aligns the partial clip to the complete one and fills in
/// display values. Nothing is computed if any input is invalid.
pub fn prepare<R: Rng + ?Sized>(
    first: RawClip,
    second: RawClip,
    opt: Opt,
    rng: &mut R,
) -> SplitResult<Prepared> {
    let pair = ClipPair::identify(first, second)?;
    let options = opt.resolve(rng)?;
    let Aligned { complete, partial } = align(&pair, options.test_window)?;

    let prepared = Prepared {
        complete: DisplayClip::new(complete, ClipRole::A),
        partial: DisplayClip::new(partial, ClipRole::B),
        options,
    };
    log::debug!(
        "Prepared '{}' (A) and '{}' (B), {} on the left",
        prepared.complete.filename,
        prepared.partial.filename,
        prepared.options.left
    );
    Ok(prepared)
}
