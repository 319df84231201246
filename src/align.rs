use crate::{
    clip::{ClipPair, TimedClip},
    duration::{parse_duration, Timestamp},
    error::{SplitError, SplitResult},
    options::TestWindow,
};

/// Both clips with start, sync and end in milliseconds. The time between
/// start and sync, and between sync and end, is the same for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligned {
    pub complete: TimedClip,
    pub partial: TimedClip,
}

struct ParsedTimes {
    start: u64,
    sync: u64,
    end: u64,
    partial_sync: u64,
}

impl TryFrom<&ClipPair> for ParsedTimes {
    type Error = SplitError;

    fn try_from(pair: &ClipPair) -> Result<Self, Self::Error> {
        let (start, end) = pair.complete_bounds()?;
        Ok(ParsedTimes {
            start: parse_duration(start)?,
            sync: parse_duration(&pair.complete.sync)?,
            end: parse_duration(end)?,
            partial_sync: parse_duration(&pair.partial.sync)?,
        })
    }
}

/// Derives the partial clip's start and end from the complete clip's
/// distance to its sync point. With a test window the complete clip is
/// first narrowed to the window, centered on its sync point.
pub fn align(pair: &ClipPair, test_window: Option<TestWindow>) -> SplitResult<Aligned> {
    let ParsedTimes {
        mut start,
        sync,
        mut end,
        partial_sync,
    } = pair.try_into()?;

    if !(start <= sync && sync <= end) {
        return Err(SplitError::validation(format!(
            "sync point {} of '{}' is not between its start {} and end {}",
            Timestamp::from_millis(sync),
            pair.complete.filename,
            Timestamp::from_millis(start),
            Timestamp::from_millis(end),
        )));
    }

    if let Some(window) = test_window {
        start = sync.checked_sub(window.half_millis()).ok_or_else(|| {
            SplitError::validation(format!(
                "a {}s test window around {} would start before the beginning of '{}'",
                window.secs(),
                Timestamp::from_millis(sync),
                pair.complete.filename
            ))
        })?;
        end = sync.checked_add(window.half_millis()).ok_or_else(|| {
            SplitError::validation(format!(
                "a {}s test window around {} runs past the largest supported time",
                window.secs(),
                Timestamp::from_millis(sync)
            ))
        })?;
        log::debug!(
            "Test window: '{}' narrowed to {} - {}",
            pair.complete.filename,
            Timestamp::from_millis(start),
            Timestamp::from_millis(end)
        );
    }

    let start_offset = sync - start;
    let end_offset = end - sync;
    let partial_start = partial_sync.checked_sub(start_offset).ok_or_else(|| {
        SplitError::validation(format!(
            "'{}' would start {} before its beginning; its sync point {} is earlier than {} into the clip",
            pair.partial.filename,
            Timestamp::from_millis(start_offset - partial_sync),
            Timestamp::from_millis(partial_sync),
            Timestamp::from_millis(start_offset),
        ))
    })?;
    let partial_end = partial_sync.checked_add(end_offset).ok_or_else(|| {
        SplitError::validation(format!(
            "'{}' would end past the largest supported time",
            pair.partial.filename
        ))
    })?;

    log::debug!(
        "Offsets from sync: -{} / +{}",
        Timestamp::from_millis(start_offset),
        Timestamp::from_millis(end_offset)
    );

    Ok(Aligned {
        complete: TimedClip {
            filename: pair.complete.filename.clone(),
            start: Timestamp::from_millis(start),
            sync: Timestamp::from_millis(sync),
            end: Timestamp::from_millis(end),
            volume: pair.complete.volume.clone(),
        },
        partial: TimedClip {
            filename: pair.partial.filename.clone(),
            start: Timestamp::from_millis(partial_start),
            sync: Timestamp::from_millis(partial_sync),
            end: Timestamp::from_millis(partial_end),
            volume: pair.partial.volume.clone(),
        },
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{clip::RawClip, duration::format_duration};
    use proptest::prelude::*;

    fn stream_pair() -> ClipPair {
        ClipPair::identify(
            RawClip::new("s1.mp4", "3:53:16.082")
                .with_bounds("3:50:59.214", "4:05:51.942")
                .with_volume("0.2"),
            RawClip::new("s2.mp4", "2:29:00.976"),
        )
        .unwrap()
    }

    #[test]
    fn derive_partial_bounds() {
        let aligned = align(&stream_pair(), None).unwrap();
        let Aligned { complete, partial } = &aligned;

        assert_eq!(complete.pre_sync(), 136_868);
        assert_eq!(complete.post_sync(), 755_860);
        assert_eq!(partial.start.to_string(), "2:26:44.108");
        assert_eq!(partial.sync.to_string(), "2:29:00.976");
        assert_eq!(partial.end.to_string(), "2:41:36.836");
        assert_eq!(complete.length().to_string(), "14:52.728");
        assert_eq!(partial.length().to_string(), "14:52.728");
        assert_eq!(complete.volume.as_deref(), Some("0.2"));
        assert_eq!(partial.volume, None);
    }

    #[test]
    fn test_window_centers_on_sync() {
        let aligned = align(&stream_pair(), Some(TestWindow::new(15).unwrap())).unwrap();
        let Aligned { complete, partial } = &aligned;

        assert_eq!(complete.length().as_millis(), 15_000);
        assert_eq!(complete.pre_sync(), 7_500);
        assert_eq!(complete.post_sync(), 7_500);
        assert_eq!(complete.start.to_string(), "3:53:08.582");
        assert_eq!(complete.end.to_string(), "3:53:23.582");
        assert_eq!(partial.start.to_string(), "2:28:53.476");
        assert_eq!(partial.end.to_string(), "2:29:08.476");
    }

    #[test]
    fn odd_test_window_is_exact() {
        let aligned = align(&stream_pair(), Some(TestWindow::new(7).unwrap())).unwrap();
        assert_eq!(aligned.complete.length().as_millis(), 7_000);
        assert_eq!(aligned.complete.pre_sync(), 3_500);
    }

    #[test]
    fn reject_sync_outside_bounds() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "10.000").with_bounds("1.000", "9.000"),
            RawClip::new("b.mp4", "5.000"),
        )
        .unwrap();
        assert!(matches!(align(&pair, None), Err(SplitError::Validation(_))));
    }

    #[test]
    fn reject_partial_starting_before_zero() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "1:00.000").with_bounds("10.000", "2:00.000"),
            RawClip::new("b.mp4", "20.000"),
        )
        .unwrap();
        assert!(matches!(align(&pair, None), Err(SplitError::Validation(_))));
    }

    #[test]
    fn reject_test_window_before_zero() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "3.000").with_bounds("1.000", "9.000"),
            RawClip::new("b.mp4", "20.000"),
        )
        .unwrap();
        let window = TestWindow::new(15).unwrap();
        assert!(matches!(
            align(&pair, Some(window)),
            Err(SplitError::Validation(_))
        ));
    }

    #[test]
    fn bad_timestamp_is_format_error() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "3.000").with_bounds("1.000", "9.000"),
            RawClip::new("b.mp4", "20"),
        )
        .unwrap();
        assert!(matches!(align(&pair, None), Err(SplitError::Format { .. })));
    }

    #[test]
    fn reject_partial_end_overflow() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "1.000").with_bounds("0.000", "2.000"),
            RawClip::new("b.mp4", "18446744073709551.615"),
        )
        .unwrap();
        assert!(matches!(align(&pair, None), Err(SplitError::Validation(_))));
    }

    #[test]
    fn reject_test_window_end_overflow() {
        let pair = ClipPair::identify(
            RawClip::new("a.mp4", "18446744073709551.615")
                .with_bounds("18446744073709551.000", "18446744073709551.615"),
            RawClip::new("b.mp4", "20.000"),
        )
        .unwrap();
        let window = TestWindow::new(1).unwrap();
        assert!(matches!(
            align(&pair, Some(window)),
            Err(SplitError::Validation(_))
        ));
    }

    proptest! {
        #[test]
        fn offsets_match(
            start in 0u64..10_000_000,
            pre in 0u64..10_000_000,
            post in 0u64..10_000_000,
            extra in 0u64..10_000_000,
        ) {
            let sync = start + pre;
            let end = sync + post;
            let partial_sync = pre + extra;
            let pair = ClipPair::identify(
                RawClip::new("b.mp4", &format_duration(partial_sync)),
                RawClip::new("a.mp4", &format_duration(sync))
                    .with_bounds(&format_duration(start), &format_duration(end)),
            )
            .unwrap();
            let Aligned { complete, partial } = align(&pair, None).unwrap();
            prop_assert_eq!(complete.pre_sync(), partial.pre_sync());
            prop_assert_eq!(complete.post_sync(), partial.post_sync());
            prop_assert_eq!(partial.start.as_millis(), extra);
        }

        #[test]
        fn test_window_is_exact(secs in 1u32..600, sync in 300_000u64..10_000_000) {
            let pair = ClipPair::identify(
                RawClip::new("a.mp4", &format_duration(sync))
                    .with_bounds("0.000", &format_duration(sync + 1_000)),
                RawClip::new("b.mp4", &format_duration(sync)),
            )
            .unwrap();
            let Aligned { complete, .. } = align(&pair, Some(TestWindow::new(secs).unwrap())).unwrap();
            prop_assert_eq!(complete.length().as_millis(), u64::from(secs) * 1000);
            prop_assert_eq!(complete.pre_sync(), complete.post_sync());
        }
    }
}
