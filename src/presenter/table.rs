use console::Style;

use crate::{
    clip::{ClipRole, DisplayClip, FILENAME_BUDGET},
    pipeline::Prepared,
};

const TIME_WIDTH: usize = 14;
const VOLUME_WIDTH: usize = 8;
const BAR: &str = " | ";
const BAR_SEPARATOR: &str = "-+-";

struct Column {
    title: &'static str,
    width: usize,
}

const COLUMNS: [Column; 6] = [
    Column {
        title: "Input files:",
        width: FILENAME_BUDGET,
    },
    Column {
        title: "Start:",
        width: TIME_WIDTH,
    },
    Column {
        title: "Sync:",
        width: TIME_WIDTH,
    },
    Column {
        title: "End:",
        width: TIME_WIDTH,
    },
    Column {
        title: "Length:",
        width: TIME_WIDTH,
    },
    Column {
        title: "Volume:",
        width: VOLUME_WIDTH,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    /// Values derived rather than given.
    Computed,
    Name,
    Notice,
}

impl Tone {
    fn style(&self) -> Style {
        match self {
            Tone::Plain => Style::new(),
            Tone::Computed => Style::new().cyan(),
            Tone::Name => Style::new().green(),
            Tone::Notice => Style::new().yellow(),
        }
    }
}

struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Cell {
            text: text.into(),
            tone,
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Cell::new(text, Tone::Plain)
    }

    fn time(text: impl Into<String>, computed: bool) -> Self {
        match computed {
            true => Cell::new(text, Tone::Computed),
            false => Cell::plain(text),
        }
    }
}

/// Renders the summary table, left clip first. In test mode a last row
/// shows the window length in seconds.
pub fn render_table(prepared: &Prepared, colored: bool) -> String {
    let mut lines = vec![header(), separator()];
    for clip in prepared.ordered() {
        lines.push(make_row(&clip_cells(clip), colored));
    }
    lines.push(separator());

    if let Some(window) = prepared.options.test_window {
        let cells = [
            Cell::new("Testing duration", Tone::Notice),
            Cell::plain(""),
            Cell::plain(""),
            Cell::plain(""),
            Cell::new(window.secs().to_string(), Tone::Computed),
        ];
        lines.push(make_row(&cells, colored));
    }

    lines.join("\n")
}

fn clip_cells(clip: &DisplayClip) -> [Cell; 6] {
    let derived = clip.role == ClipRole::B;
    [
        Cell::new(clip.short_name.as_str(), Tone::Name),
        Cell::time(clip.start.to_string(), derived),
        Cell::time(clip.sync.to_string(), false),
        Cell::time(clip.end.to_string(), derived),
        Cell::time(clip.length.to_string(), true),
        Cell::plain(clip.volume.as_str()),
    ]
}

fn header() -> String {
    let cells: Vec<Cell> = COLUMNS.iter().map(|c| Cell::plain(c.title)).collect();
    make_row(&cells, false)
}

fn separator() -> String {
    let rest: usize = COLUMNS[1..].iter().map(|c| c.width).sum();
    format!(
        "{}{BAR_SEPARATOR}{}",
        "-".repeat(COLUMNS[0].width),
        "-".repeat(rest)
    )
}

fn make_row(cells: &[Cell], colored: bool) -> String {
    let mut row = String::new();
    for (n, (cell, column)) in cells.iter().zip(COLUMNS.iter()).enumerate() {
        if n == 1 {
            row.push_str(BAR);
        }
        // pad before styling, escape codes have no width
        let padded = format!("{:<width$}", cell.text, width = column.width);
        match colored && cell.tone != Tone::Plain {
            true => {
                let styled = cell.tone.style().force_styling(true).apply_to(padded);
                row.push_str(&styled.to_string());
            }
            false => row.push_str(&padded),
        }
    }
    row
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        options::{LeftVideo, Opt},
        pipeline::{prepare, test::prepared_with},
    };
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn plain_table() {
        let prepared = prepared_with(Opt {
            left_video: LeftVideo::A,
            ..Opt::default()
        });
        let table = render_table(&prepared, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            [
                "Input files:              | Start:        Sync:         End:          Length:       Volume: ",
                "--------------------------+-----------------------------------------------------------------",
                "s1.mp4                    | 3:50:59.214   3:53:16.082   4:05:51.942   14:52.728     0.2     ",
                "s2.mp4                    | 2:26:44.108   2:29:00.976   2:41:36.836   14:52.728     0.8     ",
                "--------------------------+-----------------------------------------------------------------",
            ]
        );
    }

    #[test]
    fn rows_follow_left_video_and_show_test_window() {
        let prepared = prepared_with(Opt {
            left_video: LeftVideo::B,
            test_duration: Some(15),
            ..Opt::default()
        });
        let table = render_table(&prepared, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[2],
            "s2.mp4                    | 2:28:53.476   2:29:00.976   2:29:08.476   15.000        0.8     "
        );
        assert!(lines[3].starts_with("s1.mp4                    | 3:53:08.582"));
        assert_eq!(
            lines[5],
            format!(
                "{:<25} | {}{:<14}",
                "Testing duration",
                " ".repeat(42),
                "15"
            )
        );
    }

    #[test]
    fn shortened_names_keep_column_width() {
        let (a, _) = crate::pipeline::test::stream_clips();
        let b = crate::clip::RawClip::new("stream_recording_from_second_camera_2024.mp4", "2:29:00.976");
        let opt = Opt {
            left_video: LeftVideo::B,
            ..Opt::default()
        };
        let prepared = prepare(a, b, opt, &mut StdRng::seed_from_u64(1)).unwrap();
        let table = render_table(&prepared, false);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("stream_reco\u{2026}mera_2024.mp4 | 2:26:44.108"));
    }

    #[test]
    fn directories_stay_out_of_the_name_column() {
        let (_, b) = crate::pipeline::test::stream_clips();
        let a = crate::clip::RawClip::new("/home/user/recordings/2024/s1.mp4", "3:53:16.082")
            .with_bounds("3:50:59.214", "4:05:51.942");
        let opt = Opt {
            left_video: LeftVideo::A,
            ..Opt::default()
        };
        let prepared = prepare(a, b, opt, &mut StdRng::seed_from_u64(1)).unwrap();
        let table = render_table(&prepared, false);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("s1.mp4                    | 3:50:59.214"));
        assert_eq!(row.find(" | "), Some(FILENAME_BUDGET));
    }

    #[test]
    fn colored_table_marks_computed_values() {
        let prepared = prepared_with(Opt {
            left_video: LeftVideo::A,
            ..Opt::default()
        });
        let table = render_table(&prepared, true);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Input files:"));
        // derived start of B is styled, given start of A is not
        assert!(lines[3].contains(&format!(
            "{}",
            Style::new().cyan().force_styling(true).apply_to("2:26:44.108   ")
        )));
        assert!(lines[2].contains("3:50:59.214   "));
        assert!(!lines[2].contains(&format!(
            "{}",
            Style::new().cyan().force_styling(true).apply_to("3:50:59.214   ")
        )));
        assert_eq!(console::strip_ansi_codes(&table), render_table(&prepared, false));
    }
}
