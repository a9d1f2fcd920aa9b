use std::io::Write;

use crate::error::ParseResult;
use crate::stream::Stream;

pub(crate) struct Depth {
    depth: usize,
}

impl Depth {
    fn new() -> Self {
        let depth = DEPTH.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Self { depth }
    }
}

impl Drop for Depth {
    fn drop(&mut self) {
        let _ = DEPTH.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
    }
}

static DEPTH: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

pub(crate) enum Severity {
    Success,
    Backtrack,
    Committed,
}

impl Severity {
    pub(crate) fn with_result<T>(entry: usize, result: &ParseResult<T>) -> Self {
        match result {
            ParseResult::Success { .. } => Self::Success,
            ParseResult::Failure(failure) if failure.got().offset() == entry => Self::Backtrack,
            ParseResult::Failure(_) => Self::Committed,
        }
    }
}

const CALL_WIDTH: usize = 40;
const INPUT_WIDTH: usize = 24;

pub(crate) fn start(label: &str, input: &Stream) -> Depth {
    let depth = Depth::new();

    let gutter_style = anstyle::Style::new().bold();
    let input_style = anstyle::Style::new().underline();
    let eof_style = anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Cyan.into()));

    let call_width = CALL_WIDTH;
    let call_column = format!("{:depth$}> {label}", "", depth = depth.depth);

    let mut excerpt: String = input.rest().chars().take(INPUT_WIDTH).collect();
    let eof = if input.rest().chars().count() <= INPUT_WIDTH {
        "∅"
    } else {
        excerpt.push('…');
        ""
    };
    let excerpt = excerpt.replace('\n', "␤");

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{call_column:call_width$} {gutter_style}|{gutter_reset} {input_style}{excerpt}{input_reset}{eof_style}{eof}{eof_reset}",
        gutter_style = gutter_style.render(),
        gutter_reset = gutter_style.render_reset(),
        input_style = input_style.render(),
        input_reset = input_style.render_reset(),
        eof_style = eof_style.render(),
        eof_reset = eof_style.render_reset(),
    );

    depth
}

pub(crate) fn end(depth: Depth, label: &str, consumed: usize, severity: Severity) {
    let gutter_style = anstyle::Style::new().bold();

    let call_width = CALL_WIDTH;
    let call_column = format!("{:depth$}< {label}", "", depth = depth.depth);

    let (status_style, status) = match severity {
        Severity::Success => {
            let style = anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Green.into()));
            (style, format!("+{consumed}"))
        }
        Severity::Backtrack => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Yellow.into())),
            "backtrack".to_owned(),
        ),
        Severity::Committed => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Red.into())),
            "fail".to_owned(),
        ),
    };

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{status_style}{call_column:call_width$}{status_reset} {gutter_style}|{gutter_reset} {status_style}{status}{status_reset}",
        gutter_style = gutter_style.render(),
        gutter_reset = gutter_style.render_reset(),
        status_style = status_style.render(),
        status_reset = status_style.render_reset(),
    );
}
