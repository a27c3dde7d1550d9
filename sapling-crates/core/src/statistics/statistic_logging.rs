//! The process-wide destination of statistics. Nothing is written until
//! [`configure_statistic_logging`] has been called, which the core never does itself.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticSink {
    /// Written before every statistic, e.g. `%%%sapling-stat:`.
    prefix: &'static str,
    /// Written after a block of statistics.
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

impl StatisticSink {
    fn format(&self, name: impl Display, value: impl Display) -> String {
        let name = name.to_string();
        let name = match self.casing {
            Some(casing) => name.to_case(casing),
            None => name,
        };

        format!("{} {name}={value}", self.prefix)
    }
}

impl Debug for StatisticSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticSink")
            .field("prefix", &self.prefix)
            .field("postfix", &self.postfix)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Enables statistic logging. Every statistic is written as `{prefix} {name}={value}`, with the
/// name converted to `casing` if given; [`log_statistic_postfix`] writes `postfix`.
///
/// Only the first call has an effect. Without a `writer`, statistics go to stdout.
pub fn configure_statistic_logging(
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            postfix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

fn with_sink(write: impl FnOnce(&mut StatisticSink)) {
    if let Some(Ok(mut sink)) = STATISTIC_SINK.get().map(Mutex::lock) {
        write(&mut sink);
    }
}

/// Writes the statistic `name` with `value`, if statistic logging is enabled.
pub fn log_statistic(name: impl Display, value: impl Display) {
    with_sink(|sink| {
        let line = sink.format(name, value);
        let _ = writeln!(sink.writer, "{line}");
    });
}

/// Closes a block of statistics, if statistic logging is enabled and a postfix was configured.
pub fn log_statistic_postfix() {
    with_sink(|sink| {
        if let Some(postfix) = sink.postfix {
            let _ = writeln!(sink.writer, "{postfix}");
        }
    });
}

/// Whether statistic logging is enabled.
pub fn should_log_statistics() -> bool {
    STATISTIC_SINK.get().is_some()
}

#[cfg(test)]
mod tests {
    use std::io::sink;

    use super::*;

    fn sink_with(casing: Option<Case>) -> StatisticSink {
        StatisticSink {
            prefix: "%%%stat:",
            postfix: None,
            casing,
            writer: Box::new(sink()),
        }
    }

    #[test]
    fn names_are_converted_to_the_configured_case() {
        assert_eq!(
            sink_with(Some(Case::Camel)).format("heuristic_num_dead_ends", 3),
            "%%%stat: heuristicNumDeadEnds=3"
        );
        assert_eq!(
            sink_with(None).format("heuristic_num_dead_ends", 3),
            "%%%stat: heuristic_num_dead_ends=3"
        );
    }
}
