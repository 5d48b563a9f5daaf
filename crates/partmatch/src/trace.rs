use std::io::Write;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Env};

/// Logging subscriber writing to `writer` through a background worker.
///
/// Events are lost once the returned guard is dropped, so it must live as long
/// as the subscriber.
pub fn subscriber(config: &Config, writer: impl Write + Send + 'static) -> (impl Subscriber + Send + Sync + 'static, WorkerGuard) {
  let (appender, guard) = tracing_appender::non_blocking(writer);

  let logging_formatter = match config.env {
    #[cfg(not(test))]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(true).boxed(),
    Env::Production => json_subscriber::layer()
      .with_writer(appender)
      .flatten_event(true)
      .flatten_span_list_on_top_level(true)
      .with_current_span(false)
      .with_span_list(false)
      .boxed(),

    #[cfg(test)]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(false).boxed(),
  };

  let filter = EnvFilter::builder().try_from_env().unwrap_or_else(|_| EnvFilter::new("info"));

  (tracing_subscriber::registry().with(filter.and_then(logging_formatter)), guard)
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> WorkerGuard {
  let (subscriber, guard) = subscriber(config, writer);

  subscriber.init();

  guard
}
