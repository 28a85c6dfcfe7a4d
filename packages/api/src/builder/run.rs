//! Probe execution
//!
//! Resolve, create, configure, connect, report, exchange, close. Status lines
//! go to the supplied [`StatusPrinter`] as each stage completes.

use std::io::Write;
use std::net::SocketAddr;

use tcprobe_client::connect::{ApplyReport, ConnectionEstablisher, SocketHandle, resolve_first};
use tcprobe_client::error::Result;
use tcprobe_client::exchange::{ExchangeLoop, ExchangeOutcome, ExchangeStats};
use tcprobe_client::report::EffectiveOptions;

use crate::builder::core::ProbeBuilder;
use crate::display::StatusPrinter;

/// Everything observed during a completed run
#[derive(Debug)]
pub struct ProbeSummary {
    pub peer: SocketAddr,
    pub report: ApplyReport,
    pub effective: EffectiveOptions,
    pub outcome: ExchangeOutcome,
    pub stats: ExchangeStats,
}

impl ProbeBuilder {
    /// Execute the probe.
    ///
    /// A receive error that ends the exchange is not an `Err`; it is
    /// reported as [`ExchangeOutcome::Failed`] in the summary.
    ///
    /// # Errors
    ///
    /// `Resolve`, `SocketCreate`, `Connect` or `ConnectTimeout` when the run
    /// cannot reach the exchange stage.
    pub fn run<W: Write>(self, printer: &mut StatusPrinter<W>) -> Result<ProbeSummary> {
        let peer = resolve_first(&self.host, self.port)?;
        tracing::debug!(host = %self.host, %peer, "probe target resolved");

        let handle = SocketHandle::create(peer)?;
        printer.socket_created();

        let establisher = ConnectionEstablisher::new(&self.options);
        let (handle, report) = establisher.apply(handle);
        printer.apply_report(&report);

        printer.connecting(&self.host, self.port);
        let handle = establisher.connect(handle, peer)?;
        printer.connected();

        let effective = EffectiveOptions::read_from(handle.socket());
        printer.effective(&effective);

        let mut exchange = ExchangeLoop::new(handle, &self.shutdown);
        let outcome = exchange.run(printer);
        let stats = exchange.stats();
        tracing::debug!(?stats, "exchange finished");

        exchange.into_inner().close();
        printer.outcome(&outcome);
        printer.closed();

        Ok(ProbeSummary {
            peer,
            report,
            effective,
            outcome,
            stats,
        })
    }
}
