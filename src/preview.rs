//! Debounced regeneration.
//!
//! Every configuration or input change calls [`PreviewScheduler::schedule`];
//! only the last change inside the delay window produces a pass. Passes are
//! tagged with a monotonically increasing [`Ticket`] so a result from an
//! older pass never replaces a newer one. A pass that has started is not
//! cancelled.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::{
    config::Config,
    context::TokenContext,
    generate::SourceFile,
    output::{render_output, Output},
};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);
impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct PreviewScheduler {
    delay: Duration,
    next_seq: u64,
    pending: Option<(Ticket, Instant)>,
    applied: Option<Ticket>,
}
impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
impl PreviewScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_seq: 0,
            pending: None,
            applied: None,
        }
    }
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Supersedes whatever was pending.
    pub fn schedule(&mut self, now: Instant) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket(self.next_seq);
        if let Some((previous, _)) = self.pending.replace((ticket, now + self.delay)) {
            trace!(superseded = previous.0, by = ticket.0, "debounced preview");
        }
        ticket
    }
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
    /// Time left before the pending pass is due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
    /// Takes the pending ticket once its delay has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<Ticket> {
        match self.pending {
            Some((ticket, deadline)) if now >= deadline => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }
    /// Records a finished pass. Returns `false` for a result older than the
    /// one already applied, which must then be discarded.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.applied.is_some_and(|applied| applied >= ticket) {
            debug!(stale = ticket.0, "discarding stale preview");
            return false;
        }
        self.applied = Some(ticket);
        true
    }
    pub fn applied(&self) -> Option<Ticket> {
        self.applied
    }
}

/// Config, inputs and registries behind a live preview.
#[derive(Debug)]
pub struct PreviewSession {
    scheduler: PreviewScheduler,
    config: Config,
    sources: Vec<SourceFile>,
    context: TokenContext,
    output: Option<Output>,
}
impl PreviewSession {
    pub fn new(config: Config, context: TokenContext, delay: Duration) -> Self {
        Self {
            scheduler: PreviewScheduler::new(delay),
            config,
            sources: Vec::new(),
            context,
            output: None,
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn context(&self) -> &TokenContext {
        &self.context
    }
    pub fn scheduler(&self) -> &PreviewScheduler {
        &self.scheduler
    }
    /// The last applied output. A failed pass replaces it with its error note.
    pub fn output(&self) -> Option<&Output> {
        self.output.as_ref()
    }

    pub fn set_config(&mut self, config: Config, now: Instant) -> Ticket {
        self.config = config;
        self.scheduler.schedule(now)
    }
    pub fn set_sources(&mut self, sources: Vec<SourceFile>, now: Instant) -> Ticket {
        self.sources = sources;
        self.scheduler.schedule(now)
    }

    /// Runs the pending pass if it is due. Returns the new output when one
    /// was applied.
    pub fn tick(&mut self, now: Instant) -> Option<&Output> {
        let ticket = self.scheduler.fire(now)?;
        let output = render_output(&self.config, &self.sources, &mut self.context);
        if !self.scheduler.complete(ticket) {
            return None;
        }
        self.output = Some(output);
        self.output.as_ref()
    }
}
