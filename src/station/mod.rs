//! An async pump from a CAN bus to published updates.
//!
//! The [`Station`] owns the [`Collector`] and is the only thing feeding it,
//! which gives the serialized, in-order delivery the collector relies on.
//! Downstream tasks (an MQTT publisher, a display) either call
//! [`Station::poll`] themselves or receive [`Update`]s over a channel filled
//! by [`Station::run`].

#[cfg(feature = "defmt")]
use defmt::{debug, info};
use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Sender};

use crate::{
    collector::DEFAULT_WIND_CAPACITY, Clock, Collector, Config, MonotonicClock, RawFrame, Update,
};

mod source;

pub use source::FrameSource;

pub struct Station<S, K = MonotonicClock, const N: usize = DEFAULT_WIND_CAPACITY> {
    source: S,
    collector: Collector<K, N>,
}

impl<S: FrameSource> Station<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self::from_collector(source, Collector::new(config))
    }
}

impl<S, K, const N: usize> Station<S, K, N>
where
    S: FrameSource,
    K: Clock,
{
    pub fn from_collector(source: S, collector: Collector<K, N>) -> Self {
        #[cfg(feature = "defmt")]
        info!("Starting weather station");

        Self { source, collector }
    }

    pub fn collector(&self) -> &Collector<K, N> {
        &self.collector
    }

    /// Receive frames until one of them changes a published value, and
    /// return a copy of that value. Frames that decode to nothing, or to
    /// readings that are not published, are consumed silently.
    pub async fn poll(&mut self) -> Result<Update, S::Error> {
        loop {
            let frame = self.source.receive().await?;
            let frame = RawFrame::from(&frame);

            let Some(changed) = self.collector.on_frame(&frame) else {
                continue;
            };

            if let Some(update) = self.collector.update(changed) {
                #[cfg(feature = "defmt")]
                debug!("Update: {}", update);

                return Ok(update);
            }
        }
    }

    /// Forward every update into `tx`, waiting for room in the channel when
    /// it is full. Only returns if the frame source fails.
    pub async fn run<M, const CAP: usize>(
        &mut self,
        tx: Sender<'_, M, Update, CAP>,
    ) -> Result<core::convert::Infallible, S::Error>
    where
        M: RawMutex,
    {
        loop {
            let update = self.poll().await?;
            tx.send(update).await;
        }
    }

    pub fn into_inner(self) -> (S, Collector<K, N>) {
        (self.source, self.collector)
    }
}
