use crate::engine::ExecutionEngine;
use crate::interfaces::SpecProducer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, warn};

/// Yahoo-style history ranges the orchestrator escalates through when
/// fetching backtest data until `len(bars) >= min_data_points` (§4.5
/// Defaults).
pub const HISTORY_RANGE_ESCALATION: &[&str] = &["3mo", "6mo", "1y", "2y"];

/// Drives the background Spec refresh loop described in §4.5: every
/// `strategy_refresh_interval_ms`, re-run the Spec Producer for each
/// watched ticker and atomically replace that ticker's Spec in the
/// shared [`ExecutionEngine`]. `refreshing` prevents overlapping
/// cycles if a producer call runs long.
pub struct RefreshCoordinator {
    engine: Arc<Mutex<ExecutionEngine>>,
    producer: Arc<dyn SpecProducer>,
    watchlist: Vec<(String, String)>, // (ticker, source_query)
    refreshing: Arc<AtomicBool>,
}

impl RefreshCoordinator {
    pub fn new(
        engine: Arc<Mutex<ExecutionEngine>>,
        producer: Arc<dyn SpecProducer>,
        watchlist: Vec<(String, String)>,
    ) -> Self {
        Self {
            engine,
            producer,
            watchlist,
            refreshing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one refresh cycle: for every watched ticker, invokes the
    /// Spec Producer off the async executor via `spawn_blocking` (the
    /// producer trait is synchronous, §6.1) and loads the result.
    /// Skips the cycle entirely if a previous one is still in flight.
    pub async fn refresh_once(&self) {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("refresh cycle already in progress, skipping");
            return;
        }

        for (ticker, query) in &self.watchlist {
            let producer = self.producer.clone();
            let query = query.clone();
            let ticker = ticker.clone();
            let result = tokio::task::spawn_blocking(move || producer.compile_strategy(&query)).await;

            match result {
                Ok(Ok(spec)) => {
                    let mut engine = self.engine.lock().expect("engine mutex poisoned");
                    engine.load(spec);
                    info!(ticker, "loaded refreshed spec");
                }
                Ok(Err(err)) => {
                    error!(ticker, %err, "spec producer returned an invalid spec");
                }
                Err(join_err) => {
                    error!(ticker, %join_err, "spec producer task panicked");
                }
            }
        }

        self.refreshing.store(false, Ordering::Release);
    }

    /// Runs [`refresh_once`] on a fixed interval until `shutdown` is
    /// cancelled. Intended to be spawned as a single background task
    /// by the binary's async runtime.
    pub async fn run(&self, interval_ms: u64, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        let mut ticker = interval(Duration::from_millis(interval_ms));
        loop {
            tokio::select! {
                _ = ticker.tick() => self.refresh_once().await,
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("refresh loop shutting down");
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::StaticSpecProducer;
    use crate::spec::{Action, DataRequirements, RiskParameters, Signal, StrategySpec};
    use quant_data::Timeframe;
    use std::collections::HashSet;

    fn spec(ticker: &str) -> StrategySpec {
        StrategySpec {
            id: "s".into(),
            ticker: ticker.into(),
            timeframe: Timeframe::OneDay,
            data_requirements: DataRequirements {
                indicators: HashSet::new(),
                lookback: 5,
                min_data_points: 2,
            },
            signals: vec![Signal::new("buy", "close < 100", Action::Buy, 0.1, 0.5, "r", 1)],
            risk_params: RiskParameters {
                max_position_size: 1.0,
                stop_loss: 0.02,
                take_profit: 0.05,
                max_daily_loss: 0.1,
                max_drawdown: 0.2,
                use_dynamic_sizing: false,
                risk_per_trade: 0.01,
            },
            compiled_at: 0,
            expires_at: i64::MAX,
            source_query: "q".into(),
        }
        .compile()
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_once_loads_spec_into_engine() {
        let engine = Arc::new(Mutex::new(ExecutionEngine::new(1_000.0)));
        let producer = Arc::new(StaticSpecProducer::new(spec("AAPL")));
        let coordinator = RefreshCoordinator::new(
            engine.clone(),
            producer,
            vec![("AAPL".to_string(), "buy the dip".to_string())],
        );

        coordinator.refresh_once().await;

        let mut guard = engine.lock().unwrap();
        let bar = quant_data::Bar::try_new("AAPL", Timeframe::OneDay, 0, 10.0, 11.0, 9.0, 10.0, 100.0).unwrap();
        let decision = guard.on_bar("AAPL", &bar, 0).unwrap();
        assert!(decision.is_none(), "not enough history yet, but spec must be loaded");
    }

    #[tokio::test]
    async fn overlapping_refresh_is_skipped_not_queued() {
        let engine = Arc::new(Mutex::new(ExecutionEngine::new(1_000.0)));
        let producer = Arc::new(StaticSpecProducer::new(spec("AAPL")));
        let coordinator = RefreshCoordinator::new(engine, producer, vec![]);
        coordinator.refreshing.store(true, Ordering::Release);
        coordinator.refresh_once().await;
        assert!(coordinator.refreshing.load(Ordering::Acquire));
    }
}
