//! Interactive CLI surface (§6.3): a free-text research REPL that can
//! be forced into the full research -> backtest -> paper-trade
//! pipeline with `/hybrid`.

use crate::config::Config;
use crate::demo_spec::KeywordSpecProducer;
use crate::synthetic;
use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use quant_core::backtest::{BacktestEngine, FillModel};
use quant_core::diagnostics;
use quant_core::interfaces::SpecProducer;
use quant_core::orchestrator::{Gate1Thresholds, Gate2Thresholds, Orchestrator};
use quant_data::Timeframe;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::info;

const HYBRID_KEYWORDS: &[&str] = &[
    "backtest",
    "paper",
    "replay",
    "gate",
    "maxdailyloss",
    "consecutive",
    "strategy spec",
];

fn wants_hybrid_flow(query: &str) -> bool {
    let lower = query.to_lowercase();
    HYBRID_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub struct Repl {
    config: Config,
    model: String,
}

impl Repl {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            model: "default".to_string(),
        }
    }

    /// Runs the REPL to completion. Exit code 0 on a clean `exit`/
    /// `quit`/EOF; non-zero when stdin isn't a TTY, per §6.3.
    pub fn run(&mut self) -> Result<i32> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            eprintln!("hybrid-trader: no TTY attached, exiting");
            return Ok(1);
        }

        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                return Ok(0);
            };
            let line = line?;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            match trimmed {
                "exit" | "quit" => return Ok(0),
                "/model" => {
                    self.model = self.next_model();
                    println!("switched provider to {}", self.model);
                    continue;
                }
                _ => {}
            }

            if let Some(query) = trimmed.strip_prefix("/hybrid ") {
                self.run_hybrid_flow(query);
            } else if wants_hybrid_flow(trimmed) {
                self.run_hybrid_flow(trimmed);
            } else {
                self.run_research_flow(trimmed);
            }
        }
    }

    fn next_model(&self) -> String {
        match self.model.as_str() {
            "default" => "alternate".to_string(),
            _ => "default".to_string(),
        }
    }

    fn run_research_flow(&self, query: &str) {
        println!("researching: {query:?} (provider: {})", self.model);
        self.run_hybrid_flow(query);
    }

    /// Forces research -> backtest -> paper-trade: compile a Spec,
    /// backtest it over synthetic history, evaluate Gate #1, and print
    /// a summary table.
    fn run_hybrid_flow(&self, query: &str) {
        let producer = KeywordSpecProducer::new(0, self.config.engine.strategy_refresh_interval_ms as i64 * 10);
        let spec = match producer.compile_strategy(query) {
            Ok(spec) => spec,
            Err(err) => {
                println!("spec compile failed: {err}");
                return;
            }
        };

        let bars = synthetic::generate(&spec.ticker, Timeframe::OneDay, 200, 100.0);
        let engine = BacktestEngine::new(
            FillModel {
                slippage: self.config.backtest.slippage,
                commission_rate: self.config.backtest.commission_rate,
            },
            self.config.backtest.initial_capital,
            self.config.engine.max_latency_ms,
        );
        let result = engine.run(spec.clone(), &bars);

        let mut orchestrator = Orchestrator::new(
            spec.ticker.clone(),
            Gate1Thresholds {
                min_trades: self.config.orchestrator.gate1_min_trades,
                max_dd_pct: self.config.orchestrator.gate1_max_dd_pct,
                min_return_pct: self.config.orchestrator.gate1_min_return_pct,
            },
            Gate2Thresholds {
                max_consecutive_losses: self.config.orchestrator.gate2_max_consecutive_losses,
            },
            spec.risk_params.max_daily_loss,
        );
        let passed = orchestrator.evaluate_gate1(&result.metrics, bars.last().map(|b| b.timestamp_ms).unwrap_or(0));

        print_summary(&spec.ticker, &result.metrics, passed);

        if result.metrics.total_trades == 0 {
            let diagnosis = diagnostics::diagnose(&spec, bars.len());
            println!("diagnosis: {}", diagnosis.suggestion());
        }
        info!(ticker = %spec.ticker, mode = ?orchestrator.mode(), "hybrid flow complete");
    }
}

fn print_summary(ticker: &str, metrics: &quant_core::backtest::Metrics, gate1_passed: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ticker", "trades", "win_rate", "return_pct", "max_dd", "gate #1"]);
    table.add_row(vec![
        Cell::new(ticker),
        Cell::new(metrics.total_trades),
        Cell::new(format!("{:.1}%", metrics.win_rate)),
        Cell::new(format!("{:.2}%", metrics.total_return_pct)),
        Cell::new(format!("{:.2}%", metrics.max_drawdown)),
        Cell::new(if gate1_passed { "PASS" } else { "FAIL" }),
    ]);
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hybrid_keywords_are_detected_case_insensitively() {
        assert!(wants_hybrid_flow("run a Backtest on AAPL"));
        assert!(wants_hybrid_flow("check consecutive losses"));
        assert!(!wants_hybrid_flow("what's the weather"));
    }
}
