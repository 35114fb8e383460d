use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub engine: EngineConfig,
    pub orchestrator: OrchestratorConfig,
    pub backtest: BacktestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    CI,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub max_latency_ms: f64,
    pub strategy_refresh_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub gate1_min_trades: usize,
    pub gate1_max_dd_pct: f64,
    pub gate1_min_return_pct: f64,
    pub gate2_max_consecutive_losses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub slippage: f64,
    pub commission_rate: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file based on APP_ENV
        let env_file = match env::var("APP_ENV").as_deref() {
            Ok("production") => ".env.production",
            Ok("ci") => ".env.ci",
            _ => ".env.development",
        };

        // Load environment variables from file
        dotenv::from_filename(env_file).ok();

        // Parse configuration
        let config = Config {
            environment: Self::parse_environment(),
            database: Self::parse_database_config()?,
            engine: Self::parse_engine_config()?,
            orchestrator: Self::parse_orchestrator_config()?,
            backtest: Self::parse_backtest_config()?,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    fn parse_environment() -> Environment {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            Ok("ci") => Environment::CI,
            _ => Environment::Development,
        }
    }

    fn parse_database_config() -> Result<DatabaseConfig> {
        Ok(DatabaseConfig {
            path: PathBuf::from(
                env::var("DB_PATH").unwrap_or_else(|_| "./data/hybrid-trader.db".to_string()),
            ),
        })
    }

    fn parse_engine_config() -> Result<EngineConfig> {
        Ok(EngineConfig {
            max_latency_ms: env::var("ENGINE_MAX_LATENCY_MS")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .context("Invalid ENGINE_MAX_LATENCY_MS")?,
            strategy_refresh_interval_ms: env::var("ENGINE_STRATEGY_REFRESH_INTERVAL_MS")
                .unwrap_or_else(|_| "300000".to_string())
                .parse()
                .context("Invalid ENGINE_STRATEGY_REFRESH_INTERVAL_MS")?,
        })
    }

    fn parse_orchestrator_config() -> Result<OrchestratorConfig> {
        Ok(OrchestratorConfig {
            gate1_min_trades: env::var("GATE1_MIN_TRADES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("Invalid GATE1_MIN_TRADES")?,
            gate1_max_dd_pct: env::var("GATE1_MAX_DD_PCT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("Invalid GATE1_MAX_DD_PCT")?,
            gate1_min_return_pct: env::var("GATE1_MIN_RETURN_PCT")
                .unwrap_or_else(|_| "-5".to_string())
                .parse()
                .context("Invalid GATE1_MIN_RETURN_PCT")?,
            gate2_max_consecutive_losses: env::var("GATE2_MAX_CONSECUTIVE_LOSSES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("Invalid GATE2_MAX_CONSECUTIVE_LOSSES")?,
        })
    }

    fn parse_backtest_config() -> Result<BacktestConfig> {
        Ok(BacktestConfig {
            initial_capital: env::var("BACKTEST_INITIAL_CAPITAL")
                .unwrap_or_else(|_| "100000".to_string())
                .parse()
                .context("Invalid BACKTEST_INITIAL_CAPITAL")?,
            slippage: env::var("BACKTEST_SLIPPAGE")
                .unwrap_or_else(|_| "0.0005".to_string())
                .parse()
                .context("Invalid BACKTEST_SLIPPAGE")?,
            commission_rate: env::var("BACKTEST_COMMISSION_RATE")
                .unwrap_or_else(|_| "0.001".to_string())
                .parse()
                .context("Invalid BACKTEST_COMMISSION_RATE")?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.engine.max_latency_ms <= 0.0 {
            anyhow::bail!("Engine max_latency_ms must be > 0");
        }

        if self.engine.strategy_refresh_interval_ms == 0 {
            anyhow::bail!("Engine strategy_refresh_interval_ms must be > 0");
        }

        if self.backtest.initial_capital <= 0.0 {
            anyhow::bail!("Backtest initial_capital must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        std::env::set_var("APP_ENV", "development");
        std::env::set_var("ENGINE_MAX_LATENCY_MS", "1.0");
        std::env::set_var("BACKTEST_INITIAL_CAPITAL", "100000");

        let config = Config::load();
        assert!(config.is_ok());
    }

    #[test]
    fn test_rejects_zero_refresh_interval() {
        std::env::set_var("ENGINE_STRATEGY_REFRESH_INTERVAL_MS", "0");
        let config = Config::load();
        assert!(config.is_err());
        std::env::remove_var("ENGINE_STRATEGY_REFRESH_INTERVAL_MS");
    }
}
