use crate::engine::Matcher;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset: DatasetSource,
    pub matching_mode: MatchingMode,
    /// Year assumed for the venue's "dd/mm" date tokens.
    pub calendar_year: i32,
    pub fetch_max_elapsed_secs: u64,
}

/// Where the initial dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Built-in sample rows.
    Sample,
    JsonFile(String),
    CsvTable(String),
    Url(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingMode {
    Heuristic,
    Fifo,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error("{0} and {1} are mutually exclusive")]
    Conflict(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let dataset = parse_dataset_source(&env_map)?;

        let matching_mode = match env_map
            .get("MATCHING_MODE")
            .map(|s| s.as_str())
            .unwrap_or("heuristic")
        {
            "heuristic" => MatchingMode::Heuristic,
            "fifo" => MatchingMode::Fifo,
            other => {
                return Err(ConfigError::InvalidValue(
                    "MATCHING_MODE".to_string(),
                    format!("must be heuristic or fifo, got {}", other),
                ))
            }
        };

        let calendar_year = env_map
            .get("CALENDAR_YEAR")
            .map(|s| s.as_str())
            .unwrap_or("2023")
            .parse::<i32>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "CALENDAR_YEAR".to_string(),
                    "must be a valid year".to_string(),
                )
            })?;

        let fetch_max_elapsed_secs = env_map
            .get("FETCH_MAX_ELAPSED_SECS")
            .map(|s| s.as_str())
            .unwrap_or("30")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "FETCH_MAX_ELAPSED_SECS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            port,
            dataset,
            matching_mode,
            calendar_year,
            fetch_max_elapsed_secs,
        })
    }

    pub fn matcher(&self) -> Matcher {
        match self.matching_mode {
            MatchingMode::Heuristic => Matcher::Heuristic,
            MatchingMode::Fifo => Matcher::Fifo {
                calendar_year: self.calendar_year,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            dataset: DatasetSource::Sample,
            matching_mode: MatchingMode::Heuristic,
            calendar_year: 2023,
            fetch_max_elapsed_secs: 30,
        }
    }
}

fn parse_dataset_source(env_map: &HashMap<String, String>) -> Result<DatasetSource, ConfigError> {
    let path = env_map
        .get("DATASET_PATH")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    let url = env_map
        .get("DATASET_URL")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    match (path, url) {
        (Some(_), Some(_)) => Err(ConfigError::Conflict(
            "DATASET_PATH".to_string(),
            "DATASET_URL".to_string(),
        )),
        (Some(path), None) if path.to_ascii_lowercase().ends_with(".csv") => {
            Ok(DatasetSource::CsvTable(path.to_string()))
        }
        (Some(path), None) => Ok(DatasetSource::JsonFile(path.to_string())),
        (None, Some(url)) => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(
                    "DATASET_URL".to_string(),
                    "must be an http(s) URL".to_string(),
                ));
            }
            Ok(DatasetSource::Url(url.to_string()))
        }
        (None, None) => Ok(DatasetSource::Sample),
    }
}
