use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

/// Production Rainforest QA API host used when `RAINFOREST_BASE_URL` is not set.
pub const DEFAULT_RAINFOREST_BASE_URL: &str = "https://app.rainforestqa.com";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The API token sent in the `CLIENT_TOKEN` header of every Rainforest request.
    #[arg(long, env)]
    rainforest_token: Option<String>,

    /// The base URL of the Rainforest API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_RAINFOREST_BASE_URL)]
    rainforest_base_url: String,

    /// A list of test ids to select for a run, in addition to the default `all` selection.
    #[arg(long, env = "RAINFOREST_TESTS", value_delimiter = ',', use_value_delimiter = true)]
    tests: Vec<String>,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_rainforest_token(mut self, token: String) -> Self {
        self.rainforest_token = Some(token);
        self
    }

    pub fn set_rainforest_base_url(mut self, base_url: String) -> Self {
        self.rainforest_base_url = base_url;
        self
    }

    /// Returns the Rainforest API token, if configured.
    pub fn rainforest_token(&self) -> Option<String> {
        self.rainforest_token.clone()
    }

    /// Returns the Rainforest API base URL.
    pub fn rainforest_base_url(&self) -> &str {
        &self.rainforest_base_url
    }

    pub fn tests(&self) -> &[String] {
        &self.tests
    }
}
