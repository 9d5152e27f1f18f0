//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the analysis engine over MCP on stdio. Every tool shares one
//! [`Engine`], so `analyze_text` calls accumulate into the same history and
//! statistics that `get_history` and `get_statistics` report.
//!
//! Tools are a presentation layer: each one validates its parameters, calls
//! into `wordwise_core`, and returns the result as pretty JSON text.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use wordwise_core::{CharacterFrequency, Engine, FrequencyMode, StatisticsSummary};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze. Absent or null text counts as empty.
    #[serde(default)]
    pub text: Option<String>,
}

/// Parameters for the `character_frequency` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CharacterFrequencyParams {
    /// The text to tally. Absent or null text counts as empty.
    #[serde(default)]
    pub text: Option<String>,
    /// Frequency mode: "raw" or "alnum-lowercase". Defaults to the server's mode.
    pub mode: Option<String>,
}

/// Parameters for the `compare_texts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CompareTextsParams {
    /// First text.
    #[serde(default)]
    pub left: Option<String>,
    /// Second text.
    #[serde(default)]
    pub right: Option<String>,
}

#[derive(Serialize)]
struct FrequencyResponse<'a> {
    mode: FrequencyMode,
    unique: usize,
    total: usize,
    counts: &'a CharacterFrequency,
}

#[derive(Serialize)]
struct HistoryResponse {
    capacity: usize,
    entries: Vec<String>,
}

#[derive(Serialize)]
struct StatisticsResponse {
    capacity: usize,
    counts: Vec<usize>,
    summary: StatisticsSummary,
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP server backed by a shared analysis engine.
#[derive(Clone)]
pub struct ProjectServer {
    engine: Arc<Engine>,
    max_input: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl ProjectServer {
    /// Create a server over `engine`, rejecting texts larger than `max_input` bytes.
    pub fn new(engine: Arc<Engine>, max_input: Option<usize>) -> Self {
        Self {
            engine,
            max_input,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        if params.format == "json" {
            return json_result(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            }));
        }

        let text = format!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Analyze text and record the result.
    #[tool(
        description = "Count words, find the longest word, and sum word lengths. Non-empty results are recorded in the session history and statistics."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = params.text.as_deref().unwrap_or_default();
        self.check_size(text)?;

        let report = self.engine.analyze(text);

        tracing::info!(
            tool = "analyze_text",
            word_count = report.word_count,
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Tally character frequency.
    #[tool(
        description = "Count occurrences of each character. Mode \"raw\" counts every non-whitespace character; \"alnum-lowercase\" counts letters and digits case-insensitively."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn character_frequency(
        &self,
        Parameters(params): Parameters<CharacterFrequencyParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = params.text.as_deref().unwrap_or_default();
        self.check_size(text)?;

        let mode = match params.mode.as_deref() {
            Some(name) => name
                .parse::<FrequencyMode>()
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            None => self.engine.analyzer().frequency_mode(),
        };
        tracing::debug!(tool = "character_frequency", %mode, "executing MCP tool");

        let counts = wordwise_core::character_frequency(text, mode);
        json_result(&FrequencyResponse {
            mode,
            unique: counts.unique(),
            total: counts.total(),
            counts: &counts,
        })
    }

    /// Compare two texts.
    #[tool(
        description = "Compare two texts: absolute word-count difference and the longest word they share (case-insensitive)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compare_texts(
        &self,
        Parameters(params): Parameters<CompareTextsParams>,
    ) -> Result<CallToolResult, McpError> {
        let left = params.left.as_deref().unwrap_or_default();
        let right = params.right.as_deref().unwrap_or_default();
        self.check_size(left)?;
        self.check_size(right)?;

        let report = self.engine.compare(left, right);

        tracing::info!(
            tool = "compare_texts",
            difference = report.word_count_difference,
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Snapshot of the history, oldest first.
    #[tool(description = "List recorded analysis summaries, oldest first.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_history(&self) -> Result<CallToolResult, McpError> {
        let history = self.engine.history();
        json_result(&HistoryResponse {
            capacity: history.capacity(),
            entries: history.get_all(),
        })
    }

    /// Snapshot of the statistics with a summary.
    #[tool(
        description = "List recorded word counts, oldest first, with total, min, max, and mean."
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_statistics(&self) -> Result<CallToolResult, McpError> {
        let statistics = self.engine.statistics();
        let counts = statistics.get_all();
        json_result(&StatisticsResponse {
            capacity: statistics.capacity(),
            summary: StatisticsSummary::from_counts(&counts),
            counts,
        })
    }

    /// Empty the history.
    #[tool(description = "Remove all recorded analysis summaries.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn clear_history(&self) -> Result<CallToolResult, McpError> {
        self.engine.history().clear();
        tracing::info!(tool = "clear_history", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text("history cleared")]))
    }

    /// Empty the statistics.
    #[tool(description = "Remove all recorded word counts.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn clear_statistics(&self) -> Result<CallToolResult, McpError> {
        self.engine.statistics().clear();
        tracing::info!(tool = "clear_statistics", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(
            "statistics cleared",
        )]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. analyze_text records into a bounded history and statistics log; \
                 get_history and get_statistics read them back.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use wordwise_core::EngineOptions;

    fn server() -> ProjectServer {
        server_with(EngineOptions::default(), None)
    }

    fn server_with(options: EngineOptions, max_input: Option<usize>) -> ProjectServer {
        let engine = Engine::new(options).expect("valid engine options");
        ProjectServer::new(Arc::new(engine), max_input)
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    fn analyze(server: &ProjectServer, text: &str) -> serde_json::Value {
        let result = server
            .analyze_text(Parameters(AnalyzeTextParams {
                text: Some(text.to_string()),
            }))
            .expect("analyze_text should succeed");
        extract_json(&result)
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&server());

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let result = server()
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");

        let json = extract_json(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let result = server()
            .get_info(Parameters(GetInfoParams {
                format: default_format(),
            }))
            .expect("get_info should succeed");

        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn analyze_text_reports_and_records() {
        let server = server();
        let json = analyze(&server, "Hello, world! This is a test.");

        assert_eq!(json["word_count"], 6);
        assert_eq!(json["longest_word"], "world!");

        let history = extract_json(&server.get_history().unwrap());
        assert_eq!(history["entries"][0], "words: 6, longest: 'world!'");
        let statistics = extract_json(&server.get_statistics().unwrap());
        assert_eq!(statistics["counts"], serde_json::json!([6]));
    }

    #[test]
    fn analyze_text_without_text_is_empty_and_unrecorded() {
        let server = server();
        let result = server
            .analyze_text(Parameters(AnalyzeTextParams { text: None }))
            .expect("absent text is not an error");
        let json = extract_json(&result);

        assert_eq!(json["word_count"], 0);
        assert_eq!(json["longest_word"], "");

        let history = extract_json(&server.get_history().unwrap());
        assert_eq!(history["entries"], serde_json::json!([]));
    }

    #[test]
    fn analyze_text_rejects_oversized_input() {
        let server = server_with(EngineOptions::default(), Some(4));
        let err = server
            .analyze_text(Parameters(AnalyzeTextParams {
                text: Some("far too long".to_string()),
            }))
            .unwrap_err();
        assert!(err.message.contains("input too large"));
    }

    #[test]
    fn history_evicts_oldest_at_capacity() {
        let server = server_with(
            EngineOptions {
                history_capacity: 2,
                statistics_capacity: 2,
                ..EngineOptions::default()
            },
            None,
        );
        analyze(&server, "one");
        analyze(&server, "two two");
        analyze(&server, "three three three");

        let history = extract_json(&server.get_history().unwrap());
        assert_eq!(history["capacity"], 2);
        assert_eq!(
            history["entries"],
            serde_json::json!(["words: 2, longest: 'two'", "words: 3, longest: 'three'"])
        );

        let statistics = extract_json(&server.get_statistics().unwrap());
        assert_eq!(statistics["counts"], serde_json::json!([2, 3]));
        assert_eq!(statistics["summary"]["total"], 5);
        assert_eq!(statistics["summary"]["max"], 3);
    }

    #[test]
    fn character_frequency_defaults_to_raw() {
        let result = server()
            .character_frequency(Parameters(CharacterFrequencyParams {
                text: Some("Aa a!".to_string()),
                mode: None,
            }))
            .expect("character_frequency should succeed");
        let json = extract_json(&result);

        assert_eq!(json["mode"], "raw");
        assert_eq!(json["counts"]["a"], 2);
        assert_eq!(json["counts"]["A"], 1);
        assert_eq!(json["counts"]["!"], 1);
        assert_eq!(json["total"], 4);
    }

    #[test]
    fn character_frequency_mode_override() {
        let result = server()
            .character_frequency(Parameters(CharacterFrequencyParams {
                text: Some("Aa a!".to_string()),
                mode: Some("alnum-lowercase".to_string()),
            }))
            .expect("character_frequency should succeed");
        let json = extract_json(&result);

        assert_eq!(json["counts"]["a"], 3);
        assert_eq!(json["unique"], 1);
        assert!(json["counts"].get("!").is_none());
    }

    #[test]
    fn character_frequency_rejects_unknown_mode() {
        let err = server()
            .character_frequency(Parameters(CharacterFrequencyParams {
                text: Some("abc".to_string()),
                mode: Some("vowels".to_string()),
            }))
            .unwrap_err();
        assert!(err.message.contains("vowels"));
    }

    #[test]
    fn compare_texts_finds_shared_word_without_recording() {
        let server = server();
        let result = server
            .compare_texts(Parameters(CompareTextsParams {
                left: Some("The Elephant sleeps".to_string()),
                right: Some("an elephant".to_string()),
            }))
            .expect("compare_texts should succeed");
        let json = extract_json(&result);

        assert_eq!(json["word_count_difference"], 1);
        assert_eq!(json["common_longest_word"], "Elephant");

        let history = extract_json(&server.get_history().unwrap());
        assert_eq!(history["entries"], serde_json::json!([]));
    }

    #[test]
    fn clear_tools_empty_the_stores() {
        let server = server();
        analyze(&server, "some words here");

        server.clear_history().unwrap();
        let history = extract_json(&server.get_history().unwrap());
        assert_eq!(history["entries"], serde_json::json!([]));

        let statistics = extract_json(&server.get_statistics().unwrap());
        assert_eq!(statistics["counts"], serde_json::json!([3]));

        server.clear_statistics().unwrap();
        let statistics = extract_json(&server.get_statistics().unwrap());
        assert_eq!(statistics["counts"], serde_json::json!([]));
        assert_eq!(statistics["summary"]["samples"], 0);
    }
}
