//! Remote code execution.
//!
//! Builds the execute request for a Piston-compatible service and turns
//! whatever comes back (or fails to come back) into an [`ExecutionResult`].

mod piston;

pub use piston::PistonGateway;

use serde::{Deserialize, Serialize};

use crate::config::TutorConfig;
use crate::error::GatewayError;
use crate::model::ExecutionResult;

pub const TRANSPORT_PREFIX: &str = "Hata: ";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
    pub encoding: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecuteRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
    pub compile_options: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StageOutput {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub signal: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub run: Option<StageOutput>,
    #[serde(default)]
    pub compile: Option<StageOutput>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Something that can run a program and report what happened.
///
/// Implementations never fail: transport problems come back as a
/// transport-failure result.
#[cfg(not(target_arch = "wasm32"))]
pub trait Executor: Send + Sync {
    fn execute(&self, source: &str) -> ExecutionResult;
}

pub fn build_request(config: &TutorConfig, source: &str) -> ExecuteRequest {
    ExecuteRequest {
        language: config.language.clone(),
        version: config.version.clone(),
        files: vec![SourceFile {
            name: config.file_name.clone(),
            content: source.to_string(),
            encoding: "utf8".to_string(),
        }],
        compile_options: config.compile_options.clone(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn failed(stage: &StageOutput) -> bool {
    stage.code.is_some_and(|c| c != 0) || stage.signal.is_some()
}

/// Maps a parsed service response to a run result.
pub fn map_response(resp: ExecuteResponse) -> ExecutionResult {
    let run = resp.run.unwrap_or_default();
    let compile = resp.compile.unwrap_or_default();

    let raw_output = non_empty(&run.output)
        .or_else(|| non_empty(&compile.output))
        .unwrap_or_default()
        .to_string();

    let error = non_empty(&run.stderr)
        .or_else(|| non_empty(&compile.stderr))
        .map(str::to_string)
        .or_else(|| {
            failed(&compile).then(|| {
                non_empty(&compile.output)
                    .map(str::to_string)
                    .unwrap_or_else(|| "Derleme başarısız oldu.".to_string())
            })
        })
        .or_else(|| {
            failed(&run).then(|| match (&run.code, &run.signal) {
                (_, Some(signal)) => format!("Program {signal} sinyali ile sonlandı."),
                (Some(code), None) => format!("Program {code} çıkış kodu ile sonlandı."),
                (None, None) => "Program hatalı sonlandı.".to_string(),
            })
        });

    match error {
        Some(error) => ExecutionResult::program_failure(raw_output, error),
        None => ExecutionResult::success(raw_output),
    }
}

fn parse_body(status: u16, body: &str) -> Result<ExecuteResponse, GatewayError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ExecuteResponse>(body)
            .ok()
            .and_then(|r| r.message)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });
        return Err(GatewayError::Status { status, message });
    }

    let resp: ExecuteResponse = serde_json::from_str(body)?;
    if resp.run.is_none() && resp.compile.is_none() {
        return Err(GatewayError::Status {
            status,
            message: Some(resp.message.unwrap_or_else(|| "yanıtta çalışma sonucu yok".into())),
        });
    }
    Ok(resp)
}

/// Interprets an HTTP status and body from the service.
pub fn interpret_response(status: u16, body: &str) -> ExecutionResult {
    match parse_body(status, body) {
        Ok(resp) => map_response(resp),
        Err(err) => transport_failure(&err),
    }
}

pub fn transport_failure(err: &GatewayError) -> ExecutionResult {
    log::warn!("execution request failed: {err}");
    ExecutionResult::transport_failure(format!("{TRANSPORT_PREFIX}{err}"))
}
