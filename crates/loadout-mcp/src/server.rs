use std::io::{self, BufRead, Read, Write};
use std::time::Instant;

use loadout_fuzzy::{Label, DEFAULT_CENTROID_SAMPLES};
use loadout_rank::{
    build_registry, EngineConfig, InputBounds, LoadoutError, Registry, Score, SweepAxis,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR,
};

const DEFAULT_MCP_PROTOCOL_VERSION: &str = "2024-11-05";
/// Largest `Content-Length` body accepted on stdio.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

pub struct LoadoutServer {
    registry: Registry,
    bounds: InputBounds,
    centroid_samples: usize,
}

#[derive(Debug, Deserialize)]
struct ToolsCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RankInput {
    distance: f64,
    ammo: f64,
}

#[derive(Debug, Deserialize)]
struct EvaluateInput {
    candidate: String,
    distance: f64,
    ammo: f64,
    #[serde(default)]
    include_curve: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SweepInput {
    candidate: String,
    vary: SweepAxis,
    fixed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatesInput {
    #[serde(default)]
    include_rules: Option<bool>,
}

impl LoadoutServer {
    pub fn new(config: &EngineConfig) -> Result<Self, LoadoutError> {
        let registry = build_registry(config)?;
        Ok(Self {
            registry,
            bounds: config.input_bounds,
            centroid_samples: config.centroid_samples,
        })
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.id.is_none();
        if request.jsonrpc != "2.0" {
            if is_notification {
                tracing::warn!(method = %request.method, "dropping notification with bad jsonrpc version");
                return None;
            }
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "invalid jsonrpc version",
            ));
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        if is_notification && request.method.starts_with("notifications/") {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_MCP_PROTOCOL_VERSION);
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": {"name": "loadout-mcp", "version": env!("CARGO_PKG_VERSION")},
                        "capabilities": {
                            "tools": {
                                "listChanged": false
                            }
                        }
                    }),
                )
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.tools_list_result()),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "method not found"),
        };

        Some(response)
    }

    fn tools_list_result(&self) -> Value {
        json!({
            "tools": [
                {
                    "name": "loadout_rank",
                    "description": "Score every weapon for a target distance and ammo level and recommend the best one.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "distance": {"type": "number", "minimum": self.bounds.min, "maximum": self.bounds.max},
                            "ammo": {"type": "number", "minimum": self.bounds.min, "maximum": self.bounds.max}
                        },
                        "required": ["distance", "ammo"]
                    }
                },
                {
                    "name": "loadout_evaluate",
                    "description": "Explain one weapon's score: memberships, rule firings, aggregated output and optional output curve.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "candidate": {"type": "string"},
                            "distance": {"type": "number"},
                            "ammo": {"type": "number"},
                            "include_curve": {"type": "boolean"}
                        },
                        "required": ["candidate", "distance", "ammo"]
                    }
                },
                {
                    "name": "loadout_sweep",
                    "description": "Desirability of one weapon while one input steps over 1..=100 and the other stays fixed.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "candidate": {"type": "string"},
                            "vary": {"type": "string", "enum": ["distance", "ammo"]},
                            "fixed": {"type": "number"}
                        },
                        "required": ["candidate", "vary", "fixed"]
                    }
                },
                {
                    "name": "loadout_candidates",
                    "description": "List registered weapons in registration order.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "include_rules": {"type": "boolean"}
                        }
                    }
                }
            ]
        })
    }

    fn handle_tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let parsed: ToolsCallParams = match serde_json::from_value(params) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {err}"));
            }
        };

        let start = Instant::now();
        let response = match parsed.name.as_str() {
            "loadout_rank" => self.exec_rank(id, parsed.arguments),
            "loadout_evaluate" => self.exec_evaluate(id, parsed.arguments),
            "loadout_sweep" => self.exec_sweep(id, parsed.arguments),
            "loadout_candidates" => self.exec_candidates(id, parsed.arguments),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "unknown tool"),
        };
        tracing::debug!(
            tool = %parsed.name,
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            is_error = response.error.is_some(),
            "tool call finished"
        );
        response
    }

    fn exec_rank(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: RankInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let (distance, ammo) = match self.clamp_pair(args.distance, args.ammo) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };

        let ranking = self.registry.rank(distance, ammo);
        let entries = ranking
            .entries
            .iter()
            .enumerate()
            .map(|(idx, score)| {
                let profile = self
                    .registry
                    .get(score.candidate)
                    .map(|e| e.profile().display_name)
                    .unwrap_or(score.candidate);
                json!({
                    "rank": idx + 1,
                    "candidate": score.candidate,
                    "display_name": profile,
                    "desirability": score.desirability,
                    "band": score.band(),
                })
            })
            .collect::<Vec<_>>();
        let summary = ranking
            .entries
            .iter()
            .map(|score| format!("{}={:.2}", score.candidate, score.desirability))
            .collect::<Vec<_>>()
            .join(", ");

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!(
                            "recommended={}, scores: {}",
                            ranking.recommended_id().unwrap_or("none"),
                            summary
                        )
                    }
                ],
                "structuredContent": {
                    "distance": distance,
                    "ammo": ammo,
                    "recommendation": ranking.recommended_id(),
                    "ranking": entries
                }
            }),
        )
    }

    fn exec_evaluate(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: EvaluateInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let (distance, ammo) = match self.clamp_pair(args.distance, args.ammo) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let evaluator = match self.registry.get(&args.candidate) {
            Ok(v) => v,
            Err(err) => return JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
        };

        let score = evaluator.evaluate(distance, ammo);
        let curve = if args.include_curve.unwrap_or(false) {
            json!(score.curve_points(DEFAULT_CENTROID_SAMPLES))
        } else {
            Value::Null
        };

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!(
                            "{} desirability={:.2} ({})",
                            score.candidate,
                            score.desirability,
                            score.band().as_str()
                        )
                    }
                ],
                "structuredContent": score_payload(&score, distance, ammo, curve)
            }),
        )
    }

    fn exec_sweep(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: SweepInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let fixed = match self.bounds.clamp(args.fixed) {
            Some(v) => v,
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "fixed must be finite"),
        };
        let evaluator = match self.registry.get(&args.candidate) {
            Ok(v) => v,
            Err(err) => return JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
        };

        let points = evaluator.sweep(args.vary, fixed);
        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!("{} points for {}", points.len(), evaluator.id())
                    }
                ],
                "structuredContent": {
                    "candidate": evaluator.id(),
                    "vary": args.vary,
                    "fixed": fixed,
                    "points": points
                }
            }),
        )
    }

    fn exec_candidates(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: CandidatesInput = match parse_args_optional(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let include_rules = args.include_rules.unwrap_or(false);

        let candidates = self
            .registry
            .evaluators()
            .iter()
            .map(|evaluator| {
                let profile = evaluator.profile();
                let rules = if include_rules {
                    json!(evaluator
                        .rules()
                        .rules()
                        .iter()
                        .map(|rule| json!({
                            "rule": rule.description,
                            "conclusion": rule.conclusion.name()
                        }))
                        .collect::<Vec<_>>())
                } else {
                    Value::Null
                };
                json!({
                    "id": evaluator.id(),
                    "display_name": profile.display_name,
                    "effective_range": profile.effective_range,
                    "ammo_dependency": profile.ammo_dependency,
                    "rules": rules
                })
            })
            .collect::<Vec<_>>();

        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!("{} candidates registered", candidates.len())
                    }
                ],
                "structuredContent": {
                    "centroid_samples": self.centroid_samples,
                    "input_bounds": self.bounds,
                    "candidates": candidates
                }
            }),
        )
    }

    fn clamp_pair(&self, distance: f64, ammo: f64) -> Result<(f64, f64), JsonRpcResponse> {
        match (self.bounds.clamp(distance), self.bounds.clamp(ammo)) {
            (Some(d), Some(a)) => Ok((d, a)),
            _ => Err(JsonRpcResponse::error(
                Value::Null,
                INVALID_PARAMS,
                "distance and ammo must be finite numbers",
            )),
        }
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut reader = io::BufReader::new(stdin.lock());
        let mut stdout = io::stdout();
        let mut line = String::new();
        tracing::info!(candidates = self.registry.len(), "loadout-mcp serving stdio");

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            let trimmed = line.trim_end_matches(['\r', '\n']).trim_start();
            if trimmed.is_empty() {
                continue;
            }

            let (payload, frame) = if is_stdio_header_line(trimmed) {
                let content_length = match read_stdio_content_length(&mut reader, trimmed) {
                    Ok(v) => v,
                    Err(err) => {
                        tracing::warn!(error = %err, "invalid stdio frame");
                        let response = JsonRpcResponse::error(
                            Value::Null,
                            PARSE_ERROR,
                            format!("invalid stdio frame: {err}"),
                        );
                        write_stdio_response(&mut stdout, &response, StdioFrame::ContentLength)?;
                        continue;
                    }
                };

                let mut body = vec![0_u8; content_length];
                if let Err(err) = reader.read_exact(&mut body) {
                    tracing::warn!(error = %err, "invalid stdio frame body");
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("invalid stdio frame body: {err}"),
                    );
                    write_stdio_response(&mut stdout, &response, StdioFrame::ContentLength)?;
                    continue;
                }
                (body, StdioFrame::ContentLength)
            } else {
                (trimmed.as_bytes().to_vec(), StdioFrame::LineDelimited)
            };

            let request: JsonRpcRequest = match serde_json::from_slice(&payload) {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(error = %err, "unparseable request");
                    let response =
                        JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("parse error: {err}"));
                    write_stdio_response(&mut stdout, &response, frame)?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(request) {
                write_stdio_response(&mut stdout, &response, frame)?;
            }
        }

        tracing::info!("stdin closed, loadout-mcp exiting");
        Ok(())
    }
}

fn score_payload(score: &Score, distance: f64, ammo: f64, curve: Value) -> Value {
    json!({
        "candidate": score.candidate,
        "distance": distance,
        "ammo": ammo,
        "desirability": score.desirability,
        "band": score.band(),
        "memberships": {
            "distance": score.distance,
            "ammo": score.ammo
        },
        "dominant": {
            "distance": score.distance.dominant().map(|(label, _)| label.name()),
            "ammo": score.ammo.dominant().map(|(label, _)| label.name())
        },
        "aggregated": score.aggregated(),
        "firings": score.firings,
        "curve": curve
    })
}

#[derive(Debug, Clone, Copy)]
enum StdioFrame {
    LineDelimited,
    ContentLength,
}

fn write_stdio_response(
    stdout: &mut io::Stdout,
    response: &JsonRpcResponse,
    frame: StdioFrame,
) -> io::Result<()> {
    match frame {
        StdioFrame::LineDelimited => {
            let serialized = serde_json::to_string(response)?;
            writeln!(stdout, "{serialized}")?;
        }
        StdioFrame::ContentLength => {
            let serialized = serde_json::to_vec(response)?;
            write!(stdout, "Content-Length: {}\r\n\r\n", serialized.len())?;
            stdout.write_all(&serialized)?;
        }
    }
    stdout.flush()
}

fn is_stdio_header_line(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.starts_with("content-length:") || lower.starts_with("content-type:")
}

fn read_stdio_content_length<R: BufRead>(reader: &mut R, first_line: &str) -> io::Result<usize> {
    let mut content_length = parse_content_length(first_line);
    let mut header_line = String::new();
    loop {
        header_line.clear();
        if reader.read_line(&mut header_line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected eof while reading frame headers",
            ));
        }
        let trimmed = header_line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(v) = parse_content_length(trimmed) {
            content_length = Some(v);
        }
    }
    let content_length = content_length
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "missing content-length header"))?;
    if content_length > MAX_FRAME_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame of {content_length} bytes exceeds {MAX_FRAME_BYTES}"),
        ));
    }
    Ok(content_length)
}

fn parse_content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

fn parse_args<T: for<'de> Deserialize<'de>>(
    arguments: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    let args = match arguments {
        Some(v) => v,
        None => {
            return Err(JsonRpcResponse::error(
                Value::Null,
                INVALID_PARAMS,
                "missing tool arguments",
            ))
        }
    };

    serde_json::from_value(args).map_err(|err| {
        JsonRpcResponse::error(
            Value::Null,
            INVALID_PARAMS,
            format!("invalid tool arguments: {err}"),
        )
    })
}

fn parse_args_optional<T: for<'de> Deserialize<'de> + Default>(
    arguments: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    match arguments {
        Some(Value::Null) | None => Ok(T::default()),
        Some(v) => serde_json::from_value(v).map_err(|err| {
            JsonRpcResponse::error(
                Value::Null,
                INVALID_PARAMS,
                format!("invalid tool arguments: {err}"),
            )
        }),
    }
}
