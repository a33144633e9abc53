//! 로거 초기화
//!
//! `log` 파사드 위에 `env_logger`를 설치합니다. 레벨은 [`LogOptions`]가 기본값을
//! 정하고, `RUST_LOG`가 있으면 그 필터가 덧붙여집니다.
//!
//! 요청 단위 필드는 `log`의 key-value 문법으로 남깁니다.
//!
//! ```rust,ignore
//! log::info!(request_id = ctx.request_id(); "Create user function called");
//! ```
//!
//! - console: `2024-05-01 12:00:00.000\tINFO\tsrc/handlers/users.rs:42\tmessage\t{"request_id":"..."}`
//! - json: `{"level":"info","timestamp":"...","caller":"...","message":"...","request_id":"..."}`

use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::kv::{self, Key, Value, VisitSource};
use log::{Record, SetLoggerError};
use serde_json::{Map, Value as JsonValue};

use crate::config::{LogFormat, LogOptions, LogOutput};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 전역 로거를 설치합니다.
///
/// 이미 로거가 설치되어 있으면 에러를 반환하며 기존 로거는 그대로 유지됩니다.
pub fn init(options: &LogOptions) -> Result<(), SetLoggerError> {
    builder(options).try_init()
}

/// 옵션에 맞게 구성된 `env_logger` 빌더
pub fn builder(options: &LogOptions) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(options.level_filter())
        .parse_env(Env::default())
        .target(match options.output {
            LogOutput::Stdout => Target::Stdout,
            LogOutput::Stderr => Target::Stderr,
        });

    let format = options.format;
    let with_caller = !options.disable_caller;
    builder.format(move |buf, record| {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        writeln!(buf, "{}", render(format, with_caller, &timestamp, record))
    });

    builder
}

/// 로그 레코드 한 건을 한 줄 문자열로 만듭니다.
pub fn render(format: LogFormat, with_caller: bool, timestamp: &str, record: &Record) -> String {
    let fields = collect_fields(record);
    let caller = if with_caller { caller_of(record) } else { None };

    match format {
        LogFormat::Console => {
            let mut line = format!("{}\t{}", timestamp, record.level());
            if let Some(caller) = caller {
                line.push('\t');
                line.push_str(&caller);
            }
            line.push('\t');
            line.push_str(&record.args().to_string());
            if !fields.is_empty() {
                line.push('\t');
                line.push_str(&JsonValue::Object(fields).to_string());
            }
            line
        }
        LogFormat::Json => {
            let mut object = Map::new();
            object.insert(
                "level".to_string(),
                JsonValue::from(record.level().as_str().to_lowercase()),
            );
            object.insert("timestamp".to_string(), JsonValue::from(timestamp));
            if let Some(caller) = caller {
                object.insert("caller".to_string(), JsonValue::from(caller));
            }
            object.insert("message".to_string(), JsonValue::from(record.args().to_string()));
            object.extend(fields);
            JsonValue::Object(object).to_string()
        }
    }
}

fn caller_of(record: &Record) -> Option<String> {
    let file = record.file()?;
    Some(match record.line() {
        Some(line) => format!("{}:{}", file, line),
        None => file.to_string(),
    })
}

fn collect_fields(record: &Record) -> Map<String, JsonValue> {
    let mut collector = FieldCollector(Map::new());
    // 방문자는 실패하지 않는다
    let _ = record.key_values().visit(&mut collector);
    collector.0
}

struct FieldCollector(Map<String, JsonValue>);

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.0
            .insert(key.as_str().to_string(), JsonValue::from(value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    const TS: &str = "2024-05-01 12:00:00.000";

    fn render_sample(format: LogFormat, with_caller: bool) -> String {
        let kvs = [("request_id", "abc-123")];
        render(
            format,
            with_caller,
            TS,
            &Record::builder()
                .args(format_args!("Create user function called"))
                .level(Level::Info)
                .file(Some("src/handlers/users.rs"))
                .line(Some(42))
                .key_values(&kvs)
                .build(),
        )
    }

    #[test]
    fn test_console_line() {
        assert_eq!(
            render_sample(LogFormat::Console, true),
            "2024-05-01 12:00:00.000\tINFO\tsrc/handlers/users.rs:42\tCreate user function called\t{\"request_id\":\"abc-123\"}"
        );
    }

    #[test]
    fn test_json_line_has_fields() {
        let parsed: JsonValue = serde_json::from_str(&render_sample(LogFormat::Json, true)).unwrap();

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["timestamp"], TS);
        assert_eq!(parsed["caller"], "src/handlers/users.rs:42");
        assert_eq!(parsed["message"], "Create user function called");
        assert_eq!(parsed["request_id"], "abc-123");
    }

    #[test]
    fn test_disable_caller_omits_location() {
        assert!(!render_sample(LogFormat::Console, false).contains("users.rs"));

        let parsed: JsonValue = serde_json::from_str(&render_sample(LogFormat::Json, false)).unwrap();
        assert!(parsed.get("caller").is_none());
    }

    #[test]
    fn test_record_without_fields() {
        let line = render(
            LogFormat::Console,
            true,
            TS,
            &Record::builder()
                .args(format_args!("server stopped"))
                .level(Level::Warn)
                .build(),
        );

        assert_eq!(line, format!("{TS}\tWARN\tserver stopped"));
    }
}
