//! 빌드 정보
//!
//! 값은 `build.rs`가 컴파일 시점에 채웁니다. `MINIBLOG_GIT_VERSION` 환경 변수로
//! 릴리스 버전을 고정할 수 있고, 없으면 `git describe` 결과를 사용합니다.

use std::fmt;

use serde::Serialize;

/// 바이너리가 어떤 코드로 빌드되었는지 나타내는 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub git_version: &'static str,
    pub git_commit: &'static str,
    /// `clean` 또는 `dirty`. git 저장소 밖에서 빌드하면 비어 있습니다.
    pub git_tree_state: &'static str,
    /// ISO8601 UTC 빌드 시각
    pub build_date: &'static str,
    pub rustc_version: &'static str,
    pub compiler: &'static str,
    pub platform: String,
}

pub fn get() -> Info {
    Info {
        git_version: env!("MINIBLOG_GIT_VERSION"),
        git_commit: env!("MINIBLOG_GIT_COMMIT"),
        git_tree_state: env!("MINIBLOG_GIT_TREE_STATE"),
        build_date: env!("MINIBLOG_BUILD_DATE"),
        rustc_version: env!("MINIBLOG_RUSTC_VERSION"),
        compiler: "rustc",
        platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
    }
}

impl Info {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.git_version.to_string())
    }

    fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("gitVersion:", self.git_version),
            ("gitCommit:", self.git_commit),
            ("gitTreeState:", self.git_tree_state),
            ("buildDate:", self.build_date),
            ("rustcVersion:", self.rustc_version),
            ("compiler:", self.compiler),
            ("platform:", &self.platform),
        ]
    }
}

/// 라벨을 오른쪽 정렬한 표 형식
impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>width$} {}", label, value, width = width)?;
        }
        Ok(())
    }
}
