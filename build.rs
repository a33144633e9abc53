use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MINIBLOG_GIT_VERSION");

    let git_version = env::var("MINIBLOG_GIT_VERSION")
        .ok()
        .or_else(|| git(&["describe", "--tags", "--always", "--dirty"]))
        .unwrap_or_else(|| format!("v{}", env::var("CARGO_PKG_VERSION").unwrap_or_default()));
    let git_commit = git(&["rev-parse", "HEAD"]).unwrap_or_default();
    let git_tree_state = match git(&["status", "--porcelain"]) {
        Some(status) if status.is_empty() => "clean",
        Some(_) => "dirty",
        None => "",
    };
    let build_date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let rustc_version = env::var("RUSTC")
        .ok()
        .and_then(|rustc| output(Command::new(rustc).arg("--version")))
        .unwrap_or_default();

    println!("cargo:rustc-env=MINIBLOG_GIT_VERSION={git_version}");
    println!("cargo:rustc-env=MINIBLOG_GIT_COMMIT={git_commit}");
    println!("cargo:rustc-env=MINIBLOG_GIT_TREE_STATE={git_tree_state}");
    println!("cargo:rustc-env=MINIBLOG_BUILD_DATE={build_date}");
    println!("cargo:rustc-env=MINIBLOG_RUSTC_VERSION={rustc_version}");
}

fn git(args: &[&str]) -> Option<String> {
    output(Command::new("git").args(args))
}

fn output(command: &mut Command) -> Option<String> {
    let out = command.output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
