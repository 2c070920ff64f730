//! Demo workload: a few concurrent jobs that log over each other.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use chrono::Local;
use futures_util::future::{join_all, BoxFuture, FutureExt};
use serde_json::{json, Value};
use tokio::process::Command;
use tokio::time::sleep;

use logweave::pipeline::log_prefix;
use logweave::process::{run, run_shell, AuditedCommand, ProcessError, RunOptions};
use logweave::style::{lg, lg_path, Color, Format};

type Job = BoxFuture<'static, Result<(), ProcessError>>;

fn demo_config() -> Value {
    json!({
        "config": {
            "inner_config": {
                "innest_config": {
                    "values": {
                        "a": 1,
                        "b": 2,
                        "c": "Nobody remembers why the config is nested this deeply. \
                              There is a comment about it, and the comment asks the same question.",
                    }
                }
            }
        }
    })
}

/// A file name crafted to look like a second log line once printed raw.
fn evil_filename() -> String {
    format!(
        "lib/logweave/foobar.txt: No such file or directory\n{}      DEBUG: some_other_file.txt",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

pub async fn do_stuff(better_subprocess: bool) {
    tracing::info!(
        "Loaded config from {}",
        lg_path(Path::new("/etc/mnt/var/usr/share/lib.conf"))
    );
    tracing::debug!(
        "Using config: {}",
        Format::default().dimmed().italic().apply(demo_config())
    );
    tracing::info!("Initializing the system at {}...", lg(&Local::now()));
    sleep(Duration::from_secs(1)).await;
    tracing::debug!(
        "Finished {}",
        Format::color(Color::Magenta)
            .apply("<that one step that takes several seconds for some reason>")
    );

    tracing::info!("Starting jobs...");
    let grep_job: Job = if better_subprocess {
        grep_streamed().boxed()
    } else {
        grep_buffered().boxed()
    };
    let jobs: Vec<(&str, Job)> = vec![
        ("numbers", numbers().boxed()),
        ("grep", grep_job),
        ("useful_work", useful_work().boxed()),
        ("complex_shell", complex_shell().boxed()),
    ];

    join_all(jobs.into_iter().map(|(name, job)| run_job(name, job))).await;
}

async fn run_job(name: &str, job: Job) {
    log_prefix(format!("[{name}] "), async move {
        if let Err(e) = job.await {
            tracing::warn!("Job failed: {}", e);
        }
    })
    .await;
}

async fn numbers() -> Result<(), ProcessError> {
    sleep(Duration::from_millis(400)).await;
    for n in 1..=5 {
        sleep(Duration::from_millis(200)).await;
        tracing::info!("{}", n);
    }
    Ok(())
}

async fn grep_buffered() -> Result<(), ProcessError> {
    let mut command = Command::new("grep");
    command
        .arg("foobar")
        .arg(evil_filename())
        .current_dir("/usr/local")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = command
        .spawn_audited()
        .map_err(|source| ProcessError::Spawn {
            program: "grep".to_string(),
            source,
        })?;
    let output = child.wait_with_output().await.map_err(ProcessError::Wait)?;

    // ... do something with stdout ...
    if !output.status.success() {
        tracing::warn!("stderr: {}", String::from_utf8_lossy(&output.stderr));
    }
    Ok(())
}

async fn grep_streamed() -> Result<(), ProcessError> {
    sleep(Duration::from_millis(100)).await;
    let filename = evil_filename();
    run(
        ["grep", "foobar", filename.as_str()],
        &RunOptions::default().cwd("/usr/local"),
    )
    .await?;
    Ok(())
}

async fn useful_work() -> Result<(), ProcessError> {
    tracing::info!("Starting to do some useful work!");
    sleep(Duration::from_millis(300)).await;
    tracing::info!("Almost done doing useful work!");
    sleep(Duration::from_millis(1200)).await;
    tracing::info!("Done!");
    Ok(())
}

async fn complex_shell() -> Result<(), ProcessError> {
    run_shell("ssh -n git@github.com | cat -n", &RunOptions::default()).await?;
    Ok(())
}
