//! Subprocess resolver.
//!
//! Launches the node binary and scans its merged stdout/stderr for the
//! identity line. The child is killed and reaped on every exit path.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use gp_01_staker_store::KeyMaterial;
use shared_types::NodeId;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Split};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

use crate::domain::config::ResolverConfig;
use crate::domain::errors::ResolveError;
use crate::domain::matcher::extract_node_id;
use crate::ports::IdentityResolver;

/// Resolves identities by running the node software.
#[derive(Debug, Clone)]
pub struct SubprocessResolver {
    config: ResolverConfig,
}

impl SubprocessResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn command(&self, key: &KeyMaterial) -> Command {
        let mut cmd = Command::new(&self.config.node_binary);
        cmd.arg("--staking-tls-key-file")
            .arg(&key.key_path)
            .arg("--staking-tls-cert-file")
            .arg(&key.cert_path)
            .args(&self.config.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Resolve with an explicit deadline.
    pub async fn resolve_with_timeout(
        &self,
        key: &KeyMaterial,
        timeout: Duration,
    ) -> Result<NodeId, ResolveError> {
        for path in [&key.key_path, &key.cert_path] {
            if !path.is_file() {
                return Err(ResolveError::KeyMaterialMissing(path.clone()));
            }
        }

        let binary = &self.config.node_binary;
        let mut child = self.command(key).spawn().map_err(|source| ResolveError::Spawn {
            binary: binary.clone(),
            source,
        })?;
        debug!(
            "[gp-02] launched {} (pid {:?}) for {}",
            binary.display(),
            child.id(),
            key.key_path.display()
        );

        let result = match tokio::time::timeout(timeout, scan_output(&mut child)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "[gp-02] no identity from {} within {:?}",
                    key.key_path.display(),
                    timeout
                );
                Err(ResolveError::Timeout(timeout))
            }
        };

        terminate(&mut child, binary).await;
        result
    }
}

#[async_trait]
impl IdentityResolver for SubprocessResolver {
    async fn resolve(&self, key: &KeyMaterial) -> Result<NodeId, ResolveError> {
        self.resolve_with_timeout(key, self.config.timeout()).await
    }
}

async fn next_line<R: AsyncRead + Unpin>(
    stream: &mut Option<Split<BufReader<R>>>,
) -> std::io::Result<Option<String>> {
    match stream {
        Some(split) => Ok(split
            .next_segment()
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())),
        None => std::future::pending().await,
    }
}

/// Read both pipes line by line until the identity shows up or both close.
async fn scan_output(child: &mut Child) -> Result<NodeId, ResolveError> {
    let mut stdout = child
        .stdout
        .take()
        .map(|s| BufReader::new(s).split(b'\n'));
    let mut stderr = child
        .stderr
        .take()
        .map(|s| BufReader::new(s).split(b'\n'));

    while stdout.is_some() || stderr.is_some() {
        let (line, from_stdout) = tokio::select! {
            line = next_line(&mut stdout) => (line?, true),
            line = next_line(&mut stderr) => (line?, false),
        };

        let Some(line) = line else {
            if from_stdout {
                stdout = None;
            } else {
                stderr = None;
            }
            continue;
        };

        match extract_node_id(&line) {
            Some(text) => {
                return text.parse().map_err(|source| ResolveError::Malformed {
                    text: text.to_string(),
                    source,
                });
            }
            None => trace!("[gp-02] {}", line.trim_end()),
        }
    }

    Err(ResolveError::NoIdentity)
}

async fn terminate(child: &mut Child, binary: &Path) {
    if let Err(e) = child.start_kill() {
        // Already exited
        trace!("[gp-02] kill {}: {}", binary.display(), e);
    }
    match child.wait().await {
        Ok(status) => trace!("[gp-02] {} exited: {}", binary.display(), status),
        Err(e) => warn!("[gp-02] failed to reap {}: {}", binary.display(), e),
    }
}
