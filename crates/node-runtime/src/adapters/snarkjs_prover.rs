//! `ProofGenerator` that shells out to the `snarkjs` CLI.
//!
//! ```text
//! input.json ──groth16 fullprove──→ proof.json + public.json
//!                                         │
//!                    zkey export soliditycalldata (stdout)
//!                                         ↓
//!                                   ProofCalldata
//! ```
//!
//! Each proof runs in its own temporary directory, removed on drop.

use crate::container::config::ProverConfig;
use async_trait::async_trait;
use pn_02_idea_minting::{CircuitInput, ProofCalldata, ProofError, ProofGenerator};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

pub struct SnarkjsProver {
    config: ProverConfig,
}

impl SnarkjsProver {
    pub fn new(config: ProverConfig) -> Self {
        Self { config }
    }

    /// Fails when a proving artifact is missing.
    pub fn check_artifacts(&self) -> Result<(), ProofError> {
        for path in [&self.config.wasm_path, &self.config.zkey_path] {
            if !path.is_file() {
                return Err(ProofError::Artifact(format!(
                    "{} not found",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    async fn run<I, S>(&self, args: I) -> Result<String, ProofError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.config.snarkjs_bin)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ProofError::Prover(format!(
                    "failed to run {}: {}",
                    self.config.snarkjs_bin.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(ProofError::Prover(format!(
                "snarkjs exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ProofGenerator for SnarkjsProver {
    async fn prove(&self, input: &CircuitInput) -> Result<ProofCalldata, ProofError> {
        self.check_artifacts()?;
        let started = Instant::now();

        let workdir = tempfile::tempdir()
            .map_err(|e| ProofError::Prover(format!("temp dir: {}", e)))?;
        let input_path = workdir.path().join("input.json");
        let proof_path = workdir.path().join("proof.json");
        let public_path = workdir.path().join("public.json");

        tokio::fs::write(&input_path, input.to_json())
            .await
            .map_err(|e| ProofError::Prover(format!("write input: {}", e)))?;

        let paths: [&Path; 5] = [
            input_path.as_path(),
            self.config.wasm_path.as_path(),
            self.config.zkey_path.as_path(),
            proof_path.as_path(),
            public_path.as_path(),
        ];
        let mut fullprove: Vec<&OsStr> = vec![OsStr::new("groth16"), OsStr::new("fullprove")];
        fullprove.extend(paths.iter().map(|p| p.as_os_str()));
        self.run(fullprove).await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[runtime] witness and proof generated"
        );

        let calldata = self
            .run([
                OsStr::new("zkey"),
                OsStr::new("export"),
                OsStr::new("soliditycalldata"),
                public_path.as_os_str(),
                proof_path.as_os_str(),
            ])
            .await?;
        let calldata = ProofCalldata::from_solidity_calldata(&calldata)?;

        info!(
            fingerprint = %calldata.fingerprint(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[runtime] proof ready"
        );
        Ok(calldata)
    }
}
