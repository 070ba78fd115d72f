// Copyright 2022 Aztec
// Copyright 2025 Horizen Labs, Inc.
// SPDX-License-Identifier: Apache-2.0 or MIT

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Accept/reject scenarios against a verifier.
//!
//! A scenario proves a known-satisfying witness, encodes the prover's calldata
//! export and expects the verifier to accept it. It then hands a fresh verifier
//! the scheme's all-zero argument list and expects a rejection. Prover and
//! verifier are injected, so the same scenarios run against deployed contracts
//! or in-process stand-ins.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, instrument};

use crate::{
    constants::{
        ARTIFACTS_ROOT_ENV, DEFAULT_ARTIFACTS_ROOT, PLONK_ARTIFACTS_SUBDIR, PROVING_KEY_FILE,
    },
    errors::{CalldataError, ProofFormatError},
    groth16::Groth16Calldata,
    key::VerificationKey,
    normalize::{normalize, ProofValue},
    verifier::NativeGroth16Verifier,
    FieldElement, Scheme, SchemeEncoder,
};

/// Error type of the injected collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Named witness values handed to the prover, e.g. `{"a": "1", "b": "2"}`.
pub type WitnessInputs = Map<String, Value>;

/// Paths of the compiled circuit and proving key for one circuit and scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitArtifacts {
    pub circuit: String,
    pub wasm: PathBuf,
    pub zkey: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub artifacts_root: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            artifacts_root: PathBuf::from(DEFAULT_ARTIFACTS_ROOT),
        }
    }
}

impl HarnessConfig {
    /// Default configuration, with the artifacts root taken from
    /// `SNARK_CALLDATA_CIRCUITS` when set.
    pub fn from_env() -> Self {
        match std::env::var_os(ARTIFACTS_ROOT_ENV) {
            Some(root) => Self::default().with_artifacts_root(root),
            None => Self::default(),
        }
    }

    pub fn with_artifacts_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.artifacts_root = root.into();
        self
    }

    /// Locates `<root>/<dir>[/_plonk]/<circuit>_js/<circuit>.wasm` and the
    /// `circuit_final.zkey` next to it.
    pub fn artifacts(&self, dir: &str, circuit: &str, scheme: Scheme) -> CircuitArtifacts {
        let mut base = self.artifacts_root.join(dir);
        if scheme == Scheme::Plonk {
            base.push(PLONK_ARTIFACTS_SUBDIR);
        }
        CircuitArtifacts {
            circuit: circuit.to_string(),
            wasm: base
                .join(format!("{circuit}_js"))
                .join(format!("{circuit}.wasm")),
            zkey: base.join(PROVING_KEY_FILE),
        }
    }
}

impl CircuitArtifacts {
    pub fn wasm(&self) -> &Path {
        &self.wasm
    }

    pub fn zkey(&self) -> &Path {
        &self.zkey
    }
}

/// Raw prover output, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProverOutput {
    pub proof: Value,
    pub public_signals: Value,
}

/// The external prover: `fullProve` and `exportSolidityCallData`.
#[async_trait]
pub trait ProofGenerator: Send + Sync {
    async fn full_prove(
        &self,
        witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput, BoxError>;

    async fn export_solidity_calldata(
        &self,
        proof: &ProofValue,
        public_signals: &ProofValue,
    ) -> Result<String, BoxError>;
}

/// A verifier's read-only `verifyProof` entry point taking arguments `A`.
#[async_trait]
pub trait VerifierClient<A: Sync + ?Sized>: Send + Sync {
    async fn verify_proof(&self, arguments: &A) -> Result<bool, BoxError>;
}

/// Hands out a fresh verifier instance for every scenario case.
#[async_trait]
pub trait VerifierFactory: Send + Sync {
    type Verifier: Send + Sync;

    async fn deploy(&self) -> Result<Self::Verifier, BoxError>;
}

#[async_trait]
impl VerifierClient<Groth16Calldata> for NativeGroth16Verifier {
    async fn verify_proof(&self, arguments: &Groth16Calldata) -> Result<bool, BoxError> {
        Ok(NativeGroth16Verifier::verify_proof(self, arguments)?)
    }
}

/// Deploys in-process Groth16 verifiers for a fixed key.
#[derive(Debug, Clone)]
pub struct NativeVerifierFactory {
    vk: VerificationKey,
}

impl NativeVerifierFactory {
    pub fn new(vk: VerificationKey) -> Self {
        Self { vk }
    }
}

#[async_trait]
impl VerifierFactory for NativeVerifierFactory {
    type Verifier = NativeGroth16Verifier;

    async fn deploy(&self) -> Result<NativeGroth16Verifier, BoxError> {
        Ok(NativeGroth16Verifier::new(self.vk.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioCase {
    Accept,
    Reject,
}

impl ScenarioCase {
    pub fn expected(&self) -> bool {
        matches!(self, ScenarioCase::Accept)
    }
}

impl fmt::Display for ScenarioCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioCase::Accept => write!(f, "accept"),
            ScenarioCase::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum HarnessError {
    #[snafu(display("Deploying a {scheme} verifier failed"))]
    Deploy { scheme: Scheme, source: BoxError },
    #[snafu(display("Proving circuit {circuit} failed"))]
    Prover { circuit: String, source: BoxError },
    #[snafu(display("Invalid {scheme} prover output"))]
    ProofFormat {
        scheme: Scheme,
        source: ProofFormatError,
    },
    #[snafu(display("Exporting {scheme} calldata failed"))]
    Export { scheme: Scheme, source: BoxError },
    #[snafu(display("Malformed {scheme} calldata"))]
    Encoding {
        scheme: Scheme,
        source: CalldataError,
    },
    #[snafu(display("Invoking the {scheme} verifier in the {case} case failed"))]
    Verifier {
        scheme: Scheme,
        case: ScenarioCase,
        source: BoxError,
    },
    #[snafu(display(
        "The {case} case of {scheme} expected {expected} but the verifier returned {actual}"
    ))]
    UnexpectedOutcome {
        scheme: Scheme,
        case: ScenarioCase,
        expected: bool,
        actual: bool,
    },
}

/// A proof turned into verifier arguments.
#[derive(Debug, Clone)]
pub struct EncodedProof<A> {
    pub public_signals: Vec<FieldElement>,
    pub arguments: A,
}

/// What a scenario observed. Only produced when both cases went as expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub scheme: Scheme,
    pub circuit: String,
    pub public_signals: Vec<FieldElement>,
    pub accepted: bool,
    pub rejected: bool,
}

pub struct VerificationHarness<P> {
    prover: P,
}

impl<P: ProofGenerator> VerificationHarness<P> {
    pub fn new(prover: P) -> Self {
        Self { prover }
    }

    /// Proves `witness`, normalizes the output, exports it as calldata and
    /// encodes it for scheme `E`. Prover failures surface before any encoding.
    #[instrument(skip_all, fields(scheme = %E::SCHEME, circuit = %artifacts.circuit))]
    pub async fn prove_and_encode<E: SchemeEncoder>(
        &self,
        witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<EncodedProof<E::Arguments>, HarnessError> {
        let output = self
            .prover
            .full_prove(witness, artifacts)
            .await
            .context(ProverSnafu {
                circuit: artifacts.circuit.clone(),
            })?;
        debug!(proof = %output.proof, public_signals = %output.public_signals, "prover output");

        let proof = normalize(&output.proof);
        let public_signals = normalize(&output.public_signals);
        let signals = public_signals
            .field_elements("publicSignals")
            .context(ProofFormatSnafu { scheme: E::SCHEME })?;

        let calldata = self
            .prover
            .export_solidity_calldata(&proof, &public_signals)
            .await
            .context(ExportSnafu { scheme: E::SCHEME })?;
        debug!(calldata = %calldata, "exported calldata");

        let arguments = E::encode(&calldata).context(EncodingSnafu { scheme: E::SCHEME })?;

        Ok(EncodedProof {
            public_signals: signals,
            arguments,
        })
    }

    /// Runs the accept case then the reject case of one scenario, each against a
    /// freshly deployed verifier.
    #[instrument(skip_all, fields(scheme = %E::SCHEME, circuit = %artifacts.circuit))]
    pub async fn run<E, F>(
        &self,
        factory: &F,
        witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ScenarioReport, HarnessError>
    where
        E: SchemeEncoder,
        F: VerifierFactory,
        F::Verifier: VerifierClient<E::Arguments>,
    {
        let verifier = deploy::<E, F>(factory).await?;
        let encoded = self.prove_and_encode::<E>(witness, artifacts).await?;
        let accepted = check::<E, _>(&verifier, &encoded.arguments, ScenarioCase::Accept).await?;

        let rejected = !reject_degenerate::<E, F>(factory).await?;

        info!(public_signals = ?encoded.public_signals, "scenario passed");
        Ok(ScenarioReport {
            scheme: E::SCHEME,
            circuit: artifacts.circuit.clone(),
            public_signals: encoded.public_signals,
            accepted,
            rejected,
        })
    }
}

/// The reject case on its own: a fresh verifier must return `false` for the
/// scheme's all-zero argument list. The prover is never involved.
pub async fn reject_degenerate<E, F>(factory: &F) -> Result<bool, HarnessError>
where
    E: SchemeEncoder,
    F: VerifierFactory,
    F::Verifier: VerifierClient<E::Arguments>,
{
    let verifier = deploy::<E, F>(factory).await?;
    check::<E, _>(&verifier, &E::degenerate(), ScenarioCase::Reject).await
}

async fn deploy<E: SchemeEncoder, F: VerifierFactory>(
    factory: &F,
) -> Result<F::Verifier, HarnessError> {
    factory.deploy().await.context(DeploySnafu { scheme: E::SCHEME })
}

// Invokes the verifier once and compares its answer with what the case expects.
async fn check<E, V>(
    verifier: &V,
    arguments: &E::Arguments,
    case: ScenarioCase,
) -> Result<bool, HarnessError>
where
    E: SchemeEncoder,
    V: VerifierClient<E::Arguments>,
{
    let actual = verifier
        .verify_proof(arguments)
        .await
        .context(VerifierSnafu {
            scheme: E::SCHEME,
            case,
        })?;
    debug!(%case, inputs = ?E::public_inputs(arguments), actual, "verifier answered");

    let expected = case.expected();
    if actual != expected {
        return Err(HarnessError::UnexpectedOutcome {
            scheme: E::SCHEME,
            case,
            expected,
            actual,
        });
    }
    Ok(actual)
}
