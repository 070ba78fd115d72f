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

//! In-process provers and verifiers for exercising the harness.
//!
//! The Groth16 prover knows the discrete logs of its own verification key, so it
//! can forge proofs that satisfy the pairing equation for any public output. The
//! PLONK pair binds a keccak digest of the public inputs instead of a real proof.

use std::sync::atomic::{AtomicUsize, Ordering};

use ark_bn254::{Fq, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField, Zero};
use async_trait::async_trait;
use num_bigint::BigUint;
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};

use crate::{
    harness::{
        BoxError, CircuitArtifacts, ProofGenerator, ProverOutput, VerifierClient, VerifierFactory,
        WitnessInputs,
    },
    normalize::{normalize, ProofValue},
    plonk::{self, PlonkCalldata, PlonkProof},
    utils::{into_be_bytes32, to_word_hex},
    FieldElement, Groth16Proof,
};

pub fn witness(inputs: Value) -> WitnessInputs {
    match inputs {
        Value::Object(map) => map,
        other => panic!("witness must be an object, got {other}"),
    }
}

fn fq(value: Fq) -> String {
    BigUint::from(value.into_bigint()).to_string()
}

fn fr(value: &FieldElement) -> Fr {
    Fr::from_be_bytes_mod_order(&value.to_bytes_be())
}

fn hash_to_fr(label: &[u8], data: &[u8]) -> Fr {
    let digest = Keccak256::new()
        .chain_update(label)
        .chain_update(data)
        .finalize();
    let scalar = Fr::from_be_bytes_mod_order(&digest);
    if scalar.is_zero() {
        Fr::one()
    } else {
        scalar
    }
}

// The point at infinity keeps zero coordinates.
fn g1_json(point: G1Affine) -> Value {
    json!([fq(point.x), fq(point.y), "1"])
}

fn g2_json(point: G2Affine) -> Value {
    let (x, y) = (point.x, point.y);
    json!([[fq(x.c0), fq(x.c1)], [fq(y.c0), fq(y.c1)], ["1", "0"]])
}

fn g1(scalar: Fr) -> G1Affine {
    (G1Affine::generator() * scalar).into_affine()
}

fn g2(scalar: Fr) -> G2Affine {
    (G2Affine::generator() * scalar).into_affine()
}

// Every circuit here has a single public output: the product of its inputs.
fn circuit_output(witness: &WitnessInputs) -> Result<FieldElement, BoxError> {
    let mut product = Fr::one();
    for (name, value) in witness {
        let value = match normalize(value) {
            ProofValue::Integer(value) => value,
            ProofValue::Number(number) => number
                .as_u64()
                .map(BigUint::from)
                .ok_or_else(|| format!("witness value {name} is not a field element"))?,
            _ => return Err(format!("witness value {name} is not a field element").into()),
        };
        product *= fr(&value);
    }
    Ok(BigUint::from(product.into_bigint()))
}

fn require_known(
    circuits: &[CircuitArtifacts],
    artifacts: &CircuitArtifacts,
) -> Result<(), BoxError> {
    if circuits.contains(artifacts) {
        Ok(())
    } else {
        Err(format!("no such file: {}", artifacts.wasm.display()).into())
    }
}

/// Groth16 prover holding the toxic waste of its verification key.
pub struct TrapdoorGroth16Prover {
    alpha: Fr,
    beta: Fr,
    gamma: Fr,
    delta: Fr,
    ic: [Fr; 2],
    circuits: Vec<CircuitArtifacts>,
}

impl TrapdoorGroth16Prover {
    pub fn new(circuits: Vec<CircuitArtifacts>) -> Self {
        Self::with_trapdoor_seed(1, circuits)
    }

    pub fn with_trapdoor_seed(seed: u64, circuits: Vec<CircuitArtifacts>) -> Self {
        let seed = seed.to_be_bytes();
        Self {
            alpha: hash_to_fr(b"alpha", &seed),
            beta: hash_to_fr(b"beta", &seed),
            gamma: hash_to_fr(b"gamma", &seed),
            delta: hash_to_fr(b"delta", &seed),
            ic: [hash_to_fr(b"ic0", &seed), hash_to_fr(b"ic1", &seed)],
            circuits,
        }
    }

    /// The key in the prover library's `verification_key.json` layout.
    pub fn verification_key_json(&self) -> Value {
        json!({
            "protocol": "groth16",
            "curve": "bn128",
            "nPublic": 1,
            "vk_alpha_1": g1_json(g1(self.alpha)),
            "vk_beta_2": g2_json(g2(self.beta)),
            "vk_gamma_2": g2_json(g2(self.gamma)),
            "vk_delta_2": g2_json(g2(self.delta)),
            "IC": [g1_json(g1(self.ic[0])), g1_json(g1(self.ic[1]))],
        })
    }

    // r * s = alpha * beta + vk_x * gamma + c * delta
    fn prove(&self, output: &FieldElement, randomness: &[u8]) -> Value {
        let r = hash_to_fr(b"r", randomness);
        let s = hash_to_fr(b"s", randomness);
        let vk_x = self.ic[0] + fr(output) * self.ic[1];
        let delta_inv = self.delta.inverse().unwrap_or_else(Fr::one);
        let c = (r * s - self.alpha * self.beta - vk_x * self.gamma) * delta_inv;

        json!({
            "pi_a": g1_json(g1(r)),
            "pi_b": g2_json(g2(s)),
            "pi_c": g1_json(g1(c)),
            "protocol": "groth16",
            "curve": "bn128",
        })
    }
}

#[async_trait]
impl ProofGenerator for TrapdoorGroth16Prover {
    async fn full_prove(
        &self,
        witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput, BoxError> {
        require_known(&self.circuits, artifacts)?;
        let output = circuit_output(witness)?;
        let randomness = serde_json::to_vec(witness)?;

        Ok(ProverOutput {
            proof: self.prove(&output, &randomness),
            public_signals: json!([output.to_string()]),
        })
    }

    async fn export_solidity_calldata(
        &self,
        proof: &ProofValue,
        public_signals: &ProofValue,
    ) -> Result<String, BoxError> {
        let proof = Groth16Proof::try_from(proof)?;
        let signals = public_signals.field_elements("publicSignals")?;
        Ok(proof.to_solidity_calldata(&signals)?)
    }
}

fn plonk_digest(inputs: &[FieldElement]) -> Option<FieldElement> {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(into_be_bytes32(input)?);
    }
    Some(BigUint::from_bytes_be(&hasher.finalize()))
}

/// PLONK stand-in whose proof is the keccak digest of the public inputs.
pub struct DigestPlonkProver {
    circuits: Vec<CircuitArtifacts>,
}

impl DigestPlonkProver {
    pub fn new(circuits: Vec<CircuitArtifacts>) -> Self {
        Self { circuits }
    }
}

#[async_trait]
impl ProofGenerator for DigestPlonkProver {
    async fn full_prove(
        &self,
        witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput, BoxError> {
        require_known(&self.circuits, artifacts)?;
        let output = circuit_output(witness)?;
        let digest = plonk_digest(std::slice::from_ref(&output)).ok_or("output exceeds a word")?;

        Ok(ProverOutput {
            proof: json!({ "protocol": "plonk", "digest": digest.to_string() }),
            public_signals: json!([output.to_string()]),
        })
    }

    async fn export_solidity_calldata(
        &self,
        proof: &ProofValue,
        public_signals: &ProofValue,
    ) -> Result<String, BoxError> {
        let blob = proof
            .get("digest")
            .and_then(ProofValue::as_integer)
            .and_then(to_word_hex)
            .ok_or("proof carries no digest")?;
        let signals = public_signals.field_elements("publicSignals")?;
        Ok(plonk::to_solidity_calldata(&blob, &signals)?)
    }
}

pub struct DigestPlonkVerifier;

#[async_trait]
impl VerifierClient<PlonkCalldata> for DigestPlonkVerifier {
    async fn verify_proof(&self, arguments: &PlonkCalldata) -> Result<bool, BoxError> {
        let PlonkProof::Blob(blob) = &arguments.proof else {
            return Ok(false);
        };
        let expected = plonk_digest(&arguments.input).and_then(|digest| to_word_hex(&digest));
        Ok(expected.is_some_and(|expected| expected.eq_ignore_ascii_case(blob)))
    }
}

pub struct DigestPlonkFactory;

#[async_trait]
impl VerifierFactory for DigestPlonkFactory {
    type Verifier = DigestPlonkVerifier;

    async fn deploy(&self) -> Result<DigestPlonkVerifier, BoxError> {
        Ok(DigestPlonkVerifier)
    }
}

pub struct FailingProver;

#[async_trait]
impl ProofGenerator for FailingProver {
    async fn full_prove(
        &self,
        _witness: &WitnessInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProverOutput, BoxError> {
        Err(format!("no such file: {}", artifacts.wasm.display()).into())
    }

    async fn export_solidity_calldata(
        &self,
        _proof: &ProofValue,
        _public_signals: &ProofValue,
    ) -> Result<String, BoxError> {
        Err("nothing to export".into())
    }
}

/// Reverts on every call.
pub struct FailingVerifier;

#[async_trait]
impl<A: Sync + ?Sized> VerifierClient<A> for FailingVerifier {
    async fn verify_proof(&self, _arguments: &A) -> Result<bool, BoxError> {
        Err("execution reverted".into())
    }
}

pub struct FailingVerifierFactory;

#[async_trait]
impl VerifierFactory for FailingVerifierFactory {
    type Verifier = FailingVerifier;

    async fn deploy(&self) -> Result<FailingVerifier, BoxError> {
        Ok(FailingVerifier)
    }
}

/// Accepts everything.
pub struct LyingVerifier;

#[async_trait]
impl<A: Sync + ?Sized> VerifierClient<A> for LyingVerifier {
    async fn verify_proof(&self, _arguments: &A) -> Result<bool, BoxError> {
        Ok(true)
    }
}

pub struct LyingVerifierFactory;

#[async_trait]
impl VerifierFactory for LyingVerifierFactory {
    type Verifier = LyingVerifier;

    async fn deploy(&self) -> Result<LyingVerifier, BoxError> {
        Ok(LyingVerifier)
    }
}

/// Counts deployments of the wrapped factory.
pub struct CountingFactory<F> {
    inner: F,
    deployed: AtomicUsize,
}

impl<F> CountingFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            deployed: AtomicUsize::new(0),
        }
    }

    pub fn deployments(&self) -> usize {
        self.deployed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F: VerifierFactory> VerifierFactory for CountingFactory<F> {
    type Verifier = F::Verifier;

    async fn deploy(&self) -> Result<F::Verifier, BoxError> {
        self.deployed.fetch_add(1, Ordering::SeqCst);
        self.inner.deploy().await
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::{groth16::Groth16Calldata, NativeGroth16Verifier, VerificationKey};
    use rstest::rstest;

    #[rstest]
    #[case(json!({"a": "1", "b": "2"}), 2u64)]
    #[case(json!({"a": 1, "b": 2, "c": 3}), 6u64)]
    #[case(json!({"a": "0x03", "b": "5"}), 15u64)]
    fn multiply_the_witness(#[case] inputs: Value, #[case] expected: u64) {
        assert_eq!(circuit_output(&witness(inputs)).unwrap(), BigUint::from(expected));
    }

    #[test]
    fn forge_proofs_its_own_key_accepts() {
        let prover = TrapdoorGroth16Prover::new(Vec::new());
        let vk = VerificationKey::from_json(&prover.verification_key_json()).unwrap();
        let output = BigUint::from(6u8);
        let proof = Groth16Proof::try_from(&normalize(&prover.prove(&output, b"seed"))).unwrap();

        let verifier = NativeGroth16Verifier::new(vk);
        let arguments = Groth16Calldata::from_proof(&proof, &[output]);
        assert_eq!(verifier.verify_proof(&arguments), Ok(true));
    }

    #[test]
    fn reject_witness_values_that_are_not_integers() {
        assert!(circuit_output(&witness(json!({"a": "one"}))).is_err());
    }
}
